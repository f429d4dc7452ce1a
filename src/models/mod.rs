//! Core data models for spendtrack
//!
//! Users, categories and expenses as stored on disk, plus the `Money` and
//! `MonthPeriod` value types the analytics engine computes with.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;
pub mod period;
pub mod user;

pub use category::{Category, CategoryValidationError, DefaultCategory};
pub use expense::{Expense, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId, UserId};
pub use money::{round2, Money};
pub use period::{MonthPeriod, PeriodParseError};
pub use user::User;
