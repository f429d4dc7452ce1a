//! Service layer for spendtrack
//!
//! Services sit on top of the storage layer: they validate input, join
//! entities and drive the analytics engine.

pub mod analytics;
pub mod category;
pub mod import;
pub mod user;

pub use analytics::AnalyticsService;
pub use category::CategoryService;
pub use import::{ColumnMapping, ImportResult, ImportService};
pub use user::UserService;
