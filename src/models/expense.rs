//! Expense model
//!
//! An expense is a single outflow recorded by one user. The analytics engine
//! only reads expenses; it never creates or mutates them.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, ExpenseId, UserId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// The user this expense belongs to
    pub user_id: UserId,

    /// Amount spent; rows written by older clients may carry `null`
    #[serde(default)]
    pub amount: Option<Money>,

    /// Local wall-clock time of the expense
    pub date: NaiveDateTime,

    /// Category, if any; may point at a category that no longer exists
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub description: String,

    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(user_id: UserId, amount: Money, date: NaiveDateTime) -> Self {
        Self {
            id: ExpenseId::new(),
            user_id,
            amount: Some(amount),
            date,
            category_id: None,
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    /// Builder-style category assignment
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Builder-style description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The amount, with a missing value counted as zero
    pub fn amount_or_zero(&self) -> Money {
        self.amount.unwrap_or_default()
    }

    /// Validate an expense before it is stored
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if let Some(amount) = self.amount {
            if amount.is_negative() {
                return Err(ExpenseValidationError::NegativeAmount(amount));
            }
        }
        if self.description.len() > 255 {
            return Err(ExpenseValidationError::DescriptionTooLong(
                self.description.len(),
            ));
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    NegativeAmount(Money),
    DescriptionTooLong(usize),
}

impl std::fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeAmount(amount) => write!(f, "Expense amount cannot be negative: {}", amount),
            Self::DescriptionTooLong(len) => {
                write!(f, "Description too long ({} chars, max 255)", len)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_amount_or_zero() {
        let user = UserId::new();
        let mut expense = Expense::new(user, Money::from_cents(2550), noon(2025, 1, 10));
        assert_eq!(expense.amount_or_zero().cents(), 2550);

        expense.amount = None;
        assert_eq!(expense.amount_or_zero(), Money::zero());
    }

    #[test]
    fn test_validation() {
        let user = UserId::new();
        let expense = Expense::new(user, Money::from_cents(-1), noon(2025, 1, 10));
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount(_))
        ));

        let expense = Expense::new(user, Money::zero(), noon(2025, 1, 10))
            .with_description("x".repeat(256));
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::DescriptionTooLong(256))
        ));
    }

    #[test]
    fn test_null_amount_deserializes() {
        let json = format!(
            r#"{{"id":"{}","user_id":"{}","amount":null,"date":"2025-01-10T12:00:00","created_at":"2025-01-10T12:00:00Z"}}"#,
            ExpenseId::new(),
            UserId::new()
        );
        let expense: Expense = serde_json::from_str(&json).unwrap();
        assert!(expense.amount.is_none());
        assert!(expense.category_id.is_none());
        assert_eq!(expense.date, noon(2025, 1, 10));
    }
}
