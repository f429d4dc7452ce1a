//! Joined expense rows
//!
//! The engine never sees raw storage records. It works on `ExpenseRow`s:
//! an expense with its category already resolved (or `None` when the
//! category is missing).

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::FallbackCategory;
use crate::models::money::decimal;
use crate::models::{Category, CategoryId, Expense, ExpenseId, Money};

/// Display data of a resolved category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub id: CategoryId,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl From<&Category> for CategoryInfo {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            icon: category.icon.clone(),
        }
    }
}

/// An expense joined with its category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    pub id: ExpenseId,
    #[serde(with = "decimal::option")]
    pub amount: Option<Money>,
    pub date: NaiveDateTime,
    pub description: String,
    pub category: Option<CategoryInfo>,
}

impl ExpenseRow {
    pub fn new(expense: Expense, category: Option<&Category>) -> Self {
        Self {
            id: expense.id,
            amount: expense.amount,
            date: expense.date,
            description: expense.description,
            category: category.map(CategoryInfo::from),
        }
    }

    /// Missing amounts count as zero
    pub fn amount_or_zero(&self) -> Money {
        self.amount.unwrap_or_default()
    }

    /// Name, color and icon of the bucket this row aggregates into
    pub(crate) fn label<'a>(&'a self, fallback: &'a FallbackCategory) -> BucketLabel<'a> {
        match &self.category {
            Some(category) => BucketLabel {
                name: &category.name,
                color: &category.color,
                icon: &category.icon,
            },
            None => BucketLabel {
                name: &fallback.name,
                color: &fallback.color,
                icon: &fallback.icon,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BucketLabel<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub icon: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserId;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_label_uses_category_or_fallback() {
        let fallback = FallbackCategory::default();
        let food = Category::global("Food", "#EF4444", "🍕");
        let expense = Expense::new(UserId::new(), Money::from_cents(100), noon());

        let row = ExpenseRow::new(expense.clone(), Some(&food));
        let label = row.label(&fallback);
        assert_eq!(label.name, "Food");
        assert_eq!(label.color, "#EF4444");

        let row = ExpenseRow::new(expense, None);
        let label = row.label(&fallback);
        assert_eq!(label.name, "Unknown");
        assert_eq!(label.color, "#3B82F6");
        assert_eq!(label.icon, "📝");
    }

    #[test]
    fn test_wire_shape() {
        let expense = Expense::new(UserId::new(), Money::from_cents(2550), noon())
            .with_description("Lunch");
        let row = ExpenseRow::new(expense, None);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["amount"], 25.5);
        assert_eq!(json["date"], "2025-01-10T12:00:00");
        assert_eq!(json["description"], "Lunch");
        assert!(json["category"].is_null());
    }
}
