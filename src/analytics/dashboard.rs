//! Dashboard summary

use serde::Serialize;

use super::breakdown::{CategoryBreakdown, Uncategorized};
use super::engine::EngineConfig;
use super::row::ExpenseRow;
use super::trend::growth_percent;
use crate::models::money::decimal;
use crate::models::Money;

/// A category ranked by this month's spend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopCategory {
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(with = "decimal")]
    pub amount: Money,
    pub count: usize,
}

/// All-time totals plus this month against last month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_expenses: usize,
    #[serde(with = "decimal")]
    pub total_amount: Money,
    #[serde(with = "decimal")]
    pub this_month_amount: Money,
    #[serde(with = "decimal")]
    pub last_month_amount: Money,
    pub change_percentage: f64,
    pub top_categories: Vec<TopCategory>,
    pub recent_expenses: Vec<ExpenseRow>,
}

/// The four independent row sets a dashboard is built from
#[derive(Debug, Clone, Default)]
pub struct DashboardInput {
    pub all: Vec<ExpenseRow>,
    pub this_month: Vec<ExpenseRow>,
    pub last_month: Vec<ExpenseRow>,
    /// Newest first
    pub recent: Vec<ExpenseRow>,
}

fn sum(rows: &[ExpenseRow]) -> Money {
    rows.iter().map(ExpenseRow::amount_or_zero).sum()
}

impl DashboardSummary {
    pub fn compute(input: &DashboardInput, config: &EngineConfig) -> Self {
        let this_month_amount = sum(&input.this_month);
        let last_month_amount = sum(&input.last_month);

        let top_categories = CategoryBreakdown::fold(
            &input.this_month,
            &config.fallback,
            Uncategorized::Fallback,
            true,
        )
        .iter()
        .take(config.top_categories)
        .map(|(name, bucket)| TopCategory {
            name: name.to_string(),
            icon: bucket.icon.clone().unwrap_or_default(),
            color: bucket.color.clone(),
            amount: bucket.total,
            count: bucket.count,
        })
        .collect();

        Self {
            total_expenses: input.all.len(),
            total_amount: sum(&input.all),
            this_month_amount,
            last_month_amount,
            change_percentage: growth_percent(this_month_amount, last_month_amount),
            top_categories,
            recent_expenses: input
                .recent
                .iter()
                .take(config.recent_expenses)
                .cloned()
                .collect(),
        }
    }
}
