//! Category spend over an arbitrary date range

use chrono::NaiveDateTime;
use serde::Serialize;

use super::breakdown::{CategoryBreakdown, Uncategorized};
use super::engine::EngineConfig;
use super::row::ExpenseRow;
use crate::models::money::decimal;
use crate::models::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// Spend per category between two instants
///
/// Only categorized expenses count, so `total_amount` can be lower than the
/// period summary total for the same dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    pub category_breakdown: CategoryBreakdown,
    #[serde(with = "decimal")]
    pub total_amount: Money,
    pub period: ReportPeriod,
}

impl CategoryReport {
    /// Build the report from rows already restricted to `[start, end]`
    pub fn compute(
        rows: &[ExpenseRow],
        start: NaiveDateTime,
        end: NaiveDateTime,
        config: &EngineConfig,
    ) -> Self {
        let category_breakdown =
            CategoryBreakdown::fold(rows, &config.fallback, Uncategorized::Skip, true);

        Self {
            total_amount: category_breakdown.total(),
            category_breakdown,
            period: ReportPeriod {
                start_date: start,
                end_date: end,
            },
        }
    }
}
