//! Period summaries
//!
//! One summary per calendar month: totals, per-day average, the category
//! breakdown and a sample of the most recent expenses.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::breakdown::{CategoryBreakdown, Uncategorized};
use super::engine::EngineConfig;
use super::row::ExpenseRow;
use crate::models::money::decimal;
use crate::models::{Money, MonthPeriod};

/// Aggregated statistics for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub year: i32,
    pub month: u32,
    pub period_start: NaiveDateTime,
    pub period_end: NaiveDateTime,
    pub days_in_period: u32,
    #[serde(with = "decimal")]
    pub total_amount: Money,
    pub expense_count: usize,
    #[serde(with = "decimal")]
    pub avg_per_day: Money,
    pub category_count: usize,
    pub category_breakdown: CategoryBreakdown,
    pub sample_expenses: Vec<ExpenseRow>,
}

impl PeriodSummary {
    /// Summarize rows already restricted to `period`
    ///
    /// Rows are expected newest first; the sample is simply the first
    /// `sample_size` of them.
    pub fn compute(rows: &[ExpenseRow], period: MonthPeriod, config: &EngineConfig) -> Self {
        let category_breakdown =
            CategoryBreakdown::fold(rows, &config.fallback, Uncategorized::Fallback, false);
        let total_amount = category_breakdown.total();
        let days_in_period = period.days();

        let avg_per_day = if total_amount.is_positive() {
            total_amount.div_round(days_in_period)
        } else {
            Money::zero()
        };

        Self {
            year: period.year(),
            month: period.month(),
            period_start: period.start(),
            period_end: period.end(),
            days_in_period,
            total_amount,
            expense_count: rows.len(),
            avg_per_day,
            category_count: category_breakdown.len(),
            category_breakdown,
            sample_expenses: rows.iter().take(config.sample_size).cloned().collect(),
        }
    }

    pub fn period(&self) -> Option<MonthPeriod> {
        MonthPeriod::new(self.year, self.month).ok()
    }
}

/// One summary per month that has at least one expense, newest month first
pub fn summarize_all_periods(rows: &[ExpenseRow], config: &EngineConfig) -> Vec<PeriodSummary> {
    let mut by_month: BTreeMap<MonthPeriod, Vec<ExpenseRow>> = BTreeMap::new();
    for row in rows {
        by_month
            .entry(MonthPeriod::of_timestamp(row.date))
            .or_default()
            .push(row.clone());
    }

    by_month
        .iter()
        .rev()
        .map(|(period, month_rows)| PeriodSummary::compute(month_rows, *period, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Expense, UserId};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn row(cents: i64, date: NaiveDateTime, category: Option<&Category>) -> ExpenseRow {
        ExpenseRow::new(
            Expense::new(UserId::new(), Money::from_cents(cents), date),
            category,
        )
    }

    #[test]
    fn test_two_categories_in_thirty_day_month() {
        let food = Category::global("Food", "#EF4444", "🍕");
        let transport = Category::global("Transport", "#3B82F6", "🚗");
        let rows = vec![
            row(2550, at(2025, 4, 12), Some(&food)),
            row(1200, at(2025, 4, 3), Some(&transport)),
        ];
        let april = MonthPeriod::new(2025, 4).unwrap();

        let summary = PeriodSummary::compute(&rows, april, &EngineConfig::default());

        assert_eq!(summary.days_in_period, 30);
        assert_eq!(summary.total_amount.to_decimal(), 37.5);
        assert_eq!(summary.avg_per_day.to_decimal(), 1.25);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.category_count, 2);
        assert_eq!(summary.category_breakdown.get("Food").unwrap().percentage, 68.0);
        assert_eq!(summary.category_breakdown.get("Transport").unwrap().percentage, 32.0);
        assert_eq!(summary.period_start, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap().and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(summary.period_end, NaiveDate::from_ymd_opt(2025, 4, 30).unwrap().and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_empty_month_is_all_zero() {
        let feb = MonthPeriod::new(2024, 2).unwrap();
        let summary = PeriodSummary::compute(&[], feb, &EngineConfig::default());

        assert_eq!(summary.total_amount, Money::zero());
        assert_eq!(summary.expense_count, 0);
        assert_eq!(summary.avg_per_day, Money::zero());
        assert_eq!(summary.category_count, 0);
        assert!(summary.category_breakdown.is_empty());
        assert!(summary.sample_expenses.is_empty());
        assert_eq!(summary.days_in_period, 29);
    }

    #[test]
    fn test_missing_amount_counts_as_zero() {
        let food = Category::global("Food", "#EF4444", "🍕");
        let mut nulled = row(0, at(2025, 1, 2), Some(&food));
        nulled.amount = None;
        let rows = vec![row(1000, at(2025, 1, 3), Some(&food)), nulled];

        let summary =
            PeriodSummary::compute(&rows, MonthPeriod::new(2025, 1).unwrap(), &EngineConfig::default());
        assert_eq!(summary.total_amount.cents(), 1000);
        assert_eq!(summary.expense_count, 2);
        assert_eq!(summary.category_breakdown.get("Food").unwrap().count, 2);
    }

    #[test]
    fn test_deleted_category_groups_under_fallback() {
        let rows = vec![row(4200, at(2025, 5, 5), None)];
        let summary =
            PeriodSummary::compute(&rows, MonthPeriod::new(2025, 5).unwrap(), &EngineConfig::default());

        let unknown = summary.category_breakdown.get("Unknown").unwrap();
        assert_eq!(unknown.color, "#3B82F6");
        assert_eq!(unknown.total.cents(), 4200);
        assert_eq!(unknown.percentage, 100.0);
    }

    #[test]
    fn test_breakdown_sums_to_total_and_percentages_near_hundred() {
        let names = ["Food", "Bills", "Travel", "Health", "Books", "Games", "Gifts"];
        let categories: Vec<_> = names
            .iter()
            .map(|name| Category::global(*name, "#111111", ""))
            .collect();
        let rows: Vec<_> = (0..40)
            .map(|i| {
                let cents = 137 * (i + 1) % 9973 + 1;
                row(cents, at(2025, 7, (i % 28 + 1) as u32), Some(&categories[i as usize % 7]))
            })
            .collect();

        let summary =
            PeriodSummary::compute(&rows, MonthPeriod::new(2025, 7).unwrap(), &EngineConfig::default());

        let bucket_sum: Money = summary.category_breakdown.iter().map(|(_, b)| b.total).sum();
        assert_eq!(bucket_sum, summary.total_amount);
        let pct: f64 = summary.category_breakdown.iter().map(|(_, b)| b.percentage).sum();
        assert!((pct - 100.0).abs() < 0.05, "percentages summed to {}", pct);
        assert_eq!(summary.category_count, summary.category_breakdown.len());
    }

    #[test]
    fn test_sample_is_first_ten_rows() {
        let rows: Vec<_> = (1..=15)
            .rev()
            .map(|d| row(100, at(2025, 3, d), None))
            .collect();
        let summary =
            PeriodSummary::compute(&rows, MonthPeriod::new(2025, 3).unwrap(), &EngineConfig::default());

        assert_eq!(summary.sample_expenses.len(), 10);
        assert_eq!(summary.sample_expenses[0].date, at(2025, 3, 15));
        assert_eq!(summary.sample_expenses[9].date, at(2025, 3, 6));
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let food = Category::global("Food", "#EF4444", "🍕");
        let rows = vec![row(999, at(2025, 2, 1), Some(&food)), row(1, at(2025, 2, 2), None)];
        let feb = MonthPeriod::new(2025, 2).unwrap();
        let config = EngineConfig::default();

        let first = serde_json::to_string(&PeriodSummary::compute(&rows, feb, &config)).unwrap();
        let second = serde_json::to_string(&PeriodSummary::compute(&rows, feb, &config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_periods_newest_first_without_gaps() {
        let rows = vec![
            row(500, at(2025, 3, 9), None),
            row(700, at(2024, 12, 31), None),
            row(300, at(2025, 3, 1), None),
        ];

        let summaries = summarize_all_periods(&rows, &EngineConfig::default());

        assert_eq!(summaries.len(), 2);
        assert_eq!((summaries[0].year, summaries[0].month), (2025, 3));
        assert_eq!(summaries[0].total_amount.cents(), 800);
        assert_eq!(summaries[0].expense_count, 2);
        assert_eq!((summaries[1].year, summaries[1].month), (2024, 12));
        assert_eq!(summaries[1].days_in_period, 31);
    }

    #[test]
    fn test_all_periods_of_nothing_is_empty() {
        assert!(summarize_all_periods(&[], &EngineConfig::default()).is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let rows = vec![row(3750, at(2025, 4, 1), None)];
        let summary =
            PeriodSummary::compute(&rows, MonthPeriod::new(2025, 4).unwrap(), &EngineConfig::default());
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["totalAmount"], 37.5);
        assert_eq!(json["avgPerDay"], 1.25);
        assert_eq!(json["daysInPeriod"], 30);
        assert_eq!(json["periodEnd"], "2025-04-30T23:59:59");
        assert_eq!(json["categoryBreakdown"]["Unknown"]["count"], 1);
        assert_eq!(json["sampleExpenses"].as_array().unwrap().len(), 1);
    }
}
