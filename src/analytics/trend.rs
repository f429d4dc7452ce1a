//! Month-over-month trends

use chrono::NaiveDate;
use serde::Serialize;

use super::row::ExpenseRow;
use crate::models::money::decimal;
use crate::models::{round2, Money, MonthPeriod};

/// Growth from `previous` to `current` in percent, rounded to two decimals
///
/// Zero whenever `previous` is not strictly positive, however large
/// `current` is.
pub fn growth_percent(current: Money, previous: Money) -> f64 {
    if !previous.is_positive() {
        return 0.0;
    }
    round2((current - previous).cents() as f64 / previous.cents() as f64 * 100.0)
}

/// Statistics over a run of consecutive monthly totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    #[serde(with = "decimal")]
    pub average: Money,
    #[serde(with = "decimal")]
    pub current_month: Money,
    #[serde(with = "decimal")]
    pub previous_month: Money,
    pub monthly_growth: f64,
    #[serde(with = "decimal")]
    pub total_period: Money,
}

/// Derive trend statistics from monthly totals, oldest first
pub fn compute_trend(monthly_totals: &[Money]) -> TrendSummary {
    let total_period: Money = monthly_totals.iter().copied().sum();
    let months = u32::try_from(monthly_totals.len()).unwrap_or(u32::MAX);

    let current_month = monthly_totals.last().copied().unwrap_or_default();
    let previous_month = monthly_totals
        .len()
        .checked_sub(2)
        .map(|i| monthly_totals[i])
        .unwrap_or_default();

    TrendSummary {
        average: total_period.div_round(months),
        current_month,
        previous_month,
        monthly_growth: growth_percent(current_month, previous_month),
        total_period,
    }
}

/// Total spend in one month of a trend
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Short label, e.g. "Jan 2025"
    pub month: String,
    #[serde(with = "decimal")]
    pub amount: Money,
    pub year: i32,
    pub month_num: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub trends: Vec<TrendPoint>,
    pub summary: TrendSummary,
}

impl TrendReport {
    /// Totals for the `months` calendar months ending with the month of
    /// `today`, oldest first
    ///
    /// Every month appears, with a zero amount if nothing was spent. Rows
    /// outside the window are ignored.
    pub fn compute(rows: &[ExpenseRow], months: u32, today: NaiveDate) -> Self {
        let current = MonthPeriod::containing(today);

        let trends: Vec<TrendPoint> = (0..months)
            .rev()
            .map(|back| current.offset(-i32::try_from(back).unwrap_or(i32::MAX)))
            .map(|period| {
                let amount: Money = rows
                    .iter()
                    .filter(|row| period.contains(row.date))
                    .map(ExpenseRow::amount_or_zero)
                    .sum();
                TrendPoint {
                    month: period.label(),
                    amount,
                    year: period.year(),
                    month_num: period.month(),
                }
            })
            .collect();

        let totals: Vec<Money> = trends.iter().map(|point| point.amount).collect();

        Self {
            summary: compute_trend(&totals),
            trends,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, UserId};

    fn money(values: &[i64]) -> Vec<Money> {
        values.iter().map(|v| Money::from_cents(v * 100)).collect()
    }

    fn row(cents: i64, y: i32, m: u32, d: u32) -> ExpenseRow {
        let date = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        ExpenseRow::new(
            Expense::new(UserId::new(), Money::from_cents(cents), date),
            None,
        )
    }

    #[test]
    fn test_drop_to_zero_is_minus_hundred() {
        let summary = compute_trend(&money(&[100, 0]));
        assert_eq!(summary.previous_month.to_decimal(), 100.0);
        assert_eq!(summary.current_month, Money::zero());
        assert_eq!(summary.monthly_growth, -100.0);
    }

    #[test]
    fn test_growth_from_zero_is_zero() {
        let summary = compute_trend(&money(&[0, 100]));
        assert_eq!(summary.monthly_growth, 0.0);

        let summary = compute_trend(&money(&[0, 1_000_000]));
        assert_eq!(summary.monthly_growth, 0.0);
    }

    #[test]
    fn test_average_and_total() {
        let summary = compute_trend(&money(&[10, 20, 40]));
        assert_eq!(summary.total_period.to_decimal(), 70.0);
        // 70 / 3 = 23.333 -> 23.33
        assert_eq!(summary.average.to_decimal(), 23.33);
        assert_eq!(summary.monthly_growth, 100.0);
    }

    #[test]
    fn test_short_runs() {
        let single = compute_trend(&money(&[50]));
        assert_eq!(single.current_month.to_decimal(), 50.0);
        assert_eq!(single.previous_month, Money::zero());
        assert_eq!(single.monthly_growth, 0.0);

        assert_eq!(compute_trend(&[]), TrendSummary::default());
    }

    #[test]
    fn test_negative_previous_collapses_to_zero() {
        let summary = compute_trend(&[Money::from_cents(-500), Money::from_cents(500)]);
        assert_eq!(summary.monthly_growth, 0.0);
    }

    #[test]
    fn test_report_zero_fills_and_spans_years() {
        let rows = vec![
            row(4000, 2025, 2, 14),
            row(1000, 2025, 2, 1),
            row(2500, 2024, 12, 24),
            row(9999, 2024, 6, 1),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();

        let report = TrendReport::compute(&rows, 4, today);

        let labels: Vec<_> = report.trends.iter().map(|p| p.month.as_str()).collect();
        assert_eq!(labels, vec!["Nov 2024", "Dec 2024", "Jan 2025", "Feb 2025"]);
        let amounts: Vec<_> = report.trends.iter().map(|p| p.amount.cents()).collect();
        assert_eq!(amounts, vec![0, 2500, 0, 5000]);
        assert_eq!(report.trends[0].month_num, 11);
        assert_eq!(report.trends[0].year, 2024);

        assert_eq!(report.summary.total_period.cents(), 7500);
        assert_eq!(report.summary.current_month.cents(), 5000);
        assert_eq!(report.summary.previous_month, Money::zero());
        assert_eq!(report.summary.monthly_growth, 0.0);
    }

    #[test]
    fn test_zero_months() {
        let report = TrendReport::compute(&[row(100, 2025, 1, 1)], 0, NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert!(report.trends.is_empty());
        assert_eq!(report.summary, TrendSummary::default());
    }

    #[test]
    fn test_wire_shape() {
        let report = TrendReport::compute(
            &[row(12345, 2025, 3, 3)],
            1,
            NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["trends"][0]["month"], "Mar 2025");
        assert_eq!(json["trends"][0]["monthNum"], 3);
        assert_eq!(json["trends"][0]["amount"], 123.45);
        assert_eq!(json["summary"]["totalPeriod"], 123.45);
        assert_eq!(json["summary"]["monthlyGrowth"], 0.0);
    }
}
