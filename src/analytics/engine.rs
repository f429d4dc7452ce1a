//! Aggregation engine
//!
//! `AnalyticsEngine` is a pure function object: it holds configuration and
//! turns joined rows into summaries. It performs no I/O and never fails.

use chrono::{NaiveDate, NaiveDateTime};

use super::category_report::CategoryReport;
use super::dashboard::{DashboardInput, DashboardSummary};
use super::period_summary::{summarize_all_periods, PeriodSummary};
use super::row::ExpenseRow;
use super::trend::{compute_trend, TrendReport, TrendSummary};
use crate::config::{FallbackCategory, Settings};
use crate::models::{Money, MonthPeriod};

/// Constants the engine aggregates with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Bucket for rows without a resolvable category
    pub fallback: FallbackCategory,
    /// Most recent expenses carried by a period summary
    pub sample_size: usize,
    /// Categories ranked on the dashboard
    pub top_categories: usize,
    /// Recent expenses listed on the dashboard
    pub recent_expenses: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl EngineConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            fallback: settings.fallback_category.clone(),
            sample_size: settings.sample_size,
            top_categories: settings.top_categories,
            recent_expenses: settings.recent_expenses,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl AnalyticsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Summarize rows restricted to `period`, newest first
    pub fn summarize_single_period(&self, rows: &[ExpenseRow], period: MonthPeriod) -> PeriodSummary {
        PeriodSummary::compute(rows, period, &self.config)
    }

    /// One summary per populated month, newest month first
    pub fn summarize_all_periods(&self, rows: &[ExpenseRow]) -> Vec<PeriodSummary> {
        summarize_all_periods(rows, &self.config)
    }

    pub fn compute_trend(&self, monthly_totals: &[Money]) -> TrendSummary {
        compute_trend(monthly_totals)
    }

    /// Zero-filled totals for the `months` months ending with `today`'s month
    pub fn trend_points(&self, rows: &[ExpenseRow], months: u32, today: NaiveDate) -> TrendReport {
        TrendReport::compute(rows, months, today)
    }

    pub fn compute_summary_stats(&self, input: &DashboardInput) -> DashboardSummary {
        DashboardSummary::compute(input, &self.config)
    }

    pub fn category_report(
        &self,
        rows: &[ExpenseRow],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CategoryReport {
        CategoryReport::compute(rows, start, end, &self.config)
    }
}
