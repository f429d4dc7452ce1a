//! Analytics CLI commands
//!
//! Each subcommand is one fetch, aggregate and present pass for the selected
//! user. Results are printed in the global `--format`.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::Subcommand;

use super::emit;
use crate::analytics::{AnalyticsEngine, EngineConfig};
use crate::config::Settings;
use crate::display::{
    format_category_report, format_dashboard, format_period_list, format_period_summary,
    format_trend_report, TableOptions,
};
use crate::error::{SpendError, SpendResult};
use crate::export::OutputFormat;
use crate::models::{MonthPeriod, User};
use crate::services::AnalyticsService;
use crate::storage::Storage;

/// Analytics subcommands
#[derive(Subcommand)]
pub enum AnalyticsCommands {
    /// Summary of one calendar month
    Monthly {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        period: Option<String>,
    },

    /// One summary per month that has expenses, newest first
    All,

    /// Monthly totals for the last N months, including empty months
    Trends {
        /// Number of months, defaults to the configured trend length
        #[arg(short, long)]
        months: Option<u32>,
    },

    /// Dashboard: all-time totals, this month against last month, top categories
    #[command(alias = "dashboard")]
    Summary,

    /// Spend per category over a date range
    Categories {
        /// Start date (YYYY-MM-DD), defaults to the first day of this month
        #[arg(short, long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD, inclusive), defaults to the last day of this month
        #[arg(short, long)]
        end: Option<String>,
    },
}

/// Handle an analytics command
pub fn handle_analytics_command(
    storage: &Storage,
    settings: &Settings,
    user: &User,
    format: OutputFormat,
    cmd: AnalyticsCommands,
) -> SpendResult<()> {
    let engine = AnalyticsEngine::new(EngineConfig::from_settings(settings));
    let service = AnalyticsService::new(storage, engine);
    let symbol = settings.currency_symbol.as_str();
    let options = TableOptions::from_settings(settings);
    let today = Local::now().date_naive();

    match cmd {
        AnalyticsCommands::Monthly { period } => {
            let period = parse_period(period.as_deref(), today)?;
            let summary = service.monthly(user.id, period)?;
            emit(&summary, format, || format_period_summary(&summary, &options))
        }

        AnalyticsCommands::All => {
            let summaries = service.all_months(user.id)?;
            emit(&summaries, format, || format_period_list(&summaries, symbol))
        }

        AnalyticsCommands::Trends { months } => {
            let months = months.unwrap_or(settings.trend_months);
            let report = service.trends(user.id, months, today)?;
            emit(&report, format, || format_trend_report(&report, symbol))
        }

        AnalyticsCommands::Summary => {
            let summary = service.dashboard(user.id, today)?;
            emit(&summary, format, || format_dashboard(&summary, &options))
        }

        AnalyticsCommands::Categories { start, end } => {
            let (start, end) = parse_range(start.as_deref(), end.as_deref(), today)?;
            let report = service.categories(user.id, start, end)?;
            emit(&report, format, || format_category_report(&report, symbol))
        }
    }
}

fn parse_period(period: Option<&str>, today: NaiveDate) -> SpendResult<MonthPeriod> {
    match period {
        Some(s) => MonthPeriod::parse(s).map_err(|e| {
            SpendError::Validation(format!(
                "Invalid period format: {}. Use YYYY-MM (e.g., 2025-01)",
                e
            ))
        }),
        None => Ok(MonthPeriod::containing(today)),
    }
}

fn parse_date(s: &str, which: &str) -> SpendResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        SpendError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            which, s
        ))
    })
}

/// Whole-day bounds; missing ends default to the current month
fn parse_range(
    start: Option<&str>,
    end: Option<&str>,
    today: NaiveDate,
) -> SpendResult<(NaiveDateTime, NaiveDateTime)> {
    let month = MonthPeriod::containing(today);

    let start = match start {
        Some(s) => parse_date(s, "start")?.and_time(NaiveTime::MIN),
        None => month.start(),
    };
    let end = match end {
        Some(e) => parse_date(e, "end")?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| SpendError::Validation(format!("Invalid end date: {}", e)))?,
        None => month.end(),
    };

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_period() {
        let today = date(2025, 4, 20);
        assert_eq!(
            parse_period(None, today).unwrap(),
            MonthPeriod::new(2025, 4).unwrap()
        );
        assert_eq!(
            parse_period(Some("2024-12"), today).unwrap(),
            MonthPeriod::new(2024, 12).unwrap()
        );
        assert!(parse_period(Some("2024-13"), today).unwrap_err().is_validation());
        assert!(parse_period(Some("April"), today).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_range_defaults_to_current_month() {
        let (start, end) = parse_range(None, None, date(2025, 2, 10)).unwrap();
        assert_eq!(start, date(2025, 2, 1).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(end, date(2025, 2, 28).and_hms_opt(23, 59, 59).unwrap());
    }

    #[test]
    fn test_parse_range_whole_days() {
        let (start, end) =
            parse_range(Some("2025-01-05"), Some("2025-01-05"), date(2025, 2, 10)).unwrap();
        assert_eq!(start, date(2025, 1, 5).and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(end, date(2025, 1, 5).and_hms_opt(23, 59, 59).unwrap());

        assert!(parse_range(Some("05/01/2025"), None, date(2025, 2, 10))
            .unwrap_err()
            .is_validation());
    }
}
