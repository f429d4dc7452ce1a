//! Monthly analytics
//!
//! Groups a user's expenses by calendar month and category and derives
//! totals, averages, percentage breakdowns and month-over-month growth.
//! Everything here is recomputed per call from the rows handed in; nothing
//! is cached.

pub mod breakdown;
pub mod category_report;
pub mod dashboard;
pub mod engine;
pub mod period_summary;
pub mod row;
pub mod trend;

pub use breakdown::{CategoryBreakdown, CategoryBucket, Uncategorized};
pub use category_report::{CategoryReport, ReportPeriod};
pub use dashboard::{DashboardInput, DashboardSummary, TopCategory};
pub use engine::{AnalyticsEngine, EngineConfig};
pub use period_summary::{summarize_all_periods, PeriodSummary};
pub use row::{CategoryInfo, ExpenseRow};
pub use trend::{compute_trend, growth_percent, TrendPoint, TrendReport, TrendSummary};
