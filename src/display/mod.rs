//! Display formatting for terminal output
//!
//! Renders analytics results, categories and users as tables for the
//! default `--format table` output.

pub mod analytics;
pub mod category;
pub mod report;
pub mod user;

pub use analytics::{
    format_category_report, format_dashboard, format_period_list, format_period_summary,
    format_trend_report, TableOptions,
};
pub use category::format_category_list;
pub use user::format_user_list;
