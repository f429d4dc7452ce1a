//! Formatting helpers shared by the analytics tables

use std::fmt::Write;

use chrono::NaiveDateTime;

use crate::models::Money;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a percentage with appropriate precision
pub fn format_percentage(pct: f64) -> String {
    if pct.abs() < 0.1 && pct != 0.0 {
        format!("{:.2}%", pct)
    } else if pct.abs() < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Signed change, e.g. "+12.5%" or "-100%"
pub fn format_change(pct: f64) -> String {
    if pct > 0.0 {
        format!("+{}", format_percentage(pct))
    } else {
        format_percentage(pct)
    }
}

/// Create a simple bar chart representation
pub fn format_bar(value: Money, max_value: Money, width: usize) -> String {
    if !max_value.is_positive() || !value.is_positive() {
        return " ".repeat(width);
    }

    let filled = ((value.cents() as f64 / max_value.cents() as f64) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a timestamp with a user-supplied strftime pattern
///
/// An invalid pattern falls back to `%Y-%m-%d` instead of failing the render.
pub fn format_timestamp(timestamp: NaiveDateTime, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", timestamp.format(date_format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", timestamp.format(FALLBACK_DATE_FORMAT));
    }
    out
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}
