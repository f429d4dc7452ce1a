//! Terminal rendering of analytics results

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::report::{format_bar, format_change, format_percentage, format_timestamp, truncate};
use crate::analytics::{
    CategoryBreakdown, CategoryReport, DashboardSummary, ExpenseRow, PeriodSummary, TrendReport,
};
use crate::config::Settings;
use crate::models::MonthPeriod;

const BAR_WIDTH: usize = 20;

/// Settings that shape the expense listings
#[derive(Debug, Clone, Copy)]
pub struct TableOptions<'a> {
    /// Currency symbol
    pub symbol: &'a str,
    /// Name shown for expenses without a resolved category
    pub fallback_name: &'a str,
    /// strftime pattern for expense timestamps
    pub date_format: &'a str,
}

impl<'a> TableOptions<'a> {
    pub fn from_settings(settings: &'a Settings) -> Self {
        Self {
            symbol: &settings.currency_symbol,
            fallback_name: &settings.fallback_category.name,
            date_format: &settings.date_format,
        }
    }
}

#[derive(Tabled)]
struct BreakdownRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "%")]
    percentage: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct ExpenseLine {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct MonthLine {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Expenses")]
    count: usize,
    #[tabled(rename = "Avg/day")]
    avg_per_day: String,
    #[tabled(rename = "Categories")]
    categories: usize,
    #[tabled(rename = "Top category")]
    top: String,
}

#[derive(Tabled)]
struct TrendLine {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "")]
    bar: String,
}

#[derive(Tabled)]
struct TopCategoryLine {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Count")]
    count: usize,
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

fn breakdown_table(breakdown: &CategoryBreakdown, symbol: &str) -> String {
    let max = breakdown.iter().map(|(_, b)| b.total).max().unwrap_or_default();
    let rows = breakdown
        .iter()
        .map(|(name, bucket)| BreakdownRow {
            name: match &bucket.icon {
                Some(icon) if !icon.is_empty() => format!("{} {}", icon, name),
                _ => name.to_string(),
            },
            total: bucket.total.format_with_symbol(symbol),
            count: bucket.count,
            percentage: format_percentage(bucket.percentage),
            bar: format_bar(bucket.total, max, BAR_WIDTH),
        })
        .collect();
    render::<BreakdownRow>(rows)
}

fn expense_table(rows: &[ExpenseRow], options: &TableOptions<'_>) -> String {
    let lines = rows
        .iter()
        .map(|row| ExpenseLine {
            date: format_timestamp(row.date, options.date_format),
            category: row
                .category
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| options.fallback_name.to_string()),
            description: truncate(&row.description, 40),
            amount: match row.amount {
                Some(amount) => amount.format_with_symbol(options.symbol),
                None => "-".to_string(),
            },
        })
        .collect();
    render::<ExpenseLine>(lines)
}

fn month_title(year: i32, month: u32) -> String {
    MonthPeriod::new(year, month)
        .map(|p| p.label())
        .unwrap_or_else(|_| format!("{:04}-{:02}", year, month))
}

/// Format a single month's summary
pub fn format_period_summary(summary: &PeriodSummary, options: &TableOptions<'_>) -> String {
    let symbol = options.symbol;
    let mut output = String::new();

    output.push_str(&format!(
        "Spending for {} ({} to {})\n",
        month_title(summary.year, summary.month),
        summary.period_start.date(),
        summary.period_end.date()
    ));
    output.push_str(&format!(
        "Total: {}   Expenses: {}   Avg/day: {} over {} days\n",
        summary.total_amount.format_with_symbol(symbol),
        summary.expense_count,
        summary.avg_per_day.format_with_symbol(symbol),
        summary.days_in_period
    ));

    if summary.category_breakdown.is_empty() {
        output.push_str("\nNo expenses recorded for this month.\n");
        return output;
    }

    output.push_str(&format!("\nBy category ({}):\n", summary.category_count));
    output.push_str(&breakdown_table(&summary.category_breakdown, symbol));
    output.push('\n');

    output.push_str("\nMost recent:\n");
    output.push_str(&expense_table(&summary.sample_expenses, options));
    output.push('\n');

    output
}

/// Format one line per populated month
pub fn format_period_list(summaries: &[PeriodSummary], symbol: &str) -> String {
    if summaries.is_empty() {
        return "No expenses recorded yet.\n".to_string();
    }

    let rows = summaries
        .iter()
        .map(|s| MonthLine {
            month: month_title(s.year, s.month),
            total: s.total_amount.format_with_symbol(symbol),
            count: s.expense_count,
            avg_per_day: s.avg_per_day.format_with_symbol(symbol),
            categories: s.category_count,
            top: s
                .category_breakdown
                .iter()
                .next()
                .map(|(name, _)| name.to_string())
                .unwrap_or_default(),
        })
        .collect();

    let mut output = render::<MonthLine>(rows);
    output.push('\n');
    output
}

pub fn format_trend_report(report: &TrendReport, symbol: &str) -> String {
    if report.trends.is_empty() {
        return "No months requested.\n".to_string();
    }

    let max = report.trends.iter().map(|p| p.amount).max().unwrap_or_default();
    let rows = report
        .trends
        .iter()
        .map(|p| TrendLine {
            month: p.month.clone(),
            amount: p.amount.format_with_symbol(symbol),
            bar: format_bar(p.amount, max, BAR_WIDTH),
        })
        .collect();

    let summary = &report.summary;
    let mut output = render::<TrendLine>(rows);
    output.push('\n');
    output.push_str(&format!(
        "\nTotal: {}   Average: {}\n",
        summary.total_period.format_with_symbol(symbol),
        summary.average.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "This month: {}   Previous: {}   Change: {}\n",
        summary.current_month.format_with_symbol(symbol),
        summary.previous_month.format_with_symbol(symbol),
        format_change(summary.monthly_growth)
    ));
    output
}

pub fn format_dashboard(summary: &DashboardSummary, options: &TableOptions<'_>) -> String {
    let symbol = options.symbol;
    let mut output = String::new();

    output.push_str(&format!(
        "All time: {} across {} expenses\n",
        summary.total_amount.format_with_symbol(symbol),
        summary.total_expenses
    ));
    output.push_str(&format!(
        "This month: {}   Last month: {}   Change: {}\n",
        summary.this_month_amount.format_with_symbol(symbol),
        summary.last_month_amount.format_with_symbol(symbol),
        format_change(summary.change_percentage)
    ));

    if !summary.top_categories.is_empty() {
        let rows = summary
            .top_categories
            .iter()
            .map(|c| TopCategoryLine {
                name: if c.icon.is_empty() {
                    c.name.clone()
                } else {
                    format!("{} {}", c.icon, c.name)
                },
                amount: c.amount.format_with_symbol(symbol),
                count: c.count,
            })
            .collect();
        output.push_str("\nTop categories this month:\n");
        output.push_str(&render::<TopCategoryLine>(rows));
        output.push('\n');
    }

    if !summary.recent_expenses.is_empty() {
        output.push_str("\nRecent expenses:\n");
        output.push_str(&expense_table(&summary.recent_expenses, options));
        output.push('\n');
    }

    output
}

pub fn format_category_report(report: &CategoryReport, symbol: &str) -> String {
    let mut output = format!(
        "Category spending {} to {}\n",
        report.period.start_date.format("%Y-%m-%d %H:%M"),
        report.period.end_date.format("%Y-%m-%d %H:%M")
    );

    if report.category_breakdown.is_empty() {
        output.push_str("\nNo categorized expenses in this range.\n");
        return output;
    }

    output.push_str(&breakdown_table(&report.category_breakdown, symbol));
    output.push('\n');
    output.push_str(&format!(
        "Total: {}\n",
        report.total_amount.format_with_symbol(symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{AnalyticsEngine, DashboardInput};
    use crate::models::{Category, Expense, Money, UserId};
    use chrono::NaiveDate;

    const OPTIONS: TableOptions<'static> = TableOptions {
        symbol: "$",
        fallback_name: "Unknown",
        date_format: "%Y-%m-%d %H:%M",
    };

    fn rows() -> Vec<ExpenseRow> {
        let food = Category::global("Food", "#EF4444", "🍕");
        let date = NaiveDate::from_ymd_opt(2025, 4, 12)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        vec![
            ExpenseRow::new(
                Expense::new(UserId::new(), Money::from_cents(2550), date).with_description("Lunch"),
                Some(&food),
            ),
            ExpenseRow::new(Expense::new(UserId::new(), Money::from_cents(1200), date), None),
        ]
    }

    #[test]
    fn test_period_summary_table() {
        let engine = AnalyticsEngine::default();
        let summary = engine.summarize_single_period(&rows(), MonthPeriod::new(2025, 4).unwrap());

        let text = format_period_summary(&summary, &OPTIONS);
        assert!(text.contains("Spending for Apr 2025"));
        assert!(text.contains("$37.50"));
        assert!(text.contains("Avg/day: $1.25 over 30 days"));
        assert!(text.contains("Food"));
        assert!(text.contains("68%"));
        assert!(text.contains("Lunch"));
        assert!(text.contains("2025-04-12 12:00"));
    }

    #[test]
    fn test_expense_dates_follow_date_format() {
        let engine = AnalyticsEngine::default();
        let summary = engine.summarize_single_period(&rows(), MonthPeriod::new(2025, 4).unwrap());

        let options = TableOptions {
            date_format: "%d.%m.%Y",
            ..OPTIONS
        };
        let text = format_period_summary(&summary, &options);
        assert!(text.contains("12.04.2025"));
        assert!(!text.contains("2025-04-12"));

        let settings = Settings::default();
        let options = TableOptions::from_settings(&settings);
        assert_eq!(options.date_format, "%Y-%m-%d");
        assert_eq!(options.fallback_name, "Unknown");
    }

    #[test]
    fn test_empty_summary_message() {
        let engine = AnalyticsEngine::default();
        let summary = engine.summarize_single_period(&[], MonthPeriod::new(2025, 2).unwrap());
        assert!(format_period_summary(&summary, &OPTIONS).contains("No expenses recorded"));
        assert_eq!(format_period_list(&[], "$"), "No expenses recorded yet.\n");
    }

    #[test]
    fn test_trend_and_dashboard_text() {
        let engine = AnalyticsEngine::default();
        let today = NaiveDate::from_ymd_opt(2025, 4, 30).unwrap();
        let trend = engine.trend_points(&rows(), 3, today);
        let text = format_trend_report(&trend, "€");
        assert!(text.contains("Feb 2025"));
        assert!(text.contains("€37.50"));

        let dashboard = engine.compute_summary_stats(&DashboardInput {
            this_month: rows(),
            ..Default::default()
        });
        let text = format_dashboard(&dashboard, &OPTIONS);
        assert!(text.contains("Top categories this month"));
        assert!(text.contains("🍕 Food"));
    }
}
