//! CSV export
//!
//! Flattens analytics results into one record per bucket or month. Amounts
//! are written as plain decimals with two places.

use std::io::Write;

use csv::{Writer, WriterBuilder};
use serde::Serialize;

use crate::analytics::{CategoryBreakdown, CategoryReport, DashboardSummary, PeriodSummary, TrendReport};
use crate::error::{SpendError, SpendResult};
use crate::models::Money;

/// Types that can be written as CSV records
pub trait CsvExport {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()>;
}

fn amount(money: Money) -> String {
    format!("{:.2}", money.to_decimal())
}

#[derive(Serialize)]
struct BucketRecord<'a> {
    period: String,
    category: &'a str,
    total: String,
    count: usize,
    percentage: f64,
    color: &'a str,
}

fn write_buckets<W: Write>(
    out: &mut Writer<W>,
    period: &str,
    breakdown: &CategoryBreakdown,
) -> SpendResult<()> {
    for (name, bucket) in breakdown.iter() {
        out.serialize(BucketRecord {
            period: period.to_string(),
            category: name,
            total: amount(bucket.total),
            count: bucket.count,
            percentage: bucket.percentage,
            color: &bucket.color,
        })?;
    }
    Ok(())
}

/// A writer whose first record is `header`, even if no rows follow
fn with_header<W: Write>(sink: W, header: &[&str]) -> SpendResult<Writer<W>> {
    let mut out = WriterBuilder::new().has_headers(false).from_writer(sink);
    out.write_record(header)?;
    Ok(out)
}

fn finish<W: Write>(mut out: Writer<W>) -> SpendResult<()> {
    out.flush().map_err(|e| SpendError::Export(e.to_string()))
}

impl CsvExport for PeriodSummary {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        std::slice::from_ref(self).write_csv(writer)
    }
}

impl CsvExport for [PeriodSummary] {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        let mut out = with_header(writer, &["period", "category", "total", "count", "percentage", "color"])?;
        for summary in self {
            let period = format!("{:04}-{:02}", summary.year, summary.month);
            write_buckets(&mut out, &period, &summary.category_breakdown)?;
        }
        finish(out)
    }
}

impl CsvExport for Vec<PeriodSummary> {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        self.as_slice().write_csv(writer)
    }
}

#[derive(Serialize)]
struct TrendRecord<'a> {
    month: &'a str,
    year: i32,
    month_num: u32,
    amount: String,
}

impl CsvExport for TrendReport {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        let mut out = with_header(writer, &["month", "year", "month_num", "amount"])?;
        for point in &self.trends {
            out.serialize(TrendRecord {
                month: &point.month,
                year: point.year,
                month_num: point.month_num,
                amount: amount(point.amount),
            })?;
        }
        finish(out)
    }
}

#[derive(Serialize)]
struct TopCategoryRecord<'a> {
    rank: usize,
    category: &'a str,
    amount: String,
    count: usize,
    color: &'a str,
}

impl CsvExport for DashboardSummary {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        let mut out = with_header(writer, &["rank", "category", "amount", "count", "color"])?;
        for (i, top) in self.top_categories.iter().enumerate() {
            out.serialize(TopCategoryRecord {
                rank: i + 1,
                category: &top.name,
                amount: amount(top.amount),
                count: top.count,
                color: &top.color,
            })?;
        }
        finish(out)
    }
}

impl CsvExport for CategoryReport {
    fn write_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        let mut out = with_header(writer, &["period", "category", "total", "count", "percentage", "color"])?;
        let period = format!(
            "{}..{}",
            self.period.start_date.format("%Y-%m-%d"),
            self.period.end_date.format("%Y-%m-%d")
        );
        write_buckets(&mut out, &period, &self.category_breakdown)?;
        finish(out)
    }
}
