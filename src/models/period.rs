//! Calendar month periods
//!
//! Every analytics figure is bucketed by calendar month. A `MonthPeriod` is a
//! validated (year, month) pair that knows its first and last instant and its
//! length in days (leap-year aware).

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// A single calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthPeriod {
    /// Always the first day of the month
    first: NaiveDate,
}

impl MonthPeriod {
    /// Create a period for the given year and month (1-12)
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or(PeriodParseError::OutOfRange(year))
    }

    /// The month a given date falls in
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    /// The month a timestamp falls in
    pub fn of_timestamp(timestamp: NaiveDateTime) -> Self {
        Self::containing(timestamp.date())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Month number, 1-12
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Last day of the month
    pub fn last_day(&self) -> NaiveDate {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first)
    }

    /// First instant of the month (00:00:00 on day 1)
    pub fn start(&self) -> NaiveDateTime {
        self.first.and_time(NaiveTime::default())
    }

    /// Last instant of the month (23:59:59 on the last day)
    pub fn end(&self) -> NaiveDateTime {
        let last = self.last_day();
        last.and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| last.and_time(NaiveTime::default()))
    }

    /// Number of calendar days in the month (28-31)
    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// Whether a timestamp falls inside `[start, end]`
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        timestamp >= self.start() && timestamp <= self.end()
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }

    pub fn prev(&self) -> Self {
        self.offset(-1)
    }

    /// Shift by a number of months; saturates at the calendar's limits
    pub fn offset(&self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.first.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.first.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        Self {
            first: shifted.unwrap_or(self.first),
        }
    }

    /// Short human label, e.g. "Jan 2025"
    pub fn label(&self) -> String {
        self.first.format("%b %Y").to_string()
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        Self::new(year, month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    OutOfRange(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid period format: {} (expected YYYY-MM)", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::OutOfRange(y) => write!(f, "Year out of range: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}
