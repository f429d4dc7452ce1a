//! Analytics service
//!
//! Fetches a user's expenses from an [`ExpenseStore`], joins each row with
//! its category through a [`CategoryResolver`] and hands the rows to the
//! [`AnalyticsEngine`]. Every call is a fresh fetch → aggregate; results
//! are never cached.

use std::collections::HashMap;
use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::analytics::{
    AnalyticsEngine, CategoryReport, DashboardInput, DashboardSummary, ExpenseRow, PeriodSummary,
    TrendReport,
};
use crate::error::{SpendError, SpendResult};
use crate::models::{Category, CategoryId, Expense, MonthPeriod, UserId};
use crate::storage::{CategoryResolver, DateRange, ExpenseStore};

/// Service for monthly analytics
pub struct AnalyticsService<'a, S> {
    store: &'a S,
    engine: AnalyticsEngine,
}

impl<'a, S> AnalyticsService<'a, S>
where
    S: ExpenseStore + CategoryResolver,
{
    pub fn new(store: &'a S, engine: AnalyticsEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &AnalyticsEngine {
        &self.engine
    }

    /// Summary of one calendar month
    pub fn monthly(&self, user_id: UserId, period: MonthPeriod) -> SpendResult<PeriodSummary> {
        let rows = self.fetch(user_id, DateRange::between(period.start(), period.end()))?;
        let summary = self.engine.summarize_single_period(&rows, period);

        info!(
            user = %user_id,
            period = %period,
            expenses = summary.expense_count,
            categories = summary.category_count,
            "Processed monthly summary"
        );
        Ok(summary)
    }

    /// One summary per month that has expenses, newest first
    pub fn all_months(&self, user_id: UserId) -> SpendResult<Vec<PeriodSummary>> {
        let rows = self.fetch(user_id, DateRange::default())?;
        let summaries = self.engine.summarize_all_periods(&rows);

        info!(user = %user_id, months = summaries.len(), "Processed all-month summaries");
        Ok(summaries)
    }

    /// Zero-filled trend over the `months` months ending with `today`'s month
    pub fn trends(&self, user_id: UserId, months: u32, today: NaiveDate) -> SpendResult<TrendReport> {
        let current = MonthPeriod::containing(today);
        let back = i32::try_from(months.saturating_sub(1)).unwrap_or(i32::MAX);
        let first = current.offset(-back);

        let rows = if months == 0 {
            Vec::new()
        } else {
            self.fetch(user_id, DateRange::between(first.start(), current.end()))?
        };
        let report = self.engine.trend_points(&rows, months, today);

        info!(
            user = %user_id,
            months,
            total = %report.summary.total_period,
            "Processed trend"
        );
        Ok(report)
    }

    /// Dashboard totals
    ///
    /// The four reads are independent and run concurrently; aggregation starts
    /// only after all of them have completed.
    pub fn dashboard(&self, user_id: UserId, today: NaiveDate) -> SpendResult<DashboardSummary> {
        let this_month = MonthPeriod::containing(today);
        let last_month = this_month.prev();
        let recent_limit = self.engine.config().recent_expenses;
        let store = self.store;

        let (all, current, previous, recent) = thread::scope(|scope| {
            let all = scope.spawn(move || store.expenses_for_user(user_id, DateRange::default()));
            let current =
                scope.spawn(move || store.expenses_for_user(user_id, DateRange::since(this_month.start())));
            let previous = scope.spawn(move || {
                store.expenses_for_user(
                    user_id,
                    DateRange::between(last_month.start(), last_month.end()),
                )
            });
            let recent = scope.spawn(move || store.recent_for_user(user_id, recent_limit));

            (all.join(), current.join(), previous.join(), recent.join())
        });

        let input = DashboardInput {
            all: self.join_rows(fetch_result(all)?)?,
            this_month: self.join_rows(fetch_result(current)?)?,
            last_month: self.join_rows(fetch_result(previous)?)?,
            recent: self.join_rows(fetch_result(recent)?)?,
        };
        debug!(
            user = %user_id,
            all = input.all.len(),
            this_month = input.this_month.len(),
            last_month = input.last_month.len(),
            recent = input.recent.len(),
            "Fetched dashboard data"
        );

        let summary = self.engine.compute_summary_stats(&input);
        info!(
            user = %user_id,
            total = %summary.total_amount,
            change = summary.change_percentage,
            "Processed dashboard summary"
        );
        Ok(summary)
    }

    /// Spend per category between two instants (inclusive)
    pub fn categories(
        &self,
        user_id: UserId,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> SpendResult<CategoryReport> {
        if start > end {
            return Err(SpendError::Validation(format!(
                "Start {} is after end {}",
                start, end
            )));
        }

        let rows = self.fetch(user_id, DateRange::between(start, end))?;
        let report = self.engine.category_report(&rows, start, end);

        info!(
            user = %user_id,
            categories = report.category_breakdown.len(),
            total = %report.total_amount,
            "Processed category analytics"
        );
        Ok(report)
    }

    fn fetch(&self, user_id: UserId, range: DateRange) -> SpendResult<Vec<ExpenseRow>> {
        let expenses = self.store.expenses_for_user(user_id, range)?;
        debug!(user = %user_id, rows = expenses.len(), "Fetched expenses");
        self.join_rows(expenses)
    }

    /// Attach category display data; each category is resolved once per call
    fn join_rows(&self, expenses: Vec<Expense>) -> SpendResult<Vec<ExpenseRow>> {
        let mut resolved: HashMap<CategoryId, Option<Category>> = HashMap::new();
        let mut dangling = 0usize;
        let mut rows = Vec::with_capacity(expenses.len());

        for expense in expenses {
            let category = match expense.category_id {
                Some(id) => {
                    if !resolved.contains_key(&id) {
                        resolved.insert(id, self.store.resolve(id)?);
                    }
                    let category = resolved.get(&id).and_then(|c| c.as_ref());
                    if category.is_none() {
                        dangling += 1;
                    }
                    category
                }
                None => None,
            };
            rows.push(ExpenseRow::new(expense, category));
        }

        if dangling > 0 {
            warn!(
                count = dangling,
                fallback = %self.engine.config().fallback.name,
                "Expenses reference missing categories"
            );
        }
        Ok(rows)
    }
}

fn fetch_result<T>(joined: thread::Result<SpendResult<T>>) -> SpendResult<T> {
    joined.map_err(|_| SpendError::Storage("Expense fetch panicked".into()))?
}
