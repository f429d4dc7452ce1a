//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json and answers the
//! per-user, date-windowed reads the analytics service issues.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::SpendError;
use crate::models::{Expense, ExpenseId, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_err;

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Optional inclusive bounds on an expense's date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    /// `[start, end]`, both inclusive
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Everything on or after `start`
    pub fn since(start: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Newest first; ties broken by creation time, then id, so reads are stable
fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.created_at.cmp(&a.created_at))
            .then(a.id.cmp(&b.id))
    });
}

/// Repository for expense persistence with a per-user index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
    by_user: RwLock<HashMap<UserId, Vec<ExpenseId>>>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_user: RwLock::new(HashMap::new()),
        }
    }

    /// Load expenses from disk and rebuild the user index
    pub fn load(&self) -> Result<(), SpendError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_user = self.by_user.write().map_err(lock_err)?;

        data.clear();
        by_user.clear();

        for expense in file_data.expenses {
            by_user.entry(expense.user_id).or_default().push(expense.id);
            data.insert(expense.id, expense);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), SpendError> {
        let data = self.data.read().map_err(lock_err)?;

        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, SpendError> {
        let data = self.data.read().map_err(lock_err)?;
        Ok(data.get(&id).cloned())
    }

    pub fn count(&self) -> Result<usize, SpendError> {
        Ok(self.data.read().map_err(lock_err)?.len())
    }

    /// A user's expenses inside an optional date window, newest first
    pub fn get_by_user(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> Result<Vec<Expense>, SpendError> {
        let data = self.data.read().map_err(lock_err)?;
        let by_user = self.by_user.read().map_err(lock_err)?;

        let ids = by_user.get(&user_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut expenses: Vec<_> = ids
            .iter()
            .filter_map(|id| data.get(id))
            .filter(|e| range.contains(e.date))
            .cloned()
            .collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// The `limit` most recent expenses of a user
    pub fn recent_for_user(&self, user_id: UserId, limit: usize) -> Result<Vec<Expense>, SpendError> {
        let mut expenses = self.get_by_user(user_id, DateRange::default())?;
        expenses.truncate(limit);
        Ok(expenses)
    }

    /// Insert or replace an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), SpendError> {
        let mut data = self.data.write().map_err(lock_err)?;
        let mut by_user = self.by_user.write().map_err(lock_err)?;

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_user.get_mut(&old.user_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_user.entry(expense.user_id).or_default().push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }
}
