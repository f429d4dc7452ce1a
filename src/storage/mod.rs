//! Storage layer for spendtrack
//!
//! JSON file repositories with atomic writes. `Storage` is also the default
//! implementation of the two read seams the analytics service depends on:
//! [`ExpenseStore`] and [`CategoryResolver`].

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;
pub mod users;

pub use categories::CategoryRepository;
pub use expenses::{DateRange, ExpenseRepository};
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use users::UserRepository;

use crate::config::paths::SpendPaths;
use crate::error::{SpendError, SpendResult};
use crate::models::{Category, CategoryId, Expense, UserId};

pub(crate) fn lock_err<E: std::fmt::Display>(err: E) -> SpendError {
    SpendError::Storage(format!("Failed to acquire lock: {}", err))
}

/// Read access to a user's expenses
///
/// Implementations return rows newest first. Retries and timeouts, if any,
/// belong to the implementation; callers surface failures as-is.
pub trait ExpenseStore: Sync {
    /// A user's expenses, optionally restricted to a date window
    fn expenses_for_user(&self, user_id: UserId, range: DateRange) -> SpendResult<Vec<Expense>>;

    /// The `limit` most recent expenses of a user
    fn recent_for_user(&self, user_id: UserId, limit: usize) -> SpendResult<Vec<Expense>>;
}

/// Looks up category display data by id
pub trait CategoryResolver: Sync {
    /// `Ok(None)` when the category no longer exists
    fn resolve(&self, id: CategoryId) -> SpendResult<Option<Category>>;
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SpendPaths,
    pub expenses: ExpenseRepository,
    pub categories: CategoryRepository,
    pub users: UserRepository,
}

impl Storage {
    /// Create a new Storage instance, creating directories as needed
    pub fn new(paths: SpendPaths) -> Result<Self, SpendError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            categories: CategoryRepository::new(paths.categories_file()),
            users: UserRepository::new(paths.users_file()),
            paths,
        })
    }

    pub fn paths(&self) -> &SpendPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SpendError> {
        self.expenses.load()?;
        self.categories.load()?;
        self.users.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SpendError> {
        self.expenses.save()?;
        self.categories.save()?;
        self.users.save()?;
        Ok(())
    }
}

impl ExpenseStore for Storage {
    fn expenses_for_user(&self, user_id: UserId, range: DateRange) -> SpendResult<Vec<Expense>> {
        self.expenses.get_by_user(user_id, range)
    }

    fn recent_for_user(&self, user_id: UserId, limit: usize) -> SpendResult<Vec<Expense>> {
        self.expenses.recent_for_user(user_id, limit)
    }
}

impl CategoryResolver for Storage {
    fn resolve(&self, id: CategoryId) -> SpendResult<Option<Category>> {
        self.categories.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.paths().is_initialized());
    }

    #[test]
    fn test_store_traits_delegate_to_repositories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let user = UserId::new();
        let category = Category::global("Food", "#EF4444", "🍕");
        let date = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        storage.categories.upsert(category.clone()).unwrap();
        storage
            .expenses
            .upsert(Expense::new(user, Money::from_cents(500), date).with_category(category.id))
            .unwrap();
        storage.save_all().unwrap();

        let rows = storage.expenses_for_user(user, DateRange::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(storage.recent_for_user(user, 0).unwrap().len(), 0);
        assert_eq!(storage.resolve(category.id).unwrap().unwrap().name, "Food");
        assert!(storage.resolve(CategoryId::new()).unwrap().is_none());
    }
}
