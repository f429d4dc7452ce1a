//! CSV import service
//!
//! Bulk-loads expenses for one user from a CSV file with the columns
//! `date,amount,category,description`. Columns are matched by header name,
//! falling back to that positional order. A bad row is recorded and skipped;
//! it never aborts the batch.

use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, Money, UserId};
use crate::storage::Storage;

/// Column positions in the CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    pub category_column: Option<usize>,
    pub description_column: Option<usize>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 1,
            category_column: Some(2),
            description_column: Some(3),
        }
    }
}

impl ColumnMapping {
    /// Detect column positions from a header record
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut mapping = Self::default();

        for (idx, header) in headers.iter().enumerate() {
            let h = header.trim().to_lowercase();
            if h.contains("date") {
                mapping.date_column = idx;
            } else if h.contains("amount") {
                mapping.amount_column = idx;
            } else if h.contains("category") {
                mapping.category_column = Some(idx);
            } else if h.contains("description") || h.contains("note") || h.contains("memo") {
                mapping.description_column = Some(idx);
            }
        }

        mapping
    }
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportResult {
    /// Rows stored as expenses
    pub imported: usize,
    /// Rows rejected
    pub skipped: usize,
    /// Imported rows whose category name matched nothing visible
    pub uncategorized: usize,
    /// (1-based data row number, message) for each rejected row
    pub errors: Vec<(usize, String)>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import a CSV file for a user
    pub fn import_file(&self, user_id: UserId, path: &Path) -> SpendResult<ImportResult> {
        let file = std::fs::File::open(path)
            .map_err(|e| SpendError::Import(format!("Cannot open {}: {}", path.display(), e)))?;
        self.import_csv(user_id, file)
    }

    /// Import CSV data from any reader
    pub fn import_csv<R: Read>(&self, user_id: UserId, reader: R) -> SpendResult<ImportResult> {
        if self.storage.users.get(user_id)?.is_none() {
            return Err(SpendError::user_not_found(user_id.to_string()));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| SpendError::Import(format!("Cannot read CSV header: {}", e)))?
            .clone();
        let mapping = ColumnMapping::from_headers(&headers);
        debug!(?mapping, "Detected CSV columns");

        let mut result = ImportResult::default();

        for (idx, record) in reader.records().enumerate() {
            let row_number = idx + 1;
            let parsed = record
                .map_err(|e| format!("Error reading CSV record: {}", e))
                .and_then(|record| self.parse_record(user_id, &record, &mapping));

            match parsed {
                Ok((expense, matched_category)) => {
                    if !matched_category {
                        result.uncategorized += 1;
                    }
                    self.storage.expenses.upsert(expense)?;
                    result.imported += 1;
                }
                Err(message) => {
                    warn!(row = row_number, %message, "Skipping CSV row");
                    result.skipped += 1;
                    result.errors.push((row_number, message));
                }
            }
        }

        if result.imported > 0 {
            self.storage.expenses.save()?;
        }

        info!(
            user = %user_id,
            imported = result.imported,
            skipped = result.skipped,
            uncategorized = result.uncategorized,
            "Import finished"
        );
        Ok(result)
    }

    /// Parse one record; the flag is false when a category name was given
    /// but did not match
    fn parse_record(
        &self,
        user_id: UserId,
        record: &StringRecord,
        mapping: &ColumnMapping,
    ) -> Result<(Expense, bool), String> {
        let date_str = record
            .get(mapping.date_column)
            .ok_or_else(|| "Missing date column".to_string())?;
        let date = parse_date(date_str)?;

        let amount_str = record.get(mapping.amount_column).unwrap_or("");
        let amount = if amount_str.is_empty() {
            None
        } else {
            Some(
                Money::parse(amount_str)
                    .map_err(|e| format!("Could not parse amount '{}': {}", amount_str, e))?,
            )
        };

        let description = mapping
            .description_column
            .and_then(|col| record.get(col))
            .unwrap_or("");

        let category_name = mapping
            .category_column
            .and_then(|col| record.get(col))
            .unwrap_or("");

        let mut expense = Expense::new(user_id, amount.unwrap_or_default(), date)
            .with_description(description);
        expense.amount = amount;

        let mut matched = true;
        if !category_name.is_empty() {
            match self
                .storage
                .categories
                .find_by_name(user_id, category_name)
                .map_err(|e| e.to_string())?
            {
                Some(category) => expense.category_id = Some(category.id),
                None => matched = false,
            }
        }

        expense.validate().map_err(|e| e.to_string())?;
        Ok((expense, matched))
    }
}

/// Accepts a full timestamp or a bare date (taken as midnight)
fn parse_date(s: &str) -> Result<NaiveDateTime, String> {
    let timestamp_formats = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in timestamp_formats {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(ts);
        }
    }

    let date_formats = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
    for format in date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date.and_time(chrono::NaiveTime::default()));
        }
    }

    Err(format!("Could not parse date: '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpendPaths;
    use crate::models::User;
    use crate::storage::{initialize_storage, DateRange};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, UserId) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let user = User::new("demo");
        let user_id = user.id;
        storage.users.upsert(user).unwrap();
        (temp_dir, storage, user_id)
    }

    #[test]
    fn test_import_rows() {
        let (_temp_dir, storage, user) = create_test_storage();
        let csv = "date,amount,category,description\n\
                   2025-01-10,25.50,Food,Lunch\n\
                   2025-01-11 08:30:00,12.00,transport,Bus\n\
                   2025-01-12,4.00,Golf,Range balls\n\
                   not-a-date,1.00,Food,Broken\n\
                   2025-01-13,-3.00,Food,Refund\n\
                   2025-01-14,,Food,No amount\n";

        let result = ImportService::new(&storage)
            .import_csv(user, csv.as_bytes())
            .unwrap();

        assert_eq!(result.imported, 4);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.uncategorized, 1);
        assert_eq!(result.errors[0].0, 4);
        assert_eq!(result.errors[1].0, 5);

        let expenses = storage.expenses.get_by_user(user, DateRange::default()).unwrap();
        assert_eq!(expenses.len(), 4);
        let no_amount = expenses.iter().find(|e| e.description == "No amount").unwrap();
        assert!(no_amount.amount.is_none());
        let golf = expenses.iter().find(|e| e.description == "Range balls").unwrap();
        assert!(golf.category_id.is_none());
        let bus = expenses.iter().find(|e| e.description == "Bus").unwrap();
        assert_eq!(bus.date.format("%H:%M").to_string(), "08:30");
        assert!(bus.category_id.is_some());
    }

    #[test]
    fn test_oversized_and_overprecise_amounts_are_skipped() {
        let (_temp_dir, storage, user) = create_test_storage();
        let csv = "date,amount,category,description\n\
                   2025-01-10,10.00,Food,Before\n\
                   2025-01-11,99999999999999999,Food,Huge\n\
                   2025-01-12,1.999,Food,Too precise\n\
                   2025-01-13,5.00,Food,After\n";

        let result = ImportService::new(&storage)
            .import_csv(user, csv.as_bytes())
            .unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.errors[0].0, 2);
        assert!(result.errors[0].1.contains("99999999999999999"));
        assert_eq!(result.errors[1].0, 3);

        let expenses = storage.expenses.get_by_user(user, DateRange::default()).unwrap();
        let total: i64 = expenses.iter().map(|e| e.amount_or_zero().cents()).sum();
        assert_eq!(total, 1500);
    }

    #[test]
    fn test_headers_in_any_order() {
        let (_temp_dir, storage, user) = create_test_storage();
        let csv = "Description,Category,Amount,Date\nCoffee,Food,3.20,2025-02-01\n";

        let result = ImportService::new(&storage)
            .import_csv(user, csv.as_bytes())
            .unwrap();
        assert_eq!(result.imported, 1);

        let expense = &storage.expenses.get_by_user(user, DateRange::default()).unwrap()[0];
        assert_eq!(expense.description, "Coffee");
        assert_eq!(expense.amount_or_zero().cents(), 320);
    }

    #[test]
    fn test_unknown_user_is_not_found() {
        let (_temp_dir, storage, _user) = create_test_storage();
        let err = ImportService::new(&storage)
            .import_csv(UserId::new(), "date,amount\n".as_bytes())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2025-03-04").is_ok());
        assert!(parse_date("2025-03-04T10:00:00").is_ok());
        assert!(parse_date("03/04/2025").is_ok());
        assert!(parse_date("yesterday").is_err());
    }
}
