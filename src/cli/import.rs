//! CLI command handler for CSV import
//!
//! Bulk-loads expenses for a user. Columns are detected from the header
//! row; category names are matched against the categories the user sees.

use std::path::Path;

use crate::error::{SpendError, SpendResult};
use crate::models::User;
use crate::services::ImportService;
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(storage: &Storage, user: &User, file: &Path) -> SpendResult<()> {
    if !file.exists() {
        return Err(SpendError::Import(format!(
            "File not found: {}",
            file.display()
        )));
    }

    let result = ImportService::new(storage).import_file(user.id, file)?;

    println!("Import complete for '{}'", user.name);
    println!("  Imported:       {}", result.imported);
    println!("  Uncategorized:  {}", result.uncategorized);
    println!("  Skipped:        {}", result.skipped);
    for (row, msg) in &result.errors {
        println!("    Row {}: {}", row, msg);
    }

    Ok(())
}
