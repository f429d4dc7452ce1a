//! Storage initialization
//!
//! Handles first-run setup: directories plus the global default categories.

use crate::config::paths::SpendPaths;
use crate::error::SpendError;
use crate::models::DefaultCategory;

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing category data is left untouched, so running `init` twice is safe.
pub fn initialize_storage(paths: &SpendPaths) -> Result<(), SpendError> {
    paths.ensure_directories()?;

    if !paths.categories_file().exists() {
        let categories = DefaultCategory::all()
            .iter()
            .map(DefaultCategory::to_category)
            .collect();
        write_json_atomic(paths.categories_file(), &CategoryData { categories })?;
        tracing::info!(count = DefaultCategory::all().len(), "seeded default categories");
    }

    Ok(())
}
