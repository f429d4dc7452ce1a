//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analytics;
pub mod category;
pub mod import;
pub mod user;

use std::io::{self, Write};

use serde::Serialize;

use crate::config::Settings;
use crate::error::{SpendError, SpendResult};
use crate::export::{write_json, write_yaml, CsvExport, OutputFormat};
use crate::models::User;
use crate::services::UserService;
use crate::storage::Storage;

pub use analytics::{handle_analytics_command, AnalyticsCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use import::handle_import_command;
pub use user::{handle_user_command, UserCommands};

/// Resolve the user a command acts for: `--user`, then `default_user`
pub fn resolve_user(
    storage: &Storage,
    settings: &Settings,
    requested: Option<&str>,
) -> SpendResult<User> {
    let identifier = requested
        .or(settings.default_user.as_deref())
        .ok_or_else(|| {
            SpendError::Validation(
                "No user selected. Pass --user or set SPENDTRACK_USER".to_string(),
            )
        })?;

    UserService::new(storage).require(identifier)
}

/// Print an analytics result in the requested format
///
/// `table` is only rendered for [`OutputFormat::Table`].
pub(crate) fn emit<T, F>(value: &T, format: OutputFormat, table: F) -> SpendResult<()>
where
    T: Serialize + CsvExport + ?Sized,
    F: FnOnce() -> String,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Table => out.write_all(table().as_bytes())?,
        OutputFormat::Json => write_json(&mut out, value)?,
        OutputFormat::Yaml => write_yaml(&mut out, value)?,
        OutputFormat::Csv => value.write_csv(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// Print a plain listing; CSV is not offered for these
pub(crate) fn emit_listing<T, F>(value: &T, format: OutputFormat, table: F) -> SpendResult<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Table => out.write_all(table().as_bytes())?,
        OutputFormat::Json => write_json(&mut out, value)?,
        OutputFormat::Yaml => write_yaml(&mut out, value)?,
        OutputFormat::Csv => {
            return Err(SpendError::Validation(
                "CSV output is only available for analytics".to_string(),
            ))
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpendPaths;
    use crate::storage::initialize_storage;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SpendPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_resolve_user_prefers_flag() {
        let (_temp_dir, storage) = create_test_storage();
        let service = UserService::new(&storage);
        service.create("alice", None).unwrap();
        service.create("bob", None).unwrap();

        let settings = Settings {
            default_user: Some("bob".to_string()),
            ..Settings::default()
        };

        let user = resolve_user(&storage, &settings, Some("alice")).unwrap();
        assert_eq!(user.name, "alice");

        let user = resolve_user(&storage, &settings, None).unwrap();
        assert_eq!(user.name, "bob");
    }

    #[test]
    fn test_resolve_user_errors() {
        let (_temp_dir, storage) = create_test_storage();
        let settings = Settings::default();

        let err = resolve_user(&storage, &settings, None).unwrap_err();
        assert!(err.is_validation());

        let err = resolve_user(&storage, &settings, Some("ghost")).unwrap_err();
        assert!(err.is_not_found());
    }
}
