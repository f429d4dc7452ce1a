//! Path management for spendtrack
//!
//! ## Path Resolution Order
//!
//! 1. `SPENDTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories::ProjectDirs`
//!    (`~/.config/spendtrack` on Linux, `~/Library/Application Support/...`
//!    on macOS, `%APPDATA%\...` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::SpendError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "SPENDTRACK_DATA_DIR";

/// Manages all paths used by spendtrack
#[derive(Debug, Clone)]
pub struct SpendPaths {
    base_dir: PathBuf,
}

impl SpendPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform has no home
    /// directory to derive a config location from.
    pub fn new() -> Result<Self, SpendError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "spendtrack")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    SpendError::Config("Could not determine a configuration directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    pub fn categories_file(&self) -> PathBuf {
        self.data_dir().join("categories.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SpendError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SpendError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SpendError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if `init` has been run (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
