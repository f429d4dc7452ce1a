//! User settings for spendtrack
//!
//! Besides display preferences, settings carry the analytics engine's
//! constants: the fallback category used for unresolved expenses and the
//! sample/top-N sizes. Every field has a serde default so older config files
//! keep loading.

use serde::{Deserialize, Serialize};

use super::paths::SpendPaths;
use crate::error::SpendError;

/// Placeholder bucket for expenses whose category cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackCategory {
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl Default for FallbackCategory {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            color: "#3B82F6".to_string(),
            icon: "📝".to_string(),
        }
    }
}

/// User settings for spendtrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime pattern for expense timestamps in terminal tables
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Bucket used when an expense's category is missing
    #[serde(default)]
    pub fallback_category: FallbackCategory,

    /// How many of the most recent expenses a period summary carries
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// How many categories the dashboard ranks
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// How many recent expenses the dashboard lists
    #[serde(default = "default_recent_expenses")]
    pub recent_expenses: usize,

    /// Default number of months in a trend
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    /// User name or id to report on when `--user` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_sample_size() -> usize {
    10
}

fn default_top_categories() -> usize {
    5
}

fn default_recent_expenses() -> usize {
    5
}

fn default_trend_months() -> u32 {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            fallback_category: FallbackCategory::default(),
            sample_size: default_sample_size(),
            top_categories: default_top_categories(),
            recent_expenses: default_recent_expenses(),
            trend_months: default_trend_months(),
            default_user: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SpendPaths) -> Result<Self, SpendError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - `init` decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SpendError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| SpendError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SpendPaths) -> Result<(), SpendError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SpendError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SpendError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
