//! Export module for spendtrack
//!
//! Serializes analytics results for machines and other tools:
//! - JSON: the camelCase wire shape, decimal amounts
//! - YAML: the same structure, human-readable
//! - CSV: flattened rows for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;

pub use self::csv::CsvExport;
pub use json::write_json;
pub use yaml::write_yaml;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Terminal tables
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}
