//! Errors raised around the analytics engine
//!
//! The aggregation engine itself never fails: empty input, missing amounts,
//! unresolved categories and zero divisors all resolve locally. Errors only
//! originate at the edges (storage, configuration, import, export).

use thiserror::Error;

/// Failure of a spendtrack command or service call
#[derive(Error, Debug)]
pub enum SpendError {
    /// `config.json` unreadable, or no config directory on this platform
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failure outside the JSON stores
    #[error("I/O error: {0}")]
    Io(String),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected input: bad month, reversed range, negative amount, bad color
    #[error("Validation error: {0}")]
    Validation(String),

    /// A user or category lookup matched nothing
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A user or category name is already taken
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The CSV file could not be opened or its header read
    #[error("Import error: {0}")]
    Import(String),

    /// Writing JSON, YAML or CSV output failed
    #[error("Export error: {0}")]
    Export(String),

    /// The expense store could not produce data
    #[error("Storage error: {0}")]
    Storage(String),
}

impl SpendError {
    /// No user with this name or id
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// No visible category with this name or id
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the store failed to deliver data
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

impl From<std::io::Error> for SpendError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SpendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for SpendError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<csv::Error> for SpendError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

pub type SpendResult<T> = Result<T, SpendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_user_message() {
        let err = SpendError::user_not_found("alice");
        assert_eq!(err.to_string(), "User not found: alice");
        assert!(err.is_not_found());
        assert!(!err.is_storage());
    }

    #[test]
    fn test_unknown_category_message() {
        let err = SpendError::category_not_found("Gardening");
        assert_eq!(err.to_string(), "Category not found: Gardening");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reversed_range_is_validation() {
        let err = SpendError::Validation("Start 2025-05-01 is after end 2025-04-01".into());
        assert!(err.is_validation());
        assert!(err.to_string().starts_with("Validation error: "));
    }

    #[test]
    fn test_store_failure_is_storage() {
        let err = SpendError::Storage("Expense fetch panicked".into());
        assert_eq!(err.to_string(), "Storage error: Expense fetch panicked");
        assert!(err.is_storage());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_output_failures_map_to_export() {
        let yaml_err = serde_yaml::from_str::<u32>("not: [a number").unwrap_err();
        assert!(matches!(SpendError::from(yaml_err), SpendError::Export(_)));

        let csv_err: csv::Error =
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into();
        assert!(matches!(SpendError::from(csv_err), SpendError::Export(_)));
    }
}
