//! JSON file helpers
//!
//! Reads tolerate a missing file (first run); writes go to a sibling temp file
//! and are renamed into place so a crash never leaves a half-written store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SpendError;

fn storage_err(action: &str, path: &Path, err: impl std::fmt::Display) -> SpendError {
    SpendError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from a file, returning `T::default()` if the file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, SpendError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Write JSON atomically (temp file + rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SpendError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Ledger {
        owner: String,
        totals: Vec<i64>,
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let data: Ledger = read_json(temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(data, Ledger::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ledger.json");
        let data = Ledger {
            owner: "demo".into(),
            totals: vec![2550, 1200],
        };

        write_json_atomic(&path, &data).unwrap();

        assert!(!temp_dir.path().join("nested").join("ledger.json.tmp").exists());
        let loaded: Ledger = read_json(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "[[[").unwrap();

        let err = read_json::<Ledger, _>(&path).unwrap_err();
        assert!(err.is_storage());
    }
}
