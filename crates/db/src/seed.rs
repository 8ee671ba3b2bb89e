//! Mock dataset loading.
//!
//! The bundled dataset stands in for the arrays each dashboard page used to
//! hard-code. A JSON file with the same shape can replace it.

use std::collections::HashSet;
use std::path::Path;

use reqtrack_core::{CoreError, Record};

use crate::error::RepoError;

/// Bundled mock records covering every record kind.
pub const SEED_RECORDS_JSON: &str = include_str!("../data/seed_records.json");

/// Load the bundled mock records.
pub fn load_seed() -> Result<Vec<Record>, RepoError> {
    load_from_str(SEED_RECORDS_JSON)
}

/// Parse a JSON array of records, rejecting duplicate ids.
pub fn load_from_str(json: &str) -> Result<Vec<Record>, RepoError> {
    let records: Vec<Record> = serde_json::from_str(json)?;
    ensure_unique_ids(&records)?;
    Ok(records)
}

/// Read and parse a JSON array of records from disk.
pub fn load_from_path(path: &Path) -> Result<Vec<Record>, RepoError> {
    let json = std::fs::read_to_string(path)?;
    let records = load_from_str(&json)?;
    tracing::debug!(path = %path.display(), count = records.len(), "Loaded records from file");
    Ok(records)
}

pub(crate) fn ensure_unique_ids(records: &[Record]) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id.as_str()) {
            return Err(CoreError::Conflict(format!(
                "Duplicate record id '{}'",
                record.id
            )));
        }
    }
    Ok(())
}
