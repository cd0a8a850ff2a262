//! Observation Import
//!
//! Boundary layer that turns exported daily logs into validated
//! [`SymptomObservation`] values:
//! - CSV (column auto-detection, several timestamp formats)
//! - JSON (an array of records, or `{ "observations": [...] }`)
//!
//! Malformed records are rejected here so the analytics only ever see
//! well-formed observations.

mod csv_import;

pub use csv_import::{CsvImportResult, CsvObservationImporter};

use crate::analytics::{ObservationError, ObservationRecord, SymptomObservation};
use serde::Deserialize;
use std::path::Path;

/// Errors that can occur while loading observations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported file format: {0} (expected .csv or .json)")]
    UnsupportedFormat(String),

    #[error("Invalid observation at index {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: ObservationError,
    },
}

/// Result type alias for import operations
pub type ImportResult<T> = Result<T, ImportError>;

/// Accepted JSON layouts
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonLog {
    List(Vec<ObservationRecord>),
    Wrapped { observations: Vec<ObservationRecord> },
}

/// Validate raw records, failing on the first bad one
pub fn validate_records(records: Vec<ObservationRecord>) -> ImportResult<Vec<SymptomObservation>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            SymptomObservation::try_from(record)
                .map_err(|source| ImportError::InvalidRecord { index, source })
        })
        .collect()
}

/// Parse observations from a JSON string
pub fn parse_json(data: &str) -> ImportResult<Vec<SymptomObservation>> {
    let records = match serde_json::from_str::<JsonLog>(data)? {
        JsonLog::List(records) => records,
        JsonLog::Wrapped { observations } => observations,
    };
    validate_records(records)
}

/// Load observations from a `.csv` or `.json` file
///
/// CSV rows that fail to parse are skipped and logged; JSON is all or
/// nothing.
pub fn load_observations(path: &Path) -> ImportResult<Vec<SymptomObservation>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            let data = std::fs::read_to_string(path)?;
            let observations = parse_json(&data)?;
            tracing::debug!(path = ?path, count = observations.len(), "Loaded JSON observations");
            Ok(observations)
        }
        "csv" => {
            let result = CsvObservationImporter::from_headers(path)?.import(path)?;
            if result.rows_failed > 0 {
                tracing::warn!(
                    path = ?path,
                    rows_failed = result.rows_failed,
                    "Skipped invalid CSV rows"
                );
                for error in result.errors.iter().take(10) {
                    tracing::debug!("{}", error);
                }
            }
            Ok(result.observations)
        }
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}
