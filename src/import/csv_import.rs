//! CSV Import
//!
//! Reads symptom logs exported as CSV. Columns can be mapped explicitly or
//! detected from the header row; timestamps are accepted in several common
//! formats.

use super::{ImportError, ImportResult};
use crate::analytics::{ObservationRecord, SymptomObservation};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::io;
use std::path::Path;

/// CSV importer with configurable column mapping
#[derive(Debug, Clone)]
pub struct CsvObservationImporter {
    /// Column index for timestamps (0-indexed)
    timestamp_column: usize,
    /// Column index for the symptom name
    symptom_column: usize,
    /// Column index for the severity rating
    severity_column: usize,
    /// Optional column holding context factors
    factors_column: Option<usize>,
    /// Separator between factors inside the factors column
    factor_separator: char,
    /// Preferred timestamp format, tried before the built-in ones
    timestamp_format: String,
    /// Whether the CSV has a header row
    has_header: bool,
}

/// Result of a CSV import operation
#[derive(Debug)]
pub struct CsvImportResult {
    pub observations: Vec<SymptomObservation>,
    pub rows_processed: usize,
    pub rows_failed: usize,
    pub errors: Vec<String>,
}

impl Default for CsvObservationImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvObservationImporter {
    /// Create an importer expecting `timestamp,symptom,severity,factors`
    pub fn new() -> Self {
        Self {
            timestamp_column: 0,
            symptom_column: 1,
            severity_column: 2,
            factors_column: Some(3),
            factor_separator: ';',
            timestamp_format: "%Y-%m-%d".to_string(),
            has_header: true,
        }
    }

    /// Build an importer whose columns are detected from the file's header
    pub fn from_headers(path: &Path) -> ImportResult<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let headers = reader.headers()?.clone();

        let mut importer = Self::new();
        importer.auto_detect_columns(&headers);
        Ok(importer)
    }

    pub fn with_timestamp_column(mut self, column: usize) -> Self {
        self.timestamp_column = column;
        self
    }

    pub fn with_symptom_column(mut self, column: usize) -> Self {
        self.symptom_column = column;
        self
    }

    pub fn with_severity_column(mut self, column: usize) -> Self {
        self.severity_column = column;
        self
    }

    /// Set the factors column, or `None` when the file has no tags
    pub fn with_factors_column(mut self, column: Option<usize>) -> Self {
        self.factors_column = column;
        self
    }

    pub fn with_factor_separator(mut self, separator: char) -> Self {
        self.factor_separator = separator;
        self
    }

    /// Set the timestamp format string
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// Set whether the CSV has a header row
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    /// Auto-detect column mapping from header row
    ///
    /// Columns that match nothing keep their current mapping. A header with
    /// no factors column clears the factors mapping.
    pub fn auto_detect_columns(&mut self, headers: &csv::StringRecord) {
        let mut factors_column = None;

        for (idx, header) in headers.iter().enumerate() {
            let header_lower = header.trim().to_lowercase();

            if header_lower.contains("date")
                || header_lower.contains("time")
                || header_lower.contains("observed")
            {
                self.timestamp_column = idx;
            } else if header_lower.contains("symptom") || header_lower == "name" {
                self.symptom_column = idx;
            } else if header_lower.contains("severity") || header_lower == "rating" {
                self.severity_column = idx;
            } else if header_lower.contains("factor")
                || header_lower.contains("context")
                || header_lower.contains("tag")
                || header_lower.contains("trigger")
            {
                factors_column = Some(idx);
            }
        }

        self.factors_column = factors_column;
    }

    /// Parse a timestamp string using the configured format
    fn parse_timestamp(&self, ts_str: &str) -> ImportResult<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(ts_str) {
            return Ok(dt.with_timezone(&Utc));
        }

        let formats = [
            self.timestamp_format.as_str(),
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%d",
            "%m/%d/%Y",
            "%Y/%m/%d",
        ];

        for fmt in formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(ts_str, fmt) {
                return Ok(dt.and_utc());
            }
            // Date-only values are placed at midday
            if let Ok(date) = NaiveDate::parse_from_str(ts_str, fmt) {
                if let Some(noon) = NaiveTime::from_hms_opt(12, 0, 0) {
                    return Ok(date.and_time(noon).and_utc());
                }
            }
        }

        Err(ImportError::Parse(format!(
            "Could not parse timestamp: {}",
            ts_str
        )))
    }

    /// Turn one CSV row into a validated observation
    fn parse_row(&self, record: &csv::StringRecord) -> ImportResult<SymptomObservation> {
        let observed_at = self.parse_timestamp(field(record, self.timestamp_column, "timestamp")?)?;
        let symptom_name = field(record, self.symptom_column, "symptom")?.to_string();

        let severity_str = field(record, self.severity_column, "severity")?;
        let severity: f64 = severity_str
            .parse()
            .map_err(|_| ImportError::Parse(format!("invalid severity: {}", severity_str)))?;

        let context_factors = self
            .factors_column
            .and_then(|column| record.get(column))
            .map(|raw| {
                raw.split(self.factor_separator)
                    .map(|f| f.trim().to_string())
                    .filter(|f| !f.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|factors| !factors.is_empty());

        let record = ObservationRecord {
            symptom_name,
            severity,
            observed_at,
            context_factors,
        };

        SymptomObservation::try_from(record).map_err(|e| ImportError::Parse(e.to_string()))
    }

    /// Import observations from a CSV file
    pub fn import(&self, path: &Path) -> ImportResult<CsvImportResult> {
        let file = std::fs::File::open(path)?;
        self.import_reader(file)
    }

    /// Import from a CSV string (useful for testing)
    pub fn import_str(&self, csv_data: &str) -> ImportResult<CsvImportResult> {
        self.import_reader(csv_data.as_bytes())
    }

    /// Import from any reader, collecting per-row errors with line numbers
    pub fn import_reader<R: io::Read>(&self, source: R) -> ImportResult<CsvImportResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_header)
            .flexible(true)
            .from_reader(source);

        let mut observations = Vec::new();
        let mut rows_processed = 0;
        let mut rows_failed = 0;
        let mut errors = Vec::new();

        for (line_num, result) in reader.records().enumerate() {
            let actual_line = if self.has_header {
                line_num + 2
            } else {
                line_num + 1
            };

            let parsed = result
                .map_err(ImportError::from)
                .and_then(|record| self.parse_row(&record));

            match parsed {
                Ok(observation) => {
                    observations.push(observation);
                    rows_processed += 1;
                }
                Err(e) => {
                    errors.push(format!("Line {}: {}", actual_line, e));
                    rows_failed += 1;
                }
            }
        }

        // Truncate errors if too many
        if errors.len() > 100 {
            let total = errors.len();
            errors.truncate(100);
            errors.push(format!("... and {} more errors", total - 100));
        }

        Ok(CsvImportResult {
            observations,
            rows_processed,
            rows_failed,
            errors,
        })
    }
}

/// Trimmed value of a required column
fn field<'r>(record: &'r csv::StringRecord, column: usize, name: &str) -> ImportResult<&'r str> {
    record
        .get(column)
        .map(str::trim)
        .ok_or_else(|| ImportError::Parse(format!("missing {} column", name)))
}
