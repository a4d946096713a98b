//! NDJSON (Newline Delimited JSON) file storage

use crate::error::{ExtractError, LoadError};
use crate::etl::{Extractor, Loader, RecordSet};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Columns whose values are rendered as ISO-8601 dates on output.
const DATE_COLUMNS: [&str; 2] = ["Date", "Posted"];

/// Read an NDJSON file into a record set, one JSON object per line.
///
/// The column set is the union of observed keys in first-seen order.
pub struct NdjsonReader {
    path: PathBuf,
}

impl NdjsonReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all lines as records.
    pub fn read(&self) -> Result<RecordSet, ExtractError> {
        let resource = self.path.display().to_string();

        let content = std::fs::read_to_string(&self.path)
            .map_err(|source| ExtractError::unreadable(&resource, source))?;

        let mut records = RecordSet::new();
        for line in content.lines().filter(|line| !line.trim().is_empty()) {
            let value: Value = serde_json::from_str(line)
                .map_err(|e| ExtractError::malformed(&resource, e))?;
            let object = value.as_object().ok_or_else(|| {
                ExtractError::malformed(&resource, "line is not a JSON object")
            })?;
            records.push_record(object.iter().map(|(key, value)| (key.as_str(), value.clone())));
        }

        Ok(records)
    }
}

#[async_trait]
impl Extractor for NdjsonReader {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn extract(&self) -> Result<RecordSet, ExtractError> {
        self.read()
    }
}

/// Append records to an NDJSON file, one JSON object per row per line.
///
/// Objects keep the record set's column order. Values in date columns are
/// re-rendered as ISO-8601 when they parse as month/day/year; anything
/// else passes through verbatim.
pub struct NdjsonWriter {
    path: PathBuf,
}

impl NdjsonWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append all rows.
    pub fn append(&self, records: &RecordSet) -> Result<(), LoadError> {
        let resource = self.path.display().to_string();

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LoadError::unwritable(&resource, e))?;

        for row in records.rows() {
            let mut object = serde_json::Map::new();
            for (name, value) in records.column_names().zip(row) {
                object.insert(name.to_string(), render_cell(name, value));
            }
            let line = serde_json::to_string(&object)
                .map_err(|e| LoadError::unwritable(&resource, e))?;
            writeln!(file, "{}", line).map_err(|e| LoadError::unwritable(&resource, e))?;
        }

        Ok(())
    }
}

fn render_cell(column: &str, value: &Value) -> Value {
    match value {
        Value::String(raw) if DATE_COLUMNS.contains(&column) => iso_date(raw)
            .map(Value::String)
            .unwrap_or_else(|| value.clone()),
        other => other.clone(),
    }
}

/// Parse a month/day/year date, with two- or four-digit years, into
/// `YYYY-MM-DD`.
fn iso_date(raw: &str) -> Option<String> {
    for format in ["%m/%d/%Y", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw.trim(), format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }
    None
}

#[async_trait]
impl Loader for NdjsonWriter {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
        self.append(records)
    }
}
