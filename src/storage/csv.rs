//! Delimited text file storage

use super::cell_text;
use crate::error::{ExtractError, LoadError};
use crate::etl::{Extractor, Loader, RecordSet};
use async_trait::async_trait;
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Read a CSV file into a record set, using the first row as column
/// headers.
pub struct CsvReader {
    path: PathBuf,
}

impl CsvReader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read all rows as string cells.
    pub fn read(&self) -> Result<RecordSet, ExtractError> {
        let resource = self.path.display().to_string();

        let file = File::open(&self.path)
            .map_err(|source| ExtractError::unreadable(&resource, source))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| ExtractError::malformed(&resource, e))?
            .clone();
        let mut records = RecordSet::with_columns(headers.iter().map(str::to_string))
            .map_err(|e| ExtractError::malformed(&resource, e))?;

        for row in reader.records() {
            let row = row.map_err(|e| ExtractError::malformed(&resource, e))?;
            records
                .push_row(
                    row.iter()
                        .map(|field| Value::String(field.to_string()))
                        .collect(),
                )
                .map_err(|e| ExtractError::malformed(&resource, e))?;
        }

        Ok(records)
    }
}

#[async_trait]
impl Extractor for CsvReader {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn extract(&self) -> Result<RecordSet, ExtractError> {
        self.read()
    }
}

/// Append records to a CSV file.
///
/// The header row is written only when the target file does not exist at
/// call time, so several sources can share one target without repeating
/// the header.
pub struct CsvWriter {
    path: PathBuf,
}

impl CsvWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append all rows, with the header when the file is new.
    pub fn append(&self, records: &RecordSet) -> Result<(), LoadError> {
        let resource = self.path.display().to_string();

        // checked at call time, not cached
        let write_header = !self.path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LoadError::unwritable(&resource, e))?;
        let mut writer = csv::Writer::from_writer(file);

        if write_header {
            writer
                .write_record(records.column_names())
                .map_err(|e| LoadError::unwritable(&resource, e))?;
        }
        for row in records.rows() {
            writer
                .write_record(row.into_iter().map(cell_text))
                .map_err(|e| LoadError::unwritable(&resource, e))?;
        }

        writer
            .flush()
            .map_err(|e| LoadError::unwritable(&resource, e))
    }
}

#[async_trait]
impl Loader for CsvWriter {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
        self.append(records)
    }
}
