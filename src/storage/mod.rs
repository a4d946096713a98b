//! File and database storage adapters
//!
//! Each adapter binds one on-disk format to the ETL traits:
//! - CSV and XLSX files implement both reading and writing
//! - NDJSON files implement both reading and writing
//! - SQLite implements writing only

mod csv;
mod ndjson;
mod sqlite;
mod xlsx;

pub use csv::{CsvReader, CsvWriter};
pub use ndjson::{NdjsonReader, NdjsonWriter};
pub use sqlite::SqliteWriter;
pub use xlsx::{XlsxReader, XlsxWriter};

use serde_json::Value;

/// Render a scalar cell as plain text for column-oriented sinks.
pub(crate) fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
