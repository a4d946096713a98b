//! SQLite relational store

use super::cell_text;
use crate::error::LoadError;
use crate::etl::{Loader, RecordSet};
use async_trait::async_trait;
use rusqlite::Connection;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The fixed `sightings` table schema, in column order.
const TABLE_COLUMNS: [&str; 10] = [
    "Date", "Time", "City", "State", "Country", "Shape", "Duration", "Summary", "Posted", "Images",
];

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS sightings (
        Date TEXT,
        Time TEXT,
        City TEXT,
        State TEXT,
        Country TEXT,
        Shape TEXT,
        Duration TEXT,
        Summary TEXT,
        Posted TEXT,
        Images TEXT
    )
";

/// Write records to the `sightings` table of a SQLite database.
///
/// Every call ensures the table exists, then replaces its contents
/// wholesale with the given record set. Unlike the file loaders this is
/// an overwrite, not an append: a pipeline that loads several sources
/// through one `SqliteWriter` ends up with only the last source's rows.
/// The connection is opened and closed within each call.
pub struct SqliteWriter {
    path: PathBuf,
}

impl SqliteWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Replace the table contents with the given records.
    pub fn replace_all(&self, records: &RecordSet) -> Result<(), LoadError> {
        let resource = self.path.display().to_string();

        let mut conn = Connection::open(&self.path)
            .map_err(|e| LoadError::unwritable(&resource, e))?;
        conn.execute_batch(CREATE_TABLE)
            .map_err(|e| LoadError::unwritable(&resource, e))?;

        let columns: Vec<&[Value]> = TABLE_COLUMNS
            .iter()
            .map(|name| {
                records.column(name).ok_or_else(|| {
                    LoadError::unwritable(
                        &resource,
                        format!("records are missing column {:?}", name),
                    )
                })
            })
            .collect::<Result<_, _>>()?;

        let tx = conn
            .transaction()
            .map_err(|e| LoadError::unwritable(&resource, e))?;
        tx.execute("DELETE FROM sightings", [])
            .map_err(|e| LoadError::unwritable(&resource, e))?;
        {
            let mut insert = tx
                .prepare(
                    "INSERT INTO sightings
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )
                .map_err(|e| LoadError::unwritable(&resource, e))?;
            for index in 0..records.row_count() {
                let row: Vec<String> =
                    columns.iter().map(|values| cell_text(&values[index])).collect();
                insert
                    .execute(rusqlite::params_from_iter(row.iter()))
                    .map_err(|e| LoadError::unwritable(&resource, e))?;
            }
        }
        tx.commit().map_err(|e| LoadError::unwritable(&resource, e))
    }
}

#[async_trait]
impl Loader for SqliteWriter {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
        self.replace_all(records)
    }
}
