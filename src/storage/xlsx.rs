//! Spreadsheet workbook storage

use super::cell_text;
use crate::error::{ExtractError, LoadError};
use crate::etl::{Extractor, Loader, RecordSet};
use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx, open_workbook};
use serde_json::Value;
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Read the first sheet of an XLSX workbook into a record set, using the
/// first row as column headers.
///
/// Spreadsheet readers coerce date-like cells to numbers, so designated
/// columns are forced back to text.
pub struct XlsxReader {
    path: PathBuf,
    text_columns: Vec<String>,
}

impl XlsxReader {
    /// Reader that forces the `Date` column to text.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_text_columns(path, &["Date"])
    }

    /// Reader that forces the named columns to text.
    pub fn with_text_columns(path: impl AsRef<Path>, text_columns: &[&str]) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            text_columns: text_columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Read the first sheet.
    pub fn read(&self) -> Result<RecordSet, ExtractError> {
        let resource = self.path.display().to_string();

        let mut workbook: Xlsx<_> = open_workbook(&self.path)
            .map_err(|e| ExtractError::malformed(&resource, e))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ExtractError::malformed(&resource, "workbook has no sheets"))?
            .map_err(|e| ExtractError::malformed(&resource, e))?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| ExtractError::malformed(&resource, "first sheet is empty"))?
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = RecordSet::with_columns(headers.clone())
            .map_err(|e| ExtractError::malformed(&resource, e))?;
        for row in rows {
            let values = headers
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| self.cell_value(name, cell))
                .collect();
            records
                .push_row(values)
                .map_err(|e| ExtractError::malformed(&resource, e))?;
        }

        Ok(records)
    }

    fn cell_value(&self, column: &str, cell: &Data) -> Value {
        let force_text = self.text_columns.iter().any(|c| c == column);
        match cell {
            Data::Empty => Value::Null,
            Data::String(s) => Value::String(s.clone()),
            Data::Int(i) if force_text => Value::String(i.to_string()),
            Data::Int(i) => Value::from(*i),
            Data::Float(f) if force_text => Value::String(format_number(*f)),
            Data::Float(f) => Value::from(*f),
            other => Value::String(other.to_string()),
        }
    }
}

/// Render a float the way a spreadsheet displays it: integral values
/// without the trailing `.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

#[async_trait]
impl Extractor for XlsxReader {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn extract(&self) -> Result<RecordSet, ExtractError> {
        self.read()
    }
}

/// Append records to an XLSX workbook.
///
/// An existing workbook is opened in place and new rows start immediately
/// after the last populated row of the first sheet, without a header. A
/// missing workbook is created with a header row.
pub struct XlsxWriter {
    path: PathBuf,
}

impl XlsxWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append all rows, creating the workbook when absent.
    pub fn append(&self, records: &RecordSet) -> Result<(), LoadError> {
        let resource = self.path.display().to_string();

        let mut book: Spreadsheet;
        if self.path.exists() {
            book = umya_spreadsheet::reader::xlsx::read(&self.path)
                .map_err(|e| LoadError::unwritable(&resource, e))?;
            let sheet = first_sheet(&mut book, &resource)?;
            let start_row = sheet.get_highest_row() + 1;
            write_rows(sheet, records, start_row);
        } else {
            book = umya_spreadsheet::new_file();
            let sheet = first_sheet(&mut book, &resource)?;
            for (index, name) in records.column_names().enumerate() {
                sheet
                    .get_cell_mut(((index + 1) as u32, 1u32))
                    .set_value(name);
            }
            write_rows(sheet, records, 2);
        }

        umya_spreadsheet::writer::xlsx::write(&book, &self.path)
            .map_err(|e| LoadError::unwritable(&resource, e))
    }
}

fn first_sheet<'a>(
    book: &'a mut Spreadsheet,
    resource: &str,
) -> Result<&'a mut Worksheet, LoadError> {
    book.get_sheet_mut(&0)
        .ok_or_else(|| LoadError::unwritable(resource, "workbook has no sheets"))
}

fn write_rows(sheet: &mut Worksheet, records: &RecordSet, start_row: u32) {
    for (row_offset, row) in records.rows().enumerate() {
        for (col_offset, value) in row.into_iter().enumerate() {
            sheet
                .get_cell_mut(((col_offset + 1) as u32, start_row + row_offset as u32))
                .set_value(cell_text(value));
        }
    }
}

#[async_trait]
impl Loader for XlsxWriter {
    fn resource_name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
        self.append(records)
    }
}
