//! In-memory table passed between pipeline stages

use crate::error::RecordSetError;
use serde_json::Value;

/// A single named column of scalar values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Value>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// An ordered table of named columns with aligned rows.
///
/// Invariants: column names are unique and every column holds the same
/// number of values. Rows are the implicit alignment across columns by
/// index. All construction paths enforce both invariants with typed
/// errors rather than panics.
///
/// # Example
/// ```
/// use ufo_aggregator::etl::RecordSet;
/// use serde_json::Value;
///
/// let mut records = RecordSet::with_columns(["City", "Shape"]).unwrap();
/// records
///     .push_row(vec![
///         Value::String("Duluth".into()),
///         Value::String("Disk".into()),
///     ])
///     .unwrap();
///
/// assert_eq!(records.row_count(), 1);
/// assert_eq!(records.column("Shape").unwrap()[0], Value::String("Disk".into()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<Column>,
}

impl RecordSet {
    /// Creates an empty record set with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty record set with the given column names.
    ///
    /// # Errors
    /// Fails if any name repeats.
    pub fn with_columns<I, S>(names: I) -> Result<Self, RecordSetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut records = Self::new();
        for name in names {
            records.add_column(name, Vec::new())?;
        }
        Ok(records)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Column names in table order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// The values of the named column, if present.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Appends a row of values, one per column in table order.
    ///
    /// # Errors
    /// Fails if the value count does not match the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), RecordSetError> {
        if row.len() != self.columns.len() {
            return Err(RecordSetError::RowArity {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.values.push(value);
        }
        Ok(())
    }

    /// Appends one key/value record as a row.
    ///
    /// The column set grows to the union of observed keys in first-seen
    /// order; cells a record does not mention are backfilled with null.
    /// A key repeated within one record keeps its last value.
    pub fn push_record<'a, I>(&mut self, record: I)
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let row_index = self.row_count();
        for (key, value) in record {
            let position = self.columns.iter().position(|c| c.name == key);
            let column = match position {
                Some(i) => &mut self.columns[i],
                None => {
                    self.columns.push(Column {
                        name: key.to_string(),
                        values: vec![Value::Null; row_index],
                    });
                    let last = self.columns.len() - 1;
                    &mut self.columns[last]
                }
            };
            if column.values.len() == row_index {
                column.values.push(value);
            } else if let Some(slot) = column.values.last_mut() {
                *slot = value;
            }
        }
        for column in &mut self.columns {
            if column.values.len() == row_index {
                column.values.push(Value::Null);
            }
        }
    }

    /// Appends a new column to the table.
    ///
    /// An empty table accepts a column of any length; afterwards new
    /// columns must match the existing row count.
    ///
    /// # Errors
    /// Fails on a duplicate name or a length mismatch.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        values: Vec<Value>,
    ) -> Result<(), RecordSetError> {
        let name = name.into();
        if self.columns.iter().any(|c| c.name == name) {
            return Err(RecordSetError::DuplicateColumn { name });
        }
        if !self.columns.is_empty() && values.len() != self.row_count() {
            return Err(RecordSetError::ColumnLength {
                name,
                expected: self.row_count(),
                found: values.len(),
            });
        }
        self.columns.push(Column { name, values });
        Ok(())
    }

    /// Removes and returns the named column.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let index = self.columns.iter().position(|c| c.name == name)?;
        Some(self.columns.remove(index))
    }

    /// Keeps only the rows for which the predicate returns true, given the
    /// row index. Every column is filtered with the same mask.
    pub fn retain_rows(&mut self, keep: impl Fn(usize) -> bool) {
        for column in &mut self.columns {
            let mut index = 0;
            column.values.retain(|_| {
                let kept = keep(index);
                index += 1;
                kept
            });
        }
    }

    /// A copy of the table narrowed and reordered to the named columns.
    ///
    /// # Errors
    /// Fails if any requested column is absent.
    pub fn select(&self, names: &[&str]) -> Result<RecordSet, RecordSetError> {
        let mut columns = Vec::with_capacity(names.len());
        for &name in names {
            let column = self
                .columns
                .iter()
                .find(|c| c.name == name)
                .ok_or_else(|| RecordSetError::UnknownColumn {
                    name: name.to_string(),
                })?;
            columns.push(column.clone());
        }
        Ok(RecordSet { columns })
    }

    /// Iterates rows as vectors of cell references in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Value>> {
        (0..self.row_count()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }
}
