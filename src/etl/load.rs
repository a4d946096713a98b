//! Loader trait for writing records to a destination

use super::RecordSet;
use crate::error::LoadError;
use async_trait::async_trait;

/// Loader trait for appending a record set to one output resource
///
/// Implementors define how to write tabular data to destinations like:
/// - Delimited text files
/// - Spreadsheet workbooks
/// - Relational stores
///
/// A pipeline may bind several sources to one loader, so `load` must be
/// safely callable multiple times against the same target.
///
/// # Example
/// ```no_run
/// use ufo_aggregator::etl::{Loader, RecordSet};
/// use ufo_aggregator::error::LoadError;
/// use async_trait::async_trait;
/// use std::path::PathBuf;
///
/// struct FileLoader {
///     path: PathBuf,
/// }
///
/// #[async_trait]
/// impl Loader for FileLoader {
///     fn resource_name(&self) -> String {
///         self.path.display().to_string()
///     }
///
///     async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
///         // Append the rows to the file
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Loader: Send + Sync {
    /// Stable identifier of the target resource, used in logs and error
    /// messages so operators can tell which destination failed.
    fn resource_name(&self) -> String;

    /// Append the record set to the destination.
    ///
    /// Any file or connection handle is acquired and released within the
    /// call, on every exit path.
    ///
    /// # Errors
    /// Fails when the target is unwritable (permissions, disk full,
    /// invalid connection).
    async fn load(&self, records: &RecordSet) -> Result<(), LoadError>;
}
