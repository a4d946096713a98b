//! Extractor trait for reading tabular records from a source

use super::RecordSet;
use crate::error::ExtractError;
use async_trait::async_trait;

/// Extractor trait for pulling a record set out of one input resource
///
/// Implementors define how to read tabular data from sources like:
/// - Delimited text files
/// - Spreadsheet workbooks
/// - Scraped web pages
///
/// # Example
/// ```no_run
/// use ufo_aggregator::etl::{Extractor, RecordSet};
/// use ufo_aggregator::error::ExtractError;
/// use async_trait::async_trait;
/// use std::path::PathBuf;
///
/// struct FileExtractor {
///     path: PathBuf,
/// }
///
/// #[async_trait]
/// impl Extractor for FileExtractor {
///     fn resource_name(&self) -> String {
///         self.path.display().to_string()
///     }
///
///     async fn extract(&self) -> Result<RecordSet, ExtractError> {
///         // Read the file and return its rows
///         Ok(RecordSet::new())
///     }
/// }
/// ```
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Stable identifier of the underlying resource, used in logs and
    /// error messages so operators can tell which source failed.
    fn resource_name(&self) -> String;

    /// Read the full record set from the source.
    ///
    /// # Errors
    /// Fails when the resource is unreadable or malformed. No partial
    /// results are returned on failure.
    async fn extract(&self) -> Result<RecordSet, ExtractError>;
}
