//! Transformer trait for per-source record cleaning

use super::RecordSet;
use crate::error::TransformError;

/// Transformer trait for putting extracted records into target shape
///
/// Implementors define source-specific cleaning:
/// - Splitting or renaming columns
/// - Dropping rows that fall outside the data set's scope
/// - Narrowing to a canonical column order
pub trait Transformer: Send + Sync {
    /// Transform the extracted record set.
    ///
    /// # Errors
    /// Fails if the records do not have the structure the transform
    /// expects (for example a missing column). Structural mismatches are
    /// surfaced, never skipped, because loaders assume the transformed
    /// shape.
    fn transform(&self, records: RecordSet) -> Result<RecordSet, TransformError>;
}

/// Identity transformer that passes records through unchanged
///
/// The default for sources whose data is already in target shape.
#[derive(Debug, Default)]
pub struct IdentityTransform;

impl Transformer for IdentityTransform {
    fn transform(&self, records: RecordSet) -> Result<RecordSet, TransformError> {
        Ok(records)
    }
}
