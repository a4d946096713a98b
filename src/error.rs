//! Error taxonomy for the aggregation pipeline
//!
//! Each pipeline stage fails with its own error type so callers can tell
//! which side of a data source went wrong. All of them carry the name of
//! the originating resource where one exists.

use std::fmt;
use thiserror::Error;

/// Errors raised while reading records out of a source.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The underlying resource could not be opened or read at all.
    #[error("failed to read {resource}: {source}")]
    Unreadable {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource was readable but its contents are not a usable table.
    #[error("malformed data in {resource}: {message}")]
    Malformed { resource: String, message: String },
}

impl ExtractError {
    /// Creates an Unreadable error from an underlying I/O error.
    pub fn unreadable(resource: impl Into<String>, source: std::io::Error) -> Self {
        ExtractError::Unreadable {
            resource: resource.into(),
            source,
        }
    }

    /// Creates a Malformed error from any displayable parse failure.
    pub fn malformed(resource: impl Into<String>, message: impl fmt::Display) -> Self {
        ExtractError::Malformed {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}

/// Errors raised while cleaning extracted records.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the transform depends on is not present in the source.
    #[error("expected column {column:?} is missing")]
    MissingColumn { column: String },

    /// The record set violated a structural invariant mid-transform.
    #[error(transparent)]
    Model(#[from] RecordSetError),
}

impl TransformError {
    /// Creates a MissingColumn error for the named column.
    pub fn missing(column: impl Into<String>) -> Self {
        TransformError::MissingColumn {
            column: column.into(),
        }
    }
}

/// Errors raised while writing records to a target.
#[derive(Debug, Error)]
#[error("failed to write {resource}: {message}")]
pub struct LoadError {
    resource: String,
    message: String,
}

impl LoadError {
    /// Creates a LoadError for the named target from any displayable cause.
    pub fn unwritable(resource: impl Into<String>, message: impl fmt::Display) -> Self {
        LoadError {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}

/// Structural invariant violations in the in-memory record set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordSetError {
    #[error("duplicate column name {name:?}")]
    DuplicateColumn { name: String },

    #[error("row has {found} values, expected {expected}")]
    RowArity { expected: usize, found: usize },

    #[error("no column named {name:?}")]
    UnknownColumn { name: String },

    #[error("column {name:?} has {found} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        found: usize,
    },
}

/// Misuse of the scraper's rate-limit parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DelayError {
    /// An explicit delay was combined with a random draw.
    #[error("rate_limit() expects an explicit delay or a random draw, not both")]
    Conflicting,

    /// Neither an explicit delay nor the random flag was supplied.
    #[error("rate_limit() needs an explicit delay or the random flag")]
    Unspecified,
}
