//! UFO Sighting Aggregator
//!
//! A small ETL engine that aggregates UFO-sighting records from CSV
//! files, spreadsheet workbooks, and scraped web reports into a single
//! target repository.

pub mod cli;
pub mod error;
pub mod etl;
pub mod storage;
pub mod transform;
pub mod webscraper;

// Re-exports for convenience
pub use error::{DelayError, ExtractError, LoadError, RecordSetError, TransformError};
pub use etl::{
    DataSource, Extractor, IdentityTransform, Loader, Pipeline, RecordSet, Transformer,
};
