//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides the record model and trait definitions for
//! building data pipelines that extract tabular records from sources,
//! transform them, and load them to destinations.

mod datasource;
mod extract;
mod load;
mod pipeline;
mod record_set;
mod transform;

pub use datasource::DataSource;
pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use record_set::{Column, RecordSet};
pub use transform::{IdentityTransform, Transformer};
