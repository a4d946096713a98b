//! Pipeline orchestration for ETL operations

use super::DataSource;
use eyre::Result;

/// ETL pipeline that drives an ordered list of data sources
///
/// Sources run strictly in registration order, one at a time. When several
/// sources share one load target, registration order is the write order
/// into that target. A failure in any source's extract, transform, or load
/// aborts the whole run; already-loaded sources are not rolled back.
///
/// # Example
/// ```no_run
/// # use ufo_aggregator::etl::{DataSource, Pipeline};
/// # async fn example(sources: Vec<DataSource>) -> eyre::Result<()> {
/// let total = Pipeline::new(sources).run().await?;
/// println!("Total new records: {}", total);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    sources: Vec<DataSource>,
}

impl Pipeline {
    /// Create a pipeline over the given sources, in run order.
    pub fn new(sources: Vec<DataSource>) -> Self {
        Self { sources }
    }

    /// Run every source through extract → transform → load.
    ///
    /// Returns the total number of records written across all sources.
    ///
    /// # Errors
    /// Returns the first stage error encountered; remaining sources are
    /// not run.
    pub async fn run(mut self) -> Result<usize> {
        log::info!("Starting pipeline with {} sources", self.sources.len());
        let mut total = 0;

        for source in &mut self.sources {
            let name = source.resource_name();

            log::debug!("Extracting from {}...", name);
            let extracted = source.extract().await?;
            log::info!("Extracted {} records from {}", extracted, name);

            source.transform()?;

            let loaded = source.load().await?;
            log::info!("Loaded {} records from {}", loaded, name);
            total += loaded;
        }

        log::info!("Total new records: {}", total);
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, LoadError};
    use crate::etl::{Extractor, Loader, RecordSet};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    struct MockExtractor(Vec<i64>);

    #[async_trait]
    impl Extractor for MockExtractor {
        fn resource_name(&self) -> String {
            "mock".to_string()
        }

        async fn extract(&self) -> Result<RecordSet, ExtractError> {
            let mut records = RecordSet::with_columns(["n"])
                .map_err(|e| ExtractError::malformed("mock", e))?;
            for n in &self.0 {
                records
                    .push_row(vec![json!(n)])
                    .map_err(|e| ExtractError::malformed("mock", e))?;
            }
            Ok(records)
        }
    }

    struct FailingExtractor;

    #[async_trait]
    impl Extractor for FailingExtractor {
        fn resource_name(&self) -> String {
            "failing".to_string()
        }

        async fn extract(&self) -> Result<RecordSet, ExtractError> {
            Err(ExtractError::malformed("failing", "boom"))
        }
    }

    #[derive(Default)]
    struct CountingLoader(Mutex<usize>);

    #[async_trait]
    impl Loader for CountingLoader {
        fn resource_name(&self) -> String {
            "counting".to_string()
        }

        async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
            *self.0.lock().unwrap() += records.row_count();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_pipeline_accumulates_counts() {
        let sink = Arc::new(CountingLoader::default());
        let sources = vec![
            DataSource::new(Box::new(MockExtractor(vec![1, 2])), sink.clone()),
            DataSource::new(Box::new(MockExtractor(vec![3])), sink.clone()),
        ];

        let total = Pipeline::new(sources).run().await.unwrap();

        assert_eq!(total, 3);
        assert_eq!(*sink.0.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_pipeline() {
        let total = Pipeline::new(Vec::new()).run().await.unwrap();
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_sources() {
        let sink = Arc::new(CountingLoader::default());
        let sources = vec![
            DataSource::new(Box::new(MockExtractor(vec![1])), sink.clone()),
            DataSource::new(Box::new(FailingExtractor), sink.clone()),
            DataSource::new(Box::new(MockExtractor(vec![2, 3])), sink.clone()),
        ];

        let result = Pipeline::new(sources).run().await;

        assert!(result.is_err());
        // only the first source made it to the loader
        assert_eq!(*sink.0.lock().unwrap(), 1);
    }
}
