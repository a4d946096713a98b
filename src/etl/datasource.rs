//! One source-to-destination binding in the pipeline

use super::{Extractor, IdentityTransform, Loader, RecordSet, Transformer};
use eyre::{Context, Result, eyre};
use std::sync::Arc;

/// A single source in the pipeline: one extractor, one transformer, and
/// one (possibly shared) loader, plus the in-flight record set.
///
/// The lifecycle is extract → transform → load, strictly in that order.
/// The record set is absent until `extract` runs, replaced by `transform`,
/// and consumed by `load`; a source is not reused after loading.
pub struct DataSource {
    extractor: Box<dyn Extractor>,
    transformer: Box<dyn Transformer>,
    loader: Arc<dyn Loader>,
    records: Option<RecordSet>,
}

impl DataSource {
    /// Bind an extractor to a loader with no cleaning step.
    pub fn new(extractor: Box<dyn Extractor>, loader: Arc<dyn Loader>) -> Self {
        Self::with_transform(extractor, Box::new(IdentityTransform), loader)
    }

    /// Bind an extractor to a loader with a source-specific transform.
    pub fn with_transform(
        extractor: Box<dyn Extractor>,
        transformer: Box<dyn Transformer>,
        loader: Arc<dyn Loader>,
    ) -> Self {
        Self {
            extractor,
            transformer,
            loader,
            records: None,
        }
    }

    /// The extractor's resource name, for logs and error reporting.
    pub fn resource_name(&self) -> String {
        self.extractor.resource_name()
    }

    /// Pull the raw records from the source.
    ///
    /// Returns the number of records read.
    pub async fn extract(&mut self) -> Result<usize> {
        let records = self.extractor.extract().await?;
        let count = records.row_count();
        self.records = Some(records);
        Ok(count)
    }

    /// Apply the source's transform to the in-flight records.
    pub fn transform(&mut self) -> Result<()> {
        let records = self.records.take().ok_or_else(|| {
            eyre!(
                "transform() called before extract() on {}",
                self.resource_name()
            )
        })?;
        let transformed = self
            .transformer
            .transform(records)
            .with_context(|| format!("Failed to transform records from {}", self.resource_name()))?;
        self.records = Some(transformed);
        Ok(())
    }

    /// Write the in-flight records to the destination.
    ///
    /// Returns the number of records written.
    pub async fn load(&mut self) -> Result<usize> {
        let records = self.records.take().ok_or_else(|| {
            eyre!(
                "load() called before extract() on {}",
                self.resource_name()
            )
        })?;
        self.loader.load(&records).await?;
        Ok(records.row_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ExtractError, LoadError};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct FixedExtractor(RecordSet);

    #[async_trait]
    impl Extractor for FixedExtractor {
        fn resource_name(&self) -> String {
            "fixed".to_string()
        }

        async fn extract(&self) -> Result<RecordSet, ExtractError> {
            Ok(self.0.clone())
        }
    }

    struct SinkLoader(Mutex<Vec<RecordSet>>);

    #[async_trait]
    impl Loader for SinkLoader {
        fn resource_name(&self) -> String {
            "sink".to_string()
        }

        async fn load(&self, records: &RecordSet) -> Result<(), LoadError> {
            self.0.lock().unwrap().push(records.clone());
            Ok(())
        }
    }

    fn sample() -> RecordSet {
        let mut records = RecordSet::with_columns(["n"]).unwrap();
        records.push_row(vec![json!(1)]).unwrap();
        records.push_row(vec![json!(2)]).unwrap();
        records
    }

    #[tokio::test]
    async fn test_lifecycle_counts() {
        let sink = Arc::new(SinkLoader(Mutex::new(Vec::new())));
        let mut source = DataSource::new(Box::new(FixedExtractor(sample())), sink.clone());

        assert_eq!(source.extract().await.unwrap(), 2);
        source.transform().unwrap();
        assert_eq!(source.load().await.unwrap(), 2);
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transform_before_extract_fails() {
        let sink = Arc::new(SinkLoader(Mutex::new(Vec::new())));
        let mut source = DataSource::new(Box::new(FixedExtractor(sample())), sink);

        assert!(source.transform().is_err());
    }

    #[tokio::test]
    async fn test_load_before_extract_fails() {
        let sink = Arc::new(SinkLoader(Mutex::new(Vec::new())));
        let mut source = DataSource::new(Box::new(FixedExtractor(sample())), sink);

        assert!(source.load().await.is_err());
    }
}
