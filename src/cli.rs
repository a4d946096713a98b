//! CLI helper functions

use crate::etl::{DataSource, Loader, Pipeline};
use crate::storage::{CsvReader, CsvWriter, NdjsonWriter, SqliteWriter, XlsxReader, XlsxWriter};
use crate::transform::UfoSightingTransform;
use crate::webscraper::UfoSightingScraper;
use clap::ValueEnum;
use eyre::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

/// Base URL of the NUFORC monthly report index.
const REPORTS_URL: &str = "https://nuforc.org/webreports";

/// Year covered by the scraped source.
const SCRAPED_YEAR: u16 = 2022;

/// Supported output repositories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Delimited text file
    Csv,
    /// Spreadsheet workbook
    Xlsx,
    /// Newline-delimited JSON records
    Json,
    /// SQLite database
    Sqlite,
}

impl OutputFormat {
    /// File extension appended to the output base name.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Json => "json",
            OutputFormat::Sqlite => "sqlite",
        }
    }

    /// Build the loader writing to `path`.
    pub fn loader(&self, path: impl AsRef<Path>) -> Arc<dyn Loader> {
        match self {
            OutputFormat::Csv => Arc::new(CsvWriter::new(path)),
            OutputFormat::Xlsx => Arc::new(XlsxWriter::new(path)),
            OutputFormat::Json => Arc::new(NdjsonWriter::new(path)),
            OutputFormat::Sqlite => Arc::new(SqliteWriter::new(path)),
        }
    }
}

/// Output path for a base name: `{out_dir}/{base}.{extension}`.
pub fn output_path(out_dir: impl AsRef<Path>, base: &str, format: OutputFormat) -> PathBuf {
    out_dir
        .as_ref()
        .join(format!("{}.{}", base, format.extension()))
}

/// Assemble and run the aggregation pipeline.
///
/// Reads the 2020 and 2023 CSV exports and the 2021 workbook from
/// `in_dir`, scrapes the 2022 monthly web reports, and appends all of
/// them through the shared loader. Sources run in registration order, so
/// that order is the write order into the target.
pub async fn run_aggregation(in_dir: impl AsRef<Path>, loader: Arc<dyn Loader>) -> Result<usize> {
    let in_dir = in_dir.as_ref();

    let reports_url = Url::parse(REPORTS_URL).context("Invalid report index URL")?;
    let scraper = UfoSightingScraper::try_new(reports_url, SCRAPED_YEAR)?;

    let sources = vec![
        DataSource::with_transform(
            Box::new(CsvReader::new(in_dir.join("sightings-2020.csv"))),
            Box::new(UfoSightingTransform),
            Arc::clone(&loader),
        ),
        DataSource::with_transform(
            Box::new(XlsxReader::new(in_dir.join("sightings-2021.xlsx"))),
            Box::new(UfoSightingTransform),
            Arc::clone(&loader),
        ),
        DataSource::with_transform(
            Box::new(scraper),
            Box::new(UfoSightingTransform),
            Arc::clone(&loader),
        ),
        DataSource::with_transform(
            Box::new(CsvReader::new(in_dir.join("sightings-2023.csv"))),
            Box::new(UfoSightingTransform),
            Arc::clone(&loader),
        ),
    ];

    Pipeline::new(sources).run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_per_format() {
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Xlsx.extension(), "xlsx");
        assert_eq!(OutputFormat::Json.extension(), "json");
        assert_eq!(OutputFormat::Sqlite.extension(), "sqlite");
    }

    #[test]
    fn test_output_path_appends_extension() {
        let path = output_path("data/out", "report", OutputFormat::Sqlite);
        assert_eq!(path, PathBuf::from("data/out/report.sqlite"));
    }

    #[test]
    fn test_loader_targets_constructed_path() {
        for format in [
            OutputFormat::Csv,
            OutputFormat::Xlsx,
            OutputFormat::Json,
            OutputFormat::Sqlite,
        ] {
            let path = output_path("data/out", "report", format);
            let loader = format.loader(&path);
            assert_eq!(loader.resource_name(), path.display().to_string());
        }
    }
}
