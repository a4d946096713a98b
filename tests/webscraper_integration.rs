//! Integration tests for the web scraper
//!
//! The scraper's contract is that network failure is never fatal: an
//! unreachable page is a skipped page. These tests point the scraper at
//! loopback endpoints nothing listens on, so they exercise the failure
//! path without leaving the machine.

use ufo_aggregator::etl::Extractor;
use ufo_aggregator::webscraper::{NoDelay, PageFetcher, UfoSightingScraper};
use url::Url;

#[tokio::test]
async fn test_fetch_unreachable_path_is_no_document() {
    let fetcher = PageFetcher::try_new().unwrap();
    // discard port on loopback, nothing listens there
    let body = fetcher.fetch("http://127.0.0.1:9/webreports/notfound").await;
    assert!(body.is_none());
}

#[tokio::test]
async fn test_fetch_unsupported_uri_schemes_are_no_document() {
    let fetcher = PageFetcher::try_new().unwrap();
    for url in ["ftp://ftp.myurl.com", "file:///path/to/file"] {
        assert!(fetcher.fetch(url).await.is_none(), "expected no document for {}", url);
    }
}

#[tokio::test]
async fn test_scrape_with_all_pages_unreachable_is_empty() {
    let scraper = UfoSightingScraper::try_new(
        Url::parse("http://127.0.0.1:9/webreports").unwrap(),
        2022,
    )
    .unwrap()
    .with_delay(Box::new(NoDelay));

    let records = scraper.scrape().await;
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_extract_with_all_pages_unreachable_is_empty_not_an_error() {
    let scraper = UfoSightingScraper::try_new(
        Url::parse("http://127.0.0.1:9/webreports").unwrap(),
        2022,
    )
    .unwrap()
    .with_delay(Box::new(NoDelay));

    let records = scraper.extract().await.unwrap();
    assert!(records.is_empty());
    assert_eq!(records.column_count(), 0);
}
