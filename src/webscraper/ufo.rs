//! NUFORC monthly-report scraper

use super::{Delay, PageFetcher, TokioDelay, rate_limit};
use crate::error::ExtractError;
use crate::etl::{Extractor, RecordSet};
use async_trait::async_trait;
use eyre::Result;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

/// One parsed table row: header text paired with cell text, in column
/// order.
pub type PageRecord = Vec<(String, String)>;

/// Inter-page delay window, in seconds.
const PAGE_DELAY_RANGE: (f64, f64) = (2.0, 4.0);

/// Scrapes the monthly report index pages for one year.
///
/// Pages are visited strictly in month order with a randomized pause
/// between requests. Unreachable or error pages are skipped; a handful of
/// missing monthly pages never aborts the rest of the scrape.
pub struct UfoSightingScraper {
    base_url: Url,
    year: u16,
    fetcher: PageFetcher,
    delay: Box<dyn Delay>,
}

impl UfoSightingScraper {
    pub fn try_new(base_url: Url, year: u16) -> Result<Self> {
        Ok(Self {
            base_url,
            year,
            fetcher: PageFetcher::try_new()?,
            delay: Box::new(TokioDelay),
        })
    }

    /// Replace the inter-page delay (tests substitute a no-op).
    pub fn with_delay(mut self, delay: Box<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Monthly index page URLs for the target year, January through
    /// December. The monthly pages live at `/ndxe{yyyy}{mm}.html`.
    fn page_urls(&self) -> Vec<String> {
        let base = self.base_url.as_str().trim_end_matches('/').to_string();
        (1..=12)
            .map(|month| format!("{}/ndxe{}{:02}.html", base, self.year, month))
            .collect()
    }

    /// Visit every monthly page in order, accumulating parsed records.
    pub async fn scrape(&self) -> Vec<PageRecord> {
        let mut records = Vec::new();

        for url in self.page_urls() {
            let Some(body) = self.fetcher.fetch(&url).await else {
                log::warn!("Skipping page: {}", url);
                continue;
            };

            let page_records = extract_records(&body);
            log::info!("Parsed {} records from {}", page_records.len(), url);
            records.extend(page_records);

            if let Ok(seconds) = rate_limit(None, true, Some(PAGE_DELAY_RANGE)) {
                log::debug!("Waiting {}s before the next page", seconds);
                self.delay.pause(seconds).await;
            }
        }

        records
    }
}

/// Pull the report table out of one page.
///
/// Cell texts are paired with header-cell texts by position. A row with
/// fewer cells than headers is logged and skipped rather than producing a
/// partial record.
fn extract_records(html: &str) -> Vec<PageRecord> {
    let document = Html::parse_document(html);

    let Ok(table_selector) = Selector::parse("table") else {
        return Vec::new();
    };
    let Ok(header_selector) = Selector::parse("thead font") else {
        return Vec::new();
    };
    let Ok(row_selector) = Selector::parse("tbody tr") else {
        return Vec::new();
    };
    let Ok(cell_selector) = Selector::parse("td") else {
        return Vec::new();
    };

    let Some(table) = document.select(&table_selector).next() else {
        log::warn!("No report table found in document");
        return Vec::new();
    };

    let headers: Vec<String> = table
        .select(&header_selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .collect();
    if headers.is_empty() {
        log::warn!("Report table has no header cells");
        return Vec::new();
    }

    let mut records = Vec::new();
    for row in table.select(&row_selector) {
        let cells: Vec<String> = row
            .select(&cell_selector)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .collect();
        if cells.len() < headers.len() {
            log::warn!(
                "Skipping report row with {} of {} cells",
                cells.len(),
                headers.len()
            );
            continue;
        }
        records.push(headers.iter().cloned().zip(cells).collect());
    }

    records
}

#[async_trait]
impl Extractor for UfoSightingScraper {
    fn resource_name(&self) -> String {
        self.base_url.to_string()
    }

    /// Wrap the scraped records into a record set whose columns are the
    /// union of observed keys in first-seen order.
    ///
    /// Network failures are swallowed page by page inside `scrape`, so
    /// extraction itself never fails.
    async fn extract(&self) -> Result<RecordSet, ExtractError> {
        let mut records = RecordSet::new();
        for record in self.scrape().await {
            records.push_record(
                record
                    .iter()
                    .map(|(key, value)| (key.as_str(), Value::String(value.clone()))),
            );
        }
        Ok(records)
    }
}
