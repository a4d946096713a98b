//! Polite web scraping infrastructure
//!
//! Fetches pages with a bounded timeout, treats every transport failure
//! as a missing document rather than an error, and self-throttles between
//! page requests with a randomized delay so the scraper requests at a
//! more natural rate.

mod ufo;

pub use ufo::{PageRecord, UfoSightingScraper};

use crate::error::DelayError;
use async_trait::async_trait;
use eyre::Result;
use std::time::Duration;

/// Per-request timeout applied to every page fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Default window for random delay draws, in seconds.
const DEFAULT_DELAY_RANGE: (f64, f64) = (2.0, 10.0);

/// Suspends the scraper between page fetches.
///
/// Injectable so tests can substitute a no-op instead of waiting real
/// time.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn pause(&self, seconds: f64);
}

/// Production delay backed by the tokio timer.
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn pause(&self, seconds: f64) {
        tokio::time::sleep(Duration::from_secs_f64(seconds)).await;
    }
}

/// No-op delay for tests.
pub struct NoDelay;

#[async_trait]
impl Delay for NoDelay {
    async fn pause(&self, _seconds: f64) {}
}

/// HTTP page fetcher that reports failures as missing documents.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build a fetcher with the bounded per-request timeout.
    pub fn try_new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch one page and return its body.
    ///
    /// Any transport failure, timeout, or non-2xx status is logged and
    /// reported as `None`; callers treat a missing document as "skip this
    /// page", never as a fatal error.
    pub async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Request to {} failed: {}", url, e);
                return None;
            }
        };
        let response = match response.error_for_status() {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Request to {} returned an error status: {}", url, e);
                return None;
            }
        };
        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!("Failed to read body from {}: {}", url, e);
                None
            }
        }
    }
}

/// Get an explicit or random delay (in seconds) to pause the scraper.
///
/// Exactly one of an explicit `seconds` value or a random draw
/// (`random`, with an optional `range`) may be requested. A random draw
/// without a range uses the default window of 2.0 to 10.0 seconds. The
/// range bounds may arrive in either order, and the result is the
/// absolute value of the draw rounded to milliseconds, so the delay is
/// always positive.
///
/// # Errors
/// Fails when an explicit value is combined with a random draw, or when
/// neither is requested.
pub fn rate_limit(
    seconds: Option<f64>,
    random: bool,
    range: Option<(f64, f64)>,
) -> Result<f64, DelayError> {
    if seconds.is_some() && (random || range.is_some()) {
        return Err(DelayError::Conflicting);
    }

    let delay = if let Some(explicit) = seconds {
        explicit
    } else if random {
        let (a, b) = range.unwrap_or(DEFAULT_DELAY_RANGE);
        let (lo, hi) = (a.min(b), a.max(b));
        lo + fastrand::f64() * (hi - lo)
    } else {
        return Err(DelayError::Unspecified);
    };

    Ok((delay.abs() * 1000.0).round() / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_rejects_explicit_combined_with_random() {
        let err = rate_limit(Some(1.5), true, Some((5.0, 11.0))).unwrap_err();
        assert_eq!(err, DelayError::Conflicting);

        let err = rate_limit(Some(1.5), true, None).unwrap_err();
        assert_eq!(err, DelayError::Conflicting);
    }

    #[test]
    fn test_rate_limit_rejects_no_request() {
        let err = rate_limit(None, false, None).unwrap_err();
        assert_eq!(err, DelayError::Unspecified);
    }

    #[test]
    fn test_rate_limit_explicit_negative_is_positive() {
        let delay = rate_limit(Some(-1.0), false, None).unwrap();
        assert_eq!(delay, 1.0);
    }

    #[test]
    fn test_rate_limit_default_range() {
        let delay = rate_limit(None, true, None).unwrap();
        assert!((2.0..=10.0).contains(&delay));
    }

    #[test]
    fn test_rate_limit_user_range() {
        let delay = rate_limit(None, true, Some((1.2, 5.0))).unwrap();
        assert!((1.2..=5.0).contains(&delay));
    }

    #[test]
    fn test_rate_limit_inverted_range() {
        let delay = rate_limit(None, true, Some((5.0, 2.0))).unwrap();
        assert!((2.0..=5.0).contains(&delay));
    }

    #[test]
    fn test_rate_limit_negative_range_is_positive() {
        let delay = rate_limit(None, true, Some((-5.0, -10.0))).unwrap();
        assert!((5.0..=10.0).contains(&delay));
    }
}
