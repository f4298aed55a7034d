//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with pooling and timeouts
//! - Retried link-discovery fetches with randomized backoff
//! - Single-attempt page fetches for content extraction
//!
//! Retries are strictly a frontier-expansion concern. `fetch_links` absorbs
//! failures into an explicit `failed` flag after exhausting its attempts;
//! `fetch_page` surfaces its first failure to the caller so extraction
//! errors stay visible.

use crate::config::{CrawlerConfig, HttpConfig};
use crate::crawler::links::extract_links;
use crate::{HarvestError, Result};
use rand::Rng;
use reqwest::header::REFERER;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Result of a retried link-discovery fetch
///
/// Carries no partial state: either the full resolved link set of the page,
/// or `failed == true` with an empty set. Callers must check the flag
/// rather than infer failure from emptiness - a page with no links is a
/// successful fetch.
#[derive(Debug)]
pub struct LinkFetch {
    /// Absolute, deduplicated outbound links of the page
    pub links: HashSet<String>,

    /// True when every attempt was exhausted without a successful response
    pub failed: bool,
}

impl LinkFetch {
    /// An empty result with the failed flag set
    pub fn failure() -> Self {
        Self {
            links: HashSet::new(),
            failed: true,
        }
    }
}

/// Builds the shared HTTP client
///
/// One client is built per crawl run and cloned into worker tasks; its
/// connection pool is sized independently of the worker count.
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and returns its resolved outbound links, with retries
///
/// Attempts the request up to `max_retries` times. Each failure (network
/// error or non-2xx status) is logged and followed by a uniform random
/// backoff from `retry_backoff_ms` before the next attempt. Exhaustion is
/// reported through the `failed` flag, never as an error.
pub async fn fetch_links(client: &Client, url: &Url, config: &CrawlerConfig) -> LinkFetch {
    // Referer is the origin of the page being fetched, as a browser would send.
    let referer = format!(
        "{}://{}",
        url.scheme(),
        url.host_str().unwrap_or_default()
    );

    for attempt in 1..=config.max_retries {
        match try_fetch_links(client, url, &referer).await {
            Ok(links) => return LinkFetch { links, failed: false },
            Err(e) => {
                tracing::error!(
                    "Failed to fetch {} (attempt {}/{}): {}",
                    url,
                    attempt,
                    config.max_retries,
                    e
                );
                if attempt < config.max_retries {
                    tokio::time::sleep(random_delay(config.retry_backoff_ms)).await;
                }
            }
        }
    }

    tracing::error!(
        "Giving up on {} after {} failed attempts",
        url,
        config.max_retries
    );
    LinkFetch::failure()
}

/// One attempt of the link-discovery fetch
async fn try_fetch_links(client: &Client, url: &Url, referer: &str) -> Result<HashSet<String>> {
    let response = client
        .get(url.clone())
        .header(REFERER, referer)
        .send()
        .await
        .map_err(|e| classify_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|e| HarvestError::Http {
        url: url.to_string(),
        source: e,
    })?;

    Ok(extract_links(&body, url))
}

/// Fetches a page body for content extraction, single attempt
///
/// Non-2xx statuses and network errors surface as `HarvestError`; the
/// caller decides whether to log and skip. No retries here.
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_request_error(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| HarvestError::Http {
        url: url.to_string(),
        source: e,
    })
}

/// Maps a reqwest send error onto the crate error taxonomy
fn classify_request_error(url: &Url, error: reqwest::Error) -> HarvestError {
    if error.is_timeout() {
        HarvestError::Timeout {
            url: url.to_string(),
        }
    } else {
        HarvestError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Draws a uniform random duration from a [low, high] millisecond range
pub fn random_delay(range_ms: [u64; 2]) -> Duration {
    let ms = rand::thread_rng().gen_range(range_ms[0]..=range_ms[1]);
    Duration::from_millis(ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = HttpConfig::default();
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_random_delay_within_range() {
        for _ in 0..50 {
            let d = random_delay([100, 500]);
            assert!(d >= Duration::from_millis(100));
            assert!(d <= Duration::from_millis(500));
        }
    }

    #[test]
    fn test_random_delay_degenerate_range() {
        assert_eq!(random_delay([0, 0]), Duration::ZERO);
        assert_eq!(random_delay([7, 7]), Duration::from_millis(7));
    }

    #[test]
    fn test_link_fetch_failure_is_empty() {
        let fetch = LinkFetch::failure();
        assert!(fetch.failed);
        assert!(fetch.links.is_empty());
    }

    // Retry and status handling are exercised end-to-end against a mock
    // server in tests/crawl_tests.rs.
}
