//! Crawl coordination - frontier state and the main crawl loop
//!
//! The coordinator owns all mutable crawl state. Worker tasks fetch and
//! extract internal pages and return values; they never touch the frontier,
//! the visited set, or the document collection, so no locks are needed on
//! any of them. Per-URL failures are logged and contained - nothing a
//! single page does can abort the run.

use crate::config::Config;
use crate::crawler::extractor::{build_document, organize_content, ExtractedDocument};
use crate::crawler::fetcher::{
    build_http_client, fetch_links, fetch_page, random_delay, LinkFetch,
};
use crate::url::{classify, site_domain_of, Category};
use crate::{HarvestError, Result};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

/// All mutable state of one crawl run
///
/// Owned exclusively by the coordinator task. A URL moves Undiscovered ->
/// Frontier -> Visited, with the visited mark applied at pop time, before
/// any processing - a URL that later fails is never re-queued.
#[derive(Debug, Default)]
pub struct CrawlState {
    frontier: Vec<String>,
    enqueued: HashSet<String>,
    visited: HashSet<String>,
    categorized: HashMap<Category, HashSet<String>>,
    documents: Vec<ExtractedDocument>,
}

impl CrawlState {
    /// Creates crawl state seeded with one URL
    pub fn seeded(seed: String) -> Self {
        let mut state = Self::default();
        state.discover(seed);
        state
    }

    /// Pops an arbitrary frontier URL, marking it visited immediately
    pub fn pop(&mut self) -> Option<String> {
        let url = self.frontier.pop()?;
        self.enqueued.remove(&url);
        self.visited.insert(url.clone());
        Some(url)
    }

    /// Adds a URL to the frontier unless already visited or enqueued
    ///
    /// Returns true if the URL entered the frontier. Duplicate insertions
    /// are no-ops, which is the only cycle breaker the crawl needs.
    pub fn discover(&mut self, url: String) -> bool {
        if self.visited.contains(&url) || self.enqueued.contains(&url) {
            return false;
        }
        self.enqueued.insert(url.clone());
        self.frontier.push(url);
        true
    }

    /// Records the category assigned to a URL at visit time
    pub fn record_category(&mut self, url: &str, category: Category) {
        self.categorized
            .entry(category)
            .or_default()
            .insert(url.to_string());
    }

    pub fn push_document(&mut self, document: ExtractedDocument) {
        self.documents.push(document);
    }

    pub fn documents_len(&self) -> usize {
        self.documents.len()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Consumes the state into the final run report
    pub fn into_report(self, elapsed: Duration) -> CrawlReport {
        let category_counts = self
            .categorized
            .iter()
            .map(|(category, urls)| (*category, urls.len()))
            .collect();

        CrawlReport {
            documents: self.documents,
            category_counts,
            total_visited: self.visited.len(),
            elapsed,
        }
    }
}

/// Summary of a completed crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// Extracted documents, in extraction order
    pub documents: Vec<ExtractedDocument>,

    /// How many distinct URLs landed in each category
    pub category_counts: HashMap<Category, usize>,

    /// Total URLs popped and processed
    pub total_visited: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Main crawl coordinator
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    seed: Url,
    site_domain: String,
    workers: Arc<Semaphore>,
    state: CrawlState,
}

impl Coordinator {
    /// Creates a coordinator for one crawl run
    ///
    /// Validates the seed URL (absolute, http(s), with a host), derives the
    /// site domain from it, and builds the shared HTTP client.
    pub fn new(seed_url: &str, config: Config) -> Result<Self> {
        let seed = Url::parse(seed_url).map_err(|e| HarvestError::InvalidSeed {
            url: seed_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(seed.scheme(), "http" | "https") {
            return Err(HarvestError::InvalidSeed {
                url: seed_url.to_string(),
                reason: format!("scheme must be http or https, got '{}'", seed.scheme()),
            });
        }

        let site_domain = site_domain_of(&seed).ok_or_else(|| HarvestError::InvalidSeed {
            url: seed_url.to_string(),
            reason: "missing host".to_string(),
        })?;

        let client = build_http_client(&config.http)?;
        let workers = Arc::new(Semaphore::new(config.crawler.worker_pool_size));
        let state = CrawlState::seeded(seed.to_string());

        Ok(Self {
            config: Arc::new(config),
            client,
            seed,
            site_domain,
            workers,
            state,
        })
    }

    /// Runs the crawl loop to completion
    ///
    /// Per iteration: pop a URL (marking it visited), classify and record
    /// it, dispatch an extraction worker if it is internal, run the retried
    /// link-discovery fetch concurrently, join the worker and collect its
    /// document, absorb new non-Other links into the frontier, then pace.
    /// The loop ends when the frontier empties or the document bound is
    /// reached; remaining frontier entries are abandoned, not errors.
    pub async fn run(mut self) -> Result<CrawlReport> {
        let start = Instant::now();
        tracing::info!(
            "Starting crawl of {} (site domain: {})",
            self.seed,
            self.site_domain
        );

        let bound = self.config.crawler.document_bound;

        while self.state.documents_len() < bound {
            let Some(current) = self.state.pop() else {
                tracing::info!("Frontier exhausted, crawl complete");
                break;
            };

            tracing::info!("Visiting: {}", current);
            let category = classify(
                &current,
                &self.site_domain,
                &self.config.crawler.media_extensions,
            );
            self.state.record_category(&current, category);
            tracing::info!("URL {} added to category: {}", current, category.label());

            let current_url = Url::parse(&current).ok();

            // The extraction worker runs while link discovery is in flight;
            // its result is only consumed after the join below.
            let extract_task = match (&current_url, category) {
                (Some(url), Category::Internal) => Some(self.spawn_extract(url.clone())),
                _ => None,
            };

            let link_fetch = match &current_url {
                Some(url) => fetch_links(&self.client, url, &self.config.crawler).await,
                None => LinkFetch::failure(),
            };

            if let Some(handle) = extract_task {
                match handle.await {
                    Ok(Ok(document)) => {
                        tracing::info!("Extracted document from {}", document.webpage_url);
                        self.state.push_document(document);
                    }
                    Ok(Err(e)) => {
                        tracing::error!("Error processing URL {}: {}", current, e);
                    }
                    Err(e) => {
                        tracing::error!("Extraction task for {} did not complete: {}", current, e);
                    }
                }
            }

            if !link_fetch.failed {
                let mut added = 0usize;
                for link in link_fetch.links {
                    let link_category = classify(
                        &link,
                        &self.site_domain,
                        &self.config.crawler.media_extensions,
                    );
                    if link_category.expands_frontier() && self.state.discover(link) {
                        added += 1;
                    }
                }
                tracing::debug!(
                    "Frontier grew by {}, size now {}",
                    added,
                    self.state.frontier_len()
                );
            }

            if self.state.documents_len() >= bound {
                tracing::info!("Document bound of {} reached, stopping", bound);
                break;
            }

            // Politeness throttle between iterations.
            tokio::time::sleep(random_delay(self.config.crawler.inter_request_delay_ms)).await;
        }

        let elapsed = start.elapsed();
        tracing::info!(
            "Crawl finished: {} documents from {} visited URLs in {:.2}s",
            self.state.documents_len(),
            self.state.visited_len(),
            elapsed.as_secs_f64()
        );

        Ok(self.state.into_report(elapsed))
    }

    /// Dispatches a fetch+extract task to the bounded worker pool
    ///
    /// The task acquires a pool permit, fetches the page once (no retries),
    /// and returns the extracted document as a value. A supervising timeout
    /// keeps a stalled fetch from holding its permit forever.
    fn spawn_extract(&self, url: Url) -> JoinHandle<Result<ExtractedDocument>> {
        let client = self.client.clone();
        let workers = Arc::clone(&self.workers);
        let task_timeout = Duration::from_secs(self.config.http.request_timeout_secs + 5);

        tokio::spawn(async move {
            let _permit = workers
                .acquire_owned()
                .await
                .map_err(|_| HarvestError::WorkerPoolClosed)?;

            let body = tokio::time::timeout(task_timeout, fetch_page(&client, &url))
                .await
                .map_err(|_| HarvestError::Timeout {
                    url: url.to_string(),
                })??;

            let organized = organize_content(&body);
            Ok(build_document(&organized, url.as_str()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_pops_seed() {
        let mut state = CrawlState::seeded("https://example.com/".to_string());
        assert_eq!(state.frontier_len(), 1);

        let popped = state.pop();
        assert_eq!(popped, Some("https://example.com/".to_string()));
        assert_eq!(state.frontier_len(), 0);
        assert_eq!(state.visited_len(), 1);
    }

    #[test]
    fn test_pop_marks_visited_immediately() {
        let mut state = CrawlState::seeded("https://example.com/".to_string());
        state.pop();

        // A popped URL can never re-enter the frontier.
        assert!(!state.discover("https://example.com/".to_string()));
        assert_eq!(state.frontier_len(), 0);
    }

    #[test]
    fn test_duplicate_discover_is_noop() {
        let mut state = CrawlState::default();
        assert!(state.discover("https://example.com/a".to_string()));
        assert!(!state.discover("https://example.com/a".to_string()));
        assert_eq!(state.frontier_len(), 1);

        // One pop drains it; the duplicate never queued.
        assert!(state.pop().is_some());
        assert!(state.pop().is_none());
    }

    #[test]
    fn test_frontier_and_visited_stay_disjoint() {
        let mut state = CrawlState::default();
        state.discover("https://example.com/a".to_string());
        state.discover("https://example.com/b".to_string());

        while let Some(url) = state.pop() {
            assert!(!state.discover(url));
        }
        assert_eq!(state.visited_len(), 2);
    }

    #[test]
    fn test_category_counts_in_report() {
        let mut state = CrawlState::default();
        state.record_category("https://example.com/a", Category::Internal);
        state.record_category("https://example.com/b", Category::Internal);
        state.record_category("https://other.com/", Category::External);
        // Same URL recorded twice counts once per set semantics.
        state.record_category("https://example.com/a", Category::Internal);

        let report = state.into_report(Duration::from_secs(1));
        assert_eq!(report.category_counts.get(&Category::Internal), Some(&2));
        assert_eq!(report.category_counts.get(&Category::External), Some(&1));
        assert_eq!(report.category_counts.get(&Category::Ftp), None);
    }

    #[test]
    fn test_coordinator_rejects_relative_seed() {
        let result = Coordinator::new("/just/a/path", Config::default());
        assert!(matches!(result, Err(HarvestError::InvalidSeed { .. })));
    }

    #[test]
    fn test_coordinator_rejects_non_http_seed() {
        let result = Coordinator::new("ftp://example.com/", Config::default());
        assert!(matches!(result, Err(HarvestError::InvalidSeed { .. })));
    }

    #[test]
    fn test_coordinator_accepts_http_seed() {
        let coordinator = Coordinator::new("https://www.example.com/", Config::default()).unwrap();
        assert_eq!(coordinator.site_domain, "www.example.com");
        assert_eq!(coordinator.state.frontier_len(), 1);
    }
}
