//! Crawler module for page fetching, extraction, and crawl coordination
//!
//! This module contains the core crawling logic:
//! - HTTP fetching, with retries for link discovery only
//! - Outbound-link extraction and resolution
//! - Heading-scoped content extraction
//! - The crawl loop and its state

mod coordinator;
mod extractor;
mod fetcher;
mod links;

pub use coordinator::{Coordinator, CrawlReport, CrawlState};
pub use extractor::{
    build_document, organize_content, ExtractedDocument, HeadingPath, OrganizedContent,
};
pub use fetcher::{build_http_client, fetch_links, fetch_page, random_delay, LinkFetch};
pub use links::extract_links;

use crate::config::Config;
use crate::Result;

/// Runs a complete crawl from a seed URL
///
/// Convenience wrapper over [`Coordinator`]: validates the seed, runs the
/// crawl loop to frontier exhaustion or the document bound, and returns the
/// run report with its extracted documents.
pub async fn crawl(seed_url: &str, config: Config) -> Result<CrawlReport> {
    Coordinator::new(seed_url, config)?.run().await
}
