//! Outbound-link extraction from fetched pages
//!
//! Pulls every `<a href>` value out of a page and resolves it against the
//! page's own URL. Unlike crawlers that pre-filter special schemes, this
//! one keeps mailto/tel/ftp links: categorization decides later what each
//! discovered URL means.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts all resolvable links from HTML, deduplicated into a set
///
/// Relative hrefs are resolved against `base_url` (the URL the page was
/// fetched from); absolute hrefs of any scheme pass through. Empty and
/// fragment-only hrefs are skipped, as are hrefs that fail to resolve.
pub fn extract_links(html: &str, base_url: &Url) -> HashSet<String> {
    let document = Html::parse_document(html);
    let mut links = HashSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(resolved) = resolve_href(href, base_url) {
                    links.insert(resolved);
                }
            }
        }
    }

    links
}

/// Resolves an href to an absolute URL string
fn resolve_href(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    base_url.join(href).ok().map(|u| u.to_string())
}
