//! URL handling module for Site-Harvester
//!
//! Provides site-domain extraction and the link categorization policy that
//! decides whether a discovered URL is expanded, extracted, or discarded.

mod domain;

pub use domain::{site_domain_of, strip_www};

use url::Url;

/// Link categories assigned at discovery time
///
/// Exactly one category per URL; categorization is a pure function of the
/// URL string, the site domain, and the configured media extensions. It
/// never depends on crawl history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Same-site http(s) page - extracted and expanded
    Internal,
    /// Off-site http(s) page - recorded but not extracted
    External,
    /// mailto: or tel: link
    Special,
    /// ftp: link
    Ftp,
    /// URL ending in a configured media/document extension
    MediaOrDocument,
    /// Unparseable or unrecognized - never enters the frontier
    Other,
}

impl Category {
    /// All categories, in reporting order
    pub const ALL: [Category; 6] = [
        Category::Internal,
        Category::External,
        Category::Special,
        Category::Ftp,
        Category::MediaOrDocument,
        Category::Other,
    ];

    /// Returns true if URLs of this category may enter the frontier
    pub fn expands_frontier(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Human-readable label used in the run report
    pub fn label(&self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::External => "External",
            Self::Special => "Special",
            Self::Ftp => "FTP",
            Self::MediaOrDocument => "Media or Documents",
            Self::Other => "Others",
        }
    }
}

/// Classifies a URL relative to the crawled site
///
/// Scheme and host decide the base category: http(s) URLs are Internal when
/// the host equals the site domain (both sides lowercased with a leading
/// `www.` stripped) and External otherwise; `mailto:`/`tel:` are Special;
/// `ftp:` is FTP. A URL whose full string ends with one of the configured
/// media extensions (case-insensitive, exact suffix) is forced to
/// MediaOrDocument regardless of the scheme/host outcome, Internal
/// included. Anything unparseable or unrecognized is Other.
///
/// Total function: malformed input classifies, it never errors.
pub fn classify(url: &str, site_domain: &str, media_extensions: &[String]) -> Category {
    let mut category = match Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => match parsed.host_str() {
                Some(host) => {
                    let host = host.to_lowercase();
                    if strip_www(&host) == strip_www(&site_domain.to_lowercase()) {
                        Some(Category::Internal)
                    } else {
                        Some(Category::External)
                    }
                }
                None => None,
            },
            "mailto" | "tel" => Some(Category::Special),
            "ftp" => Some(Category::Ftp),
            _ => None,
        },
        Err(_) => None,
    };

    // Extension override: exact suffix match on the full URL string, so a
    // query substring like "?from=.jpg2" does not trigger it.
    let lowered = url.to_lowercase();
    if media_extensions
        .iter()
        .any(|ext| lowered.ends_with(&ext.to_lowercase()))
    {
        category = Some(Category::MediaOrDocument);
    }

    category.unwrap_or(Category::Other)
}
