use url::Url;

/// Extracts the site domain from a seed URL
///
/// The site domain is the lowercase host of the seed. The leading `www.`
/// is kept here; comparisons strip it on both sides so `www.example.com`
/// and `example.com` identify the same site.
pub fn site_domain_of(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Strips a single leading `www.` label from a host, if present
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}
