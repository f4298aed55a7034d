use serde::Deserialize;

/// Main configuration structure for Site-Harvester
///
/// Every section and field carries a default so the crawler can run from
/// just a seed URL with no config file at all.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Attempts per link-discovery fetch before giving up on a URL
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Number of concurrent workers for internal-page extraction
    #[serde(rename = "worker-pool-size")]
    pub worker_pool_size: usize,

    /// Crawl halts once this many documents have been extracted
    #[serde(rename = "document-bound")]
    pub document_bound: usize,

    /// Uniform backoff interval between retry attempts, in milliseconds
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: [u64; 2],

    /// Uniform pacing delay between crawl iterations, in milliseconds
    #[serde(rename = "inter-request-delay-ms")]
    pub inter_request_delay_ms: [u64; 2],

    /// URL suffixes that force the MediaOrDocument category
    #[serde(rename = "media-extensions")]
    pub media_extensions: Vec<String>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            worker_pool_size: 13,
            document_bound: 10,
            retry_backoff_ms: [100, 500],
            inter_request_delay_ms: [5, 50],
            media_extensions: vec![".jpg".to_string(), ".jpeg".to_string()],
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total per-request timeout in seconds
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Connection-establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Maximum idle pooled connections kept per host
    #[serde(rename = "pool-max-idle-per-host")]
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            pool_max_idle_per_host: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path the extracted-document JSON collection is written to
    #[serde(rename = "documents-path")]
    pub documents_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            documents_path: "./documents.json".to_string(),
        }
    }
}
