use crate::config::types::{Config, CrawlerConfig, HttpConfig, OutputConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.worker_pool_size < 1 || config.worker_pool_size > 100 {
        return Err(ConfigError::Validation(format!(
            "worker_pool_size must be between 1 and 100, got {}",
            config.worker_pool_size
        )));
    }

    if config.document_bound < 1 {
        return Err(ConfigError::Validation(format!(
            "document_bound must be >= 1, got {}",
            config.document_bound
        )));
    }

    validate_delay_range("retry_backoff_ms", config.retry_backoff_ms)?;
    validate_delay_range("inter_request_delay_ms", config.inter_request_delay_ms)?;

    for ext in &config.media_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "media extension '{}' must start with '.' and name a suffix",
                ext
            )));
        }
    }

    Ok(())
}

/// Validates that a [low, high] millisecond range is ordered
fn validate_delay_range(name: &str, range: [u64; 2]) -> Result<(), ConfigError> {
    if range[0] > range[1] {
        return Err(ConfigError::Validation(format!(
            "{} range is inverted: [{}, {}]",
            name, range[0], range[1]
        )));
    }
    Ok(())
}

/// Validates HTTP transport configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.pool_max_idle_per_host < 1 {
        return Err(ConfigError::Validation(format!(
            "pool_max_idle_per_host must be >= 1, got {}",
            config.pool_max_idle_per_host
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.documents_path.is_empty() {
        return Err(ConfigError::Validation(
            "documents_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
