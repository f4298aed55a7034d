use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
max-retries = 5
worker-pool-size = 4
document-bound = 25
retry-backoff-ms = [50, 200]
inter-request-delay-ms = [1, 10]
media-extensions = [".jpg", ".jpeg", ".pdf"]

[http]
user-agent = "TestAgent/1.0"
request-timeout-secs = 15
connect-timeout-secs = 5
pool-max-idle-per-host = 8

[output]
documents-path = "./out.json"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_retries, 5);
        assert_eq!(config.crawler.worker_pool_size, 4);
        assert_eq!(config.crawler.document_bound, 25);
        assert_eq!(config.crawler.media_extensions.len(), 3);
        assert_eq!(config.http.user_agent, "TestAgent/1.0");
        assert_eq!(config.output.documents_path, "./out.json");
    }

    #[test]
    fn test_load_empty_config_uses_defaults() {
        let file = create_temp_config("");
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.max_retries, 3);
        assert_eq!(config.crawler.worker_pool_size, 13);
        assert_eq!(config.crawler.document_bound, 10);
        assert_eq!(config.crawler.retry_backoff_ms, [100, 500]);
        assert_eq!(config.crawler.inter_request_delay_ms, [5, 50]);
        assert_eq!(
            config.crawler.media_extensions,
            vec![".jpg".to_string(), ".jpeg".to_string()]
        );
    }

    #[test]
    fn test_load_partial_config_fills_missing_sections() {
        let config_content = r#"
[crawler]
document-bound = 3
"#;
        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.document_bound, 3);
        assert_eq!(config.crawler.max_retries, 3);
        assert_eq!(config.http.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[crawler]
worker-pool-size = 0
"#;
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
