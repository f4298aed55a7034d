//! Configuration module for Site-Harvester
//!
//! Configuration is loaded from an optional TOML file and validated before
//! a crawl starts. Every field carries a default.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig};
pub use validation::validate;
