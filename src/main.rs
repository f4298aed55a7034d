//! Site-Harvester command-line entry point

use anyhow::Context;
use clap::Parser;
use site_harvester::config::{load_config, Config};
use site_harvester::crawler::crawl;
use site_harvester::output::{print_report, write_documents};
use site_harvester::url::site_domain_of;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Site-Harvester: bounded single-site content crawler
///
/// Crawls one site from a seed URL, classifies every link it discovers,
/// extracts heading-scoped text from internal pages, and writes the
/// collected documents as JSON once the document bound is reached.
#[derive(Parser, Debug)]
#[command(name = "site-harvester")]
#[command(version)]
#[command(about = "Crawl one site and extract heading-scoped text documents", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from (absolute, http or https)
    #[arg(value_name = "SEED_URL")]
    seed: String,

    /// Path to TOML configuration file (defaults apply without one)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured documents output path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seed and show the crawl plan without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(output) = &cli.output {
        config.output.documents_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&cli.seed, &config)
    } else {
        handle_crawl(&cli.seed, config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_harvester=info,warn"),
            1 => EnvFilter::new("site_harvester=debug,info"),
            2 => EnvFilter::new("site_harvester=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: validates the seed and prints the crawl plan
fn handle_dry_run(seed: &str, config: &Config) -> anyhow::Result<()> {
    let url = Url::parse(seed).with_context(|| format!("invalid seed URL '{}'", seed))?;
    let domain = site_domain_of(&url)
        .with_context(|| format!("seed URL '{}' has no host", seed))?;

    println!("=== Site-Harvester Dry Run ===\n");

    println!("Seed URL: {}", url);
    println!("Site domain: {}", domain);

    println!("\nCrawler:");
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Worker pool size: {}", config.crawler.worker_pool_size);
    println!("  Document bound: {}", config.crawler.document_bound);
    println!(
        "  Retry backoff: {}-{}ms",
        config.crawler.retry_backoff_ms[0], config.crawler.retry_backoff_ms[1]
    );
    println!(
        "  Inter-request delay: {}-{}ms",
        config.crawler.inter_request_delay_ms[0], config.crawler.inter_request_delay_ms[1]
    );
    println!(
        "  Media extensions: {}",
        config.crawler.media_extensions.join(", ")
    );

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Request timeout: {}s", config.http.request_timeout_secs);
    println!(
        "  Pool max idle per host: {}",
        config.http.pool_max_idle_per_host
    );

    println!("\nOutput:");
    println!("  Documents: {}", config.output.documents_path);

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} until {} documents are extracted", domain, config.crawler.document_bound);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(seed: &str, config: Config) -> anyhow::Result<()> {
    let documents_path = PathBuf::from(&config.output.documents_path);

    let report = crawl(seed, config).await?;

    write_documents(&documents_path, &report.documents)
        .with_context(|| format!("failed to write output to {}", documents_path.display()))?;

    print_report(&report);

    Ok(())
}
