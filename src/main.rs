//! Shelf-Scrape main entry point
//!
//! This is the command-line interface for the Shelf-Scrape book locator.

use clap::Parser;
use shelf_scrape::config::{default_floors, load_config_with_hash, Config};
use shelf_scrape::crawler::run_pipeline;
use shelf_scrape::output::{write_books, write_books_to_path};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Scrape: a book locator for wiki library floors
///
/// Crawls every library floor, reads each book's page, and prints one JSON
/// array of `{ "title", "locations" }` objects to standard output.
#[derive(Parser, Debug)]
#[command(name = "shelf-scrape")]
#[command(version)]
#[command(about = "Collects book locations from the library floor wiki pages", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Write the JSON to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the floors without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the JSON
    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config, &cli).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scrape=info,warn"),
            1 => EnvFilter::new("shelf_scrape=debug,info"),
            2 => EnvFilter::new("shelf_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Shelf-Scrape Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );
    println!("  Max attempts: {}", config.crawler.max_attempts);
    println!(
        "  Backoff: {}ms doubling up to {}ms",
        config.crawler.base_delay_ms, config.crawler.max_delay_ms
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent: {}", config.user_agent.header_value());
    println!("\nWiki: {}", config.wiki.base_url);

    let floors = default_floors();
    println!("\nFloors ({}):", floors.len());
    for floor in &floors {
        println!("  - {} ({})", floor.name, floor.path);
        if floor.shelves > 0 {
            println!("    * up to {} shelves", floor.shelves);
        }
        if floor.table {
            println!("    * article tables");
        }
        for excluded in &floor.exclusions {
            println!("    * skips {}", excluded);
        }
    }

    if !config.skip_overrides.is_empty() {
        println!("\nExtra title overrides ({}):", config.skip_overrides.len());
        for entry in &config.skip_overrides {
            println!("  - {} (skip {})", entry.title, entry.extra_skip);
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Crawling {}", config.wiki.base_url);

    let books = match run_pipeline(config).await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    let pretty = cli.pretty || config.output.pretty;
    match &cli.output {
        Some(path) => {
            write_books_to_path(&books, path, pretty)?;
            tracing::info!("Wrote {} books to {}", books.len(), path.display());
        }
        None => write_books(&books, std::io::stdout().lock(), pretty)?,
    }

    Ok(())
}
