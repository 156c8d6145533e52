//! Configuration module for Shelf-Scrape
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and holds the compiled-in floor table.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-scrape.toml")).unwrap();
//! println!("Retrying each page up to {} times", config.crawler.max_attempts);
//! ```

mod floors;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, OutputConfig, SkipOverrideEntry, UserAgentConfig, WikiConfig,
};

pub use floors::{default_floors, default_skip_overrides};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};

pub use validation::validate;
