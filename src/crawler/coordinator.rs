//! Pipeline driver - runs every floor and gathers the books
//!
//! Floors are crawled one after another, never overlapped, so the output
//! order is always: every book of the first floor, then the second, then
//! the third.

use crate::book::Book;
use crate::config::{default_floors, default_skip_overrides, validate, Config};
use crate::crawler::extractor::RecordExtractor;
use crate::crawler::fetcher::{build_http_client, HttpFetcher, PageFetcher};
use crate::crawler::floor::{FloorCrawler, FloorSpec};
use crate::crawler::parser::SkipOverrides;
use crate::crawler::retry::RetryPolicy;
use crate::url::parse_base;
use crate::ShelfError;
use std::sync::Arc;
use std::time::Instant;

/// The whole crawl: floors in order, one shared crawler
pub struct Pipeline<F> {
    floors: Vec<FloorSpec>,
    crawler: FloorCrawler<F>,
}

impl Pipeline<HttpFetcher> {
    /// Builds the pipeline over HTTP for the compiled-in floors
    pub fn from_config(config: &Config) -> Result<Self, ShelfError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Self::new(config, HttpFetcher::new(client), default_floors())
    }
}

impl<F: PageFetcher> Pipeline<F> {
    /// Creates a pipeline over any page source
    ///
    /// `config` is validated first, so a hand-built config gets the same
    /// checks as one loaded from a file. Title overrides are the built-in ones
    /// plus those from `config`; a config entry replaces a built-in entry with
    /// the same title.
    pub fn new(config: &Config, fetcher: F, floors: Vec<FloorSpec>) -> Result<Self, ShelfError> {
        validate(config)?;

        let base = parse_base(&config.wiki.base_url)?;
        let policy = RetryPolicy::from_config(&config.crawler);

        let mut override_entries = default_skip_overrides();
        override_entries.extend(config.skip_overrides.iter().cloned());
        let overrides = SkipOverrides::new(&override_entries);

        let fetcher = Arc::new(fetcher);
        let extractor = RecordExtractor::new(Arc::clone(&fetcher), overrides, policy);
        let crawler = FloorCrawler::new(
            fetcher,
            extractor,
            base,
            config.wiki.article_prefix.as_str(),
            policy,
            config.crawler.max_concurrent_fetches as usize,
        );

        Ok(Self { floors, crawler })
    }

    pub fn floors(&self) -> &[FloorSpec] {
        &self.floors
    }

    /// Crawls every floor in order and concatenates their books
    ///
    /// Nothing is returned unless every floor succeeds.
    pub async fn run(&self) -> Result<Vec<Book>, ShelfError> {
        let start_time = Instant::now();
        let mut books = Vec::new();

        for floor in &self.floors {
            tracing::info!("Crawling {} ({})", floor.name, floor.path);
            let floor_books = self.crawler.crawl(floor).await?;
            tracing::info!("{}: {} books", floor.name, floor_books.len());
            books.extend(floor_books);
        }

        tracing::info!(
            "Crawl completed: {} books from {} floors in {:?}",
            books.len(),
            self.floors.len(),
            start_time.elapsed()
        );

        Ok(books)
    }
}

/// Runs a complete crawl against the configured wiki
pub async fn run_pipeline(config: &Config) -> Result<Vec<Book>, ShelfError> {
    Pipeline::from_config(config)?.run().await
}
