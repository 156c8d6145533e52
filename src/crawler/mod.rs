//! Crawler module for floor and book page processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `PageFetcher` seam
//! - HTML parsing, link collection and record extraction
//! - Capped retry with exponential backoff
//! - Bounded concurrent extraction per floor
//! - Overall pipeline coordination

mod coordinator;
mod extractor;
mod fetcher;
mod floor;
mod parser;
mod retry;

#[cfg(test)]
mod testing;

pub use coordinator::{run_pipeline, Pipeline};
pub use extractor::RecordExtractor;
pub use fetcher::{build_http_client, fetch_url, HttpFetcher, PageFetcher};
pub use floor::{FloorCrawler, FloorSpec};
pub use parser::{collect_links, parse_item_page, ItemPage, LayoutShape, LinkRef, SkipOverrides};
pub use retry::RetryPolicy;
