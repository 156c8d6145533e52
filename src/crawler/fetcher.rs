//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - The `PageFetcher` seam the extractor and floor crawler fetch through
//! - Building the HTTP client with a proper user agent string
//! - Mapping transport failures and non-success statuses to errors
//!
//! Retrying is not done here; a failed fetch is one failed attempt and the
//! retry policy decides what happens next.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::ShelfError;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::time::Duration;

/// Source of raw page text
///
/// Implemented over HTTP by [`HttpFetcher`]; tests substitute in-memory pages.
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetches the document at `url` and returns its body
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, ShelfError>> + Send;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use shelf_scrape::config::{CrawlerConfig, UserAgentConfig};
/// use shelf_scrape::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches pages with a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ShelfError> {
        fetch_url(&self.client, url).await
    }
}

/// Fetches a URL and returns its body
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx | `Ok(body)` |
/// | Any other status | `HttpStatus` |
/// | Timeout, connection or body error | `Http` |
pub async fn fetch_url(client: &Client, url: &str) -> Result<String, ShelfError> {
    let response = client.get(url).send().await.map_err(|source| ShelfError::Http {
        url: url.to_string(),
        source,
    })?;

    let status = response.status();
    if !status.is_success() {
        if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::debug!("Rate limited by server on {}", url);
        }
        return Err(ShelfError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| ShelfError::Http {
        url: url.to_string(),
        source,
    })
}
