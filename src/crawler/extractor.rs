//! Record extraction for single item pages

use crate::book::Book;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{parse_item_page, SkipOverrides};
use crate::crawler::retry::RetryPolicy;
use crate::ShelfError;
use std::sync::Arc;

/// Turns an item page URL into a [`Book`]
///
/// Each attempt fetches and parses the page from scratch. An attempt whose
/// page has no title or no locations counts as a corrupted fetch and is
/// retried like a transport failure.
pub struct RecordExtractor<F> {
    fetcher: Arc<F>,
    overrides: Arc<SkipOverrides>,
    policy: RetryPolicy,
}

impl<F> Clone for RecordExtractor<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            overrides: Arc::clone(&self.overrides),
            policy: self.policy,
        }
    }
}

impl<F: PageFetcher> RecordExtractor<F> {
    pub fn new(fetcher: Arc<F>, overrides: SkipOverrides, policy: RetryPolicy) -> Self {
        Self {
            fetcher,
            overrides: Arc::new(overrides),
            policy,
        }
    }

    /// Extracts the book at `url`, retrying per the policy
    ///
    /// # Returns
    ///
    /// * `Ok(Book)` - A book with a title and at least one location
    /// * `Err(ShelfError::RetriesExhausted)` - Every attempt failed
    pub async fn extract(&self, url: &str) -> Result<Book, ShelfError> {
        let book = self.policy.run(url, || self.extract_once(url)).await?;
        tracing::debug!(
            "Extracted '{}' ({} locations) from {}",
            book.title(),
            book.locations().len(),
            url
        );
        Ok(book)
    }

    async fn extract_once(&self, url: &str) -> Result<Book, ShelfError> {
        let html = self.fetcher.fetch(url).await?;
        let page = parse_item_page(&html, &self.overrides);

        let reason = if page.title.is_empty() {
            "no title"
        } else {
            "no locations"
        };

        Book::new(&page.title, page.locations).ok_or_else(|| ShelfError::Malformed {
            url: url.to_string(),
            reason: reason.to_string(),
        })
    }
}
