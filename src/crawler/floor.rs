//! Floor crawling: one listing page in, its books out
//!
//! Every floor is crawled by the same [`FloorCrawler`]; what differs between
//! floors (address, layout shapes, excluded links) lives in its [`FloorSpec`].

use crate::book::Book;
use crate::crawler::extractor::RecordExtractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{collect_links, LayoutShape, LinkRef};
use crate::crawler::retry::RetryPolicy;
use crate::url::{resolve_article, LinkFilter};
use crate::ShelfError;
use scraper::Html;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use url::Url;

/// One library floor and how its listing is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloorSpec {
    /// Display name, used in logs and errors
    pub name: String,

    /// Article path of the listing page
    pub path: String,

    /// Maximum number of shelf lists to read (0 = the floor has no shelves)
    pub shelves: usize,

    /// Whether the floor lists books in article tables
    pub table: bool,

    /// Article hrefs on this floor that are not books
    pub exclusions: Vec<String>,
}

impl FloorSpec {
    /// Layout shapes to collect, in output order: shelves first, then tables
    pub fn shapes(&self) -> Vec<LayoutShape> {
        let mut shapes = Vec::with_capacity(2);
        if self.shelves > 0 {
            shapes.push(LayoutShape::Shelves { max: self.shelves });
        }
        if self.table {
            shapes.push(LayoutShape::Table);
        }
        shapes
    }
}

/// Crawls floors: fetches the listing, then every book it links
///
/// Book pages of one floor are fetched concurrently, at most as many at once
/// as the semaphore has permits. The crawl waits for all of them before it
/// decides whether the floor produced anything.
pub struct FloorCrawler<F> {
    fetcher: Arc<F>,
    extractor: RecordExtractor<F>,
    base: Url,
    article_prefix: String,
    policy: RetryPolicy,
    slots: Arc<Semaphore>,
}

impl<F: PageFetcher> FloorCrawler<F> {
    pub fn new(
        fetcher: Arc<F>,
        extractor: RecordExtractor<F>,
        base: Url,
        article_prefix: impl Into<String>,
        policy: RetryPolicy,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            base,
            article_prefix: article_prefix.into(),
            policy,
            slots: Arc::new(Semaphore::new(max_concurrent_fetches)),
        }
    }

    /// Crawls one floor
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Book>)` - The floor's books, in link discovery order (never empty)
    /// * `Err(ShelfError::RetriesExhausted)` - The floor, or one of its books,
    ///   could not be read within the retry policy
    pub async fn crawl(&self, floor: &FloorSpec) -> Result<Vec<Book>, ShelfError> {
        let url = resolve_article(&self.base, &floor.path)?;
        self.policy
            .run(&floor.name, || self.crawl_once(floor, &url))
            .await
    }

    async fn crawl_once(&self, floor: &FloorSpec, url: &str) -> Result<Vec<Book>, ShelfError> {
        let html = self.fetcher.fetch(url).await?;
        let links = self.discover(floor, &html);

        let item_urls = links
            .iter()
            .map(|link| resolve_article(&self.base, &link.href))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::info!("{}: found {} book links", floor.name, item_urls.len());

        let books = self.extract_all(item_urls).await?;
        if books.is_empty() {
            return Err(ShelfError::Malformed {
                url: url.to_string(),
                reason: "no books found".to_string(),
            });
        }

        Ok(books)
    }

    /// Collects the floor's book links from every layout shape it uses
    pub fn discover(&self, floor: &FloorSpec, html: &str) -> Vec<LinkRef> {
        let document = Html::parse_document(html);
        let filter = LinkFilter::new(self.article_prefix.as_str(), floor.exclusions.clone());

        floor
            .shapes()
            .into_iter()
            .flat_map(|shape| collect_links(&document, shape, &filter))
            .collect()
    }

    async fn extract_all(&self, urls: Vec<String>) -> Result<Vec<Book>, ShelfError> {
        let handles: Vec<JoinHandle<Result<Book, ShelfError>>> = urls
            .into_iter()
            .map(|url| {
                let extractor = self.extractor.clone();
                let slots = Arc::clone(&self.slots);
                tokio::spawn(async move {
                    let _permit = slots.acquire_owned().await?;
                    extractor.extract(&url).await
                })
            })
            .collect();

        let mut books = Vec::with_capacity(handles.len());
        let mut pending = handles.into_iter();
        while let Some(handle) = pending.next() {
            let outcome = match handle.await {
                Ok(result) => result,
                Err(e) => Err(ShelfError::Join(e)),
            };

            match outcome {
                Ok(book) => books.push(book),
                Err(e) => {
                    pending.for_each(|rest| rest.abort());
                    return Err(e);
                }
            }
        }

        Ok(books)
    }
}
