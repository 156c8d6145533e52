//! URL handling module for Shelf-Scrape
//!
//! This module decides which links on a listing page are item articles and
//! turns accepted links into absolute URLs on the wiki.

mod filter;

pub use filter::LinkFilter;

use crate::UrlError;
use url::Url;

/// Parses the wiki base URL
///
/// Only HTTP and HTTPS are accepted.
pub fn parse_base(base: &str) -> Result<Url, UrlError> {
    let url = Url::parse(base).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    Ok(url)
}

/// Joins an article href onto the wiki base URL
///
/// # Examples
///
/// ```
/// use shelf_scrape::url::{parse_base, resolve_article};
///
/// let base = parse_base("https://lorelibrary.fandom.com").unwrap();
/// let url = resolve_article(&base, "/wiki/Tidal_Almanac").unwrap();
/// assert_eq!(url, "https://lorelibrary.fandom.com/wiki/Tidal_Almanac");
/// ```
pub fn resolve_article(base: &Url, href: &str) -> Result<String, UrlError> {
    base.join(href.trim())
        .map(String::from)
        .map_err(|_| UrlError::Join {
            base: base.to_string(),
            href: href.to_string(),
        })
}
