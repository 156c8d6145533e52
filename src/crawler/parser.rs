//! HTML parsing for floor listings and item pages
//!
//! This module handles the two kinds of page the crawler reads:
//! - Floor listings, from which item links are collected (shelves and tables)
//! - Item pages, from which the title and acquisition block are read
//!
//! Nothing here fetches or validates; an unexpected layout simply yields empty
//! results and the caller decides what that means.

use crate::config::SkipOverrideEntry;
use crate::url::LinkFilter;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;

/// The main content region of a wiki article
const CONTENT_REGION: &str = ".mw-parser-output";

/// Layout a group of item links was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutShape {
    /// Bulleted lists directly under the content region, at most `max` of them
    Shelves { max: usize },
    /// Every `table.article-table` on the page
    Table,
}

/// An item link and the layout it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    pub href: String,
    pub shape: LayoutShape,
}

/// Raw fields read from an item page
///
/// Either field may be empty when the page did not have the expected layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPage {
    pub title: String,
    pub locations: Vec<String>,
}

/// Title-keyed sibling skips for pages with a non-standard layout
#[derive(Debug, Clone, Default)]
pub struct SkipOverrides {
    by_title: HashMap<String, usize>,
}

impl SkipOverrides {
    pub fn new(entries: &[SkipOverrideEntry]) -> Self {
        let by_title = entries
            .iter()
            .map(|entry| (entry.title.trim().to_string(), entry.extra_skip))
            .collect();
        Self { by_title }
    }

    /// Extra siblings to skip for a page titled `title`
    pub fn extra_skip(&self, title: &str) -> usize {
        self.by_title.get(title.trim()).copied().unwrap_or(0)
    }
}

/// Collects item links from one layout shape of a floor listing
///
/// Links are returned in document order: shelves top-to-bottom, then items,
/// then anchors within each item. Rejected hrefs are dropped silently.
pub fn collect_links(document: &Html, shape: LayoutShape, filter: &LinkFilter) -> Vec<LinkRef> {
    let hrefs = match shape {
        LayoutShape::Shelves { max } => shelf_hrefs(document, max),
        LayoutShape::Table => table_hrefs(document),
    };

    hrefs
        .into_iter()
        .filter(|href| filter.accepts(href))
        .map(|href| LinkRef {
            href: href.trim().to_string(),
            shape,
        })
        .collect()
}

fn shelf_hrefs(document: &Html, max: usize) -> Vec<String> {
    let (Ok(shelf_selector), Ok(anchor_selector)) = (
        Selector::parse(&format!("{} > ul", CONTENT_REGION)),
        Selector::parse("a[href]"),
    ) else {
        return Vec::new();
    };

    let mut hrefs = Vec::new();
    for shelf in document.select(&shelf_selector).take(max) {
        // Direct items only; nested lists belong to their own item
        for item in shelf
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|child| child.value().name() == "li")
        {
            hrefs.extend(
                item.select(&anchor_selector)
                    .filter_map(|a| a.value().attr("href"))
                    .map(str::to_string),
            );
        }
    }
    hrefs
}

fn table_hrefs(document: &Html) -> Vec<String> {
    let (Ok(table_selector), Ok(anchor_selector)) = (
        Selector::parse("table.article-table"),
        Selector::parse("td a[href], th a[href]"),
    ) else {
        return Vec::new();
    };

    // A nested article table is read as part of its outermost table
    document
        .select(&table_selector)
        .filter(|table| {
            !table
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|outer| table_selector.matches(&outer))
        })
        .flat_map(|table| table.select(&anchor_selector).collect::<Vec<_>>())
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Reads the title and locations from an item page
///
/// # Extraction Rules
///
/// 1. The title is the trimmed text of the first `h1`
/// 2. The acquisition block is the element right after the first `h2` in the
///    content region, moved further along by the title's override, if any
/// 3. If the block contains list items, each item's trimmed text is a location
/// 4. Otherwise the block's own trimmed text is the only location
///
/// # Example
///
/// ```
/// use shelf_scrape::crawler::{parse_item_page, SkipOverrides};
///
/// let html = r#"<h1>Tidal Almanac</h1>
///     <div class="mw-parser-output"><h2>Acquisition</h2><p>Sold in the harbor</p></div>"#;
/// let page = parse_item_page(html, &SkipOverrides::default());
/// assert_eq!(page.title, "Tidal Almanac");
/// assert_eq!(page.locations, vec!["Sold in the harbor"]);
/// ```
pub fn parse_item_page(html: &str, overrides: &SkipOverrides) -> ItemPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document).unwrap_or_default();
    let skip = overrides.extra_skip(&title);

    let locations = acquisition_block(&document, skip)
        .map(|block| extract_locations(&block))
        .unwrap_or_default();

    ItemPage { title, locations }
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;

    document
        .select(&selector)
        .next()
        .map(|heading| element_text(&heading))
}

fn acquisition_block(document: &Html, extra_skip: usize) -> Option<ElementRef<'_>> {
    let selector = Selector::parse(&format!("{} h2", CONTENT_REGION)).ok()?;
    let heading = document.select(&selector).next()?;

    heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .nth(extra_skip)
}

fn extract_locations(block: &ElementRef<'_>) -> Vec<String> {
    let items: Vec<String> = Selector::parse("li")
        .map(|selector| block.select(&selector).map(|li| element_text(&li)).collect())
        .unwrap_or_default();

    let locations = if items.is_empty() {
        vec![element_text(block)]
    } else {
        items
    };

    locations.into_iter().filter(|l| !l.is_empty()).collect()
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
