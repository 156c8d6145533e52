//! The book record emitted by the crawl

use serde::Serialize;

/// One book and the places it can be found
///
/// A `Book` always has a non-empty title and at least one non-empty location.
/// The only way to build one is [`Book::new`], which refuses anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    title: String,
    locations: Vec<String>,
}

impl Book {
    /// Builds a book from extracted text
    ///
    /// The title and every location are trimmed; blank locations are dropped.
    /// Returns `None` if the title is blank or no location survives.
    ///
    /// # Example
    ///
    /// ```
    /// use shelf_scrape::Book;
    ///
    /// let book = Book::new(" Tidal Almanac ", vec!["Shelf 3".into(), "  ".into()]).unwrap();
    /// assert_eq!(book.title(), "Tidal Almanac");
    /// assert_eq!(book.locations(), ["Shelf 3"]);
    ///
    /// assert!(Book::new("", vec!["Shelf 3".into()]).is_none());
    /// assert!(Book::new("Tidal Almanac", vec![]).is_none());
    /// ```
    pub fn new(title: impl AsRef<str>, locations: Vec<String>) -> Option<Self> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return None;
        }

        let locations: Vec<String> = locations
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        if locations.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            locations,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }
}
