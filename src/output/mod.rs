//! Output module for writing the crawl result
//!
//! The result is a single JSON array of books written in one go, so a failed
//! crawl never leaves partial output behind.

use crate::book::Book;
use crate::ShelfError;
use std::io::Write;
use std::path::Path;

/// Serializes `books` as a JSON array followed by a newline
///
/// # Example
///
/// ```
/// use shelf_scrape::output::write_books;
/// use shelf_scrape::Book;
///
/// let books = vec![Book::new("Tidal Almanac", vec!["Harbor".into()]).unwrap()];
/// let mut out = Vec::new();
/// write_books(&books, &mut out, false).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "[{\"title\":\"Tidal Almanac\",\"locations\":[\"Harbor\"]}]\n"
/// );
/// ```
pub fn write_books<W: Write>(books: &[Book], mut writer: W, pretty: bool) -> Result<(), ShelfError> {
    let json = render_books(books, pretty)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Renders `books` as a JSON array
pub fn render_books(books: &[Book], pretty: bool) -> Result<String, ShelfError> {
    let json = if pretty {
        serde_json::to_string_pretty(books)?
    } else {
        serde_json::to_string(books)?
    };
    Ok(json)
}

/// Writes the books to a file, replacing any previous content
pub fn write_books_to_path(books: &[Book], path: &Path, pretty: bool) -> Result<(), ShelfError> {
    let json = render_books(books, pretty)?;
    std::fs::write(path, format!("{}\n", json))?;
    Ok(())
}
