/// Decides whether a link on a listing page points at an item article
///
/// A link is accepted when its href starts with the article prefix, contains
/// no `.` (file and media pages always carry an extension), and is not one of
/// the floor's excluded articles.
#[derive(Debug, Clone)]
pub struct LinkFilter {
    article_prefix: String,
    exclusions: Vec<String>,
}

impl LinkFilter {
    pub fn new(article_prefix: impl Into<String>, exclusions: Vec<String>) -> Self {
        Self {
            article_prefix: article_prefix.into(),
            exclusions,
        }
    }

    /// Returns true if `href` should be followed
    pub fn accepts(&self, href: &str) -> bool {
        let href = href.trim();

        href.starts_with(&self.article_prefix)
            && !href.contains('.')
            && !self.exclusions.iter().any(|excluded| excluded == href)
    }
}
