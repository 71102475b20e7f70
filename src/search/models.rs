//! Search result type

use serde::{Deserialize, Serialize};

/// A single search result: canonical article title, one-paragraph summary,
/// and the desktop page URL (possibly empty).
///
/// Constructed per query from transient API responses and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl SearchResult {
    /// Create a new result
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            url: url.into(),
        }
    }

    /// Markdown body written when this result is saved as a note
    pub fn note_body(&self) -> String {
        format!(
            "{}\n\n[Read more on Wikipedia]({})\n\n---\n\n",
            self.summary, self.url
        )
    }
}
