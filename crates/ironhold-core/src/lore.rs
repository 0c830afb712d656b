//! Lore retrieval port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Placeholder handed to the narrative service when no lore was found.
pub const NO_LORE: &str = "No specific lore available.";

/// A ranked retrieval request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoreQuery {
    /// Free-text query.
    pub text: String,
    /// Only entries carrying at least one of these tags; empty means any.
    pub tags: Vec<String>,
    /// Maximum number of results.
    pub limit: usize,
}

impl LoreQuery {
    /// A query with no tag filter.
    #[must_use]
    pub fn new(text: impl Into<String>, limit: usize) -> Self {
        Self {
            text: text.into(),
            tags: Vec::new(),
            limit,
        }
    }

    /// Restricts results to entries carrying one of `tags`.
    #[must_use]
    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| (*t).to_owned()).collect();
        self
    }
}

/// One retrieved piece of lore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreSnippet {
    /// Entry identifier.
    pub id: String,
    /// Entry title.
    pub title: String,
    /// Entry text.
    pub content: String,
    /// Relevance score; higher is better.
    pub score: f64,
}

/// Ranked retrieval over world lore. An empty result is a valid answer.
#[async_trait]
pub trait LoreRetriever: Send + Sync {
    /// Returns up to `query.limit` snippets, best first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backing store fails.
    async fn search(&self, query: &LoreQuery) -> Result<Vec<LoreSnippet>, DomainError>;
}

/// Joins snippet contents for a prompt, truncating to `max_chars`.
///
/// An empty list yields [`NO_LORE`].
#[must_use]
pub fn format_lore(snippets: &[LoreSnippet], max_chars: usize) -> String {
    if snippets.is_empty() {
        return NO_LORE.to_owned();
    }

    let combined = snippets
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    if combined.chars().count() > max_chars {
        let truncated: String = combined.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(content: &str) -> LoreSnippet {
        LoreSnippet {
            id: "x".to_owned(),
            title: "X".to_owned(),
            content: content.to_owned(),
            score: 1.0,
        }
    }

    #[test]
    fn test_format_lore_empty_uses_placeholder() {
        assert_eq!(format_lore(&[], 500), NO_LORE);
    }

    #[test]
    fn test_format_lore_joins_with_blank_line() {
        let text = format_lore(&[snippet("One."), snippet("Two.")], 500);
        assert_eq!(text, "One.\n\nTwo.");
    }

    #[test]
    fn test_format_lore_truncates() {
        let text = format_lore(&[snippet("abcdefghij")], 4);
        assert_eq!(text, "abcd...");
    }

    #[test]
    fn test_query_builder() {
        let query = LoreQuery::new("bandits", 2).with_tags(&["npc", "danger"]);
        assert_eq!(query.tags, vec!["npc", "danger"]);
        assert_eq!(query.limit, 2);
    }
}
