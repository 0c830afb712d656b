//! Test lore retrievers.

use std::sync::Mutex;

use async_trait::async_trait;
use ironhold_core::error::DomainError;
use ironhold_core::lore::{LoreQuery, LoreRetriever, LoreSnippet};

/// A retriever that returns a fixed list (truncated to the query limit) and
/// records every query.
#[derive(Debug, Default)]
pub struct StaticLoreRetriever {
    snippets: Vec<LoreSnippet>,
    queries: Mutex<Vec<LoreQuery>>,
}

impl StaticLoreRetriever {
    /// Create a retriever over `contents`, ranked in the given order.
    #[must_use]
    pub fn new(contents: &[&str]) -> Self {
        let snippets = contents
            .iter()
            .enumerate()
            .map(|(i, content)| LoreSnippet {
                id: format!("lore_{i}"),
                title: format!("Lore {i}"),
                content: (*content).to_owned(),
                score: 1.0,
            })
            .collect();
        Self {
            snippets,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A retriever that never finds anything.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every query received.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn queries(&self) -> Vec<LoreQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoreRetriever for StaticLoreRetriever {
    async fn search(&self, query: &LoreQuery) -> Result<Vec<LoreSnippet>, DomainError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.snippets.iter().take(query.limit).cloned().collect())
    }
}

/// A retriever whose backing store is always down.
#[derive(Debug)]
pub struct FailingLoreRetriever;

#[async_trait]
impl LoreRetriever for FailingLoreRetriever {
    async fn search(&self, _query: &LoreQuery) -> Result<Vec<LoreSnippet>, DomainError> {
        Err(DomainError::Infrastructure("index unavailable".into()))
    }
}
