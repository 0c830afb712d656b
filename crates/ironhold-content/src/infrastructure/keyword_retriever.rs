//! In-memory lore retrieval ranked by query-term overlap.

use std::collections::BTreeSet;

use async_trait::async_trait;
use ironhold_core::error::DomainError;
use ironhold_core::lore::{LoreQuery, LoreRetriever, LoreSnippet};
use tracing::debug;

use crate::domain::lore::{LoreEntry, terms};

struct IndexedEntry {
    entry: LoreEntry,
    vocabulary: BTreeSet<String>,
}

/// Ranks lore entries by the share of query terms found in each entry's
/// title, tags, and content.
///
/// Entries sharing no term with the query are never returned. Ties keep
/// the authored order.
pub struct KeywordLoreRetriever {
    entries: Vec<IndexedEntry>,
}

impl KeywordLoreRetriever {
    /// Indexes `entries`.
    #[must_use]
    pub fn new(entries: Vec<LoreEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| {
                let text = format!("{} {} {}", entry.title, entry.tags.join(" "), entry.content);
                IndexedEntry {
                    vocabulary: terms(&text),
                    entry,
                }
            })
            .collect();
        Self { entries }
    }

    /// Number of indexed entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ranks entries for `query`, best first.
    #[must_use]
    pub fn rank(&self, query: &LoreQuery) -> Vec<LoreSnippet> {
        let wanted = terms(&query.text);
        if wanted.is_empty() || query.limit == 0 {
            return Vec::new();
        }

        #[allow(clippy::cast_precision_loss)]
        let total = wanted.len() as f64;

        let mut scored: Vec<LoreSnippet> = self
            .entries
            .iter()
            .filter(|indexed| indexed.entry.matches_tags(&query.tags))
            .filter_map(|indexed| {
                let hits = wanted.intersection(&indexed.vocabulary).count();
                #[allow(clippy::cast_precision_loss)]
                let score = hits as f64 / total;
                (hits > 0).then(|| indexed.entry.to_snippet(score))
            })
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(query.limit);
        scored
    }
}

#[async_trait]
impl LoreRetriever for KeywordLoreRetriever {
    async fn search(&self, query: &LoreQuery) -> Result<Vec<LoreSnippet>, DomainError> {
        let results = self.rank(query);
        debug!(query = %query.text, results = results.len(), "lore search");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lore::{action_query, location_query, npc_query, world_query};

    fn entry(id: &str, title: &str, content: &str, tags: &[&str], category: &str) -> LoreEntry {
        LoreEntry {
            id: id.to_owned(),
            title: title.to_owned(),
            content: content.to_owned(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            category: category.to_owned(),
        }
    }

    fn retriever() -> KeywordLoreRetriever {
        KeywordLoreRetriever::new(vec![
            entry(
                "world_bandit_problem",
                "The Rise of Banditry",
                "Bandits led by Grimjaw prey on travelers in the Dark Forest.",
                &["current_events", "bandits", "danger"],
                "world_lore",
            ),
            entry(
                "location_tavern_extended",
                "A Haven for Adventurers",
                "A warm hearth and a quest board kept by Marta.",
                &["location", "tavern"],
                "location_lore",
            ),
            entry(
                "npc_marta_past",
                "Marta's Adventuring Days",
                "Before keeping the tavern, Marta faced the Red Dragon.",
                &["npc", "marta", "backstory"],
                "npc_lore",
            ),
            entry(
                "world_kingdom_history",
                "The Kingdom of Ironhold",
                "Founded three centuries ago by King Aldric.",
                &["history", "kingdom"],
                "world_lore",
            ),
        ])
    }

    fn ids(snippets: &[LoreSnippet]) -> Vec<&str> {
        snippets.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_best_overlap_ranks_first() {
        let results = retriever().rank(&LoreQuery::new("marta tavern dragon", 5));

        // The backstory mentions all three terms, the tavern entry two.
        assert_eq!(ids(&results), vec!["npc_marta_past", "location_tavern_extended"]);
        assert!((results[0].score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_limit_and_no_match() {
        let retriever = retriever();

        assert_eq!(retriever.rank(&LoreQuery::new("marta tavern", 1)).len(), 1);
        assert!(retriever.rank(&LoreQuery::new("spaceship", 3)).is_empty());
        assert!(retriever.rank(&LoreQuery::new("a", 3)).is_empty());
    }

    #[test]
    fn test_tag_filter_restricts_results() {
        let results = retriever().rank(&npc_query("Marta", 2));
        assert_eq!(ids(&results), vec!["npc_marta_past"]);

        let results = retriever().rank(&location_query("tavern", 2));
        assert_eq!(ids(&results), vec!["location_tavern_extended"]);

        let results = retriever().rank(&world_query("kingdom history", 2));
        assert_eq!(ids(&results), vec!["world_kingdom_history"]);
    }

    #[tokio::test]
    async fn test_search_for_story_action() {
        let retriever = retriever();

        let results = retriever
            .search(&action_query("hunt the bandits", "dark_forest", 2))
            .await
            .unwrap();

        assert_eq!(ids(&results), vec!["world_bandit_problem"]);
        assert_eq!(retriever.len(), 4);
        assert!(!retriever.is_empty());
    }
}
