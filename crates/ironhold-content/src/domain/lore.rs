//! Lore entries and the queries the game asks of them.

use std::collections::BTreeSet;

use ironhold_core::lore::{LoreQuery, LoreSnippet};
use serde::{Deserialize, Serialize};

/// One authored piece of world lore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreEntry {
    /// Unique id, e.g. `world_bandit_problem`.
    pub id: String,
    /// Display title.
    pub title: String,
    /// The lore text.
    pub content: String,
    /// Free-form tags used for filtering.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Broad grouping: `world_lore`, `location_lore`, `npc_lore`, `item_lore`.
    #[serde(default)]
    pub category: String,
}

impl LoreEntry {
    /// Whether the entry passes a tag filter. An empty filter passes
    /// everything; the category counts as a tag.
    #[must_use]
    pub fn matches_tags(&self, tags: &[String]) -> bool {
        tags.is_empty()
            || tags
                .iter()
                .any(|wanted| *wanted == self.category || self.tags.contains(wanted))
    }

    /// Converts to a retrieval result with the given score.
    #[must_use]
    pub fn to_snippet(&self, score: f64) -> LoreSnippet {
        LoreSnippet {
            id: self.id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
            score,
        }
    }
}

const STOP_WORDS: &[&str] = &[
    "about", "and", "are", "for", "from", "has", "her", "his", "information", "into", "its", "that",
    "the", "their", "this", "was", "with", "you", "your",
];

/// Lower-cased search terms of `text`: alphanumeric runs of three or more
/// characters, minus stop words.
#[must_use]
pub fn terms(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| word.chars().count() >= 3)
        .map(str::to_lowercase)
        .filter(|word| !STOP_WORDS.contains(&word.as_str()))
        .collect()
}

/// Lore about a place.
#[must_use]
pub fn location_query(location: &str, limit: usize) -> LoreQuery {
    LoreQuery::new(
        format!("information about {location} location setting description"),
        limit,
    )
    .with_tags(&["location"])
}

/// Lore about a character.
#[must_use]
pub fn npc_query(npc_name: &str, limit: usize) -> LoreQuery {
    LoreQuery::new(format!("information about {npc_name} backstory personality"), limit)
        .with_tags(&["npc"])
}

/// Lore about an object.
#[must_use]
pub fn item_query(item: &str, limit: usize) -> LoreQuery {
    LoreQuery::new(format!("information about {item} history properties"), limit)
        .with_tags(&["item"])
}

/// Lore relevant to something the player does somewhere.
#[must_use]
pub fn action_query(action: &str, location: &str, limit: usize) -> LoreQuery {
    LoreQuery::new(format!("{action} at {location}"), limit)
}

/// History and world background on a topic.
#[must_use]
pub fn world_query(topic: &str, limit: usize) -> LoreQuery {
    LoreQuery::new(topic, limit).with_tags(&["history", "world_lore"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tags: &[&str], category: &str) -> LoreEntry {
        LoreEntry {
            id: "x".to_owned(),
            title: "X".to_owned(),
            content: "Text.".to_owned(),
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            category: category.to_owned(),
        }
    }

    #[test]
    fn test_terms_drop_short_and_stop_words() {
        let found = terms("Information about the Dark Forest, at dusk!");
        let expected: BTreeSet<String> = ["dark", "dusk", "forest"].iter().map(|s| (*s).to_owned()).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_tag_filter_accepts_category() {
        let lore = entry(&["dragon"], "world_lore");

        assert!(lore.matches_tags(&[]));
        assert!(lore.matches_tags(&["world_lore".to_owned()]));
        assert!(lore.matches_tags(&["npc".to_owned(), "dragon".to_owned()]));
        assert!(!lore.matches_tags(&["item".to_owned()]));
    }

    #[test]
    fn test_convenience_queries_carry_filters() {
        assert_eq!(location_query("tavern", 2).tags, vec!["location"]);
        assert_eq!(npc_query("Marta", 2).tags, vec!["npc"]);
        assert_eq!(item_query("amulet", 1).limit, 1);
        assert!(action_query("look around", "tavern", 3).tags.is_empty());
        assert_eq!(action_query("look around", "tavern", 3).text, "look around at tavern");
        assert_eq!(world_query("dragon", 2).tags, vec!["history", "world_lore"]);
    }
}
