//! Static game data: the location graph and the NPC roster.
//!
//! Records are validated once at the loading boundary (see the content
//! crate). Tables keep the order they were authored in, because travel
//! and dialogue lookups take the first match.

use serde::{Deserialize, Serialize};

/// A node in the location graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Table key, e.g. `dark_forest`.
    #[serde(default)]
    pub key: String,
    /// Display name, e.g. `The Dark Forest`.
    pub name: String,
    /// Prose shown on arrival.
    pub description: String,
    /// Suggested actions listed on arrival.
    #[serde(default)]
    pub available_actions: Vec<String>,
    /// Keys of directly reachable locations.
    #[serde(default)]
    pub connections: Vec<String>,
}

impl Location {
    /// Whether `key` is listed as directly reachable from here.
    #[must_use]
    pub fn connects_to(&self, key: &str) -> bool {
        self.connections.iter().any(|c| c == key)
    }

    /// Description followed by the bulleted action list.
    #[must_use]
    pub fn arrival_text(&self) -> String {
        let actions = self
            .available_actions
            .iter()
            .map(|a| format!("- {a}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n\nWhat would you like to do?\n{actions}", self.description)
    }
}

/// A non-player character profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcProfile {
    /// Table key, e.g. `tavern_keeper`.
    #[serde(default)]
    pub key: String,
    /// Display name, e.g. `Marta the Tavern Keeper`.
    pub name: String,
    /// Personality summary handed to the narrative service.
    pub personality: String,
    /// Backstory handed to the narrative service.
    pub backstory: String,
    /// Location key where the NPC can be found.
    #[serde(default)]
    pub location: Option<String>,
    /// Relationship score before the first conversation.
    #[serde(default)]
    pub initial_relationship: i32,
}

/// Validated location and NPC tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameData {
    locations: Vec<Location>,
    npcs: Vec<NpcProfile>,
}

impl GameData {
    /// Builds the tables from already-validated records.
    #[must_use]
    pub fn new(locations: Vec<Location>, npcs: Vec<NpcProfile>) -> Self {
        Self { locations, npcs }
    }

    /// All locations in authored order.
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All NPCs in authored order.
    #[must_use]
    pub fn npcs(&self) -> &[NpcProfile] {
        &self.npcs
    }

    /// Looks up a location by key.
    #[must_use]
    pub fn location(&self, key: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.key == key)
    }

    /// Looks up an NPC by key.
    #[must_use]
    pub fn npc(&self, key: &str) -> Option<&NpcProfile> {
        self.npcs.iter().find(|n| n.key == key)
    }

    /// NPCs stationed at `location`, in authored order.
    pub fn npcs_at<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a NpcProfile> + 'a {
        self.npcs
            .iter()
            .filter(move |n| n.location.as_deref() == Some(location))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(key: &str, connections: &[&str]) -> Location {
        Location {
            key: key.to_owned(),
            name: key.to_owned(),
            description: format!("The {key}."),
            available_actions: vec!["Look around".to_owned(), "Rest".to_owned()],
            connections: connections.iter().map(|c| (*c).to_owned()).collect(),
        }
    }

    #[test]
    fn test_connects_to() {
        let tavern = location("tavern", &["town_square", "dark_forest"]);
        assert!(tavern.connects_to("dark_forest"));
        assert!(!tavern.connects_to("castle"));
    }

    #[test]
    fn test_arrival_text_lists_actions() {
        let tavern = location("tavern", &[]);
        assert_eq!(
            tavern.arrival_text(),
            "The tavern.\n\nWhat would you like to do?\n- Look around\n- Rest"
        );
    }

    #[test]
    fn test_npcs_at_filters_by_location() {
        let npc = |key: &str, loc: Option<&str>| NpcProfile {
            key: key.to_owned(),
            name: key.to_owned(),
            personality: String::new(),
            backstory: String::new(),
            location: loc.map(str::to_owned),
            initial_relationship: 0,
        };
        let data = GameData::new(
            vec![location("tavern", &[])],
            vec![
                npc("tavern_keeper", Some("tavern")),
                npc("castle_guard", Some("castle")),
                npc("wanderer", None),
            ],
        );

        let here: Vec<&str> = data.npcs_at("tavern").map(|n| n.key.as_str()).collect();
        assert_eq!(here, vec!["tavern_keeper"]);
        assert!(data.npc("castle_guard").is_some());
        assert!(data.location("castle").is_none());
    }
}
