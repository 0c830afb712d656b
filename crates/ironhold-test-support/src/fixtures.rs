//! Game data fixtures mirroring the shipped `data/` tables.

use ironhold_core::catalog::{GameData, Location, NpcProfile};

fn location(key: &str, name: &str, description: &str, actions: &[&str], connections: &[&str]) -> Location {
    Location {
        key: key.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        available_actions: actions.iter().map(|a| (*a).to_owned()).collect(),
        connections: connections.iter().map(|c| (*c).to_owned()).collect(),
    }
}

fn npc(key: &str, name: &str, location: &str, initial_relationship: i32) -> NpcProfile {
    NpcProfile {
        key: key.to_owned(),
        name: name.to_owned(),
        personality: format!("{name} personality."),
        backstory: format!("{name} backstory."),
        location: Some(location.to_owned()),
        initial_relationship,
    }
}

/// Six locations and five NPCs: one NPC in the tavern, two in the forest,
/// none in the town square.
#[must_use]
pub fn sample_game_data() -> GameData {
    GameData::new(
        vec![
            location(
                "tavern",
                "The Red Dragon Tavern",
                "A warm hearth crackles beneath a mounted dragon scale.",
                &["Talk to the tavern keeper", "Rest by the fire", "Check the quest board"],
                &["town_square", "dark_forest"],
            ),
            location(
                "town_square",
                "Town Square",
                "Cobblestones and a dry fountain.",
                &["Visit the market", "Walk to the castle"],
                &["tavern", "castle", "market"],
            ),
            location(
                "market",
                "The Market",
                "Stalls crowd a narrow street.",
                &["Talk to the merchant"],
                &["town_square"],
            ),
            location(
                "castle",
                "Ironhold Castle",
                "Thick walls and watchful towers.",
                &["Speak with the guard"],
                &["town_square"],
            ),
            location(
                "dark_forest",
                "The Dark Forest",
                "Mist clings to the roots of ancient trees.",
                &["Search for the guardian", "Head back to the tavern"],
                &["tavern", "ancient_ruins"],
            ),
            location(
                "ancient_ruins",
                "Ancient Ruins",
                "Broken pillars older than the kingdom.",
                &["Explore the ruins"],
                &["dark_forest"],
            ),
        ],
        vec![
            npc("tavern_keeper", "Marta the Tavern Keeper", "tavern", 10),
            npc("castle_guard", "Captain Borin", "castle", 0),
            npc("merchant", "Tobias the Merchant", "market", 0),
            npc("forest_guardian", "Elara Moonwhisper", "dark_forest", -10),
            npc("bandit_leader", "Grimjaw", "dark_forest", -50),
        ],
    )
}
