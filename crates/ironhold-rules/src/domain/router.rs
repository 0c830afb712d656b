//! Intent routing.
//!
//! Rules run in a fixed priority order and the first match wins. Keyword
//! sets overlap ("give 5 gold to the keeper" mentions an NPC), so the order
//! below is load-bearing.

use std::fmt;

use ironhold_core::state::TAVERN;
use serde::{Deserialize, Serialize};

/// The resolver a turn is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPath {
    /// Combat exchange or flee attempt.
    Combat,
    /// Conversation with an identified NPC.
    Dialogue,
    /// Movement along the location graph.
    Travel,
    /// Gold, items, and resting.
    Inventory,
    /// Free-form narration.
    Story,
}

impl ResolutionPath {
    /// Stable lowercase label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Combat => "combat",
            Self::Dialogue => "dialogue",
            Self::Travel => "travel",
            Self::Inventory => "inventory",
            Self::Story => "story",
        }
    }
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const GIVE_KEYWORDS: &[&str] = &[
    "give", "tip", "donate", "pay", "offer", "here's", "here is", "take", "have",
];
const CURRENCY_KEYWORDS: &[&str] = &["gold", "coin", "money"];
const REST_KEYWORDS: &[&str] = &["rest", "heal", "sleep", "recover"];
const TALK_KEYWORDS: &[&str] = &["talk", "speak", "ask", "tell", "greet", "chat"];
const COMBAT_KEYWORDS: &[&str] = &[
    "attack", "fight", "combat", "challenge", "punch", "hit", "strike",
];
const TRAVEL_KEYWORDS: &[&str] = &["go to", "travel", "walk", "head", "move", "visit", "leave"];
const USE_KEYWORDS: &[&str] = &["use", "drink", "eat", "equip"];
const CHECK_KEYWORDS: &[&str] = &["inventory", "check items", "show items"];

/// Names and aliases that make a conversational action a dialogue.
pub const KNOWN_NPC_ALIASES: &[&str] = &[
    "keeper", "marta", "guard", "borin", "elara", "guardian", "merchant", "tobias", "bandit",
    "grimjaw",
];

/// Words that ask to break off an open fight.
pub const FLEE_KEYWORDS: &[&str] = &["flee", "run away", "retreat", "escape"];

/// Words that end the session when they appear in an action.
const QUIT_KEYWORDS: &[&str] = &["quit", "exit"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Classifies an action into exactly one resolution path.
///
/// Matching is by substring on the case-folded text, so short keywords also
/// fire inside longer words ("have" inside "behave").
#[must_use]
pub fn route_action(action: &str, current_location: &str) -> ResolutionPath {
    let text = action.to_lowercase();

    let giving = contains_any(&text, GIVE_KEYWORDS);
    let mentions_money =
        contains_any(&text, CURRENCY_KEYWORDS) || text.chars().any(|c| c.is_ascii_digit());
    if giving && mentions_money {
        return ResolutionPath::Inventory;
    }

    if contains_any(&text, REST_KEYWORDS) {
        return if current_location == TAVERN {
            ResolutionPath::Inventory
        } else {
            ResolutionPath::Story
        };
    }

    if contains_any(&text, TALK_KEYWORDS) {
        return if contains_any(&text, KNOWN_NPC_ALIASES) {
            ResolutionPath::Dialogue
        } else {
            ResolutionPath::Story
        };
    }

    if contains_any(&text, COMBAT_KEYWORDS) {
        return ResolutionPath::Combat;
    }

    if contains_any(&text, TRAVEL_KEYWORDS) {
        return ResolutionPath::Travel;
    }

    if contains_any(&text, USE_KEYWORDS) || contains_any(&text, CHECK_KEYWORDS) {
        return ResolutionPath::Inventory;
    }

    ResolutionPath::Story
}

/// Whether the action asks to break off a fight.
#[must_use]
pub fn is_flee_request(action: &str) -> bool {
    contains_any(&action.to_lowercase(), FLEE_KEYWORDS)
}

/// Routes a turn, sending flee requests to combat while a fight is open.
///
/// Outside a fight this is exactly [`route_action`].
#[must_use]
pub fn route_turn(action: &str, current_location: &str, in_combat: bool) -> ResolutionPath {
    if in_combat && is_flee_request(action) {
        return ResolutionPath::Combat;
    }
    route_action(action, current_location)
}

/// Whether the session carries on after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continuation {
    /// Keep taking actions.
    Continue,
    /// The player is out of health or asked to stop.
    End,
}

/// Ends the session when health is gone or the action asks to quit.
#[must_use]
pub fn should_continue(health: i32, action: &str) -> Continuation {
    if health <= 0 || contains_any(&action.to_lowercase(), QUIT_KEYWORDS) {
        Continuation::End
    } else {
        Continuation::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_give_gold_beats_talk_rule() {
        assert_eq!(
            route_action("give 5 gold to the keeper", "tavern"),
            ResolutionPath::Inventory
        );
        assert_eq!(
            route_action("Pay the merchant some coin", "market"),
            ResolutionPath::Inventory
        );
    }

    #[test]
    fn test_give_without_money_is_not_inventory_by_rule_one() {
        // No currency or digit: falls through to the talk rule.
        assert_eq!(
            route_action("offer to talk with the keeper", "tavern"),
            ResolutionPath::Dialogue
        );
    }

    #[test]
    fn test_substring_keywords_fire_inside_words() {
        // "have" hides in "behave", "10" supplies the digit.
        assert_eq!(
            route_action("behave for 10 minutes", "castle"),
            ResolutionPath::Inventory
        );
    }

    #[test]
    fn test_rest_depends_on_location() {
        assert_eq!(route_action("rest at the tavern", "tavern"), ResolutionPath::Inventory);
        assert_eq!(route_action("rest under a tree", "dark_forest"), ResolutionPath::Story);
    }

    #[test]
    fn test_talk_needs_a_known_name() {
        assert_eq!(route_action("talk to Marta", "tavern"), ResolutionPath::Dialogue);
        assert_eq!(route_action("talk to the stranger", "tavern"), ResolutionPath::Story);
    }

    #[test]
    fn test_combat_travel_and_items() {
        assert_eq!(route_action("attack the bandit", "dark_forest"), ResolutionPath::Combat);
        assert_eq!(route_action("go to the town square", "tavern"), ResolutionPath::Travel);
        assert_eq!(route_action("drink mana potion", "castle"), ResolutionPath::Inventory);
        assert_eq!(route_action("check items", "tavern"), ResolutionPath::Inventory);
        assert_eq!(route_action("look around", "tavern"), ResolutionPath::Story);
    }

    #[test]
    fn test_heal_matches_inside_health() {
        // "health" contains "heal", so potion names trip the rest rule.
        assert_eq!(route_action("drink health potion", "tavern"), ResolutionPath::Inventory);
        assert_eq!(route_action("drink health potion", "castle"), ResolutionPath::Story);
    }

    #[test]
    fn test_route_is_case_insensitive() {
        assert_eq!(route_action("ATTACK!", "tavern"), ResolutionPath::Combat);
    }

    #[test]
    fn test_flee_routes_to_combat_only_during_a_fight() {
        assert_eq!(route_turn("flee", "dark_forest", false), ResolutionPath::Story);
        assert_eq!(route_turn("Run away!", "dark_forest", true), ResolutionPath::Combat);
        assert_eq!(
            route_turn("go to the tavern", "dark_forest", true),
            ResolutionPath::Travel
        );
    }

    #[test]
    fn test_should_continue() {
        assert_eq!(should_continue(10, "look around"), Continuation::Continue);
        assert_eq!(should_continue(0, "look around"), Continuation::End);
        assert_eq!(should_continue(50, "Quit the game"), Continuation::End);
        assert_eq!(should_continue(50, "exit"), Continuation::End);
    }

    #[test]
    fn test_path_labels() {
        assert_eq!(ResolutionPath::Inventory.to_string(), "inventory");
        assert_eq!(
            serde_json::to_string(&ResolutionPath::Dialogue).unwrap(),
            "\"dialogue\""
        );
    }
}
