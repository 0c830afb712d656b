//! New-game creation.

use ironhold_core::catalog::GameData;
use ironhold_core::config::GameConfig;
use ironhold_core::state::{TAVERN, WorldState};

/// Name given to players who do not provide one.
pub const DEFAULT_PLAYER_NAME: &str = "Adventurer";

/// Opening narrative when the tavern cannot be described.
pub const UNKNOWN_PLACE_NARRATIVE: &str = "You awaken in an unfamiliar place...";

/// Builds a fresh game in the tavern.
///
/// Health, max health, and gold come from `config`. The opening narrative
/// describes the tavern and its available actions, or falls back to
/// [`UNKNOWN_PLACE_NARRATIVE`] when no location data is loaded.
#[must_use]
pub fn new_game(player_name: &str, config: &GameConfig, data: Option<&GameData>) -> WorldState {
    let name = match player_name.trim() {
        "" => DEFAULT_PLAYER_NAME,
        trimmed => trimmed,
    };

    let mut state = WorldState::new_game(name, config.starting_health, config.starting_gold);
    state.last_output = data
        .and_then(|d| d.location(TAVERN))
        .map_or_else(|| UNKNOWN_PLACE_NARRATIVE.to_owned(), |tavern| tavern.arrival_text());
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhold_test_support::sample_game_data;

    #[test]
    fn test_new_game_uses_config_and_describes_tavern() {
        // Arrange
        let config = GameConfig {
            starting_health: 80,
            starting_gold: 15,
            ..GameConfig::default()
        };
        let data = sample_game_data();

        // Act
        let state = new_game("Aria", &config, Some(&data));

        // Assert
        assert_eq!(state.player_name, "Aria");
        assert_eq!(state.current_location, TAVERN);
        assert_eq!(state.health, 80);
        assert_eq!(state.max_health, 80);
        assert_eq!(state.gold, 15);
        assert_eq!(state.inventory, vec!["rusty_sword", "health_potion"]);
        assert!(state.last_output.starts_with("A warm hearth crackles"));
        assert!(state.last_output.contains("What would you like to do?\n- Talk to the tavern keeper"));
    }

    #[test]
    fn test_blank_name_defaults() {
        let state = new_game("   ", &GameConfig::default(), None);
        assert_eq!(state.player_name, DEFAULT_PLAYER_NAME);
    }

    #[test]
    fn test_missing_data_gives_unfamiliar_place() {
        let state = new_game("Aria", &GameConfig::default(), None);
        assert_eq!(state.last_output, UNKNOWN_PLACE_NARRATIVE);
        assert_eq!(state.health, 100);
        assert_eq!(state.gold, 50);
    }
}
