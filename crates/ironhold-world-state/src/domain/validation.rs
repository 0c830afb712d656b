//! End-of-turn state validation.
//!
//! Runs after every merge, whether or not the resolver succeeded, so
//! `turn_count` advances exactly once per action.

use ironhold_core::state::{MAX_CONVERSATION_HISTORY, WorldState};

/// Which fields had to be pulled back into range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corrections {
    /// Health was outside `0..=max_health`.
    pub health: bool,
    /// Gold was negative.
    pub gold: bool,
    /// Level was below 1.
    pub level: bool,
}

impl Corrections {
    /// Whether any field was changed.
    #[must_use]
    pub fn any(self) -> bool {
        self.health || self.gold || self.level
    }
}

/// Clamps vitals into range and advances the turn counter.
pub fn validate_state(state: &mut WorldState) -> Corrections {
    let mut corrections = Corrections::default();

    state.max_health = state.max_health.max(1);

    let health = state.health.clamp(0, state.max_health);
    corrections.health = health != state.health;
    state.health = health;

    if state.gold < 0 {
        state.gold = 0;
        corrections.gold = true;
    }

    if state.level < 1 {
        state.level = 1;
        corrections.level = true;
    }

    state.experience = state.experience.max(0);

    let overflow = state
        .conversation_history
        .len()
        .saturating_sub(MAX_CONVERSATION_HISTORY);
    state.conversation_history.drain(..overflow);

    state.turn_count += 1;
    corrections
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhold_core::state::DialogueLine;

    #[test]
    fn test_in_range_state_only_advances_turn() {
        let mut state = WorldState::new_game("Aria", 100, 50);

        let corrections = validate_state(&mut state);

        assert!(!corrections.any());
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.health, 100);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut state = WorldState::new_game("Aria", 100, 50);
        state.health = 250;
        state.gold = -40;
        state.level = 0;

        let corrections = validate_state(&mut state);

        assert_eq!(
            corrections,
            Corrections {
                health: true,
                gold: true,
                level: true
            }
        );
        assert_eq!(state.health, 100);
        assert_eq!(state.gold, 0);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_negative_health_floors_at_zero() {
        let mut state = WorldState::new_game("Aria", 100, 50);
        state.health = -12;

        validate_state(&mut state);

        assert_eq!(state.health, 0);
    }

    #[test]
    fn test_clamping_holds_for_any_sequence_of_values() {
        let mut state = WorldState::new_game("Aria", 100, 50);
        for (health, gold) in [(-5, -1), (101, 7), (i32::MAX, i64::MIN), (i32::MIN, 3)] {
            state.health = health;
            state.gold = gold;

            validate_state(&mut state);

            assert!((0..=state.max_health).contains(&state.health));
            assert!(state.gold >= 0);
        }
        assert_eq!(state.turn_count, 4);
    }

    #[test]
    fn test_history_keeps_most_recent_entries() {
        let mut state = WorldState::new_game("Aria", 100, 50);
        state.conversation_history = (0..13)
            .map(|i| DialogueLine::new("Aria", format!("line {i}")))
            .collect();

        validate_state(&mut state);

        assert_eq!(state.conversation_history.len(), MAX_CONVERSATION_HISTORY);
        assert_eq!(state.conversation_history[0].message, "line 3");
    }
}
