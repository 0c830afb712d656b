//! Combat resolver.
//!
//! Reconstructs the fight from `WorldState::combat`, runs exactly one
//! transition, and describes the result as a `StateUpdate`. The session is
//! cleared on every resolved outcome so it can never be left dangling.

use ironhold_core::rng::DeterministicRng;
use ironhold_core::state::{TAVERN, WorldState};
use ironhold_core::update::{CombatUpdate, StateUpdate};
use tracing::debug;

use crate::domain::combat::{
    CombatOutcome, Exchange, VICTORY_EXPERIENCE, VICTORY_GOLD, attack_exchange, flee_attempt,
    start_session,
};
use crate::domain::router::is_flee_request;

/// Resolves one combat-path action against the current state.
pub fn handle_combat(state: &WorldState, rng: &mut dyn DeterministicRng) -> StateUpdate {
    let fleeing = is_flee_request(&state.current_action);

    let (exchange, opening) = match &state.combat {
        None if fleeing => {
            return StateUpdate::narrative("There is nothing to flee from.");
        }
        None => {
            let session = start_session();
            let opening = format!("Combat begins! You face a {}!\n\n", session.enemy_name);
            debug!(enemy = %session.enemy_name, "combat session opened");
            (
                attack_exchange(&session, state.level, state.health, rng),
                opening,
            )
        }
        Some(session) if session.enemy_health <= 0 => {
            debug!(enemy = %session.enemy_name, "clearing stale combat session");
            return StateUpdate::narrative(format!(
                "The {} is already defeated.",
                session.enemy_name
            ))
            .with_combat(CombatUpdate::Clear);
        }
        Some(session) if fleeing => (
            flee_attempt(session, state.level, state.health, rng),
            String::new(),
        ),
        Some(session) => (
            attack_exchange(session, state.level, state.health, rng),
            String::new(),
        ),
    };

    into_update(state, exchange, &opening)
}

fn into_update(state: &WorldState, exchange: Exchange, opening: &str) -> StateUpdate {
    let Exchange {
        outcome,
        player_health,
        narrative,
    } = exchange;
    let update = StateUpdate::narrative(format!("{opening}{narrative}"));

    match outcome {
        CombatOutcome::Ongoing(session) => {
            debug!(enemy_health = session.enemy_health, player_health, "combat continues");
            update
                .with_health(player_health)
                .with_combat(CombatUpdate::Persist(session))
        }
        CombatOutcome::Victory => {
            debug!("combat resolved: victory");
            update
                .with_gold(state.gold + VICTORY_GOLD)
                .with_experience(state.experience + VICTORY_EXPERIENCE)
                .with_combat(CombatUpdate::Clear)
        }
        CombatOutcome::Defeat => {
            debug!("combat resolved: defeat");
            update
                .with_health(0)
                .with_location(TAVERN)
                .with_combat(CombatUpdate::Clear)
        }
        CombatOutcome::Fled => {
            debug!("combat resolved: fled");
            update.with_combat(CombatUpdate::Clear)
        }
    }
}
