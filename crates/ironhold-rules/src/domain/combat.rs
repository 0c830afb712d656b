//! Combat session state machine.
//!
//! A session moves `Not-Started -> Active -> Resolved(Victory | Defeat | Fled)`.
//! Each transition is a pure function of the current session snapshot, the
//! player's vitals, and the dice; nothing survives between calls except
//! the [`CombatSession`] the caller persists.

use std::fmt::Write as _;

use ironhold_core::rng::DeterministicRng;
use ironhold_core::state::CombatSession;

use super::dice::{combat_roll, skill_check};

/// Enemy faced when a fight starts.
pub const DEFAULT_ENEMY_NAME: &str = "Bandit";
/// Level of the default enemy.
pub const DEFAULT_ENEMY_LEVEL: i32 = 2;
/// Starting health of the default enemy.
pub const DEFAULT_ENEMY_HEALTH: i32 = 30;
/// Gold granted on victory.
pub const VICTORY_GOLD: i64 = 30;
/// Experience granted on victory.
pub const VICTORY_EXPERIENCE: i64 = 50;

/// How an exchange left the fight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The fight goes on with this enemy snapshot.
    Ongoing(CombatSession),
    /// The enemy fell.
    Victory,
    /// The player fell.
    Defeat,
    /// The player got away.
    Fled,
}

impl CombatOutcome {
    /// Whether the session is closed.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Ongoing(_))
    }
}

/// The result of one combat transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Where the session stands afterwards.
    pub outcome: CombatOutcome,
    /// Player health after the exchange, never below zero.
    pub player_health: i32,
    /// What happened, line by line.
    pub narrative: String,
}

/// Opens a session against the default enemy.
#[must_use]
pub fn start_session() -> CombatSession {
    CombatSession {
        enemy_name: DEFAULT_ENEMY_NAME.to_owned(),
        enemy_level: DEFAULT_ENEMY_LEVEL,
        enemy_health: DEFAULT_ENEMY_HEALTH,
        enemy_max_health: DEFAULT_ENEMY_HEALTH,
    }
}

/// One full round: the player attacks, and if the enemy survives it
/// strikes back.
pub fn attack_exchange(
    session: &CombatSession,
    player_level: i32,
    player_health: i32,
    rng: &mut dyn DeterministicRng,
) -> Exchange {
    let mut narrative = String::new();
    let mut enemy = session.clone();

    let attack = combat_roll(rng, player_level, enemy.enemy_level, false);
    if attack.hit {
        enemy.enemy_health -= attack.damage;
        if attack.is_critical() {
            narrative.push_str("CRITICAL HIT! You strike with devastating force!\n");
        }
        let _ = writeln!(
            narrative,
            "You hit the {} for {} damage! (rolled {})",
            enemy.enemy_name, attack.damage, attack.natural
        );

        if enemy.enemy_health <= 0 {
            let _ = write!(
                narrative,
                "\nThe {} falls defeated!\nVictory! You gained {VICTORY_GOLD} gold and {VICTORY_EXPERIENCE} experience!",
                enemy.enemy_name
            );
            return Exchange {
                outcome: CombatOutcome::Victory,
                player_health,
                narrative,
            };
        }

        let _ = writeln!(
            narrative,
            "Enemy Health: {}/{}",
            enemy.enemy_health, enemy.enemy_max_health
        );
    } else {
        let _ = writeln!(narrative, "You miss! (rolled {})", attack.natural);
    }

    enemy_retaliation(enemy, player_level, player_health, rng, narrative)
}

/// A flee check: d20 + player level against 10 + enemy level.
///
/// On failure the enemy gets a free retaliation.
pub fn flee_attempt(
    session: &CombatSession,
    player_level: i32,
    player_health: i32,
    rng: &mut dyn DeterministicRng,
) -> Exchange {
    let check = skill_check(rng, 10 + session.enemy_level, player_level);

    if check.success {
        return Exchange {
            outcome: CombatOutcome::Fled,
            player_health,
            narrative: format!(
                "You escape from the {}! (rolled {})",
                session.enemy_name, check.natural
            ),
        };
    }

    let narrative = format!("You fail to escape! (rolled {})\n", check.natural);
    enemy_retaliation(session.clone(), player_level, player_health, rng, narrative)
}

/// The enemy's attack, closing the session if the player falls.
fn enemy_retaliation(
    enemy: CombatSession,
    player_level: i32,
    player_health: i32,
    rng: &mut dyn DeterministicRng,
    mut narrative: String,
) -> Exchange {
    let strike = combat_roll(rng, enemy.enemy_level, player_level, false);

    if !strike.hit {
        let _ = write!(narrative, "The {} misses!", enemy.enemy_name);
        return Exchange {
            outcome: CombatOutcome::Ongoing(enemy),
            player_health,
            narrative,
        };
    }

    let _ = write!(
        narrative,
        "The {} strikes back for {} damage!",
        enemy.enemy_name, strike.damage
    );
    let remaining = (player_health - strike.damage).max(0);

    if remaining == 0 {
        narrative.push_str("\n\nYou have been defeated...");
        return Exchange {
            outcome: CombatOutcome::Defeat,
            player_health: 0,
            narrative,
        };
    }

    Exchange {
        outcome: CombatOutcome::Ongoing(enemy),
        player_health: remaining,
        narrative,
    }
}
