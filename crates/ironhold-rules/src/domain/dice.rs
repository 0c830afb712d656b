//! Dice and resolution primitives.
//!
//! Every function draws from an injected [`DeterministicRng`], so a scripted
//! sequence reproduces the same rolls. Roll order is part of the contract:
//! attack rolls draw their d20 (two with advantage) before any damage dice.

use ironhold_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};

/// The result of rolling several identical dice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceRoll {
    /// Sum of all dice.
    pub total: u32,
    /// Individual results in roll order.
    pub rolls: Vec<u32>,
}

/// Rolls `count` dice with `sides` faces each.
pub fn roll_dice(rng: &mut dyn DeterministicRng, sides: u32, count: u32) -> DiceRoll {
    let rolls: Vec<u32> = (0..count).map(|_| rng.next_u32_range(1, sides.max(1))).collect();
    DiceRoll {
        total: rolls.iter().sum(),
        rolls,
    }
}

/// Rolls a single twenty-sided die.
pub fn d20(rng: &mut dyn DeterministicRng) -> u32 {
    rng.next_u32_range(1, 20)
}

/// The result of a d20 skill check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCheck {
    /// Whether the total met the difficulty.
    pub success: bool,
    /// The unmodified die.
    pub natural: u32,
    /// Die plus modifier.
    pub total: i32,
    /// Human-readable summary.
    pub description: String,
}

/// Rolls d20 + `modifier` against `difficulty`.
#[allow(clippy::cast_possible_wrap)]
pub fn skill_check(rng: &mut dyn DeterministicRng, difficulty: i32, modifier: i32) -> SkillCheck {
    let natural = d20(rng);
    let total = natural as i32 + modifier;
    let success = total >= difficulty;

    let description = match natural {
        20 => "Critical Success! Natural 20!".to_owned(),
        1 => "Critical Failure! Natural 1!".to_owned(),
        _ if success => format!("Success! ({natural} + {modifier} = {total} vs DC {difficulty})"),
        _ => format!("Failure. ({natural} + {modifier} = {total} vs DC {difficulty})"),
    };

    SkillCheck {
        success,
        natural,
        total,
        description,
    }
}

/// The result of one attack roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    /// Whether the attack connects.
    pub hit: bool,
    /// Damage dealt; zero on a miss.
    pub damage: i32,
    /// The kept d20.
    pub natural: u32,
}

impl AttackRoll {
    /// A natural 20.
    #[must_use]
    pub fn is_critical(&self) -> bool {
        self.natural == 20
    }
}

/// Resolves one attack: d20 + attacker level against 10 + defender level.
///
/// A natural 20 always hits for 2d6 + twice the attacker level. A normal
/// hit deals 1d6 + attacker level. With `advantage`, two d20 are rolled and
/// the higher kept.
#[allow(clippy::cast_possible_wrap)]
pub fn combat_roll(
    rng: &mut dyn DeterministicRng,
    attacker_level: i32,
    defender_level: i32,
    advantage: bool,
) -> AttackRoll {
    let natural = if advantage {
        d20(rng).max(d20(rng))
    } else {
        d20(rng)
    };

    let defense = 10 + defender_level;
    let critical = natural == 20;
    let hit = critical || natural as i32 + attacker_level >= defense;

    let damage = if critical {
        roll_dice(rng, 6, 2).total as i32 + attacker_level * 2
    } else if hit {
        roll_dice(rng, 6, 1).total as i32 + attacker_level
    } else {
        0
    };

    AttackRoll {
        hit,
        damage,
        natural,
    }
}

/// Returns `true` with probability `chance`.
pub fn random_encounter_check(rng: &mut dyn DeterministicRng, chance: f64) -> bool {
    rng.next_f64() < chance
}

/// Loot tiers and their gold ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LootRarity {
    /// 1–10 gold.
    Common,
    /// 10–50 gold.
    Uncommon,
    /// 50–200 gold.
    Rare,
    /// 200–1000 gold.
    Legendary,
}

impl LootRarity {
    /// Parses a rarity name; anything unrecognised is common.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "uncommon" => Self::Uncommon,
            "rare" => Self::Rare,
            "legendary" => Self::Legendary,
            _ => Self::Common,
        }
    }

    /// Inclusive gold range.
    #[must_use]
    pub fn gold_range(self) -> (u32, u32) {
        match self {
            Self::Common => (1, 10),
            Self::Uncommon => (10, 50),
            Self::Rare => (50, 200),
            Self::Legendary => (200, 1000),
        }
    }
}

/// Rolls a gold amount for a loot drop.
pub fn loot_roll(rng: &mut dyn DeterministicRng, rarity: LootRarity) -> u32 {
    let (min, max) = rarity.gold_range();
    rng.next_u32_range(min, max)
}
