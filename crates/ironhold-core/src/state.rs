//! The persistent world state and its records.
//!
//! `WorldState` is owned by the turn pipeline for the duration of a turn
//! and serialized wholesale by the persistence collaborator between turns.
//! Resolvers only ever see `&WorldState` and describe their changes as a
//! [`StateUpdate`](crate::update::StateUpdate).

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location key of the tavern: the starting point, the only place to rest,
/// and where defeated players respawn.
pub const TAVERN: &str = "tavern";

/// Maximum number of dialogue lines retained in the conversation history.
pub const MAX_CONVERSATION_HISTORY: usize = 10;

/// Lowest possible relationship score.
pub const RELATIONSHIP_MIN: i32 = -100;

/// Highest possible relationship score.
pub const RELATIONSHIP_MAX: i32 = 100;

/// Clamps a relationship score into `[RELATIONSHIP_MIN, RELATIONSHIP_MAX]`.
#[must_use]
pub fn clamp_relationship(score: i64) -> i32 {
    let clamped = score.clamp(i64::from(RELATIONSHIP_MIN), i64::from(RELATIONSHIP_MAX));
    // In range after the clamp above.
    i32::try_from(clamped).unwrap_or(0)
}

/// One line of recorded dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    /// Who spoke.
    pub speaker: String,
    /// What was said.
    pub message: String,
}

impl DialogueLine {
    /// Creates a dialogue line.
    #[must_use]
    pub fn new(speaker: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            message: message.into(),
        }
    }
}

/// Lifecycle of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    /// Accepted, no objective completed yet.
    Started,
    /// At least one objective completed.
    InProgress,
    /// Every objective completed.
    Completed,
    /// Abandoned or failed.
    Failed,
}

impl QuestStatus {
    /// Upper-case label used in the quest log.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Started => "STARTED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }
}

/// Gold and experience granted when a quest completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRewards {
    /// Gold reward.
    #[serde(default)]
    pub gold: i64,
    /// Experience reward.
    #[serde(default)]
    pub experience: i64,
}

/// A quest record in the player's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    /// Stable quest identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description shown in the log.
    #[serde(default)]
    pub description: String,
    /// Every objective of the quest, in order.
    pub objectives: Vec<String>,
    /// The subset of `objectives` already completed.
    #[serde(default)]
    pub objectives_completed: Vec<String>,
    /// Current status.
    pub status: QuestStatus,
    /// Rewards granted on completion.
    #[serde(default)]
    pub rewards: QuestRewards,
}

impl Quest {
    /// Creates a freshly started quest.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        objectives: Vec<String>,
        rewards: QuestRewards,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            objectives,
            objectives_completed: Vec::new(),
            status: QuestStatus::Started,
            rewards,
        }
    }
}

/// An in-progress fight. Exists only while a combat session is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSession {
    /// Enemy display name.
    pub enemy_name: String,
    /// Enemy level, used for attack and defense rolls.
    pub enemy_level: i32,
    /// Remaining enemy health.
    pub enemy_health: i32,
    /// Enemy health at the start of the fight.
    pub enemy_max_health: i32,
}

/// The single mutable aggregate describing one player's game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    /// Player name, fixed at creation.
    pub player_name: String,
    /// Key into the location graph.
    pub current_location: String,
    /// Current health, `0..=max_health` after validation.
    pub health: i32,
    /// Maximum health, always positive.
    pub max_health: i32,
    /// Gold, never negative after validation.
    pub gold: i64,
    /// Character level, at least 1.
    pub level: i32,
    /// Accumulated experience.
    pub experience: i64,
    /// Item identifiers in pickup order; duplicates are separate entries.
    pub inventory: Vec<String>,
    /// Equipped weapon, referencing an inventory item.
    pub equipped_weapon: Option<String>,
    /// Equipped armor, referencing an inventory item.
    pub equipped_armor: Option<String>,
    /// Active and recently finished quests.
    #[serde(default)]
    pub quest_log: Vec<Quest>,
    /// Ids of archived completed quests.
    #[serde(default)]
    pub completed_quests: BTreeSet<String>,
    /// NPC display name to relationship score in `[-100, 100]`.
    #[serde(default)]
    pub relationships: BTreeMap<String, i32>,
    /// The most recent dialogue lines, oldest first.
    #[serde(default)]
    pub conversation_history: Vec<DialogueLine>,
    /// Notable world happenings.
    #[serde(default)]
    pub world_events: Vec<String>,
    /// The open combat session, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub combat: Option<CombatSession>,
    /// Free-form cross-turn flags.
    #[serde(default)]
    pub world_flags: BTreeMap<String, bool>,
    /// Number of resolved actions.
    #[serde(default)]
    pub turn_count: u64,
    /// Narrative produced by the most recent turn.
    #[serde(default)]
    pub last_output: String,
    /// Raw input of the turn being resolved.
    #[serde(default)]
    pub current_action: String,
    /// When the state was last written by the persistence collaborator.
    #[serde(default)]
    pub last_save_time: Option<DateTime<Utc>>,
}

impl WorldState {
    /// Creates the fixed new-game state: tavern start, two starting items,
    /// sword equipped.
    #[must_use]
    pub fn new_game(player_name: impl Into<String>, starting_health: i32, starting_gold: i64) -> Self {
        Self {
            player_name: player_name.into(),
            current_location: TAVERN.to_owned(),
            health: starting_health,
            max_health: starting_health,
            gold: starting_gold,
            level: 1,
            experience: 0,
            inventory: vec!["rusty_sword".to_owned(), "health_potion".to_owned()],
            equipped_weapon: Some("rusty_sword".to_owned()),
            equipped_armor: None,
            quest_log: Vec::new(),
            completed_quests: BTreeSet::new(),
            relationships: BTreeMap::new(),
            conversation_history: Vec::new(),
            world_events: Vec::new(),
            combat: None,
            world_flags: BTreeMap::new(),
            turn_count: 0,
            last_output: String::new(),
            current_action: String::new(),
            last_save_time: None,
        }
    }

    /// Current relationship with an NPC, or `initial` if they have never spoken.
    #[must_use]
    pub fn relationship_with(&self, npc_name: &str, initial: i32) -> i32 {
        self.relationships.get(npc_name).copied().unwrap_or(initial)
    }

    /// Whether a combat session is open.
    #[must_use]
    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    /// Whether the player is out of health.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}
