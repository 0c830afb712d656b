//! Field-level state deltas returned by resolvers.
//!
//! A resolver never mutates the world state directly. It returns a
//! `StateUpdate` naming only the fields it wants changed; the pipeline
//! merges it into the state before running validation.

use crate::state::{CombatSession, DialogueLine, Quest, WorldState};

/// How a resolver wants the combat session changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatUpdate {
    /// Open or continue the session with this snapshot.
    Persist(CombatSession),
    /// Close the session entirely.
    Clear,
}

/// A new relationship score for one NPC, already clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipChange {
    /// NPC display name.
    pub npc_name: String,
    /// The clamped score.
    pub score: i32,
}

/// Partial set of field updates produced by one resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateUpdate {
    /// Narrative text for this turn.
    pub narrative: Option<String>,
    /// New health value (unclamped; validation clamps).
    pub health: Option<i32>,
    /// New gold value.
    pub gold: Option<i64>,
    /// New experience total.
    pub experience: Option<i64>,
    /// New location key.
    pub current_location: Option<String>,
    /// Replacement inventory.
    pub inventory: Option<Vec<String>>,
    /// Replacement weapon slot.
    pub equipped_weapon: Option<Option<String>>,
    /// Replacement armor slot.
    pub equipped_armor: Option<Option<String>>,
    /// Relationship score change.
    pub relationship: Option<RelationshipChange>,
    /// Replacement conversation history, already trimmed.
    pub conversation_history: Option<Vec<DialogueLine>>,
    /// Combat session transition.
    pub combat: Option<CombatUpdate>,
    /// A quest offered during dialogue, started by the pipeline.
    pub quest_offered: Option<Quest>,
}

impl StateUpdate {
    /// An update carrying only narrative text.
    #[must_use]
    pub fn narrative(text: impl Into<String>) -> Self {
        Self {
            narrative: Some(text.into()),
            ..Self::default()
        }
    }

    /// Sets the health field.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = Some(health);
        self
    }

    /// Sets the gold field.
    #[must_use]
    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = Some(gold);
        self
    }

    /// Sets the experience field.
    #[must_use]
    pub fn with_experience(mut self, experience: i64) -> Self {
        self.experience = Some(experience);
        self
    }

    /// Sets the location field.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.current_location = Some(location.into());
        self
    }

    /// Replaces the inventory.
    #[must_use]
    pub fn with_inventory(mut self, inventory: Vec<String>) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Sets the combat transition.
    #[must_use]
    pub fn with_combat(mut self, combat: CombatUpdate) -> Self {
        self.combat = Some(combat);
        self
    }

    /// Merges every field except `quest_offered` into `state`.
    ///
    /// Quest offers need quest-log rules and are taken out by the pipeline
    /// before merging.
    pub fn apply_to(self, state: &mut WorldState) {
        if let Some(narrative) = self.narrative {
            state.last_output = narrative;
        }
        if let Some(health) = self.health {
            state.health = health;
        }
        if let Some(gold) = self.gold {
            state.gold = gold;
        }
        if let Some(experience) = self.experience {
            state.experience = experience;
        }
        if let Some(location) = self.current_location {
            state.current_location = location;
        }
        if let Some(inventory) = self.inventory {
            state.inventory = inventory;
        }
        if let Some(weapon) = self.equipped_weapon {
            state.equipped_weapon = weapon;
        }
        if let Some(armor) = self.equipped_armor {
            state.equipped_armor = armor;
        }
        if let Some(change) = self.relationship {
            state.relationships.insert(change.npc_name, change.score);
        }
        if let Some(history) = self.conversation_history {
            state.conversation_history = history;
        }
        match self.combat {
            Some(CombatUpdate::Persist(session)) => state.combat = Some(session),
            Some(CombatUpdate::Clear) => state.combat = None,
            None => {}
        }
    }
}
