//! Narrative service port.
//!
//! The narrative service turns a structured context into prose. Replies
//! are expected as JSON; anything else is used verbatim as the narrative
//! with no structured fields.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::NpcProfile;
use crate::error::DomainError;
use crate::state::{DialogueLine, Quest, QuestRewards};

/// Context for free-form story narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryContext {
    /// Current location key.
    pub location: String,
    /// The raw player action.
    pub action: String,
    /// Retrieved lore, already formatted for the prompt.
    pub lore: String,
}

/// Context for an NPC conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogueContext {
    /// The addressed NPC.
    pub npc: NpcProfile,
    /// Player name.
    pub player_name: String,
    /// Current location key.
    pub location: String,
    /// The raw player action.
    pub action: String,
    /// Current relationship score with the NPC.
    pub relationship: i32,
    /// The most recent dialogue lines (at most three).
    pub history: Vec<DialogueLine>,
}

/// Structured input handed to the narrative service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NarrativeContext {
    /// Narrate the outcome of a free-form action.
    Story(StoryContext),
    /// Speak as an NPC.
    Dialogue(DialogueContext),
}

/// Narrative tone hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Combat and important moments.
    Dramatic,
    /// Discoveries and strange encounters.
    Mysterious,
    /// Friendly interactions.
    Casual,
    /// Fights.
    Combat,
    /// Quiet scenes.
    Peaceful,
    /// Anything the service invents.
    #[serde(other)]
    Other,
}

/// A quest an NPC offers during dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestOffer {
    /// Stable quest identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Objectives to complete.
    #[serde(default)]
    pub objectives: Vec<String>,
    /// Rewards on completion.
    #[serde(default)]
    pub rewards: QuestRewards,
}

impl QuestOffer {
    /// Builds an offer from a bare quest name, as services often reply with.
    #[must_use]
    pub fn named(name: &str) -> Self {
        let id = name
            .trim()
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_");
        Self {
            id,
            name: name.trim().to_owned(),
            description: String::new(),
            objectives: vec![name.trim().to_owned()],
            rewards: QuestRewards::default(),
        }
    }
}

impl From<QuestOffer> for Quest {
    fn from(offer: QuestOffer) -> Self {
        Quest::new(
            offer.id,
            offer.name,
            offer.description,
            offer.objectives,
            offer.rewards,
        )
    }
}

/// What the narrative service said.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NarrativeReply {
    /// The primary text: narration or NPC dialogue.
    pub text: String,
    /// Suggested next actions.
    pub suggested_actions: Vec<String>,
    /// Relationship delta requested by an NPC reply. Unbounded; callers
    /// clamp the resulting score.
    pub relationship_change: i64,
    /// Tone hint.
    pub tone: Option<Tone>,
    /// Quest offered by an NPC.
    pub quest_offered: Option<QuestOffer>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OfferField {
    Detailed(QuestOffer),
    Named(String),
}

impl NarrativeReply {
    /// A reply with only text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Decodes raw service output.
    ///
    /// A JSON object contributes its `dialogue` or `narrative` text and
    /// whatever structured fields it carries. Fields that are missing, null,
    /// or of the wrong type are treated as absent. Output that is not a JSON
    /// object, or has no text field, is used verbatim as the text.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw.trim()) else {
            return Self::text(raw);
        };

        let text_field = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
        let Some(text) = text_field("dialogue").or_else(|| text_field("narrative")) else {
            return Self::text(raw);
        };

        Self {
            text,
            suggested_actions: fields
                .get("suggested_actions")
                .and_then(Value::as_array)
                .map(|actions| {
                    actions
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default(),
            relationship_change: fields
                .get("relationship_change")
                .map_or(0, relationship_delta),
            tone: fields
                .get("tone")
                .and_then(|tone| Tone::deserialize(tone).ok()),
            quest_offered: fields.get("quest_offered").and_then(quest_offer),
        }
    }
}

/// Reads a relationship delta from an integer, a float (truncated), or a
/// numeric string. Out-of-range values saturate.
#[allow(clippy::cast_possible_truncation)]
fn relationship_delta(value: &Value) -> i64 {
    if let Some(delta) = value.as_i64() {
        return delta;
    }
    if value.is_u64() {
        return i64::MAX;
    }
    let float = value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse::<f64>().ok()));
    // Float-to-int `as` saturates and maps NaN to zero.
    float.map_or(0, |f| f.trunc() as i64)
}

fn quest_offer(value: &Value) -> Option<QuestOffer> {
    match OfferField::deserialize(value).ok()? {
        OfferField::Detailed(offer) => Some(offer),
        OfferField::Named(name) if !name.trim().is_empty() => Some(QuestOffer::named(&name)),
        OfferField::Named(_) => None,
    }
}

/// Generates narrative text from structured context.
#[async_trait]
pub trait NarrativeService: Send + Sync {
    /// Produces a reply for the given context.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Narrative` if the service cannot be reached or
    /// fails to answer.
    async fn generate(&self, context: &NarrativeContext) -> Result<NarrativeReply, DomainError>;
}
