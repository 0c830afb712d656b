//! Dialogue & relationship resolver.

use ironhold_core::catalog::GameData;
use ironhold_core::error::DomainError;
use ironhold_core::narrative::{DialogueContext, NarrativeContext, NarrativeService};
use ironhold_core::state::{DialogueLine, MAX_CONVERSATION_HISTORY, WorldState, clamp_relationship};
use ironhold_core::update::{RelationshipChange, StateUpdate};
use tracing::{debug, warn};

use crate::domain::npc_match::identify_npc;

/// Number of recent dialogue lines handed to the narrative service.
pub const PROMPT_HISTORY_LINES: usize = 3;

/// Resolves one dialogue-path action.
///
/// The relationship score is clamped when it is updated, and the
/// conversation history is trimmed to the most recent entries. A failing
/// narrative service yields a "doesn't respond" line with no other changes.
///
/// # Errors
///
/// Returns `DomainError::DataUnavailable` if no NPC data is loaded.
pub async fn handle_dialogue(
    state: &WorldState,
    data: Option<&GameData>,
    narrator: &dyn NarrativeService,
) -> Result<StateUpdate, DomainError> {
    let data = data.ok_or_else(|| DomainError::DataUnavailable("npcs".to_owned()))?;

    let Some(npc) = identify_npc(data, &state.current_location, &state.current_action) else {
        return Ok(StateUpdate::narrative(
            "There's no one here to talk to. Try being more specific, like 'talk to the tavern keeper'.",
        ));
    };
    debug!(npc = %npc.key, "dialogue target identified");

    let relationship = state.relationship_with(&npc.name, npc.initial_relationship);
    let recent_start = state
        .conversation_history
        .len()
        .saturating_sub(PROMPT_HISTORY_LINES);

    let context = NarrativeContext::Dialogue(DialogueContext {
        npc: npc.clone(),
        player_name: state.player_name.clone(),
        location: state.current_location.clone(),
        action: state.current_action.clone(),
        relationship,
        history: state.conversation_history[recent_start..].to_vec(),
    });

    let reply = match narrator.generate(&context).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!(npc = %npc.key, error = %e, "narrative service failed during dialogue");
            return Ok(StateUpdate::narrative(format!("{} doesn't respond.", npc.name)));
        }
    };

    let mut history = state.conversation_history.clone();
    history.push(DialogueLine::new(
        state.player_name.clone(),
        state.current_action.clone(),
    ));
    history.push(DialogueLine::new(npc.name.clone(), reply.text.clone()));
    let overflow = history.len().saturating_sub(MAX_CONVERSATION_HISTORY);
    history.drain(..overflow);

    let score = clamp_relationship(i64::from(relationship).saturating_add(reply.relationship_change));

    Ok(StateUpdate {
        narrative: Some(format!("{}: \"{}\"", npc.name, reply.text)),
        relationship: Some(RelationshipChange {
            npc_name: npc.name.clone(),
            score,
        }),
        conversation_history: Some(history),
        quest_offered: reply.quest_offered.map(Into::into),
        ..StateUpdate::default()
    })
}
