//! Story resolver: free-form narration grounded in retrieved lore.

use ironhold_core::lore::{LoreQuery, LoreRetriever, format_lore};
use ironhold_core::narrative::{NarrativeContext, NarrativeService, StoryContext};
use ironhold_core::state::WorldState;
use ironhold_core::update::StateUpdate;
use tracing::warn;

/// Lore snippets fetched per story turn.
pub const STORY_LORE_RESULTS: usize = 2;

/// Character budget for lore in the story prompt.
pub const STORY_LORE_CHARS: usize = 500;

/// Narrates one story-path action.
///
/// Retrieval failures are treated as "no lore"; a failing narrative service
/// falls back to a plain restatement of the action.
pub async fn handle_story(
    state: &WorldState,
    narrator: &dyn NarrativeService,
    lore: &dyn LoreRetriever,
) -> StateUpdate {
    let action = &state.current_action;
    let location = &state.current_location;

    let query = LoreQuery::new(format!("{action} at {location}"), STORY_LORE_RESULTS);
    let snippets = lore.search(&query).await.unwrap_or_else(|e| {
        warn!(error = %e, "lore retrieval failed; narrating without lore");
        Vec::new()
    });

    let context = NarrativeContext::Story(StoryContext {
        location: location.clone(),
        action: action.clone(),
        lore: format_lore(&snippets, STORY_LORE_CHARS),
    });

    match narrator.generate(&context).await {
        Ok(reply) => StateUpdate::narrative(reply.text),
        Err(e) => {
            warn!(error = %e, "narrative service failed during story");
            StateUpdate::narrative(format!("You {action} at {location}."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhold_core::lore::NO_LORE;
    use ironhold_test_support::{
        FailingLoreRetriever, FailingNarrativeService, ScriptedNarrativeService, StaticLoreRetriever,
    };

    fn state_with(action: &str) -> WorldState {
        let mut state = WorldState::new_game("Aria", 100, 50);
        state.current_action = action.to_owned();
        state
    }

    fn sent_lore(narrator: &ScriptedNarrativeService) -> String {
        match &narrator.contexts()[0] {
            NarrativeContext::Story(story) => story.lore.clone(),
            NarrativeContext::Dialogue(_) => panic!("expected a story context"),
        }
    }

    #[tokio::test]
    async fn test_story_uses_structured_narrative() {
        // Arrange
        let state = state_with("look around");
        let narrator = ScriptedNarrativeService::always(
            r#"{"narrative": "Smoke curls from the hearth.", "suggested_actions": ["Sit down"]}"#,
        );
        let lore = StaticLoreRetriever::new(&["The tavern is old.", "Marta runs it.", "Unused."]);

        // Act
        let update = handle_story(&state, &narrator, &lore).await;

        // Assert
        assert_eq!(update.narrative.as_deref(), Some("Smoke curls from the hearth."));
        assert_eq!(lore.queries()[0].text, "look around at tavern");
        assert_eq!(lore.queries()[0].limit, 2);
        assert_eq!(sent_lore(&narrator), "The tavern is old.\n\nMarta runs it.");
    }

    #[tokio::test]
    async fn test_malformed_reply_is_used_verbatim() {
        let state = state_with("look around");
        let narrator = ScriptedNarrativeService::always("Nothing but dust. {broken");
        let lore = StaticLoreRetriever::empty();

        let update = handle_story(&state, &narrator, &lore).await;

        assert_eq!(update.narrative.as_deref(), Some("Nothing but dust. {broken"));
        assert_eq!(sent_lore(&narrator), NO_LORE);
    }

    #[tokio::test]
    async fn test_long_lore_is_truncated() {
        let long = "x".repeat(800);
        let state = state_with("look around");
        let narrator = ScriptedNarrativeService::always("ok");
        let lore = StaticLoreRetriever::new(&[long.as_str()]);

        handle_story(&state, &narrator, &lore).await;

        let sent = sent_lore(&narrator);
        assert_eq!(sent.len(), STORY_LORE_CHARS + 3);
        assert!(sent.ends_with("..."));
    }

    #[tokio::test]
    async fn test_retrieval_failure_still_narrates() {
        let state = state_with("look around");
        let narrator = ScriptedNarrativeService::always("The room is quiet.");

        let update = handle_story(&state, &narrator, &FailingLoreRetriever).await;

        assert_eq!(update.narrative.as_deref(), Some("The room is quiet."));
        assert_eq!(sent_lore(&narrator), NO_LORE);
    }

    #[tokio::test]
    async fn test_service_failure_restates_action() {
        let state = state_with("sing a song");

        let update =
            handle_story(&state, &FailingNarrativeService, &StaticLoreRetriever::empty()).await;

        assert_eq!(update.narrative.as_deref(), Some("You sing a song at tavern."));
    }
}
