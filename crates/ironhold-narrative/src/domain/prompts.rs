//! Prompt templates for the narrative service.

use ironhold_core::narrative::{DialogueContext, NarrativeContext, StoryContext};
use ironhold_core::state::DialogueLine;

/// A system prompt plus the user turn that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Instructions and context.
    pub system: String,
    /// What the player did, as the user message.
    pub user: String,
}

/// Describes a relationship score for the NPC prompt.
#[must_use]
pub fn relationship_level(score: i32) -> &'static str {
    match score {
        -100..=-50 => "Hostile - they dislike you",
        -49..=-10 => "Unfriendly - they're wary of you",
        11..=50 => "Friendly - they like you",
        51..=100 => "Allied - they trust you deeply",
        _ => "Neutral - they don't know you well",
    }
}

fn format_history(history: &[DialogueLine]) -> String {
    if history.is_empty() {
        return "No previous conversation".to_owned();
    }
    history
        .iter()
        .map(|line| format!("  - {}: {}", line.speaker, line.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The narrator prompt for a free-form action.
#[must_use]
pub fn story_prompt(context: &StoryContext) -> Prompt {
    let system = format!(
        r#"You are the narrator for a medieval fantasy RPG game.

Your role:
- Describe what happens after the player's action in 2-4 vivid sentences.
- Keep the world consistent with the lore provided.
- Do not invent NPCs. The only people in this world are Marta (tavern keeper), Elara (forest guardian), Captain Borin (castle guard), Tobias (merchant), and Grimjaw (bandit leader). Point the player towards them instead.
- Be dramatic for important moments, mysterious for discoveries, warm for friendly scenes.

Location: {location}
Player action: {action}
Relevant lore:
{lore}

Respond in JSON:
{{
    "narrative": "What happens...",
    "suggested_actions": ["action 1", "action 2", "action 3"],
    "tone": "dramatic"
}}"#,
        location = context.location,
        action = context.action,
        lore = context.lore,
    );
    Prompt {
        system,
        user: format!("Generate narrative for: {}", context.action),
    }
}

/// The in-character prompt for an NPC reply.
#[must_use]
pub fn npc_prompt(context: &DialogueContext) -> Prompt {
    let system = format!(
        r#"You are {name}, a character in a medieval fantasy world.

Your personality: {personality}
Your backstory: {backstory}
Current relationship with the player: {relationship}

Context:
- Player's name: {player}
- Current location: {location}
- Player just said/did: {action}
- Conversation history:
{history}

Stay in character, remember past interactions, react to the relationship, and offer quests or hints when it makes sense.

Respond in JSON:
{{
    "dialogue": "What you say to the player...",
    "relationship_change": 0,
    "quest_offered": null
}}"#,
        name = context.npc.name,
        personality = context.npc.personality,
        backstory = context.npc.backstory,
        relationship = relationship_level(context.relationship),
        player = context.player_name,
        location = context.location,
        action = context.action,
        history = format_history(&context.history),
    );
    Prompt {
        system,
        user: context.action.clone(),
    }
}

/// Picks the template for a context.
#[must_use]
pub fn prompt_for(context: &NarrativeContext) -> Prompt {
    match context {
        NarrativeContext::Story(story) => story_prompt(story),
        NarrativeContext::Dialogue(dialogue) => npc_prompt(dialogue),
    }
}
