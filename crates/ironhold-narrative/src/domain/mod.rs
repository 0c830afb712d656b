//! Prompt building and NPC identification.

pub mod npc_match;
pub mod prompts;
