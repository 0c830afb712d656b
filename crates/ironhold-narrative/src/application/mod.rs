//! Resolvers for the Narrative context.

pub mod dialogue_resolver;
pub mod story_resolver;
