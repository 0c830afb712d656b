//! Pure session logic.

pub mod new_game;
pub mod quests;
