//! Shared test doubles and fixtures for the Ironhold engine.

mod clock;
mod fixtures;
mod lore;
mod narrative;
mod repository;
mod rng;

pub use clock::FixedClock;
pub use fixtures::sample_game_data;
pub use lore::{FailingLoreRetriever, StaticLoreRetriever};
pub use narrative::{FailingNarrativeService, ScriptedNarrativeService};
pub use repository::{FailingSaveRepository, InMemorySaveRepository};
pub use rng::{MockRng, SequenceRng};
