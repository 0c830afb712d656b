//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A save file or game could not be found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An action was submitted while no game state was loaded.
    #[error("no active game")]
    NoActiveGame,

    /// Static game data (locations, NPCs) is missing or unreadable.
    #[error("game data unavailable: {0}")]
    DataUnavailable(String),

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// The narrative service failed to produce a reply.
    #[error("narrative service error: {0}")]
    Narrative(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
