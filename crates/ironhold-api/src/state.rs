//! Shared application state.

use std::collections::HashMap;
use std::sync::Arc;

use ironhold_core::error::DomainError;
use ironhold_core::repository::SaveRepository;
use ironhold_core::state::WorldState;
use ironhold_session::application::turn_pipeline::TurnPipeline;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// One live game. A turn holds this lock from routing to validation.
pub type GameHandle = Arc<Mutex<WorldState>>;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Resolves player actions.
    pub pipeline: Arc<TurnPipeline>,
    /// Save file storage.
    pub saves: Arc<dyn SaveRepository>,
    games: Arc<RwLock<HashMap<Uuid, GameHandle>>>,
}

impl AppState {
    /// Create new application state with no live games.
    #[must_use]
    pub fn new(pipeline: Arc<TurnPipeline>, saves: Arc<dyn SaveRepository>) -> Self {
        Self {
            pipeline,
            saves,
            games: Arc::default(),
        }
    }

    /// Registers a game and returns its id.
    pub async fn insert_game(&self, state: WorldState) -> Uuid {
        let id = Uuid::new_v4();
        self.games
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(state)));
        id
    }

    /// Looks up a live game.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if no game has this id.
    pub async fn game(&self, id: Uuid) -> Result<GameHandle, DomainError> {
        self.games
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("game {id}")))
    }

    /// Number of live games.
    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}
