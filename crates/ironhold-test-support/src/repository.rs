//! Test repositories — in-memory `SaveRepository` implementations for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use ironhold_core::error::DomainError;
use ironhold_core::repository::{SaveRepository, SaveSummary, sort_newest_first};
use ironhold_core::state::WorldState;

/// A save repository backed by a map. Names get a `.json` suffix like the
/// file-backed repository, and generated names use the turn count so they
/// are deterministic.
#[derive(Debug, Default)]
pub struct InMemorySaveRepository {
    saves: Mutex<BTreeMap<String, WorldState>>,
}

impl InMemorySaveRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of every stored save.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn filenames(&self) -> Vec<String> {
        self.saves.lock().unwrap().keys().cloned().collect()
    }
}

fn with_extension(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_owned()
    } else {
        format!("{name}.json")
    }
}

#[async_trait]
impl SaveRepository for InMemorySaveRepository {
    async fn save(&self, state: &WorldState, filename: Option<&str>) -> Result<String, DomainError> {
        let name = with_extension(
            &filename
                .map(str::to_owned)
                .unwrap_or_else(|| format!("save_{}_{}", state.player_name, state.turn_count)),
        );
        self.saves.lock().unwrap().insert(name.clone(), state.clone());
        Ok(name)
    }

    async fn load(&self, filename: &str) -> Result<WorldState, DomainError> {
        let name = with_extension(filename);
        self.saves
            .lock()
            .unwrap()
            .get(&name)
            .cloned()
            .ok_or(DomainError::NotFound(format!("save file {name}")))
    }

    async fn list(&self) -> Result<Vec<SaveSummary>, DomainError> {
        let mut summaries: Vec<SaveSummary> = self
            .saves
            .lock()
            .unwrap()
            .iter()
            .map(|(name, state)| SaveSummary {
                filename: name.clone(),
                player_name: state.player_name.clone(),
                last_save_time: state.last_save_time,
                location: state.current_location.clone(),
                level: state.level,
            })
            .collect();
        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    async fn delete(&self, filename: &str) -> Result<bool, DomainError> {
        Ok(self
            .saves
            .lock()
            .unwrap()
            .remove(&with_extension(filename))
            .is_some())
    }
}

/// A save repository whose storage is always unavailable.
#[derive(Debug)]
pub struct FailingSaveRepository;

#[async_trait]
impl SaveRepository for FailingSaveRepository {
    async fn save(&self, _state: &WorldState, _filename: Option<&str>) -> Result<String, DomainError> {
        Err(DomainError::Infrastructure("disk full".into()))
    }

    async fn load(&self, _filename: &str) -> Result<WorldState, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn list(&self) -> Result<Vec<SaveSummary>, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }

    async fn delete(&self, _filename: &str) -> Result<bool, DomainError> {
        Err(DomainError::Infrastructure("disk unavailable".into()))
    }
}
