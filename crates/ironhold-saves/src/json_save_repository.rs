//! JSON file implementation of the `SaveRepository` trait.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use ironhold_core::clock::Clock;
use ironhold_core::error::DomainError;
use ironhold_core::repository::{SaveRepository, SaveSummary, sort_newest_first};
use ironhold_core::state::WorldState;
use tracing::{debug, info, warn};

const EXTENSION: &str = "json";

/// Stores each game as `<dir>/<name>.json`.
///
/// The directory is created on first save. Names are single path
/// components; anything that would escape the directory is rejected.
#[derive(Clone)]
pub struct JsonSaveRepository {
    dir: PathBuf,
    clock: Arc<dyn Clock>,
}

impl JsonSaveRepository {
    /// Creates a repository rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            dir: dir.into(),
            clock,
        }
    }

    /// The directory saves are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, filename: &str) -> Result<(String, PathBuf), DomainError> {
        let name = normalize_filename(filename)?;
        let path = self.dir.join(&name);
        Ok((name, path))
    }

    fn default_name(&self, state: &WorldState) -> String {
        let player: String = state
            .player_name
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("save_{player}_{}", self.clock.file_stamp())
    }
}

/// Appends `.json` when missing and rejects names that are not a plain
/// file name.
fn normalize_filename(filename: &str) -> Result<String, DomainError> {
    let name = filename.trim();
    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return Err(DomainError::Validation(format!(
            "invalid save file name {filename:?}"
        )));
    }

    if Path::new(name).extension().is_some_and(|ext| ext == EXTENSION) {
        Ok(name.to_owned())
    } else {
        Ok(format!("{name}.{EXTENSION}"))
    }
}

fn storage_error(action: &str, path: &Path, err: &io::Error) -> DomainError {
    DomainError::Infrastructure(format!("failed to {action} {}: {err}", path.display()))
}

fn summarize(filename: String, state: WorldState) -> SaveSummary {
    SaveSummary {
        filename,
        player_name: state.player_name,
        last_save_time: state.last_save_time,
        location: state.current_location,
        level: state.level,
    }
}

#[async_trait]
impl SaveRepository for JsonSaveRepository {
    async fn save(&self, state: &WorldState, filename: Option<&str>) -> Result<String, DomainError> {
        let requested = filename.map_or_else(|| self.default_name(state), str::to_owned);
        let (name, path) = self.path_for(&requested)?;

        let mut record = state.clone();
        record.last_save_time = Some(self.clock.now());
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| DomainError::Infrastructure(format!("failed to encode save: {e}")))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_error("create", &self.dir, &e))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| storage_error("write", &path, &e))?;

        info!(filename = %name, player = %state.player_name, "game saved");
        Ok(name)
    }

    async fn load(&self, filename: &str) -> Result<WorldState, DomainError> {
        let (name, path) = self.path_for(filename)?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DomainError::NotFound(format!("save file {name}")));
            }
            Err(e) => return Err(storage_error("read", &path, &e)),
        };

        let state = serde_json::from_str(&text).map_err(|e| {
            DomainError::Infrastructure(format!("save file {name} is corrupt: {e}"))
        })?;
        debug!(filename = %name, "game loaded");
        Ok(state)
    }

    async fn list(&self) -> Result<Vec<SaveSummary>, DomainError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(storage_error("list", &self.dir, &e)),
        };

        let mut summaries = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| storage_error("list", &self.dir, &e))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            let filename = entry.file_name().to_string_lossy().into_owned();

            let parsed = match tokio::fs::read_to_string(&path).await {
                Ok(text) => serde_json::from_str::<WorldState>(&text).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            match parsed {
                Ok(state) => summaries.push(summarize(filename, state)),
                Err(reason) => warn!(filename = %filename, %reason, "skipping unreadable save"),
            }
        }

        sort_newest_first(&mut summaries);
        Ok(summaries)
    }

    async fn delete(&self, filename: &str) -> Result<bool, DomainError> {
        let (name, path) = self.path_for(filename)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(filename = %name, "save deleted");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(storage_error("delete", &path, &e)),
        }
    }
}
