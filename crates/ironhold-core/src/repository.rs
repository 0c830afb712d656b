//! Save repository abstraction.
//!
//! Persistence lives outside the turn pipeline. The pipeline only needs a
//! state to start from; the repository moves whole `WorldState` records in
//! and out of storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::state::WorldState;

/// Listing entry for a stored game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    /// File name including extension.
    pub filename: String,
    /// Player name stored in the save.
    pub player_name: String,
    /// When the save was written.
    pub last_save_time: Option<DateTime<Utc>>,
    /// Location at save time.
    pub location: String,
    /// Level at save time.
    pub level: i32,
}

/// Repository trait for storing and restoring whole game states.
#[async_trait]
pub trait SaveRepository: Send + Sync {
    /// Stores `state`, generating a file name when `filename` is `None`.
    /// Returns the name the save was written under.
    async fn save(&self, state: &WorldState, filename: Option<&str>) -> Result<String, DomainError>;

    /// Loads a save by name.
    ///
    /// Returns `DomainError::NotFound` if no such save exists.
    async fn load(&self, filename: &str) -> Result<WorldState, DomainError>;

    /// Lists saves, newest first.
    async fn list(&self) -> Result<Vec<SaveSummary>, DomainError>;

    /// Deletes a save. Returns `false` if there was nothing to delete.
    async fn delete(&self, filename: &str) -> Result<bool, DomainError>;

    /// Name of the most recent save, if any.
    async fn latest(&self) -> Result<Option<String>, DomainError> {
        Ok(self.list().await?.into_iter().next().map(|s| s.filename))
    }
}

/// Sorts summaries newest first; saves without a timestamp go last.
pub fn sort_newest_first(saves: &mut [SaveSummary]) {
    saves.sort_by(|a, b| b.last_save_time.cmp(&a.last_save_time));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(name: &str, time: Option<DateTime<Utc>>) -> SaveSummary {
        SaveSummary {
            filename: name.to_owned(),
            player_name: "Aria".to_owned(),
            last_save_time: time,
            location: "tavern".to_owned(),
            level: 1,
        }
    }

    #[test]
    fn test_sort_newest_first_puts_untimed_last() {
        let early = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        let mut saves = vec![
            summary("a.json", Some(early)),
            summary("b.json", None),
            summary("c.json", Some(late)),
        ];

        sort_newest_first(&mut saves);

        let names: Vec<&str> = saves.iter().map(|s| s.filename.as_str()).collect();
        assert_eq!(names, vec!["c.json", "a.json", "b.json"]);
    }
}
