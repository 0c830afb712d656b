//! Game configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// A configuration value could not be parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value of the wrong shape.
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Expected type.
        expected: &'static str,
        /// The offending value.
        value: String,
    },
}

/// Tunables for new games, data locations, and the narrative backend.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Health (and max health) of a new character.
    pub starting_health: i32,
    /// Gold of a new character.
    pub starting_gold: i64,
    /// Inventory capacity enforced when items are added.
    pub max_inventory_size: usize,
    /// Directory holding save files.
    pub save_directory: PathBuf,
    /// Directory holding `locations`, `npcs`, and `lore` tables.
    pub data_directory: PathBuf,
    /// Base URL of the OpenAI-compatible chat endpoint.
    pub narrative_base_url: String,
    /// Model name sent to the narrative backend.
    pub narrative_model: String,
    /// Optional bearer token for the narrative backend.
    pub narrative_api_key: Option<String>,
    /// Sampling temperature.
    pub narrative_temperature: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_health: 100,
            starting_gold: 50,
            max_inventory_size: 20,
            save_directory: PathBuf::from("saves"),
            data_directory: PathBuf::from("data"),
            narrative_base_url: "http://localhost:11434".to_owned(),
            narrative_model: "llama2".to_owned(),
            narrative_api_key: None,
            narrative_temperature: 0.7,
        }
    }
}

impl GameConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            starting_health: parse_or(&lookup, "STARTING_HEALTH", "integer", defaults.starting_health)?,
            starting_gold: parse_or(&lookup, "STARTING_GOLD", "integer", defaults.starting_gold)?,
            max_inventory_size: parse_or(
                &lookup,
                "MAX_INVENTORY_SIZE",
                "unsigned integer",
                defaults.max_inventory_size,
            )?,
            save_directory: lookup("SAVE_DIRECTORY").map_or(defaults.save_directory, PathBuf::from),
            data_directory: lookup("DATA_DIRECTORY").map_or(defaults.data_directory, PathBuf::from),
            narrative_base_url: lookup("NARRATIVE_BASE_URL").unwrap_or(defaults.narrative_base_url),
            narrative_model: lookup("NARRATIVE_MODEL").unwrap_or(defaults.narrative_model),
            narrative_api_key: lookup("NARRATIVE_API_KEY").filter(|k| !k.is_empty()),
            narrative_temperature: parse_or(
                &lookup,
                "NARRATIVE_TEMPERATURE",
                "number",
                defaults.narrative_temperature,
            )?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, expected: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}
