//! Loads and validates the content tables from a data directory.
//!
//! Each table is looked up as `<name>.json`, then `<name>.yaml`, then
//! `<name>.yml`.

use std::io;
use std::path::{Path, PathBuf};

use ironhold_core::catalog::GameData;
use tracing::info;

use crate::domain::lore::LoreEntry;
use crate::domain::tables::{TableFormat, decode, parse_locations, parse_npcs};
use crate::domain::validation::{validate_game_data, validate_lore};
use crate::error::ContentError;

fn find_table(dir: &Path, name: &str) -> Result<(PathBuf, TableFormat), ContentError> {
    TableFormat::EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|path| path.is_file())
        .and_then(|path| TableFormat::from_path(&path).map(|format| (path, format)))
        .ok_or_else(|| ContentError::Io {
            path: dir.join(name),
            source: io::Error::new(io::ErrorKind::NotFound, "no json or yaml table found"),
        })
}

fn read_table(dir: &Path, name: &str) -> Result<(String, TableFormat), ContentError> {
    let (path, format) = find_table(dir, name)?;
    let text = std::fs::read_to_string(&path).map_err(|source| ContentError::Io { path, source })?;
    Ok((text, format))
}

/// Loads `locations` and `npcs` from `dir` and validates them together.
///
/// # Errors
///
/// Returns `ContentError` if a table is missing, malformed, or invalid.
pub fn load_game_data(dir: &Path) -> Result<GameData, ContentError> {
    let (text, format) = read_table(dir, "locations")?;
    let locations = parse_locations(&text, format)?;

    let (text, format) = read_table(dir, "npcs")?;
    let npcs = parse_npcs(&text, format)?;

    validate_game_data(&locations, &npcs)?;
    info!(
        locations = locations.len(),
        npcs = npcs.len(),
        dir = %dir.display(),
        "game data loaded"
    );

    Ok(GameData::new(locations, npcs))
}

/// Loads the `lore` list from `dir`.
///
/// # Errors
///
/// Returns `ContentError` if the table is missing, malformed, or invalid.
pub fn load_lore(dir: &Path) -> Result<Vec<LoreEntry>, ContentError> {
    let (text, format) = read_table(dir, "lore")?;
    let entries: Vec<LoreEntry> = decode(&text, format, "lore")?;

    validate_lore(&entries)?;
    info!(entries = entries.len(), dir = %dir.display(), "lore loaded");

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shipped_data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data")
    }

    #[test]
    fn test_shipped_tables_load_and_validate() {
        let dir = shipped_data_dir();

        let data = load_game_data(&dir).unwrap();
        let lore = load_lore(&dir).unwrap();

        assert_eq!(data.locations()[0].key, "tavern");
        assert!(data.location("dark_forest").unwrap().connects_to("tavern"));
        assert_eq!(data.npc("tavern_keeper").unwrap().location.as_deref(), Some("tavern"));
        assert!(lore.iter().any(|e| e.id == "world_bandit_problem"));
    }

    #[test]
    fn test_yaml_tables_are_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("locations.yaml"),
            "tavern:\n  name: Tavern\n  description: Warm.\n  connections: []\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("npcs.yml"),
            "keeper:\n  name: Marta\n  personality: Kind.\n  backstory: Retired.\n  location: tavern\n",
        )
        .unwrap();

        let data = load_game_data(dir.path()).unwrap();

        assert_eq!(data.npcs_at("tavern").count(), 1);
    }

    #[test]
    fn test_missing_table_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = load_game_data(dir.path());

        match result {
            Err(ContentError::Io { path, source }) => {
                assert!(path.ends_with("locations"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("locations.json"),
            r#"{"tavern": {"name": "Tavern", "description": "Warm.", "connections": ["nowhere"]}}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("npcs.json"), "{}").unwrap();

        let result = load_game_data(dir.path());

        assert!(matches!(result, Err(ContentError::Invalid { table: "locations", .. })));
    }

    #[test]
    fn test_malformed_lore_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("lore.json"), "{ not json").unwrap();

        let result = load_lore(dir.path());

        assert!(matches!(result, Err(ContentError::Parse { table: "lore", .. })));
    }
}
