//! Keyed tables in JSON or YAML.
//!
//! Locations and NPCs are authored as maps from key to record. The map
//! order is kept, because travel and dialogue lookups take the first
//! match.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use ironhold_core::catalog::{Location, NpcProfile};
use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::ContentError;

/// Text format of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl TableFormat {
    /// Extensions tried when looking for a table, in preference order.
    pub const EXTENSIONS: [&'static str; 3] = ["json", "yaml", "yml"];

    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// A map of records decoded into a `Vec` in document order.
struct KeyedTable<T>(Vec<(String, T)>);

struct KeyedTableVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for KeyedTableVisitor<T> {
    type Value = KeyedTable<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of records keyed by id")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, T>()? {
            entries.push(entry);
        }
        Ok(KeyedTable(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for KeyedTable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(KeyedTableVisitor(PhantomData))
    }
}

/// Decodes any serde document in `format`.
///
/// # Errors
///
/// Returns `ContentError::Parse` if the text does not decode as `T`.
pub fn decode<T: DeserializeOwned>(
    text: &str,
    format: TableFormat,
    table: &'static str,
) -> Result<T, ContentError> {
    let parse_error = |message: String| ContentError::Parse { table, message };
    match format {
        TableFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
        TableFormat::Yaml => serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string())),
    }
}

fn decode_keyed<T: DeserializeOwned>(
    text: &str,
    format: TableFormat,
    table: &'static str,
) -> Result<Vec<(String, T)>, ContentError> {
    decode::<KeyedTable<T>>(text, format, table).map(|t| t.0)
}

/// Parses the locations table, filling each record's key from its map key.
///
/// # Errors
///
/// Returns `ContentError::Parse` on malformed text or records.
pub fn parse_locations(text: &str, format: TableFormat) -> Result<Vec<Location>, ContentError> {
    Ok(decode_keyed::<Location>(text, format, "locations")?
        .into_iter()
        .map(|(key, mut location)| {
            location.key = key;
            location
        })
        .collect())
}

/// Parses the NPC table, filling each record's key from its map key.
///
/// # Errors
///
/// Returns `ContentError::Parse` on malformed text or records.
pub fn parse_npcs(text: &str, format: TableFormat) -> Result<Vec<NpcProfile>, ContentError> {
    Ok(decode_keyed::<NpcProfile>(text, format, "npcs")?
        .into_iter()
        .map(|(key, mut npc)| {
            npc.key = key;
            npc
        })
        .collect())
}
