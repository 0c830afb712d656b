//! Content rules checked once at load time.

use std::collections::BTreeSet;

use ironhold_core::catalog::{Location, NpcProfile};
use ironhold_core::state::{RELATIONSHIP_MAX, RELATIONSHIP_MIN, TAVERN};

use crate::domain::lore::LoreEntry;
use crate::error::ContentError;

fn unique_keys<'a>(
    table: &'static str,
    keys: impl Iterator<Item = &'a str>,
) -> Result<BTreeSet<&'a str>, ContentError> {
    let mut seen = BTreeSet::new();
    for key in keys {
        if key.trim().is_empty() {
            return Err(ContentError::invalid(table, "empty key"));
        }
        if !seen.insert(key) {
            return Err(ContentError::invalid(table, format!("duplicate key {key}")));
        }
    }
    Ok(seen)
}

/// Checks the location graph and NPC roster together.
///
/// The tavern must exist, keys must be unique, every connection and NPC
/// location must name a known location, and initial relationships must be
/// within the relationship range.
///
/// # Errors
///
/// Returns `ContentError::Invalid` describing the first broken rule.
pub fn validate_game_data(locations: &[Location], npcs: &[NpcProfile]) -> Result<(), ContentError> {
    let known = unique_keys("locations", locations.iter().map(|l| l.key.as_str()))?;
    if !known.contains(TAVERN) {
        return Err(ContentError::invalid("locations", format!("missing the {TAVERN} location")));
    }

    for location in locations {
        if location.name.trim().is_empty() {
            return Err(ContentError::invalid(
                "locations",
                format!("{} has an empty name", location.key),
            ));
        }
        if let Some(unknown) = location
            .connections
            .iter()
            .find(|c| !known.contains(c.as_str()))
        {
            return Err(ContentError::invalid(
                "locations",
                format!("{} connects to unknown location {unknown}", location.key),
            ));
        }
    }

    unique_keys("npcs", npcs.iter().map(|n| n.key.as_str()))?;
    for npc in npcs {
        if npc.name.trim().is_empty() {
            return Err(ContentError::invalid("npcs", format!("{} has an empty name", npc.key)));
        }
        if let Some(location) = npc.location.as_deref()
            && !known.contains(location)
        {
            return Err(ContentError::invalid(
                "npcs",
                format!("{} is placed at unknown location {location}", npc.key),
            ));
        }
        if !(RELATIONSHIP_MIN..=RELATIONSHIP_MAX).contains(&npc.initial_relationship) {
            return Err(ContentError::invalid(
                "npcs",
                format!(
                    "{} has initial_relationship {} outside {RELATIONSHIP_MIN}..={RELATIONSHIP_MAX}",
                    npc.key, npc.initial_relationship
                ),
            ));
        }
    }

    Ok(())
}

/// Checks lore ids are unique and every entry has text.
///
/// # Errors
///
/// Returns `ContentError::Invalid` describing the first broken rule.
pub fn validate_lore(entries: &[LoreEntry]) -> Result<(), ContentError> {
    unique_keys("lore", entries.iter().map(|e| e.id.as_str()))?;
    match entries.iter().find(|e| e.content.trim().is_empty()) {
        Some(empty) => Err(ContentError::invalid("lore", format!("{} has no content", empty.id))),
        None => Ok(()),
    }
}
