//! Identifying which NPC the player is addressing.

use ironhold_core::catalog::{GameData, NpcProfile};

/// Finds the NPC addressed by `text`.
///
/// NPCs are tried in authored order. For each one the checks are: key with
/// underscores as spaces, full display name, any name word longer than
/// three letters, then location-bound aliases for NPCs standing where the
/// player is. The merchant alias keeps its historical precedence:
/// `"merchant"` alone matches any NPC at the location, while `"trader"`
/// only matches an NPC whose key contains `merchant`.
///
/// When nothing matches and exactly one NPC is at the location, that NPC
/// is assumed.
#[must_use]
pub fn identify_npc<'a>(data: &'a GameData, location: &'a str, text: &str) -> Option<&'a NpcProfile> {
    let text = text.to_lowercase();

    data.npcs()
        .iter()
        .find(|npc| addresses(npc, location, &text))
        .or_else(|| {
            let mut here = data.npcs_at(location);
            match (here.next(), here.next()) {
                (Some(only), None) => Some(only),
                _ => None,
            }
        })
}

fn addresses(npc: &NpcProfile, location: &str, text: &str) -> bool {
    let name = npc.name.to_lowercase();

    if text.contains(&npc.key.replace('_', " ")) || text.contains(&name) {
        return true;
    }
    if name
        .split_whitespace()
        .any(|word| word.chars().count() > 3 && text.contains(word))
    {
        return true;
    }
    if npc.location.as_deref() != Some(location) {
        return false;
    }

    (text.contains("keeper") && npc.key == "tavern_keeper")
        || (text.contains("guard") && npc.key == "castle_guard")
        || (text.contains("guardian") && npc.key == "forest_guardian")
        || text.contains("merchant")
        || (text.contains("trader") && npc.key.contains("merchant"))
}
