//! Inventory tools.
//!
//! Inventories are plain ordered lists of item identifiers. Duplicates are
//! separate entries and removal always takes the first instance.

use thiserror::Error;

/// Why an inventory operation was refused. The display text is shown to
/// the player as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The inventory is at its size limit.
    #[error("Inventory full! Cannot add {item}. (Max: {max} items)")]
    InventoryFull {
        /// The rejected item.
        item: String,
        /// The configured limit.
        max: usize,
    },

    /// The item is not carried.
    #[error("{0} not in inventory.")]
    Missing(String),
}

/// Fixed effects applied when an item is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemEffects {
    /// Health restored.
    pub health: i32,
    /// Mana restored.
    pub mana: i32,
}

/// Effects for the known consumables; `None` for anything else.
#[must_use]
pub fn effects_for(item: &str) -> Option<ItemEffects> {
    match item {
        "health_potion" => Some(ItemEffects {
            health: 30,
            mana: 0,
        }),
        "mana_potion" => Some(ItemEffects {
            health: 0,
            mana: 20,
        }),
        "elixir" => Some(ItemEffects {
            health: 50,
            mana: 30,
        }),
        _ => None,
    }
}

/// The outcome of using an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemUse {
    /// Whether the item was used up.
    pub consumed: bool,
    /// What the item does.
    pub effects: ItemEffects,
    /// Player-facing summary.
    pub message: String,
}

/// Appends `item` unless the inventory already holds `max_size` entries.
///
/// # Errors
///
/// Returns `ItemError::InventoryFull` when the inventory is at its limit.
pub fn add_item(inventory: &mut Vec<String>, item: &str, max_size: usize) -> Result<String, ItemError> {
    if inventory.len() >= max_size {
        return Err(ItemError::InventoryFull {
            item: item.to_owned(),
            max: max_size,
        });
    }
    inventory.push(item.to_owned());
    Ok(format!("Added {item} to inventory."))
}

/// Removes the first instance of `item`.
///
/// # Errors
///
/// Returns `ItemError::Missing` if the item is not carried.
pub fn remove_item(inventory: &mut Vec<String>, item: &str) -> Result<String, ItemError> {
    let index = inventory
        .iter()
        .position(|i| i == item)
        .ok_or_else(|| ItemError::Missing(item.to_owned()))?;
    inventory.remove(index);
    Ok(format!("Removed {item} from inventory."))
}

/// Whether at least one instance of `item` is carried.
#[must_use]
pub fn has_item(inventory: &[String], item: &str) -> bool {
    inventory.iter().any(|i| i == item)
}

/// Uses `item`, removing one instance if it is a consumable.
///
/// Known potions are consumed and report their effects. Anything else is
/// activated and kept.
///
/// # Errors
///
/// Returns `ItemError::Missing` if the item is not carried.
pub fn use_item(inventory: &mut Vec<String>, item: &str) -> Result<ItemUse, ItemError> {
    if !has_item(inventory, item) {
        return Err(ItemError::Missing(item.to_owned()));
    }

    match effects_for(item) {
        Some(effects) => {
            remove_item(inventory, item)?;
            Ok(ItemUse {
                consumed: true,
                effects,
                message: format!("Used {item}."),
            })
        }
        None => Ok(ItemUse {
            consumed: false,
            effects: ItemEffects::default(),
            message: format!("Activated {item}."),
        }),
    }
}

/// Equipment slot an item goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipSlot {
    /// Main-hand weapon.
    Weapon,
    /// Body armor or shield.
    Armor,
}

const ARMOR_WORDS: &[&str] = &[
    "armor", "armour", "shield", "helm", "mail", "plate", "cloak", "robe", "boots", "gauntlet",
];

impl EquipSlot {
    /// Classifies an item by name; anything not armor-like is a weapon.
    #[must_use]
    pub fn for_item(item: &str) -> Self {
        if ARMOR_WORDS.iter().any(|w| item.contains(w)) {
            Self::Armor
        } else {
            Self::Weapon
        }
    }
}

/// Equips `item`, replacing `current`. Returns the message for the swap.
///
/// # Errors
///
/// Returns `ItemError::Missing` if the item is not carried.
pub fn equip_item(inventory: &[String], item: &str, current: Option<&str>) -> Result<String, ItemError> {
    if !has_item(inventory, item) {
        return Err(ItemError::Missing(item.to_owned()));
    }
    Ok(match current {
        Some(old) => format!("Unequipped {old} and equipped {item}."),
        None => format!("Equipped {item}."),
    })
}

/// The first carried item mentioned in `text`, by raw id or with
/// underscores read as spaces.
#[must_use]
pub fn find_mentioned<'a>(inventory: &'a [String], text: &str) -> Option<&'a str> {
    let text = text.to_lowercase();
    inventory
        .iter()
        .find(|item| {
            let id = item.to_lowercase();
            text.contains(&id) || text.contains(&id.replace('_', " "))
        })
        .map(String::as_str)
}

/// Item list with gold, or a note that nothing is carried.
#[must_use]
pub fn list_inventory(inventory: &[String], gold: i64) -> String {
    if inventory.is_empty() {
        return "Your inventory is empty.".to_owned();
    }
    let items = inventory
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Your inventory:\n{items}\n\nGold: {gold}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(items: &[&str]) -> Vec<String> {
        items.iter().map(|i| (*i).to_owned()).collect()
    }

    #[test]
    fn test_add_item_respects_limit() {
        let mut inventory = bag(&["rope", "torch"]);

        assert!(add_item(&mut inventory, "map", 3).is_ok());
        let err = add_item(&mut inventory, "lantern", 3).unwrap_err();

        assert_eq!(inventory.len(), 3);
        assert_eq!(err.to_string(), "Inventory full! Cannot add lantern. (Max: 3 items)");
    }

    #[test]
    fn test_remove_item_takes_first_instance() {
        let mut inventory = bag(&["health_potion", "rope", "health_potion"]);

        remove_item(&mut inventory, "health_potion").unwrap();

        assert_eq!(inventory, bag(&["rope", "health_potion"]));
        assert_eq!(
            remove_item(&mut inventory, "lantern"),
            Err(ItemError::Missing("lantern".to_owned()))
        );
    }

    #[test]
    fn test_use_potion_consumes_it() {
        let mut inventory = bag(&["elixir", "rope"]);

        let used = use_item(&mut inventory, "elixir").unwrap();

        assert!(used.consumed);
        assert_eq!(used.effects, ItemEffects { health: 50, mana: 30 });
        assert_eq!(used.message, "Used elixir.");
        assert_eq!(inventory, bag(&["rope"]));
    }

    #[test]
    fn test_use_other_item_is_kept() {
        let mut inventory = bag(&["rope"]);

        let used = use_item(&mut inventory, "rope").unwrap();

        assert!(!used.consumed);
        assert_eq!(used.message, "Activated rope.");
        assert_eq!(inventory.len(), 1);
    }

    #[test]
    fn test_equip_messages() {
        let inventory = bag(&["rusty_sword", "iron_sword", "leather_armor"]);

        assert_eq!(
            equip_item(&inventory, "iron_sword", Some("rusty_sword")).unwrap(),
            "Unequipped rusty_sword and equipped iron_sword."
        );
        assert_eq!(
            equip_item(&inventory, "leather_armor", None).unwrap(),
            "Equipped leather_armor."
        );
        assert!(equip_item(&inventory, "war_axe", None).is_err());
    }

    #[test]
    fn test_slot_classification() {
        assert_eq!(EquipSlot::for_item("leather_armor"), EquipSlot::Armor);
        assert_eq!(EquipSlot::for_item("oak_shield"), EquipSlot::Armor);
        assert_eq!(EquipSlot::for_item("rusty_sword"), EquipSlot::Weapon);
    }

    #[test]
    fn test_find_mentioned_matches_readable_names_in_order() {
        let inventory = bag(&["rusty_sword", "health_potion", "mana_potion"]);

        assert_eq!(find_mentioned(&inventory, "drink the health potion"), Some("health_potion"));
        assert_eq!(find_mentioned(&inventory, "drop mana_potion"), Some("mana_potion"));
        // "potion" alone is not an id; nothing matches.
        assert_eq!(find_mentioned(&inventory, "drink a potion"), None);
    }

    #[test]
    fn test_list_inventory() {
        assert_eq!(list_inventory(&[], 10), "Your inventory is empty.");
        assert_eq!(
            list_inventory(&bag(&["rope", "torch"]), 12),
            "Your inventory:\n- rope\n- torch\n\nGold: 12"
        );
    }
}
