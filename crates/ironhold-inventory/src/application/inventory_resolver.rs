//! Economy & Inventory resolver.
//!
//! Behaviours are checked in order: rest, give/pay, drop, use, equip, list.
//! The first one that recognises the text produces the update.

use std::sync::LazyLock;

use ironhold_core::catalog::GameData;
use ironhold_core::state::{TAVERN, WorldState};
use ironhold_core::update::StateUpdate;
use regex_lite::Regex;
use tracing::debug;

use crate::domain::items::{EquipSlot, equip_item, find_mentioned, list_inventory, use_item};

static GIVE_GOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(gold|coin|money|g\b)").expect("valid regex"));
static DROP_GOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(gold|coin)").expect("valid regex"));

const REST_KEYWORDS: &[&str] = &["rest", "heal", "sleep", "recover"];
const GIVE_KEYWORDS: &[&str] = &[
    "give", "tip", "donate", "pay", "offer", "here's", "here is", "take", "have",
];
const RECEIVE_PATTERNS: &[&str] = &[
    "give me",
    "gives me",
    "gave me",
    "take from",
    "taken from",
    "get from",
    "receive from",
    "borrow from",
];
const USE_KEYWORDS: &[&str] = &["use", "drink", "eat"];
const LIST_KEYWORDS: &[&str] = &["inventory", "check items", "show items"];

/// Aliases naming a gold recipient, checked in order.
const RECIPIENT_ALIASES: &[(&[&str], &str)] = &[
    (&["keeper", "marta"], "Marta the Tavern Keeper"),
    (&["guard", "borin"], "Captain Borin"),
    (&["merchant", "tobias"], "Tobias the Merchant"),
    (&["guardian", "elara"], "Elara Moonwhisper"),
];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// An amount of gold named in the action, with the digits as typed.
struct GoldAmount<'a> {
    typed: &'a str,
    /// `None` when the number is too large to represent; never affordable.
    value: Option<i64>,
}

impl GoldAmount<'_> {
    fn affordable(&self, gold: i64) -> Option<i64> {
        self.value.filter(|amount| *amount <= gold)
    }
}

/// First number in `text` captured by `re`.
fn gold_amount<'a>(re: &Regex, text: &'a str) -> Option<GoldAmount<'a>> {
    re.captures(text).and_then(|c| c.get(1)).map(|m| GoldAmount {
        typed: m.as_str(),
        value: m.as_str().parse::<i64>().ok(),
    })
}

/// Resolves one inventory-path action.
///
/// `data` is only consulted to name a gold recipient standing at the
/// player's location; without it the recipient falls back to "someone".
#[must_use]
pub fn handle_inventory(state: &WorldState, data: Option<&GameData>) -> StateUpdate {
    let text = state.current_action.to_lowercase();

    if contains_any(&text, REST_KEYWORDS) {
        return rest(state);
    }

    if contains_any(&text, GIVE_KEYWORDS) {
        return give(state, data, &text);
    }

    if text.contains("drop")
        && let Some(update) = drop_gold_or_item(state, &text)
    {
        return update;
    }

    if contains_any(&text, USE_KEYWORDS)
        && let Some(item) = find_mentioned(&state.inventory, &text)
    {
        return consume(state, item);
    }

    if text.contains("equip")
        && let Some(item) = find_mentioned(&state.inventory, &text)
    {
        return equip(state, item);
    }

    if contains_any(&text, LIST_KEYWORDS) {
        return StateUpdate::narrative(list_inventory(&state.inventory, state.gold));
    }

    debug!(action = %state.current_action, "inventory action matched nothing");
    StateUpdate::narrative("Nothing happens.")
}

fn rest(state: &WorldState) -> StateUpdate {
    if state.current_location != TAVERN {
        return StateUpdate::narrative("You can only rest and recover at the tavern.");
    }
    if state.health >= state.max_health {
        return StateUpdate::narrative("You're already at full health!");
    }
    let restored = state.max_health - state.health;
    StateUpdate::narrative(format!(
        "You rest at the tavern and recover {restored} health. You feel refreshed! (Health: {max}/{max})",
        max = state.max_health
    ))
    .with_health(state.max_health)
}

fn give(state: &WorldState, data: Option<&GameData>, text: &str) -> StateUpdate {
    let receiving = contains_any(text, RECEIVE_PATTERNS);

    if let Some(requested) = gold_amount(&GIVE_GOLD_RE, text) {
        if receiving {
            return StateUpdate::narrative(format!(
                "You can't just take gold from NPCs!\n\n\
                 To get gold, try:\n\
                 - Complete quests and get rewards\n\
                 - Win combat encounters\n\
                 - Sell items to merchants (not implemented yet)\n\n\
                 Current gold: {}",
                state.gold
            ));
        }
        let Some(amount) = requested.affordable(state.gold) else {
            return StateUpdate::narrative(format!(
                "You don't have {} gold. You only have {} gold.",
                requested.typed, state.gold
            ));
        };
        let remaining = state.gold - amount;
        let recipient = recipient_for(state, data, text);
        debug!(amount, %recipient, "gold given");
        return StateUpdate::narrative(format!(
            "You give {amount} gold to {recipient}. You now have {remaining} gold remaining."
        ))
        .with_gold(remaining);
    }

    if let Some(item) = find_mentioned(&state.inventory, text) {
        return without_item(state, item).narrated(format!(
            "You give {item} away. It's no longer in your inventory."
        ));
    }

    StateUpdate::narrative(
        "What do you want to give? Specify an item from your inventory or an amount of gold (e.g., 'give 5 gold').",
    )
}

fn recipient_for(state: &WorldState, data: Option<&GameData>, text: &str) -> String {
    RECIPIENT_ALIASES
        .iter()
        .find(|(aliases, _)| contains_any(text, aliases))
        .map(|(_, name)| (*name).to_owned())
        .or_else(|| {
            data.and_then(|d| d.npcs_at(&state.current_location).next())
                .map(|npc| npc.name.clone())
        })
        .unwrap_or_else(|| "someone".to_owned())
}

fn drop_gold_or_item(state: &WorldState, text: &str) -> Option<StateUpdate> {
    if let Some(requested) = gold_amount(&DROP_GOLD_RE, text) {
        let Some(amount) = requested.affordable(state.gold) else {
            return Some(StateUpdate::narrative(format!(
                "You don't have {} gold to drop.",
                requested.typed
            )));
        };
        let remaining = state.gold - amount;
        return Some(
            StateUpdate::narrative(format!(
                "You drop {amount} gold on the ground. You now have {remaining} gold."
            ))
            .with_gold(remaining),
        );
    }

    find_mentioned(&state.inventory, text)
        .map(|item| without_item(state, item).narrated(format!("You drop {item} on the ground.")))
}

fn consume(state: &WorldState, item: &str) -> StateUpdate {
    let mut inventory = state.inventory.clone();
    let used = match use_item(&mut inventory, item) {
        Ok(used) => used,
        Err(e) => return StateUpdate::narrative(e.to_string()),
    };

    let mut message = used.message;
    let mut update = StateUpdate::default();

    if used.effects.health > 0 {
        let health = (state.health + used.effects.health).min(state.max_health);
        message.push_str(&format!(
            "\nYou recovered {} health! (Health: {health}/{})",
            used.effects.health, state.max_health
        ));
        update = update.with_health(health);
    }
    if used.effects.mana > 0 {
        // No mana pool exists yet; the effect is only reported.
        message.push_str(&format!("\nYou recovered {} mana!", used.effects.mana));
    }

    if used.consumed {
        update = update.merge_inventory(state, inventory);
    }
    update.narrated(message)
}

fn equip(state: &WorldState, item: &str) -> StateUpdate {
    let slot = EquipSlot::for_item(item);
    let current = match slot {
        EquipSlot::Weapon => state.equipped_weapon.as_deref(),
        EquipSlot::Armor => state.equipped_armor.as_deref(),
    };

    if current == Some(item) {
        return StateUpdate::narrative(format!("{item} is already equipped."));
    }

    match equip_item(&state.inventory, item, current) {
        Ok(message) => {
            let mut update = StateUpdate::narrative(message);
            match slot {
                EquipSlot::Weapon => update.equipped_weapon = Some(Some(item.to_owned())),
                EquipSlot::Armor => update.equipped_armor = Some(Some(item.to_owned())),
            }
            update
        }
        Err(e) => StateUpdate::narrative(e.to_string()),
    }
}

/// An update removing one instance of `item`.
fn without_item(state: &WorldState, item: &str) -> StateUpdate {
    let mut inventory = state.inventory.clone();
    if let Some(index) = inventory.iter().position(|i| i == item) {
        inventory.remove(index);
    }
    StateUpdate::default().merge_inventory(state, inventory)
}

trait InventoryUpdateExt {
    fn merge_inventory(self, state: &WorldState, inventory: Vec<String>) -> Self;
    fn narrated(self, text: String) -> Self;
}

impl InventoryUpdateExt for StateUpdate {
    /// Sets the new inventory, emptying any equipment slot whose item is
    /// no longer carried.
    fn merge_inventory(mut self, state: &WorldState, inventory: Vec<String>) -> Self {
        if let Some(weapon) = &state.equipped_weapon {
            if !inventory.contains(weapon) {
                self.equipped_weapon = Some(None);
            }
        }
        if let Some(armor) = &state.equipped_armor {
            if !inventory.contains(armor) {
                self.equipped_armor = Some(None);
            }
        }
        self.with_inventory(inventory)
    }

    fn narrated(mut self, text: String) -> Self {
        self.narrative = Some(text);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironhold_test_support::sample_game_data;

    fn state_at(location: &str, action: &str) -> WorldState {
        let mut state = WorldState::new_game("Aria", 100, 50);
        state.current_location = location.to_owned();
        state.current_action = action.to_owned();
        state
    }

    fn narrative(update: &StateUpdate) -> &str {
        update.narrative.as_deref().unwrap_or_default()
    }

    #[test]
    fn test_rest_at_tavern_restores_health() {
        // Arrange
        let mut state = state_at("tavern", "rest at the tavern");
        state.health = 80;

        // Act
        let update = handle_inventory(&state, None);

        // Assert
        assert_eq!(update.health, Some(100));
        assert_eq!(
            narrative(&update),
            "You rest at the tavern and recover 20 health. You feel refreshed! (Health: 100/100)"
        );
    }

    #[test]
    fn test_rest_at_full_health_or_elsewhere() {
        let full = state_at("tavern", "sleep");
        assert_eq!(narrative(&handle_inventory(&full, None)), "You're already at full health!");

        let mut away = state_at("castle", "rest");
        away.health = 10;
        let update = handle_inventory(&away, None);
        assert_eq!(narrative(&update), "You can only rest and recover at the tavern.");
        assert!(update.health.is_none());
    }

    #[test]
    fn test_give_gold_to_named_npc() {
        let state = state_at("tavern", "give 5 gold to the keeper");

        let update = handle_inventory(&state, None);

        assert_eq!(update.gold, Some(45));
        assert_eq!(
            narrative(&update),
            "You give 5 gold to Marta the Tavern Keeper. You now have 45 gold remaining."
        );
    }

    #[test]
    fn test_give_more_gold_than_owned_is_rejected() {
        let state = state_at("tavern", "give 1000 gold to the keeper");

        let update = handle_inventory(&state, None);

        assert!(update.gold.is_none());
        assert_eq!(
            narrative(&update),
            "You don't have 1000 gold. You only have 50 gold."
        );
    }

    #[test]
    fn test_oversized_amount_is_refused_as_typed() {
        let give = state_at("tavern", "give 99999999999999999999 gold to the keeper");
        let update = handle_inventory(&give, None);
        assert!(update.gold.is_none());
        assert_eq!(
            narrative(&update),
            "You don't have 99999999999999999999 gold. You only have 50 gold."
        );

        let drop = state_at("castle", "drop 99999999999999999999 coins");
        let update = handle_inventory(&drop, None);
        assert!(update.gold.is_none());
        assert_eq!(
            narrative(&update),
            "You don't have 99999999999999999999 gold to drop."
        );
    }

    #[test]
    fn test_receive_attempt_is_refused() {
        let state = state_at("tavern", "marta, give me 20 gold");

        let update = handle_inventory(&state, None);

        assert!(update.gold.is_none());
        assert!(narrative(&update).starts_with("You can't just take gold from NPCs!"));
        assert!(narrative(&update).ends_with("Current gold: 50"));
    }

    #[test]
    fn test_recipient_falls_back_to_npc_at_location() {
        let data = sample_game_data();

        let forest = state_at("dark_forest", "tip 3 coins");
        assert!(narrative(&handle_inventory(&forest, Some(&data))).contains("to Elara Moonwhisper."));

        let square = state_at("town_square", "pay 3g");
        assert!(narrative(&handle_inventory(&square, Some(&data))).contains("to someone."));
    }

    #[test]
    fn test_give_item_removes_it_and_unequips() {
        let state = state_at("tavern", "give rusty sword to Marta");

        let update = handle_inventory(&state, None);

        assert_eq!(update.inventory, Some(vec!["health_potion".to_owned()]));
        assert_eq!(update.equipped_weapon, Some(None));
        assert_eq!(
            narrative(&update),
            "You give rusty_sword away. It's no longer in your inventory."
        );
    }

    #[test]
    fn test_give_nothing_asks_what() {
        let state = state_at("tavern", "give a hug");

        assert!(narrative(&handle_inventory(&state, None)).starts_with("What do you want to give?"));
    }

    #[test]
    fn test_drop_gold_and_items() {
        let gold = state_at("castle", "drop 10 gold");
        let update = handle_inventory(&gold, None);
        assert_eq!(update.gold, Some(40));
        assert_eq!(
            narrative(&update),
            "You drop 10 gold on the ground. You now have 40 gold."
        );

        let too_much = state_at("castle", "drop 60 coins");
        assert_eq!(
            narrative(&handle_inventory(&too_much, None)),
            "You don't have 60 gold to drop."
        );
    }

    #[test]
    fn test_dropping_equipped_weapon_empties_slot() {
        let state = state_at("castle", "drop rusty sword");

        let update = handle_inventory(&state, None);

        assert_eq!(update.inventory, Some(vec!["health_potion".to_owned()]));
        assert_eq!(update.equipped_weapon, Some(None));
        assert_eq!(narrative(&update), "You drop rusty_sword on the ground.");
    }

    #[test]
    fn test_drink_elixir_heals_and_consumes() {
        let mut state = state_at("castle", "drink the elixir");
        state.inventory.push("elixir".to_owned());
        state.health = 40;

        let update = handle_inventory(&state, None);

        assert_eq!(update.health, Some(90));
        assert_eq!(
            update.inventory,
            Some(vec!["rusty_sword".to_owned(), "health_potion".to_owned()])
        );
        assert_eq!(
            narrative(&update),
            "Used elixir.\nYou recovered 50 health! (Health: 90/100)\nYou recovered 30 mana!"
        );
    }

    #[test]
    fn test_elixir_heal_is_capped_at_max() {
        let mut state = state_at("castle", "use elixir");
        state.inventory.push("elixir".to_owned());
        state.health = 90;

        assert_eq!(handle_inventory(&state, None).health, Some(100));
    }

    #[test]
    fn test_health_potion_name_trips_rest_keyword() {
        // "health" contains "heal", so the rest behaviour wins.
        let mut state = state_at("castle", "drink health potion");
        state.health = 50;

        let update = handle_inventory(&state, None);

        assert!(update.health.is_none());
        assert_eq!(narrative(&update), "You can only rest and recover at the tavern.");
    }

    #[test]
    fn test_mana_is_reported_only() {
        let mut state = state_at("castle", "drink mana potion");
        state.inventory.push("mana_potion".to_owned());

        let update = handle_inventory(&state, None);

        assert!(update.health.is_none());
        assert_eq!(narrative(&update), "Used mana_potion.\nYou recovered 20 mana!");
    }

    #[test]
    fn test_equip_swaps_weapon() {
        let mut state = state_at("castle", "equip iron sword");
        state.inventory.push("iron_sword".to_owned());

        let update = handle_inventory(&state, None);

        assert_eq!(update.equipped_weapon, Some(Some("iron_sword".to_owned())));
        assert_eq!(
            narrative(&update),
            "Unequipped rusty_sword and equipped iron_sword."
        );
    }

    #[test]
    fn test_list_inventory() {
        let state = state_at("castle", "check items");

        assert_eq!(
            narrative(&handle_inventory(&state, None)),
            "Your inventory:\n- rusty_sword\n- health_potion\n\nGold: 50"
        );
    }

    #[test]
    fn test_unmatched_action_says_nothing_happens() {
        let state = state_at("castle", "drink from the fountain");

        assert_eq!(narrative(&handle_inventory(&state, None)), "Nothing happens.");
    }
}
