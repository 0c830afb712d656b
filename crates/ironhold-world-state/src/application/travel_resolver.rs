//! Travel resolver.
//!
//! Movement is limited to direct connections of the current location; there
//! is no pathfinding across several hops in one turn.

use ironhold_core::catalog::GameData;
use ironhold_core::error::DomainError;
use ironhold_core::state::WorldState;
use ironhold_core::update::StateUpdate;
use tracing::debug;

/// Resolves one travel-path action.
///
/// Locations are scanned in authored order. A mentioned location that is
/// connected wins; the current location mentioned first yields "already
/// here"; mentioned but unreachable locations are skipped.
///
/// # Errors
///
/// Returns `DomainError::DataUnavailable` if no location data is loaded.
pub fn handle_travel(state: &WorldState, data: Option<&GameData>) -> Result<StateUpdate, DomainError> {
    let data = data.ok_or_else(|| DomainError::DataUnavailable("locations".to_owned()))?;
    let text = state.current_action.to_lowercase();
    let current = data.location(&state.current_location);

    for location in data.locations() {
        if !text.contains(&location.key) && !text.contains(&location.name.to_lowercase()) {
            continue;
        }
        if current.is_some_and(|c| c.connects_to(&location.key)) {
            debug!(from = %state.current_location, to = %location.key, "travel granted");
            return Ok(StateUpdate::narrative(format!(
                "You travel to {}.\n\n{}",
                location.name,
                location.arrival_text()
            ))
            .with_location(location.key.clone()));
        }
        if location.key == state.current_location {
            return Ok(StateUpdate::narrative(format!(
                "You're already at {}.",
                location.name
            )));
        }
    }

    debug!(from = %state.current_location, "no reachable destination mentioned");
    Ok(StateUpdate::narrative("You can't go there from here."))
}
