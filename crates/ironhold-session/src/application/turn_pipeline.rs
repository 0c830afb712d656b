//! The turn pipeline: route, resolve, merge, validate.
//!
//! One call to [`TurnPipeline::process_action`] resolves exactly one action.
//! The caller hands over exclusive access to the state for the whole turn.
//! Resolver failures never abort the turn: they are replaced with a fallback
//! narrative and validation still runs, so `turn_count` advances once per
//! action.

use std::sync::{Arc, Mutex};

use ironhold_core::catalog::GameData;
use ironhold_core::command::{Command, PlayerAction};
use ironhold_core::config::GameConfig;
use ironhold_core::error::DomainError;
use ironhold_core::lore::LoreRetriever;
use ironhold_core::narrative::NarrativeService;
use ironhold_core::rng::DeterministicRng;
use ironhold_core::state::WorldState;
use ironhold_core::update::StateUpdate;
use ironhold_inventory::application::inventory_resolver::handle_inventory;
use ironhold_narrative::application::dialogue_resolver::handle_dialogue;
use ironhold_narrative::application::story_resolver::handle_story;
use ironhold_rules::application::combat_resolver::handle_combat;
use ironhold_rules::domain::router::{Continuation, ResolutionPath, route_turn, should_continue};
use ironhold_world_state::application::travel_resolver::handle_travel;
use ironhold_world_state::domain::validation::validate_state;
use serde::Serialize;
use tracing::{Span, debug, info, instrument, warn};

use crate::domain::new_game::new_game;
use crate::domain::quests::{QuestUpdate, complete_objective, start_quest};

/// Narrative used when location or NPC data cannot be read.
pub const DATA_UNAVAILABLE_NARRATIVE: &str =
    "Sorry, the world seems to blur around you. That can't be done right now.";

/// Narrative used when a resolver fails for any other reason.
pub const GENERIC_FAILURE_NARRATIVE: &str = "Something went wrong. Please try again.";

/// The result of one resolved turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnOutcome {
    /// Narrative for this turn (also stored as `last_output`).
    pub narrative: String,
    /// The path the router chose.
    pub path: ResolutionPath,
    /// Turn counter after validation.
    pub turn_count: u64,
    /// Whether the player is out of health or asked to quit.
    pub game_over: bool,
}

/// Routes and resolves player actions against injected collaborators.
pub struct TurnPipeline {
    data: Option<Arc<GameData>>,
    narrator: Arc<dyn NarrativeService>,
    lore: Arc<dyn LoreRetriever>,
    rng: Mutex<Box<dyn DeterministicRng>>,
    config: GameConfig,
}

impl TurnPipeline {
    /// Builds a pipeline. `data` is `None` when the static tables could not
    /// be loaded; travel and dialogue then answer with an apology.
    #[must_use]
    pub fn new(
        data: Option<Arc<GameData>>,
        narrator: Arc<dyn NarrativeService>,
        lore: Arc<dyn LoreRetriever>,
        rng: Box<dyn DeterministicRng>,
        config: GameConfig,
    ) -> Self {
        Self {
            data,
            narrator,
            lore,
            rng: Mutex::new(rng),
            config,
        }
    }

    /// The configuration new games are created with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Loaded location and NPC tables, if any.
    #[must_use]
    pub fn data(&self) -> Option<&GameData> {
        self.data.as_deref()
    }

    /// Creates a new game using this pipeline's configuration and data.
    #[must_use]
    pub fn new_game(&self, player_name: &str) -> WorldState {
        new_game(player_name, &self.config, self.data())
    }

    /// Resolves one action.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoActiveGame` if `state` is `None` and
    /// `DomainError::Validation` if the action is blank. Resolver failures
    /// are never returned.
    #[instrument(
        skip_all,
        fields(
            correlation_id = %action.correlation_id,
            turn = tracing::field::Empty,
            path = tracing::field::Empty,
        )
    )]
    pub async fn process_action(
        &self,
        state: Option<&mut WorldState>,
        action: &PlayerAction,
    ) -> Result<TurnOutcome, DomainError> {
        let state = state.ok_or(DomainError::NoActiveGame)?;
        let text = action.text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation("action must not be empty".to_owned()));
        }

        state.current_action = text.to_owned();
        let path = route_turn(&action.normalized(), &state.current_location, state.in_combat());

        let span = Span::current();
        span.record("turn", state.turn_count + 1);
        span.record("path", path.label());
        info!(command = action.command_type(), "turn started");

        let update = match self.resolve(path, state).await {
            Ok(update) => update,
            Err(DomainError::DataUnavailable(what)) => {
                warn!(missing = %what, "game data unavailable");
                StateUpdate::narrative(DATA_UNAVAILABLE_NARRATIVE)
            }
            Err(e) => {
                warn!(error = %e, "resolver failed");
                StateUpdate::narrative(GENERIC_FAILURE_NARRATIVE)
            }
        };
        merge(state, update);

        let corrections = validate_state(state);
        if corrections.any() {
            debug!(?corrections, "state pulled back into range");
        }

        let game_over = should_continue(state.health, &state.current_action) == Continuation::End;
        info!(turn_count = state.turn_count, game_over, "turn resolved");

        Ok(TurnOutcome {
            narrative: state.last_output.clone(),
            path,
            turn_count: state.turn_count,
            game_over,
        })
    }

    async fn resolve(&self, path: ResolutionPath, state: &WorldState) -> Result<StateUpdate, DomainError> {
        let data = self.data();
        match path {
            ResolutionPath::Combat => self.with_rng(|rng| handle_combat(state, rng)),
            ResolutionPath::Inventory => Ok(handle_inventory(state, data)),
            ResolutionPath::Travel => handle_travel(state, data),
            ResolutionPath::Dialogue => handle_dialogue(state, data, self.narrator.as_ref()).await,
            ResolutionPath::Story => {
                Ok(handle_story(state, self.narrator.as_ref(), self.lore.as_ref()).await)
            }
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut dyn DeterministicRng) -> T) -> Result<T, DomainError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("RNG mutex poisoned: {e}")))?;
        Ok(f(&mut **rng))
    }
}

/// Applies a resolver's update, starting any offered quest that is new.
fn merge(state: &mut WorldState, mut update: StateUpdate) {
    let offered = update.quest_offered.take();
    update.apply_to(state);

    if let Some(quest) = offered
        && let Some(started) = start_quest(state, quest)
    {
        info!(quest = %started.quest_id, "quest accepted");
        state.last_output = format!("{}\n\n{}", state.last_output, started.narrative);
    }
}

/// Completes a quest objective and grants the quest's rewards when it was
/// the last one.
///
/// # Errors
///
/// Propagates `DomainError::NotFound` and `DomainError::Validation` from
/// the quest log.
pub fn progress_quest(
    state: &mut WorldState,
    quest_id: &str,
    objective: &str,
) -> Result<Option<QuestUpdate>, DomainError> {
    let update = complete_objective(state, quest_id, objective)?;

    if let Some(rewards) = update.as_ref().and_then(|u| u.rewards) {
        state.gold = state.gold.saturating_add(rewards.gold);
        state.experience = state.experience.saturating_add(rewards.experience);
        info!(quest = %quest_id, gold = rewards.gold, experience = rewards.experience, "quest rewards granted");
    }

    Ok(update)
}
