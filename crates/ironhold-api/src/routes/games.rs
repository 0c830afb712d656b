//! Routes for live games: creation, turns, the quest log, and save/load.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use ironhold_core::command::PlayerAction;
use ironhold_core::state::{Quest, WorldState};
use ironhold_session::application::turn_pipeline::{TurnOutcome, progress_quest};
use ironhold_session::domain::quests::{QuestUpdate, active_quests, format_quest_log};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /games.
#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    /// Player name; blank or missing becomes the default adventurer name.
    #[serde(default)]
    pub player_name: String,
}

/// Request body for POST /games/{id}/actions.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Free-text player action.
    pub action: String,
}

/// Request body for POST /games/{id}/save.
#[derive(Debug, Default, Deserialize)]
pub struct SaveRequest {
    /// Save name; generated when missing.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Request body for POST /games/load.
#[derive(Debug, Deserialize)]
pub struct LoadRequest {
    /// Save to restore.
    pub filename: String,
}

/// Request body for POST /games/{id}/quests/{quest_id}/objectives.
#[derive(Debug, Deserialize)]
pub struct ObjectiveRequest {
    /// Objective text, exactly as listed on the quest.
    pub objective: String,
}

/// A game and its full state.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    /// Live game id.
    pub game_id: Uuid,
    /// Opening or most recent narrative.
    pub narrative: String,
    /// Full world state.
    pub state: WorldState,
}

/// Result of one turn.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Narrative, path, turn count, and game-over flag.
    #[serde(flatten)]
    pub outcome: TurnOutcome,
    /// World state after the turn.
    pub state: WorldState,
}

/// Name a game was saved under.
#[derive(Debug, Serialize)]
pub struct SaveResponse {
    /// File name including extension.
    pub filename: String,
}

/// The quest log.
#[derive(Debug, Serialize)]
pub struct QuestLogResponse {
    /// Quests still being worked on.
    pub active: Vec<Quest>,
    /// Archived quest ids.
    pub completed: Vec<String>,
    /// The log rendered for display.
    pub text: String,
}

/// Result of completing an objective.
#[derive(Debug, Serialize)]
pub struct ObjectiveResponse {
    /// `None` when the objective was already done.
    pub update: Option<QuestUpdate>,
    /// Gold after any reward.
    pub gold: i64,
    /// Experience after any reward.
    pub experience: i64,
}

/// POST /games
#[instrument(skip_all)]
async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<NewGameRequest>,
) -> (StatusCode, Json<GameResponse>) {
    let world = state.pipeline.new_game(&request.player_name);
    let narrative = world.last_output.clone();
    let game_id = state.insert_game(world.clone()).await;

    info!(%game_id, player = %world.player_name, "game created");

    (
        StatusCode::CREATED,
        Json(GameResponse {
            game_id,
            narrative,
            state: world,
        }),
    )
}

/// GET /games/{id}
#[instrument(skip(state))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<GameResponse>, ApiError> {
    let game = state.game(game_id).await?;
    let world = game.lock().await.clone();

    Ok(Json(GameResponse {
        game_id,
        narrative: world.last_output.clone(),
        state: world,
    }))
}

/// POST /games/{id}/actions
#[instrument(skip(state, request))]
async fn take_action(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionResponse>, ApiError> {
    let game = state.game(game_id).await?;
    let action = PlayerAction::new(request.action);

    let mut world = game.lock().await;
    let outcome = state
        .pipeline
        .process_action(Some(&mut *world), &action)
        .await?;

    Ok(Json(ActionResponse {
        outcome,
        state: world.clone(),
    }))
}

/// GET /games/{id}/quests
#[instrument(skip(state))]
async fn quest_log(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
) -> Result<Json<QuestLogResponse>, ApiError> {
    let game = state.game(game_id).await?;
    let world = game.lock().await;

    Ok(Json(QuestLogResponse {
        active: active_quests(&world.quest_log).into_iter().cloned().collect(),
        completed: world.completed_quests.iter().cloned().collect(),
        text: format_quest_log(&world.quest_log),
    }))
}

/// POST /games/{id}/quests/{quest_id}/objectives
#[instrument(skip(state, request))]
async fn complete_objective(
    State(state): State<AppState>,
    Path((game_id, quest_id)): Path<(Uuid, String)>,
    Json(request): Json<ObjectiveRequest>,
) -> Result<Json<ObjectiveResponse>, ApiError> {
    let game = state.game(game_id).await?;
    let mut world = game.lock().await;

    let update = progress_quest(&mut world, &quest_id, &request.objective)?;

    Ok(Json(ObjectiveResponse {
        update,
        gold: world.gold,
        experience: world.experience,
    }))
}

/// POST /games/{id}/save
#[instrument(skip(state, request))]
async fn save_game(
    State(state): State<AppState>,
    Path(game_id): Path<Uuid>,
    Json(request): Json<SaveRequest>,
) -> Result<Json<SaveResponse>, ApiError> {
    let game = state.game(game_id).await?;
    let world = game.lock().await.clone();

    let filename = state
        .saves
        .save(&world, request.filename.as_deref())
        .await?;

    Ok(Json(SaveResponse { filename }))
}

/// POST /games/load
#[instrument(skip(state), fields(filename = %request.filename))]
async fn load_game(
    State(state): State<AppState>,
    Json(request): Json<LoadRequest>,
) -> Result<Json<GameResponse>, ApiError> {
    let world = state.saves.load(&request.filename).await?;
    let narrative = world.last_output.clone();
    let game_id = state.insert_game(world.clone()).await;

    info!(%game_id, "game restored");

    Ok(Json(GameResponse {
        game_id,
        narrative,
        state: world,
    }))
}

/// Returns the router for live games.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_game))
        .route("/load", post(load_game))
        .route("/{game_id}", get(get_game))
        .route("/{game_id}/actions", post(take_action))
        .route("/{game_id}/save", post(save_game))
        .route("/{game_id}/quests", get(quest_log))
        .route(
            "/{game_id}/quests/{quest_id}/objectives",
            post(complete_objective),
        )
}
