//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use ironhold_core::config::GameConfig;
use ironhold_core::narrative::NarrativeService;
use ironhold_core::repository::SaveRepository;
use ironhold_core::rng::DeterministicRng;
use ironhold_session::application::turn_pipeline::TurnPipeline;
use ironhold_test_support::{
    InMemorySaveRepository, MockRng, ScriptedNarrativeService, StaticLoreRetriever,
    sample_game_data,
};
use tower::ServiceExt;

use ironhold_api::routes;
use ironhold_api::state::AppState;

/// Build app state with fixture game data, an in-memory save store, and
/// the given narrator and dice.
pub fn app_state_with(
    narrator: impl NarrativeService + 'static,
    rng: impl DeterministicRng + 'static,
    saves: Arc<dyn SaveRepository>,
) -> AppState {
    let pipeline = TurnPipeline::new(
        Some(Arc::new(sample_game_data())),
        Arc::new(narrator),
        Arc::new(StaticLoreRetriever::empty()),
        Box::new(rng),
        GameConfig::default(),
    );
    AppState::new(Arc::new(pipeline), saves)
}

/// Default state: a narrator that always says the same thing, fixed dice.
pub fn test_app_state() -> AppState {
    app_state_with(
        ScriptedNarrativeService::always("The fire crackles."),
        MockRng,
        Arc::new(InMemorySaveRepository::new()),
    )
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    routes::app(state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&body_bytes).into_owned())
        })
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Create a game and return its id.
pub async fn create_game(state: &AppState, player_name: &str) -> String {
    let (status, json) = post_json(
        build_test_app(state.clone()),
        "/api/v1/games",
        &serde_json::json!({ "player_name": player_name }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["game_id"].as_str().unwrap().to_owned()
}

/// Submit one action to a game.
pub async fn act(state: &AppState, game_id: &str, action: &str) -> (StatusCode, serde_json::Value) {
    post_json(
        build_test_app(state.clone()),
        &format!("/api/v1/games/{game_id}/actions"),
        &serde_json::json!({ "action": action }),
    )
    .await
}
