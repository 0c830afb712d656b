//! Route modules and the assembled application router.

use axum::Router;

use crate::state::AppState;

pub mod games;
pub mod health;
pub mod saves;

/// Builds the full router. Middleware layers are added by the caller.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/games", games::router())
        .nest("/api/v1/saves", saves::router())
        .with_state(state)
}
