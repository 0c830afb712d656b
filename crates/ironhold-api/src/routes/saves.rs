//! Routes for stored saves.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::delete, routing::get};
use ironhold_core::error::DomainError;
use ironhold_core::repository::SaveSummary;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Confirmation of a removed save.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// The name that was removed.
    pub filename: String,
    /// Always `true`; a missing save is a 404.
    pub deleted: bool,
}

/// GET /saves
#[instrument(skip_all)]
async fn list_saves(State(state): State<AppState>) -> Result<Json<Vec<SaveSummary>>, ApiError> {
    Ok(Json(state.saves.list().await?))
}

/// DELETE /saves/{filename}
#[instrument(skip(state))]
async fn delete_save(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if !state.saves.delete(&filename).await? {
        return Err(DomainError::NotFound(format!("save file {filename}")).into());
    }
    info!("save removed");

    Ok(Json(DeleteResponse {
        filename,
        deleted: true,
    }))
}

/// Returns the router for stored saves.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_saves))
        .route("/{filename}", delete(delete_save))
}
