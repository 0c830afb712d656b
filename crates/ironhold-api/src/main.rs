//! Ironhold API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use ironhold_api::error::AppError;
use ironhold_api::routes;
use ironhold_api::state::AppState;
use ironhold_content::application::loader::{load_game_data, load_lore};
use ironhold_content::infrastructure::keyword_retriever::KeywordLoreRetriever;
use ironhold_core::clock::SystemClock;
use ironhold_core::config::GameConfig;
use ironhold_core::rng::StdRngSource;
use ironhold_narrative::infrastructure::chat_service::ChatNarrativeService;
use ironhold_saves::json_save_repository::JsonSaveRepository;
use ironhold_session::application::turn_pipeline::TurnPipeline;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Ironhold API server");

    // Read configuration from environment.
    let config = GameConfig::from_env()?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_owned());

    // Static content. Missing tables degrade travel and dialogue, not startup.
    let data = match load_game_data(&config.data_directory) {
        Ok(data) => Some(Arc::new(data)),
        Err(e) => {
            tracing::warn!(error = %e, "game data unavailable; travel and dialogue will apologise");
            None
        }
    };
    let lore = load_lore(&config.data_directory).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "lore unavailable; narrating without it");
        Vec::new()
    });

    // Build application state.
    let pipeline = TurnPipeline::new(
        data,
        Arc::new(ChatNarrativeService::from_config(&config)),
        Arc::new(KeywordLoreRetriever::new(lore)),
        Box::new(StdRngSource::from_os_rng()),
        config.clone(),
    );
    let saves = JsonSaveRepository::new(config.save_directory.clone(), Arc::new(SystemClock));
    let app_state = AppState::new(Arc::new(pipeline), Arc::new(saves));

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| AppError::Address(format!("{host}:{port}: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
