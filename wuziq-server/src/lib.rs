//! WuziQ Server - HTTP API for the browser board
//!
//! This crate provides the web backend:
//! - REST API for moves, undo, reset and AI configuration
//! - Save/load of games as JSON records
//! - Static file serving for the board page
//! - Per-session game state

mod error;
mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir};
use wuziq_core::DEFAULT_BOARD_SIZE;

pub use error::{ApiError, ApiResult};
pub use state::{ServerState, DEFAULT_SESSION};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Size of the board a new session starts with
    pub default_board_size: usize,
    /// Largest board a client may ask for
    pub max_board_size: usize,
    /// Most sessions kept in memory; requests for new ids past this fail
    pub max_sessions: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            static_dir: "static".to_string(),
            default_board_size: DEFAULT_BOARD_SIZE,
            max_board_size: 25,
            max_sessions: 1024,
        }
    }
}

/// Create the router with all routes
pub fn create_router(state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&state.config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Game API
        .route("/api/state", get(routes::game::get_state))
        .route("/api/move", post(routes::game::make_move))
        .route("/api/undo", post(routes::game::undo_move))
        .route("/api/reset", post(routes::game::reset_game))
        .route("/api/config", post(routes::game::configure_ai))
        // Save/load
        .route(
            "/api/record",
            get(routes::record::export_record).post(routes::record::import_record),
        )
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    if config.default_board_size > config.max_board_size {
        anyhow::bail!(
            "default board size {} exceeds the maximum of {}",
            config.default_board_size,
            config.max_board_size
        );
    }
    if config.max_sessions == 0 {
        anyhow::bail!("max_sessions must be at least 1");
    }
    // Reject an unusable default before binding
    wuziq_core::Board::new(config.default_board_size)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::new(config.clone()));
    let router = create_router(state);

    tracing::info!("WuziQ server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
