//! Save/load over HTTP
//!
//! The record is the same JSON document the CLI writes to disk.

use crate::error::ApiResult;
use crate::routes::game::{check_size, settle};
use crate::routes::SessionParams;
use crate::state::ServerState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use std::sync::Arc;
use wuziq_core::{from_record, to_record, GameRecord, GameView};

/// Export the session's game
pub async fn export_record(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
) -> ApiResult<Json<GameRecord>> {
    let record = state.read_session(params.id(), to_record)?;
    Ok(Json(record))
}

/// Replace the session's game with a validated record
pub async fn import_record(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
    payload: Result<Json<GameRecord>, JsonRejection>,
) -> ApiResult<Json<GameView>> {
    let Json(record) = payload?;
    check_size(&state, record.size)?;
    let loaded = from_record(&record)?;

    let view = state.with_session(params.id(), |game| {
        *game = loaded;
        settle(game)
    })??;
    tracing::info!(session = params.id(), moves = record.history.len(), "game loaded");
    Ok(Json(view))
}
