//! Game API endpoints
//!
//! Every mutating call lets the computer answer when it is its turn and
//! returns the resulting view.

use crate::error::{ApiError, ApiResult};
use crate::routes::SessionParams;
use crate::state::ServerState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use wuziq_core::{AiSide, GameState, GameView};

/// Current board and status. Reading never creates a session.
pub async fn get_state(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
) -> ApiResult<Json<GameView>> {
    let view = state.read_session(params.id(), |game| game.view())?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub row: i64,
    pub col: i64,
}

/// Human move, followed by the AI reply if any
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> ApiResult<Json<GameView>> {
    let Json(req) = payload?;
    let (row, col) = match (usize::try_from(req.row), usize::try_from(req.col)) {
        (Ok(row), Ok(col)) => (row, col),
        _ => return Err(ApiError::bad_request("row and column must be non-negative")),
    };

    let view = state.with_session(params.id(), |game| {
        game.apply_move(row, col)?;
        settle(game)
    })??;
    Ok(Json(view))
}

/// Take back the last move (or the last AI reply and the move before it)
pub async fn undo_move(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
) -> ApiResult<Json<GameView>> {
    let view = state.with_session(params.id(), |game| {
        game.undo()?;
        settle(game)
    })??;
    Ok(Json(view))
}

#[derive(Default, Deserialize)]
pub struct ResetRequest {
    pub size: Option<usize>,
    pub ai_side: Option<String>,
}

/// New game; omitted fields keep the current size and AI side
pub async fn reset_game(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> ApiResult<Json<GameView>> {
    let Json(req) = payload?;
    let ai_side = req.ai_side.as_deref().map(str::parse::<AiSide>).transpose()?;
    if let Some(size) = req.size {
        check_size(&state, size)?;
    }

    let view = state.with_session(params.id(), |game| {
        let size = req.size.unwrap_or(game.size());
        game.reset(size, ai_side.unwrap_or(game.ai_side()))?;
        settle(game)
    })??;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct ConfigRequest {
    pub ai_side: String,
}

/// Change the computer's side without touching the board
pub async fn configure_ai(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SessionParams>,
    payload: Result<Json<ConfigRequest>, JsonRejection>,
) -> ApiResult<Json<GameView>> {
    let Json(req) = payload?;
    let ai_side: AiSide = req.ai_side.parse()?;

    let view = state.with_session(params.id(), |game| {
        game.configure_ai(ai_side);
        settle(game)
    })??;
    Ok(Json(view))
}

/// Let the AI move if it is its turn, then snapshot
pub(crate) fn settle(game: &mut GameState) -> wuziq_core::Result<GameView> {
    game.play_ai_turn()?;
    Ok(game.view())
}

pub(crate) fn check_size(state: &ServerState, size: usize) -> ApiResult<()> {
    let max = state.config.max_board_size;
    if size > max {
        return Err(ApiError::bad_request(format!(
            "board size {} exceeds the server limit of {}",
            size, max
        )));
    }
    Ok(())
}
