//! HTTP error mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wuziq_core::GameError;

/// Anything a handler can reject a request with. The body is always
/// `{"error": "..."}`; the session limit answers 503, everything else 400.
#[derive(Debug)]
pub enum ApiError {
    Game(GameError),
    BadRequest(String),
    SessionLimit(usize),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    fn message(&self) -> String {
        match self {
            ApiError::Game(err) => err.to_string(),
            ApiError::BadRequest(message) => message.clone(),
            ApiError::SessionLimit(limit) => {
                format!("session limit of {} reached; reuse an existing session", limit)
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::SessionLimit(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        ApiError::Game(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.message();
        let status = self.status();
        tracing::warn!(error = %message, %status, "request rejected");
        (status, Json(json!({ "error": message }))).into_response()
    }
}
