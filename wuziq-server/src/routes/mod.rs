//! HTTP route handlers

pub mod game;
pub mod record;
pub mod status;

use serde::Deserialize;

use crate::state::DEFAULT_SESSION;

/// `?session=` query parameter shared by all game routes
#[derive(Debug, Default, Deserialize)]
pub struct SessionParams {
    pub session: Option<String>,
}

impl SessionParams {
    pub fn id(&self) -> &str {
        self.session.as_deref().unwrap_or(DEFAULT_SESSION)
    }
}
