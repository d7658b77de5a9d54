//! Server state management
//!
//! One independent game per session id. Handlers take the write lock for the
//! whole request, so a session is never mutated by two requests at once.
//! Only mutating requests create sessions, and at most `max_sessions` exist.

use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use wuziq_core::{AiSide, GameState};

use crate::error::{ApiError, ApiResult};
use crate::ServerConfig;

/// Session used when a request names none
pub const DEFAULT_SESSION: &str = "default";

/// Server-wide shared state
pub struct ServerState {
    pub config: ServerConfig,
    sessions: RwLock<FxHashMap<String, GameState>>,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(FxHashMap::default()),
        }
    }

    /// Run `f` on the session's game, creating a fresh game on first use.
    /// Fails once `max_sessions` games exist and `id` is not one of them.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut GameState) -> T,
    ) -> ApiResult<T> {
        let mut sessions = self.sessions_mut();
        let limit = self.config.max_sessions;
        let count = sessions.len();
        let game = match sessions.entry(id.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(_) if count >= limit => {
                return Err(ApiError::SessionLimit(limit));
            }
            Entry::Vacant(entry) => {
                tracing::debug!(session = id, "new session");
                entry.insert(self.fresh_game()?)
            }
        };
        Ok(f(game))
    }

    /// Run `f` on the session's game without creating it. Unknown ids see
    /// the game a new session would start with.
    pub fn read_session<T>(&self, id: &str, f: impl FnOnce(&GameState) -> T) -> ApiResult<T> {
        let sessions = self.sessions();
        match sessions.get(id) {
            Some(game) => Ok(f(game)),
            None => Ok(f(&self.fresh_game()?)),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions().len()
    }

    fn fresh_game(&self) -> wuziq_core::Result<GameState> {
        GameState::with_ai(self.config.default_board_size, AiSide::Off)
    }

    fn sessions(&self) -> RwLockReadGuard<'_, FxHashMap<String, GameState>> {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn sessions_mut(&self) -> RwLockWriteGuard<'_, FxHashMap<String, GameState>> {
        self.sessions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sessions_are_independent() {
        let state = ServerState::default();
        state.with_session("a", |game| game.apply_move(0, 0)).unwrap().unwrap();
        let a_len = state.with_session("a", |game| game.history().len()).unwrap();
        let b_len = state.with_session("b", |game| game.history().len()).unwrap();
        assert_eq!((a_len, b_len), (1, 0));
        assert_eq!(state.session_count(), 2);
    }

    #[test]
    fn test_new_session_uses_configured_size() {
        let state = ServerState::new(ServerConfig {
            default_board_size: 9,
            ..ServerConfig::default()
        });
        let size = state.with_session(DEFAULT_SESSION, |game| game.size()).unwrap();
        assert_eq!(size, 9);
    }

    #[test]
    fn test_reads_do_not_create_sessions() {
        let state = ServerState::default();
        let len = state.read_session("ghost", |game| game.history().len()).unwrap();
        assert_eq!(len, 0);
        assert_eq!(state.session_count(), 0);

        state.with_session("a", |game| game.apply_move(1, 1)).unwrap().unwrap();
        let len = state.read_session("a", |game| game.history().len()).unwrap();
        assert_eq!(len, 1);
        assert_eq!(state.session_count(), 1);
    }

    #[test]
    fn test_session_limit() {
        let state = ServerState::new(ServerConfig {
            max_sessions: 2,
            ..ServerConfig::default()
        });
        state.with_session("a", |_| ()).unwrap();
        state.with_session("b", |_| ()).unwrap();
        assert!(matches!(
            state.with_session("c", |_| ()),
            Err(ApiError::SessionLimit(2))
        ));
        // Existing sessions stay usable at the limit
        state.with_session("a", |game| game.apply_move(0, 0)).unwrap().unwrap();
        assert_eq!(state.session_count(), 2);
    }
}
