//! WuziQ Core - connect-five engine and heuristic opponent
//!
//! This crate provides the core game logic for WuziQ:
//! - Board storage and coordinate checks
//! - Five-in-a-row detection around the last stone
//! - Game state with turn order, history and undo
//! - Single-ply offense/defense AI
//! - Validated save records

pub mod board;
pub mod win;
pub mod game;
pub mod eval;
pub mod ai;
pub mod record;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Cell, Player, DEFAULT_BOARD_SIZE, MIN_BOARD_SIZE};
pub use win::{check_victory, run_length, WIN_LENGTH};
pub use game::{AiSide, Coord, GameState, GameStatus, GameView, Move, Winner};
pub use eval::Heuristics;
pub use ai::{select_ai_move, HeuristicAI};
pub use record::{from_record, to_record, GameRecord, RECORD_VERSION};
pub use error::{GameError, Result};
