//! Error types shared by every core operation

use thiserror::Error;

/// Everything the engine can refuse to do.
///
/// All variants are recoverable: drivers report them and carry on.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid board size {0}: must be at least 5 and fit in memory")]
    InvalidSize(usize),

    #[error("({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("no moves to undo")]
    NothingToUndo,

    #[error("no legal move left on the board")]
    NoLegalMove,

    #[error("corrupt saved state: {0}")]
    CorruptState(String),

    #[error("unknown AI side {0:?} (expected off, black or white)")]
    InvalidAiSide(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
