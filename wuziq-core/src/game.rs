//! Game state: turn order, history, undo and results

use crate::ai::select_ai_move;
use crate::board::{Board, Player};
use crate::error::{GameError, Result};
use crate::win::check_victory;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CORE TYPES
// ============================================================================

/// A placed stone
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// Final result of a game
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
    #[serde(rename = "draw")]
    Draw,
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Winner::Black,
            Player::White => Winner::White,
        }
    }
}

/// Where the game is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Drawn,
}

/// Which side the computer plays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiSide {
    #[default]
    Off,
    Black,
    White,
}

impl AiSide {
    pub fn player(self) -> Option<Player> {
        match self {
            AiSide::Off => None,
            AiSide::Black => Some(Player::Black),
            AiSide::White => Some(Player::White),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AiSide::Off => "off",
            AiSide::Black => "black",
            AiSide::White => "white",
        }
    }
}

impl fmt::Display for AiSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AiSide {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(AiSide::Off),
            "black" | "b" => Ok(AiSide::Black),
            "white" | "w" => Ok(AiSide::White),
            _ => Err(GameError::InvalidAiSide(s.to_string())),
        }
    }
}

/// Coordinates of a move, as reported to clients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

/// Read-only snapshot for renderers and HTTP clients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    pub size: usize,
    /// Row-major grid; `None` is an empty cell
    pub board: Vec<Vec<Option<Player>>>,
    pub current_player: Player,
    pub winner: Option<Winner>,
    pub status: GameStatus,
    pub ai_side: AiSide,
    pub last_move: Option<Coord>,
    pub can_undo: bool,
    pub is_full: bool,
}

// ============================================================================
// GAME STATE
// ============================================================================

/// The single mutable root of a game
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Player,
    history: Vec<Move>,
    winner: Option<Winner>,
    ai_side: AiSide,
}

impl GameState {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Empty board, black to move, no AI
    pub fn new(size: usize) -> Result<Self> {
        Self::with_ai(size, AiSide::Off)
    }

    pub fn with_ai(size: usize, ai_side: AiSide) -> Result<Self> {
        Ok(Self {
            board: Board::new(size)?,
            side_to_move: Player::Black,
            history: Vec::new(),
            winner: None,
            ai_side,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn ai_side(&self) -> AiSide {
        self.ai_side
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    pub fn status(&self) -> GameStatus {
        match self.winner {
            None => GameStatus::InProgress,
            Some(Winner::Draw) => GameStatus::Drawn,
            Some(_) => GameStatus::Won,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// True when the game runs and the computer owns the side to move
    pub fn is_ai_turn(&self) -> bool {
        !self.is_over() && self.ai_side.player() == Some(self.side_to_move)
    }

    pub fn view(&self) -> GameView {
        GameView {
            size: self.board.size(),
            board: self
                .board
                .rows()
                .map(|row| row.iter().map(|cell| cell.player()).collect())
                .collect(),
            current_player: self.side_to_move,
            winner: self.winner,
            status: self.status(),
            ai_side: self.ai_side,
            last_move: self.last_move().map(|mv| Coord { row: mv.row, col: mv.col }),
            can_undo: !self.history.is_empty(),
            is_full: self.board.is_full(),
        }
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    /// Place a stone for the side to move and settle the result
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<Move> {
        if self.is_over() {
            return Err(GameError::IllegalMove("the game is already over".to_string()));
        }

        let player = self.side_to_move;
        self.board
            .set(row, col, player)
            .map_err(|err| GameError::IllegalMove(err.to_string()))?;

        let mv = Move { row, col, player };
        self.history.push(mv);

        if check_victory(&self.board, row, col, player) {
            self.winner = Some(Winner::from(player));
        } else if self.board.is_full() {
            self.winner = Some(Winner::Draw);
        } else {
            self.side_to_move = player.opponent();
        }

        tracing::debug!(row, col, %player, status = ?self.status(), "move applied");
        Ok(mv)
    }

    /// Take back the last move, or the last AI reply together with the
    /// human move before it. Returns the removed moves, most recent first.
    pub fn undo(&mut self) -> Result<Vec<Move>> {
        let last = self.pop_move().ok_or(GameError::NothingToUndo)?;
        let mut removed = vec![last];

        if self.ai_side.player() == Some(last.player) {
            if let Some(human) = self.pop_move() {
                removed.push(human);
            }
        }

        self.winner = None;
        tracing::debug!(count = removed.len(), to_move = %self.side_to_move, "undo");
        Ok(removed)
    }

    /// Start over on a fresh board. On error the current game is kept.
    pub fn reset(&mut self, size: usize, ai_side: AiSide) -> Result<()> {
        *self = Self::with_ai(size, ai_side)?;
        tracing::debug!(size, %ai_side, "reset");
        Ok(())
    }

    /// Hand a side to the computer (or take it back) mid-game
    pub fn configure_ai(&mut self, ai_side: AiSide) {
        self.ai_side = ai_side;
    }

    /// Let the computer move if it is its turn
    pub fn play_ai_turn(&mut self) -> Result<Option<Move>> {
        if !self.is_ai_turn() {
            return Ok(None);
        }
        let (row, col) = select_ai_move(&self.board, self.side_to_move)?;
        self.apply_move(row, col).map(Some)
    }

    fn pop_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        // History cells are always on the board
        self.board.clear(mv.row, mv.col);
        self.side_to_move = mv.player;
        Some(mv)
    }
}
