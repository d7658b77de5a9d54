//! GameRecord - plain saved form of a game
//!
//! Records come from files and HTTP clients, so loading never trusts them:
//! the history is replayed on a fresh board and every stored field must
//! agree with the replay.

use crate::board::{Cell, Player};
use crate::error::{GameError, Result};
use crate::game::{AiSide, GameState, Move, Winner};
use serde::{Deserialize, Serialize};

/// Current record layout
pub const RECORD_VERSION: u32 = 1;

/// Saved game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default = "default_version")]
    pub version: u32,
    pub size: usize,
    /// One string per row, one of `.`, `B`, `W` per cell
    pub board: Vec<String>,
    pub side_to_move: Player,
    #[serde(default)]
    pub winner: Option<Winner>,
    #[serde(default)]
    pub ai_side: AiSide,
    #[serde(default)]
    pub history: Vec<Move>,
}

fn default_version() -> u32 {
    RECORD_VERSION
}

/// Snapshot a game
pub fn to_record(game: &GameState) -> GameRecord {
    GameRecord {
        version: RECORD_VERSION,
        size: game.size(),
        board: game
            .board()
            .rows()
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect(),
        side_to_move: game.side_to_move(),
        winner: game.winner(),
        ai_side: game.ai_side(),
        history: game.history().to_vec(),
    }
}

/// Rebuild a game, rejecting records that break any game invariant
pub fn from_record(record: &GameRecord) -> Result<GameState> {
    if record.version != RECORD_VERSION {
        return Err(corrupt(format!("unsupported record version {}", record.version)));
    }

    let grid = parse_grid(record)?;
    let mut game = GameState::new(record.size).map_err(|err| corrupt(err.to_string()))?;

    for (index, mv) in record.history.iter().enumerate() {
        if mv.player != game.side_to_move() {
            return Err(corrupt(format!(
                "move {} by {} out of turn",
                index + 1,
                mv.player
            )));
        }
        game.apply_move(mv.row, mv.col)
            .map_err(|err| corrupt(format!("move {}: {}", index + 1, err)))?;
    }

    let occupied = grid.iter().filter(|cell| !cell.is_empty()).count();
    if occupied != record.history.len() {
        return Err(corrupt(format!(
            "{} stones on the board but {} moves in the history",
            occupied,
            record.history.len()
        )));
    }

    let replayed = game.board().rows().flatten();
    if let Some(index) = replayed.zip(&grid).position(|(a, b)| a != b) {
        return Err(corrupt(format!(
            "board disagrees with history at ({}, {})",
            index / record.size,
            index % record.size
        )));
    }

    if game.side_to_move() != record.side_to_move {
        return Err(corrupt(format!(
            "{} to move does not match the history",
            record.side_to_move
        )));
    }

    if game.winner() != record.winner {
        return Err(corrupt(format!(
            "stored winner {:?} but the position gives {:?}",
            record.winner,
            game.winner()
        )));
    }

    game.configure_ai(record.ai_side);
    Ok(game)
}

fn parse_grid(record: &GameRecord) -> Result<Vec<Cell>> {
    if record.board.len() != record.size {
        return Err(corrupt(format!(
            "expected {} board rows, found {}",
            record.size,
            record.board.len()
        )));
    }

    let mut cells = Vec::new();
    for (row, line) in record.board.iter().enumerate() {
        let before = cells.len();
        for symbol in line.chars() {
            let cell = Cell::from_symbol(symbol).ok_or_else(|| {
                corrupt(format!("unknown cell {:?} in row {}", symbol, row))
            })?;
            cells.push(cell);
        }
        if cells.len() - before != record.size {
            return Err(corrupt(format!(
                "row {} has {} cells, expected {}",
                row,
                cells.len() - before,
                record.size
            )));
        }
    }
    Ok(cells)
}

fn corrupt(reason: String) -> GameError {
    GameError::CorruptState(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_game() -> GameState {
        let mut game = GameState::with_ai(10, AiSide::White).unwrap();
        for (r, c) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.apply_move(r, c).unwrap();
        }
        game
    }

    #[test]
    fn test_round_trip() {
        let game = sample_game();
        let record = to_record(&game);
        assert_eq!(record.board[0], "BBB.......");
        assert_eq!(record.board[1], "WW........");
        assert_eq!(record.side_to_move, Player::White);
        assert_eq!(from_record(&record).unwrap(), game);
    }

    #[test]
    fn test_round_trip_finished_game() {
        let mut game = GameState::new(15).unwrap();
        for (r, c) in [(7, 3), (0, 0), (7, 4), (0, 1), (7, 5), (0, 2), (7, 6), (0, 3), (7, 7)] {
            game.apply_move(r, c).unwrap();
        }
        let record = to_record(&game);
        assert_eq!(record.winner, Some(Winner::Black));
        assert_eq!(from_record(&record).unwrap(), game);
    }

    #[test]
    fn test_json_shape() {
        let record = to_record(&sample_game());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["size"], 10);
        assert_eq!(json["side_to_move"], "W");
        assert_eq!(json["ai_side"], "white");
        assert_eq!(json["winner"], serde_json::Value::Null);
        assert_eq!(json["history"][0]["player"], "B");
        let back: GameRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_rejects_extra_stone() {
        let mut record = to_record(&sample_game());
        record.board[5] = "....W.....".to_string();
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }

    #[test]
    fn test_rejects_board_mismatch() {
        let mut record = to_record(&sample_game());
        // Same stone count, wrong place
        record.board[0] = "BB.B......".to_string();
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }

    #[test]
    fn test_rejects_wrong_side_to_move() {
        let mut record = to_record(&sample_game());
        record.side_to_move = Player::Black;
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }

    #[test]
    fn test_rejects_false_winner() {
        let mut record = to_record(&sample_game());
        record.winner = Some(Winner::Black);
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }

    #[test]
    fn test_rejects_out_of_turn_history() {
        let mut record = to_record(&sample_game());
        record.history[1].player = Player::Black;
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }

    #[test]
    fn test_rejects_moves_after_win() {
        let mut game = GameState::new(15).unwrap();
        for (r, c) in [(7, 3), (0, 0), (7, 4), (0, 1), (7, 5), (0, 2), (7, 6), (0, 3), (7, 7)] {
            game.apply_move(r, c).unwrap();
        }
        let mut record = to_record(&game);
        record.history.push(Move { row: 9, col: 9, player: Player::White });
        record.board[9].replace_range(9..10, "W");
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }

    #[test]
    fn test_rejects_bad_shape() {
        let mut record = to_record(&sample_game());
        record.board.pop();
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));

        let mut record = to_record(&sample_game());
        record.board[3] = "...x......".to_string();
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));

        let mut record = to_record(&sample_game());
        record.size = 3;
        assert!(matches!(from_record(&record), Err(GameError::CorruptState(_))));
    }
}
