//! Single-ply heuristic opponent

use crate::board::{Board, Player};
use crate::error::{GameError, Result};
use crate::eval::{completes_five, score_cell, Heuristics};
use std::cmp::Reverse;

// ============================================================================
// HEURISTIC AI
// ============================================================================

/// Deterministic one-move-lookahead player
#[derive(Clone, Debug, Default)]
pub struct HeuristicAI {
    pub heuristics: Heuristics,
}

impl HeuristicAI {
    pub fn new(heuristics: Heuristics) -> Self {
        Self { heuristics }
    }

    /// Pick a cell for `side`.
    ///
    /// Order of preference: a cell that wins now, a cell that stops the
    /// opponent from winning next move, then the best offense + defense
    /// score. Equal candidates go to the cell nearest the centre, then the
    /// lowest row, then the lowest column.
    pub fn select_move(&self, board: &Board, side: Player) -> Result<(usize, usize)> {
        let mut candidates: Vec<(usize, usize)> = board.empty_cells().collect();
        if candidates.is_empty() {
            return Err(GameError::NoLegalMove);
        }
        let size = board.size();
        candidates.sort_by_key(|&(row, col)| (center_distance(size, row, col), row, col));

        if let Some(&cell) = candidates
            .iter()
            .find(|&&(row, col)| completes_five(board, row, col, side))
        {
            tracing::debug!(?cell, %side, "ai takes the win");
            return Ok(cell);
        }

        let opponent = side.opponent();
        if let Some(&cell) = candidates
            .iter()
            .find(|&&(row, col)| completes_five(board, row, col, opponent))
        {
            tracing::debug!(?cell, %side, "ai blocks a five");
            return Ok(cell);
        }

        // min_by_key keeps the first of equal keys, which is the tie-break order
        let best = candidates
            .iter()
            .copied()
            .min_by_key(|&(row, col)| {
                Reverse(score_cell(board, row, col, side, &self.heuristics))
            })
            .ok_or(GameError::NoLegalMove)?;

        tracing::debug!(cell = ?best, %side, "ai move");
        Ok(best)
    }
}

/// Pick a move for `side` with the default weights
pub fn select_ai_move(board: &Board, side: Player) -> Result<(usize, usize)> {
    HeuristicAI::default().select_move(board, side)
}

/// Squared distance to the board centre, in doubled coordinates so even
/// sizes (centre between cells) stay integral
fn center_distance(size: usize, row: usize, col: usize) -> usize {
    let dr = (2 * row).abs_diff(size - 1);
    let dc = (2 * col).abs_diff(size - 1);
    dr * dr + dc * dc
}

// ============================================================================
// TESTS
// ============================================================================
