//! Five-in-a-row detection around the last placed stone

use crate::board::{Board, Player};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Line axes as (d_row, d_col); each axis is scanned both ways
pub const AXES: [(isize, isize); 4] = [
    (0, 1),  // horizontal
    (1, 0),  // vertical
    (1, 1),  // diagonal down-right
    (1, -1), // diagonal down-left
];

/// Check if `side` has five or more in a row through (row, col).
///
/// Only the given cell is examined: the last stone is the only one that can
/// complete a new line.
pub fn check_victory(board: &Board, row: usize, col: usize, side: Player) -> bool {
    AXES.iter()
        .any(|&axis| run_length(board, row, col, side, axis) >= WIN_LENGTH)
}

/// Length of the `side` run along `axis` through (row, col).
///
/// The cell itself always counts, occupied or not, so the same scan answers
/// "what would playing here make" for the AI.
pub fn run_length(
    board: &Board,
    row: usize,
    col: usize,
    side: Player,
    axis: (isize, isize),
) -> usize {
    let (dr, dc) = axis;
    1 + count_direction(board, row, col, dr, dc, side)
        + count_direction(board, row, col, -dr, -dc, side)
}

/// Consecutive `side` stones starting next to (row, col) toward (dr, dc)
pub(crate) fn count_direction(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    side: Player,
) -> usize {
    let mut total = 0;
    let mut r = row as isize + dr;
    let mut c = col as isize + dc;
    while board.in_bounds(r, c) && board.at(r as usize, c as usize).player() == Some(side) {
        total += 1;
        r += dr;
        c += dc;
    }
    total
}
