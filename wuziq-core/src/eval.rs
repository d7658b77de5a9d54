//! Cell evaluation for the heuristic opponent

use crate::board::{Board, Player};
use crate::win::{count_direction, AXES, WIN_LENGTH};

/// Heuristic weights for line shapes.
///
/// A shape is the run a stone would form on one axis plus how many of its
/// two ends are still empty. Runs with both ends blocked are worth nothing
/// unless they already reach five.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heuristics {
    /// Five or more: wins on the spot
    pub five: i64,
    pub open_four: i64,
    pub closed_four: i64,
    pub open_three: i64,
    pub closed_three: i64,
    pub open_two: i64,
    pub closed_two: i64,
    pub open_one: i64,
    pub closed_one: i64,
}

impl Default for Heuristics {
    fn default() -> Self {
        Self {
            five: 1_000_000,
            open_four: 100_000,
            closed_four: 10_000,
            open_three: 5_000,
            closed_three: 500,
            open_two: 200,
            closed_two: 50,
            open_one: 10,
            closed_one: 2,
        }
    }
}

impl Heuristics {
    /// Value of a run of `length` with `open_ends` empty neighbours (0..=2)
    pub fn shape_value(&self, length: usize, open_ends: u8) -> i64 {
        if length >= WIN_LENGTH {
            return self.five;
        }
        match (length, open_ends) {
            (_, 0) => 0,
            (4, 2) => self.open_four,
            (4, _) => self.closed_four,
            (3, 2) => self.open_three,
            (3, _) => self.closed_three,
            (2, 2) => self.open_two,
            (2, _) => self.closed_two,
            (_, 2) => self.open_one,
            _ => self.closed_one,
        }
    }
}

/// The run `side` would form on one axis by playing at (row, col)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineShape {
    pub length: usize,
    pub open_ends: u8,
}

/// Shape on `axis` if `side` played the (empty) cell at (row, col)
pub fn line_shape(
    board: &Board,
    row: usize,
    col: usize,
    side: Player,
    axis: (isize, isize),
) -> LineShape {
    let (dr, dc) = axis;
    let forward = count_direction(board, row, col, dr, dc, side);
    let backward = count_direction(board, row, col, -dr, -dc, side);

    let mut open_ends = 0;
    if is_open(board, row, col, dr, dc, forward + 1) {
        open_ends += 1;
    }
    if is_open(board, row, col, -dr, -dc, backward + 1) {
        open_ends += 1;
    }

    LineShape {
        length: 1 + forward + backward,
        open_ends,
    }
}

/// Sum of shape values over the four axes for `side` playing at (row, col)
pub fn cell_potential(
    board: &Board,
    row: usize,
    col: usize,
    side: Player,
    heuristics: &Heuristics,
) -> i64 {
    AXES.iter()
        .map(|&axis| {
            let shape = line_shape(board, row, col, side, axis);
            heuristics.shape_value(shape.length, shape.open_ends)
        })
        .sum()
}

/// Offense for `side` plus defense against its opponent at (row, col)
pub fn score_cell(
    board: &Board,
    row: usize,
    col: usize,
    side: Player,
    heuristics: &Heuristics,
) -> i64 {
    let offense = cell_potential(board, row, col, side, heuristics);
    let defense = cell_potential(board, row, col, side.opponent(), heuristics);
    offense + defense
}

/// Would playing (row, col) give `side` five in a row?
pub fn completes_five(board: &Board, row: usize, col: usize, side: Player) -> bool {
    AXES.iter()
        .any(|&axis| line_shape(board, row, col, side, axis).length >= WIN_LENGTH)
}

fn is_open(board: &Board, row: usize, col: usize, dr: isize, dc: isize, steps: usize) -> bool {
    let r = row as isize + dr * steps as isize;
    let c = col as isize + dc * steps as isize;
    board.in_bounds(r, c) && board.at(r as usize, c as usize).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_and_blocked_ends() {
        let mut board = Board::new(15).unwrap();
        board.set(7, 5, Player::Black).unwrap();
        board.set(7, 6, Player::Black).unwrap();

        // Playing (7, 7) makes an open three
        let shape = line_shape(&board, 7, 7, Player::Black, (0, 1));
        assert_eq!(shape, LineShape { length: 3, open_ends: 2 });

        board.set(7, 4, Player::White).unwrap();
        let shape = line_shape(&board, 7, 7, Player::Black, (0, 1));
        assert_eq!(shape, LineShape { length: 3, open_ends: 1 });
    }

    #[test]
    fn test_board_edge_blocks() {
        let mut board = Board::new(15).unwrap();
        board.set(0, 1, Player::White).unwrap();
        let shape = line_shape(&board, 0, 0, Player::White, (0, 1));
        assert_eq!(shape, LineShape { length: 2, open_ends: 1 });
        let shape = line_shape(&board, 0, 0, Player::White, (1, 0));
        assert_eq!(shape, LineShape { length: 1, open_ends: 1 });
    }

    #[test]
    fn test_open_runs_outrank_blocked_runs() {
        let h = Heuristics::default();
        for length in 1..WIN_LENGTH {
            assert!(h.shape_value(length, 2) > h.shape_value(length, 1));
            assert!(h.shape_value(length, 1) > h.shape_value(length, 0));
        }
        assert!(h.shape_value(4, 1) > h.shape_value(3, 2));
        assert_eq!(h.shape_value(5, 0), h.five);
        assert_eq!(h.shape_value(6, 2), h.five);
    }

    #[test]
    fn test_completes_five() {
        let mut board = Board::new(15).unwrap();
        for col in [3, 4, 6, 7] {
            board.set(2, col, Player::Black).unwrap();
        }
        assert!(completes_five(&board, 2, 5, Player::Black));
        assert!(!completes_five(&board, 2, 5, Player::White));
        assert!(!completes_five(&board, 2, 8, Player::Black));
    }

    #[test]
    fn test_score_counts_both_sides() {
        let mut board = Board::new(15).unwrap();
        board.set(7, 7, Player::Black).unwrap();
        let h = Heuristics::default();
        let near = score_cell(&board, 7, 8, Player::White, &h);
        let far = score_cell(&board, 0, 14, Player::White, &h);
        assert!(near > far);
        let offense = cell_potential(&board, 7, 8, Player::White, &h);
        let defense = cell_potential(&board, 7, 8, Player::Black, &h);
        assert_eq!(near, offense + defense);
    }
}
