//! Square board geometry and stone storage

use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest board on which five in a row is possible
pub const MIN_BOARD_SIZE: usize = 5;

/// Standard Gomoku board
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "W")]
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Single-letter tag used in records and on the terminal board
    pub fn symbol(self) -> char {
        match self {
            Player::Black => 'B',
            Player::White => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Player::Black => "black",
            Player::White => "white",
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content of one intersection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Owner of the stone, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    pub fn symbol(self) -> char {
        match self.player() {
            Some(player) => player.symbol(),
            None => '.',
        }
    }

    /// Inverse of [`Cell::symbol`]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'B' => Some(Cell::Black),
            'W' => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// Square grid of cells, row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    stones: usize,
}

impl Board {
    pub fn new(size: usize) -> Result<Self> {
        if size < MIN_BOARD_SIZE {
            return Err(GameError::InvalidSize(size));
        }
        let len = size
            .checked_mul(size)
            .ok_or(GameError::InvalidSize(size))?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| GameError::InvalidSize(size))?;
        cells.resize(len, Cell::Empty);

        Ok(Self {
            size,
            cells,
            stones: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Check if a signed coordinate is on the board
    pub fn in_bounds(&self, row: isize, col: isize) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.size && (col as usize) < self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx])
    }

    /// Place a stone. Occupied cells are never overwritten.
    pub fn set(&mut self, row: usize, col: usize, player: Player) -> Result<()> {
        let idx = self.index(row, col)?;
        if !self.cells[idx].is_empty() {
            return Err(GameError::CellOccupied { row, col });
        }
        self.cells[idx] = Cell::from(player);
        self.stones += 1;
        Ok(())
    }

    /// Revert a cell already known to be on the board to empty. Only undo
    /// may take stones off the board.
    pub(crate) fn clear(&mut self, row: usize, col: usize) {
        let idx = row * self.size + col;
        if !self.cells[idx].is_empty() {
            self.cells[idx] = Cell::Empty;
            self.stones -= 1;
        }
    }

    pub fn is_full(&self) -> bool {
        self.stones == self.cells.len()
    }

    /// Number of stones on the board
    pub fn stone_count(&self) -> usize {
        self.stones
    }

    /// Cell at a coordinate already known to be on the board
    pub(crate) fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.size + col]
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(move |(idx, _)| (idx / self.size, idx % self.size))
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.size || col >= self.size {
            return Err(GameError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        Ok(row * self.size + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_validation() {
        assert_eq!(Board::new(4), Err(GameError::InvalidSize(4)));
        assert_eq!(Board::new(0), Err(GameError::InvalidSize(0)));
        let board = Board::new(5).unwrap();
        assert_eq!(board.size(), 5);
        assert_eq!(board.stone_count(), 0);
        assert!(board.rows().flatten().all(|c| c.is_empty()));
    }

    #[test]
    fn test_huge_size_is_rejected() {
        let size = 1usize << 33;
        assert_eq!(Board::new(size), Err(GameError::InvalidSize(size)));
        assert_eq!(Board::new(usize::MAX), Err(GameError::InvalidSize(usize::MAX)));
        assert!(matches!(
            crate::game::GameState::new(size),
            Err(GameError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new(15).unwrap();
        board.set(5, 5, Player::Black).unwrap();
        assert_eq!(board.get(5, 5), Ok(Cell::Black));
        assert_eq!(board.get(5, 6), Ok(Cell::Empty));
        assert_eq!(
            board.set(5, 5, Player::White),
            Err(GameError::CellOccupied { row: 5, col: 5 })
        );
        // Failed write leaves the stone alone
        assert_eq!(board.get(5, 5), Ok(Cell::Black));
        assert_eq!(board.stone_count(), 1);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new(15).unwrap();
        assert!(matches!(
            board.get(15, 0),
            Err(GameError::OutOfBounds { row: 15, col: 0, size: 15 })
        ));
        assert!(matches!(
            board.set(3, 99, Player::Black),
            Err(GameError::OutOfBounds { .. })
        ));
        assert!(board.in_bounds(0, 14));
        assert!(!board.in_bounds(-1, 0));
        assert!(!board.in_bounds(0, 15));
    }

    #[test]
    fn test_is_full_and_clear() {
        let mut board = Board::new(5).unwrap();
        let cells: Vec<_> = board.empty_cells().collect();
        assert_eq!(cells.len(), 25);
        assert_eq!(cells[0], (0, 0));
        assert_eq!(cells[6], (1, 1));

        for (i, (row, col)) in cells.into_iter().enumerate() {
            let player = if i % 2 == 0 { Player::Black } else { Player::White };
            board.set(row, col, player).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(board.empty_cells().count(), 0);

        board.clear(2, 2);
        assert!(!board.is_full());
        assert_eq!(board.empty_cells().collect::<Vec<_>>(), vec![(2, 2)]);
    }

    #[test]
    fn test_cell_symbols() {
        assert_eq!(Cell::Empty.symbol(), '.');
        assert_eq!(Cell::from(Player::White).symbol(), 'W');
        assert_eq!(Cell::from_symbol('B'), Some(Cell::Black));
        assert_eq!(Cell::from_symbol('x'), None);
        assert_eq!(Player::Black.opponent(), Player::White);
    }
}
