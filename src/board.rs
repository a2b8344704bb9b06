//! Game board representation and collision detection

use crate::error::ConfigError;
use crate::piece::Piece;
use tracing::warn;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - occupancy only, colors are a rendering concern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled)
    }
}

/// Owned copy of a board's cells, stored as [row][col] with row 0 at the top
pub type Grid = Vec<Vec<Cell>>;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Grid stored as [row][col], row 0 is top, row increases downward
    cells: Grid,
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Create an empty board, rejecting zero-sized dimensions
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self::blank(width, height))
    }

    /// Create an empty 10x20 board
    pub fn standard() -> Self {
        const { assert!(BOARD_WIDTH > 0 && BOARD_HEIGHT > 0) };
        Self::blank(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Dimensions must already be non-zero
    fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x, y))
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|(x, y)| self.cells[y][x])
    }

    /// Set the cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some((x, y)) => {
                self.cells[y][x] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether the piece, shifted by the offset, lies fully inside the
    /// board without overlapping any filled cell
    pub fn is_valid_position(&self, piece: &Piece, offset_x: i32, offset_y: i32) -> bool {
        piece.occupied_cells().into_iter().all(|(x, y)| {
            self.get(x + offset_x, y + offset_y)
                .is_some_and(|cell| cell.is_empty())
        })
    }

    /// Lock a piece onto the board. Cells outside the board are dropped.
    pub fn lock_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_cells() {
            if !self.set(x, y, Cell::Filled) {
                warn!(x, y, piece = piece.name(), "dropping out-of-bounds cell on lock");
            }
        }
    }

    /// Clear completed lines and return the number cleared.
    ///
    /// Surviving rows keep their relative order and sink to the bottom; the
    /// same number of empty rows appear at the top.
    pub fn clear_completed_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut write_row = self.height;

        for read_row in (0..self.height).rev() {
            if self.is_line_full(read_row) {
                lines_cleared += 1;
            } else {
                // Keep this line
                write_row -= 1;
                if write_row != read_row {
                    self.cells.swap(write_row, read_row);
                }
            }
        }

        // Fill the top with empty rows
        for row in &mut self.cells[..write_row] {
            row.fill(Cell::Empty);
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// The game is over once anything sits in the top row
    pub fn is_game_over(&self) -> bool {
        self.cells[0].iter().any(|cell| cell.is_filled())
    }

    /// Independent copy of the grid
    pub fn grid_snapshot(&self) -> Grid {
        self.cells.clone()
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::{RotationState, Shape, ShapeKind};
    use ratatui::style::Color;
    use std::sync::Arc;

    fn dot(x: i32, y: i32) -> Piece {
        let shape = Shape::new("dot", vec![RotationState::from_rows(&[&[1]])], Color::White)
            .unwrap();
        Piece::new(Arc::new(shape), x, y)
    }

    fn fill_row(board: &mut Board, y: i32) {
        for x in 0..board.width() as i32 {
            board.set(x, y, Cell::Filled);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20).unwrap();
        assert!(board.is_empty());
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_standard_matches_default_dimensions() {
        let board = Board::standard();
        assert_eq!((board.width(), board.height()), (BOARD_WIDTH, BOARD_HEIGHT));
        assert_eq!(board.grid_snapshot().len(), BOARD_HEIGHT);
        assert!(board.grid_snapshot().iter().all(|row| row.len() == BOARD_WIDTH));
        assert_eq!(Board::default(), board);
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 20),
            Err(ConfigError::InvalidDimensions { width: 0, height: 20 })
        );
        assert!(Board::new(10, 0).is_err());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::standard();
        assert!(board.set(5, 5, Cell::Filled));
        assert_eq!(board.get(5, 5), Some(Cell::Filled));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::standard();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
        assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
        assert!(!board.set(-1, 0, Cell::Filled));
    }

    #[test]
    fn test_valid_position_bounds_and_overlap() {
        let mut board = Board::standard();
        let piece = Piece::from_kind(ShapeKind::O, 0, 0);
        assert!(board.is_valid_position(&piece, 0, 0));
        assert!(!board.is_valid_position(&piece, -1, 0));
        assert!(!board.is_valid_position(&piece, 0, -1));
        assert!(!board.is_valid_position(&piece, 9, 0));
        assert!(!board.is_valid_position(&piece, 0, 19));
        assert!(board.is_valid_position(&piece, 8, 18));

        board.set(1, 1, Cell::Filled);
        assert!(!board.is_valid_position(&piece, 0, 0));
        assert!(board.is_valid_position(&piece, 2, 0));
    }

    #[test]
    fn test_lock_piece_ignores_out_of_bounds() {
        let mut board = Board::new(4, 4).unwrap();
        let piece = Piece::from_kind(ShapeKind::I, 2, 3);
        board.lock_piece(&piece);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(2, 3), Some(Cell::Filled));
        assert_eq!(board.get(3, 3), Some(Cell::Filled));
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::new(4, 4).unwrap();
        // Bottom row full except the last column, one stray block above it
        for x in 0..3 {
            board.set(x, 3, Cell::Filled);
        }
        board.set(0, 2, Cell::Filled);

        board.lock_piece(&dot(3, 3));
        assert_eq!(board.clear_completed_lines(), 1);

        let grid = board.grid_snapshot();
        assert_eq!(grid.len(), 4);
        assert_eq!(grid[3].iter().filter(|c| c.is_filled()).count(), 1);
        assert_eq!(board.get(0, 3), Some(Cell::Filled));
        assert!(grid[0].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_clear_full_row_with_dot_above() {
        let mut board = Board::new(4, 4).unwrap();
        fill_row(&mut board, 3);
        board.lock_piece(&dot(0, 0));
        assert_eq!(board.clear_completed_lines(), 1);
        let grid = board.grid_snapshot();
        assert_eq!(grid[3].iter().filter(|c| c.is_filled()).count(), 0);
        assert_eq!(board.get(0, 1), Some(Cell::Filled));
    }

    #[test]
    fn test_clear_non_adjacent_lines_preserves_order() {
        let mut board = Board::new(3, 6).unwrap();
        fill_row(&mut board, 5);
        board.set(0, 4, Cell::Filled);
        fill_row(&mut board, 3);
        board.set(2, 2, Cell::Filled);

        assert_eq!(board.clear_completed_lines(), 2);
        assert_eq!(board.get(0, 5), Some(Cell::Filled));
        assert_eq!(board.get(2, 4), Some(Cell::Filled));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_no_lines_to_clear() {
        let mut board = Board::standard();
        board.set(3, 19, Cell::Filled);
        let before = board.grid_snapshot();
        assert_eq!(board.clear_completed_lines(), 0);
        assert_eq!(board.grid_snapshot(), before);
    }

    #[test]
    fn test_game_over_only_on_top_row() {
        let mut board = Board::standard();
        board.set(4, 1, Cell::Filled);
        assert!(!board.is_game_over());
        board.set(4, 0, Cell::Filled);
        assert!(board.is_game_over());
    }

    #[test]
    fn test_snapshot_is_independent() {
        let mut board = Board::standard();
        let mut grid = board.grid_snapshot();
        grid[0][0] = Cell::Filled;
        assert!(board.is_empty());
        board.set(1, 1, Cell::Filled);
        assert_eq!(grid[1][1], Cell::Empty);
    }
}
