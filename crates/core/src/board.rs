//! Board module - manages the game grid
//!
//! The board is a 10x40 grid where each cell is empty or holds the color of a
//! locked piece. Only the bottom 20 rows are shown by views; the rest is
//! headroom for spawning and rotating.
//! Uses a flat array for better cache locality.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..39
//! (bottom to top). Gravity decreases y.

use arrayvec::ArrayVec;

use crate::pieces::CellOffset;
use crate::scoring::line_clear_score;
use crate::types::{Cell, PieceColor, BOARD_HEIGHT, BOARD_WIDTH, MAX_SHAPE_SIDE};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Rows cleared by a single lock, bottom to top
pub type ClearedRows = ArrayVec<usize, MAX_SHAPE_SIDE>;

/// The game board - 10 columns x 40 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| None),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Check if position is out of bounds
    #[inline(always)]
    pub fn is_out_of_bounds(x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<&Cell> {
        Self::index(x, y).map(|idx| &self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether (x, y) blocks a piece: filled, or outside the board
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !matches!(self.get(x, y), Some(None))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Write `color` into every listed cell.
    ///
    /// All cells must be on the board; callers only commit placements that
    /// already passed [`collides`].
    pub fn commit(&mut self, cells: &[CellOffset], color: &PieceColor) {
        for &(x, y) in cells {
            let written = self.set(x, y, Some(color.clone()));
            debug_assert!(written, "committed cell ({x}, {y}) is off the board");
        }
    }

    /// Clear all full rows and return their indices (sorted bottom to top).
    ///
    /// Rows above a cleared row move down by the number of cleared rows
    /// beneath them; vacated rows at the top become empty.
    ///
    /// # Panics
    ///
    /// More than four full rows at once cannot come from a single lock of a
    /// 4x4 shape, so that state is treated as a broken invariant.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = 0;

        // Scan from bottom to top
        for read_y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(read_y) {
                assert!(
                    !cleared_rows.is_full(),
                    "more than {} full rows after one lock",
                    cleared_rows.capacity()
                );
                cleared_rows.push(read_y);
                continue;
            }
            if write_y != read_y {
                // Swap keeps the move allocation-free; the row left behind
                // is either discarded or overwritten later.
                for x in 0..width {
                    self.cells.swap(read_y * width + x, write_y * width + x);
                }
            }
            write_y += 1;
        }

        for cell in &mut self.cells[write_y * width..] {
            *cell = None;
        }

        cleared_rows
    }

    /// Clear all full rows and return the score for the clear.
    pub fn clear_full_lines(&mut self) -> u32 {
        line_clear_score(self.clear_full_rows().len())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of filled cells on the whole board
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Collision predicate shared by every placement check.
///
/// A placement collides if any cell is off the board horizontally or
/// vertically, or lands on a filled cell. Both cases are the same rejection.
pub fn collides<I>(cells: I, board: &Board) -> bool
where
    I: IntoIterator<Item = CellOffset>,
{
    cells.into_iter().any(|(x, y)| board.is_occupied(x, y))
}
