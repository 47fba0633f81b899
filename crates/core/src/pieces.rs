//! Pieces module - shape matrices, matrix rotation and piece templates
//!
//! Shapes are square boolean grids stored in a fixed 4x4 array with an
//! explicit side, so rotating never allocates. Rotation is a plain 90°
//! transpose-and-reverse; there are no kick tables.
//!
//! Row index `r` and column index `c` of a shape map to the board offset
//! `(x, y) = (r, c)`. Offsets are always produced row-major (row outer, column
//! inner), and renderers rely on that order.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::error::ShapeError;
use crate::types::{PieceColor, RotationDirection, MAX_SHAPE_SIDE, MIN_SHAPE_SIDE};

/// Offset of a single filled cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Filled-cell offsets of a shape, at most one per matrix cell
pub type Offsets = ArrayVec<CellOffset, { MAX_SHAPE_SIDE * MAX_SHAPE_SIDE }>;

/// Square boolean shape, side 2..=4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    side: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl ShapeMatrix {
    /// Parse rows of `0`/`1` digits into a shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_tetris_core::pieces::ShapeMatrix;
    ///
    /// let t = ShapeMatrix::parse_rows(&["010", "110", "010"]).unwrap();
    /// assert_eq!(t.side(), 3);
    /// assert!(t.get(1, 0));
    /// assert!(ShapeMatrix::parse_rows(&["01", "1"]).is_err());
    /// ```
    pub fn parse_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, ShapeError> {
        let side = rows.len();
        if !(MIN_SHAPE_SIDE..=MAX_SHAPE_SIDE).contains(&side) {
            return Err(ShapeError::Side { rows: side });
        }

        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let len = text.chars().count();
            if len != side {
                return Err(ShapeError::NotSquare { row, len, side });
            }
            for (col, ch) in text.chars().enumerate() {
                cells[row][col] = match ch {
                    '0' => false,
                    '1' => true,
                    found => return Err(ShapeError::InvalidCell { row, col, found }),
                };
            }
        }

        Ok(Self {
            side: side as u8,
            cells,
        })
    }

    pub fn side(&self) -> usize {
        self.side as usize
    }

    /// Cell at (row, col). Anything outside the side is empty.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.side() && col < self.side() && self.cells[row][col]
    }

    /// Return the shape rotated by 90° in the given direction.
    ///
    /// Clockwise: `new[i][j] = old[n-1-j][i]`.
    /// Counter-clockwise: `new[i][j] = old[j][n-1-i]`.
    pub fn rotated(&self, direction: RotationDirection) -> Self {
        let n = self.side();
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = match direction {
                    RotationDirection::Clockwise => self.cells[n - 1 - j][i],
                    RotationDirection::CounterClockwise => self.cells[j][n - 1 - i],
                };
            }
        }
        Self {
            side: self.side,
            cells,
        }
    }

    /// Filled cells as `(row, col)` offsets, row-major.
    pub fn offsets(&self) -> Offsets {
        let mut out = Offsets::new();
        for row in 0..self.side() {
            for col in 0..self.side() {
                if self.cells[row][col] {
                    out.push((row as i8, col as i8));
                }
            }
        }
        out
    }
}

/// Immutable definition of one piece type, as loaded from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTemplate {
    key: Arc<str>,
    color: PieceColor,
    shape: ShapeMatrix,
    offsets: Offsets,
}

impl PieceTemplate {
    /// Build a template; offsets are derived once here and cached.
    pub fn new(key: &str, color: PieceColor, shape: ShapeMatrix) -> Self {
        Self {
            key: Arc::from(key),
            color,
            offsets: shape.offsets(),
            shape,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn color(&self) -> &PieceColor {
        &self.color
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    pub fn offsets(&self) -> &[CellOffset] {
        &self.offsets
    }
}
