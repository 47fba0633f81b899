//! Active falling piece
//!
//! Every move, drop and rotation is transactional: the candidate placement is
//! checked with [`collides`] first and only committed when it fits, so a live
//! piece never overlaps the stack or leaves the board.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::board::{collides, Board};
use crate::error::EngineError;
use crate::pieces::{CellOffset, Offsets, PieceTemplate, ShapeMatrix};
use crate::types::{PieceColor, RotationDirection, MAX_SHAPE_SIDE, SPAWN_POSITION};

/// Absolute board cells covered by a piece
pub type PieceCells = ArrayVec<CellOffset, { MAX_SHAPE_SIDE * MAX_SHAPE_SIDE }>;

#[derive(Debug, Clone, PartialEq)]
pub struct Tetramino {
    template: Arc<PieceTemplate>,
    shape: ShapeMatrix,
    offsets: Offsets,
    x: i8,
    y: i8,
    home: (i8, i8),
}

impl Tetramino {
    /// Create a piece at its home position. The placement is not validated;
    /// use [`Tetramino::spawn`] to place it against a board.
    pub fn new(template: Arc<PieceTemplate>, home: (i8, i8)) -> Self {
        Self {
            shape: *template.shape(),
            offsets: template.offsets().iter().copied().collect(),
            template,
            x: home.0,
            y: home.1,
            home,
        }
    }

    /// Piece at the default spawn position
    pub fn at_spawn(template: Arc<PieceTemplate>) -> Self {
        Self::new(template, SPAWN_POSITION)
    }

    pub fn template(&self) -> &Arc<PieceTemplate> {
        &self.template
    }

    pub fn key(&self) -> &str {
        self.template.key()
    }

    pub fn color(&self) -> &PieceColor {
        self.template.color()
    }

    pub fn shape(&self) -> &ShapeMatrix {
        &self.shape
    }

    pub fn offsets(&self) -> &[CellOffset] {
        &self.offsets
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn home(&self) -> (i8, i8) {
        self.home
    }

    /// Take shape, offsets and color from `template`. The anchor stays put.
    pub fn set_type(&mut self, template: Arc<PieceTemplate>) {
        self.shape = *template.shape();
        self.offsets = template.offsets().iter().copied().collect();
        self.template = template;
    }

    /// Move back home as a fresh piece of type `template`.
    ///
    /// Returns false if the piece does not fit there; the caller must treat
    /// that as game over.
    pub fn spawn(&mut self, template: Arc<PieceTemplate>, board: &Board) -> bool {
        self.x = self.home.0;
        self.y = self.home.1;
        self.set_type(template);
        !self.collides(board)
    }

    /// Shift sideways by `delta`; a blocked shift leaves the piece in place.
    pub fn move_horizontal(&mut self, delta: i8, board: &Board) {
        self.try_shift(delta, 0, board);
    }

    /// Move down one row. Returns false (and stays put) once the piece has landed.
    pub fn soft_drop(&mut self, board: &Board) -> bool {
        self.try_shift(0, -1, board)
    }

    /// Rotate by 90° without wall kicks.
    ///
    /// A rotation that would collide is rejected and the piece keeps its
    /// previous shape; the anchor never moves.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> bool {
        let shape = self.shape.rotated(direction);
        let offsets = shape.offsets();
        if collides(absolute(self.x, self.y, &offsets), board) {
            return false;
        }
        self.shape = shape;
        self.offsets = offsets;
        true
    }

    /// Rotate using the raw `+1`/`-1` direction of the command surface.
    pub fn rotate_raw(&mut self, direction: i8, board: &Board) -> Result<bool, EngineError> {
        let direction = RotationDirection::try_from(direction)?;
        Ok(self.rotate(direction, board))
    }

    /// Absolute board cells (anchor + offsets), in offset order.
    pub fn occupied_cells(&self) -> PieceCells {
        absolute(self.x, self.y, &self.offsets).collect()
    }

    /// Whether the current placement overlaps the stack or leaves the board.
    pub fn collides(&self, board: &Board) -> bool {
        collides(absolute(self.x, self.y, &self.offsets), board)
    }

    fn try_shift(&mut self, dx: i8, dy: i8, board: &Board) -> bool {
        let (x, y) = (self.x.saturating_add(dx), self.y.saturating_add(dy));
        if collides(absolute(x, y, &self.offsets), board) {
            return false;
        }
        self.x = x;
        self.y = y;
        true
    }
}

fn absolute(x: i8, y: i8, offsets: &[CellOffset]) -> impl Iterator<Item = CellOffset> + '_ {
    offsets
        .iter()
        .map(move |&(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

    fn template(key: &str, rows: &[&str]) -> Arc<PieceTemplate> {
        Arc::new(PieceTemplate::new(
            key,
            PieceColor::new("#A000F0"),
            ShapeMatrix::parse_rows(rows).unwrap(),
        ))
    }

    fn t_piece() -> Arc<PieceTemplate> {
        template("T", &["0100", "1100", "0100", "0000"])
    }

    fn i_piece() -> Arc<PieceTemplate> {
        template("I", &["0000", "1111", "0000", "0000"])
    }

    fn in_bounds(cells: &[CellOffset]) -> bool {
        cells
            .iter()
            .all(|&(x, y)| (0..BOARD_WIDTH as i8).contains(&x) && (0..BOARD_HEIGHT as i8).contains(&y))
    }

    #[test]
    fn test_spawn_places_at_home() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(t_piece());
        assert!(piece.spawn(t_piece(), &board));
        assert_eq!((piece.x(), piece.y()), SPAWN_POSITION);
        assert_eq!(
            piece.occupied_cells().as_slice(),
            &[(4, 19), (5, 18), (5, 19), (6, 19)]
        );
    }

    #[test]
    fn test_spawn_rejected_when_blocked() {
        let mut board = Board::new();
        board.set(5, 19, Some(PieceColor::new("#FFFFFF")));
        let mut piece = Tetramino::at_spawn(t_piece());
        assert!(!piece.spawn(t_piece(), &board));
    }

    #[test]
    fn test_set_type_keeps_anchor() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(t_piece());
        piece.move_horizontal(-2, &board);
        piece.set_type(i_piece());
        assert_eq!(piece.key(), "I");
        assert_eq!((piece.x(), piece.y()), (2, 18));
        assert_eq!(piece.offsets(), &[(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_move_blocked_by_wall_is_noop() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(t_piece());
        for _ in 0..20 {
            piece.move_horizontal(-1, &board);
        }
        assert_eq!(piece.x(), 0);
        for _ in 0..20 {
            piece.move_horizontal(1, &board);
        }
        // T occupies columns x..=x+2.
        assert_eq!(piece.x(), 7);
        assert!(in_bounds(&piece.occupied_cells()));
    }

    #[test]
    fn test_move_blocked_by_stack_is_noop() {
        let mut board = Board::new();
        board.set(3, 19, Some(PieceColor::new("#FFFFFF")));
        let mut piece = Tetramino::at_spawn(t_piece());
        piece.move_horizontal(-1, &board);
        assert_eq!(piece.x(), 4);
    }

    #[test]
    fn test_soft_drop_until_floor() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(t_piece());
        let mut drops = 0;
        while piece.soft_drop(&board) {
            drops += 1;
        }
        // Lowest T offset has y = 0, so the anchor reaches row 0.
        assert_eq!(drops, 18);
        assert_eq!(piece.y(), 0);
        assert!(!piece.soft_drop(&board));
        assert_eq!(piece.y(), 0);
    }

    #[test]
    fn test_rotate_round_trip() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(t_piece());
        let original = *piece.shape();
        assert!(piece.rotate(RotationDirection::Clockwise, &board));
        assert_ne!(*piece.shape(), original);
        assert!(piece.rotate(RotationDirection::CounterClockwise, &board));
        assert_eq!(*piece.shape(), original);
        assert_eq!((piece.x(), piece.y()), SPAWN_POSITION);
    }

    #[test]
    fn test_rotate_rejected_against_wall() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(i_piece());
        // Vertical I at x+1; push it to the right wall.
        for _ in 0..10 {
            piece.move_horizontal(1, &board);
        }
        assert_eq!(piece.x(), 8);
        let before = piece.clone();
        // Horizontal I would need columns 8..=11.
        assert!(!piece.rotate(RotationDirection::Clockwise, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotate_raw_rejects_invalid_direction() {
        let board = Board::new();
        let mut piece = Tetramino::at_spawn(t_piece());
        assert_eq!(piece.rotate_raw(1, &board), Ok(true));
        assert!(matches!(
            piece.rotate_raw(0, &board),
            Err(EngineError::InvalidDirection(_))
        ));
        assert!(piece.rotate_raw(2, &board).is_err());
    }
}
