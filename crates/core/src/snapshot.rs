//! Read-only view of a session for renderers.
//!
//! A snapshot is taken between events; it borrows nothing from the session,
//! so a view can hold it while the session keeps processing input.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::pieces::PieceTemplate;
use crate::tetramino::{PieceCells, Tetramino};
use crate::types::{Cell, GamePhase, PieceColor, BOARD_WIDTH, PREVIEW_LEN, VISIBLE_HEIGHT};

/// Visible rows of the board, indexed `[y][x]` with `y = 0` at the bottom
pub type VisibleBoard = [[Cell; BOARD_WIDTH as usize]; VISIBLE_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSnapshot {
    pub template: Arc<PieceTemplate>,
    pub color: PieceColor,
    pub x: i8,
    pub y: i8,
    pub cells: PieceCells,
}

impl From<&Tetramino> for ActiveSnapshot {
    fn from(value: &Tetramino) -> Self {
        Self {
            template: Arc::clone(value.template()),
            color: value.color().clone(),
            x: value.x(),
            y: value.y(),
            cells: value.occupied_cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub board: VisibleBoard,
    pub active: Option<ActiveSnapshot>,
    pub hold: Option<Arc<PieceTemplate>>,
    pub can_hold: bool,
    pub next_queue: ArrayVec<Arc<PieceTemplate>, PREVIEW_LEN>,
    pub score: u32,
    pub phase: GamePhase,
}

impl ActiveSnapshot {
    pub fn key(&self) -> &str {
        self.template.key()
    }
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        for row in self.board.iter_mut() {
            row.fill(None);
        }
        self.active = None;
        self.hold = None;
        self.can_hold = true;
        self.next_queue.clear();
        self.score = 0;
        self.phase = GamePhase::NotStarted;
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Color of visible cell (x, y), locked or active.
    pub fn color_at(&self, x: i8, y: i8) -> Option<&PieceColor> {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x, y)) {
                return Some(&active.color);
            }
        }
        if x < 0 || y < 0 {
            return None;
        }
        self.board
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .and_then(|cell| cell.as_ref())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: std::array::from_fn(|_| std::array::from_fn(|_| None)),
            active: None,
            hold: None,
            can_hold: true,
            next_queue: ArrayVec::new(),
            score: 0,
            phase: GamePhase::NotStarted,
        }
    }
}
