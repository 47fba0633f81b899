//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 40 rows (indexed 0-39, bottom to top)
//! - **Visible**: only the bottom 20 rows are drawn
//! - **Spawn position**: (4, 18), the anchor of every freshly spawned piece
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Default gravity tick cadence |
//! | `GRAVITY_TICKS` | 10 | Ticks between two gravity drops |
//!
//! # Examples
//!
//! ```
//! use simple_tetris_types::{GameAction, RotationDirection, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(RotationDirection::try_from(1), Ok(RotationDirection::Clockwise));
//! assert!(RotationDirection::try_from(2).is_err());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 40);
//! ```

use std::fmt;
use std::sync::Arc;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (40 rows, only the bottom part is visible)
pub const BOARD_HEIGHT: u8 = 40;

/// Number of rows drawn by a view, counted from the bottom
pub const VISIBLE_HEIGHT: u8 = 20;

/// Home anchor of every spawned piece (x, y)
pub const SPAWN_POSITION: (i8, i8) = (4, 18);

/// Largest supported shape side (shapes are at most 4x4)
pub const MAX_SHAPE_SIDE: usize = 4;

/// Smallest supported shape side
pub const MIN_SHAPE_SIDE: usize = 2;

/// Number of upcoming pieces shown in the preview queue
pub const PREVIEW_LEN: usize = 4;

/// Default gravity tick interval in milliseconds
pub const TICK_MS: u64 = 100;

/// Gravity countdown: one drop every this many ticks
pub const GRAVITY_TICKS: u32 = 10;

/// Line clear scoring table, indexed by lines cleared in one lock.
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];


/// Direction of a 90° rotation.
///
/// The raw command surface uses `+1` for clockwise and `-1` for
/// counter-clockwise; any other value is rejected by [`TryFrom<i8>`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn as_i8(&self) -> i8 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }

    pub fn inverse(&self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// A raw rotation direction outside `{+1, -1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDirection(pub i8);

impl fmt::Display for InvalidDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rotation direction must be 1 or -1, got {}", self.0)
    }
}

impl std::error::Error for InvalidDirection {}

impl TryFrom<i8> for RotationDirection {
    type Error = InvalidDirection;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RotationDirection::Clockwise),
            -1 => Ok(RotationDirection::CounterClockwise),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Lifecycle phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    /// Waiting for the start command
    #[default]
    NotStarted,
    /// A piece is falling and input is accepted
    Running,
    /// The last spawn was blocked; only reset is accepted
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "notStarted",
            GamePhase::Running => "running",
            GamePhase::GameOver => "gameOver",
        }
    }
}

/// Commands accepted by a game session
///
/// These are produced by the input layer and map 1:1 onto session methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Leave the not-started screen and spawn the first piece
    Start,
    /// Clear everything and begin a new game
    Reset,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell; locks immediately if it cannot move
    SoftDrop,
    /// Drop piece as far as it goes and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Swap the active piece with the hold slot (once per lock)
    Hold,
    /// Ask the shell to exit
    Quit,
}

impl GameAction {
    pub const ALL: [GameAction; 10] = [
        GameAction::Start,
        GameAction::Reset,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::RotateCw,
        GameAction::RotateCcw,
        GameAction::Hold,
        GameAction::Quit,
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "reset" => Some(GameAction::Reset),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "quit" => Some(GameAction::Quit),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::Reset => "reset",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Quit => "quit",
        }
    }
}

/// Color of a piece, kept exactly as written in the piece resource.
///
/// Cloning is cheap (shared string), so board cells can hold one each.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PieceColor(Arc<str>);

impl PieceColor {
    pub fn new(color: &str) -> Self {
        Self(Arc::from(color))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse `#RRGGBB` or `RRGGBB` into components.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        let hex = self.0.strip_prefix('#').unwrap_or(&self.0);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceColor)`: Cell filled by a locked piece of that color
pub type Cell = Option<PieceColor>;
