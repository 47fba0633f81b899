//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It does no rendering and no terminal I/O, making it:
//!
//! - **Deterministic**: Same seed (or scripted [`Randomizer`]) produces identical games
//! - **Testable**: the session is stepped synchronously, tick by tick
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`catalog`]: piece resource parsing into templates
//! - [`pieces`]: square shape matrices and 90° matrix rotation
//! - [`tetramino`]: the active piece and its transactional moves
//! - [`board`]: 10x40 grid with collision predicate and line clearing
//! - [`rng`]: injected randomness and the four-piece preview queue
//! - [`scoring`]: classic line-clear points
//! - [`game_state`]: the session state machine (start, gravity, hold, lock, game over)
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Game Rules
//!
//! - Pieces come from a data catalog; there is no per-type behaviour
//! - Rotation is a plain matrix transform; a colliding rotation is rejected (no wall kicks)
//! - Gravity drops the piece every 10 ticks; a piece that cannot drop locks at once (no lock delay)
//! - Hold swaps once per lock
//! - Line clears score 40 / 100 / 300 / 1200
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use simple_tetris_core::{GameSession, PieceCatalog};
//! use simple_tetris_types::{GameAction, GamePhase};
//!
//! let catalog = PieceCatalog::parse("---\nO:#FFFF00:\n11\n11\n").unwrap();
//! let mut game = GameSession::with_seed(Arc::new(catalog), 12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.phase(), GamePhase::Running);
//! assert_eq!(game.board().filled_count(), 4);
//! ```

pub mod board;
pub mod catalog;
pub mod error;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod tetramino;

pub use simple_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{collides, Board};
pub use catalog::PieceCatalog;
pub use error::{CatalogError, EngineError, ParseError, ShapeError};
pub use game_state::{GameSession, HoldSlot};
pub use pieces::{PieceTemplate, ShapeMatrix};
pub use rng::{PreviewQueue, Randomizer, SimpleRng};
pub use scoring::line_clear_score;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tetramino::Tetramino;
