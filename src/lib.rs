//! Simple Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` so the binary, integration
//! tests and benches share one import path: `simple_tetris::{core,input,term,types}`.

pub use simple_tetris_core as core;
pub use simple_tetris_input as input;
pub use simple_tetris_term as term;
pub use simple_tetris_types as types;

/// Piece resource compiled into the binary; `--pieces` replaces it.
pub const DEFAULT_PIECES: &str = include_str!("../assets/pieces.txt");
