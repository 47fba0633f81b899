//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events onto [`crate::types::GameAction`]. Bindings are fixed.

pub mod map;

pub use simple_tetris_types as types;

pub use map::{handle_key_event, is_press, should_quit};
