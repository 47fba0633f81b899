//! Terminal rendering for the game.
//!
//! The view draws a [`core::GameSnapshot`] into a character framebuffer and
//! the renderer flushes it through crossterm, two columns per board cell.
//! No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use simple_tetris_core as core;
pub use simple_tetris_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Layout, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
