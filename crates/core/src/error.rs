//! Error types for catalog loading and engine misuse.
//!
//! Ordinary gameplay rejections (a blocked move, a rotation into the stack, a
//! blocked spawn) are not errors; they surface as `bool` returns or unchanged
//! state. The types here cover defects only: a malformed piece resource or a
//! caller passing a rotation direction other than `+1`/`-1`.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::InvalidDirection;

/// A shape block that does not describe a square 0/1 matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has {rows} rows, side must be between 2 and 4")]
    Side { rows: usize },

    #[error("shape row {row} has {len} cells, expected {side}")]
    NotSquare { row: usize, len: usize, side: usize },

    #[error("shape cell ({row}, {col}) is {found:?}, expected '0' or '1'")]
    InvalidCell { row: usize, col: usize, found: char },
}

/// Malformed piece resource. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("piece resource contains no records")]
    Empty,

    #[error("record {record}: missing {field} field")]
    MissingField { record: usize, field: &'static str },

    #[error("record {record}: duplicate piece key {key:?}")]
    DuplicateKey { record: usize, key: String },

    #[error("record {record}: invalid shape for piece {key:?}")]
    Shape {
        record: usize,
        key: String,
        #[source]
        source: ShapeError,
    },
}

/// Failure to load a catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read piece resource {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Programming errors raised by the engine API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    InvalidDirection(#[from] InvalidDirection),
}
