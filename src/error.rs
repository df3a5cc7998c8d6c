//! Crate-level error types.

use std::fmt;

use crate::selection::EntityKind;

/// Errors produced by the meshview crate.
///
/// Apart from I/O and options parsing, none of these are fatal: picking and
/// camera failures degrade to "no change" and are logged by the session.
#[derive(Debug)]
pub enum MeshViewError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Camera fit requested with no visible coordinates.
    EmptyBoundsFit,
    /// A decoded index has no live entity of the requested kind.
    IndexOutOfRange {
        /// Kind being picked when the index was decoded.
        kind: EntityKind,
        /// The decoded index.
        index: usize,
    },
    /// A pixel channel fell below the codec's lower margin.
    DecodeUnderflow,
    /// A pixel channel fell above the codec's upper margin.
    DecodeOverflow,
    /// The add tool was asked to emit with the wrong number of picks.
    InvalidGestureArity {
        /// Coordinates required by the target element kind.
        expected: usize,
        /// Coordinates actually accumulated.
        got: usize,
    },
}

impl fmt::Display for MeshViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::EmptyBoundsFit => {
                write!(f, "no visible coordinates to fit the camera to")
            }
            Self::IndexOutOfRange { kind, index } => {
                write!(f, "decoded {kind} index {index} has no live entity")
            }
            Self::DecodeUnderflow => {
                write!(f, "pixel channel below codec margin")
            }
            Self::DecodeOverflow => {
                write!(f, "pixel channel above codec margin")
            }
            Self::InvalidGestureArity { expected, got } => {
                write!(f, "add tool expected {expected} picks, got {got}")
            }
        }
    }
}

impl std::error::Error for MeshViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MeshViewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
