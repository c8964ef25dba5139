//! Frame Error Types

use thiserror::Error;

/// Structural errors raised while reading fields out of a frame
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    /// Field absent from a row (or null where a value is required)
    #[error("Missing field '{field}' at row {row}")]
    MissingField { field: String, row: usize },

    /// Field present but holding the wrong kind of value
    #[error("Field '{field}' at row {row}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Paired columns of different lengths
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}
