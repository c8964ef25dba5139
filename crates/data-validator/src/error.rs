//! Validation Error Types

use thiserror::Error;

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Row lacks a required field (or holds null there)
    #[error("Missing required field '{field}' at row {row}")]
    MissingField { field: String, row: usize },

    /// Timestamp earlier than the previous row of the same group
    #[error("Row {row} goes back in time within group {group}")]
    TimeOrder { row: usize, group: String },

    /// Field holds a value of the wrong kind
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
