//! Transform Error Types

use feature_frame::FrameError;
use thiserror::Error;

/// Errors raised by feature transforms. Any error aborts the whole call.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Out-of-domain argument, rejected before any computation
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Referenced field absent from a row
    #[error("Missing field '{field}' at row {row}")]
    MissingField { field: String, row: usize },

    /// Paired sequences of different lengths
    #[error("Length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    /// Field holds a value of the wrong kind
    #[error("Field '{field}' at row {row}: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Pipeline configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl FeatureError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FeatureError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl From<FrameError> for FeatureError {
    fn from(err: FrameError) -> Self {
        match err {
            FrameError::MissingField { field, row } => FeatureError::MissingField { field, row },
            FrameError::TypeMismatch {
                field,
                row,
                expected,
                found,
            } => FeatureError::TypeMismatch {
                field,
                row,
                expected,
                found,
            },
            FrameError::LengthMismatch { left, right } => {
                FeatureError::LengthMismatch { left, right }
            }
        }
    }
}

/// Result alias for transform calls
pub type Result<T> = std::result::Result<T, FeatureError>;
