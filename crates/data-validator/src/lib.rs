//! Input Validation
//!
//! Pre-flight checks a caller can run on a frame before handing it to the
//! feature transforms. Checks collect every violation instead of stopping
//! at the first one, and never modify the frame.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
