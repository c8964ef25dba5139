//! Tabular Data Model
//!
//! Ordered rows of named fields, as handed over by the retrieval layer.
//! Row order is significant: a row's position in the frame is its identity.

mod error;
mod frame;
mod value;

pub use error::FrameError;
pub use frame::{Frame, Record};
pub use value::{GroupKey, Value};

/// Timestamp type carried in time fields
pub type Timestamp = chrono::NaiveDateTime;
