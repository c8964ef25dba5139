//! Feature Transform Engine
//!
//! Deterministic numeric recurrences over ordered, optionally grouped rows:
//! exponential moving averages, decayed historical sums, recency counters
//! and frequency encodings. Every output is index-aligned with the input
//! frame; no state survives between calls.

mod config;
mod decay;
mod ema;
mod engine;
mod error;
mod frequency;
mod numeric;
mod partition;
mod pipeline;
mod recency;

pub use crate::config::{EngineConfig, PipelineConfig};
pub use decay::{grouped_lagged_decay, lagged_decay, DECAY_FACTOR};
pub use ema::{alpha, ema, grouped_ema, grouped_lagged_ema, lagged_ema};
pub use engine::FeatureEngine;
pub use error::{FeatureError, Result};
pub use frequency::{categorical_to_frequency, frequency_encode};
pub use partition::Partitions;
pub use pipeline::{FeaturePipeline, FeatureSpec};
pub use recency::{
    days_since_result, days_to_first_event, grouped_days_since_result,
    grouped_days_since_value, NO_PRIOR_RESULT,
};

pub use feature_frame::{Frame, GroupKey, Record, Timestamp, Value};
