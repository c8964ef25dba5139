//! Decayed historical sums

use crate::engine::FeatureEngine;
use crate::error::Result;
use crate::numeric::zero_if_missing;
use feature_frame::Frame;
use tracing::debug;

/// Weight ratio between consecutive past values (`e^-1`)
pub const DECAY_FACTOR: f64 = 1.0 / std::f64::consts::E;

/// Exponentially decayed sum of strictly prior values.
///
/// `out[0] = 0`, `out[t] = v[t-1] + e^-1 * out[t-1]`. A row's own value never
/// reaches its own output. Missing values count as zero.
pub fn lagged_decay<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut state = 0.0;
    values
        .into_iter()
        .map(|value| {
            let out = state;
            state = zero_if_missing(value) + DECAY_FACTOR * state;
            out
        })
        .collect()
}

impl FeatureEngine {
    /// Lagged decayed sum of `field` within each group
    pub fn grouped_lagged_decay(&self, frame: &Frame, group_key: &str, field: &str) -> Result<Vec<f64>> {
        let values = frame.numeric_column(field)?;
        debug!("grouped_lagged_decay: field='{}'", field);

        self.per_group(frame, group_key, |rows| {
            Ok(lagged_decay(rows.iter().map(|&row| values[row])))
        })
    }
}

/// [`FeatureEngine::grouped_lagged_decay`] with the default engine config
pub fn grouped_lagged_decay(frame: &Frame, group_key: &str, field: &str) -> Result<Vec<f64>> {
    FeatureEngine::default().grouped_lagged_decay(frame, group_key, field)
}
