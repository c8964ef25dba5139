//! Recency Tracker
//!
//! Day counts since a group's first event or since the most recent
//! qualifying event. The two "no history" sentinels differ on purpose:
//! the ungrouped [`days_since_result`] reports NaN, the grouped
//! [`grouped_days_since_result`] reports [`NO_PRIOR_RESULT`] (-1). Callers
//! depend on both, so they are kept distinct.

use crate::engine::FeatureEngine;
use crate::error::{FeatureError, Result};
use crate::numeric::whole_days;
use feature_frame::{Frame, Timestamp};
use tracing::{debug, warn};

/// Grouped sentinel for "no qualifying row earlier in this group"
pub const NO_PRIOR_RESULT: i64 = -1;

/// Threshold for the binary "occurred" flag
const OCCURRED: f64 = 1.0;

fn check_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_nan() {
        return Err(FeatureError::invalid("value", "threshold must not be NaN"));
    }
    Ok(threshold)
}

/// Days since the most recent earlier position whose value is `>= value`.
///
/// Position `t` only looks at `t' < t`. Without such a position the output
/// is NaN, so position 0 is always NaN. NaN series values never qualify.
pub fn days_since_result(series: &[f64], timestamps: &[Timestamp], value: f64) -> Result<Vec<f64>> {
    if series.len() != timestamps.len() {
        return Err(FeatureError::LengthMismatch {
            left: series.len(),
            right: timestamps.len(),
        });
    }
    let threshold = check_threshold(value)?;

    let mut last: Option<Timestamp> = None;
    let output = series
        .iter()
        .zip(timestamps)
        .map(|(&v, &time)| {
            let out = last.map_or(f64::NAN, |prev| whole_days(time, prev) as f64);
            if v >= threshold {
                last = Some(time);
            }
            out
        })
        .collect();
    Ok(output)
}

impl FeatureEngine {
    /// Whole days from each group's first row to every row of the group.
    ///
    /// Timestamps must be non-decreasing within each group; rows are never
    /// reordered, so violations show up as negative counts.
    pub fn days_to_first_event(&self, frame: &Frame, group_key: &str, time_field: &str) -> Result<Vec<i64>> {
        let times = frame.time_column(time_field)?;
        debug!("days_to_first_event: time_field='{}'", time_field);

        let output = self.per_group(frame, group_key, |rows| {
            let first = match rows.first() {
                Some(&row) => times[row],
                None => return Ok(Vec::new()),
            };
            Ok(rows.iter().map(|&row| whole_days(times[row], first)).collect())
        })?;

        let negative = output.iter().filter(|&&days| days < 0).count();
        if negative > 0 {
            warn!(
                "days_to_first_event: {} rows precede their group's first timestamp ('{}' not sorted within '{}')",
                negative, time_field, group_key
            );
        }
        Ok(output)
    }

    /// Whole days since the most recent earlier row of the same group with
    /// `field >= threshold`; [`NO_PRIOR_RESULT`] when there is none.
    ///
    /// Missing values in `field` never qualify.
    pub fn grouped_days_since_value(
        &self,
        frame: &Frame,
        group_key: &str,
        field: &str,
        time_field: &str,
        threshold: f64,
    ) -> Result<Vec<i64>> {
        let threshold = check_threshold(threshold)?;
        let values = frame.numeric_column(field)?;
        let times = frame.time_column(time_field)?;
        debug!(
            "grouped_days_since_value: field='{}', time_field='{}', threshold={}",
            field, time_field, threshold
        );

        self.per_group(frame, group_key, |rows| {
            let mut last: Option<Timestamp> = None;
            let output = rows
                .iter()
                .map(|&row| {
                    let time = times[row];
                    let out = last.map_or(NO_PRIOR_RESULT, |prev| whole_days(time, prev));
                    if values[row].is_some_and(|v| v >= threshold) {
                        last = Some(time);
                    }
                    out
                })
                .collect();
            Ok(output)
        })
    }

    /// [`grouped_days_since_value`](Self::grouped_days_since_value) with the
    /// qualifying threshold fixed at 1 (a binary "occurred" flag)
    pub fn grouped_days_since_result(
        &self,
        frame: &Frame,
        group_key: &str,
        field: &str,
        time_field: &str,
    ) -> Result<Vec<i64>> {
        self.grouped_days_since_value(frame, group_key, field, time_field, OCCURRED)
    }
}

/// [`FeatureEngine::days_to_first_event`] with the default engine config
pub fn days_to_first_event(frame: &Frame, group_key: &str, time_field: &str) -> Result<Vec<i64>> {
    FeatureEngine::default().days_to_first_event(frame, group_key, time_field)
}

/// [`FeatureEngine::grouped_days_since_value`] with the default engine config
pub fn grouped_days_since_value(
    frame: &Frame,
    group_key: &str,
    field: &str,
    time_field: &str,
    threshold: f64,
) -> Result<Vec<i64>> {
    FeatureEngine::default().grouped_days_since_value(frame, group_key, field, time_field, threshold)
}

/// [`FeatureEngine::grouped_days_since_result`] with the default engine config
pub fn grouped_days_since_result(
    frame: &Frame,
    group_key: &str,
    field: &str,
    time_field: &str,
) -> Result<Vec<i64>> {
    FeatureEngine::default().grouped_days_since_result(frame, group_key, field, time_field)
}
