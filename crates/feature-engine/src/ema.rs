//! Exponential Moving Average
//!
//! `alpha = 2 / (n_period + 1)`; the first value seeds the recurrence and
//! each later value blends in at `alpha`. Lagged variants shift the smoothed
//! series forward so that a row only sees history strictly before it.

use crate::engine::FeatureEngine;
use crate::error::{FeatureError, Result};
use crate::numeric::zero_if_missing;
use feature_frame::Frame;
use std::iter;
use tracing::debug;

/// Smoothing factor for a period; `n_period` must be at least 1
pub fn alpha(n_period: usize) -> Result<f64> {
    if n_period < 1 {
        return Err(FeatureError::invalid(
            "n_period",
            format!("must be >= 1, got {}", n_period),
        ));
    }
    Ok(2.0 / (n_period as f64 + 1.0))
}

fn check_shift(shift: isize) -> Result<usize> {
    usize::try_from(shift)
        .map_err(|_| FeatureError::invalid("shift", format!("must be >= 0, got {}", shift)))
}

/// EMA recurrence over values in order; missing values enter as zero
fn smooth<I>(values: I, alpha: f64) -> Vec<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut prev: Option<f64> = None;
    values
        .into_iter()
        .map(|value| {
            let value = zero_if_missing(value);
            let next = match prev {
                None => value,
                Some(prev) => alpha * value + (1.0 - alpha) * prev,
            };
            prev = Some(next);
            next
        })
        .collect()
}

/// Move every value `shift` positions later, filling the head with `init`
fn lag(values: Vec<f64>, shift: usize, init: f64) -> Vec<f64> {
    let len = values.len();
    iter::repeat(init)
        .take(shift.min(len))
        .chain(values.into_iter().take(len.saturating_sub(shift)))
        .collect()
}

/// Exponential moving average of a series
pub fn ema(series: &[f64], n_period: usize) -> Result<Vec<f64>> {
    let alpha = alpha(n_period)?;
    Ok(smooth(series.iter().map(|&v| Some(v)), alpha))
}

/// EMA shifted by `shift` rows; the first `shift` outputs are `init`
pub fn lagged_ema(series: &[f64], n_period: usize, shift: isize, init: f64) -> Result<Vec<f64>> {
    let alpha = alpha(n_period)?;
    let shift = check_shift(shift)?;
    Ok(lag(smooth(series.iter().map(|&v| Some(v)), alpha), shift, init))
}

impl FeatureEngine {
    /// EMA of `field`, restarted at the first row of every group
    pub fn grouped_ema(
        &self,
        frame: &Frame,
        field: &str,
        n_period: usize,
        group_key: &str,
    ) -> Result<Vec<f64>> {
        let alpha = alpha(n_period)?;
        let values = frame.numeric_column(field)?;
        debug!("grouped_ema: field='{}', n_period={}", field, n_period);

        self.per_group(frame, group_key, |rows| {
            Ok(smooth(rows.iter().map(|&row| values[row]), alpha))
        })
    }

    /// Lagged EMA per group: the first `shift` rows of every group get `init`
    pub fn grouped_lagged_ema(
        &self,
        frame: &Frame,
        field: &str,
        n_period: usize,
        group_key: &str,
        shift: isize,
        init: f64,
    ) -> Result<Vec<f64>> {
        let alpha = alpha(n_period)?;
        let shift = check_shift(shift)?;
        let values = frame.numeric_column(field)?;
        debug!(
            "grouped_lagged_ema: field='{}', n_period={}, shift={}",
            field, n_period, shift
        );

        self.per_group(frame, group_key, |rows| {
            let smoothed = smooth(rows.iter().map(|&row| values[row]), alpha);
            Ok(lag(smoothed, shift, init))
        })
    }
}

/// [`FeatureEngine::grouped_ema`] with the default engine config
pub fn grouped_ema(frame: &Frame, field: &str, n_period: usize, group_key: &str) -> Result<Vec<f64>> {
    FeatureEngine::default().grouped_ema(frame, field, n_period, group_key)
}

/// [`FeatureEngine::grouped_lagged_ema`] with the default engine config
pub fn grouped_lagged_ema(
    frame: &Frame,
    field: &str,
    n_period: usize,
    group_key: &str,
    shift: isize,
    init: f64,
) -> Result<Vec<f64>> {
    FeatureEngine::default().grouped_lagged_ema(frame, field, n_period, group_key, shift, init)
}
