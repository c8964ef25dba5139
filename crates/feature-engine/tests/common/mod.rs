//! Shared helpers for feature-engine integration tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use feature_engine::Timestamp;

/// Midnight on `y-m-d` plus `offset` days
pub fn date(y: i32, m: u32, d: u32, offset: i64) -> Timestamp {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(offset)
}

/// Element-wise closeness where NaN only matches NaN
pub fn nan_allclose(actual: &[f64], expected: &[f64]) -> bool {
    actual.len() == expected.len()
        && actual.iter().zip(expected).all(|(a, e)| {
            if a.is_nan() || e.is_nan() {
                a.is_nan() && e.is_nan()
            } else {
                (a - e).abs() <= 1e-8 + 1e-5 * e.abs()
            }
        })
}
