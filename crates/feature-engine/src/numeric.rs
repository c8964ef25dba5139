//! Numeric coercions applied at the point of use

/// Missing (`None` or NaN) inputs contribute zero to a recurrence
pub(crate) fn zero_if_missing(value: impl Into<Option<f64>>) -> f64 {
    value.into().filter(|v| !v.is_nan()).unwrap_or(0.0)
}

/// Day-granularity difference between two timestamps, truncated to whole days
pub(crate) fn whole_days(later: feature_frame::Timestamp, earlier: feature_frame::Timestamp) -> i64 {
    (later - earlier).num_days()
}
