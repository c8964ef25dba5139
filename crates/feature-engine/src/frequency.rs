//! Frequency Encoding

use crate::error::Result;
use feature_frame::{Frame, GroupKey};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

/// Replace each value with its number of occurrences in the whole input
pub fn frequency_encode<K: Hash + Eq>(values: &[K]) -> Vec<usize> {
    let mut counts: HashMap<&K, usize> = HashMap::with_capacity(values.len());
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    values.iter().map(|value| counts[value]).collect()
}

/// Occurrence count of each row's `field` value across the whole frame.
///
/// Not grouped. Missing values (null or NaN) form one category of their own.
pub fn categorical_to_frequency(frame: &Frame, field: &str) -> Result<Vec<usize>> {
    let keys: Vec<Option<GroupKey>> = frame
        .column(field)?
        .into_iter()
        .map(GroupKey::from_value)
        .collect();
    let output = frequency_encode(&keys);
    debug!(
        "categorical_to_frequency: field='{}', rows={}",
        field,
        output.len()
    );
    Ok(output)
}
