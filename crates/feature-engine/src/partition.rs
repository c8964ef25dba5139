//! Ordering & Grouping Substrate
//!
//! Splits row indices by group key without reordering rows inside a group,
//! and scatters per-group results back to their original row positions.

use crate::error::{FeatureError, Result};
use feature_frame::{Frame, GroupKey};
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;

/// Row indices grouped by key, in first-appearance order of the keys.
///
/// Keys only need `Hash + Eq`; no ordering is ever imposed on them.
#[derive(Debug, Clone)]
pub struct Partitions<K = GroupKey> {
    keys: Vec<K>,
    groups: Vec<Vec<usize>>,
    row_count: usize,
}

impl<K: Hash + Eq + Clone> Partitions<K> {
    /// Partition `row_count` rows with a fallible key function.
    ///
    /// The first error aborts partitioning.
    pub fn by_key<E, F>(row_count: usize, mut key_fn: F) -> std::result::Result<Self, E>
    where
        F: FnMut(usize) -> std::result::Result<K, E>,
    {
        let mut slots: HashMap<K, usize> = HashMap::new();
        let mut keys = Vec::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for row in 0..row_count {
            let key = key_fn(row)?;
            let slot = match slots.get(&key) {
                Some(&slot) => slot,
                None => {
                    slots.insert(key.clone(), groups.len());
                    keys.push(key);
                    groups.push(Vec::new());
                    groups.len() - 1
                }
            };
            groups[slot].push(row);
        }

        Ok(Self {
            keys,
            groups,
            row_count,
        })
    }

    /// Partition a list of keys, one per row
    pub fn from_keys(keys: &[K]) -> Self {
        match Self::by_key(keys.len(), |row| Ok::<_, std::convert::Infallible>(keys[row].clone())) {
            Ok(partitions) => partitions,
            Err(never) => match never {},
        }
    }
}

impl Partitions<GroupKey> {
    /// Partition a frame by the value of `field`; every row must carry it
    pub fn from_field(frame: &Frame, field: &str) -> Result<Self> {
        let keys = frame.key_column(field)?;
        Ok(Self::from_keys(&keys))
    }
}

impl<K> Partitions<K> {
    /// Number of distinct groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups (empty input)
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of rows across all groups
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Groups as (key, original row indices), in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &[usize])> {
        self.keys
            .iter()
            .zip(self.groups.iter().map(Vec::as_slice))
    }

    /// Original row indices of every group, in first-appearance order
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    /// Scatter per-group results back to original row order.
    ///
    /// `results[g]` must hold exactly one value per row of group `g`.
    pub fn reassemble<T: Default + Clone>(&self, results: Vec<Vec<T>>) -> Result<Vec<T>> {
        if results.len() != self.groups.len() {
            return Err(FeatureError::LengthMismatch {
                left: self.groups.len(),
                right: results.len(),
            });
        }

        let mut output = vec![T::default(); self.row_count];
        for (rows, values) in self.groups.iter().zip(results) {
            if rows.len() != values.len() {
                return Err(FeatureError::LengthMismatch {
                    left: rows.len(),
                    right: values.len(),
                });
            }
            for (&row, value) in rows.iter().zip(values) {
                output[row] = value;
            }
        }
        Ok(output)
    }

    /// Run `f` over every group's row indices and reassemble the results.
    ///
    /// With `parallel` set, groups are evaluated on the rayon pool; the
    /// scatter back to original positions is the same either way.
    pub fn map<T, F>(&self, parallel: bool, f: F) -> Result<Vec<T>>
    where
        T: Default + Clone + Send,
        F: Fn(&[usize]) -> Result<Vec<T>> + Sync,
    {
        let results: Result<Vec<Vec<T>>> = if parallel {
            self.groups.par_iter().map(|rows| f(rows)).collect()
        } else {
            self.groups.iter().map(|rows| f(rows)).collect()
        };
        self.reassemble(results?)
    }
}
