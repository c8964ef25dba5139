//! Grouped transform driver

use crate::config::EngineConfig;
use crate::error::Result;
use crate::partition::Partitions;
use feature_frame::Frame;
use tracing::debug;

/// Runs grouped transforms under one execution config.
///
/// Holds no state between calls; the transforms themselves live in the
/// `ema`, `decay`, `recency` and `frequency` modules.
#[derive(Debug, Clone, Default)]
pub struct FeatureEngine {
    config: EngineConfig,
}

impl FeatureEngine {
    /// Create an engine with the given execution config
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Execution config in use
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Partition `frame` by `group_key` and evaluate `f` once per group.
    ///
    /// `f` receives the group's original row indices in order and must
    /// return one value per index.
    pub(crate) fn per_group<T, F>(&self, frame: &Frame, group_key: &str, f: F) -> Result<Vec<T>>
    where
        T: Default + Clone + Send,
        F: Fn(&[usize]) -> Result<Vec<T>> + Sync,
    {
        let partitions = Partitions::from_field(frame, group_key)?;
        let parallel = self.config.use_parallel(partitions.len());
        debug!(
            "Grouping by '{}': rows={}, groups={}, parallel={}",
            group_key,
            partitions.row_count(),
            partitions.len(),
            parallel
        );
        partitions.map(parallel, f)
    }
}
