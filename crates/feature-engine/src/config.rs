//! Engine and pipeline configuration

use crate::error::Result;
use crate::pipeline::FeatureSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Execution settings for grouped transforms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Run independent partitions on the rayon pool
    pub parallel: bool,

    /// Minimum partition count before parallel execution kicks in
    pub min_partitions_for_parallel: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            min_partitions_for_parallel: 64,
        }
    }
}

impl EngineConfig {
    /// Single-threaded execution regardless of partition count
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Parallel execution whenever there is more than one partition
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            min_partitions_for_parallel: 2,
        }
    }

    /// Whether a call over `partitions` groups should fan out
    pub fn use_parallel(&self, partitions: usize) -> bool {
        self.parallel && partitions >= self.min_partitions_for_parallel.max(2)
    }
}

/// Declarative list of features computed over one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub features: Vec<FeatureSpec>,
}

impl PipelineConfig {
    /// Load from a file; the format (TOML, JSON, YAML) follows the extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;
        let pipeline: Self = settings.try_deserialize()?;
        info!(
            "Loaded pipeline from {}: {} features",
            path.display(),
            pipeline.features.len()
        );
        Ok(pipeline)
    }

    /// Parse an inline TOML definition
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
