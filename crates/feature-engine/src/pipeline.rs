//! Declarative Feature Pipeline
//!
//! A list of [`FeatureSpec`]s evaluated against one input frame. Each spec
//! appends one output column; specs only ever see the original input
//! columns, never each other's outputs.

use crate::config::PipelineConfig;
use crate::ema::{ema, lagged_ema};
use crate::engine::FeatureEngine;
use crate::error::{FeatureError, Result};
use crate::frequency::categorical_to_frequency;
use crate::numeric::zero_if_missing;
use crate::recency::days_since_result;
use feature_frame::{Frame, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

fn default_shift() -> isize {
    1
}

/// One derived column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureSpec {
    /// Occurrence count of the field's value across the frame
    Frequency { field: String, output: String },

    /// EMA of `field`, optionally restarted per group
    Ema {
        field: String,
        n_period: usize,
        #[serde(default)]
        group_by: Option<String>,
        output: String,
    },

    /// EMA shifted by `shift` rows (per group when grouped)
    LaggedEma {
        field: String,
        n_period: usize,
        #[serde(default = "default_shift")]
        shift: isize,
        init: f64,
        #[serde(default)]
        group_by: Option<String>,
        output: String,
    },

    /// Decayed sum of strictly prior values per group
    LaggedDecay {
        field: String,
        group_by: String,
        output: String,
    },

    /// Whole days since each group's first row
    DaysToFirstEvent {
        group_by: String,
        time_field: String,
        output: String,
    },

    /// Days since the last row with `field >= threshold`.
    ///
    /// Ungrouped outputs are floats with a NaN sentinel; grouped outputs are
    /// whole days with a -1 sentinel.
    DaysSinceResult {
        field: String,
        time_field: String,
        threshold: f64,
        #[serde(default)]
        group_by: Option<String>,
        output: String,
    },
}

impl FeatureSpec {
    /// Name of the column this spec appends
    pub fn output(&self) -> &str {
        match self {
            FeatureSpec::Frequency { output, .. }
            | FeatureSpec::Ema { output, .. }
            | FeatureSpec::LaggedEma { output, .. }
            | FeatureSpec::LaggedDecay { output, .. }
            | FeatureSpec::DaysToFirstEvent { output, .. }
            | FeatureSpec::DaysSinceResult { output, .. } => output,
        }
    }

    /// Evaluate against `frame`, producing one value per row
    fn evaluate(&self, engine: &FeatureEngine, frame: &Frame) -> Result<Vec<Value>> {
        match self {
            FeatureSpec::Frequency { field, .. } => {
                Ok(ints(categorical_to_frequency(frame, field)?.into_iter().map(|c| c as i64)))
            }
            FeatureSpec::Ema {
                field,
                n_period,
                group_by: Some(group),
                ..
            } => Ok(floats(engine.grouped_ema(frame, field, *n_period, group)?)),
            FeatureSpec::Ema {
                field,
                n_period,
                group_by: None,
                ..
            } => Ok(floats(ema(&dense_column(frame, field)?, *n_period)?)),
            FeatureSpec::LaggedEma {
                field,
                n_period,
                shift,
                init,
                group_by: Some(group),
                ..
            } => Ok(floats(engine.grouped_lagged_ema(
                frame, field, *n_period, group, *shift, *init,
            )?)),
            FeatureSpec::LaggedEma {
                field,
                n_period,
                shift,
                init,
                group_by: None,
                ..
            } => Ok(floats(lagged_ema(
                &dense_column(frame, field)?,
                *n_period,
                *shift,
                *init,
            )?)),
            FeatureSpec::LaggedDecay {
                field, group_by, ..
            } => Ok(floats(engine.grouped_lagged_decay(frame, group_by, field)?)),
            FeatureSpec::DaysToFirstEvent {
                group_by,
                time_field,
                ..
            } => Ok(ints(engine.days_to_first_event(frame, group_by, time_field)?)),
            FeatureSpec::DaysSinceResult {
                field,
                time_field,
                threshold,
                group_by: Some(group),
                ..
            } => Ok(ints(engine.grouped_days_since_value(
                frame, group, field, time_field, *threshold,
            )?)),
            FeatureSpec::DaysSinceResult {
                field,
                time_field,
                threshold,
                group_by: None,
                ..
            } => {
                let series: Vec<f64> = frame
                    .numeric_column(field)?
                    .into_iter()
                    .map(|v| v.unwrap_or(f64::NAN))
                    .collect();
                let times = frame.time_column(time_field)?;
                Ok(floats(days_since_result(&series, &times, *threshold)?))
            }
        }
    }
}

/// Numeric column with missing values already coerced to zero
fn dense_column(frame: &Frame, field: &str) -> Result<Vec<f64>> {
    Ok(frame
        .numeric_column(field)?
        .into_iter()
        .map(zero_if_missing)
        .collect())
}

fn floats(values: Vec<f64>) -> Vec<Value> {
    values.into_iter().map(Value::Float).collect()
}

fn ints(values: impl IntoIterator<Item = i64>) -> Vec<Value> {
    values.into_iter().map(Value::Int).collect()
}

/// Evaluates a fixed list of feature specs
#[derive(Debug, Clone, Default)]
pub struct FeaturePipeline {
    engine: FeatureEngine,
    features: Vec<FeatureSpec>,
}

impl FeaturePipeline {
    /// Build a pipeline; output names must be unique
    pub fn new(engine: FeatureEngine, features: Vec<FeatureSpec>) -> Result<Self> {
        let mut seen = HashSet::new();
        for spec in &features {
            if !seen.insert(spec.output()) {
                return Err(FeatureError::invalid(
                    "output",
                    format!("duplicate output column '{}'", spec.output()),
                ));
            }
        }
        Ok(Self { engine, features })
    }

    /// Build a pipeline from a loaded configuration
    pub fn from_config(config: PipelineConfig) -> Result<Self> {
        Self::new(FeatureEngine::new(config.engine), config.features)
    }

    /// Feature specs in evaluation order
    pub fn features(&self) -> &[FeatureSpec] {
        &self.features
    }

    /// Compute every feature and return a new frame with the outputs
    /// appended in spec order. The input frame is not modified.
    pub fn run(&self, frame: &Frame) -> Result<Frame> {
        for spec in &self.features {
            if frame.records().iter().any(|r| r.contains(spec.output())) {
                return Err(FeatureError::invalid(
                    "output",
                    format!("output column '{}' already exists in the input", spec.output()),
                ));
            }
        }

        let columns = self
            .features
            .iter()
            .map(|spec| {
                debug!("Computing feature '{}'", spec.output());
                spec.evaluate(&self.engine, frame)
                    .map(|values| (spec.output(), values))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut output = frame.clone();
        for (name, values) in columns {
            output = output.with_column(name, values)?;
        }
        Ok(output)
    }
}
