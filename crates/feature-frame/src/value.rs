//! Field Values and Group Keys

use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single field value in a record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// Explicitly missing value
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Time(Timestamp),
}

impl Value {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Time(_) => "time",
        }
    }

    /// Whether this value counts as missing (null or NaN)
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the value.
    ///
    /// `Ok(None)` means missing (null or NaN). Text and time values are not
    /// numeric and yield `Err` with the offending kind.
    pub fn as_f64(&self) -> Result<Option<f64>, &'static str> {
        match self {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            Value::Int(v) => Ok(Some(*v as f64)),
            Value::Float(v) if v.is_nan() => Ok(None),
            Value::Float(v) => Ok(Some(*v)),
            other => Err(other.kind()),
        }
    }

    /// Timestamp view of the value
    pub fn as_time(&self) -> Option<Timestamp> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Time(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Hashable projection of a non-missing value.
///
/// Only equality and hashing are defined; keys carry no ordering. Numbers
/// that compare equal share a key: `Bool(true)`, `Int(1)` and `Float(1.0)`
/// all map to `Int(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Int(i64),
    /// Non-integral float, by bit pattern
    Float(u64),
    Text(String),
    Time(Timestamp),
}

/// Largest magnitude at which every integral f64 converts to i64 exactly
const EXACT_INT_LIMIT: f64 = 9_007_199_254_740_992.0;

impl GroupKey {
    /// Project a value into a key; `None` for missing values
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(GroupKey::Int(*b as i64)),
            Value::Int(v) => Some(GroupKey::Int(*v)),
            Value::Float(v) if v.is_nan() => None,
            Value::Float(v) if v.fract() == 0.0 && v.abs() <= EXACT_INT_LIMIT => {
                Some(GroupKey::Int(*v as i64))
            }
            Value::Float(v) => Some(GroupKey::Float(v.to_bits())),
            Value::Text(s) => Some(GroupKey::Text(s.clone())),
            Value::Time(t) => Some(GroupKey::Time(*t)),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Int(v) => write!(f, "{}", v),
            GroupKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            GroupKey::Text(s) => write!(f, "{}", s),
            GroupKey::Time(t) => write!(f, "{}", t),
        }
    }
}
