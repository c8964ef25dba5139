//! Records and Frames

use crate::error::FrameError;
use crate::value::{GroupKey, Value};
use crate::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row: named fields with their values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Set a field, returning the previous value if any
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    /// Look up a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the record carries the field at all
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Field names carried by this record
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Ordered sequence of records. Row position is the index into the frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    records: Vec<Record>,
}

impl Frame {
    /// Create a frame from rows in order
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Build a frame from named, equal-length columns
    pub fn from_columns<S: Into<String>>(columns: Vec<(S, Vec<Value>)>) -> Result<Self, FrameError> {
        let len = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        let mut records = vec![Record::new(); len];

        for (name, column) in columns {
            if column.len() != len {
                return Err(FrameError::LengthMismatch {
                    left: len,
                    right: column.len(),
                });
            }
            let name = name.into();
            for (record, value) in records.iter_mut().zip(column) {
                record.insert(name.clone(), value);
            }
        }

        Ok(Self { records })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the frame has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Look up one field of one row; absent fields are an error
    pub fn value(&self, row: usize, field: &str) -> Result<&Value, FrameError> {
        self.records
            .get(row)
            .and_then(|r| r.get(field))
            .ok_or_else(|| FrameError::MissingField {
                field: field.to_string(),
                row,
            })
    }

    /// Every row's value for a field, in row order
    pub fn column(&self, field: &str) -> Result<Vec<&Value>, FrameError> {
        (0..self.len()).map(|row| self.value(row, field)).collect()
    }

    /// Numeric column; `None` marks a missing (null or NaN) value
    pub fn numeric_column(&self, field: &str) -> Result<Vec<Option<f64>>, FrameError> {
        (0..self.len())
            .map(|row| {
                self.value(row, field)?
                    .as_f64()
                    .map_err(|found| FrameError::TypeMismatch {
                        field: field.to_string(),
                        row,
                        expected: "number",
                        found,
                    })
            })
            .collect()
    }

    /// Timestamp column; a null timestamp is treated as an absent field
    pub fn time_column(&self, field: &str) -> Result<Vec<Timestamp>, FrameError> {
        (0..self.len())
            .map(|row| {
                let value = self.value(row, field)?;
                match value {
                    Value::Time(t) => Ok(*t),
                    Value::Null => Err(FrameError::MissingField {
                        field: field.to_string(),
                        row,
                    }),
                    other => Err(FrameError::TypeMismatch {
                        field: field.to_string(),
                        row,
                        expected: "time",
                        found: other.kind(),
                    }),
                }
            })
            .collect()
    }

    /// Group-key column; every row must carry a non-missing key
    pub fn key_column(&self, field: &str) -> Result<Vec<GroupKey>, FrameError> {
        (0..self.len())
            .map(|row| {
                GroupKey::from_value(self.value(row, field)?).ok_or_else(|| {
                    FrameError::MissingField {
                        field: field.to_string(),
                        row,
                    }
                })
            })
            .collect()
    }

    /// New frame with one column appended; the receiver is left untouched
    pub fn with_column(&self, name: &str, values: Vec<Value>) -> Result<Self, FrameError> {
        if values.len() != self.len() {
            return Err(FrameError::LengthMismatch {
                left: self.len(),
                right: values.len(),
            });
        }

        let records = self
            .records
            .iter()
            .zip(values)
            .map(|(record, value)| record.clone().with(name, value))
            .collect();
        Ok(Self { records })
    }
}

impl From<Vec<Record>> for Frame {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Frame {
        Frame::from_columns(vec![
            ("group", vec![Value::from("a"), Value::from("b"), Value::from("a")]),
            ("price", vec![Value::from(1.0), Value::Null, Value::from(3)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_from_columns_preserves_order() {
        let frame = sample();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.value(2, "price").unwrap(), &Value::Int(3));
    }

    #[test]
    fn test_from_columns_rejects_ragged() {
        let err = Frame::from_columns(vec![
            ("a", vec![Value::from(1.0)]),
            ("b", vec![Value::from(1.0), Value::from(2.0)]),
        ])
        .unwrap_err();
        assert_eq!(err, FrameError::LengthMismatch { left: 1, right: 2 });
    }

    #[test]
    fn test_numeric_column_marks_missing() {
        let frame = sample();
        assert_eq!(
            frame.numeric_column("price").unwrap(),
            vec![Some(1.0), None, Some(3.0)]
        );
    }

    #[test]
    fn test_numeric_column_rejects_text() {
        let frame = sample();
        assert!(matches!(
            frame.numeric_column("group"),
            Err(FrameError::TypeMismatch { row: 0, .. })
        ));
    }

    #[test]
    fn test_missing_field_reports_row() {
        let frame = Frame::new(vec![
            Record::new().with("k", 1),
            Record::new().with("other", 1),
        ]);
        assert_eq!(
            frame.key_column("k").unwrap_err(),
            FrameError::MissingField {
                field: "k".into(),
                row: 1
            }
        );
    }

    #[test]
    fn test_null_key_is_missing() {
        let frame = Frame::new(vec![Record::new().with("k", Value::Null)]);
        assert!(frame.key_column("k").is_err());
    }

    #[test]
    fn test_with_column_leaves_input_untouched() {
        let frame = sample();
        let extended = frame.with_column("out", vec![Value::from(0.0); 3]).unwrap();
        assert!(extended.records()[0].contains("out"));
        assert!(!frame.records()[0].contains("out"));
        assert!(frame.with_column("out", vec![]).is_err());
    }

    #[test]
    fn test_frame_serde_roundtrip() {
        let frame = sample();
        let json = serde_json::to_string(&frame).unwrap();
        let back: Frame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame, back);
    }
}
