//! Frame Validator

use crate::error::ValidationError;
use feature_frame::{Frame, GroupKey, Timestamp, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Stop collecting after this many findings
    pub max_errors: usize,
    /// Treat a null value as an absent field
    pub null_is_missing: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_errors: 100,
            null_is_missing: true,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether no findings were recorded
    pub valid: bool,
    /// Findings, in row order
    pub errors: Vec<ValidationError>,
    /// Number of rows inspected
    pub rows_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(rows_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            rows_checked,
        }
    }

    /// Create a result from collected findings
    pub fn from_errors(errors: Vec<ValidationError>, rows_checked: usize) -> Self {
        if errors.is_empty() {
            return Self::valid(rows_checked);
        }
        Self {
            valid: false,
            errors,
            rows_checked,
        }
    }
}

/// Frame validator
#[derive(Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    fn is_absent(&self, value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::Null) => self.config.null_is_missing,
            Some(_) => false,
        }
    }

    fn full(&self, errors: &[ValidationError]) -> bool {
        errors.len() >= self.config.max_errors
    }

    /// Every row must carry every named field
    pub fn require_fields(&self, frame: &Frame, fields: &[&str]) -> ValidationResult {
        let mut errors = Vec::new();

        'rows: for (row, record) in frame.records().iter().enumerate() {
            for &field in fields {
                if self.is_absent(record.get(field)) {
                    errors.push(ValidationError::MissingField {
                        field: field.to_string(),
                        row,
                    });
                    if self.full(&errors) {
                        break 'rows;
                    }
                }
            }
        }

        debug!(
            "require_fields: rows={}, findings={}",
            frame.len(),
            errors.len()
        );
        ValidationResult::from_errors(errors, frame.len())
    }

    /// Timestamps must be non-decreasing within each group, in row order.
    ///
    /// Rows missing the group or time field are reported as missing and
    /// skipped for the ordering check.
    pub fn check_time_order(&self, frame: &Frame, group_field: &str, time_field: &str) -> ValidationResult {
        let mut errors = Vec::new();
        let mut latest: HashMap<GroupKey, Timestamp> = HashMap::new();

        for (row, record) in frame.records().iter().enumerate() {
            if self.full(&errors) {
                break;
            }

            let key = match record.get(group_field).and_then(GroupKey::from_value) {
                Some(key) => key,
                None => {
                    errors.push(ValidationError::MissingField {
                        field: group_field.to_string(),
                        row,
                    });
                    continue;
                }
            };

            let time = match record.get(time_field) {
                Some(Value::Time(t)) => *t,
                Some(other) if !other.is_missing() => {
                    errors.push(ValidationError::InvalidFormat(format!(
                        "'{}' at row {} is {}, expected time",
                        time_field,
                        row,
                        other.kind()
                    )));
                    continue;
                }
                _ => {
                    errors.push(ValidationError::MissingField {
                        field: time_field.to_string(),
                        row,
                    });
                    continue;
                }
            };

            let group = key.to_string();
            if let Some(prev) = latest.insert(key, time) {
                if time < prev {
                    errors.push(ValidationError::TimeOrder { row, group });
                }
            }
        }

        debug!(
            "check_time_order: rows={}, findings={}",
            frame.len(),
            errors.len()
        );
        ValidationResult::from_errors(errors, frame.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use feature_frame::Record;

    fn day(offset: i64) -> Timestamp {
        NaiveDate::from_ymd_opt(2011, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::days(offset)
    }

    #[test]
    fn test_require_fields() {
        let frame = Frame::new(vec![
            Record::new().with("g", "a").with("x", 1.0),
            Record::new().with("g", "a"),
            Record::new().with("g", Value::Null).with("x", 2.0),
        ]);
        let result = Validator::default().require_fields(&frame, &["g", "x"]);
        assert!(!result.valid);
        assert_eq!(result.rows_checked, 3);
        assert_eq!(
            result.errors,
            vec![
                ValidationError::MissingField { field: "x".into(), row: 1 },
                ValidationError::MissingField { field: "g".into(), row: 2 },
            ]
        );
    }

    #[test]
    fn test_null_allowed_when_configured() {
        let frame = Frame::new(vec![Record::new().with("x", Value::Null)]);
        let validator = Validator::new(ValidationConfig {
            null_is_missing: false,
            ..Default::default()
        });
        assert!(validator.require_fields(&frame, &["x"]).valid);
    }

    #[test]
    fn test_sorted_groups_pass() {
        let frame = Frame::new(vec![
            Record::new().with("g", "a").with("t", day(0)),
            Record::new().with("g", "b").with("t", day(5)),
            Record::new().with("g", "a").with("t", day(1)),
            Record::new().with("g", "b").with("t", day(5)),
        ]);
        let result = Validator::default().check_time_order(&frame, "g", "t");
        assert!(result.valid);
    }

    #[test]
    fn test_time_going_backwards_is_reported() {
        let frame = Frame::new(vec![
            Record::new().with("g", 1).with("t", day(3)),
            Record::new().with("g", 1).with("t", day(1)),
            Record::new().with("g", 1).with("t", day(4)),
        ]);
        let result = Validator::default().check_time_order(&frame, "g", "t");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], ValidationError::TimeOrder { row: 1, .. }));
    }

    #[test]
    fn test_each_row_compared_to_its_predecessor() {
        let frame = Frame::new(vec![
            Record::new().with("g", 1).with("t", day(3)),
            Record::new().with("g", 1).with("t", day(1)),
            Record::new().with("g", 1).with("t", day(2)),
        ]);
        let result = Validator::default().check_time_order(&frame, "g", "t");
        assert_eq!(
            result.errors,
            vec![ValidationError::TimeOrder {
                row: 1,
                group: "1".into()
            }]
        );
    }

    #[test]
    fn test_empty_findings_are_valid() {
        let result = ValidationResult::from_errors(Vec::new(), 4);
        assert!(result.valid);
        assert_eq!(result.rows_checked, 4);
    }

    #[test]
    fn test_wrong_time_type() {
        let frame = Frame::new(vec![Record::new().with("g", 1).with("t", "yesterday")]);
        let result = Validator::default().check_time_order(&frame, "g", "t");
        assert!(matches!(result.errors[0], ValidationError::InvalidFormat(_)));
    }

    #[test]
    fn test_max_errors_caps_findings() {
        let frame = Frame::new(vec![Record::new(); 10]);
        let validator = Validator::new(ValidationConfig {
            max_errors: 3,
            ..Default::default()
        });
        assert_eq!(validator.require_fields(&frame, &["a", "b"]).errors.len(), 3);
        assert_eq!(validator.check_time_order(&frame, "g", "t").errors.len(), 3);
    }
}
