//! Per-check outcomes.
//!
//! Every constraint evaluation and every type check produces exactly one
//! [`CheckOutcome`]. Outcomes carry machine-readable [`Details`] next to the
//! human-readable message so downstream tooling never has to parse text.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single statistic or parameter reported in an outcome's details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DetailValue {
    /// Value is absent (e.g. the aggregate of an all-null column)
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<DetailValue>),
}

impl DetailValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DetailValue::Null)
    }

    /// Returns the value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DetailValue::Float(f) => Some(*f),
            DetailValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the value as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DetailValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DetailValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a list.
    pub fn as_list(&self) -> Option<&[DetailValue]> {
        match self {
            DetailValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Null => f.write_str("null"),
            DetailValue::Bool(b) => write!(f, "{b}"),
            DetailValue::Int(i) => write!(f, "{i}"),
            DetailValue::Float(x) => write!(f, "{x}"),
            DetailValue::Text(s) => write!(f, "'{s}'"),
            DetailValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for DetailValue {
    fn from(b: bool) -> Self {
        DetailValue::Bool(b)
    }
}

impl From<i64> for DetailValue {
    fn from(i: i64) -> Self {
        DetailValue::Int(i)
    }
}

impl From<usize> for DetailValue {
    fn from(n: usize) -> Self {
        DetailValue::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for DetailValue {
    fn from(f: f64) -> Self {
        DetailValue::Float(f)
    }
}

impl From<String> for DetailValue {
    fn from(s: String) -> Self {
        DetailValue::Text(s)
    }
}

impl From<&str> for DetailValue {
    fn from(s: &str) -> Self {
        DetailValue::Text(s.to_string())
    }
}

impl<T: Into<DetailValue>> From<Option<T>> for DetailValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DetailValue::Null, Into::into)
    }
}

impl<T: Into<DetailValue>> From<Vec<T>> for DetailValue {
    fn from(items: Vec<T>) -> Self {
        DetailValue::List(items.into_iter().map(Into::into).collect())
    }
}

/// Ordered statistics attached to an outcome.
pub type Details = IndexMap<String, DetailValue>;

/// The result of evaluating one check once.
///
/// # Example
///
/// ```rust
/// use seal_core::CheckOutcome;
///
/// let outcome = CheckOutcome::fail("Maximum value 150 exceeds limit 120")
///     .with_detail("actual_max", 150.0)
///     .with_detail("max_value", 120.0)
///     .labeled("MaximumValueConstraint(age)");
///
/// assert!(!outcome.passed);
/// assert_eq!(outcome.detail("max_value").and_then(|v| v.as_f64()), Some(120.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckOutcome {
    /// Whether the check passed
    pub passed: bool,

    /// Human-readable description of the result
    pub message: String,

    /// Every statistic computed for the check, regardless of pass/fail
    pub details: Details,

    /// Identifies the check, e.g. `MaximumValueConstraint(age)`
    pub constraint_label: String,
}

impl CheckOutcome {
    /// Creates an outcome with the given status and no details or label.
    pub fn new(passed: bool, message: impl Into<String>) -> Self {
        Self {
            passed,
            message: message.into(),
            details: Details::new(),
            constraint_label: String::new(),
        }
    }

    /// Creates a passing outcome.
    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    /// Creates a failing outcome.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    /// Adds a detail entry.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<DetailValue>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Sets the constraint label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.constraint_label = label.into();
        self
    }

    /// Looks up a detail entry.
    pub fn detail(&self, key: &str) -> Option<&DetailValue> {
        self.details.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outcome_builder() {
        let outcome = CheckOutcome::pass("ok")
            .with_detail("null_count", 3usize)
            .with_detail("null_ratio", 0.3)
            .with_detail("actual_max", None::<f64>)
            .labeled("NullabilityConstraint(a)");

        assert!(outcome.passed);
        assert_eq!(outcome.constraint_label, "NullabilityConstraint(a)");
        assert_eq!(outcome.detail("null_count"), Some(&DetailValue::Int(3)));
        assert_eq!(outcome.detail("null_ratio"), Some(&DetailValue::Float(0.3)));
        assert!(outcome.detail("actual_max").unwrap().is_null());
        assert_eq!(outcome.detail("missing"), None);
    }

    #[test]
    fn test_details_keep_insertion_order() {
        let outcome = CheckOutcome::fail("x")
            .with_detail("z", 1i64)
            .with_detail("a", 2i64)
            .with_detail("m", 3i64);
        let keys: Vec<&str> = outcome.details.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_detail_value_serialization() {
        let outcome = CheckOutcome::fail("bad")
            .with_detail("count", 2i64)
            .with_detail("ratio", 0.5)
            .with_detail("none", DetailValue::Null)
            .with_detail("values", vec!["a", "b"]);

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["details"]["count"], serde_json::json!(2));
        assert_eq!(json["details"]["ratio"], serde_json::json!(0.5));
        assert_eq!(json["details"]["none"], serde_json::Value::Null);
        assert_eq!(json["details"]["values"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_detail_value_display() {
        let list = DetailValue::from(vec![
            DetailValue::Text("x".into()),
            DetailValue::Int(1),
        ]);
        assert_eq!(list.to_string(), "['x', 1]");
        assert_eq!(DetailValue::Null.to_string(), "null");
    }

    #[test]
    fn test_int_widens_to_float() {
        assert_eq!(DetailValue::Int(4).as_f64(), Some(4.0));
        assert_eq!(DetailValue::Float(4.5).as_i64(), None);
    }
}
