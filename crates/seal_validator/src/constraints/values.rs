use super::ColumnConstraint;
use crate::{DataSource, DataValue};
use seal_core::{CheckOutcome, ConstraintConfigError, DetailValue};

/// Number of distinct offending values quoted in a failure message.
const SAMPLE_SIZE: usize = 5;

/// Every non-null value of a column must belong to an allowed set.
///
/// Integers and floats compare by numeric value, so `1` matches `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSetConstraint {
    column: String,
    allowed_values: Vec<DataValue>,
}

impl ValueSetConstraint {
    /// Creates a value set constraint; the allowed set must not be empty.
    pub fn new(
        column: impl Into<String>,
        allowed_values: Vec<DataValue>,
    ) -> Result<Self, ConstraintConfigError> {
        if allowed_values.is_empty() {
            return Err(ConstraintConfigError::EmptyAllowedValues {
                constraint: Self::NAME.to_string(),
            });
        }

        Ok(Self {
            column: column.into(),
            allowed_values,
        })
    }

    pub fn allowed_values(&self) -> &[DataValue] {
        &self.allowed_values
    }
}

fn to_detail(value: &DataValue) -> DetailValue {
    match value {
        DataValue::Null => DetailValue::Null,
        DataValue::Int(i) => DetailValue::Int(*i),
        DataValue::Float(f) => DetailValue::Float(*f),
        DataValue::Bool(b) => DetailValue::Bool(*b),
        DataValue::String(s) => DetailValue::Text(s.clone()),
    }
}

impl ColumnConstraint for ValueSetConstraint {
    const NAME: &'static str = "ValueSetConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let invalid = source.values_outside(&self.column, &self.allowed_values);
        let invalid_count = invalid.len();

        let mut sample: Vec<DetailValue> = Vec::new();
        for value in invalid.iter().map(to_detail) {
            if sample.len() == SAMPLE_SIZE {
                break;
            }
            if !sample.contains(&value) {
                sample.push(value);
            }
        }

        let outcome = if invalid_count == 0 {
            CheckOutcome::pass("Value set check passed")
        } else {
            CheckOutcome::fail(format!(
                "{invalid_count} value(s) not in allowed set: {}",
                DetailValue::List(sample.clone())
            ))
        };

        outcome
            .with_detail("invalid_count", invalid_count)
            .with_detail(
                "allowed_values",
                DetailValue::List(self.allowed_values.iter().map(to_detail).collect()),
            )
            .with_detail("invalid_values", DetailValue::List(sample))
    }
}
