use super::ColumnConstraint;
use crate::DataSource;
use seal_core::{CheckOutcome, ConstraintConfigError};

/// Limits the number or share of null cells in a column.
#[derive(Debug, Clone, PartialEq)]
pub struct NullabilityConstraint {
    column: String,
    max_null_ratio: Option<f64>,
    max_null_count: Option<usize>,
}

impl NullabilityConstraint {
    /// Creates a nullability constraint.
    ///
    /// At least one limit is required; `max_null_ratio` must lie in `[0, 1]`.
    pub fn new(
        column: impl Into<String>,
        max_null_ratio: Option<f64>,
        max_null_count: Option<usize>,
    ) -> Result<Self, ConstraintConfigError> {
        if max_null_ratio.is_none() && max_null_count.is_none() {
            return Err(ConstraintConfigError::missing(
                Self::NAME,
                "either max_null_ratio or max_null_count",
            ));
        }

        if let Some(ratio) = max_null_ratio
            && !(0.0..=1.0).contains(&ratio)
        {
            return Err(ConstraintConfigError::out_of_range(
                Self::NAME,
                "max_null_ratio",
                0.0,
                1.0,
                ratio,
            ));
        }

        Ok(Self {
            column: column.into(),
            max_null_ratio,
            max_null_count,
        })
    }

    pub fn max_null_ratio(&self) -> Option<f64> {
        self.max_null_ratio
    }

    pub fn max_null_count(&self) -> Option<usize> {
        self.max_null_count
    }
}

impl ColumnConstraint for NullabilityConstraint {
    const NAME: &'static str = "NullabilityConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let null_count = source.null_count(&self.column);
        let total_count = source.row_count();
        let null_ratio = if total_count > 0 {
            null_count as f64 / total_count as f64
        } else {
            0.0
        };

        let mut messages = Vec::new();

        if let Some(max) = self.max_null_count
            && null_count > max
        {
            messages.push(format!("Null count {null_count} exceeds maximum {max}"));
        }

        if let Some(max) = self.max_null_ratio
            && null_ratio > max
        {
            messages.push(format!(
                "Null ratio {null_ratio:.4} exceeds maximum {max:.4}"
            ));
        }

        super::conclude("Nullability", messages)
            .with_detail("null_count", null_count)
            .with_detail("total_count", total_count)
            .with_detail("null_ratio", null_ratio)
            .with_detail("max_null_ratio", self.max_null_ratio)
            .with_detail("max_null_count", self.max_null_count)
    }
}
