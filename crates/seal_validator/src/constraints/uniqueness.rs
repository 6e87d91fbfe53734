use super::ColumnConstraint;
use crate::DataSource;
use seal_core::{CheckOutcome, ConstraintConfigError};

/// Requires a minimum number or share of distinct values in a column.
///
/// Null counts as one distinct value when present.
#[derive(Debug, Clone, PartialEq)]
pub struct UniquenessConstraint {
    column: String,
    min_unique_ratio: Option<f64>,
    min_unique_count: Option<usize>,
}

impl UniquenessConstraint {
    pub fn new(
        column: impl Into<String>,
        min_unique_ratio: Option<f64>,
        min_unique_count: Option<usize>,
    ) -> Result<Self, ConstraintConfigError> {
        if min_unique_ratio.is_none() && min_unique_count.is_none() {
            return Err(ConstraintConfigError::missing(
                Self::NAME,
                "either min_unique_ratio or min_unique_count",
            ));
        }

        if let Some(ratio) = min_unique_ratio
            && !(0.0..=1.0).contains(&ratio)
        {
            return Err(ConstraintConfigError::out_of_range(
                Self::NAME,
                "min_unique_ratio",
                0.0,
                1.0,
                ratio,
            ));
        }

        Ok(Self {
            column: column.into(),
            min_unique_ratio,
            min_unique_count,
        })
    }

    pub fn min_unique_ratio(&self) -> Option<f64> {
        self.min_unique_ratio
    }

    pub fn min_unique_count(&self) -> Option<usize> {
        self.min_unique_count
    }
}

impl ColumnConstraint for UniquenessConstraint {
    const NAME: &'static str = "UniquenessConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let unique_count = source.distinct_count(&self.column);
        let total_count = source.row_count();
        let unique_ratio = if total_count > 0 {
            unique_count as f64 / total_count as f64
        } else {
            0.0
        };

        let mut messages = Vec::new();

        if let Some(min) = self.min_unique_count
            && unique_count < min
        {
            messages.push(format!("Unique count {unique_count} is below minimum {min}"));
        }

        if let Some(min) = self.min_unique_ratio
            && unique_ratio < min
        {
            messages.push(format!(
                "Unique ratio {unique_ratio:.4} is below minimum {min:.4}"
            ));
        }

        super::conclude("Uniqueness", messages)
            .with_detail("unique_count", unique_count)
            .with_detail("total_count", total_count)
            .with_detail("unique_ratio", unique_ratio)
            .with_detail("min_unique_ratio", self.min_unique_ratio)
            .with_detail("min_unique_count", self.min_unique_count)
    }
}
