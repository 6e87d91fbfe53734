//! Constraints on numeric aggregates of a column.
//!
//! An aggregate that does not exist is reported as null in the details.
//! All-null and empty columns pass vacuously; a column holding only
//! non-numeric values fails.

use super::{Bounds, ColumnConstraint, conclude, missing_aggregate};
use crate::DataSource;
use seal_core::{CheckOutcome, ConstraintConfigError};

/// Inclusive upper limit on the largest value of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct MaximumValueConstraint {
    column: String,
    max_value: f64,
}

impl MaximumValueConstraint {
    pub fn new(column: impl Into<String>, max_value: f64) -> Self {
        Self {
            column: column.into(),
            max_value,
        }
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }
}

impl ColumnConstraint for MaximumValueConstraint {
    const NAME: &'static str = "MaximumValueConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let Some(actual_max) = source.max(&self.column) else {
            return missing_aggregate(source, &self.column)
                .with_detail("actual_max", None::<f64>)
                .with_detail("max_value", self.max_value);
        };

        let outcome = if actual_max <= self.max_value {
            CheckOutcome::pass("Maximum value check passed")
        } else {
            CheckOutcome::fail(format!(
                "Maximum value {actual_max} exceeds limit {}",
                self.max_value
            ))
        };

        outcome
            .with_detail("actual_max", actual_max)
            .with_detail("max_value", self.max_value)
    }
}

/// Inclusive lower limit on the smallest value of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumValueConstraint {
    column: String,
    min_value: f64,
}

impl MinimumValueConstraint {
    pub fn new(column: impl Into<String>, min_value: f64) -> Self {
        Self {
            column: column.into(),
            min_value,
        }
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }
}

impl ColumnConstraint for MinimumValueConstraint {
    const NAME: &'static str = "MinimumValueConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let Some(actual_min) = source.min(&self.column) else {
            return missing_aggregate(source, &self.column)
                .with_detail("actual_min", None::<f64>)
                .with_detail("min_value", self.min_value);
        };

        let outcome = if actual_min >= self.min_value {
            CheckOutcome::pass("Minimum value check passed")
        } else {
            CheckOutcome::fail(format!(
                "Minimum value {actual_min} is below limit {}",
                self.min_value
            ))
        };

        outcome
            .with_detail("actual_min", actual_min)
            .with_detail("min_value", self.min_value)
    }
}

/// Checks an optional aggregate against bounds.
fn check_bounds(
    source: &dyn DataSource,
    column: &str,
    kind: &str,
    subject: &str,
    detail_key: &str,
    actual: Option<f64>,
    bounds: &Bounds,
) -> CheckOutcome {
    let outcome = match actual {
        None => missing_aggregate(source, column),
        Some(value) => conclude(kind, bounds.violations(subject, value)),
    };
    bounds.describe(outcome.with_detail(detail_key, actual))
}

/// Bounds on the median of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct MedianConstraint {
    column: String,
    bounds: Bounds,
}

impl MedianConstraint {
    pub fn new(
        column: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConstraintConfigError> {
        Ok(Self {
            column: column.into(),
            bounds: Bounds::new(Self::NAME, lower_bound, upper_bound)?,
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl ColumnConstraint for MedianConstraint {
    const NAME: &'static str = "MedianConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        check_bounds(
            source,
            &self.column,
            "Median",
            "Median",
            "actual_median",
            source.median(&self.column),
            &self.bounds,
        )
    }
}

/// Bounds on the mean of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanConstraint {
    column: String,
    bounds: Bounds,
}

impl MeanConstraint {
    pub fn new(
        column: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConstraintConfigError> {
        Ok(Self {
            column: column.into(),
            bounds: Bounds::new(Self::NAME, lower_bound, upper_bound)?,
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl ColumnConstraint for MeanConstraint {
    const NAME: &'static str = "MeanConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        check_bounds(
            source,
            &self.column,
            "Mean",
            "Mean",
            "actual_mean",
            source.mean(&self.column),
            &self.bounds,
        )
    }
}

/// Bounds on a quantile of a column.
///
/// The quantile is computed with linear interpolation between closest ranks.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileConstraint {
    column: String,
    percentile: f64,
    bounds: Bounds,
}

impl PercentileConstraint {
    /// Creates a percentile constraint; `percentile` is a fraction in `[0, 1]`.
    pub fn new(
        column: impl Into<String>,
        percentile: f64,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConstraintConfigError> {
        if !(0.0..=1.0).contains(&percentile) {
            return Err(ConstraintConfigError::out_of_range(
                Self::NAME,
                "percentile",
                0.0,
                1.0,
                percentile,
            ));
        }

        Ok(Self {
            column: column.into(),
            percentile,
            bounds: Bounds::new(Self::NAME, lower_bound, upper_bound)?,
        })
    }

    pub fn percentile(&self) -> f64 {
        self.percentile
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl ColumnConstraint for PercentileConstraint {
    const NAME: &'static str = "PercentileConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let subject = format!("Percentile {} value", self.percentile);
        check_bounds(
            source,
            &self.column,
            "Percentile",
            &subject,
            "actual_percentile",
            source.quantile(&self.column, self.percentile),
            &self.bounds,
        )
        .with_detail("percentile", self.percentile)
    }
}

/// Bounds on the sample standard deviation of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardDeviationConstraint {
    column: String,
    bounds: Bounds,
}

impl StandardDeviationConstraint {
    pub fn new(
        column: impl Into<String>,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ConstraintConfigError> {
        Ok(Self {
            column: column.into(),
            bounds: Bounds::new(Self::NAME, lower_bound, upper_bound)?,
        })
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }
}

impl ColumnConstraint for StandardDeviationConstraint {
    const NAME: &'static str = "StandardDeviationConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        check_bounds(
            source,
            &self.column,
            "Standard deviation",
            "Standard deviation",
            "actual_std",
            source.std_dev(&self.column),
            &self.bounds,
        )
    }
}
