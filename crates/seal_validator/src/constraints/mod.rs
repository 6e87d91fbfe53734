//! Constraint kinds and their evaluation.
//!
//! Every kind is a plain struct implementing [`ColumnConstraint`]; the closed
//! [`Constraint`] enum wraps them so a compiled schema can hold an ordered,
//! heterogeneous list. Construction validates the configuration and is the
//! only fallible step: evaluation always yields a [`CheckOutcome`].
//!
//! - Nullability: null count / null ratio limits
//! - MaximumValue, MinimumValue: single inclusive bound on the column extreme
//! - Median, Mean, Percentile, StandardDeviation: lower/upper bounds on an aggregate
//! - Uniqueness: distinct count / distinct ratio minimums
//! - StringLength: shortest and longest string limits
//! - RegexPattern: every non-null value must contain a match
//! - ValueSet: every non-null value must belong to an allowed set
//! - RowCount: whole-table row count limits

mod nullability;
mod size;
mod statistics;
mod strings;
mod uniqueness;
mod values;

pub use nullability::NullabilityConstraint;
pub use size::RowCountConstraint;
pub use statistics::{
    MaximumValueConstraint, MeanConstraint, MedianConstraint, MinimumValueConstraint,
    PercentileConstraint, StandardDeviationConstraint,
};
pub use strings::{RegexPatternConstraint, StringLengthConstraint};
pub use uniqueness::UniquenessConstraint;
pub use values::ValueSetConstraint;

use crate::DataSource;
use seal_core::{CheckOutcome, ConstraintConfigError};
use std::fmt;
use tracing::debug;

/// Behaviour shared by every constraint kind.
pub trait ColumnConstraint {
    /// Kind name used in labels, e.g. `MaximumValueConstraint`.
    const NAME: &'static str;

    /// Kinds that inspect the whole table skip the column presence check.
    const WHOLE_TABLE: bool = false;

    /// Column the constraint is bound to.
    fn column(&self) -> &str;

    /// Evaluates the check against a source known to contain the column.
    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome;

    /// Label identifying this constraint in reports.
    fn label(&self) -> String {
        format!("{}({})", Self::NAME, self.column())
    }

    /// Evaluates the check, failing uniformly when the column is absent.
    fn validate(&self, source: &dyn DataSource) -> CheckOutcome {
        let outcome = if !Self::WHOLE_TABLE && !source.has_column(self.column()) {
            column_not_found(self.column())
        } else {
            self.evaluate(source)
        };
        outcome.labeled(self.label())
    }
}

/// The failing outcome every column-bound kind reports for an absent column.
pub fn column_not_found(column: &str) -> CheckOutcome {
    CheckOutcome::fail(format!("Column '{column}' not found"))
}

/// Outcome for a column with no data the check could apply to.
pub(crate) fn only_nulls() -> CheckOutcome {
    CheckOutcome::pass("Column contains only null values")
}

/// Outcome for a numeric aggregate that does not exist.
///
/// All-null and empty columns pass vacuously. A column whose non-null cells
/// are all non-numeric fails, since no numeric limit can apply to it.
pub(crate) fn missing_aggregate(source: &dyn DataSource, column: &str) -> CheckOutcome {
    let values = source.column_values(column).unwrap_or_default();
    let non_null = values.iter().filter(|value| !value.is_null()).count();
    let numeric = values.iter().filter(|value| value.as_f64().is_some()).count();

    if non_null == 0 {
        only_nulls()
    } else if numeric == 0 {
        CheckOutcome::fail(format!(
            "Column contains no numeric values ({non_null} non-null value(s))"
        ))
        .with_detail("non_numeric_count", non_null)
    } else {
        CheckOutcome::pass(format!(
            "Column has too few numeric values ({numeric}) for this aggregate"
        ))
    }
}

/// Joins failure messages, or returns the pass message when there are none.
pub(crate) fn conclude(kind: &str, messages: Vec<String>) -> CheckOutcome {
    if messages.is_empty() {
        CheckOutcome::pass(format!("{kind} check passed"))
    } else {
        CheckOutcome::fail(messages.join("; "))
    }
}

/// Optional inclusive lower and upper bounds on an aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bounds {
    /// Creates bounds, requiring at least one side to be set.
    pub fn new(
        constraint: &str,
        lower: Option<f64>,
        upper: Option<f64>,
    ) -> Result<Self, ConstraintConfigError> {
        if lower.is_none() && upper.is_none() {
            return Err(ConstraintConfigError::missing(
                constraint,
                "at least one bound (lower or upper)",
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Describes every bound `value` violates; both sides are checked.
    pub fn violations(&self, subject: &str, value: f64) -> Vec<String> {
        let mut messages = Vec::new();

        if let Some(lower) = self.lower.filter(|lower| value < *lower) {
            messages.push(format!("{subject} {value} is below lower bound {lower}"));
        }

        if let Some(upper) = self.upper.filter(|upper| value > *upper) {
            messages.push(format!("{subject} {value} exceeds upper bound {upper}"));
        }

        messages
    }

    /// Adds `lower_bound` and `upper_bound` to an outcome's details.
    pub fn describe(&self, outcome: CheckOutcome) -> CheckOutcome {
        outcome
            .with_detail("lower_bound", self.lower)
            .with_detail("upper_bound", self.upper)
    }
}

/// Discriminator of a constraint kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    Nullability,
    MaximumValue,
    MinimumValue,
    Median,
    Mean,
    Percentile,
    Uniqueness,
    StandardDeviation,
    StringLength,
    RegexPattern,
    ValueSet,
    RowCount,
}

impl ConstraintKind {
    /// Every kind, in schema documentation order.
    pub const ALL: [ConstraintKind; 12] = [
        ConstraintKind::Nullability,
        ConstraintKind::MaximumValue,
        ConstraintKind::MinimumValue,
        ConstraintKind::Median,
        ConstraintKind::Mean,
        ConstraintKind::Percentile,
        ConstraintKind::Uniqueness,
        ConstraintKind::StandardDeviation,
        ConstraintKind::StringLength,
        ConstraintKind::RegexPattern,
        ConstraintKind::ValueSet,
        ConstraintKind::RowCount,
    ];

    /// The discriminator used in schema documents, e.g. `maximum_value`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConstraintKind::Nullability => "nullability",
            ConstraintKind::MaximumValue => "maximum_value",
            ConstraintKind::MinimumValue => "minimum_value",
            ConstraintKind::Median => "median",
            ConstraintKind::Mean => "mean",
            ConstraintKind::Percentile => "percentile",
            ConstraintKind::Uniqueness => "uniqueness",
            ConstraintKind::StandardDeviation => "standard_deviation",
            ConstraintKind::StringLength => "string_length",
            ConstraintKind::RegexPattern => "regex_pattern",
            ConstraintKind::ValueSet => "value_set",
            ConstraintKind::RowCount => "row_count",
        }
    }

    /// The kind name used in labels, e.g. `MaximumValueConstraint`.
    pub fn class_name(&self) -> &'static str {
        match self {
            ConstraintKind::Nullability => NullabilityConstraint::NAME,
            ConstraintKind::MaximumValue => MaximumValueConstraint::NAME,
            ConstraintKind::MinimumValue => MinimumValueConstraint::NAME,
            ConstraintKind::Median => MedianConstraint::NAME,
            ConstraintKind::Mean => MeanConstraint::NAME,
            ConstraintKind::Percentile => PercentileConstraint::NAME,
            ConstraintKind::Uniqueness => UniquenessConstraint::NAME,
            ConstraintKind::StandardDeviation => StandardDeviationConstraint::NAME,
            ConstraintKind::StringLength => StringLengthConstraint::NAME,
            ConstraintKind::RegexPattern => RegexPatternConstraint::NAME,
            ConstraintKind::ValueSet => ValueSetConstraint::NAME,
            ConstraintKind::RowCount => RowCountConstraint::NAME,
        }
    }

    /// Resolves a schema discriminator.
    pub fn parse(discriminator: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == discriminator)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured constraint of any kind.
///
/// # Example
///
/// ```rust
/// use seal_validator::{Constraint, DataSet, MaximumValueConstraint};
///
/// let constraint = Constraint::from(MaximumValueConstraint::new("age", 120.0));
/// let dataset = DataSet::new().with_column("age", vec![25, 150, 40]);
///
/// let outcome = constraint.validate(&dataset);
/// assert!(!outcome.passed);
/// assert_eq!(outcome.constraint_label, "MaximumValueConstraint(age)");
/// ```
#[derive(Debug, Clone)]
pub enum Constraint {
    Nullability(NullabilityConstraint),
    MaximumValue(MaximumValueConstraint),
    MinimumValue(MinimumValueConstraint),
    Median(MedianConstraint),
    Mean(MeanConstraint),
    Percentile(PercentileConstraint),
    Uniqueness(UniquenessConstraint),
    StandardDeviation(StandardDeviationConstraint),
    StringLength(StringLengthConstraint),
    RegexPattern(RegexPatternConstraint),
    ValueSet(ValueSetConstraint),
    RowCount(RowCountConstraint),
}

macro_rules! dispatch {
    ($self:ident, $inner:ident => $body:expr) => {
        match $self {
            Constraint::Nullability($inner) => $body,
            Constraint::MaximumValue($inner) => $body,
            Constraint::MinimumValue($inner) => $body,
            Constraint::Median($inner) => $body,
            Constraint::Mean($inner) => $body,
            Constraint::Percentile($inner) => $body,
            Constraint::Uniqueness($inner) => $body,
            Constraint::StandardDeviation($inner) => $body,
            Constraint::StringLength($inner) => $body,
            Constraint::RegexPattern($inner) => $body,
            Constraint::ValueSet($inner) => $body,
            Constraint::RowCount($inner) => $body,
        }
    };
}

impl Constraint {
    /// Column the constraint is bound to; empty for whole-table kinds.
    pub fn column(&self) -> &str {
        dispatch!(self, c => c.column())
    }

    /// Kind of this constraint.
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Constraint::Nullability(_) => ConstraintKind::Nullability,
            Constraint::MaximumValue(_) => ConstraintKind::MaximumValue,
            Constraint::MinimumValue(_) => ConstraintKind::MinimumValue,
            Constraint::Median(_) => ConstraintKind::Median,
            Constraint::Mean(_) => ConstraintKind::Mean,
            Constraint::Percentile(_) => ConstraintKind::Percentile,
            Constraint::Uniqueness(_) => ConstraintKind::Uniqueness,
            Constraint::StandardDeviation(_) => ConstraintKind::StandardDeviation,
            Constraint::StringLength(_) => ConstraintKind::StringLength,
            Constraint::RegexPattern(_) => ConstraintKind::RegexPattern,
            Constraint::ValueSet(_) => ConstraintKind::ValueSet,
            Constraint::RowCount(_) => ConstraintKind::RowCount,
        }
    }

    /// Label identifying this constraint, e.g. `MaximumValueConstraint(age)`.
    pub fn label(&self) -> String {
        dispatch!(self, c => c.label())
    }

    /// Evaluates the constraint against a data source.
    pub fn validate(&self, source: &dyn DataSource) -> CheckOutcome {
        let outcome = dispatch!(self, c => c.validate(source));
        debug!(
            "{} -> {}: {}",
            outcome.constraint_label,
            if outcome.passed { "passed" } else { "failed" },
            outcome.message
        );
        outcome
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

macro_rules! impl_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Constraint {
                fn from(constraint: $ty) -> Self {
                    Constraint::$variant(constraint)
                }
            }
        )*
    };
}

impl_from! {
    Nullability => NullabilityConstraint,
    MaximumValue => MaximumValueConstraint,
    MinimumValue => MinimumValueConstraint,
    Median => MedianConstraint,
    Mean => MeanConstraint,
    Percentile => PercentileConstraint,
    Uniqueness => UniquenessConstraint,
    StandardDeviation => StandardDeviationConstraint,
    StringLength => StringLengthConstraint,
    RegexPattern => RegexPatternConstraint,
    ValueSet => ValueSetConstraint,
    RowCount => RowCountConstraint,
}
