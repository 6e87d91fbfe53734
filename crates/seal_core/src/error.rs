//! Error types shared across Seal crates.
//!
//! Two failure families live here:
//!
//! - [`ConstraintConfigError`]: a constraint was built with insufficient or
//!   invalid parameters. Raised at construction time, never during a run.
//! - [`ValidationError`]: a validation run found failing checks and the caller
//!   asked for failures to be raised. Carries the failing outcomes.
//!
//! Malformed schema documents are reported by the parser crate's own error type.

use crate::CheckOutcome;
use crate::report::render_summary;
use std::fmt;
use thiserror::Error;

/// Errors raised when a constraint is constructed with an invalid configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstraintConfigError {
    /// None of the parameters that drive the check were provided
    #[error("{constraint}: Must specify {expected}")]
    MissingParameter {
        /// Constraint kind, e.g. `NullabilityConstraint`
        constraint: String,
        /// Which parameters were expected
        expected: String,
    },

    /// A parameter lies outside its permitted range
    #[error("{constraint}: {parameter} must be between {min} and {max}, got {value}")]
    OutOfRange {
        constraint: String,
        parameter: String,
        min: f64,
        max: f64,
        value: f64,
    },

    /// A value set constraint was given no values
    #[error("{constraint}: allowed_values must contain at least one value")]
    EmptyAllowedValues { constraint: String },

    /// A regex pattern failed to compile
    #[error("{constraint}: invalid regex pattern '{pattern}': {error}")]
    InvalidPattern {
        constraint: String,
        pattern: String,
        error: String,
    },
}

impl ConstraintConfigError {
    /// Creates a missing parameter error.
    pub fn missing(constraint: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::MissingParameter {
            constraint: constraint.into(),
            expected: expected.into(),
        }
    }

    /// Creates an out of range error for a parameter that must lie in `[min, max]`.
    pub fn out_of_range(
        constraint: impl Into<String>,
        parameter: impl Into<String>,
        min: f64,
        max: f64,
        value: f64,
    ) -> Self {
        Self::OutOfRange {
            constraint: constraint.into(),
            parameter: parameter.into(),
            min,
            max,
            value,
        }
    }

    /// Creates an invalid pattern error.
    pub fn invalid_pattern(
        constraint: impl Into<String>,
        pattern: impl Into<String>,
        error: impl fmt::Display,
    ) -> Self {
        Self::InvalidPattern {
            constraint: constraint.into(),
            pattern: pattern.into(),
            error: error.to_string(),
        }
    }
}

/// The validation phase that produced a [`ValidationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPhase {
    /// Declared field types were compared against the data source
    TypeCheck,
    /// Compiled constraints were evaluated
    Constraints,
}

impl fmt::Display for ValidationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationPhase::TypeCheck => f.write_str("type check"),
            ValidationPhase::Constraints => f.write_str("constraints"),
        }
    }
}

/// Raised by a validator in fail-fast mode when any check fails.
///
/// The message is rendered for humans; [`ValidationError::failures`] holds the
/// failing outcomes for programmatic inspection.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    phase: ValidationPhase,
    failures: Vec<CheckOutcome>,
}

impl ValidationError {
    /// Builds the error raised when the type-check phase fails.
    ///
    /// `outcomes` are all outcomes of the phase; only failures are kept.
    pub fn type_errors(outcomes: &[CheckOutcome]) -> Self {
        Self::from_outcomes(
            ValidationPhase::TypeCheck,
            "Type errors found in schema validation".to_string(),
            outcomes,
        )
    }

    /// Builds the error raised when the constraint phase fails.
    ///
    /// `outcomes` are all outcomes of the phase; only failures are kept.
    pub fn constraint_failures(outcomes: &[CheckOutcome]) -> Self {
        let failed = outcomes.iter().filter(|o| !o.passed).count();
        Self::from_outcomes(
            ValidationPhase::Constraints,
            format!("Constraint validation failed: {failed} constraint(s) failed"),
            outcomes,
        )
    }

    fn from_outcomes(phase: ValidationPhase, headline: String, outcomes: &[CheckOutcome]) -> Self {
        let passed_count = outcomes.iter().filter(|o| o.passed).count();
        let failures: Vec<CheckOutcome> = outcomes.iter().filter(|o| !o.passed).cloned().collect();
        let summary = render_summary(
            failures.is_empty(),
            outcomes.len(),
            passed_count,
            failures.iter(),
        );

        Self {
            message: format!("{headline}\n{summary}"),
            phase,
            failures,
        }
    }

    /// Human-readable message including the rendered summary.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Phase that raised the error.
    pub fn phase(&self) -> ValidationPhase {
        self.phase
    }

    /// Failing outcomes, in evaluation order.
    pub fn failures(&self) -> &[CheckOutcome] {
        &self.failures
    }

    /// Consumes the error, returning the failing outcomes.
    pub fn into_failures(self) -> Vec<CheckOutcome> {
        self.failures
    }
}
