use super::{ColumnConstraint, conclude, only_nulls};
use crate::DataSource;
use regex::Regex;
use seal_core::{CheckOutcome, ConstraintConfigError};

/// Limits on the shortest and longest string in a column.
///
/// Lengths count characters. Null cells are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLengthConstraint {
    column: String,
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl StringLengthConstraint {
    pub fn new(
        column: impl Into<String>,
        min_length: Option<usize>,
        max_length: Option<usize>,
    ) -> Result<Self, ConstraintConfigError> {
        if min_length.is_none() && max_length.is_none() {
            return Err(ConstraintConfigError::missing(
                Self::NAME,
                "at least one of min_length or max_length",
            ));
        }

        Ok(Self {
            column: column.into(),
            min_length,
            max_length,
        })
    }

    pub fn min_length(&self) -> Option<usize> {
        self.min_length
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }
}

impl ColumnConstraint for StringLengthConstraint {
    const NAME: &'static str = "StringLengthConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let lengths: Vec<usize> = source
            .string_lengths(&self.column)
            .into_iter()
            .flatten()
            .collect();
        let min_found = lengths.iter().copied().min();
        let max_found = lengths.iter().copied().max();

        let outcome = match (min_found, max_found) {
            (Some(min_found), Some(max_found)) => {
                let mut messages = Vec::new();

                if let Some(min) = self.min_length
                    && min_found < min
                {
                    messages.push(format!(
                        "Minimum string length {min_found} is below required minimum {min}"
                    ));
                }

                if let Some(max) = self.max_length
                    && max_found > max
                {
                    messages.push(format!(
                        "Maximum string length {max_found} exceeds allowed maximum {max}"
                    ));
                }

                conclude("String length", messages)
            }
            _ => only_nulls(),
        };

        outcome
            .with_detail("min_length_found", min_found)
            .with_detail("max_length_found", max_found)
            .with_detail("min_length", self.min_length)
            .with_detail("max_length", self.max_length)
    }
}

/// Every non-null value must contain a match of a regular expression.
///
/// The pattern is searched for anywhere in the value; anchor it with `^` and
/// `$` to require a full match. Non-string values are matched against their
/// display form.
#[derive(Debug, Clone)]
pub struct RegexPatternConstraint {
    column: String,
    pattern: Regex,
}

impl RegexPatternConstraint {
    /// Creates a pattern constraint, compiling the pattern.
    pub fn new(column: impl Into<String>, pattern: &str) -> Result<Self, ConstraintConfigError> {
        let pattern = Regex::new(pattern).map_err(|e| {
            ConstraintConfigError::invalid_pattern(Self::NAME, pattern, e.to_string())
        })?;

        Ok(Self {
            column: column.into(),
            pattern,
        })
    }

    /// The pattern source text.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl PartialEq for RegexPatternConstraint {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.pattern() == other.pattern()
    }
}

impl ColumnConstraint for RegexPatternConstraint {
    const NAME: &'static str = "RegexPatternConstraint";

    fn column(&self) -> &str {
        &self.column
    }

    fn evaluate(&self, source: &dyn DataSource) -> CheckOutcome {
        let mismatch_count = source.non_matching_count(&self.column, &self.pattern);
        let total_count = source.row_count();

        let outcome = if mismatch_count == 0 {
            CheckOutcome::pass("Regex pattern check passed")
        } else {
            CheckOutcome::fail(format!(
                "{mismatch_count} value(s) do not match pattern '{}'",
                self.pattern()
            ))
        };

        outcome
            .with_detail("mismatch_count", mismatch_count)
            .with_detail("total_count", total_count)
            .with_detail("pattern", self.pattern())
    }
}
