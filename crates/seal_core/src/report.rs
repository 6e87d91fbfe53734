//! Validation reports.
//!
//! A [`ValidationResult`] is built once per validation run from the ordered
//! outcomes of that run. Its `passed` flag is derived, never set.

use crate::CheckOutcome;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered outcomes of one validation run.
///
/// # Example
///
/// ```rust
/// use seal_core::{CheckOutcome, ValidationResult};
///
/// let result = ValidationResult::new(vec![
///     CheckOutcome::pass("ok").labeled("MinimumValueConstraint(age)"),
///     CheckOutcome::fail("too big").labeled("MaximumValueConstraint(age)"),
/// ]);
///
/// assert!(!result.passed());
/// assert_eq!(result.failures().count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    results: Vec<CheckOutcome>,
    passed: bool,
}

impl ValidationResult {
    /// Creates a result from ordered outcomes.
    ///
    /// An empty outcome list passes.
    pub fn new(results: Vec<CheckOutcome>) -> Self {
        let passed = results.iter().all(|r| r.passed);
        Self { results, passed }
    }

    /// Returns true if every outcome passed.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns all outcomes in evaluation order.
    pub fn results(&self) -> &[CheckOutcome] {
        &self.results
    }

    /// Consumes the result, returning its outcomes.
    pub fn into_results(self) -> Vec<CheckOutcome> {
        self.results
    }

    /// Returns the failing outcomes in evaluation order.
    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no checks were run.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of passing outcomes.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of failing outcomes.
    pub fn failed_count(&self) -> usize {
        self.results.len() - self.passed_count()
    }

    /// Builds the machine-readable payload.
    pub fn to_payload(&self) -> ValidationPayload {
        ValidationPayload {
            passed: self.passed,
            total_constraints: self.len(),
            passed_constraints: self.passed_count(),
            failed_constraints: self.failed_count(),
            results: self.results.clone(),
        }
    }

    /// Renders a multi-line human-readable summary.
    pub fn summary(&self) -> String {
        render_summary(self.passed, self.len(), self.passed_count(), self.failures())
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidationResult(status={}, total={})",
            status_word(self.passed),
            self.len()
        )
    }
}

impl From<Vec<CheckOutcome>> for ValidationResult {
    fn from(results: Vec<CheckOutcome>) -> Self {
        Self::new(results)
    }
}

/// Serializable report shape produced for downstream consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationPayload {
    pub passed: bool,
    pub total_constraints: usize,
    pub passed_constraints: usize,
    pub failed_constraints: usize,
    pub results: Vec<CheckOutcome>,
}

fn status_word(passed: bool) -> &'static str {
    if passed { "PASSED" } else { "FAILED" }
}

/// Shared renderer for results and errors.
pub(crate) fn render_summary<'a>(
    passed: bool,
    total: usize,
    passed_count: usize,
    failures: impl Iterator<Item = &'a CheckOutcome>,
) -> String {
    let mut lines = vec![
        format!("Validation {}", status_word(passed)),
        format!("Total constraints: {total}"),
        format!("Passed: {passed_count}"),
        format!("Failed: {}", total - passed_count),
    ];

    if !passed {
        lines.push(String::new());
        lines.push("Failed constraints:".to_string());
        for failure in failures {
            let label = if failure.constraint_label.is_empty() {
                "Unknown"
            } else {
                failure.constraint_label.as_str()
            };
            lines.push(format!("  - {}: {}", label, failure.message));
        }
    }

    lines.join("\n")
}
