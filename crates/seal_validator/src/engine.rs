//! Main validation engine.
//!
//! This module provides the [`Validator`] that runs a compiled schema against a
//! data source: type checking of declared fields first, then every constraint
//! in declaration order.

use crate::{Constraint, DataSource, TypeChecker};
use indexmap::IndexMap;
use seal_core::{
    CheckOutcome, FieldDeclaration, TypeName, ValidationError, ValidationOptions,
    ValidationResult,
};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

/// A compiled, reusable validation plan.
///
/// Holds the declared fields and the ordered constraint list. Nothing is
/// mutated during a run, so one validator can serve many runs, including
/// concurrent runs from several threads.
///
/// # Example
///
/// ```rust
/// use seal_core::{FieldDeclaration, ValidationOptions};
/// use seal_validator::{DataSet, MaximumValueConstraint, NullabilityConstraint, Validator};
///
/// let validator = Validator::with_fields(
///     vec![
///         NullabilityConstraint::new("age", Some(0.0), None)?.into(),
///         MaximumValueConstraint::new("age", 120.0).into(),
///     ],
///     vec![FieldDeclaration::new("age", "Int64")],
/// );
///
/// let dataset = DataSet::new().with_column("age", vec![25, 40, 150]);
///
/// let result = validator.collect(&dataset);
/// assert!(!result.passed());
/// assert_eq!(result.failed_count(), 1);
///
/// let error = validator.validate(&dataset).unwrap_err();
/// assert_eq!(error.failures().len(), 1);
/// # Ok::<(), seal_core::ConstraintConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    fields: Vec<FieldDeclaration>,
    constraints: Vec<Constraint>,
}

impl Validator {
    /// Creates a validator with constraints only; the type-check phase is skipped.
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self {
            fields: Vec::new(),
            constraints,
        }
    }

    /// Creates a validator with declared fields and constraints.
    pub fn with_fields(constraints: Vec<Constraint>, fields: Vec<FieldDeclaration>) -> Self {
        Self {
            fields,
            constraints,
        }
    }

    /// Constraints in evaluation order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDeclaration] {
        &self.fields
    }

    /// Mapping from field name to declared type.
    pub fn field_types(&self) -> IndexMap<&str, &TypeName> {
        self.fields
            .iter()
            .map(|field| (field.name.as_str(), &field.declared_type))
            .collect()
    }

    /// Declared type of a field.
    pub fn field_type(&self, name: &str) -> Option<&TypeName> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.declared_type)
    }

    /// Validates with default options: raise on failure, sequential evaluation.
    pub fn validate(&self, source: &dyn DataSource) -> Result<ValidationResult, ValidationError> {
        self.validate_with(source, &ValidationOptions::default())
    }

    /// Validates without raising; both phases always run.
    pub fn collect(&self, source: &dyn DataSource) -> ValidationResult {
        let mut outcomes = TypeChecker::new().check(&self.fields, source);
        outcomes.extend(self.run_constraints(source, false));
        ValidationResult::new(outcomes)
    }

    /// Validates a data source.
    ///
    /// With `raise_on_error`, any type-check failure is raised before a single
    /// constraint runs, carrying only the type-check failures. Constraint
    /// failures are raised after every constraint has been evaluated.
    /// Without it, every outcome of both phases is returned in one result.
    pub fn validate_with(
        &self,
        source: &dyn DataSource,
        options: &ValidationOptions,
    ) -> Result<ValidationResult, ValidationError> {
        let start = Instant::now();

        let mut outcomes = TypeChecker::new().check(&self.fields, source);

        if options.raise_on_error && outcomes.iter().any(|o| !o.passed) {
            info!(
                "Type check failed for {} of {} fields; constraints not evaluated",
                outcomes.iter().filter(|o| !o.passed).count(),
                outcomes.len()
            );
            return Err(ValidationError::type_errors(&outcomes));
        }

        let constraint_outcomes = self.run_constraints(source, options.parallel);
        let constraints_failed = constraint_outcomes.iter().any(|o| !o.passed);

        if options.raise_on_error && constraints_failed {
            info!(
                "Constraint validation failed in {:?}",
                start.elapsed()
            );
            return Err(ValidationError::constraint_failures(&constraint_outcomes));
        }

        outcomes.extend(constraint_outcomes);
        let result = ValidationResult::new(outcomes);

        info!(
            "Validation {} in {:?}: {} passed, {} failed",
            if result.passed() { "passed" } else { "failed" },
            start.elapsed(),
            result.passed_count(),
            result.failed_count()
        );

        Ok(result)
    }

    /// Evaluates every constraint, preserving declaration order.
    fn run_constraints(&self, source: &dyn DataSource, parallel: bool) -> Vec<CheckOutcome> {
        let workers = thread::available_parallelism().map_or(1, |n| n.get());

        if !parallel || workers < 2 || self.constraints.len() < 2 {
            return self
                .constraints
                .iter()
                .map(|constraint| constraint.validate(source))
                .collect();
        }

        let chunk_size = self.constraints.len().div_ceil(workers);
        debug!(
            "Evaluating {} constraints on {} threads",
            self.constraints.len(),
            self.constraints.len().div_ceil(chunk_size)
        );

        thread::scope(|scope| {
            let handles: Vec<_> = self
                .constraints
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|constraint| constraint.validate(source))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(outcomes) => outcomes,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSet, MaximumValueConstraint, NullabilityConstraint, RowCountConstraint};
    use pretty_assertions::assert_eq;
    use seal_core::ValidationPhase;

    fn dataset() -> DataSet {
        DataSet::new()
            .with_column("id", vec![1, 2, 3, 4])
            .with_column("age", vec![Some(25), None, Some(40), Some(150)])
    }

    #[test]
    fn test_empty_validator_passes() {
        let result = Validator::default().validate(&dataset()).unwrap();
        assert!(result.passed());
        assert!(result.is_empty());
    }

    #[test]
    fn test_outcomes_follow_declaration_order() {
        let validator = Validator::with_fields(
            vec![
                RowCountConstraint::new("", Some(1), None).unwrap().into(),
                NullabilityConstraint::new("age", Some(0.5), None).unwrap().into(),
            ],
            vec![
                FieldDeclaration::new("id", "Int64"),
                FieldDeclaration::new("age", "Int64"),
            ],
        );

        let result = validator.validate(&dataset()).unwrap();
        let labels: Vec<&str> = result
            .results()
            .iter()
            .map(|o| o.constraint_label.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "TypeCheck(id)",
                "TypeCheck(age)",
                "RowCountConstraint()",
                "NullabilityConstraint(age)",
            ]
        );
    }

    #[test]
    fn test_constraint_failures_raised_after_all_run() {
        let validator = Validator::new(vec![
            MaximumValueConstraint::new("age", 100.0).into(),
            MaximumValueConstraint::new("id", 2.0).into(),
            RowCountConstraint::new("", Some(1), None).unwrap().into(),
        ]);

        let error = validator.validate(&dataset()).unwrap_err();
        assert_eq!(error.phase(), ValidationPhase::Constraints);
        assert_eq!(error.failures().len(), 2);
        assert!(error.to_string().contains("MaximumValueConstraint(age)"));
        assert!(error.to_string().contains("MaximumValueConstraint(id)"));
    }

    #[test]
    fn test_field_types() {
        let validator = Validator::with_fields(
            Vec::new(),
            vec![
                FieldDeclaration::new("id", "i64"),
                FieldDeclaration::new("name", "Utf8"),
            ],
        );

        let types = validator.field_types();
        assert_eq!(types.len(), 2);
        assert_eq!(types["id"], &TypeName::Int64);
        assert_eq!(validator.field_type("name"), Some(&TypeName::String));
        assert_eq!(validator.field_type("missing"), None);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let constraints: Vec<Constraint> = (0..16)
            .map(|i| MaximumValueConstraint::new("age", f64::from(i * 10)).into())
            .collect();
        let validator = Validator::new(constraints);
        let source = dataset();

        let sequential = validator
            .validate_with(&source, &ValidationOptions::collect_all())
            .unwrap();
        let parallel = validator
            .validate_with(&source, &ValidationOptions::collect_all().with_parallel(true))
            .unwrap();

        assert_eq!(sequential.results(), parallel.results());
    }
}
