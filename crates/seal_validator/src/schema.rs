//! Type checking of declared fields against a data source.
//!
//! Each declared field yields exactly one outcome: missing column, type
//! mismatch, or pass. Declared and actual type names are compared through the
//! alias table in [`seal_core::TypeName`], so `Utf8` satisfies `String` and
//! `i64` satisfies `Int64`.

use crate::DataSource;
use seal_core::{CheckOutcome, DetailValue, FieldDeclaration};
use tracing::debug;

/// Compares declared field types with the types a data source reports.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeChecker;

impl TypeChecker {
    /// Creates a new type checker.
    pub fn new() -> Self {
        Self
    }

    /// Label of the outcome produced for a field.
    pub fn label(field: &str) -> String {
        format!("TypeCheck({field})")
    }

    /// Checks every declared field, in declaration order.
    pub fn check(&self, fields: &[FieldDeclaration], source: &dyn DataSource) -> Vec<CheckOutcome> {
        fields
            .iter()
            .map(|field| self.check_field(field, source))
            .collect()
    }

    /// Checks a single declared field.
    pub fn check_field(&self, field: &FieldDeclaration, source: &dyn DataSource) -> CheckOutcome {
        let expected = field.declared_type.canonical_name();

        let outcome = match source.column_type(&field.name) {
            None => CheckOutcome::fail(format!("Required field '{}' not found", field.name))
                .with_detail("field", field.name.as_str())
                .with_detail("expected_type", expected)
                .with_detail("actual_type", DetailValue::Null),
            Some(actual) => {
                let outcome = if field.declared_type.accepts(&actual) {
                    CheckOutcome::pass(format!(
                        "Field '{}' has expected type '{expected}'",
                        field.name
                    ))
                } else {
                    CheckOutcome::fail(format!(
                        "Field '{}' has type '{actual}', expected '{expected}'",
                        field.name
                    ))
                };
                outcome
                    .with_detail("field", field.name.as_str())
                    .with_detail("expected_type", expected)
                    .with_detail("actual_type", actual)
                    .with_detail("accepted_types", field.declared_type.aliases())
            }
        };

        debug!(
            "Type check for '{}': {}",
            field.name,
            if outcome.passed { "ok" } else { outcome.message.as_str() }
        );

        outcome.labeled(Self::label(&field.name))
    }
}
