//! Compiles a decoded schema document into a [`Validator`].
//!
//! The compiler works on the JSON value model regardless of the document's
//! original format. Two top-level shapes are accepted:
//!
//! - `fields`: mapping of field name to `{type, constraints}`; each constraint
//!   is bound to its field's column
//! - `constraints`: flat list where every entry names its own `column`; no
//!   types are declared and the type-check phase is skipped

use crate::{Result, SchemaCompileError};
use seal_core::FieldDeclaration;
use seal_validator::{
    Constraint, ConstraintKind, DataValue, MaximumValueConstraint, MeanConstraint,
    MedianConstraint, MinimumValueConstraint, NullabilityConstraint, PercentileConstraint,
    RegexPatternConstraint, RowCountConstraint, StandardDeviationConstraint,
    StringLengthConstraint, UniquenessConstraint, Validator, ValueSetConstraint,
};
use serde_json::{Map, Value};
use tracing::debug;

/// Compiles a schema document.
///
/// # Example
///
/// ```rust
/// use seal_parser::compile_schema;
/// use serde_json::json;
///
/// let validator = compile_schema(&json!({
///     "fields": {
///         "age": {
///             "type": "Int64",
///             "constraints": [{"type": "maximum_value", "max_value": 120}]
///         }
///     }
/// }))
/// .unwrap();
///
/// assert_eq!(validator.fields().len(), 1);
/// assert_eq!(validator.constraints()[0].label(), "MaximumValueConstraint(age)");
/// ```
pub fn compile_schema(document: &Value) -> Result<Validator> {
    let root = document.as_object().ok_or(SchemaCompileError::DocumentNotMapping)?;

    let fields = present(root, "fields");
    let constraints = present(root, "constraints");

    let validator = match (fields, constraints) {
        (Some(fields), None) => compile_fields(fields)?,
        (None, Some(constraints)) => compile_constraint_list(constraints)?,
        (Some(_), Some(_)) => return Err(SchemaCompileError::AmbiguousSchemaForm),
        (None, None) => return Err(SchemaCompileError::MissingSchemaForm),
    };

    debug!(
        "Compiled schema: {} fields, {} constraints",
        validator.fields().len(),
        validator.constraints().len()
    );

    Ok(validator)
}

/// Looks up a key, treating an explicit null as absent.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn compile_fields(fields: &Value) -> Result<Validator> {
    let fields = fields
        .as_object()
        .ok_or(SchemaCompileError::FieldsNotMapping)?;

    let mut declarations = Vec::with_capacity(fields.len());
    let mut constraints = Vec::new();

    for (name, spec) in fields {
        let spec = spec
            .as_object()
            .ok_or_else(|| SchemaCompileError::FieldSpecNotMapping(name.clone()))?;

        let declared_type = present(spec, "type")
            .ok_or_else(|| SchemaCompileError::MissingFieldType(name.clone()))?
            .as_str()
            .ok_or_else(|| SchemaCompileError::InvalidFieldType(name.clone()))?;
        declarations.push(FieldDeclaration::new(name.as_str(), declared_type));

        let Some(definitions) = present(spec, "constraints") else {
            continue;
        };
        let definitions = definitions
            .as_array()
            .ok_or_else(|| SchemaCompileError::ConstraintsNotList(name.clone()))?;

        for definition in definitions {
            let mut definition = definition
                .as_object()
                .ok_or(SchemaCompileError::ConstraintNotMapping)?
                .clone();
            definition.insert("column".to_string(), Value::String(name.clone()));
            constraints.push(build_constraint(&definition)?);
        }
    }

    Ok(Validator::with_fields(constraints, declarations))
}

fn compile_constraint_list(constraints: &Value) -> Result<Validator> {
    let definitions = constraints
        .as_array()
        .ok_or(SchemaCompileError::LegacyConstraintsNotList)?;

    let constraints = definitions
        .iter()
        .map(|definition| {
            let definition = definition
                .as_object()
                .ok_or(SchemaCompileError::ConstraintNotMapping)?;
            build_constraint(definition)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Validator::new(constraints))
}

/// Builds one constraint from its definition.
///
/// `type` and `column` are checked before the kind is resolved.
pub fn build_constraint(definition: &Map<String, Value>) -> Result<Constraint> {
    let discriminator = present(definition, "type")
        .ok_or(SchemaCompileError::MissingConstraintType)?
        .as_str()
        .ok_or(SchemaCompileError::InvalidConstraintType)?;

    let column = present(definition, "column")
        .ok_or(SchemaCompileError::MissingColumn)?
        .as_str()
        .ok_or(SchemaCompileError::InvalidColumn)?;

    let kind = ConstraintKind::parse(discriminator)
        .ok_or_else(|| SchemaCompileError::UnknownConstraintType(discriminator.to_string()))?;

    let params = Params { kind, definition };

    let constraint: Constraint = match kind {
        ConstraintKind::Nullability => NullabilityConstraint::new(
            column,
            params.number("max_null_ratio")?,
            params.count("max_null_count")?,
        )?
        .into(),
        ConstraintKind::MaximumValue => {
            MaximumValueConstraint::new(column, params.required_number("max_value")?).into()
        }
        ConstraintKind::MinimumValue => {
            MinimumValueConstraint::new(column, params.required_number("min_value")?).into()
        }
        ConstraintKind::Median => MedianConstraint::new(
            column,
            params.number("lower_bound")?,
            params.number("upper_bound")?,
        )?
        .into(),
        ConstraintKind::Mean => MeanConstraint::new(
            column,
            params.number("lower_bound")?,
            params.number("upper_bound")?,
        )?
        .into(),
        ConstraintKind::Percentile => PercentileConstraint::new(
            column,
            params.required_number("percentile")?,
            params.number("lower_bound")?,
            params.number("upper_bound")?,
        )?
        .into(),
        ConstraintKind::Uniqueness => UniquenessConstraint::new(
            column,
            params.number("min_unique_ratio")?,
            params.count("min_unique_count")?,
        )?
        .into(),
        ConstraintKind::StandardDeviation => StandardDeviationConstraint::new(
            column,
            params.number("lower_bound")?,
            params.number("upper_bound")?,
        )?
        .into(),
        ConstraintKind::StringLength => StringLengthConstraint::new(
            column,
            params.count("min_length")?,
            params.count("max_length")?,
        )?
        .into(),
        ConstraintKind::RegexPattern => {
            RegexPatternConstraint::new(column, params.required_string("pattern")?)?.into()
        }
        ConstraintKind::ValueSet => {
            ValueSetConstraint::new(column, params.required_values("allowed_values")?)?.into()
        }
        ConstraintKind::RowCount => RowCountConstraint::new(
            column,
            params.count("min_rows")?,
            params.count("max_rows")?,
        )?
        .into(),
    };

    Ok(constraint)
}

/// Typed access to a constraint definition's parameters.
struct Params<'a> {
    kind: ConstraintKind,
    definition: &'a Map<String, Value>,
}

impl Params<'_> {
    fn invalid(&self, key: &str, expected: &str) -> SchemaCompileError {
        SchemaCompileError::InvalidParameter {
            kind: self.kind.as_str().to_string(),
            key: key.to_string(),
            expected: expected.to_string(),
        }
    }

    fn required<'v>(&'v self, key: &str) -> Result<&'v Value> {
        present(self.definition, key).ok_or_else(|| SchemaCompileError::MissingKey {
            kind: self.kind.as_str().to_string(),
            key: key.to_string(),
        })
    }

    fn number(&self, key: &str) -> Result<Option<f64>> {
        present(self.definition, key)
            .map(|value| value.as_f64().ok_or_else(|| self.invalid(key, "a number")))
            .transpose()
    }

    fn required_number(&self, key: &str) -> Result<f64> {
        self.required(key)?
            .as_f64()
            .ok_or_else(|| self.invalid(key, "a number"))
    }

    fn count(&self, key: &str) -> Result<Option<usize>> {
        present(self.definition, key)
            .map(|value| {
                value
                    .as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| self.invalid(key, "a non-negative integer"))
            })
            .transpose()
    }

    fn required_string(&self, key: &str) -> Result<&str> {
        self.required(key)?
            .as_str()
            .ok_or_else(|| self.invalid(key, "a string"))
    }

    fn required_values(&self, key: &str) -> Result<Vec<DataValue>> {
        self.required(key)?
            .as_array()
            .ok_or_else(|| self.invalid(key, "a list"))?
            .iter()
            .map(|value| to_data_value(value).ok_or_else(|| self.invalid(key, "a list of scalars")))
            .collect()
    }
}

fn to_data_value(value: &Value) -> Option<DataValue> {
    match value {
        Value::Null => Some(DataValue::Null),
        Value::Bool(b) => Some(DataValue::Bool(*b)),
        Value::Number(n) => n
            .as_i64()
            .map(DataValue::Int)
            .or_else(|| n.as_f64().map(DataValue::Float)),
        Value::String(s) => Some(DataValue::String(s.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use seal_core::{ConstraintConfigError, TypeName};
    use serde_json::json;

    fn err(document: Value) -> String {
        compile_schema(&document).unwrap_err().to_string()
    }

    #[test]
    fn test_field_form_preserves_order() {
        let validator = compile_schema(&json!({
            "fields": {
                "user_id": {
                    "type": "Int64",
                    "constraints": [
                        {"type": "uniqueness", "min_unique_ratio": 1.0},
                        {"type": "nullability", "max_null_count": 0}
                    ]
                },
                "age": {
                    "type": "Int64",
                    "constraints": [{"type": "maximum_value", "max_value": 120}]
                },
                "notes": {"type": "String"}
            }
        }))
        .unwrap();

        let names: Vec<&str> = validator.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["user_id", "age", "notes"]);

        let labels: Vec<String> = validator.constraints().iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "UniquenessConstraint(user_id)",
                "NullabilityConstraint(user_id)",
                "MaximumValueConstraint(age)",
            ]
        );
        assert_eq!(validator.field_type("notes"), Some(&TypeName::String));
    }

    #[test]
    fn test_field_name_overrides_column() {
        let validator = compile_schema(&json!({
            "fields": {
                "age": {
                    "type": "Int64",
                    "constraints": [{"type": "minimum_value", "column": "other", "min_value": 0}]
                }
            }
        }))
        .unwrap();

        assert_eq!(validator.constraints()[0].column(), "age");
    }

    #[test]
    fn test_legacy_form() {
        let validator = compile_schema(&json!({
            "constraints": [
                {"type": "row_count", "column": "", "min_rows": 1},
                {"type": "regex_pattern", "column": "email", "pattern": "@"},
                {"type": "value_set", "column": "status", "allowed_values": ["a", "b"]}
            ]
        }))
        .unwrap();

        assert!(validator.field_types().is_empty());
        assert_eq!(validator.constraints().len(), 3);
        assert_eq!(validator.constraints()[1].kind(), ConstraintKind::RegexPattern);
    }

    #[test]
    fn test_every_kind_compiles() {
        let validator = compile_schema(&json!({
            "fields": {
                "v": {
                    "type": "Float64",
                    "constraints": [
                        {"type": "nullability", "max_null_ratio": 0.1},
                        {"type": "maximum_value", "max_value": 10},
                        {"type": "minimum_value", "min_value": 0.5},
                        {"type": "median", "lower_bound": 1},
                        {"type": "mean", "upper_bound": 9},
                        {"type": "percentile", "percentile": 0.95, "upper_bound": 10},
                        {"type": "uniqueness", "min_unique_count": 2},
                        {"type": "standard_deviation", "upper_bound": 3.5},
                        {"type": "string_length", "max_length": 8},
                        {"type": "regex_pattern", "pattern": "^[0-9.]+$"},
                        {"type": "value_set", "allowed_values": [1, 2.5, "x", true]},
                        {"type": "row_count", "min_rows": 1, "max_rows": null}
                    ]
                }
            }
        }))
        .unwrap();

        let kinds: Vec<ConstraintKind> = validator.constraints().iter().map(|c| c.kind()).collect();
        assert_eq!(kinds, ConstraintKind::ALL.to_vec());
    }

    #[test]
    fn test_document_shape_errors() {
        assert!(err(json!({})).contains("must contain either 'fields' or 'constraints'"));
        assert!(err(json!({"fields": null})).contains("must contain either"));
        assert!(err(json!({"fields": {}, "constraints": []})).contains("not both"));
        assert!(err(json!({"fields": []})).contains("'fields' must be a mapping"));
        assert!(err(json!({"constraints": {}})).contains("'constraints' must be a list"));
        assert!(err(json!([1, 2])).contains("Schema document must be a mapping"));
    }

    #[test]
    fn test_field_errors() {
        assert!(
            err(json!({"fields": {"age": {"constraints": []}}}))
                .contains("Field 'age' must specify a 'type'")
        );
        assert!(
            err(json!({"fields": {"age": {"type": "Int64", "constraints": "nope"}}}))
                .contains("Field 'age' constraints must be a list")
        );
        assert!(err(json!({"fields": {"age": "Int64"}})).contains("specification must be a mapping"));
        assert!(
            err(json!({"fields": {"age": {"type": "Int64", "constraints": ["x"]}}}))
                .contains("Constraint definition must be a mapping")
        );
    }

    #[test]
    fn test_constraint_definition_errors() {
        assert!(
            err(json!({"constraints": [{"column": "a"}]}))
                .contains("Constraint definition must contain a 'type' key")
        );
        assert!(
            err(json!({"constraints": [{"type": "mean"}]}))
                .contains("Constraint definition must contain a 'column' key")
        );
        assert!(
            err(json!({"constraints": [{"type": "maximum_value", "column": "a"}]}))
                .contains("maximum_value constraint requires 'max_value' key")
        );
        assert_eq!(
            err(json!({"constraints": [{"type": "bogus", "column": "a"}]})),
            "Unknown constraint type: bogus"
        );
    }

    #[test]
    fn test_non_string_type_and_column() {
        assert_eq!(
            err(json!({"constraints": [{"type": 5, "column": "a"}]})),
            "Constraint 'type' must be a string"
        );
        assert_eq!(
            err(json!({"constraints": [{"type": "mean", "column": ["a"], "lower_bound": 1}]})),
            "Constraint 'column' must be a string"
        );
        assert_eq!(
            err(json!({"constraints": [{"type": null, "column": "a"}]})),
            "Constraint definition must contain a 'type' key"
        );
    }

    #[test]
    fn test_parameter_type_errors() {
        assert!(
            err(json!({"constraints": [{"type": "maximum_value", "column": "a", "max_value": "ten"}]}))
                .contains("must be a number")
        );
        assert!(
            err(json!({"constraints": [{"type": "row_count", "column": "", "min_rows": -1}]}))
                .contains("must be a non-negative integer")
        );
        assert!(
            err(json!({"constraints": [{"type": "value_set", "column": "a", "allowed_values": [[1]]}]}))
                .contains("a list of scalars")
        );
    }

    #[test]
    fn test_constraint_config_errors_propagate() {
        let error = compile_schema(&json!({
            "constraints": [{"type": "nullability", "column": "a"}]
        }))
        .unwrap_err();

        assert!(matches!(
            error,
            SchemaCompileError::Constraint(ConstraintConfigError::MissingParameter { .. })
        ));
        assert!(error.to_string().contains("Must specify either"));

        assert!(
            err(json!({"constraints": [{"type": "value_set", "column": "a", "allowed_values": []}]}))
                .contains("must contain at least one value")
        );
        assert!(
            err(json!({"constraints": [{"type": "percentile", "column": "a", "percentile": 2.0, "upper_bound": 1}]}))
                .contains("percentile must be between")
        );
    }
}
