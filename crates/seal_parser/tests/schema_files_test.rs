//! Loading schema files from disk and running the compiled validators.

use pretty_assertions::assert_eq;
use seal_core::ValidationOptions;
use seal_parser::{SchemaCompileError, load_schema};
use seal_validator::{DataSet, Validator};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn labels(validator: &Validator) -> Vec<String> {
    validator.constraints().iter().map(|c| c.label()).collect()
}

fn users() -> DataSet {
    DataSet::new()
        .with_column("user_id", vec![1, 2, 3, 4])
        .with_column("age", vec![23, 35, 41, 61])
        .with_column(
            "email",
            vec!["ann@example.com", "bo@example.org", "cy@example.net", "di@example.io"],
        )
        .with_column("status", vec!["active", "pending", "active", "inactive"])
}

#[test]
fn test_json_fixture() {
    let validator = load_schema(fixture_path("users.json")).unwrap();

    assert_eq!(
        labels(&validator),
        vec![
            "NullabilityConstraint(user_id)",
            "UniquenessConstraint(user_id)",
            "NullabilityConstraint(age)",
            "MinimumValueConstraint(age)",
            "MaximumValueConstraint(age)",
            "MedianConstraint(age)",
            "RegexPatternConstraint(email)",
            "StringLengthConstraint(email)",
            "ValueSetConstraint(status)",
        ]
    );
    assert_eq!(validator.fields().len(), 4);
}

#[test]
fn test_all_formats_compile_to_the_same_plan() {
    let json = load_schema(fixture_path("users.json")).unwrap();
    let yaml = load_schema(fixture_path("users.yaml")).unwrap();
    let toml = load_schema(fixture_path("users.toml")).unwrap();

    assert_eq!(labels(&json), labels(&yaml));
    assert_eq!(json.fields(), yaml.fields());

    let mut json_labels = labels(&json);
    let mut toml_labels = labels(&toml);
    json_labels.sort();
    toml_labels.sort();
    assert_eq!(json_labels, toml_labels);
}

#[test]
fn test_compiled_schema_validates_data() {
    let validator = load_schema(fixture_path("users.json")).unwrap();
    let result = validator.validate(&users()).unwrap();

    assert!(result.passed(), "{}", result.summary());
    assert_eq!(result.len(), 4 + 9);
}

#[test]
fn test_compiled_schema_reports_failures() {
    let validator = load_schema(fixture_path("users.json")).unwrap();
    let dataset = DataSet::new()
        .with_column("user_id", vec![1, 1, 2, 3])
        .with_column("age", vec![Some(23), Some(135), None, None])
        .with_column("email", vec!["ann@example.com", "nope", "cy@example.net", "d@x.io"])
        .with_column("status", vec!["active", "deleted", "active", "inactive"]);

    let result = validator
        .validate_with(&dataset, &ValidationOptions::collect_all())
        .unwrap();
    let failed: Vec<&str> = result
        .failures()
        .map(|o| o.constraint_label.as_str())
        .collect();

    assert_eq!(
        failed,
        vec![
            "UniquenessConstraint(user_id)",
            "NullabilityConstraint(age)",
            "MaximumValueConstraint(age)",
            "MedianConstraint(age)",
            "RegexPatternConstraint(email)",
            "StringLengthConstraint(email)",
            "ValueSetConstraint(status)",
        ]
    );
}

#[test]
fn test_legacy_fixture_skips_type_check() {
    let validator = load_schema(fixture_path("legacy.json")).unwrap();
    assert!(validator.fields().is_empty());

    let result = validator.validate(&users()).unwrap();
    assert_eq!(result.len(), 3);
    assert!(result.passed());
}

#[test]
fn test_invalid_schema_file() {
    let mut file = NamedTempFile::with_suffix(".json").unwrap();
    write!(file, r#"{{"fields": {{"age": {{"constraints": []}}}}}}"#).unwrap();
    file.flush().unwrap();

    let error = load_schema(file.path()).unwrap_err();
    assert!(matches!(error, SchemaCompileError::MissingFieldType(ref name) if name == "age"));
}

#[test]
fn test_unsupported_extension() {
    let file = NamedTempFile::with_suffix(".xml").unwrap();
    let error = load_schema(file.path()).unwrap_err();
    assert!(matches!(error, SchemaCompileError::UnsupportedFormat(_)));
}
