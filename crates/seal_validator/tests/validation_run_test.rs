//! End-to-end runs of the two-phase validator.
//!
//! Covers the raising contract (type errors abort before constraints run,
//! constraint failures are raised only after all constraints ran), the
//! collect-all mode, reuse across runs and threads, and Arrow-backed sources.

use arrow_array::{Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use pretty_assertions::assert_eq;
use seal_core::{FieldDeclaration, ValidationOptions, ValidationPhase};
use seal_validator::{
    Constraint, DataSet, MaximumValueConstraint, MeanConstraint, NullabilityConstraint,
    RecordBatchSource, RegexPatternConstraint, RowCountConstraint, UniquenessConstraint,
    Validator, ValueSetConstraint,
};
use std::sync::Arc;
use std::thread;

fn users() -> DataSet {
    DataSet::new()
        .with_column("user_id", vec![1, 2, 3, 4, 5])
        .with_column("age", vec![Some(25), Some(31), None, Some(47), Some(52)])
        .with_column(
            "email",
            vec![
                Some("a@example.com"),
                Some("b@example.com"),
                None,
                Some("d@example.com"),
                Some("e@example.com"),
            ],
        )
        .with_column(
            "status",
            vec!["active", "active", "inactive", "pending", "active"],
        )
}

fn user_constraints() -> Vec<Constraint> {
    vec![
        UniquenessConstraint::new("user_id", Some(1.0), None)
            .unwrap()
            .into(),
        NullabilityConstraint::new("age", Some(0.25), None)
            .unwrap()
            .into(),
        MaximumValueConstraint::new("age", 120.0).into(),
        MeanConstraint::new("age", Some(18.0), Some(80.0))
            .unwrap()
            .into(),
        RegexPatternConstraint::new("email", r"^[^@]+@[^@]+\.[a-z]+$")
            .unwrap()
            .into(),
        ValueSetConstraint::new(
            "status",
            vec!["active".into(), "inactive".into(), "pending".into()],
        )
        .unwrap()
        .into(),
        RowCountConstraint::new("", Some(1), Some(1000))
            .unwrap()
            .into(),
    ]
}

fn user_fields() -> Vec<FieldDeclaration> {
    vec![
        FieldDeclaration::new("user_id", "Int64"),
        FieldDeclaration::new("age", "Int64"),
        FieldDeclaration::new("email", "String"),
        FieldDeclaration::new("status", "str"),
    ]
}

/// One mistyped field plus one failing constraint on that field.
fn mistyped() -> Validator {
    Validator::with_fields(
        vec![MaximumValueConstraint::new("age", 30.0).into()],
        vec![FieldDeclaration::new("age", "String")],
    )
}

#[test]
fn test_valid_dataset_passes() {
    let validator = Validator::with_fields(user_constraints(), user_fields());
    let result = validator.validate(&users()).unwrap();

    assert!(result.passed());
    assert_eq!(result.len(), 4 + 7);
    assert_eq!(result.failed_count(), 0);
}

#[test]
fn test_type_errors_abort_before_constraints() {
    let error = mistyped().validate(&users()).unwrap_err();

    assert_eq!(error.phase(), ValidationPhase::TypeCheck);
    assert_eq!(error.failures().len(), 1);
    assert_eq!(error.failures()[0].constraint_label, "TypeCheck(age)");
    assert!(error.to_string().contains("Type errors found"));
    assert!(!error.to_string().contains("MaximumValueConstraint"));
}

#[test]
fn test_collect_all_reports_both_phases() {
    let result = mistyped()
        .validate_with(&users(), &ValidationOptions::collect_all())
        .unwrap();

    assert!(!result.passed());
    let failed: Vec<&str> = result
        .failures()
        .map(|o| o.constraint_label.as_str())
        .collect();
    assert_eq!(failed, vec!["TypeCheck(age)", "MaximumValueConstraint(age)"]);
    assert_eq!(result, mistyped().collect(&users()));
}

#[test]
fn test_missing_required_field() {
    let validator = Validator::with_fields(
        Vec::new(),
        vec![FieldDeclaration::new("signup_date", "Date")],
    );
    let error = validator.validate(&users()).unwrap_err();

    assert_eq!(error.failures()[0].message, "Required field 'signup_date' not found");
}

#[test]
fn test_constraints_only_skips_type_check() {
    let validator = Validator::new(vec![MaximumValueConstraint::new("age", 30.0).into()]);
    assert!(validator.field_types().is_empty());

    for raise_on_error in [true, false] {
        let options = ValidationOptions::new().with_raise_on_error(raise_on_error);
        let outcomes = match validator.validate_with(&users(), &options) {
            Ok(result) => result.into_results(),
            Err(error) => error.into_failures(),
        };
        assert!(outcomes.iter().all(|o| !o.constraint_label.starts_with("TypeCheck")));
        assert_eq!(outcomes.len(), 1);
    }
}

#[test]
fn test_constraint_failure_message_lists_failures() {
    let validator = Validator::new(vec![
        MaximumValueConstraint::new("age", 50.0).into(),
        RowCountConstraint::new("", None, Some(3)).unwrap().into(),
        NullabilityConstraint::new("age", Some(0.5), None)
            .unwrap()
            .into(),
    ]);

    let error = validator.validate(&users()).unwrap_err();
    let message = error.to_string();

    assert_eq!(error.phase(), ValidationPhase::Constraints);
    assert_eq!(error.failures().len(), 2);
    assert!(message.contains("constraint"));
    assert!(message.contains("Failed constraints:"));
    assert!(message.contains("MaximumValueConstraint(age)"));
    assert!(message.contains("RowCountConstraint()"));
}

#[test]
fn test_repeated_runs_are_identical() {
    let validator = Validator::with_fields(user_constraints(), user_fields());
    let dataset = users();

    let first = validator.collect(&dataset);
    let second = validator.collect(&dataset);

    assert_eq!(first, second);
}

#[test]
fn test_concurrent_runs_share_one_validator() {
    let validator = Arc::new(Validator::with_fields(user_constraints(), user_fields()));
    let dataset = Arc::new(users());
    let expected = validator.collect(dataset.as_ref());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let validator = Arc::clone(&validator);
            let dataset = Arc::clone(&dataset);
            thread::spawn(move || validator.collect(dataset.as_ref()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_parallel_keeps_order_and_raising() {
    let mut constraints = user_constraints();
    constraints.push(MaximumValueConstraint::new("age", 40.0).into());
    let validator = Validator::with_fields(constraints, user_fields());

    let sequential = validator.validate(&users()).unwrap_err();
    let parallel = validator
        .validate_with(&users(), &ValidationOptions::new().with_parallel(true))
        .unwrap_err();
    assert_eq!(sequential, parallel);

    let options = ValidationOptions::collect_all();
    let sequential = validator.validate_with(&users(), &options).unwrap();
    let parallel = validator
        .validate_with(&users(), &options.with_parallel(true))
        .unwrap();
    assert_eq!(sequential, parallel);
}

#[test]
fn test_record_batch_source() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("user_id", DataType::Int64, false),
        Field::new("score", DataType::Float64, true),
        Field::new("status", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])),
            Arc::new(Float64Array::from(vec![Some(0.5), None, Some(0.9)])),
            Arc::new(StringArray::from(vec!["active", "inactive", "active"])),
        ],
    )
    .unwrap();
    let source = RecordBatchSource::new(batch).unwrap();

    let validator = Validator::with_fields(
        vec![
            MaximumValueConstraint::new("score", 1.0).into(),
            ValueSetConstraint::new("status", vec!["active".into(), "inactive".into()])
                .unwrap()
                .into(),
        ],
        vec![
            FieldDeclaration::new("user_id", "i64"),
            FieldDeclaration::new("score", "Float64"),
            FieldDeclaration::new("status", "String"),
        ],
    );

    let result = validator.validate(&source).unwrap();
    assert!(result.passed());
    assert_eq!(result.len(), 5);
}
