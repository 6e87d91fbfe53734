//! Tests to verify correct handling of null values across all constraint kinds.
//!
//! Null handling is a policy, not an accident:
//! - Nullability counts nulls against its limits
//! - Aggregate constraints pass vacuously when a column holds only nulls
//! - Pattern and value set constraints treat null cells as satisfied
//! - Uniqueness counts null as one distinct value

use seal_validator::{
    ColumnConstraint, DataSet, DataValue, MaximumValueConstraint, MeanConstraint,
    MedianConstraint, MinimumValueConstraint, NullabilityConstraint, PercentileConstraint,
    RegexPatternConstraint, StandardDeviationConstraint, StringLengthConstraint,
    UniquenessConstraint, ValueSetConstraint,
};

fn all_null(rows: usize) -> DataSet {
    DataSet::new().with_column("values", vec![DataValue::Null; rows])
}

fn empty() -> DataSet {
    DataSet::new().with_column("values", Vec::<DataValue>::new())
}

#[test]
fn test_aggregates_pass_vacuously_on_all_null_columns() {
    for rows in [0, 1, 5] {
        let dataset = if rows == 0 { empty() } else { all_null(rows) };

        let outcomes = vec![
            MaximumValueConstraint::new("values", -1.0).validate(&dataset),
            MinimumValueConstraint::new("values", 1e9).validate(&dataset),
            MedianConstraint::new("values", Some(1.0), Some(2.0))
                .unwrap()
                .validate(&dataset),
            MeanConstraint::new("values", Some(1.0), None)
                .unwrap()
                .validate(&dataset),
            PercentileConstraint::new("values", 0.95, None, Some(0.0))
                .unwrap()
                .validate(&dataset),
            StandardDeviationConstraint::new("values", Some(1.0), None)
                .unwrap()
                .validate(&dataset),
            StringLengthConstraint::new("values", Some(3), None)
                .unwrap()
                .validate(&dataset),
        ];

        for outcome in outcomes {
            assert!(
                outcome.passed,
                "{} should pass on {rows} null rows: {}",
                outcome.constraint_label, outcome.message
            );
            assert_eq!(outcome.message, "Column contains only null values");
        }
    }
}

#[test]
fn test_aggregate_reported_as_null() {
    let outcome = MaximumValueConstraint::new("values", 10.0).validate(&all_null(3));
    assert!(outcome.detail("actual_max").unwrap().is_null());

    let outcome = MeanConstraint::new("values", None, Some(1.0))
        .unwrap()
        .validate(&all_null(3));
    assert!(outcome.detail("actual_mean").unwrap().is_null());
}

#[test]
fn test_single_value_has_no_standard_deviation() {
    let dataset = DataSet::new().with_column("values", vec![Some(42), None]);
    let outcome = StandardDeviationConstraint::new("values", Some(1.0), None)
        .unwrap()
        .validate(&dataset);

    assert!(outcome.passed);
    assert_eq!(
        outcome.message,
        "Column has too few numeric values (1) for this aggregate"
    );
    assert!(outcome.detail("actual_std").unwrap().is_null());
}

#[test]
fn test_nulls_ignored_by_aggregates() {
    let dataset = DataSet::new().with_column("values", vec![Some(10), None, Some(30), None]);

    let outcome = MeanConstraint::new("values", Some(20.0), Some(20.0))
        .unwrap()
        .validate(&dataset);
    assert!(outcome.passed, "{}", outcome.message);

    let outcome = MinimumValueConstraint::new("values", 10.0).validate(&dataset);
    assert!(outcome.passed);
}

#[test]
fn test_nulls_satisfy_pattern_and_value_set() {
    let dataset = DataSet::new().with_column(
        "email",
        vec![Some("user@x.com"), None, Some("test@y.org"), None],
    );

    let outcome = RegexPatternConstraint::new("email", "@")
        .unwrap()
        .validate(&dataset);
    assert!(outcome.passed);
    assert_eq!(outcome.detail("mismatch_count").and_then(|v| v.as_i64()), Some(0));

    let allowed = vec![DataValue::from("user@x.com"), DataValue::from("test@y.org")];
    let outcome = ValueSetConstraint::new("email", allowed)
        .unwrap()
        .validate(&dataset);
    assert!(outcome.passed);
    assert_eq!(outcome.detail("invalid_count").and_then(|v| v.as_i64()), Some(0));
}

#[test]
fn test_nulls_count_against_nullability() {
    let outcome = NullabilityConstraint::new("values", Some(0.5), None)
        .unwrap()
        .validate(&all_null(4));

    assert!(!outcome.passed);
    assert_eq!(outcome.detail("null_ratio").and_then(|v| v.as_f64()), Some(1.0));
}

#[test]
fn test_null_is_one_distinct_value() {
    let outcome = UniquenessConstraint::new("values", None, Some(1))
        .unwrap()
        .validate(&all_null(4));

    assert!(outcome.passed);
    assert_eq!(outcome.detail("unique_count").and_then(|v| v.as_i64()), Some(1));
}
