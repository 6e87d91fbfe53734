//! The data source abstraction constraints are evaluated against.

use crate::{DataValue, stats};
use regex::Regex;
use std::borrow::Cow;

/// Read-only tabular data a validation run inspects.
///
/// Implementors provide row count, column types and materialized column
/// values; every aggregate a constraint needs is a provided method on top of
/// those. Sources are shared across threads by parallel runs, and no method
/// may mutate the underlying data.
///
/// Aggregates of a column that does not exist, or that holds no numeric data,
/// are `None`. Counts of an absent column are zero.
pub trait DataSource: Send + Sync {
    /// Total number of rows.
    fn row_count(&self) -> usize;

    /// Textual logical type of a column, or `None` if it does not exist.
    fn column_type(&self, column: &str) -> Option<String>;

    /// Cell values of a column in row order, or `None` if it does not exist.
    fn column_values(&self, column: &str) -> Option<Cow<'_, [DataValue]>>;

    /// Returns true if the column exists.
    fn has_column(&self, column: &str) -> bool {
        self.column_type(column).is_some()
    }

    /// Number of null cells.
    fn null_count(&self, column: &str) -> usize {
        self.column_values(column)
            .map_or(0, |values| values.iter().filter(|v| v.is_null()).count())
    }

    /// Smallest non-null numeric value.
    fn min(&self, column: &str) -> Option<f64> {
        stats::min(&self.column_values(column)?)
    }

    /// Largest non-null numeric value.
    fn max(&self, column: &str) -> Option<f64> {
        stats::max(&self.column_values(column)?)
    }

    /// Mean of non-null numeric values.
    fn mean(&self, column: &str) -> Option<f64> {
        stats::mean(&self.column_values(column)?)
    }

    /// Median of non-null numeric values.
    fn median(&self, column: &str) -> Option<f64> {
        stats::median(&self.column_values(column)?)
    }

    /// Quantile at fraction `q` with linear interpolation.
    fn quantile(&self, column: &str, q: f64) -> Option<f64> {
        stats::quantile(&self.column_values(column)?, q)
    }

    /// Sample standard deviation; `None` for fewer than two values.
    fn std_dev(&self, column: &str) -> Option<f64> {
        stats::std_dev(&self.column_values(column)?)
    }

    /// Number of distinct values, counting null as one value.
    fn distinct_count(&self, column: &str) -> usize {
        self.column_values(column)
            .map_or(0, |values| stats::distinct_count(&values))
    }

    /// Character length of every cell; `None` for null cells.
    ///
    /// Non-string cells are measured by their display form.
    fn string_lengths(&self, column: &str) -> Vec<Option<usize>> {
        self.column_values(column).map_or_else(Vec::new, |values| {
            values
                .iter()
                .map(|v| v.as_text().map(|text| text.chars().count()))
                .collect()
        })
    }

    /// Number of non-null cells the pattern does not match.
    ///
    /// Matching is a search anywhere in the text, not a full match.
    fn non_matching_count(&self, column: &str, pattern: &Regex) -> usize {
        self.column_values(column).map_or(0, |values| {
            values
                .iter()
                .filter_map(DataValue::as_text)
                .filter(|text| !pattern.is_match(text))
                .count()
        })
    }

    /// Non-null cells not found in `allowed`, in row order.
    fn values_outside(&self, column: &str, allowed: &[DataValue]) -> Vec<DataValue> {
        self.column_values(column).map_or_else(Vec::new, |values| {
            values
                .iter()
                .filter(|v| !v.is_null())
                .filter(|v| !allowed.iter().any(|a| a.loosely_eq(v)))
                .cloned()
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DataSet;
    use pretty_assertions::assert_eq;

    fn sample() -> DataSet {
        DataSet::new()
            .with_column("age", vec![Some(25), None, Some(35), Some(45)])
            .with_column("code", vec![Some("ab"), Some("abcd"), None, Some("x1")])
            .with_column("status", vec!["active", "inactive", "pending", "active"])
    }

    #[test]
    fn test_counts_on_absent_column() {
        let dataset = sample();
        assert!(!dataset.has_column("missing"));
        assert_eq!(dataset.null_count("missing"), 0);
        assert_eq!(dataset.distinct_count("missing"), 0);
        assert_eq!(dataset.max("missing"), None);
        assert!(dataset.string_lengths("missing").is_empty());
    }

    #[test]
    fn test_numeric_aggregates() {
        let dataset = sample();
        assert_eq!(dataset.null_count("age"), 1);
        assert_eq!(dataset.min("age"), Some(25.0));
        assert_eq!(dataset.max("age"), Some(45.0));
        assert_eq!(dataset.mean("age"), Some(35.0));
        assert_eq!(dataset.median("age"), Some(35.0));
        assert_eq!(dataset.std_dev("age"), Some(10.0));
    }

    #[test]
    fn test_string_lengths() {
        let dataset = sample();
        assert_eq!(
            dataset.string_lengths("code"),
            vec![Some(2), Some(4), None, Some(2)]
        );
    }

    #[test]
    fn test_non_matching_count_skips_nulls() {
        let dataset = sample();
        let pattern = Regex::new(r"^[a-z]+$").unwrap();
        assert_eq!(dataset.non_matching_count("code", &pattern), 1);
    }

    #[test]
    fn test_values_outside() {
        let dataset = sample();
        let allowed = vec![DataValue::from("active"), DataValue::from("inactive")];
        assert_eq!(
            dataset.values_outside("status", &allowed),
            vec![DataValue::from("pending")]
        );
    }
}
