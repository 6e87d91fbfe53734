//! Column statistics over materialized cell values.
//!
//! These back the provided methods of [`DataSource`](crate::DataSource).
//! Null cells are skipped by every numeric aggregate; non-numeric cells are
//! skipped as well, so a column without numeric data has no aggregate.

use crate::DataValue;
use std::collections::HashSet;

/// Non-null numeric values of a column, in row order.
pub fn numeric_values(values: &[DataValue]) -> Vec<f64> {
    values.iter().filter_map(DataValue::as_f64).collect()
}

fn sorted(values: &[DataValue]) -> Vec<f64> {
    let mut numbers = numeric_values(values);
    numbers.sort_by(f64::total_cmp);
    numbers
}

/// Smallest numeric value.
pub fn min(values: &[DataValue]) -> Option<f64> {
    numeric_values(values).into_iter().reduce(f64::min)
}

/// Largest numeric value.
pub fn max(values: &[DataValue]) -> Option<f64> {
    numeric_values(values).into_iter().reduce(f64::max)
}

/// Arithmetic mean.
pub fn mean(values: &[DataValue]) -> Option<f64> {
    let numbers = numeric_values(values);
    if numbers.is_empty() {
        return None;
    }
    Some(numbers.iter().sum::<f64>() / numbers.len() as f64)
}

/// Median, interpolating between the two middle values of an even count.
pub fn median(values: &[DataValue]) -> Option<f64> {
    quantile(values, 0.5)
}

/// Quantile at fraction `q` using linear interpolation between closest ranks.
///
/// For sorted values `x[0..n]` the position is `q * (n - 1)`; a fractional
/// position interpolates between its neighbours. `q` is clamped to `[0, 1]`.
pub fn quantile(values: &[DataValue], q: f64) -> Option<f64> {
    let numbers = sorted(values);
    if numbers.is_empty() {
        return None;
    }

    let position = q.clamp(0.0, 1.0) * (numbers.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;

    Some(numbers[lower] + (numbers[upper] - numbers[lower]) * weight)
}

/// Sample standard deviation (N - 1 denominator).
///
/// Undefined for fewer than two values.
pub fn std_dev(values: &[DataValue]) -> Option<f64> {
    let numbers = numeric_values(values);
    if numbers.len() < 2 {
        return None;
    }

    let n = numbers.len() as f64;
    let mean = numbers.iter().sum::<f64>() / n;
    let sum_sq: f64 = numbers.iter().map(|x| (x - mean).powi(2)).sum();
    Some((sum_sq / (n - 1.0)).sqrt())
}

#[derive(PartialEq, Eq, Hash)]
enum DistinctKey<'a> {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(&'a str),
}

impl<'a> From<&'a DataValue> for DistinctKey<'a> {
    fn from(value: &'a DataValue) -> Self {
        match value {
            DataValue::Null => DistinctKey::Null,
            DataValue::Int(i) => DistinctKey::Int(*i),
            DataValue::Float(f) => float_key(*f),
            DataValue::Bool(b) => DistinctKey::Bool(*b),
            DataValue::String(s) => DistinctKey::Str(s),
        }
    }
}

/// Integral floats share a key with the equal integer; `-0.0` folds into `0.0`.
fn float_key<'a>(f: f64) -> DistinctKey<'a> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        DistinctKey::Int(f as i64)
    } else {
        DistinctKey::Float(f.to_bits())
    }
}

/// Number of distinct values; null counts as one value when present.
pub fn distinct_count(values: &[DataValue]) -> usize {
    values
        .iter()
        .map(DistinctKey::from)
        .collect::<HashSet<_>>()
        .len()
}
