//! In-memory columnar dataset.
//!
//! This module provides the cell value model shared by every data source and
//! [`DataSet`], a small columnar table that implements
//! [`DataSource`](crate::DataSource) directly.

use crate::{DataSource, SourceError};
use indexmap::IndexMap;
use seal_core::TypeName;
use std::borrow::Cow;
use std::fmt;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Null/missing value
    Null,
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
}

impl DataValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }

    /// Returns the logical type of this value.
    pub fn type_name(&self) -> TypeName {
        match self {
            DataValue::Null => TypeName::Null,
            DataValue::Int(_) => TypeName::Int64,
            DataValue::Float(_) => TypeName::Float64,
            DataValue::Bool(_) => TypeName::Boolean,
            DataValue::String(_) => TypeName::String,
        }
    }

    /// Attempts to get this value as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            DataValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DataValue::Float(f) => Some(*f),
            DataValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text a string operation sees for this value.
    ///
    /// Strings are returned as-is; other non-null values use their display form.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            DataValue::Null => None,
            DataValue::String(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Equality that treats integers and floats of the same numeric value as equal.
    pub fn loosely_eq(&self, other: &DataValue) -> bool {
        match (self, other) {
            (DataValue::Int(a), DataValue::Float(b)) | (DataValue::Float(b), DataValue::Int(a)) => {
                (*a as f64) == *b
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => f.write_str("null"),
            DataValue::Int(i) => write!(f, "{i}"),
            DataValue::Float(x) => write!(f, "{x}"),
            DataValue::Bool(b) => write!(f, "{b}"),
            DataValue::String(s) => f.write_str(s),
        }
    }
}

impl From<String> for DataValue {
    fn from(s: String) -> Self {
        DataValue::String(s)
    }
}

impl From<&str> for DataValue {
    fn from(s: &str) -> Self {
        DataValue::String(s.to_string())
    }
}

impl From<i64> for DataValue {
    fn from(i: i64) -> Self {
        DataValue::Int(i)
    }
}

impl From<i32> for DataValue {
    fn from(i: i32) -> Self {
        DataValue::Int(i64::from(i))
    }
}

impl From<f64> for DataValue {
    fn from(f: f64) -> Self {
        DataValue::Float(f)
    }
}

impl From<bool> for DataValue {
    fn from(b: bool) -> Self {
        DataValue::Bool(b)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(DataValue::Null, Into::into)
    }
}

/// A named, typed column of a [`DataSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    data_type: TypeName,
    values: Vec<DataValue>,
}

impl Column {
    /// Creates a column whose type is inferred from its values.
    pub fn new(values: Vec<DataValue>) -> Self {
        let data_type = infer_type(&values);
        Self { data_type, values }
    }

    /// Creates a column with an explicit logical type.
    pub fn typed(data_type: TypeName, values: Vec<DataValue>) -> Self {
        Self { data_type, values }
    }

    /// Logical type of the column.
    pub fn data_type(&self) -> &TypeName {
        &self.data_type
    }

    /// Cell values in row order.
    pub fn values(&self) -> &[DataValue] {
        &self.values
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Infers a column type the way a dataframe engine does for literal input.
///
/// Integers mixed with floats widen to `Float64`; a column with no non-null
/// values is `Null`; any other mixture has no common type.
fn infer_type(values: &[DataValue]) -> TypeName {
    let mut inferred: Option<TypeName> = None;

    for value in values.iter().filter(|v| !v.is_null()) {
        let current = value.type_name();
        inferred = Some(match inferred {
            None => current,
            Some(prev) if prev == current => prev,
            Some(TypeName::Int64) if current == TypeName::Float64 => TypeName::Float64,
            Some(TypeName::Float64) if current == TypeName::Int64 => TypeName::Float64,
            Some(_) => return TypeName::Other("Object".to_string()),
        });
    }

    inferred.unwrap_or(TypeName::Null)
}

/// An in-memory columnar table.
///
/// Columns keep insertion order and must all have the same length.
///
/// # Example
///
/// ```rust
/// use seal_validator::{DataSet, DataSource};
///
/// let dataset = DataSet::new()
///     .with_column("id", vec![1, 2, 3])
///     .with_column("email", vec![Some("a@x.com"), None, Some("b@y.org")]);
///
/// assert_eq!(dataset.row_count(), 3);
/// assert_eq!(dataset.column_type("id").as_deref(), Some("Int64"));
/// assert_eq!(dataset.null_count("email"), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    columns: IndexMap<String, Column>,
    rows: usize,
}

impl DataSet {
    /// Creates an empty dataset with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column, inferring its type.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the existing columns.
    /// Use [`DataSet::try_with_column`] for a fallible variant.
    pub fn with_column<V: Into<DataValue>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.try_with(name.into(), Column::new(values))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Adds a column with an explicit logical type.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the existing columns.
    pub fn with_typed_column<V: Into<DataValue>>(
        self,
        name: impl Into<String>,
        data_type: impl Into<TypeName>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        let values = values.into_iter().map(Into::into).collect();
        self.try_with(name.into(), Column::typed(data_type.into(), values))
            .unwrap_or_else(|e| panic!("{e}"))
    }

    /// Adds a column, inferring its type, failing on a length mismatch.
    pub fn try_with_column<V: Into<DataValue>>(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self, SourceError> {
        let values = values.into_iter().map(Into::into).collect();
        self.try_with(name.into(), Column::new(values))
    }

    fn try_with(mut self, name: String, column: Column) -> Result<Self, SourceError> {
        if self.columns.is_empty() {
            self.rows = column.len();
        } else if column.len() != self.rows {
            return Err(SourceError::LengthMismatch {
                column: name,
                expected: self.rows,
                actual: column.len(),
            });
        }
        self.columns.insert(name, column);
        Ok(self)
    }

    /// Returns a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }
}

impl DataSource for DataSet {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_type(&self, column: &str) -> Option<String> {
        self.columns
            .get(column)
            .map(|c| c.data_type.canonical_name().to_string())
    }

    fn column_values(&self, column: &str) -> Option<Cow<'_, [DataValue]>> {
        self.columns
            .get(column)
            .map(|c| Cow::Borrowed(c.values.as_slice()))
    }
}

impl<N: Into<String>> FromIterator<(N, Vec<DataValue>)> for DataSet {
    /// Collects named columns.
    ///
    /// # Panics
    ///
    /// Panics if the columns differ in length.
    fn from_iter<T: IntoIterator<Item = (N, Vec<DataValue>)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(DataSet::new(), |dataset, (name, values)| {
                dataset.with_column(name, values)
            })
    }
}
