//! Arrow record batches as a data source.

use crate::{DataSource, DataValue, SourceError};
use arrow_array::array::*;
use arrow_array::RecordBatch;
use arrow_schema::{DataType, SchemaRef};
use datafusion::arrow::compute::cast;
use datafusion::arrow::util::display::array_value_to_string;
use indexmap::IndexMap;
use std::borrow::Cow;
use tracing::debug;

/// A data source backed by Arrow record batches.
///
/// Columns are converted to [`DataValue`]s once at construction, so every
/// constraint reads the same materialized values.
///
/// # Example
///
/// ```rust
/// use arrow_array::{Int64Array, RecordBatch};
/// use arrow_schema::{DataType, Field, Schema};
/// use seal_validator::{DataSource, RecordBatchSource};
/// use std::sync::Arc;
///
/// let schema = Arc::new(Schema::new(vec![Field::new("id", DataType::Int64, false)]));
/// let batch = RecordBatch::try_new(schema, vec![Arc::new(Int64Array::from(vec![1, 2, 3]))])?;
///
/// let source = RecordBatchSource::new(batch)?;
/// assert_eq!(source.row_count(), 3);
/// assert_eq!(source.column_type("id").as_deref(), Some("Int64"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordBatchSource {
    schema: SchemaRef,
    columns: IndexMap<String, Vec<DataValue>>,
    rows: usize,
}

impl RecordBatchSource {
    /// Creates a source from a single record batch.
    pub fn new(batch: RecordBatch) -> Result<Self, SourceError> {
        Self::try_from_batches(batch.schema(), vec![batch])
    }

    /// Creates a source from batches that all share `schema`.
    pub fn try_from_batches(
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<Self, SourceError> {
        let mut columns: IndexMap<String, Vec<DataValue>> = schema
            .fields()
            .iter()
            .map(|field| (field.name().clone(), Vec::new()))
            .collect();
        let mut rows = 0;

        for (index, batch) in batches.iter().enumerate() {
            if batch.schema().fields() != schema.fields() {
                return Err(SourceError::SchemaMismatch { index });
            }

            for (array, values) in batch.columns().iter().zip(columns.values_mut()) {
                values.extend(array_to_values(array)?);
            }
            rows += batch.num_rows();
        }

        debug!(
            "Materialized {} columns, {} rows from {} batches",
            columns.len(),
            rows,
            batches.len()
        );

        Ok(Self {
            schema,
            columns,
            rows,
        })
    }

    /// Arrow schema of the source.
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }
}

impl DataSource for RecordBatchSource {
    fn row_count(&self) -> usize {
        self.rows
    }

    fn column_type(&self, column: &str) -> Option<String> {
        self.schema
            .field_with_name(column)
            .ok()
            .map(|field| arrow_type_name(field.data_type()))
    }

    fn column_values(&self, column: &str) -> Option<Cow<'_, [DataValue]>> {
        self.columns
            .get(column)
            .map(|values| Cow::Borrowed(values.as_slice()))
    }
}

/// Arrow's spelling of a type, with the timestamp unit dropped.
pub fn arrow_type_name(data_type: &DataType) -> String {
    match data_type {
        DataType::Timestamp(_, _) => "Timestamp".to_string(),
        other => other.to_string(),
    }
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, name: &str) -> Result<&'a T, SourceError> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| SourceError::conversion(format!("Failed to downcast to {name}")))
}

fn collect<I, T>(iter: I, convert: impl Fn(T) -> DataValue) -> Vec<DataValue>
where
    I: IntoIterator<Item = Option<T>>,
{
    iter.into_iter()
        .map(|value| value.map_or(DataValue::Null, &convert))
        .collect()
}

/// Converts an Arrow array into cell values.
///
/// Numeric, boolean and string arrays map onto their natural variants.
/// Decimals become floats with their scale applied. Any other type is rendered
/// with Arrow's display formatter.
pub fn array_to_values(array: &ArrayRef) -> Result<Vec<DataValue>, SourceError> {
    let values = match array.data_type() {
        DataType::Null => vec![DataValue::Null; array.len()],
        DataType::Boolean => {
            collect(downcast::<BooleanArray>(array, "BooleanArray")?, DataValue::Bool)
        }
        DataType::Int8 => collect(downcast::<Int8Array>(array, "Int8Array")?, |v| {
            DataValue::Int(i64::from(v))
        }),
        DataType::Int16 => collect(downcast::<Int16Array>(array, "Int16Array")?, |v| {
            DataValue::Int(i64::from(v))
        }),
        DataType::Int32 => collect(downcast::<Int32Array>(array, "Int32Array")?, |v| {
            DataValue::Int(i64::from(v))
        }),
        DataType::Int64 => collect(downcast::<Int64Array>(array, "Int64Array")?, DataValue::Int),
        DataType::UInt8 => collect(downcast::<UInt8Array>(array, "UInt8Array")?, |v| {
            DataValue::Int(i64::from(v))
        }),
        DataType::UInt16 => collect(downcast::<UInt16Array>(array, "UInt16Array")?, |v| {
            DataValue::Int(i64::from(v))
        }),
        DataType::UInt32 => collect(downcast::<UInt32Array>(array, "UInt32Array")?, |v| {
            DataValue::Int(i64::from(v))
        }),
        DataType::UInt64 => collect(downcast::<UInt64Array>(array, "UInt64Array")?, |v| {
            i64::try_from(v).map_or(DataValue::Float(v as f64), DataValue::Int)
        }),
        DataType::Float32 => collect(downcast::<Float32Array>(array, "Float32Array")?, |v| {
            DataValue::Float(f64::from(v))
        }),
        DataType::Float64 => {
            collect(downcast::<Float64Array>(array, "Float64Array")?, DataValue::Float)
        }
        DataType::Utf8 => collect(downcast::<StringArray>(array, "StringArray")?, |v| {
            DataValue::String(v.to_string())
        }),
        DataType::LargeUtf8 => {
            collect(downcast::<LargeStringArray>(array, "LargeStringArray")?, |v| {
                DataValue::String(v.to_string())
            })
        }
        DataType::Utf8View => {
            collect(downcast::<StringViewArray>(array, "StringViewArray")?, |v| {
                DataValue::String(v.to_string())
            })
        }
        DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => {
            let floats = cast(array.as_ref(), &DataType::Float64)?;
            collect(downcast::<Float64Array>(&floats, "Float64Array")?, DataValue::Float)
        }
        _ => (0..array.len())
            .map(|row| {
                if array.is_null(row) {
                    Ok(DataValue::Null)
                } else {
                    Ok(DataValue::String(array_value_to_string(array.as_ref(), row)?))
                }
            })
            .collect::<Result<Vec<_>, SourceError>>()?,
    };

    Ok(values)
}
