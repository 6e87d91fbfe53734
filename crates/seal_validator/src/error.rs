//! Error types for data source operations.

use thiserror::Error;

/// Errors that can occur while building or loading a data source.
///
/// Evaluating constraints never fails: missing columns and empty data are
/// reported as ordinary outcomes. These errors only arise before a run.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A column's length differs from the other columns
    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Record batches do not share one schema
    #[error("Record batch {index} does not match the source schema")]
    SchemaMismatch { index: usize },

    /// An Arrow array could not be read
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    /// DataFusion failed to read or collect the data
    #[error("DataFusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),

    /// Data file does not exist
    #[error("Data file not found: {0}")]
    FileNotFound(String),

    /// Unsupported data file format
    #[error("Unsupported data file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid or missing file extension
    #[error("Invalid or missing file extension: {0}")]
    InvalidExtension(String),
}

impl SourceError {
    /// Creates a new type conversion error.
    pub fn conversion(message: impl Into<String>) -> Self {
        Self::TypeConversion(message.into())
    }
}
