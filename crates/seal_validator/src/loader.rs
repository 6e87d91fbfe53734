//! Loading data files into a [`RecordBatchSource`] through DataFusion.

use crate::{RecordBatchSource, SourceError};
use datafusion::prelude::{CsvReadOptions, NdJsonReadOptions, ParquetReadOptions, SessionContext};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// Comma-separated values with a header row (.csv)
    Csv,
    /// Apache Parquet (.parquet, .pq)
    Parquet,
    /// Newline-delimited JSON (.json, .jsonl, .ndjson)
    Json,
}

/// Detects the data format from a file path based on its extension.
///
/// # Errors
///
/// Returns `SourceError::InvalidExtension` if the file has no extension.
/// Returns `SourceError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_data_format(path: &Path) -> Result<DataFormat, SourceError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| SourceError::InvalidExtension(path.display().to_string()))?;

    match extension.to_lowercase().as_str() {
        "csv" => Ok(DataFormat::Csv),
        "parquet" | "pq" => Ok(DataFormat::Parquet),
        "json" | "jsonl" | "ndjson" => Ok(DataFormat::Json),
        other => Err(SourceError::UnsupportedFormat(other.to_string())),
    }
}

/// Reads a CSV, Parquet or newline-delimited JSON file into memory.
///
/// Column types are inferred by DataFusion. The whole file is collected, so
/// every constraint of a run sees the same rows.
///
/// # Example
///
/// ```no_run
/// use seal_validator::{DataSource, load_data};
///
/// # async fn run() -> Result<(), seal_validator::SourceError> {
/// let source = load_data("data/users.csv").await?;
/// println!("{} rows", source.row_count());
/// # Ok(())
/// # }
/// ```
pub async fn load_data(path: impl AsRef<Path>) -> Result<RecordBatchSource, SourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SourceError::FileNotFound(path.display().to_string()));
    }

    let format = detect_data_format(path)?;
    let location = path.to_string_lossy().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    info!("Loading {:?} data from {}", format, location);

    let ctx = SessionContext::new();
    let df = match format {
        DataFormat::Csv => {
            ctx.read_csv(location, CsvReadOptions::new().file_extension(&extension))
                .await?
        }
        DataFormat::Parquet => {
            ctx.read_parquet(
                location,
                ParquetReadOptions::default().file_extension(&extension),
            )
            .await?
        }
        DataFormat::Json => {
            ctx.read_json(
                location,
                NdJsonReadOptions::default().file_extension(&extension),
            )
            .await?
        }
    };

    let declared_schema = Arc::clone(df.schema().inner());
    let batches = df.collect().await?;
    let schema = batches
        .first()
        .map(|batch| batch.schema())
        .unwrap_or(declared_schema);

    debug!("Collected {} record batches", batches.len());

    RecordBatchSource::try_from_batches(schema, batches)
}
