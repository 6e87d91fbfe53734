use anyhow::{Context, Result};
use seal_core::ValidationOptions;
use seal_parser::load_schema;
use seal_validator::{DataSource, load_data};
use tracing::info;

use crate::output::{self, OutputFormat, ReportSource};

pub async fn execute(
    schema_path: &str,
    data_path: &str,
    options: &ValidationOptions,
    format: OutputFormat,
) -> Result<()> {
    info!("Validating {} against {}", data_path, schema_path);
    info!("Raise on error: {}", options.raise_on_error);
    info!("Parallel: {}", options.parallel);

    let validator = load_schema(schema_path)
        .with_context(|| format!("Failed to load schema file: {}", schema_path))?;

    let source = load_data(data_path)
        .await
        .with_context(|| format!("Failed to load data file: {}", data_path))?;

    if format == OutputFormat::Text {
        output::print_info(&format!(
            "Schema loaded: {} field(s), {} constraint(s)",
            validator.fields().len(),
            validator.constraints().len()
        ));
        output::print_info(&format!(
            "Data loaded: {} row(s), {} column(s)",
            source.row_count(),
            source.schema().fields().len()
        ));
    }

    let files = ReportSource {
        schema: schema_path,
        data: data_path,
    };

    let passed = match validator.validate_with(&source, options) {
        Ok(result) => {
            output::print_validation_result(&result, &files, format)?;
            result.passed()
        }
        Err(error) => {
            output::print_validation_error(&error, &files, format)?;
            false
        }
    };

    if !passed {
        std::process::exit(1);
    }

    Ok(())
}
