use anyhow::{Context, Result};
use seal_parser::load_schema;
use serde_json::json;
use tracing::info;

use crate::output::{self, OutputFormat};

pub fn execute(schema_path: &str, format: OutputFormat) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    let validator = load_schema(schema_path)
        .with_context(|| format!("Failed to load schema file: {}", schema_path))?;

    if format == OutputFormat::Json {
        let fields: Vec<_> = validator
            .fields()
            .iter()
            .map(|f| json!({ "name": f.name, "type": f.declared_type }))
            .collect();
        let constraints: Vec<_> = validator.constraints().iter().map(|c| c.label()).collect();

        let report = json!({
            "schema": schema_path,
            "valid": true,
            "fields": fields,
            "constraints": constraints,
        });
        return output::print_json(&report);
    }

    output::print_success("Schema is valid");

    println!("\nSchema Summary:");
    println!("  File:        {}", schema_path);
    if validator.fields().is_empty() {
        println!("  Form:        constraints only (no type checks)");
    } else {
        println!("  Fields:      {}", validator.fields().len());
    }
    println!("  Constraints: {}", validator.constraints().len());

    if !validator.fields().is_empty() {
        println!("\nFields:");
        for field in validator.fields() {
            println!("  {:<20} {}", field.name, field.declared_type);
        }
    }

    if !validator.constraints().is_empty() {
        println!("\nConstraints:");
        for (i, constraint) in validator.constraints().iter().enumerate() {
            println!("  {}. {}", i + 1, constraint.label());
        }
    }

    Ok(())
}
