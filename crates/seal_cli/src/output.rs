use anyhow::Result;
use chrono::Local;
use clap::ValueEnum;
use colored::*;
use seal_core::{CheckOutcome, ValidationError, ValidationResult};
use serde_json::{Value, json};

/// Report rendering selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The files a report was produced from.
pub struct ReportSource<'a> {
    pub schema: &'a str,
    pub data: &'a str,
}

pub fn print_validation_result(
    result: &ValidationResult,
    files: &ReportSource<'_>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let mut report = json!({
                "schema": files.schema,
                "data": files.data,
                "generated_at": Local::now().to_rfc3339(),
            });
            if let (Value::Object(report), Value::Object(payload)) =
                (&mut report, serde_json::to_value(result.to_payload())?)
            {
                report.extend(payload);
            }
            print_json(&report)
        }
        OutputFormat::Text => {
            print_header(files);
            print_status(result.passed());

            println!("\n{}", "Results:".bold());
            for outcome in result.results() {
                print_outcome(outcome);
            }

            println!("\n{}", "Summary:".bold());
            println!("  Total constraints: {}", result.len());
            println!("  Passed:            {}", result.passed_count());
            println!("  Failed:            {}", result.failed_count());
            println!("{}", "═".repeat(60));
            Ok(())
        }
    }
}

pub fn print_validation_error(
    error: &ValidationError,
    files: &ReportSource<'_>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let report = json!({
                "schema": files.schema,
                "data": files.data,
                "generated_at": Local::now().to_rfc3339(),
                "passed": false,
                "phase": error.phase().to_string(),
                "message": headline(error),
                "failures": error.failures(),
            });
            print_json(&report)
        }
        OutputFormat::Text => {
            print_header(files);
            print_status(false);

            println!("\n{}", headline(error).red());
            println!("  Phase: {}", error.phase());

            println!("\n{}", "Failures:".red().bold());
            for outcome in error.failures() {
                print_outcome(outcome);
            }
            println!("{}", "═".repeat(60));
            Ok(())
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

fn headline(error: &ValidationError) -> &str {
    error.message().lines().next().unwrap_or_default()
}

fn print_header(files: &ReportSource<'_>) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));
    println!("  Schema:    {}", files.schema);
    println!("  Data:      {}", files.data);
    println!(
        "  Generated: {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

fn print_status(passed: bool) {
    if passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }
}

fn print_outcome(outcome: &CheckOutcome) {
    if outcome.passed {
        println!(
            "  {} {}: {}",
            "✓".green(),
            outcome.constraint_label,
            outcome.message
        );
    } else {
        println!(
            "  {} {}: {}",
            "✗".red(),
            outcome.constraint_label.bold(),
            outcome.message.red()
        );
    }
}
