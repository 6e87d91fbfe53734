mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seal_core::ValidationOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "seal")]
#[command(version, about = "Seal tabular validation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a data file against a schema
    Validate {
        /// Path to the schema file (JSON, YAML or TOML)
        schema: String,

        /// Path to the data file (CSV, Parquet or NDJSON)
        data: String,

        /// Collect every outcome instead of failing fast
        #[arg(long)]
        no_raise: bool,

        /// Evaluate constraints on multiple threads
        #[arg(short, long)]
        parallel: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Compile a schema and list its fields and constraints
    Check {
        /// Path to the schema file (JSON, YAML or TOML)
        schema: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Validate {
            schema,
            data,
            no_raise,
            parallel,
            format,
        } => {
            let options = ValidationOptions::new()
                .with_raise_on_error(!no_raise)
                .with_parallel(parallel);
            commands::validate::execute(&schema, &data, &options, format).await
        }

        Commands::Check { schema, format } => commands::check::execute(&schema, format),
    }
}
