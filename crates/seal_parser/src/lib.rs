//! Parser and compiler for Seal schema documents (JSON/YAML/TOML formats).
//!
//! This crate loads a declarative schema document and compiles it into an
//! executable [`Validator`]: an ordered list of constraints plus the declared
//! field types.
//!
//! # Example
//!
//! ```rust
//! use seal_parser::compile_yaml;
//!
//! let yaml = r#"
//! fields:
//!   user_id:
//!     type: Int64
//!     constraints:
//!       - type: uniqueness
//!         min_unique_ratio: 1.0
//!   email:
//!     type: String
//!     constraints:
//!       - type: regex_pattern
//!         pattern: "@"
//! "#;
//!
//! let validator = compile_yaml(yaml).expect("Failed to compile schema");
//! assert_eq!(validator.fields().len(), 2);
//! assert_eq!(validator.constraints().len(), 2);
//! ```

mod compiler;

pub use compiler::{build_constraint, compile_schema};

use seal_core::ConstraintConfigError;
use seal_validator::Validator;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while loading or compiling a schema document.
#[derive(Debug, Error)]
pub enum SchemaCompileError {
    /// JSON decoding failed
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decoding failed
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML decoding failed
    #[error("Failed to parse TOML: {0}")]
    Toml(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Schema file does not exist
    #[error("Schema file not found: {0}")]
    FileNotFound(String),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The document root is not a mapping
    #[error("Schema document must be a mapping")]
    DocumentNotMapping,

    /// Neither top-level form is present
    #[error("Schema must contain either 'fields' or 'constraints'")]
    MissingSchemaForm,

    /// Both top-level forms are present
    #[error("Schema must contain either 'fields' or 'constraints', not both")]
    AmbiguousSchemaForm,

    /// `fields` is not a mapping
    #[error("'fields' must be a mapping")]
    FieldsNotMapping,

    /// A field specification is not a mapping
    #[error("Field '{0}' specification must be a mapping")]
    FieldSpecNotMapping(String),

    /// A field has no declared type
    #[error("Field '{0}' must specify a 'type'")]
    MissingFieldType(String),

    /// A field's declared type is not a string
    #[error("Field '{0}' type must be a string")]
    InvalidFieldType(String),

    /// A field's constraints are not a list
    #[error("Field '{0}' constraints must be a list")]
    ConstraintsNotList(String),

    /// The top-level `constraints` value is not a list
    #[error("'constraints' must be a list")]
    LegacyConstraintsNotList,

    /// A constraint definition is not a mapping
    #[error("Constraint definition must be a mapping")]
    ConstraintNotMapping,

    /// A constraint definition has no `type`
    #[error("Constraint definition must contain a 'type' key")]
    MissingConstraintType,

    /// A constraint definition has no `column`
    #[error("Constraint definition must contain a 'column' key")]
    MissingColumn,

    /// A constraint's `type` is present but not a string
    #[error("Constraint 'type' must be a string")]
    InvalidConstraintType,

    /// A constraint's `column` is present but not a string
    #[error("Constraint 'column' must be a string")]
    InvalidColumn,

    /// A required parameter is absent
    #[error("{kind} constraint requires '{key}' key")]
    MissingKey { kind: String, key: String },

    /// A parameter has the wrong type
    #[error("{kind} constraint parameter '{key}' must be {expected}")]
    InvalidParameter {
        kind: String,
        key: String,
        expected: String,
    },

    /// The discriminator names no known constraint kind
    #[error("Unknown constraint type: {0}")]
    UnknownConstraintType(String),

    /// The constraint rejected its configuration
    #[error(transparent)]
    Constraint(#[from] ConstraintConfigError),
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, SchemaCompileError>;

/// Supported schema file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Compiles a schema from a JSON string.
pub fn compile_json(content: &str) -> Result<Validator> {
    let document: Value = serde_json::from_str(content)?;
    compile_schema(&document)
}

/// Compiles a schema from a YAML string.
pub fn compile_yaml(content: &str) -> Result<Validator> {
    let document: Value = serde_yaml_ng::from_str(content)?;
    compile_schema(&document)
}

/// Compiles a schema from a TOML string.
///
/// # Example
///
/// ```rust
/// use seal_parser::compile_toml;
///
/// let toml = r#"
/// [[constraints]]
/// type = "row_count"
/// column = ""
/// min_rows = 1
/// "#;
///
/// let validator = compile_toml(toml).unwrap();
/// assert!(validator.fields().is_empty());
/// ```
pub fn compile_toml(content: &str) -> Result<Validator> {
    let document: Value =
        toml::from_str(content).map_err(|e| SchemaCompileError::Toml(e.to_string()))?;
    compile_schema(&document)
}

/// Detects the schema format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.json` → `SchemaFormat::Json`
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
///
/// # Errors
///
/// Returns `SchemaCompileError::InvalidExtension` if the file has no extension.
/// Returns `SchemaCompileError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(SchemaCompileError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "json" => Ok(SchemaFormat::Json),
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        other => Err(SchemaCompileError::UnsupportedFormat(other.to_string())),
    }
}

/// Loads and compiles a schema file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use seal_parser::load_schema;
///
/// let validator = load_schema("schemas/users.json").unwrap();
/// println!("{} constraints", validator.constraints().len());
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> Result<Validator> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SchemaCompileError::FileNotFound(path.display().to_string()));
    }

    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    info!("Loading {:?} schema from {}", format, path.display());

    match format {
        SchemaFormat::Json => compile_json(&content),
        SchemaFormat::Yaml => compile_yaml(&content),
        SchemaFormat::Toml => compile_toml(&content),
    }
}
