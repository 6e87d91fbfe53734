//! # Seal Validator
//!
//! Constraint evaluation engine for Seal schemas.
//!
//! A [`Validator`] holds declared fields and an ordered list of
//! [`Constraint`]s and runs them against any [`DataSource`] in two phases:
//!
//! 1. **Type check**: every declared field must exist with a compatible type
//! 2. **Constraints**: every constraint is evaluated in declaration order
//!
//! Data sources provided here:
//!
//! - [`DataSet`]: small in-memory columnar table, handy for tests and embedding
//! - [`RecordBatchSource`]: Arrow record batches
//! - [`load_data`]: CSV / Parquet / NDJSON files read through DataFusion
//!
//! ## Example
//!
//! ```rust
//! use seal_core::ValidationOptions;
//! use seal_validator::{
//!     DataSet, RegexPatternConstraint, UniquenessConstraint, Validator,
//! };
//!
//! let validator = Validator::new(vec![
//!     UniquenessConstraint::new("id", Some(1.0), None)?.into(),
//!     RegexPatternConstraint::new("email", "@")?.into(),
//! ]);
//!
//! let dataset = DataSet::new()
//!     .with_column("id", vec![1, 2, 3])
//!     .with_column("email", vec![Some("a@x.com"), None, Some("b@y.org")]);
//!
//! let result = validator
//!     .validate_with(&dataset, &ValidationOptions::collect_all())
//!     .unwrap();
//! assert!(result.passed());
//! # Ok::<(), seal_core::ConstraintConfigError>(())
//! ```

pub mod arrow_source;
pub mod constraints;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod loader;
pub mod schema;
pub mod source;
pub mod stats;

pub use arrow_source::RecordBatchSource;
pub use constraints::*;
pub use dataset::{Column, DataSet, DataValue};
pub use engine::Validator;
pub use error::SourceError;
pub use loader::{DataFormat, detect_data_format, load_data};
pub use schema::TypeChecker;
pub use source::DataSource;
