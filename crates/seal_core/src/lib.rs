//! # Seal Core
//!
//! Core data structures shared by the Seal tabular validation engine.
//!
//! Seal validates tabular datasets against a declarative schema: every column
//! carries a declared type and a list of statistical or structural
//! constraints. This crate holds the vocabulary every other crate speaks.
//!
//! ## Key Concepts
//!
//! - **TypeName**: canonical logical column type with an alias table
//! - **CheckOutcome**: the pass/fail result of evaluating one check once
//! - **ValidationResult**: the ordered outcomes of one validation run
//! - **ValidationError**: raised in fail-fast mode, carries failing outcomes
//! - **ValidationOptions**: fail-fast vs. collect-all, sequential vs. parallel
//!
//! ## Example
//!
//! ```rust
//! use seal_core::{CheckOutcome, ValidationError, ValidationResult};
//!
//! let outcomes = vec![
//!     CheckOutcome::pass("Nullability check passed").labeled("NullabilityConstraint(id)"),
//!     CheckOutcome::fail("Maximum value 150 exceeds limit 120")
//!         .labeled("MaximumValueConstraint(age)"),
//! ];
//!
//! let result = ValidationResult::new(outcomes.clone());
//! assert!(!result.passed());
//!
//! let error = ValidationError::constraint_failures(&outcomes);
//! assert_eq!(error.failures().len(), 1);
//! ```

pub mod error;
pub mod options;
pub mod outcome;
pub mod report;
pub mod types;

pub use error::*;
pub use options::*;
pub use outcome::*;
pub use report::*;
pub use types::*;
