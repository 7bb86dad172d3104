//! HTTP error catalog and the `RestfulError` type
//!
//! This crate provides pure data types for reporting HTTP errors, with no
//! dependencies on HTTP frameworks. It includes:
//! - The static error catalog (`ErrorType`, `ErrorDescriptor`, [`lookup`])
//! - The occurrence-level error value (`RestfulError`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Lets the catalog macro refer to `::restful_errors` from inside this crate
extern crate self as restful_errors;

pub mod catalog;
pub mod descriptor;
pub mod error;

// Re-export commonly used types
pub use catalog::{ErrorType, UnknownErrorType, lookup};
pub use descriptor::ErrorDescriptor;
pub use error::{ErrorFields, RestfulError, SourceError};
