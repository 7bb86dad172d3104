//! The HTTP error catalog
//!
//! The table is generated at compile time from `catalog/http_errors.json` by
//! `declare_catalog!`, which rejects duplicate codes or statuses, statuses
//! outside 400..=599 and blank text fields. Everything here is `const` data,
//! so reads need no synchronization.

use std::fmt;
use std::str::FromStr;

use http::StatusCode;
use restful_errors_macro::declare_catalog;
use thiserror::Error;

use crate::descriptor::ErrorDescriptor;

declare_catalog! {
    path = "catalog/http_errors.json",
    vis = "pub"
}

/// Returned when parsing a key that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error type '{key}'")]
pub struct UnknownErrorType {
    pub key: String,
}

impl ErrorType {
    /// Typed HTTP status code for this error
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        self.descriptor().status_code()
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorType {
    type Err = UnknownErrorType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownErrorType { key: s.to_owned() })
    }
}

impl From<ErrorType> for ErrorDescriptor {
    fn from(error_type: ErrorType) -> Self {
        error_type.descriptor()
    }
}

/// Look up the descriptor for a symbolic key such as `NOT_FOUND`.
#[must_use]
pub fn lookup(key: &str) -> Option<ErrorDescriptor> {
    let found = ErrorType::from_key(key).map(ErrorType::descriptor);
    if found.is_none() {
        tracing::trace!(key, "error type not found in catalog");
    }
    found
}

/// Look up the descriptor carrying the given HTTP status code.
#[must_use]
pub fn by_status(status: u16) -> Option<ErrorDescriptor> {
    ErrorType::from_status(status).map(ErrorType::descriptor)
}

/// Every descriptor in the catalog, ordered by status code.
#[must_use]
pub fn all() -> &'static [ErrorDescriptor] {
    DESCRIPTORS
}
