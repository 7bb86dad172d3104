//! `RestfulError`: one catalog entry bound to a single failure occurrence

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use http::StatusCode;

use crate::catalog::{self, DESCRIPTORS, ErrorType};
use crate::descriptor::ErrorDescriptor;

/// Shared handle to the error that caused a `RestfulError`.
///
/// The caller keeps its own clone; the `RestfulError` only observes it.
pub type SourceError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Code used when no descriptor code is available.
pub const UNKNOWN_CODE: &str = "UNKNOWN_INTERNAL_ERROR";
/// Status text used when no descriptor status text is available.
pub const UNKNOWN_STATUS_TEXT: &str = "Unknown internal error";
/// HTTP status used when no valid descriptor status is available.
pub const UNKNOWN_HTTP_STATUS_CODE: u16 = 500;
/// Description used when no descriptor description is available.
pub const UNKNOWN_DESCRIPTION: &str =
    "The server encountered an unknown internal error. Please retry the request.";
/// Message used when the caller supplies none.
pub const DEFAULT_MESSAGE: &str = "Sorry carried out request has generated an unknown error.";

/// Possibly incomplete descriptor input for building a `RestfulError`.
///
/// Every field is resolved on its own: a missing or empty string, or a
/// status outside 100..=999, is replaced by the matching unknown-error default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ErrorFields {
    pub code: Option<Cow<'static, str>>,
    pub status_text: Option<Cow<'static, str>>,
    pub http_status_code: Option<u16>,
    pub description: Option<Cow<'static, str>>,
}

impl ErrorFields {
    pub fn with_code(mut self, code: impl Into<Cow<'static, str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status_text(mut self, status_text: impl Into<Cow<'static, str>>) -> Self {
        self.status_text = Some(status_text.into());
        self
    }

    pub fn with_http_status_code(mut self, status: u16) -> Self {
        self.http_status_code = Some(status);
        self
    }

    pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl From<ErrorDescriptor> for ErrorFields {
    fn from(d: ErrorDescriptor) -> Self {
        Self {
            code: Some(Cow::Borrowed(d.code)),
            status_text: Some(Cow::Borrowed(d.status_text)),
            http_status_code: Some(d.http_status_code),
            description: Some(Cow::Borrowed(d.description)),
        }
    }
}

impl From<ErrorType> for ErrorFields {
    fn from(error_type: ErrorType) -> Self {
        error_type.descriptor().into()
    }
}

/// A missing descriptor (for example a failed [`catalog::lookup`]) means
/// every field falls back to its default.
impl<T: Into<ErrorFields>> From<Option<T>> for ErrorFields {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// An HTTP error occurrence: catalog fields, a message for this occurrence
/// and an optional cause.
///
/// Building one never fails. Whatever the descriptor lacks is filled in with
/// the `UNKNOWN_*` defaults, and a missing or empty message becomes
/// [`DEFAULT_MESSAGE`].
///
/// ```
/// use restful_errors::{RestfulError, lookup};
///
/// let err = RestfulError::new(lookup("TOO_MANY_REQUESTS"), "slow down");
/// assert_eq!(err.http_status_code(), 429);
/// assert_eq!(err.status_text(), "Too Many Requests");
/// assert_eq!(err.message(), "slow down");
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct RestfulError {
    code: Cow<'static, str>,
    status_text: Cow<'static, str>,
    http_status_code: u16,
    description: Cow<'static, str>,
    message: Cow<'static, str>,
    source_error: Option<SourceError>,
}

impl RestfulError {
    /// The whole catalog, reachable from the error type itself.
    pub const ERROR_TYPES: &'static [ErrorDescriptor] = DESCRIPTORS;

    /// Same as [`catalog::lookup`].
    #[must_use]
    pub fn lookup(key: &str) -> Option<ErrorDescriptor> {
        catalog::lookup(key)
    }

    /// Build an error from a descriptor, an optional message and an optional cause.
    pub fn create(
        fields: impl Into<ErrorFields>,
        message: Option<&str>,
        source_error: Option<SourceError>,
    ) -> Self {
        Self::build(
            fields.into(),
            message.map(|m| Cow::Owned(m.to_owned())),
            source_error,
        )
    }

    /// Build an error from a descriptor and a message, without a cause.
    pub fn new(fields: impl Into<ErrorFields>, message: impl Into<Cow<'static, str>>) -> Self {
        Self::build(fields.into(), Some(message.into()), None)
    }

    /// An error carrying every unknown-error default.
    pub fn unknown() -> Self {
        Self::build(ErrorFields::default(), None, None)
    }

    /// Attach the error that caused this one.
    pub fn with_source(mut self, source_error: SourceError) -> Self {
        self.source_error = Some(source_error);
        self
    }

    fn build(
        fields: ErrorFields,
        message: Option<Cow<'static, str>>,
        source_error: Option<SourceError>,
    ) -> Self {
        let code = fields.code.filter(|c| !c.is_empty());
        let status_text = fields.status_text.filter(|t| !t.is_empty());
        let http_status_code = fields
            .http_status_code
            .filter(|s| StatusCode::from_u16(*s).is_ok());
        let description = fields.description.filter(|d| !d.is_empty());

        if code.is_none()
            || status_text.is_none()
            || http_status_code.is_none()
            || description.is_none()
        {
            tracing::debug!(
                code = code.as_deref().unwrap_or(UNKNOWN_CODE),
                missing_code = code.is_none(),
                missing_status_text = status_text.is_none(),
                missing_http_status_code = http_status_code.is_none(),
                missing_description = description.is_none(),
                "incomplete error descriptor, using unknown-error defaults"
            );
        }

        Self {
            code: code.unwrap_or(Cow::Borrowed(UNKNOWN_CODE)),
            status_text: status_text.unwrap_or(Cow::Borrowed(UNKNOWN_STATUS_TEXT)),
            http_status_code: http_status_code.unwrap_or(UNKNOWN_HTTP_STATUS_CODE),
            description: description.unwrap_or(Cow::Borrowed(UNKNOWN_DESCRIPTION)),
            message: message
                .filter(|m| !m.is_empty())
                .unwrap_or(Cow::Borrowed(DEFAULT_MESSAGE)),
            source_error,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        self.http_status_code
    }

    /// Typed HTTP status for setting the transport-level response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn source_error(&self) -> Option<&SourceError> {
        self.source_error.as_ref()
    }

    /// Catalog key this error belongs to, `None` for codes outside the catalog.
    #[must_use]
    pub fn error_type(&self) -> Option<ErrorType> {
        ErrorType::from_key(&self.code)
    }

    /// True when no descriptor code was available.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.code == UNKNOWN_CODE
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl Default for RestfulError {
    fn default() -> Self {
        Self::unknown()
    }
}

impl From<ErrorType> for RestfulError {
    fn from(error_type: ErrorType) -> Self {
        Self::build(error_type.into(), None, None)
    }
}

impl fmt::Display for RestfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.code, self.http_status_code, self.message
        )
    }
}

impl std::error::Error for RestfulError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source_error
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
