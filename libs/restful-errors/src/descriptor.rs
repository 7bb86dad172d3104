//! Catalog descriptor record

use http::StatusCode;
use serde::Serialize;

/// Static description of one class of HTTP error.
///
/// Serializes with the field names `code`, `statusText`, `HTTPStatusCode`
/// and `description`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorDescriptor {
    /// Symbolic key, e.g. `NOT_FOUND`.
    pub code: &'static str,
    /// Short human-readable label, e.g. `Not Found`.
    #[serde(rename = "statusText")]
    pub status_text: &'static str,
    #[serde(rename = "HTTPStatusCode")]
    pub http_status_code: u16,
    /// Long-form explanation. Informational only.
    pub description: &'static str,
}

impl ErrorDescriptor {
    /// Typed status code, `500` when the stored value is not a valid status.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.http_status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const TEAPOT: ErrorDescriptor = ErrorDescriptor {
        code: "I_AM_A_TEAPOT",
        status_text: "I'm a teapot (RFC 2324)",
        http_status_code: 418,
        description: "Short and stout.",
    };

    #[test]
    fn status_code_is_typed() {
        assert_eq!(TEAPOT.status_code(), StatusCode::IM_A_TEAPOT);
        assert!(TEAPOT.is_client_error());
        assert!(!TEAPOT.is_server_error());
    }

    #[test]
    fn unrepresentable_status_falls_back_to_500() {
        let broken = ErrorDescriptor {
            http_status_code: 42,
            ..TEAPOT
        };
        assert_eq!(broken.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(broken.is_server_error());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(TEAPOT).unwrap();
        assert_eq!(json["code"], "I_AM_A_TEAPOT");
        assert_eq!(json["statusText"], "I'm a teapot (RFC 2324)");
        assert_eq!(json["HTTPStatusCode"], 418);
        assert_eq!(json["description"], "Short and stout.");
    }
}
