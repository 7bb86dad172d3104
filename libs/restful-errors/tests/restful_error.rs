#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::error::Error as _;
use std::sync::Arc;

use http::StatusCode;
use restful_errors::error::{
    DEFAULT_MESSAGE, UNKNOWN_CODE, UNKNOWN_DESCRIPTION, UNKNOWN_HTTP_STATUS_CODE,
    UNKNOWN_STATUS_TEXT,
};
use restful_errors::{ErrorDescriptor, ErrorType, RestfulError, SourceError, lookup};

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct DiskError;

#[test]
fn descriptor_and_message_are_merged() {
    let err = RestfulError::new(lookup("TOO_MANY_REQUESTS"), "slow down");

    assert_eq!(err.http_status_code(), 429);
    assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(err.message(), "slow down");
    assert_eq!(err.status_text(), "Too Many Requests");
    assert_eq!(err.code(), "TOO_MANY_REQUESTS");
    assert_eq!(
        err.description(),
        lookup("TOO_MANY_REQUESTS").unwrap().description
    );
    assert_eq!(err.error_type(), Some(ErrorType::TooManyRequests));
    assert!(err.is_client_error());
}

#[test]
fn missing_descriptor_and_empty_message_use_defaults() {
    let err = RestfulError::create(None::<ErrorDescriptor>, Some(""), None);

    assert_eq!(err.code(), UNKNOWN_CODE);
    assert_eq!(err.code(), "UNKNOWN_INTERNAL_ERROR");
    assert_eq!(err.http_status_code(), UNKNOWN_HTTP_STATUS_CODE);
    assert_eq!(err.http_status_code(), 500);
    assert_eq!(err.status_text(), UNKNOWN_STATUS_TEXT);
    assert_eq!(err.description(), UNKNOWN_DESCRIPTION);
    assert_eq!(err.message(), DEFAULT_MESSAGE);
    assert!(err.is_unknown());
    assert!(err.error_type().is_none());
}

#[test]
fn failed_lookup_degrades_to_unknown() {
    let err = RestfulError::create(lookup("NO_SUCH_ERROR"), None, None);
    assert!(err.is_unknown());
    assert_eq!(err.message(), DEFAULT_MESSAGE);
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn message_is_never_taken_from_descriptor() {
    let err = RestfulError::create(ErrorType::NotFound, None, None);
    assert_eq!(err.message(), DEFAULT_MESSAGE);
    assert_ne!(err.message(), err.description());
}

#[test]
fn source_error_is_kept_by_reference() {
    let cause: SourceError = Arc::new(DiskError);
    let err = RestfulError::create(
        lookup("GONE"),
        Some("resource removed"),
        Some(Arc::clone(&cause)),
    );

    assert_eq!(err.http_status_code(), 410);
    assert_eq!(err.message(), "resource removed");
    assert!(Arc::ptr_eq(err.source_error().unwrap(), &cause));
    assert_eq!(err.source().unwrap().to_string(), "disk on fire");
    assert_eq!(cause.to_string(), "disk on fire");
}

#[test]
fn with_source_chains_errors() {
    let io: SourceError = Arc::new(std::io::Error::other("connection reset"));
    let err = RestfulError::new(ErrorType::BadGateway, "upstream failed").with_source(io);

    let source = err.source().unwrap();
    assert_eq!(source.to_string(), "connection reset");
    assert!(source.downcast_ref::<std::io::Error>().is_some());
}

#[test]
fn clones_share_the_source() {
    let cause: SourceError = Arc::new(DiskError);
    let err = RestfulError::new(ErrorType::InsufficientStorage, "full").with_source(Arc::clone(&cause));
    let copy = err.clone();

    assert!(Arc::ptr_eq(copy.source_error().unwrap(), &cause));
    assert_eq!(Arc::strong_count(&cause), 3);
}

#[test]
fn no_source_by_default() {
    let err = RestfulError::new(ErrorType::Forbidden, "nope");
    assert!(err.source_error().is_none());
    assert!(err.source().is_none());
}

#[test]
fn works_as_boxed_error() {
    fn fail() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Err(RestfulError::new(ErrorType::ServiceUnavailable, "maintenance").into())
    }

    let err = fail().unwrap_err();
    let restful = err.downcast_ref::<RestfulError>().unwrap();
    assert_eq!(restful.http_status_code(), 503);
    assert_eq!(err.to_string(), "SERVICE_UNAVAILABLE (503): maintenance");
}

#[test]
fn vendor_codes_keep_their_status() {
    let err = RestfulError::new(ErrorType::NetworkConnectTimeoutError, "proxy gave up");
    assert_eq!(err.http_status_code(), 599);
    assert_eq!(err.status().as_u16(), 599);
    assert!(err.is_server_error());
}
