//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every request-shape failure surfaces as `422 Unprocessable Entity` with
//! `detail` holding an array of `{"field","message","code"}` violations.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Error, UserValidationError};

/// Top-level message attached to validation failures.
pub(crate) const VALIDATION_FAILED: &str = "request validation failed";

/// Validation error codes for HTTP request failures that precede domain
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidJson,
    UnsupportedContentType,
    PayloadTooLarge,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::UnsupportedContentType => "unsupported_content_type",
            ErrorCode::PayloadTooLarge => "payload_too_large",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Pseudo-field naming the request body as a whole.
const BODY: FieldName = FieldName::new("body");

/// One entry of the `detail` array in a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct FieldViolation {
    field: String,
    message: String,
    code: &'static str,
}

impl FieldViolation {
    fn new(field: FieldName, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field: field.as_str().to_owned(),
            message: message.into(),
            code: code.as_str(),
        }
    }
}

impl From<UserValidationError> for FieldViolation {
    fn from(err: UserValidationError) -> Self {
        Self {
            field: err.field().to_owned(),
            message: err.to_string(),
            code: err.code(),
        }
    }
}

pub(crate) fn missing_field(field: FieldName) -> FieldViolation {
    let name = field.as_str();
    FieldViolation::new(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

/// Collapse violations into a single 422 domain error.
pub(crate) fn unprocessable(violations: Vec<FieldViolation>) -> Error {
    let details = serde_json::to_value(&violations).unwrap_or_default();
    Error::unprocessable(VALIDATION_FAILED).with_details(details)
}

fn violation_for_payload(err: &JsonPayloadError) -> FieldViolation {
    match err {
        JsonPayloadError::ContentType => FieldViolation::new(
            BODY,
            "request body must be sent as application/json",
            ErrorCode::UnsupportedContentType,
        ),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            FieldViolation::new(BODY, "request body is too large", ErrorCode::PayloadTooLarge)
        }
        other => FieldViolation::new(BODY, other.to_string(), ErrorCode::InvalidJson),
    }
}

/// `JsonConfig` error handler turning body extraction failures into 422.
///
/// # Examples
/// ```
/// use actix_web::web;
/// use backend::inbound::http::validation::json_error_handler;
///
/// let config = web::JsonConfig::default().error_handler(json_error_handler);
/// # let _ = config;
/// ```
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejecting malformed JSON body");
    unprocessable(vec![violation_for_payload(&err)]).into()
}
