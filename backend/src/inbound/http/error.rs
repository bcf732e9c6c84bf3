//! HTTP adapter mapping for domain errors.
//!
//! The domain [`Error`] stays transport agnostic; this module gives it an
//! Actix status code, a `trace-id` header and a redacted body for internal
//! failures. Extractor failures (malformed JSON, bad path or query values)
//! are converted into the same envelope so clients see one error schema.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if !matches!(error.code(), ErrorCode::InternalError) {
        return error.clone();
    }
    error!(message = error.message(), "internal error returned to client");
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Never surface framework internals to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(REDACTED_MESSAGE)
    }
}

/// Profile routes carry a base64 image; an oversized body there is an
/// oversized image.
fn carries_profile_image(req: &HttpRequest) -> bool {
    let path = req.path();
    path.ends_with("/profile") || path.ends_with("/profile/image")
}

/// `JsonConfig` error handler producing the standard envelope.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected JSON payload");
    let error = match &err {
        JsonPayloadError::ContentType => Error::invalid_request("expected a JSON request body")
            .with_details(json!({ "code": "unsupported_content_type" })),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. }
            if carries_profile_image(req) =>
        {
            Error::invalid_request("image exceeds the upload limit")
                .with_details(json!({ "field": "profileImage", "code": "invalid_image" }))
        }
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            Error::invalid_request("request body is too large")
                .with_details(json!({ "code": "payload_too_large" }))
        }
        JsonPayloadError::Deserialize(inner) => Error::invalid_request("malformed JSON body")
            .with_details(json!({ "code": "malformed_json", "reason": inner.to_string() })),
        _ => Error::invalid_request("unreadable request body")
            .with_details(json!({ "code": "malformed_json" })),
    };
    error.into()
}

/// `PathConfig` error handler; non-numeric ids become `400` rather than `404`.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected path parameters");
    Error::invalid_request("invalid path parameter")
        .with_details(json!({ "code": "invalid_path" }))
        .into()
}

/// `QueryConfig` error handler.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected query string");
    Error::invalid_request("invalid query string")
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}
