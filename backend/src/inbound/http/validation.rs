//! Shared validation helpers for inbound HTTP adapters.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use crate::domain::{Error, ImageUpload, LoginValidationError};

use super::dto::ImagePayload;

/// JSON field carrying profile images.
pub(crate) const PROFILE_IMAGE_FIELD: &str = "profileImage";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidEncoding,
    EmptyUsername,
    EmptyPassword,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidEncoding => "invalid_encoding",
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::EmptyPassword => "empty_password",
        }
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// The student image form was submitted without a file.
pub(crate) fn missing_image_error() -> Error {
    field_error(
        PROFILE_IMAGE_FIELD,
        ErrorCode::MissingField,
        "Please select an image to upload.",
    )
}

/// Decode a base64 image payload into an upload for the image store.
pub(crate) fn decode_image(payload: ImagePayload) -> Result<ImageUpload, Error> {
    let ImagePayload {
        file_name,
        content_type,
        data,
    } = payload;
    let bytes = STANDARD.decode(data.trim()).map_err(|_| {
        field_error(
            PROFILE_IMAGE_FIELD,
            ErrorCode::InvalidEncoding,
            "profile image data must be base64 encoded",
        )
    })?;
    Ok(ImageUpload::new(file_name, content_type, bytes))
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => field_error(
            "username",
            ErrorCode::EmptyUsername,
            "username must not be empty",
        ),
        LoginValidationError::EmptyPassword => field_error(
            "password",
            ErrorCode::EmptyPassword,
            "password must not be empty",
        ),
    }
}
