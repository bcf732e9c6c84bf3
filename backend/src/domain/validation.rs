//! Field-level validation failures collected before a domain write.

use serde::Serialize;
use serde_json::{Value, json};

use super::Error;

/// One rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldError {
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Field name in the wire (camelCase) form.
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert into an `invalid_request` error with flat `field`/`code`
    /// details.
    pub fn into_error(self) -> Error {
        let details = json!({ "field": self.field, "code": self.code });
        Error::invalid_request(self.message).with_details(details)
    }
}

/// Accumulator for every field error found in one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether an error was recorded against `field`.
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    /// `{"fields": [{field, code, message}, ...]}`.
    pub fn to_details(&self) -> Value {
        json!({ "fields": self.0 })
    }

    /// Build an `invalid_request` error whose details list every field.
    pub fn into_error(self, message: &str) -> Error {
        Error::invalid_request(message).with_details(self.to_details())
    }
}

impl From<FieldError> for FieldErrors {
    fn from(value: FieldError) -> Self {
        Self(vec![value])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;

    #[test]
    fn details_list_every_field() {
        let mut errors = FieldErrors::new();
        errors.push(FieldError::new("title", "required", "Title is required."));
        errors.push(FieldError::new("price", "invalid_price", "Price is invalid."));

        let error = errors.into_error("course form is invalid");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            error.details(),
            Some(&json!({
                "fields": [
                    { "field": "title", "code": "required", "message": "Title is required." },
                    { "field": "price", "code": "invalid_price", "message": "Price is invalid." },
                ]
            }))
        );
    }

    #[test]
    fn single_field_error_uses_flat_details() {
        let error = FieldError::new("rating", "out_of_range", "Rating must be between 1 and 5.")
            .into_error();
        assert_eq!(error.message(), "Rating must be between 1 and 5.");
        assert_eq!(
            error.details(),
            Some(&json!({ "field": "rating", "code": "out_of_range" }))
        );
    }
}
