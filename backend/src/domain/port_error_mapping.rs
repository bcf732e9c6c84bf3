//! Translation of driven-port errors into domain errors.
//!
//! `Connection` failures surface as `service_unavailable`; query failures as
//! `internal_error`, which the HTTP adapter redacts.

use tracing::debug;

use super::Error;
use super::ports::{
    CategoryRepositoryError, CourseRepositoryError, FeedbackRepositoryError, ImageStoreError,
    UserPersistenceError,
};

pub(crate) fn map_course_error(error: CourseRepositoryError) -> Error {
    debug!(%error, "course repository failure");
    match error {
        CourseRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("course repository unavailable: {message}"))
        }
        CourseRepositoryError::Query { message } => {
            Error::internal(format!("course repository error: {message}"))
        }
    }
}

pub(crate) fn map_category_error(error: CategoryRepositoryError) -> Error {
    debug!(%error, "category repository failure");
    match error {
        CategoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("category repository unavailable: {message}"))
        }
        CategoryRepositoryError::Query { message } => {
            Error::internal(format!("category repository error: {message}"))
        }
    }
}

pub(crate) fn map_feedback_error(error: FeedbackRepositoryError) -> Error {
    debug!(%error, "feedback repository failure");
    match error {
        FeedbackRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feedback repository unavailable: {message}"))
        }
        FeedbackRepositoryError::Query { message } => {
            Error::internal(format!("feedback repository error: {message}"))
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    debug!(%error, "user repository failure");
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

/// Field name reported for profile image rejections.
pub(crate) const PROFILE_IMAGE_FIELD: &str = "profileImage";

pub(crate) fn map_image_error(error: ImageStoreError) -> Error {
    match error {
        ImageStoreError::InvalidImage { message } => Error::invalid_request(message).with_details(
            serde_json::json!({ "field": PROFILE_IMAGE_FIELD, "code": "invalid_image" }),
        ),
        ImageStoreError::Storage { message } => {
            Error::internal(format!("image storage failed: {message}"))
        }
    }
}
