//! Port error formatting and constructor coverage.

use super::*;
use rstest::rstest;

#[rstest]
fn repository_errors_name_their_adapter() {
    assert_eq!(
        CourseRepositoryError::connection("pool timed out").to_string(),
        "course repository connection failed: pool timed out"
    );
    assert_eq!(
        FeedbackRepositoryError::query("check violation").to_string(),
        "feedback repository query failed: check violation"
    );
    assert_eq!(
        UserPersistenceError::query("boom").to_string(),
        "user repository query failed: boom"
    );
    assert_eq!(
        CategoryRepositoryError::connection("refused").to_string(),
        "category repository connection failed: refused"
    );
}

#[rstest]
fn invalid_image_message_is_passed_through() {
    let error = ImageStoreError::invalid_image("unsupported image type `text/plain`");
    assert_eq!(error.to_string(), "unsupported image type `text/plain`");
    assert!(matches!(error, ImageStoreError::InvalidImage { .. }));
}

#[rstest]
fn profile_update_defaults_to_no_changes() {
    let update = ProfileUpdate::default();
    assert!(update.description.is_none());
    assert!(update.image.is_none());
}
