//! Driving port for submitting course feedback.

use async_trait::async_trait;

use crate::domain::{CourseId, Error, FeedbackSubmission, Identity};

/// Raw feedback form. The rating is validated by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    pub course_id: CourseId,
    pub comment: String,
    pub rating: i64,
}

#[async_trait]
pub trait FeedbackCommand: Send + Sync {
    /// Store feedback from `identity`, or reject an out-of-range rating.
    ///
    /// Fails with `not_found` when the course does not exist.
    async fn add_feedback(
        &self,
        identity: &Identity,
        request: FeedbackRequest,
    ) -> Result<FeedbackSubmission, Error>;
}
