//! Port abstraction for feedback persistence.
use async_trait::async_trait;

use crate::domain::{CourseId, Feedback, FeedbackEntry, NewFeedback};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by feedback repository adapters.
    pub enum FeedbackRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "feedback repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feedback repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError>;

    /// Feedback for one course joined with author names, oldest first.
    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<FeedbackEntry>, FeedbackRepositoryError>;
}
