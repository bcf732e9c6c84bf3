//! Feedback submission implementing [`FeedbackCommand`].
//!
//! A rating outside 1..=5 is a normal rejection carrying the course and its
//! current feedback; storage is untouched in that case.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::port_error_mapping::{map_course_error, map_feedback_error};
use crate::domain::ports::{CourseRepository, FeedbackCommand, FeedbackRepository, FeedbackRequest};
use crate::domain::{
    Course, CourseFeedback, CourseId, Error, FeedbackSubmission, FieldError, Identity,
    NewFeedback, Rating,
};

#[derive(Clone)]
pub struct FeedbackService<C, F> {
    courses: Arc<C>,
    feedback: Arc<F>,
}

impl<C, F> FeedbackService<C, F> {
    pub fn new(courses: Arc<C>, feedback: Arc<F>) -> Self {
        Self { courses, feedback }
    }
}

impl<C, F> FeedbackService<C, F>
where
    C: CourseRepository,
    F: FeedbackRepository,
{
    async fn course(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("Course not found."))
    }

    async fn current(&self, id: CourseId) -> Result<CourseFeedback, Error> {
        let course = self.course(id).await?;
        let feedbacks = self
            .feedback
            .list_for_course(id)
            .await
            .map_err(map_feedback_error)?;
        Ok(CourseFeedback::new(course, feedbacks))
    }
}

#[async_trait]
impl<C, F> FeedbackCommand for FeedbackService<C, F>
where
    C: CourseRepository,
    F: FeedbackRepository,
{
    async fn add_feedback(
        &self,
        identity: &Identity,
        request: FeedbackRequest,
    ) -> Result<FeedbackSubmission, Error> {
        let FeedbackRequest {
            course_id,
            comment,
            rating,
        } = request;

        let rating = match Rating::new(rating) {
            Ok(rating) => rating,
            Err(rejection) => {
                let current = self.current(course_id).await?;
                let error =
                    FieldError::new("rating", "out_of_range", rejection.to_string()).into_error();
                return Ok(FeedbackSubmission::Rejected { error, current });
            }
        };

        self.course(course_id).await?;
        let stored = self
            .feedback
            .insert(&NewFeedback {
                course_id,
                user_id: *identity.user_id(),
                comment,
                rating,
            })
            .await
            .map_err(map_feedback_error)?;
        info!(
            feedback_id = stored.id.get(),
            course_id = %course_id,
            rating = rating.get(),
            "feedback added"
        );

        Ok(FeedbackSubmission::Accepted(self.current(course_id).await?))
    }
}

#[cfg(test)]
#[path = "feedback_service_tests.rs"]
mod tests;
