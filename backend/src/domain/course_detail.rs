//! Student-facing course detail view.

use super::{Category, Course, FeedbackEntry, Lesson, RatingSummary};

/// A course with its category, lessons, feedback and rating summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetail {
    pub course: Course,
    /// `None` only if the category row disappeared underneath the course.
    pub category: Option<Category>,
    pub lessons: Vec<Lesson>,
    pub feedbacks: Vec<FeedbackEntry>,
    pub summary: RatingSummary,
}

impl CourseDetail {
    pub fn new(
        course: Course,
        category: Option<Category>,
        lessons: Vec<Lesson>,
        feedbacks: Vec<FeedbackEntry>,
    ) -> Self {
        let summary = RatingSummary::from_entries(&feedbacks);
        Self {
            course,
            category,
            lessons,
            feedbacks,
            summary,
        }
    }
}
