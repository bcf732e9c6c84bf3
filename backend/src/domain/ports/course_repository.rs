//! Port abstraction for course, lesson and ownership persistence.
//!
//! Adapters own the `courses`, `lessons` and `instructor_courses` rows.
//! Creation writes all three in one unit of work so a course never exists
//! without its first lesson and owner.
use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Lesson, NewCourse, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by course repository adapters.
    pub enum CourseRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "course repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Insert the course, its first lesson and the ownership row atomically.
    async fn create_with_lesson(&self, course: &NewCourse) -> Result<Course, CourseRepositoryError>;

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError>;

    /// Overwrite title, description, price and category.
    ///
    /// Returns `None` when the course no longer exists.
    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError>;

    /// Delete the course and its dependants. Returns whether a row existed.
    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError>;

    /// Courses owned by `instructor` through the ownership association,
    /// ordered by id.
    async fn list_for_instructor(
        &self,
        instructor: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError>;

    /// A window of all courses ordered by id.
    async fn list_page(&self, offset: u64, limit: u64)
    -> Result<Vec<Course>, CourseRepositoryError>;

    async fn count(&self) -> Result<u64, CourseRepositoryError>;

    /// Lessons of a course ordered by id.
    async fn lessons_for_course(&self, id: CourseId) -> Result<Vec<Lesson>, CourseRepositoryError>;

    /// Whether the ownership association links `instructor` to `id`.
    async fn is_owned_by(
        &self,
        id: CourseId,
        instructor: &UserId,
    ) -> Result<bool, CourseRepositoryError>;
}
