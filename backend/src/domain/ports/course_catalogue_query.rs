//! Driving port for student-facing course browsing.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{Course, CourseDetail, CourseId, Error};

#[async_trait]
pub trait CourseCatalogueQuery: Send + Sync {
    /// One page of all courses ordered by id, using the configured page size.
    ///
    /// Pages outside `1..=total_pages` come back empty rather than failing.
    async fn list_courses(&self, page: u32) -> Result<Page<Course>, Error>;

    /// Course with category, lessons and feedback; `None` when missing.
    async fn course_detail(&self, id: CourseId) -> Result<Option<CourseDetail>, Error>;

    /// The course a student is about to enrol in.
    async fn course_for_enrollment(&self, id: CourseId) -> Result<Course, Error>;
}
