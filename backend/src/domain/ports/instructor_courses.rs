//! Driving ports for the instructor course area.
//!
//! Every operation takes the caller identity; course ownership is checked
//! against it for anything that reads or mutates a single course.

use async_trait::async_trait;

use crate::domain::{Category, Course, CourseFields, CourseId, Error, Identity};

/// Course mutations available to instructors.
#[async_trait]
pub trait InstructorCoursesCommand: Send + Sync {
    /// Validate the form and create the course with its first lesson.
    async fn create_course(&self, identity: &Identity, fields: CourseFields)
    -> Result<Course, Error>;

    /// Overwrite an owned course.
    async fn update_course(
        &self,
        identity: &Identity,
        id: CourseId,
        fields: CourseFields,
    ) -> Result<Course, Error>;

    /// Delete an owned course. Missing ids succeed without effect.
    async fn delete_course(&self, identity: &Identity, id: CourseId) -> Result<(), Error>;
}

/// Course reads available to instructors.
#[async_trait]
pub trait InstructorCoursesQuery: Send + Sync {
    /// Courses owned by the caller, ordered by id.
    async fn list_courses(&self, identity: &Identity) -> Result<Vec<Course>, Error>;

    /// Category choices for the course form.
    async fn course_form(&self) -> Result<Vec<Category>, Error>;

    /// An owned course for the edit and delete views.
    async fn find_course(&self, identity: &Identity, id: CourseId) -> Result<Course, Error>;
}
