//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the image store) are implemented by outbound
//! adapters and return typed errors. Driving ports (commands and queries) are
//! implemented by domain services and called by inbound adapters; they
//! return the domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod course_catalogue_query;
mod course_repository;
mod feedback_command;
mod feedback_repository;
mod image_store;
mod instructor_courses;
mod login_service;
mod profile;
mod user_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::{CategoryRepository, CategoryRepositoryError};
pub use course_catalogue_query::CourseCatalogueQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
pub use feedback_command::{FeedbackCommand, FeedbackRequest};
#[cfg(test)]
pub use feedback_repository::MockFeedbackRepository;
pub use feedback_repository::{FeedbackRepository, FeedbackRepositoryError};
#[cfg(test)]
pub use image_store::MockImageStore;
pub use image_store::{ImageStore, ImageStoreError};
pub use instructor_courses::{InstructorCoursesCommand, InstructorCoursesQuery};
pub use login_service::{
    FIXTURE_INSTRUCTOR_ID, FIXTURE_STUDENT_ID, FixtureLoginService, LoginService,
};
pub use profile::{ProfileCommand, ProfileQuery, ProfileUpdate};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};

#[cfg(test)]
mod tests;
