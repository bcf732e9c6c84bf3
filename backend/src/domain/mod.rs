//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed entities for the course marketplace and the
//! services that implement the driving ports. Nothing here knows about HTTP
//! or SQL; adapters live under `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure envelope.
//! - User, Identity, Role: accounts and the caller identity.
//! - Course, Lesson, Category, Feedback: marketplace data.
//! - Services: profile, instructor courses, course catalogue and feedback.

pub mod auth;
pub mod category;
pub mod course;
pub mod course_catalogue_service;
pub mod course_detail;
pub mod error;
pub mod feedback;
pub mod feedback_service;
pub mod image;
pub mod instructor_course_service;
pub(crate) mod port_error_mapping;
pub mod ports;
pub mod profile_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::auth::{Identity, LoginCredentials, LoginValidationError};
pub use self::category::{Category, CategoryId};
pub use self::course::{
    COURSE_TITLE_MAX, Course, CourseDraft, CourseFields, CourseId, CourseTitle, CourseTitleError,
    LESSON_TITLE_MAX, Lesson, LessonDraft, LessonId, NewCourse, Price, PriceValidationError,
};
pub use self::course_catalogue_service::CourseCatalogueService;
pub use self::course_detail::CourseDetail;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feedback::{
    CourseFeedback, Feedback, FeedbackEntry, FeedbackId, FeedbackSubmission, NewFeedback,
    RATING_MAX, RATING_MIN, Rating, RatingOutOfRange, RatingSummary,
};
pub use self::feedback_service::FeedbackService;
pub use self::image::{EmptyImageReference, ImageReference, ImageUpload};
pub use self::instructor_course_service::InstructorCourseService;
pub use self::profile_service::ProfileService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, Role, User, UserId, UserValidationError};
pub use self::validation::{FieldError, FieldErrors};
