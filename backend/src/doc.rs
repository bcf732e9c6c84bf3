//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP handler (login, the instructor and student
//! areas, health probes), the request and response payloads and the session
//! cookie security scheme. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary writes it out for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::dto::{
    CategoryResponse, CourseDetailResponse, CourseFeedbackResponse, CourseFormResponse,
    CoursePageResponse, CourseRequest, CourseResponse, FeedbackRequestBody, FeedbackResponse,
    ImagePayload, InstructorProfileRequest, InstructorProfileResponse, LessonResponse,
    LoginRequest, LoginResponse, ProfileImageRequest, ProfileResponse, RatingSummaryResponse,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Course marketplace API",
        description = "Instructor course management and student browsing, enrollment and feedback."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::instructor::get_profile,
        crate::inbound::http::instructor::update_profile,
        crate::inbound::http::instructor::list_courses,
        crate::inbound::http::instructor::course_form,
        crate::inbound::http::instructor::create_course,
        crate::inbound::http::instructor::get_course,
        crate::inbound::http::instructor::update_course,
        crate::inbound::http::instructor::delete_course,
        crate::inbound::http::student::get_profile,
        crate::inbound::http::student::update_profile_image,
        crate::inbound::http::student::list_courses,
        crate::inbound::http::student::course_detail,
        crate::inbound::http::student::enroll,
        crate::inbound::http::student::submit_feedback,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        LoginResponse,
        ImagePayload,
        InstructorProfileRequest,
        ProfileImageRequest,
        ProfileResponse,
        InstructorProfileResponse,
        CategoryResponse,
        CourseResponse,
        CourseFormResponse,
        CourseRequest,
        CoursePageResponse,
        LessonResponse,
        FeedbackResponse,
        RatingSummaryResponse,
        CourseDetailResponse,
        FeedbackRequestBody,
        CourseFeedbackResponse,
    )),
    tags(
        (name = "users", description = "Session login"),
        (name = "instructor", description = "Instructor profile and course management"),
        (name = "student", description = "Course browsing, enrollment and feedback"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
