//! Student area: profile image, course browsing, enrollment and feedback.
//!
//! ```text
//! GET  /api/v1/student/profile
//! PUT  /api/v1/student/profile/image
//! GET  /api/v1/student/courses?page=N
//! GET  /api/v1/student/courses/{id}
//! GET  /api/v1/student/courses/{id}/enroll
//! POST /api/v1/student/courses/{id}/feedback
//! ```

use actix_web::{HttpResponse, get, http::header, post, put, web};
use serde_json::{Value, json};

use crate::domain::ports::{FeedbackRequest, ProfileUpdate};
use crate::domain::{CourseFeedback, CourseId, Error, FeedbackSubmission, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    CourseDetailResponse, CourseFeedbackResponse, CoursePageResponse, CourseResponse,
    FeedbackRequestBody, PageQuery, ProfileImageRequest, ProfileResponse, feedback_list,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{decode_image, missing_image_error};

/// Where unknown course details send the browser back to.
pub const COURSE_LISTING_PATH: &str = "/api/v1/student/courses";

#[utoipa::path(
    get,
    path = "/api/v1/student/profile",
    responses(
        (status = 200, description = "Student profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a student", body = Error)
    ),
    tags = ["student"],
    operation_id = "getStudentProfile"
)]
#[get("/student/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_role(Role::Student)?;
    let user = state.profile_query.fetch_profile(&identity).await?;
    Ok(web::Json(ProfileResponse::from(&user)))
}

/// Replace the student's profile image. An image is required.
#[utoipa::path(
    put,
    path = "/api/v1/student/profile/image",
    request_body = ProfileImageRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Missing or invalid image", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a student", body = Error)
    ),
    tags = ["student"],
    operation_id = "updateStudentProfileImage"
)]
#[put("/student/profile/image")]
pub async fn update_profile_image(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileImageRequest>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let identity = session.require_role(Role::Student)?;
    let image = payload
        .into_inner()
        .profile_image
        .ok_or_else(missing_image_error)
        .and_then(decode_image)?;
    let update = ProfileUpdate {
        description: None,
        image: Some(image),
    };
    let user = state.profile.update_profile(&identity, update).await?;
    Ok(web::Json(ProfileResponse::from(&user)))
}

/// One page of the catalogue ordered by course id.
///
/// Pages outside `1..=totalPages` come back empty rather than failing.
#[utoipa::path(
    get,
    path = "/api/v1/student/courses",
    params(("page" = Option<i64>, Query, description = "1-based page number; defaults to 1")),
    responses(
        (status = 200, description = "Course page", body = CoursePageResponse),
        (status = 400, description = "Invalid page", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a student", body = Error)
    ),
    tags = ["student"],
    operation_id = "listCatalogue"
)]
#[get("/student/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<CoursePageResponse>> {
    session.require_role(Role::Student)?;
    let page = state.catalogue.list_courses(query.page_number()).await?;
    Ok(web::Json(CoursePageResponse::from(page)))
}

/// Course with category, lessons, feedback and rating summary.
///
/// Unknown ids redirect to the listing.
#[utoipa::path(
    get,
    path = "/api/v1/student/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course detail", body = CourseDetailResponse),
        (status = 303, description = "Unknown course; redirect to the listing",
            headers(("Location" = String, description = "Course listing"))),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a student", body = Error)
    ),
    tags = ["student"],
    operation_id = "getCourseDetail"
)]
#[get("/student/courses/{id}")]
pub async fn course_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Student)?;
    let detail = state
        .catalogue
        .course_detail(CourseId::new(path.into_inner()))
        .await?;
    Ok(match detail {
        Some(detail) => HttpResponse::Ok().json(CourseDetailResponse::from(&detail)),
        None => HttpResponse::SeeOther()
            .insert_header((header::LOCATION, COURSE_LISTING_PATH))
            .finish(),
    })
}

/// Enrollment confirmation view. Nothing is persisted.
#[utoipa::path(
    get,
    path = "/api/v1/student/courses/{id}/enroll",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course to enroll in", body = CourseResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a student", body = Error),
        (status = 404, description = "Unknown course", body = Error)
    ),
    tags = ["student"],
    operation_id = "enrollInCourse"
)]
#[get("/student/courses/{id}/enroll")]
pub async fn enroll(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CourseResponse>> {
    session.require_role(Role::Student)?;
    let course = state
        .catalogue
        .course_for_enrollment(CourseId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CourseResponse::from(&course)))
}

/// Merge the redisplay data into a rejected submission's error details.
fn rejection_error(error: Error, current: &CourseFeedback) -> Error {
    let mut details = match error.details() {
        Some(Value::Object(map)) => map.clone(),
        _ => serde_json::Map::new(),
    };
    details.insert(
        "course".to_owned(),
        json!(CourseResponse::from(&current.course)),
    );
    details.insert(
        "feedbacks".to_owned(),
        json!(feedback_list(&current.feedbacks)),
    );
    error.with_details(Value::Object(details))
}

/// Rate a course from 1 to 5 with an optional comment.
///
/// A rejected rating answers 400 with the course and its current feedback in
/// `details` so the form can be shown again.
#[utoipa::path(
    post,
    path = "/api/v1/student/courses/{id}/feedback",
    params(("id" = i32, Path, description = "Course id")),
    request_body = FeedbackRequestBody,
    responses(
        (status = 201, description = "Feedback stored", body = CourseFeedbackResponse),
        (status = 400, description = "Rating out of range", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not a student", body = Error),
        (status = 404, description = "Unknown course", body = Error)
    ),
    tags = ["student"],
    operation_id = "submitFeedback"
)]
#[post("/student/courses/{id}/feedback")]
pub async fn submit_feedback(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<FeedbackRequestBody>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_role(Role::Student)?;
    let FeedbackRequestBody { comment, rating } = payload.into_inner();
    let request = FeedbackRequest {
        course_id: CourseId::new(path.into_inner()),
        comment,
        rating,
    };
    match state.feedback.add_feedback(&identity, request).await? {
        FeedbackSubmission::Accepted(view) => {
            Ok(HttpResponse::Created().json(CourseFeedbackResponse::from(&view)))
        }
        FeedbackSubmission::Rejected { error, current } => {
            Err(rejection_error(error, &current))
        }
    }
}

#[cfg(test)]
#[path = "student_tests.rs"]
mod tests;
