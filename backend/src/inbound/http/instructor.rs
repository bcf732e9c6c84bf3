//! Instructor area: profile and owned-course management.
//!
//! ```text
//! GET    /api/v1/instructor/profile
//! PUT    /api/v1/instructor/profile
//! GET    /api/v1/instructor/courses
//! GET    /api/v1/instructor/courses/form
//! POST   /api/v1/instructor/courses
//! GET    /api/v1/instructor/courses/{id}
//! PUT    /api/v1/instructor/courses/{id}
//! DELETE /api/v1/instructor/courses/{id}
//! ```
//!
//! Every handler requires an instructor session.

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::ports::ProfileUpdate;
use crate::domain::{CourseFields, CourseId, Error, Identity, Role, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    CategoryResponse, CourseFormResponse, CourseRequest, CourseResponse,
    InstructorProfileRequest, InstructorProfileResponse, ProfileResponse, course_list,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::decode_image;

async fn profile_view(
    state: &HttpState,
    identity: &Identity,
    user: &User,
) -> ApiResult<InstructorProfileResponse> {
    let courses = state.instructor_courses_query.list_courses(identity).await?;
    Ok(InstructorProfileResponse {
        profile: ProfileResponse::from(user),
        courses: course_list(&courses),
    })
}

/// The instructor's profile with the courses they own.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/profile",
    responses(
        (status = 200, description = "Instructor profile", body = InstructorProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not an instructor", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "getInstructorProfile"
)]
#[get("/instructor/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<InstructorProfileResponse>> {
    let identity = session.require_role(Role::Instructor)?;
    let user = state.profile_query.fetch_profile(&identity).await?;
    Ok(web::Json(profile_view(&state, &identity, &user).await?))
}

/// Update the description and optionally replace the profile image.
#[utoipa::path(
    put,
    path = "/api/v1/instructor/profile",
    request_body = InstructorProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = InstructorProfileResponse),
        (status = 400, description = "Invalid image", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not an instructor", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "updateInstructorProfile"
)]
#[put("/instructor/profile")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<InstructorProfileRequest>,
) -> ApiResult<web::Json<InstructorProfileResponse>> {
    let identity = session.require_role(Role::Instructor)?;
    let InstructorProfileRequest {
        description,
        profile_image,
    } = payload.into_inner();
    let update = ProfileUpdate {
        description,
        image: profile_image.map(decode_image).transpose()?,
    };
    let user = state.profile.update_profile(&identity, update).await?;
    Ok(web::Json(profile_view(&state, &identity, &user).await?))
}

/// Courses owned by the caller, ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses",
    responses(
        (status = 200, description = "Owned courses", body = [CourseResponse]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not an instructor", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "listInstructorCourses"
)]
#[get("/instructor/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<CourseResponse>>> {
    let identity = session.require_role(Role::Instructor)?;
    let courses = state.instructor_courses_query.list_courses(&identity).await?;
    Ok(web::Json(course_list(&courses)))
}

/// Category choices for the course form.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses/form",
    responses(
        (status = 200, description = "Form choices", body = CourseFormResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not an instructor", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "getCourseForm"
)]
#[get("/instructor/courses/form")]
pub async fn course_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CourseFormResponse>> {
    session.require_role(Role::Instructor)?;
    let categories = state.instructor_courses_query.course_form().await?;
    Ok(web::Json(CourseFormResponse {
        categories: categories.iter().map(CategoryResponse::from).collect(),
    }))
}

/// Create a course with its first lesson.
///
/// Field errors come back together as `details.fields`, with the category
/// choices in `details.categories`.
#[utoipa::path(
    post,
    path = "/api/v1/instructor/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseResponse),
        (status = 400, description = "Invalid course fields", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not an instructor", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "createCourse"
)]
#[post("/instructor/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CourseRequest>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_role(Role::Instructor)?;
    let fields = CourseFields::from(payload.into_inner());
    let course = state
        .instructor_courses
        .create_course(&identity, fields)
        .await?;
    Ok(HttpResponse::Created().json(CourseResponse::from(&course)))
}

/// An owned course for the edit view.
#[utoipa::path(
    get,
    path = "/api/v1/instructor/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course", body = CourseResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Unknown course", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "getInstructorCourse"
)]
#[get("/instructor/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<CourseResponse>> {
    let identity = session.require_role(Role::Instructor)?;
    let course = state
        .instructor_courses_query
        .find_course(&identity, CourseId::new(path.into_inner()))
        .await?;
    Ok(web::Json(CourseResponse::from(&course)))
}

/// Overwrite title, description, price and category of an owned course.
#[utoipa::path(
    put,
    path = "/api/v1/instructor/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    request_body = CourseRequest,
    responses(
        (status = 200, description = "Updated course", body = CourseResponse),
        (status = 400, description = "Invalid course fields", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 404, description = "Unknown course", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "updateCourse"
)]
#[put("/instructor/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<CourseRequest>,
) -> ApiResult<web::Json<CourseResponse>> {
    let identity = session.require_role(Role::Instructor)?;
    let course = state
        .instructor_courses
        .update_course(
            &identity,
            CourseId::new(path.into_inner()),
            CourseFields::from(payload.into_inner()),
        )
        .await?;
    Ok(web::Json(CourseResponse::from(&course)))
}

/// Delete an owned course with its lessons and feedback.
///
/// Unknown ids succeed, so repeated deletes are harmless.
#[utoipa::path(
    delete,
    path = "/api/v1/instructor/courses/{id}",
    params(("id" = i32, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Not the owner", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["instructor"],
    operation_id = "deleteCourse"
)]
#[delete("/instructor/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let identity = session.require_role(Role::Instructor)?;
    state
        .instructor_courses
        .delete_course(&identity, CourseId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "instructor_tests.rs"]
mod tests;
