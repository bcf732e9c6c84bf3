//! Request and response payloads for the instructor and student areas.
//!
//! Domain types stay free of serde wire concerns; these DTOs fix the JSON
//! shape (camelCase, prices as decimal strings, timestamps as RFC 3339).

use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Category, Course, CourseDetail, CourseFeedback, CourseFields, FeedbackEntry, Identity, Lesson,
    RatingSummary, User,
};

/// Login request body for `POST /api/v1/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "instructor")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

/// Identity established by a successful login.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(example = "instructor")]
    pub role: String,
}

impl From<Identity> for LoginResponse {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id().to_string(),
            role: identity.role().as_str().to_owned(),
        }
    }
}

/// Uploaded image with base64-encoded content.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImagePayload {
    #[schema(example = "avatar.png")]
    pub file_name: String,
    #[schema(example = "image/png")]
    pub content_type: String,
    /// Standard base64 of the file bytes.
    pub data: String,
}

/// Body of `PUT /api/v1/instructor/profile`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfileRequest {
    /// Replaces the description when it contains visible text.
    pub description: Option<String>,
    pub profile_image: Option<ImagePayload>,
}

/// Body of `PUT /api/v1/student/profile/image`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileImageRequest {
    pub profile_image: Option<ImagePayload>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "instructor")]
    pub role: String,
    #[schema(example = "Ingrid Instructor")]
    pub display_name: String,
    pub description: Option<String>,
    #[schema(example = "/uploads/profiles/3fa85f64-avatar.png")]
    pub image_url: Option<String>,
}

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            role: user.role().as_str().to_owned(),
            display_name: user.display_name().to_string(),
            description: user.description().map(str::to_owned),
            image_url: user.image().map(|image| image.as_str().to_owned()),
        }
    }
}

/// Instructor profile together with the courses they own.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstructorProfileResponse {
    pub profile: ProfileResponse,
    pub courses: Vec<CourseResponse>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    #[schema(example = 2)]
    pub id: i32,
    #[schema(example = "Design")]
    pub name: String,
}

impl From<&Category> for CategoryResponse {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    #[schema(example = 7)]
    pub id: i32,
    #[schema(example = "Rust for Rustaceans")]
    pub title: String,
    pub description: Option<String>,
    /// Decimal price with two fraction digits.
    #[schema(example = "49.99")]
    pub price: String,
    #[schema(example = 1)]
    pub category_id: i32,
    pub instructor_id: String,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.get(),
            title: course.title.to_string(),
            description: course.description.clone(),
            price: course.price.to_string(),
            category_id: course.category_id.get(),
            instructor_id: course.instructor_id.to_string(),
        }
    }
}

pub(crate) fn course_list(courses: &[Course]) -> Vec<CourseResponse> {
    courses.iter().map(CourseResponse::from).collect()
}

/// Category choices for the course form.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseFormResponse {
    pub categories: Vec<CategoryResponse>,
}

/// A price given either as a JSON string (`"49.99"`) or number (`49.99`).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Course form submitted on create and update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>, example = "49.99")]
    pub price: Option<PriceInput>,
    pub category_id: Option<i64>,
    /// Only used on create.
    pub lesson_title: Option<String>,
    /// Only used on create.
    pub lesson_content: Option<String>,
}

impl From<CourseRequest> for CourseFields {
    fn from(request: CourseRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            price: request.price.map(PriceInput::into_text),
            category_id: request.category_id,
            lesson_title: request.lesson_title,
            lesson_content: request.lesson_content,
        }
    }
}

/// `?page=N` on the student course listing.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: i64,
}

const fn first_page() -> i64 {
    1
}

impl PageQuery {
    /// Page number for the catalogue; negative or huge values map to 0,
    /// which is outside every range and yields an empty page.
    pub fn page_number(&self) -> u32 {
        u32::try_from(self.page).unwrap_or(0)
    }
}

/// One page of courses.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoursePageResponse {
    pub courses: Vec<CourseResponse>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 6)]
    pub page_size: u32,
    #[schema(example = 13)]
    pub total_courses: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
}

impl From<Page<Course>> for CoursePageResponse {
    fn from(page: Page<Course>) -> Self {
        Self {
            courses: course_list(page.items()),
            page: page.page(),
            page_size: page.page_size(),
            total_courses: page.total_items(),
            total_pages: page.total_pages(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
}

impl From<&Lesson> for LessonResponse {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.get(),
            title: lesson.title.clone(),
            content: lesson.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: i32,
    pub user_id: String,
    #[schema(example = "Sam Student")]
    pub author: String,
    pub comment: String,
    #[schema(example = 5)]
    pub rating: u8,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl From<&FeedbackEntry> for FeedbackResponse {
    fn from(entry: &FeedbackEntry) -> Self {
        let feedback = &entry.feedback;
        Self {
            id: feedback.id.get(),
            user_id: feedback.user_id.to_string(),
            author: entry.author.to_string(),
            comment: feedback.comment.clone(),
            rating: feedback.rating.get(),
            created_at: feedback.created_at.to_rfc3339(),
        }
    }
}

pub(crate) fn feedback_list(entries: &[FeedbackEntry]) -> Vec<FeedbackResponse> {
    entries.iter().map(FeedbackResponse::from).collect()
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummaryResponse {
    pub count: u32,
    /// Mean rating to two decimals; absent without feedback.
    #[schema(example = 4.5)]
    pub average: Option<f64>,
}

impl From<RatingSummary> for RatingSummaryResponse {
    fn from(summary: RatingSummary) -> Self {
        Self {
            count: summary.count(),
            average: summary.average(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    pub course: CourseResponse,
    pub category: Option<CategoryResponse>,
    pub lessons: Vec<LessonResponse>,
    pub feedbacks: Vec<FeedbackResponse>,
    pub rating_summary: RatingSummaryResponse,
}

impl From<&CourseDetail> for CourseDetailResponse {
    fn from(detail: &CourseDetail) -> Self {
        Self {
            course: CourseResponse::from(&detail.course),
            category: detail.category.as_ref().map(CategoryResponse::from),
            lessons: detail.lessons.iter().map(LessonResponse::from).collect(),
            feedbacks: feedback_list(&detail.feedbacks),
            rating_summary: detail.summary.into(),
        }
    }
}

/// Body of `POST /api/v1/student/courses/{id}/feedback`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequestBody {
    #[serde(default)]
    pub comment: String,
    /// Integer from 1 to 5. A missing rating counts as 0 and is rejected.
    #[serde(default)]
    #[schema(example = 5)]
    pub rating: i64,
}

/// A course with its full feedback list after a successful submission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseFeedbackResponse {
    pub course: CourseResponse,
    pub feedbacks: Vec<FeedbackResponse>,
    pub rating_summary: RatingSummaryResponse,
}

impl From<&CourseFeedback> for CourseFeedbackResponse {
    fn from(view: &CourseFeedback) -> Self {
        Self {
            course: CourseResponse::from(&view.course),
            feedbacks: feedback_list(&view.feedbacks),
            rating_summary: view.summary.into(),
        }
    }
}
