//! Row types mapping the schema onto Rust structs.
//!
//! Rows stay close to the tables; conversion into domain types happens in
//! the repositories, where invalid stored data becomes a `Query` error.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{categories, courses, feedbacks, instructor_courses, lessons, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub role: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Profile columns written by `save_profile`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileChangeset<'a> {
    pub description: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CategoryRow {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub category_id: i32,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub category_id: i32,
    pub user_id: Uuid,
}

/// Columns overwritten by a course edit.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = courses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CourseChangeset<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub category_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LessonRow {
    pub id: i32,
    pub course_id: i32,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lessons)]
pub(crate) struct NewLessonRow<'a> {
    pub course_id: i32,
    pub title: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = instructor_courses)]
pub(crate) struct NewInstructorCourseRow {
    pub user_id: Uuid,
    pub course_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = feedbacks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeedbackRow {
    pub id: i32,
    pub course_id: i32,
    pub user_id: Uuid,
    pub comment: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = feedbacks)]
pub(crate) struct NewFeedbackRow<'a> {
    pub course_id: i32,
    pub user_id: Uuid,
    pub comment: &'a str,
    pub rating: i16,
}
