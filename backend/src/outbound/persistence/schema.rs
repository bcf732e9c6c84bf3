//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Accounts with their role and profile fields.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        /// `instructor` or `student`.
        role -> Varchar,
        description -> Nullable<Text>,
        image_url -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Seeded reference data.
    categories (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    courses (id) {
        id -> Int4,
        title -> Varchar,
        description -> Nullable<Text>,
        /// Non-negative price in cents.
        price_cents -> Int8,
        category_id -> Int4,
        /// Owning instructor.
        user_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    lessons (id) {
        id -> Int4,
        course_id -> Int4,
        title -> Varchar,
        content -> Text,
    }
}

diesel::table! {
    feedbacks (id) {
        id -> Int4,
        course_id -> Int4,
        user_id -> Uuid,
        comment -> Text,
        /// 1..=5, enforced by a CHECK constraint.
        rating -> Int2,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ownership association between instructors and courses.
    instructor_courses (user_id, course_id) {
        user_id -> Uuid,
        course_id -> Int4,
    }
}

diesel::joinable!(courses -> categories (category_id));
diesel::joinable!(lessons -> courses (course_id));
diesel::joinable!(feedbacks -> courses (course_id));
diesel::joinable!(feedbacks -> users (user_id));
diesel::joinable!(instructor_courses -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    categories,
    courses,
    lessons,
    feedbacks,
    instructor_courses,
);
