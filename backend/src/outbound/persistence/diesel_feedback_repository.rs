//! PostgreSQL-backed `FeedbackRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedbackRepository, FeedbackRepositoryError};
use crate::domain::{
    CourseId, DisplayName, Feedback, FeedbackEntry, FeedbackId, NewFeedback, Rating, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{FeedbackRow, NewFeedbackRow};
use super::pool::DbPool;
use super::schema::{feedbacks, users};

#[derive(Clone)]
pub struct DieselFeedbackRepository {
    pool: DbPool,
}

impl DieselFeedbackRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> FeedbackRepositoryError {
    map_diesel_error(
        error,
        FeedbackRepositoryError::query,
        FeedbackRepositoryError::connection,
    )
}

fn row_to_feedback(row: FeedbackRow) -> Result<Feedback, FeedbackRepositoryError> {
    let rating = Rating::new(i64::from(row.rating))
        .map_err(|err| FeedbackRepositoryError::query(err.to_string()))?;
    Ok(Feedback {
        id: FeedbackId::new(row.id),
        course_id: CourseId::new(row.course_id),
        user_id: UserId::from_uuid(row.user_id),
        comment: row.comment,
        rating,
        created_at: row.created_at,
    })
}

fn row_to_entry(
    (row, author): (FeedbackRow, String),
) -> Result<FeedbackEntry, FeedbackRepositoryError> {
    let author =
        DisplayName::new(author).map_err(|err| FeedbackRepositoryError::query(err.to_string()))?;
    Ok(FeedbackEntry {
        feedback: row_to_feedback(row)?,
        author,
    })
}

#[async_trait]
impl FeedbackRepository for DieselFeedbackRepository {
    async fn insert(&self, feedback: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FeedbackRepositoryError::connection))?;
        let new_row = NewFeedbackRow {
            course_id: feedback.course_id.get(),
            user_id: *feedback.user_id.as_uuid(),
            comment: feedback.comment.as_str(),
            rating: i16::from(feedback.rating.get()),
        };
        let row: FeedbackRow = diesel::insert_into(feedbacks::table)
            .values(&new_row)
            .returning(FeedbackRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        row_to_feedback(row)
    }

    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<FeedbackEntry>, FeedbackRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, FeedbackRepositoryError::connection))?;
        let rows: Vec<(FeedbackRow, String)> = feedbacks::table
            .inner_join(users::table)
            .filter(feedbacks::course_id.eq(course.get()))
            .order((feedbacks::created_at.asc(), feedbacks::id.asc()))
            .select((FeedbackRow::as_select(), users::display_name))
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows.into_iter().map(row_to_entry).collect()
    }
}
