//! PostgreSQL-backed `CourseRepository`.
//!
//! Courses, lessons and the `instructor_courses` association are written
//! here. Dependants of a course are removed by `ON DELETE CASCADE`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{
    CategoryId, Course, CourseDraft, CourseId, CourseTitle, Lesson, LessonId, NewCourse, Price,
    UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CourseChangeset, CourseRow, LessonRow, NewCourseRow, NewInstructorCourseRow, NewLessonRow,
};
use super::pool::DbPool;
use super::schema::{courses, instructor_courses, lessons};

#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn diesel_error(error: diesel::result::Error) -> CourseRepositoryError {
    map_diesel_error(
        error,
        CourseRepositoryError::query,
        CourseRepositoryError::connection,
    )
}

pub(crate) fn row_to_course(row: CourseRow) -> Result<Course, CourseRepositoryError> {
    let title =
        CourseTitle::new(&row.title).map_err(|err| CourseRepositoryError::query(err.to_string()))?;
    let price = Price::from_cents(row.price_cents)
        .map_err(|err| CourseRepositoryError::query(err.to_string()))?;
    Ok(Course {
        id: CourseId::new(row.id),
        title,
        description: row.description,
        price,
        category_id: CategoryId::new(row.category_id),
        instructor_id: UserId::from_uuid(row.user_id),
    })
}

fn rows_to_courses(rows: Vec<CourseRow>) -> Result<Vec<Course>, CourseRepositoryError> {
    rows.into_iter().map(row_to_course).collect()
}

fn row_to_lesson(row: LessonRow) -> Lesson {
    Lesson {
        id: LessonId::new(row.id),
        course_id: CourseId::new(row.course_id),
        title: row.title,
        content: row.content,
    }
}

fn window(offset: u64, limit: u64) -> Result<(i64, i64), CourseRepositoryError> {
    let offset = i64::try_from(offset)
        .map_err(|_| CourseRepositoryError::query("page offset out of range"))?;
    let limit =
        i64::try_from(limit).map_err(|_| CourseRepositoryError::query("page limit out of range"))?;
    Ok((offset, limit))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn create_with_lesson(&self, course: &NewCourse) -> Result<Course, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let instructor = *course.instructor_id.as_uuid();
        let new_course = NewCourseRow {
            title: course.course.title.as_str(),
            description: course.course.description.as_deref(),
            price_cents: course.course.price.cents(),
            category_id: course.course.category_id.get(),
            user_id: instructor,
        };
        let lesson = &course.first_lesson;

        let row = conn
            .transaction(|conn| {
                async move {
                    let row: CourseRow = diesel::insert_into(courses::table)
                        .values(&new_course)
                        .returning(CourseRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(lessons::table)
                        .values(&NewLessonRow {
                            course_id: row.id,
                            title: lesson.title.as_str(),
                            content: lesson.content.as_str(),
                        })
                        .execute(conn)
                        .await?;

                    diesel::insert_into(instructor_courses::table)
                        .values(&NewInstructorCourseRow {
                            user_id: instructor,
                            course_id: row.id,
                        })
                        .execute(conn)
                        .await?;

                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        row_to_course(row)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let row = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let changes = CourseChangeset {
            title: draft.title.as_str(),
            description: draft.description.as_deref(),
            price_cents: draft.price.cents(),
            category_id: draft.category_id.get(),
        };
        let row = diesel::update(courses::table.find(id.get()))
            .set(&changes)
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        row.map(row_to_course).transpose()
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let deleted = diesel::delete(courses::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(deleted > 0)
    }

    async fn list_for_instructor(
        &self,
        instructor: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let rows: Vec<CourseRow> = courses::table
            .inner_join(instructor_courses::table)
            .filter(instructor_courses::user_id.eq(*instructor.as_uuid()))
            .order(courses::id.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_courses(rows)
    }

    async fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let (offset, limit) = window(offset, limit)?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let rows: Vec<CourseRow> = courses::table
            .order(courses::id.asc())
            .offset(offset)
            .limit(limit)
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        rows_to_courses(rows)
    }

    async fn count(&self) -> Result<u64, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let total: i64 = courses::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        u64::try_from(total).map_err(|_| CourseRepositoryError::query("negative course count"))
    }

    async fn lessons_for_course(&self, id: CourseId) -> Result<Vec<Lesson>, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        let rows: Vec<LessonRow> = lessons::table
            .filter(lessons::course_id.eq(id.get()))
            .order(lessons::id.asc())
            .select(LessonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_lesson).collect())
    }

    async fn is_owned_by(
        &self,
        id: CourseId,
        instructor: &UserId,
    ) -> Result<bool, CourseRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, CourseRepositoryError::connection))?;
        diesel::select(diesel::dsl::exists(
            instructor_courses::table
                .filter(instructor_courses::course_id.eq(id.get()))
                .filter(instructor_courses::user_id.eq(*instructor.as_uuid())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(title: &str, price_cents: i64) -> CourseRow {
        CourseRow {
            id: 7,
            title: title.to_owned(),
            description: None,
            price_cents,
            category_id: 2,
            user_id: Uuid::nil(),
        }
    }

    #[rstest]
    fn rows_convert_to_courses() {
        let course = row_to_course(row("Rust for Rustaceans", 4999)).expect("course");
        assert_eq!(course.id, CourseId::new(7));
        assert_eq!(course.title.as_str(), "Rust for Rustaceans");
        assert_eq!(course.price.to_string(), "49.99");
        assert_eq!(course.category_id, CategoryId::new(2));
        assert_eq!(course.instructor_id, UserId::from_uuid(Uuid::nil()));
    }

    #[rstest]
    #[case(row("  ", 100))]
    #[case(row("Pricing", -1))]
    fn corrupt_rows_are_query_errors(#[case] row: CourseRow) {
        assert!(matches!(
            row_to_course(row),
            Err(CourseRepositoryError::Query { .. })
        ));
    }

    #[rstest]
    fn oversized_windows_are_rejected() {
        assert_eq!(window(12, 6), Ok((12, 6)));
        assert!(window(u64::MAX, 6).is_err());
        assert!(window(0, u64::MAX).is_err());
    }
}
