//! Instructor course service implementing [`InstructorCoursesCommand`] and
//! [`InstructorCoursesQuery`].
//!
//! Form validation collects every field error, including unknown categories,
//! and returns them together with the category choices so a client can
//! redisplay the form. Single-course reads and writes require ownership.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use crate::domain::port_error_mapping::{map_category_error, map_course_error};
use crate::domain::ports::{
    CategoryRepository, CourseRepository, InstructorCoursesCommand, InstructorCoursesQuery,
};
use crate::domain::{
    Category, Course, CourseDraft, CourseFields, CourseId, Error, FieldError, FieldErrors,
    Identity, NewCourse,
};

const INVALID_FORM_MESSAGE: &str = "course form is invalid";

#[derive(Clone)]
pub struct InstructorCourseService<C, K> {
    courses: Arc<C>,
    categories: Arc<K>,
}

impl<C, K> InstructorCourseService<C, K> {
    pub fn new(courses: Arc<C>, categories: Arc<K>) -> Self {
        Self {
            courses,
            categories,
        }
    }
}

impl<C, K> InstructorCourseService<C, K>
where
    C: CourseRepository,
    K: CategoryRepository,
{
    async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.categories
            .list_all()
            .await
            .map_err(map_category_error)
    }

    /// Validate `fields`, resolving the category against the repository.
    async fn validate(&self, fields: &CourseFields) -> Result<CourseDraft, Error> {
        let result = fields.validate();
        let mut errors = match &result {
            Ok(_) => FieldErrors::new(),
            Err(errors) => errors.clone(),
        };

        if let Ok(draft) = &result {
            let known = self
                .categories
                .find_by_id(draft.category_id)
                .await
                .map_err(map_category_error)?;
            if known.is_none() {
                errors.push(FieldError::new(
                    "categoryId",
                    "unknown_category",
                    "Category does not exist.",
                ));
            }
        }

        match result {
            Ok(draft) if errors.is_empty() => Ok(draft),
            _ => Err(self.form_error(errors).await?),
        }
    }

    async fn form_error(&self, errors: FieldErrors) -> Result<Error, Error> {
        let categories = self.categories().await?;
        let mut details = errors.to_details();
        if let Value::Object(map) = &mut details {
            map.insert("categories".to_owned(), categories_json(&categories));
        }
        Ok(Error::invalid_request(INVALID_FORM_MESSAGE).with_details(details))
    }

    /// Load a course and check the caller owns it.
    async fn owned_course(&self, identity: &Identity, id: CourseId) -> Result<Course, Error> {
        let course = self
            .courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(format!("course {id} not found")))?;
        self.ensure_owner(identity, id).await?;
        Ok(course)
    }

    async fn ensure_owner(&self, identity: &Identity, id: CourseId) -> Result<(), Error> {
        let owned = self
            .courses
            .is_owned_by(id, identity.user_id())
            .await
            .map_err(map_course_error)?;
        if owned {
            Ok(())
        } else {
            Err(Error::forbidden("course belongs to another instructor"))
        }
    }
}

fn categories_json(categories: &[Category]) -> Value {
    Value::Array(
        categories
            .iter()
            .map(|category| json!({ "id": category.id, "name": category.name }))
            .collect(),
    )
}

#[async_trait]
impl<C, K> InstructorCoursesCommand for InstructorCourseService<C, K>
where
    C: CourseRepository,
    K: CategoryRepository,
{
    async fn create_course(
        &self,
        identity: &Identity,
        fields: CourseFields,
    ) -> Result<Course, Error> {
        let draft = self.validate(&fields).await?;
        let new_course = NewCourse {
            instructor_id: *identity.user_id(),
            course: draft,
            first_lesson: fields.lesson(),
        };
        let course = self
            .courses
            .create_with_lesson(&new_course)
            .await
            .map_err(map_course_error)?;
        info!(course_id = %course.id, instructor = %identity.user_id(), "course created");
        Ok(course)
    }

    async fn update_course(
        &self,
        identity: &Identity,
        id: CourseId,
        fields: CourseFields,
    ) -> Result<Course, Error> {
        self.owned_course(identity, id).await?;
        let draft = self.validate(&fields).await?;
        let course = self
            .courses
            .update(id, &draft)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found(format!("course {id} not found")))?;
        info!(course_id = %id, instructor = %identity.user_id(), "course updated");
        Ok(course)
    }

    async fn delete_course(&self, identity: &Identity, id: CourseId) -> Result<(), Error> {
        let exists = self
            .courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .is_some();
        if !exists {
            return Ok(());
        }
        self.ensure_owner(identity, id).await?;
        let removed = self.courses.delete(id).await.map_err(map_course_error)?;
        if removed {
            info!(course_id = %id, instructor = %identity.user_id(), "course deleted");
        }
        Ok(())
    }
}

#[async_trait]
impl<C, K> InstructorCoursesQuery for InstructorCourseService<C, K>
where
    C: CourseRepository,
    K: CategoryRepository,
{
    async fn list_courses(&self, identity: &Identity) -> Result<Vec<Course>, Error> {
        self.courses
            .list_for_instructor(identity.user_id())
            .await
            .map_err(map_course_error)
    }

    async fn course_form(&self) -> Result<Vec<Category>, Error> {
        self.categories().await
    }

    async fn find_course(&self, identity: &Identity, id: CourseId) -> Result<Course, Error> {
        self.owned_course(identity, id).await
    }
}

#[cfg(test)]
#[path = "instructor_course_service_tests.rs"]
mod tests;
