//! Student-facing course browsing implementing [`CourseCatalogueQuery`].

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest, PageSize};
use tracing::debug;

use crate::domain::port_error_mapping::{
    map_category_error, map_course_error, map_feedback_error,
};
use crate::domain::ports::{
    CategoryRepository, CourseCatalogueQuery, CourseRepository, FeedbackRepository,
};
use crate::domain::{Course, CourseDetail, CourseId, Error};

#[derive(Clone)]
pub struct CourseCatalogueService<C, K, F> {
    courses: Arc<C>,
    categories: Arc<K>,
    feedback: Arc<F>,
    page_size: PageSize,
}

impl<C, K, F> CourseCatalogueService<C, K, F> {
    pub fn new(courses: Arc<C>, categories: Arc<K>, feedback: Arc<F>) -> Self {
        Self {
            courses,
            categories,
            feedback,
            page_size: PageSize::default(),
        }
    }

    /// Override the listing page size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}

#[async_trait]
impl<C, K, F> CourseCatalogueQuery for CourseCatalogueService<C, K, F>
where
    C: CourseRepository,
    K: CategoryRepository,
    F: FeedbackRepository,
{
    async fn list_courses(&self, page: u32) -> Result<Page<Course>, Error> {
        let total = self.courses.count().await.map_err(map_course_error)?;
        let request = PageRequest::new(page, self.page_size);
        let offset = match request.offset() {
            Some(offset) if request.is_within(total) => offset,
            _ => {
                debug!(page, total, "course page outside range");
                return Ok(Page::empty(request, total));
            }
        };
        let courses = self
            .courses
            .list_page(offset, request.limit())
            .await
            .map_err(map_course_error)?;
        Ok(Page::new(courses, request, total))
    }

    async fn course_detail(&self, id: CourseId) -> Result<Option<CourseDetail>, Error> {
        let Some(course) = self.courses.find_by_id(id).await.map_err(map_course_error)? else {
            return Ok(None);
        };
        let category = self
            .categories
            .find_by_id(course.category_id)
            .await
            .map_err(map_category_error)?;
        let lessons = self
            .courses
            .lessons_for_course(id)
            .await
            .map_err(map_course_error)?;
        let feedbacks = self
            .feedback
            .list_for_course(id)
            .await
            .map_err(map_feedback_error)?;
        Ok(Some(CourseDetail::new(course, category, lessons, feedbacks)))
    }

    async fn course_for_enrollment(&self, id: CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(id)
            .await
            .map_err(map_course_error)?
            .ok_or_else(|| Error::not_found("Course not found."))
    }
}

#[cfg(test)]
#[path = "course_catalogue_service_tests.rs"]
mod tests;
