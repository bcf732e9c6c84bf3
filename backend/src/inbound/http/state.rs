//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use pagination::PageSize;

use crate::domain::ports::{
    CategoryRepository, CourseCatalogueQuery, CourseRepository, FeedbackCommand,
    FeedbackRepository, ImageStore, InstructorCoursesCommand, InstructorCoursesQuery,
    LoginService, ProfileCommand, ProfileQuery, UserRepository,
};
use crate::domain::{
    CourseCatalogueService, FeedbackService, InstructorCourseService, ProfileService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn ProfileCommand>,
    pub profile_query: Arc<dyn ProfileQuery>,
    pub instructor_courses: Arc<dyn InstructorCoursesCommand>,
    pub instructor_courses_query: Arc<dyn InstructorCoursesQuery>,
    pub catalogue: Arc<dyn CourseCatalogueQuery>,
    pub feedback: Arc<dyn FeedbackCommand>,
    /// Upload limit of the image store; sizes the JSON body limit.
    pub max_image_bytes: usize,
}

/// Driven adapters the domain services are assembled over.
pub struct StateRepositories<U, K, C, F, I> {
    pub users: Arc<U>,
    pub categories: Arc<K>,
    pub courses: Arc<C>,
    pub feedback: Arc<F>,
    pub images: Arc<I>,
}

impl HttpState {
    /// Wire every driving port to its domain service.
    ///
    /// The same adapters back the Diesel and in-memory configurations, so
    /// the server and handler tests share one assembly path.
    pub fn from_repositories<U, K, C, F, I>(
        repositories: StateRepositories<U, K, C, F, I>,
        login: Arc<dyn LoginService>,
        page_size: PageSize,
        max_image_bytes: usize,
    ) -> Self
    where
        U: UserRepository + 'static,
        K: CategoryRepository + 'static,
        C: CourseRepository + 'static,
        F: FeedbackRepository + 'static,
        I: ImageStore + 'static,
    {
        let StateRepositories {
            users,
            categories,
            courses,
            feedback,
            images,
        } = repositories;
        let profile = Arc::new(ProfileService::new(users, images));
        let instructor = Arc::new(InstructorCourseService::new(
            courses.clone(),
            categories.clone(),
        ));
        let catalogue = Arc::new(
            CourseCatalogueService::new(courses.clone(), categories, feedback.clone())
                .with_page_size(page_size),
        );
        Self {
            login,
            profile: profile.clone(),
            profile_query: profile,
            instructor_courses: instructor.clone(),
            instructor_courses_query: instructor,
            catalogue,
            feedback: Arc::new(FeedbackService::new(courses, feedback)),
            max_image_bytes,
        }
    }
}
