//! In-memory adapter for every repository port.
//!
//! Used when no database URL is configured and by the behaviour tests. The
//! store mirrors the relational constraints it stands in for: foreign keys
//! are checked on insert, deletes cascade, and course creation happens under
//! a single lock so it is atomic.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    CategoryRepository, CategoryRepositoryError, CourseRepository, CourseRepositoryError,
    FIXTURE_INSTRUCTOR_ID, FIXTURE_STUDENT_ID, FeedbackRepository, FeedbackRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Category, CategoryId, Course, CourseDraft, CourseId, DisplayName, Feedback, FeedbackEntry,
    FeedbackId, Lesson, LessonId, NewCourse, NewFeedback, Role, User, UserId,
};

/// Categories present in a fresh store and in the initial migration.
pub const SEED_CATEGORIES: [(i32, &str); 5] = [
    (1, "Programming"),
    (2, "Design"),
    (3, "Business"),
    (4, "Marketing"),
    (5, "Photography"),
];

const POISONED: &str = "in-memory store lock poisoned";
const IDS_EXHAUSTED: &str = "identifier sequence exhausted";

#[derive(Default)]
struct StoreState {
    users: HashMap<UserId, User>,
    categories: BTreeMap<CategoryId, Category>,
    courses: BTreeMap<CourseId, Course>,
    lessons: Vec<Lesson>,
    ownership: HashSet<(UserId, CourseId)>,
    feedbacks: Vec<Feedback>,
    last_course_id: i32,
    last_lesson_id: i32,
    last_feedback_id: i32,
}

fn next_id(last: &mut i32) -> Result<i32, &'static str> {
    *last = last.checked_add(1).ok_or(IDS_EXHAUSTED)?;
    Ok(*last)
}

/// Shared, cloneable in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// An empty store without categories or users.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the seed categories and the two fixture accounts.
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            for (id, name) in SEED_CATEGORIES {
                let id = CategoryId::new(id);
                state.categories.insert(id, Category::new(id, name));
            }
            for (raw_id, role, name) in [
                (FIXTURE_INSTRUCTOR_ID, Role::Instructor, "Ingrid Instructor"),
                (FIXTURE_STUDENT_ID, Role::Student, "Sam Student"),
            ] {
                if let (Ok(id), Ok(display_name)) = (UserId::new(raw_id), DisplayName::new(name)) {
                    state.users.insert(id, User::new(id, role, display_name));
                }
            }
        }
        store
    }

    /// Add or replace an account.
    pub fn insert_user(&self, user: User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        state.users.insert(*user.id(), user);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, &'static str> {
        self.state.lock().map_err(|_| POISONED)
    }
}

fn apply_draft(course: &mut Course, draft: &CourseDraft) {
    course.title = draft.title.clone();
    course.description = draft.description.clone();
    course.price = draft.price;
    course.category_id = draft.category_id;
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().map_err(UserPersistenceError::query)?;
        Ok(state.users.get(id).cloned())
    }

    async fn save_profile(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().map_err(UserPersistenceError::query)?;
        let stored = state
            .users
            .get_mut(user.id())
            .ok_or_else(|| UserPersistenceError::query(format!("user {} not found", user.id())))?;
        *stored = user.clone();
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let state = self.lock().map_err(CategoryRepositoryError::query)?;
        Ok(state.categories.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryRepositoryError> {
        let state = self.lock().map_err(CategoryRepositoryError::query)?;
        Ok(state.categories.get(&id).cloned())
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn create_with_lesson(&self, new: &NewCourse) -> Result<Course, CourseRepositoryError> {
        let mut state = self.lock().map_err(CourseRepositoryError::query)?;
        if !state.categories.contains_key(&new.course.category_id) {
            return Err(CourseRepositoryError::query(format!(
                "category {} does not exist",
                new.course.category_id
            )));
        }
        if !state.users.contains_key(&new.instructor_id) {
            return Err(CourseRepositoryError::query(format!(
                "user {} does not exist",
                new.instructor_id
            )));
        }

        let id = CourseId::new(
            next_id(&mut state.last_course_id).map_err(CourseRepositoryError::query)?,
        );
        let course = Course {
            id,
            title: new.course.title.clone(),
            description: new.course.description.clone(),
            price: new.course.price,
            category_id: new.course.category_id,
            instructor_id: new.instructor_id,
        };
        let lesson_id = LessonId::new(
            next_id(&mut state.last_lesson_id).map_err(CourseRepositoryError::query)?,
        );
        state.courses.insert(id, course.clone());
        state.lessons.push(Lesson {
            id: lesson_id,
            course_id: id,
            title: new.first_lesson.title.clone(),
            content: new.first_lesson.content.clone(),
        });
        state.ownership.insert((new.instructor_id, id));
        Ok(course)
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        let state = self.lock().map_err(CourseRepositoryError::query)?;
        Ok(state.courses.get(&id).cloned())
    }

    async fn update(
        &self,
        id: CourseId,
        draft: &CourseDraft,
    ) -> Result<Option<Course>, CourseRepositoryError> {
        let mut state = self.lock().map_err(CourseRepositoryError::query)?;
        if !state.categories.contains_key(&draft.category_id) {
            return Err(CourseRepositoryError::query(format!(
                "category {} does not exist",
                draft.category_id
            )));
        }
        Ok(state.courses.get_mut(&id).map(|course| {
            apply_draft(course, draft);
            course.clone()
        }))
    }

    async fn delete(&self, id: CourseId) -> Result<bool, CourseRepositoryError> {
        let mut state = self.lock().map_err(CourseRepositoryError::query)?;
        if state.courses.remove(&id).is_none() {
            return Ok(false);
        }
        state.lessons.retain(|lesson| lesson.course_id != id);
        state.feedbacks.retain(|feedback| feedback.course_id != id);
        state.ownership.retain(|(_, course_id)| *course_id != id);
        Ok(true)
    }

    async fn list_for_instructor(
        &self,
        instructor: &UserId,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.lock().map_err(CourseRepositoryError::query)?;
        Ok(state
            .courses
            .values()
            .filter(|course| state.ownership.contains(&(*instructor, course.id)))
            .cloned()
            .collect())
    }

    async fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Course>, CourseRepositoryError> {
        let state = self.lock().map_err(CourseRepositoryError::query)?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(state.courses.values().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self) -> Result<u64, CourseRepositoryError> {
        let state = self.lock().map_err(CourseRepositoryError::query)?;
        u64::try_from(state.courses.len())
            .map_err(|err| CourseRepositoryError::query(err.to_string()))
    }

    async fn lessons_for_course(&self, id: CourseId) -> Result<Vec<Lesson>, CourseRepositoryError> {
        let state = self.lock().map_err(CourseRepositoryError::query)?;
        Ok(state
            .lessons
            .iter()
            .filter(|lesson| lesson.course_id == id)
            .cloned()
            .collect())
    }

    async fn is_owned_by(
        &self,
        id: CourseId,
        instructor: &UserId,
    ) -> Result<bool, CourseRepositoryError> {
        let state = self.lock().map_err(CourseRepositoryError::query)?;
        Ok(state.ownership.contains(&(*instructor, id)))
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryStore {
    async fn insert(&self, new: &NewFeedback) -> Result<Feedback, FeedbackRepositoryError> {
        let mut state = self.lock().map_err(FeedbackRepositoryError::query)?;
        if !state.courses.contains_key(&new.course_id) {
            return Err(FeedbackRepositoryError::query(format!(
                "course {} does not exist",
                new.course_id
            )));
        }
        let id = next_id(&mut state.last_feedback_id).map_err(FeedbackRepositoryError::query)?;
        let feedback = Feedback {
            id: FeedbackId::new(id),
            course_id: new.course_id,
            user_id: new.user_id,
            comment: new.comment.clone(),
            rating: new.rating,
            created_at: Utc::now(),
        };
        state.feedbacks.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<FeedbackEntry>, FeedbackRepositoryError> {
        let state = self.lock().map_err(FeedbackRepositoryError::query)?;
        state
            .feedbacks
            .iter()
            .filter(|feedback| feedback.course_id == course)
            .map(|feedback| {
                let author = state
                    .users
                    .get(&feedback.user_id)
                    .map(|user| user.display_name().clone())
                    .ok_or_else(|| {
                        FeedbackRepositoryError::query(format!(
                            "author {} of feedback {} not found",
                            feedback.user_id,
                            feedback.id.get()
                        ))
                    })?;
                Ok(FeedbackEntry {
                    feedback: feedback.clone(),
                    author,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
