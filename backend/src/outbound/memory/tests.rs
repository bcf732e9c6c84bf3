//! Behaviour of the in-memory store against the repository contracts.

use super::*;
use crate::domain::{CourseTitle, LessonDraft, Price, Rating};
use rstest::{fixture, rstest};

#[fixture]
fn store() -> InMemoryStore {
    InMemoryStore::seeded()
}

fn instructor() -> UserId {
    UserId::new(FIXTURE_INSTRUCTOR_ID).expect("fixture id")
}

fn student() -> UserId {
    UserId::new(FIXTURE_STUDENT_ID).expect("fixture id")
}

fn new_course(title: &str, category: i32) -> NewCourse {
    NewCourse {
        instructor_id: instructor(),
        course: CourseDraft {
            title: CourseTitle::new(title).expect("title"),
            description: Some("About".to_owned()),
            price: Price::parse("49.99").expect("price"),
            category_id: CategoryId::new(category),
        },
        first_lesson: LessonDraft {
            title: "Intro".to_owned(),
            content: "Welcome".to_owned(),
        },
    }
}

#[rstest]
#[tokio::test]
async fn seeded_store_has_categories_and_accounts(store: InMemoryStore) {
    let categories = CategoryRepository::list_all(&store).await.expect("categories");
    assert_eq!(categories.len(), SEED_CATEGORIES.len());
    let ada = UserRepository::find_by_id(&store, &instructor())
        .await
        .expect("lookup")
        .expect("instructor seeded");
    assert_eq!(ada.role(), Role::Instructor);
}

#[rstest]
#[tokio::test]
async fn creation_writes_course_lesson_and_owner(store: InMemoryStore) {
    let course = store
        .create_with_lesson(&new_course("Rust", 2))
        .await
        .expect("created");
    let lessons = store.lessons_for_course(course.id).await.expect("lessons");
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].title, "Intro");
    assert_eq!(lessons[0].content, "Welcome");
    assert!(store.is_owned_by(course.id, &instructor()).await.expect("owner"));
    assert!(!store.is_owned_by(course.id, &student()).await.expect("owner"));
}

#[rstest]
#[tokio::test]
async fn unknown_category_violates_the_foreign_key(store: InMemoryStore) {
    let result = store.create_with_lesson(&new_course("Rust", 42)).await;
    assert!(matches!(result, Err(CourseRepositoryError::Query { .. })));
    assert_eq!(store.count().await.expect("count"), 0);
}

#[rstest]
#[tokio::test]
async fn delete_cascades_to_dependants(store: InMemoryStore) {
    let course = store
        .create_with_lesson(&new_course("Rust", 1))
        .await
        .expect("created");
    store
        .insert(&NewFeedback {
            course_id: course.id,
            user_id: student(),
            comment: "Great".to_owned(),
            rating: Rating::new(5).expect("rating"),
        })
        .await
        .expect("feedback stored");

    assert!(store.delete(course.id).await.expect("delete"));
    assert!(!store.delete(course.id).await.expect("second delete"));
    assert!(store.lessons_for_course(course.id).await.expect("lessons").is_empty());
    assert!(store.list_for_course(course.id).await.expect("feedback").is_empty());
    assert!(!store.is_owned_by(course.id, &instructor()).await.expect("owner"));
}

#[rstest]
#[tokio::test]
async fn pages_follow_id_order(store: InMemoryStore) {
    for index in 0..8 {
        store
            .create_with_lesson(&new_course(&format!("Course {index}"), 1))
            .await
            .expect("created");
    }
    let page = store.list_page(6, 6).await.expect("page");
    let ids: Vec<i32> = page.iter().map(|course| course.id.get()).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[rstest]
#[tokio::test]
async fn feedback_lists_carry_author_names(store: InMemoryStore) {
    let course = store
        .create_with_lesson(&new_course("Rust", 1))
        .await
        .expect("created");
    for rating in [4, 2] {
        store
            .insert(&NewFeedback {
                course_id: course.id,
                user_id: student(),
                comment: String::new(),
                rating: Rating::new(rating).expect("rating"),
            })
            .await
            .expect("stored");
    }
    let entries = store.list_for_course(course.id).await.expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].author.as_ref(), "Sam Student");
    assert_eq!(entries[0].feedback.rating.get(), 4);
}

#[rstest]
#[tokio::test]
async fn feedback_for_missing_course_is_rejected(store: InMemoryStore) {
    let result = store
        .insert(&NewFeedback {
            course_id: CourseId::new(99),
            user_id: student(),
            comment: String::new(),
            rating: Rating::new(3).expect("rating"),
        })
        .await;
    assert!(matches!(result, Err(FeedbackRepositoryError::Query { .. })));
}

#[rstest]
#[case(0, Some(1))]
#[case(i32::MAX - 1, Some(i32::MAX))]
#[case(i32::MAX, None)]
fn identifiers_stop_at_the_column_maximum(#[case] last: i32, #[case] expected: Option<i32>) {
    let mut counter = last;
    assert_eq!(next_id(&mut counter).ok(), expected);
    assert_eq!(counter, expected.unwrap_or(last));
}

#[rstest]
#[tokio::test]
async fn exhausted_course_ids_are_a_query_error(store: InMemoryStore) {
    store.state.lock().expect("state").last_course_id = i32::MAX;
    let result = store.create_with_lesson(&new_course("Rust", 1)).await;
    assert!(matches!(result, Err(CourseRepositoryError::Query { .. })));
    assert_eq!(store.count().await.expect("count"), 0);
}
