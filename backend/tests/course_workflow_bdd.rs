//! Behaviour tests for the course lifecycle.
//!
//! The scenarios drive the domain services over the in-memory store: an
//! instructor creates and deletes courses, students page through the
//! catalogue and rate courses.

use std::cell::RefCell;
use std::sync::Arc;

use course_market::domain::ports::{
    CourseCatalogueQuery, CourseRepository, FIXTURE_INSTRUCTOR_ID, FIXTURE_STUDENT_ID,
    FeedbackCommand, FeedbackRepository, FeedbackRequest, InstructorCoursesCommand,
};
use course_market::domain::{
    CategoryId, Course, CourseCatalogueService, CourseDraft, CourseFields, CourseId, CourseTitle,
    Error, ErrorCode, FeedbackService, FeedbackSubmission, Identity, InstructorCourseService,
    LessonDraft, NewCourse, Price, Role, UserId,
};
use course_market::outbound::memory::InMemoryStore;
use pagination::Page;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

type Instructor = InstructorCourseService<InMemoryStore, InMemoryStore>;
type Catalogue = CourseCatalogueService<InMemoryStore, InMemoryStore, InMemoryStore>;
type Feedback = FeedbackService<InMemoryStore, InMemoryStore>;

struct CourseWorld {
    runtime: Runtime,
    store: Arc<InMemoryStore>,
    instructor: Instructor,
    catalogue: Catalogue,
    feedback: Feedback,
    newest: RefCell<Option<Course>>,
    outcome: RefCell<Option<Result<(), Error>>>,
    page: RefCell<Option<Page<Course>>>,
    submission: RefCell<Option<FeedbackSubmission>>,
}

impl CourseWorld {
    fn new() -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("create runtime");
        let store = Arc::new(InMemoryStore::seeded());
        Self {
            runtime,
            instructor: InstructorCourseService::new(store.clone(), store.clone()),
            catalogue: CourseCatalogueService::new(store.clone(), store.clone(), store.clone()),
            feedback: FeedbackService::new(store.clone(), store.clone()),
            store,
            newest: RefCell::new(None),
            outcome: RefCell::new(None),
            page: RefCell::new(None),
            submission: RefCell::new(None),
        }
    }

    fn seed_course(&self, owner: UserId, n: usize) {
        let course = NewCourse {
            instructor_id: owner,
            course: CourseDraft {
                title: CourseTitle::new(&format!("Course {n}")).expect("title"),
                description: None,
                price: Price::from_cents(1_000).expect("price"),
                category_id: CategoryId::new(1),
            },
            first_lesson: LessonDraft::default(),
        };
        let created = self
            .runtime
            .block_on(self.store.create_with_lesson(&course))
            .expect("seed course");
        *self.newest.borrow_mut() = Some(created);
    }

    fn newest_id(&self) -> CourseId {
        self.newest.borrow().as_ref().expect("a course exists").id
    }

    fn record(&self, result: Result<(), Error>) {
        *self.outcome.borrow_mut() = Some(result);
    }

    fn error(&self) -> Error {
        match self.outcome.borrow().as_ref().expect("an outcome") {
            Ok(()) => panic!("expected the request to fail"),
            Err(error) => error.clone(),
        }
    }
}

fn instructor() -> Identity {
    Identity::new(
        UserId::new(FIXTURE_INSTRUCTOR_ID).expect("instructor id"),
        Role::Instructor,
    )
}

fn student() -> Identity {
    Identity::new(
        UserId::new(FIXTURE_STUDENT_ID).expect("student id"),
        Role::Student,
    )
}

#[fixture]
fn world() -> CourseWorld {
    CourseWorld::new()
}

#[given("an empty catalogue")]
fn an_empty_catalogue(world: &CourseWorld) {
    let total = world.runtime.block_on(world.store.count()).expect("count");
    assert_eq!(total, 0);
}

#[given("a catalogue with {count} courses")]
fn a_catalogue_with_courses(world: &CourseWorld, count: usize) {
    let owner = *instructor().user_id();
    for n in 0..count {
        world.seed_course(owner, n);
    }
}

#[given("a course owned by another instructor")]
fn a_course_owned_by_another_instructor(world: &CourseWorld) {
    world.seed_course(UserId::random(), 0);
}

#[when("the instructor creates a course priced {price} in category {category} with lesson {lesson}")]
fn the_instructor_creates_a_course(world: &CourseWorld, price: String, category: i64, lesson: String) {
    let fields = CourseFields {
        title: Some("Rust for Rustaceans".to_owned()),
        description: None,
        price: Some(price),
        category_id: Some(category),
        lesson_title: Some(lesson),
        lesson_content: Some("Welcome".to_owned()),
    };
    let result = world
        .runtime
        .block_on(world.instructor.create_course(&instructor(), fields));
    match result {
        Ok(course) => {
            *world.newest.borrow_mut() = Some(course);
            world.record(Ok(()));
        }
        Err(error) => world.record(Err(error)),
    }
}

#[when("the instructor submits a course without a title or price")]
fn the_instructor_submits_an_incomplete_course(world: &CourseWorld) {
    let fields = CourseFields {
        category_id: Some(1),
        ..CourseFields::default()
    };
    let result = world
        .runtime
        .block_on(world.instructor.create_course(&instructor(), fields))
        .map(drop);
    world.record(result);
}

#[when("the instructor deletes the newest course")]
fn the_instructor_deletes_the_newest_course(world: &CourseWorld) {
    let id = world.newest_id();
    let result = world
        .runtime
        .block_on(world.instructor.delete_course(&instructor(), id));
    world.record(result);
}

#[when("the instructor deletes course {id}")]
fn the_instructor_deletes_course(world: &CourseWorld, id: i32) {
    let result = world
        .runtime
        .block_on(world.instructor.delete_course(&instructor(), CourseId::new(id)));
    world.record(result);
}

#[when("a student opens catalogue page {page}")]
fn a_student_opens_catalogue_page(world: &CourseWorld, page: u32) {
    let listed = world
        .runtime
        .block_on(world.catalogue.list_courses(page))
        .expect("catalogue page");
    *world.page.borrow_mut() = Some(listed);
}

#[when("a student rates the newest course {rating}")]
fn a_student_rates_the_newest_course(world: &CourseWorld, rating: i64) {
    let request = FeedbackRequest {
        course_id: world.newest_id(),
        comment: "Thoughts".to_owned(),
        rating,
    };
    let submission = world
        .runtime
        .block_on(world.feedback.add_feedback(&student(), request))
        .expect("feedback submission");
    *world.submission.borrow_mut() = Some(submission);
}

#[then("the catalogue holds {count} courses")]
fn the_catalogue_holds_courses(world: &CourseWorld, count: u64) {
    let total = world.runtime.block_on(world.store.count()).expect("count");
    assert_eq!(total, count);
}

#[then("the newest course has a lesson titled {title}")]
fn the_newest_course_has_a_lesson(world: &CourseWorld, title: String) {
    let lessons = world
        .runtime
        .block_on(world.store.lessons_for_course(world.newest_id()))
        .expect("lessons");
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].title, title);
    assert_eq!(lessons[0].content, "Welcome");
}

#[then("the course is rejected naming title and price")]
fn the_course_is_rejected(world: &CourseWorld) {
    let error = world.error();
    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let fields: Vec<String> = error
        .details()
        .and_then(|details| details.get("fields"))
        .and_then(|fields| fields.as_array())
        .expect("field list")
        .iter()
        .filter_map(|entry| entry.get("field").and_then(|field| field.as_str()))
        .map(str::to_owned)
        .collect();
    assert_eq!(fields, ["title", "price"]);
}

#[then("the page shows {count} courses")]
fn the_page_shows_courses(world: &CourseWorld, count: usize) {
    let page = world.page.borrow();
    assert_eq!(page.as_ref().expect("page").items().len(), count);
}

#[then("the catalogue reports {pages} pages")]
fn the_catalogue_reports_pages(world: &CourseWorld, pages: u64) {
    let page = world.page.borrow();
    assert_eq!(page.as_ref().expect("page").total_pages(), pages);
}

#[then("the feedback is rejected")]
fn the_feedback_is_rejected(world: &CourseWorld) {
    match world.submission.borrow().as_ref().expect("submission") {
        FeedbackSubmission::Rejected { error, current } => {
            assert_eq!(error.code(), ErrorCode::InvalidRequest);
            assert_eq!(current.course.id, world.newest_id());
        }
        FeedbackSubmission::Accepted(_) => panic!("expected a rejection"),
    }
}

#[then("the feedback is accepted")]
fn the_feedback_is_accepted(world: &CourseWorld) {
    match world.submission.borrow().as_ref().expect("submission") {
        FeedbackSubmission::Accepted(view) => {
            assert_eq!(view.summary.count(), 1);
            assert_eq!(view.feedbacks[0].author.to_string(), "Sam Student");
        }
        FeedbackSubmission::Rejected { error, .. } => panic!("unexpected rejection: {error:?}"),
    }
}

#[then("the newest course has {count} feedback entries")]
fn the_newest_course_has_feedback(world: &CourseWorld, count: usize) {
    let entries = world
        .runtime
        .block_on(world.store.list_for_course(world.newest_id()))
        .expect("feedback");
    assert_eq!(entries.len(), count);
}

#[then("the request is forbidden")]
fn the_request_is_forbidden(world: &CourseWorld) {
    assert_eq!(world.error().code(), ErrorCode::Forbidden);
}

#[then("the request succeeds")]
fn the_request_succeeds(world: &CourseWorld) {
    let outcome = world.outcome.borrow();
    assert!(matches!(outcome.as_ref(), Some(Ok(()))), "{outcome:?}");
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Instructor creates a course with a first lesson"
)]
fn instructor_creates_a_course(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Instructor form errors are reported together"
)]
fn instructor_form_errors_are_reported_together(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Students page through the catalogue"
)]
fn students_page_through_the_catalogue(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Pages past the end are empty"
)]
fn pages_past_the_end_are_empty(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Out-of-range ratings are rejected"
)]
fn out_of_range_ratings_are_rejected(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Valid ratings are stored with their author"
)]
fn valid_ratings_are_stored(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Instructors cannot delete courses they do not own"
)]
fn instructors_cannot_delete_foreign_courses(world: CourseWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/course_workflow.feature",
    name = "Deleting a missing course succeeds"
)]
fn deleting_a_missing_course_succeeds(world: CourseWorld) {
    let _ = world;
}
