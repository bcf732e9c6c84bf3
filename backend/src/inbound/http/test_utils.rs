//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use pagination::PageSize;
use tempfile::TempDir;

use crate::domain::ports::{CourseRepository, FixtureLoginService};
use crate::domain::{
    CategoryId, Course, CourseDraft, CourseTitle, LessonDraft, NewCourse, Price, UserId,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::dto::LoginRequest;
use crate::inbound::http::state::{HttpState, StateRepositories};
use crate::outbound::image_store::FileSystemImageStore;
use crate::outbound::memory::InMemoryStore;

/// Upload limit used by handler tests.
pub const TEST_MAX_IMAGE_BYTES: usize = 64 * 1024;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over a seeded in-memory store and a temporary upload root.
pub struct TestHarness {
    pub state: HttpState,
    pub store: InMemoryStore,
    pub uploads: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_limits(PageSize::default(), TEST_MAX_IMAGE_BYTES)
    }

    pub fn with_page_size(page_size: PageSize) -> Self {
        Self::with_limits(page_size, TEST_MAX_IMAGE_BYTES)
    }

    /// Harness whose image store and JSON body limit use `max_image_bytes`.
    pub fn with_max_image_bytes(max_image_bytes: usize) -> Self {
        Self::with_limits(PageSize::default(), max_image_bytes)
    }

    fn with_limits(page_size: PageSize, max_image_bytes: usize) -> Self {
        let uploads = tempfile::tempdir().expect("upload dir");
        let images = FileSystemImageStore::open(uploads.path(), max_image_bytes)
            .expect("image store");
        let store = InMemoryStore::seeded();
        let shared = Arc::new(store.clone());
        let state = HttpState::from_repositories(
            StateRepositories {
                users: shared.clone(),
                categories: shared.clone(),
                courses: shared.clone(),
                feedback: shared,
                images: Arc::new(images),
            },
            Arc::new(FixtureLoginService),
            page_size,
            max_image_bytes,
        );
        Self {
            state,
            store,
            uploads,
        }
    }
}

/// The full `/api/v1` surface behind a test session middleware.
pub fn api_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let max_image_bytes = state.max_image_bytes;
    App::new()
        .app_data(web::Data::new(state))
        .wrap(test_session_middleware())
        .service(web::scope("/api/v1").configure(configure_api(max_image_bytes)))
}

/// Log in as one of the fixture accounts and return the session cookie.
pub async fn login_cookie(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
) -> Cookie<'static> {
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: username.to_owned(),
            password: "password".to_owned(),
        })
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login as {username} failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Base64 of the smallest byte sequence the image store accepts as PNG.
pub fn png_base64() -> String {
    png_base64_of_len(12)
}

/// Base64 of a PNG-signed payload of exactly `len` bytes (at least 8).
pub fn png_base64_of_len(len: usize) -> String {
    use base64::Engine as _;
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.resize(len.max(bytes.len()), 0);
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Insert a course owned by `owner` straight into the store.
pub async fn seed_course(store: &InMemoryStore, owner: UserId, title: &str) -> Course {
    let course = NewCourse {
        instructor_id: owner,
        course: CourseDraft {
            title: CourseTitle::new(title).expect("title"),
            description: None,
            price: Price::from_cents(1_999).expect("price"),
            category_id: CategoryId::new(1),
        },
        first_lesson: LessonDraft {
            title: "Intro".to_owned(),
            content: "Welcome".to_owned(),
        },
    };
    store.create_with_lesson(&course).await.expect("seed course")
}
