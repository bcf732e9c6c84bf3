//! Tests for instructor HTTP handlers.

use super::*;
use crate::domain::UserId;
use crate::domain::ports::{CourseRepository, FIXTURE_INSTRUCTOR_ID};
use crate::inbound::http::test_utils::{
    TestHarness, api_app, login_cookie, png_base64, seed_course,
};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn course_body() -> Value {
    json!({
        "title": "Rust for Rustaceans",
        "description": "Idiomatic systems programming",
        "price": "49.99",
        "categoryId": 2,
        "lessonTitle": "Intro",
        "lessonContent": "Welcome"
    })
}

#[rstest]
#[case("/api/v1/instructor/profile")]
#[case("/api/v1/instructor/courses")]
#[case("/api/v1/instructor/courses/form")]
#[actix_web::test]
async fn instructor_routes_require_a_session(#[case] uri: &str) {
    let app = actix_test::init_service(api_app(TestHarness::new().state)).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/api/v1/instructor/profile")]
#[case("/api/v1/instructor/courses")]
#[actix_web::test]
async fn students_are_forbidden_from_instructor_routes(#[case] uri: &str) {
    let app = actix_test::init_service(api_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "student").await;
    let request = actix_test::TestRequest::get()
        .uri(uri)
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn creating_a_course_returns_it_and_lists_it() {
    let harness = TestHarness::new();
    let store = harness.store.clone();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/instructor/courses")
        .cookie(cookie.clone())
        .set_json(course_body())
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = actix_test::read_body_json(response).await;
    assert_eq!(created["title"], Value::from("Rust for Rustaceans"));
    assert_eq!(created["price"], Value::from("49.99"));
    assert_eq!(created["categoryId"], Value::from(2));
    assert_eq!(created["instructorId"], Value::from(FIXTURE_INSTRUCTOR_ID));

    let id = created["id"].as_i64().and_then(|id| i32::try_from(id).ok()).expect("id");
    let lessons = store
        .lessons_for_course(CourseId::new(id))
        .await
        .expect("lessons");
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0].title, "Intro");
    assert_eq!(lessons[0].content, "Welcome");

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/instructor/courses")
        .cookie(cookie)
        .to_request();
    let listed: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn invalid_course_fields_are_reported_together() {
    let app = actix_test::init_service(api_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/instructor/courses")
        .cookie(cookie)
        .set_json(json!({ "title": " ", "price": "-1", "categoryId": 0 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    let fields: Vec<&str> = value["details"]["fields"]
        .as_array()
        .expect("fields")
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"price"));
    assert!(fields.contains(&"categoryId"));
    assert_eq!(
        value["details"]["categories"].as_array().map(Vec::len),
        Some(5)
    );
}

#[actix_web::test]
async fn overlong_lesson_titles_are_a_form_error() {
    let harness = TestHarness::new();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let mut body = course_body();
    body["lessonTitle"] = Value::from("x".repeat(201));
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/instructor/courses")
        .cookie(cookie)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["fields"][0]["field"], Value::from("lessonTitle"));
    assert_eq!(
        value["details"]["categories"].as_array().map(Vec::len),
        Some(5)
    );
    assert_eq!(harness.store.count().await.expect("count"), 0);
}

#[actix_web::test]
async fn course_form_lists_categories() {
    let app = actix_test::init_service(api_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/instructor/courses/form")
        .cookie(cookie)
        .to_request();
    let value: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(value["categories"].as_array().map(Vec::len), Some(5));
}

#[actix_web::test]
async fn updating_an_owned_course_overwrites_it() {
    let harness = TestHarness::new();
    let owner = UserId::new(FIXTURE_INSTRUCTOR_ID).expect("owner");
    let course = seed_course(&harness.store, owner, "Old title").await;
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;

    let request = actix_test::TestRequest::put()
        .uri(&format!("/api/v1/instructor/courses/{}", course.id.get()))
        .cookie(cookie)
        .set_json(json!({ "title": "New title", "price": 10, "categoryId": 3 }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["title"], Value::from("New title"));
    assert_eq!(value["price"], Value::from("10.00"));
    assert_eq!(value["categoryId"], Value::from(3));
}

#[actix_web::test]
async fn another_instructors_course_is_forbidden() {
    let harness = TestHarness::new();
    let course = seed_course(&harness.store, UserId::random(), "Not yours").await;
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let uri = format!("/api/v1/instructor/courses/{}", course.id.get());

    let update = actix_test::TestRequest::put()
        .uri(&uri)
        .cookie(cookie.clone())
        .set_json(json!({ "title": "Mine now", "price": "1", "categoryId": 1 }))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, update).await.status(),
        StatusCode::FORBIDDEN
    );

    let delete = actix_test::TestRequest::delete()
        .uri(&uri)
        .cookie(cookie)
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, delete).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn deleting_is_idempotent() {
    let harness = TestHarness::new();
    let owner = UserId::new(FIXTURE_INSTRUCTOR_ID).expect("owner");
    let course = seed_course(&harness.store, owner, "Short lived").await;
    let store = harness.store.clone();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let uri = format!("/api/v1/instructor/courses/{}", course.id.get());

    for _ in 0..2 {
        let request = actix_test::TestRequest::delete()
            .uri(&uri)
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, request).await.status(),
            StatusCode::NO_CONTENT
        );
    }
    assert!(store.find_by_id(course.id).await.expect("lookup").is_none());
}

#[actix_web::test]
async fn missing_courses_are_not_found_for_edit() {
    let app = actix_test::init_service(api_app(TestHarness::new().state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/instructor/courses/4040")
        .cookie(cookie)
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn profile_update_keeps_description_when_only_an_image_is_sent() {
    let harness = TestHarness::new();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/instructor/profile")
        .cookie(cookie.clone())
        .set_json(json!({ "description": "Teaches Rust" }))
        .to_request();
    let value: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(value["profile"]["description"], Value::from("Teaches Rust"));

    let request = actix_test::TestRequest::put()
        .uri("/api/v1/instructor/profile")
        .cookie(cookie)
        .set_json(json!({
            "profileImage": {
                "fileName": "me.png",
                "contentType": "image/png",
                "data": png_base64()
            }
        }))
        .to_request();
    let value: Value = actix_test::call_and_read_body_json(&app, request).await;
    assert_eq!(value["profile"]["description"], Value::from("Teaches Rust"));
    let image = value["profile"]["imageUrl"].as_str().expect("image url");
    assert!(image.starts_with("/uploads/profiles/"));
    assert!(image.ends_with(".png"));
}

#[actix_web::test]
async fn rejected_images_name_the_profile_image_field() {
    let harness = TestHarness::new();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let cookie = login_cookie(&app, "instructor").await;
    let request = actix_test::TestRequest::put()
        .uri("/api/v1/instructor/profile")
        .cookie(cookie)
        .set_json(json!({
            "profileImage": {
                "fileName": "notes.txt",
                "contentType": "text/plain",
                "data": "aGVsbG8="
            }
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["details"]["field"], Value::from("profileImage"));
}
