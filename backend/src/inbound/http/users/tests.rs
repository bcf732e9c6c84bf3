//! Tests for the login handler.

use super::*;
use crate::domain::ports::{FIXTURE_INSTRUCTOR_ID, FIXTURE_STUDENT_ID};
use crate::inbound::http::test_utils::{TestHarness, api_app};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::Value;

async fn post_login(username: &str, password: &str) -> actix_web::dev::ServiceResponse {
    let harness = TestHarness::new();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(&LoginRequest {
            username: username.into(),
            password: password.into(),
        })
        .to_request();
    actix_test::call_service(&app, request).await
}

#[rstest]
#[case("", "password", "username", "empty_username")]
#[case("instructor", "", "password", "empty_password")]
#[actix_web::test]
async fn blank_credentials_are_field_errors(
    #[case] username: &str,
    #[case] password: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let response = post_login(username, password).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], Value::from("invalid_request"));
    assert_eq!(value["details"]["field"], Value::from(field));
    assert_eq!(value["details"]["code"], Value::from(code));
}

#[actix_web::test]
async fn wrong_password_is_unauthorised_without_a_cookie() {
    let response = post_login("student", "nope").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(
        response
            .response()
            .cookies()
            .all(|cookie| cookie.name() != "session")
    );
}

#[rstest]
#[case("instructor", FIXTURE_INSTRUCTOR_ID, "instructor")]
#[case("student", FIXTURE_STUDENT_ID, "student")]
#[actix_web::test]
async fn fixture_accounts_receive_a_session(
    #[case] username: &str,
    #[case] user_id: &str,
    #[case] role: &str,
) {
    let response = post_login(username, "password").await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["userId"], Value::from(user_id));
    assert_eq!(value["role"], Value::from(role));
}

#[actix_web::test]
async fn malformed_json_uses_the_error_envelope() {
    let harness = TestHarness::new();
    let app = actix_test::init_service(api_app(harness.state)).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/v1/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"username\":")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value = actix_test::read_body_json(response).await;
    assert_eq!(value["code"], Value::from("invalid_request"));
}
