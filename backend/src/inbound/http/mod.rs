//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod dto;
pub mod error;
pub mod health;
pub mod instructor;
pub mod session;
pub mod session_config;
pub mod state;
pub mod student;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Room left in a JSON body for the fields around a base64 image.
const JSON_ENVELOPE_BYTES: usize = 64 * 1024;

/// Largest JSON body that still fits an image of `max_image_bytes` once it
/// is base64 encoded.
pub const fn json_body_limit(max_image_bytes: usize) -> usize {
    max_image_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(JSON_ENVELOPE_BYTES)
}

/// Register every `/api/v1` handler together with the extractor error
/// handlers that keep rejected payloads in the JSON error envelope.
///
/// JSON bodies are capped by [`json_body_limit`] so that the image store,
/// not the extractor, rejects images up to `max_image_bytes`.
pub fn configure_api(max_image_bytes: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| api_routes(cfg, max_image_bytes)
}

fn api_routes(cfg: &mut web::ServiceConfig, max_image_bytes: usize) {
    let json = web::JsonConfig::default()
        .limit(json_body_limit(max_image_bytes))
        .error_handler(error::json_error_handler);
    cfg.app_data(json)
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(users::login)
        .service(instructor::get_profile)
        .service(instructor::update_profile)
        .service(instructor::list_courses)
        .service(instructor::course_form)
        .service(instructor::create_course)
        .service(instructor::get_course)
        .service(instructor::update_course)
        .service(instructor::delete_course)
        .service(student::get_profile)
        .service(student::update_profile_image)
        .service(student::list_courses)
        .service(student::course_detail)
        .service(student::enroll)
        .service(student::submit_feedback);
}
