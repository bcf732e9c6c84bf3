//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use course_market::Trace;
#[cfg(debug_assertions)]
use course_market::doc::ApiDoc;
use course_market::inbound::http::configure_api;
use course_market::inbound::http::health::{HealthState, live, ready};
use course_market::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .configure(configure_api(http_state.max_image_bytes));

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness flips once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when opening the upload directory or binding
/// the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config)?;
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use course_market::domain::TRACE_ID_HEADER;
    use std::net::{Ipv4Addr, SocketAddr};

    fn memory_deps(uploads: &tempfile::TempDir) -> AppDependencies {
        let config = ServerConfig::new(
            Key::generate(),
            false,
            SameSite::Lax,
            SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        )
        .with_uploads(uploads.path().to_path_buf(), 1024);
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).expect("http state"),
            key: config.key.clone(),
            cookie_secure: config.cookie_secure,
            same_site: config.same_site,
        }
    }

    #[actix_rt::test]
    async fn login_sets_a_private_session_cookie() {
        let uploads = tempfile::tempdir().expect("uploads");
        let app = test::init_service(build_app(memory_deps(&uploads))).await;
        let request = test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(serde_json::json!({ "username": "student", "password": "password" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(TRACE_ID_HEADER));
        let cookie = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[actix_rt::test]
    async fn health_checks_sit_outside_the_api_scope() {
        let uploads = tempfile::tempdir().expect("uploads");
        let deps = memory_deps(&uploads);
        let health = deps.health_state.clone();
        let app = test::init_service(build_app(deps)).await;

        let readiness_request = || test::TestRequest::get().uri("/health/ready").to_request();
        assert_eq!(
            test::call_service(&app, readiness_request()).await.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        health.mark_ready();
        assert_eq!(test::call_service(&app, readiness_request()).await.status(), StatusCode::OK);
    }
}
