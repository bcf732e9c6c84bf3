//! Builders for the HTTP handler state.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use course_market::domain::ports::FixtureLoginService;
use course_market::inbound::http::state::{HttpState, StateRepositories};
use course_market::outbound::image_store::FileSystemImageStore;
use course_market::outbound::memory::InMemoryStore;
use course_market::outbound::persistence::{
    DieselCategoryRepository, DieselCourseRepository, DieselFeedbackRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Assemble handler state over PostgreSQL when a pool is configured,
/// otherwise over a seeded in-memory store.
///
/// # Errors
/// Returns [`std::io::Error`] when the upload directory cannot be opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let images = Arc::new(FileSystemImageStore::open(
        &config.upload_dir,
        config.max_image_bytes,
    )?);
    info!(
        upload_dir = %config.upload_dir.display(),
        max_image_bytes = config.max_image_bytes,
        "image store ready"
    );
    let login = Arc::new(FixtureLoginService);

    let state = match &config.db_pool {
        Some(pool) => HttpState::from_repositories(
            StateRepositories {
                users: Arc::new(DieselUserRepository::new(pool.clone())),
                categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
                courses: Arc::new(DieselCourseRepository::new(pool.clone())),
                feedback: Arc::new(DieselFeedbackRepository::new(pool.clone())),
                images,
            },
            login,
            config.page_size,
            config.max_image_bytes,
        ),
        None => {
            warn!("no database configured; using the in-memory store");
            let store = Arc::new(InMemoryStore::seeded());
            HttpState::from_repositories(
                StateRepositories {
                    users: store.clone(),
                    categories: store.clone(),
                    courses: store.clone(),
                    feedback: store,
                    images,
                },
                login,
                config.page_size,
                config.max_image_bytes,
            )
        }
    };
    Ok(web::Data::new(state))
}
