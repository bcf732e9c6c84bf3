//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use course_market::inbound::http::health::HealthState;
use course_market::inbound::http::session_config::{BuildMode, session_settings};
use course_market::outbound::persistence::{DbPool, apply_migrations};
use course_market::settings::AppSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let session = session_settings(
        &settings.session_inputs(),
        BuildMode::from_debug_assertions(),
    )
    .wrap_err("invalid session configuration")?;
    let page_size = settings.page_size().wrap_err("invalid page size")?;

    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
    )
    .with_uploads(settings.upload_dir(), settings.max_image_bytes())
    .with_page_size(page_size);

    if let Some(pool_config) = settings.pool_config() {
        let database_url = pool_config.database_url().to_owned();
        let applied = tokio::task::spawn_blocking(move || apply_migrations(&database_url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("failed to apply migrations")?;
        info!(applied, "database schema up to date");
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to start server on {bind_addr}"))?;
    info!(%bind_addr, "listening");
    server.await.wrap_err("server terminated")?;
    Ok(())
}
