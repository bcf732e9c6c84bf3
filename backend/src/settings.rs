//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from the command line, a configuration file or an
//! environment variable prefixed with `COURSE_MARKET_`; absent values fall
//! back to development defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use pagination::{PageSize, PageSizeError};
use serde::Deserialize;

use crate::inbound::http::session_config::SessionInputs;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);
const DEFAULT_UPLOAD_DIR: &str = "uploads";
/// Profile images up to 2 MiB are accepted by default.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_SAME_SITE: &str = "lax";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Configuration values for the HTTP server and its adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COURSE_MARKET")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Directory receiving uploaded profile images.
    pub upload_dir: Option<PathBuf>,
    /// Largest accepted profile image in bytes.
    pub max_image_bytes: Option<usize>,
    /// Courses per catalogue page.
    pub page_size: Option<u32>,
    /// File holding the session signing and encryption key.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub session_cookie_secure: bool,
    /// `SameSite` policy for the session cookie: `lax`, `strict` or `none`.
    pub session_same_site: Option<String>,
    /// Permit a generated session key in release builds.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
}

impl AppSettings {
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Pool settings when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref().map(str::trim)?;
        if url.is_empty() {
            return None;
        }
        Some(
            PoolConfig::new(url)
                .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
                )),
        )
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_DIR))
    }

    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes.unwrap_or(DEFAULT_MAX_IMAGE_BYTES)
    }

    /// Catalogue page size; zero is rejected.
    pub fn page_size(&self) -> Result<PageSize, PageSizeError> {
        self.page_size
            .map_or_else(|| Ok(PageSize::default()), PageSize::new)
    }

    /// Raw session settings for [`session_settings`](crate::inbound::http::session_config::session_settings).
    pub fn session_inputs(&self) -> SessionInputs {
        SessionInputs {
            key_file: self
                .session_key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE)),
            cookie_secure: self.session_cookie_secure,
            same_site: self
                .session_same_site
                .clone()
                .unwrap_or_else(|| DEFAULT_SAME_SITE.to_owned()),
            allow_ephemeral: self.session_allow_ephemeral,
        }
    }
}
