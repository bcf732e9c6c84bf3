//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use course_market::outbound::persistence::DbPool;
use course_market::settings::DEFAULT_MAX_IMAGE_BYTES;
use pagination::PageSize;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) upload_dir: PathBuf,
    pub(crate) max_image_bytes: usize,
    pub(crate) page_size: PageSize,
}

impl ServerConfig {
    /// Construct a server configuration from session and binding settings.
    ///
    /// Uploads default to `./uploads` with the standard size limit and the
    /// in-memory store backs every repository until a pool is attached.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            upload_dir: PathBuf::from("uploads"),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            page_size: PageSize::default(),
        }
    }

    /// Attach a database connection pool for the Diesel adapters.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Store profile images under `upload_dir`, refusing files above `max_bytes`.
    #[must_use]
    pub fn with_uploads(mut self, upload_dir: PathBuf, max_bytes: usize) -> Self {
        self.upload_dir = upload_dir;
        self.max_image_bytes = max_bytes;
        self
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}
