//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use ubuntucycle::domain::ports::ImageHost;
use ubuntucycle::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) image_host: Option<Arc<dyn ImageHost>>,
    pub(crate) upload_limit_bytes: usize,
}

impl ServerConfig {
    /// Configuration with an in-memory store and no image host.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, upload_limit_bytes: usize) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            image_host: None,
            upload_limit_bytes,
        }
    }

    /// Attach a database connection pool for the item store.
    ///
    /// Without one the server keeps items in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach an image host for admin uploads.
    #[must_use]
    pub fn with_image_host(mut self, image_host: Arc<dyn ImageHost>) -> Self {
        self.image_host = Some(image_host);
        self
    }
}
