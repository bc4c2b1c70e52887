//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use talentlayer_backend::domain::AvatarFolder;
use talentlayer_backend::domain::ports::AvatarStore;
use talentlayer_backend::outbound::blob::DisabledAvatarStore;
use talentlayer_backend::outbound::persistence::DbPool;

const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 5 * 1024 * 1024;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) upload_limit_bytes: usize,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) avatar_store: Arc<dyn AvatarStore>,
    pub(crate) avatar_folder: AvatarFolder,
}

impl ServerConfig {
    /// Construct a configuration with in-memory storage and uploads
    /// disabled.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
            db_pool: None,
            avatar_store: Arc::new(DisabledAvatarStore),
            avatar_folder: AvatarFolder::for_namespace("talentlayer"),
        }
    }

    /// Attach a database connection pool; the Diesel repositories replace
    /// the in-memory ones.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use `store` for avatar uploads.
    #[must_use]
    pub fn with_avatar_store(mut self, store: Arc<dyn AvatarStore>) -> Self {
        self.avatar_store = store;
        self
    }

    #[must_use]
    pub fn with_avatar_folder(mut self, folder: AvatarFolder) -> Self {
        self.avatar_folder = folder;
        self
    }

    /// Cap request bodies at `limit` bytes.
    #[must_use]
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit_bytes = limit;
        self
    }
}
