//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use backend::inbound::http::users::CreateUserErrorMode;
use backend::outbound::cache::CachePool;
use backend::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
///
/// Without a database pool or cache pool the server falls back to the
/// in-memory adapters for that port.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cache_pool: Option<CachePool>,
    pub(crate) create_user_errors: CreateUserErrorMode,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            cache_pool: None,
            create_user_errors: CreateUserErrorMode::default(),
        }
    }

    /// Attach a database connection pool for the user repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach a Redis connection pool for the counter cache.
    #[must_use]
    pub fn with_cache_pool(mut self, pool: CachePool) -> Self {
        self.cache_pool = Some(pool);
        self
    }

    /// Select how create-user failures are reported.
    #[must_use]
    pub fn with_create_user_errors(mut self, mode: CreateUserErrorMode) -> Self {
        self.create_user_errors = mode;
        self
    }
}
