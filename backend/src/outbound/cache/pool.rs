//! Connection pool for the Redis cache.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

/// Errors raised while building or using the cache pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CachePoolError {
    /// The pool (or its connection manager) could not be built.
    #[error("failed to build cache pool: {message}")]
    Build { message: String },

    /// No connection could be checked out within the timeout.
    #[error("failed to get connection from cache pool: {message}")]
    Checkout { message: String },
}

impl CachePoolError {
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }
}

/// Configuration for the Redis connection pool.
///
/// # Example
///
/// ```
/// use backend::outbound::cache::CachePoolConfig;
///
/// let config = CachePoolConfig::from_host("redis", 6379);
/// assert_eq!(config.redis_url(), "redis://redis:6379/");
/// ```
#[derive(Debug, Clone)]
pub struct CachePoolConfig {
    redis_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl CachePoolConfig {
    /// Create a configuration for an explicit `redis://` URL.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 10,
            connection_timeout: Duration::from_secs(30),
        }
    }

    /// Create a configuration targeting database 0 on `host:port`.
    pub fn from_host(host: &str, port: u16) -> Self {
        Self::new(format!("redis://{host}:{port}/"))
    }

    /// Set the maximum number of pooled connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the checkout timeout.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// URL the pool connects to.
    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }
}

/// Shared handle to the Redis connection pool.
#[derive(Clone)]
pub struct CachePool {
    inner: Pool<RedisConnectionManager>,
}

impl CachePool {
    /// Build the pool. Connections open lazily on first checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CachePoolError::Build`] when the URL cannot be parsed or the
    /// pool cannot be constructed.
    pub async fn new(config: CachePoolConfig) -> Result<Self, CachePoolError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| CachePoolError::build(err.to_string()))?;
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| CachePoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection for one command.
    ///
    /// # Errors
    ///
    /// Returns [`CachePoolError::Checkout`] when the server is unreachable or
    /// the checkout times out.
    pub async fn get(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, CachePoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| CachePoolError::checkout(err.to_string()))
    }
}
