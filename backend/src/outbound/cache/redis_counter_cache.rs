//! `CounterCache` adapter issuing Redis `INCR`.

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError};
use tracing::debug;

use crate::domain::CounterKey;
use crate::domain::ports::{CounterCache, CounterCacheError};

use super::pool::{CachePool, CachePoolError};

/// Redis implementation of the [`CounterCache`] port.
#[derive(Clone)]
pub struct RedisCounterCache {
    pool: CachePool,
}

impl RedisCounterCache {
    /// Create a cache adapter over an existing pool.
    pub fn new(pool: CachePool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: CachePoolError) -> CounterCacheError {
    match error {
        CachePoolError::Build { message } | CachePoolError::Checkout { message } => {
            CounterCacheError::connection(message)
        }
    }
}

fn map_redis_error(error: RedisError) -> CounterCacheError {
    debug!(kind = ?error.kind(), %error, "redis command failed");
    if error.is_io_error() || error.is_connection_refusal() || error.is_connection_dropped() {
        CounterCacheError::connection(error.to_string())
    } else {
        CounterCacheError::command(error.to_string())
    }
}

#[async_trait]
impl CounterCache for RedisCounterCache {
    async fn increment(&self, key: &CounterKey) -> Result<i64, CounterCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let value: i64 = conn
            .incr(key.as_ref(), 1_i64)
            .await
            .map_err(map_redis_error)?;
        Ok(value)
    }
}
