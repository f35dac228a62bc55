//! Redis-backed counter cache.
//!
//! Connections come from a `bb8` pool managed by `bb8-redis`; each increment
//! checks out one multiplexed connection and issues a single `INCR`, which
//! Redis executes atomically.

mod pool;
mod redis_counter_cache;

pub use pool::{CachePool, CachePoolConfig, CachePoolError};
pub use redis_counter_cache::RedisCounterCache;
