//! Builders for the HTTP state from configured pools.

use std::sync::Arc;

use tracing::info;

use backend::domain::ports::{CounterCache, UserRepository};
use backend::inbound::http::state::HttpState;
use backend::outbound::cache::RedisCounterCache;
use backend::outbound::memory::{InMemoryCounterCache, InMemoryUserRepository};
use backend::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

fn build_user_repository(config: &ServerConfig) -> Arc<dyn UserRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselUserRepository::new(pool.clone())),
        None => {
            info!("no database pool configured; users are held in memory");
            Arc::new(InMemoryUserRepository::new())
        }
    }
}

fn build_counter_cache(config: &ServerConfig) -> Arc<dyn CounterCache> {
    match &config.cache_pool {
        Some(pool) => Arc::new(RedisCounterCache::new(pool.clone())),
        None => {
            info!("no cache pool configured; counters are held in memory");
            Arc::new(InMemoryCounterCache::new())
        }
    }
}

/// Wire the configured adapters into handler state.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    HttpState::new(build_user_repository(config), build_counter_cache(config))
        .with_create_user_errors(config.create_user_errors)
}
