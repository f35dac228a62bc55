//! Port abstraction for the key-value counter store.
use async_trait::async_trait;

use crate::domain::CounterKey;

use super::define_port_error;

define_port_error! {
    /// Errors raised by counter cache adapters.
    pub enum CounterCacheError {
        /// No cache connection could be obtained.
        Connection { message: String } => "counter cache connection failed: {message}",
        /// The cache rejected or failed the command.
        Command { message: String } => "counter cache command failed: {message}",
    }
}

/// Atomic counters keyed by name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterCache: Send + Sync {
    /// Add one to the counter at `key` and return the new value.
    ///
    /// A missing key counts as zero, so the first increment yields `1`.
    /// Concurrent callers never observe the same result.
    async fn increment(&self, key: &CounterKey) -> Result<i64, CounterCacheError>;
}
