//! In-memory `CounterCache`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::CounterKey;
use crate::domain::ports::{CounterCache, CounterCacheError};

/// Atomic counters keyed by name.
///
/// The map lock is held only to find or insert a key's counter; the increment
/// itself is a lock-free compare-and-swap.
#[derive(Debug, Default)]
pub struct InMemoryCounterCache {
    counters: Mutex<HashMap<CounterKey, Arc<AtomicI64>>>,
}

impl InMemoryCounterCache {
    /// Create a cache with every counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, key: &CounterKey) -> Result<Arc<AtomicI64>, CounterCacheError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|_| CounterCacheError::connection("counter map lock poisoned"))?;
        Ok(Arc::clone(counters.entry(key.clone()).or_default()))
    }
}

#[async_trait]
impl CounterCache for InMemoryCounterCache {
    async fn increment(&self, key: &CounterKey) -> Result<i64, CounterCacheError> {
        let counter = self.counter(key)?;
        counter
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |value| {
                value.checked_add(1)
            })
            .map(|previous| previous + 1)
            .map_err(|_| CounterCacheError::command("increment or decrement would overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn first_increment_starts_at_one() {
        let cache = InMemoryCounterCache::new();
        assert_eq!(cache.increment(&CounterKey::hits()).await, Ok(1));
        assert_eq!(cache.increment(&CounterKey::hits()).await, Ok(2));
    }

    #[rstest]
    #[tokio::test]
    async fn keys_count_independently() {
        let cache = InMemoryCounterCache::new();
        let other = CounterKey::new("visits").expect("valid key");

        cache.increment(&CounterKey::hits()).await.expect("increment");
        assert_eq!(cache.increment(&other).await, Ok(1));
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_increments_are_distinct() {
        const CALLERS: i64 = 64;
        let cache = Arc::new(InMemoryCounterCache::new());

        let tasks = (0..CALLERS).map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.increment(&CounterKey::hits()).await })
        });
        let mut values: Vec<i64> = join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.expect("task joins").expect("increment succeeds"))
            .collect();
        values.sort_unstable();

        assert_eq!(values, (1..=CALLERS).collect::<Vec<_>>());
    }

    #[rstest]
    #[tokio::test]
    async fn overflow_is_a_command_error() {
        let cache = InMemoryCounterCache::new();
        cache
            .counter(&CounterKey::hits())
            .expect("counter")
            .store(i64::MAX, Ordering::Release);

        assert!(matches!(
            cache.increment(&CounterKey::hits()).await,
            Err(CounterCacheError::Command { .. })
        ));
    }
}
