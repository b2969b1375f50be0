//! Keyed fetch cache with request deduplication.
//!
//! A fetch for a key holds that key's slot for its whole duration, so a
//! concurrent fetch of the same key waits and then reuses the fresh value
//! instead of issuing a second request. Values older than the dedupe
//! interval are fetched again. There is no background revalidation.

use std::{
    collections::HashMap,
    future::Future,
    hash::Hash,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

pub const DEFAULT_DEDUPE_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug)]
struct Entry<V> {
    fetched_at: Instant,
    value: V,
}

type Slot<V> = Arc<tokio::sync::Mutex<Option<Entry<V>>>>;

#[derive(Debug)]
pub struct QueryCache<K, V> {
    dedupe_interval: Duration,
    slots: Mutex<HashMap<K, Slot<V>>>,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new(dedupe_interval: Duration) -> Self {
        Self {
            dedupe_interval,
            slots: Mutex::new(HashMap::new()),
        }
    }

    fn slot(&self, key: &K) -> Slot<V> {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.entry(key.clone()).or_default().clone()
    }

    /// Returns the cached value for `key` when it is younger than the dedupe
    /// interval, otherwise runs `fetcher` and stores its result.
    ///
    /// Errors are returned as-is and leave the slot untouched.
    pub async fn fetch<F, Fut, E>(&self, key: K, fetcher: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let slot = self.slot(&key);
        let mut guard = slot.lock().await;

        if let Some(entry) = guard.as_ref()
            && entry.fetched_at.elapsed() < self.dedupe_interval
        {
            tracing::debug!("cache hit for {key:?}");
            return Ok(entry.value.clone());
        }

        let value = fetcher().await?;
        *guard = Some(Entry {
            fetched_at: Instant::now(),
            value: value.clone(),
        });
        Ok(value)
    }

    /// Forces the next fetch of `key` to hit the network.
    pub fn invalidate(&self, key: &K) {
        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        slots.remove(key);
    }
}
