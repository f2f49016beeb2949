use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::{debug, trace};

use super::key::{QueryKey, Scope};
use crate::error::Result;

type Value = Arc<dyn Any + Send + Sync>;

#[derive(Clone)]
struct CacheEntry {
    value: Value,
    fetched_at: Instant,
    stale_time: Duration,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.stale_time
    }
}

/// Invalidation counters. A fetch only caches its result if none of the
/// counters covering its key moved while it was running.
#[derive(Default)]
struct Generations {
    all: u64,
    scopes: HashMap<Scope, u64>,
    keys: HashMap<QueryKey, u64>,
}

impl Generations {
    fn of(&self, key: &QueryKey) -> (u64, u64, u64) {
        (
            self.all,
            self.scopes.get(&key.scope()).copied().unwrap_or_default(),
            self.keys.get(key).copied().unwrap_or_default(),
        )
    }
}

/// Keyed store of query results with per-entry staleness windows.
///
/// Stale entries are dropped on access. When the cache is full the oldest
/// entry is evicted. Concurrent fetches of the same key share one request.
/// A result whose key was invalidated while it was being fetched is
/// returned to its caller but not cached.
pub struct QueryCache {
    capacity: usize,
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
    inflight: Mutex<HashMap<QueryKey, Arc<Mutex<()>>>>,
    generations: Mutex<Generations>,
}

impl QueryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
            inflight: Mutex::new(HashMap::new()),
            generations: Mutex::new(Generations::default()),
        }
    }

    /// A fresh cached value for `key`, if there is one.
    pub async fn get<T: Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.is_fresh());
        entries
            .get(key)
            .and_then(|e| Arc::clone(&e.value).downcast::<T>().ok())
    }

    pub async fn insert<T: Any + Send + Sync>(
        &self,
        key: QueryKey,
        value: Arc<T>,
        stale_time: Duration,
    ) {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.is_fresh());
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            if let Some(victim) = entries
                .iter()
                .min_by_key(|(_, e)| e.fetched_at)
                .map(|(k, _)| k.clone())
            {
                trace!(key = %victim, "evicting oldest entry");
                entries.remove(&victim);
            }
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                stale_time,
            },
        );
    }

    /// Return the cached value for `key` or run `fetch` and cache its result.
    ///
    /// Errors are returned to every waiting caller's own fetch and never cached.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, stale_time: Duration, fetch: F) -> Result<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get::<T>(&key).await {
            trace!(%key, "cache hit");
            return Ok(hit);
        }

        let lock = {
            let mut inflight = self.inflight.lock().await;
            Arc::clone(
                inflight
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        let result = {
            let _turn = lock.lock().await;
            // Another caller may have filled the entry while we waited.
            match self.get::<T>(&key).await {
                Some(hit) => Ok(hit),
                None => {
                    debug!(%key, "cache miss, fetching");
                    let started = self.generations.lock().await.of(&key);
                    match fetch().await {
                        Ok(value) => {
                            let value = Arc::new(value);
                            let generations = self.generations.lock().await;
                            if generations.of(&key) == started {
                                self.insert(key.clone(), Arc::clone(&value), stale_time)
                                    .await;
                            } else {
                                debug!(%key, "invalidated while fetching, not caching");
                            }
                            Ok(value)
                        }
                        Err(e) => Err(e),
                    }
                }
            }
        };

        let mut inflight = self.inflight.lock().await;
        if Arc::strong_count(&lock) <= 2 {
            inflight.remove(&key);
        }
        result
    }

    pub async fn invalidate(&self, key: &QueryKey) {
        let mut generations = self.generations.lock().await;
        *generations.keys.entry(key.clone()).or_default() += 1;
        if self.entries.lock().await.remove(key).is_some() {
            debug!(%key, "invalidated");
        }
    }

    /// Drop every entry belonging to `scope`, including results still being fetched.
    pub async fn invalidate_scope(&self, scope: Scope) {
        let mut generations = self.generations.lock().await;
        *generations.scopes.entry(scope).or_default() += 1;
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|k, _| k.scope() != scope);
        debug!(%scope, removed = before - entries.len(), "invalidated scope");
    }

    pub async fn clear(&self) {
        let mut generations = self.generations.lock().await;
        generations.all += 1;
        self.entries.lock().await.clear();
    }

    /// Number of fresh entries.
    pub async fn len(&self) -> usize {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, e| e.is_fresh());
        entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
