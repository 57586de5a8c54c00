//! Response cache with TTL (Time-To-Live) support.
//!
//! Raw upstream payloads are memoized per request key so repeated tool calls
//! within the TTL do not hit the network. Entries are shared as `Arc<Value>`;
//! normalization only ever borrows them.
//!
//! The lock is never held across an upstream fetch. Two concurrent misses on
//! the same key may both fetch; the later insert wins and both callers get an
//! equivalent payload.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, trace};

/// Source of the current monotonic time.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Arc<Value>,
    inserted_at: Instant,
}

/// Memoization layer in front of the upstream source.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    enabled: bool,
    clock: Arc<dyn Clock>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}

impl ResponseCache {
    /// Default entry lifetime (60 minutes).
    pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

    /// Creates a cache on the system clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates a cache on the given clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            enabled: true,
            clock,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a cache that never stores anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(Duration::ZERO)
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.inserted_at) < self.ttl
    }

    /// Returns the cached payload for `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Option<Arc<Value>> {
        if !self.enabled {
            return None;
        }
        let now = self.clock.now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| self.is_fresh(entry, now))
            .map(|entry| Arc::clone(&entry.payload))
    }

    /// Stores a payload, replacing any previous entry for `key`.
    ///
    /// Expired entries are swept on the way in.
    pub async fn insert(&self, key: impl Into<String>, payload: Value) -> Arc<Value> {
        let payload = Arc::new(payload);
        if !self.enabled {
            return payload;
        }

        let key = key.into();
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        entries.retain(|k, entry| {
            let keep = self.is_fresh(entry, now);
            if !keep {
                trace!(key = %k, "Evicting expired cache entry");
            }
            keep
        });
        entries.insert(
            key.clone(),
            CacheEntry {
                payload: Arc::clone(&payload),
                inserted_at: now,
            },
        );
        debug!(key = %key, entries = entries.len(), "Inserted cache entry");
        payload
    }

    /// Returns the cached payload for `key`, or runs `fetch` and caches its
    /// result. Errors are not cached.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(hit) = self.get(key).await {
            debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        debug!(key = %key, enabled = self.enabled, "Cache miss");
        let payload = fetch().await?;
        Ok(self.insert(key, payload).await)
    }

    /// Removes all expired entries.
    pub async fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| self.is_fresh(entry, now));
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted = evicted, "Evicted expired cache entries");
        }
        evicted
    }

    /// Returns the number of stored entries, expired ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Clears all cache entries.
    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        debug!(count = count, "Cleared all cache entries");
    }
}
