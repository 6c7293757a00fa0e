//! Process-local cache backend on moka.
//!
//! Each entry carries the ttl it was stored with; moka's housekeeping drops
//! entries once that ttl has elapsed, whether or not the key is read again.

use super::CacheBackend;
use crate::core::config::MAX_CACHE_TTL_SECS;
use moka::sync::Cache;
use moka::Expiry;
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory [`CacheBackend`] with a per-entry time to live.
#[derive(Clone)]
pub struct MemoryCache {
    cache: Cache<String, Entry>,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCache {
    /// Longest lifetime an entry is kept for; longer ttls are clamped.
    pub const MAX_TTL: Duration = Duration::from_secs(MAX_CACHE_TTL_SECS);

    pub fn new() -> Self {
        let cache = Cache::builder().expire_after(EntryExpiry).build();
        Self { cache }
    }

    /// Number of live entries. Runs pending housekeeping first, so expired
    /// entries are reclaimed before counting.
    pub fn len(&self) -> usize {
        self.cache.run_pending_tasks();
        self.cache.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.cache.get(key).map(|entry| entry.value)
    }

    fn set(&self, key: &str, value: String, ttl: Duration) {
        if ttl.is_zero() {
            self.cache.invalidate(key);
            return;
        }
        let ttl = ttl.min(Self::MAX_TTL);
        self.cache.insert(key.to_string(), Entry { value, ttl });
    }

    fn delete(&self, key: &str) -> bool {
        self.cache.remove(key).is_some()
    }

    fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }
}

impl fmt::Debug for MemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryCache")
            .field("entry_count", &self.cache.entry_count())
            .finish()
    }
}
