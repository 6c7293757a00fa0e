//! Result caching: key derivation, backend abstraction, and the caching client.

pub mod cached_client;
pub mod memory;

pub use cached_client::CachedClient;
pub use memory::MemoryCache;

use crate::core::config::DEFAULT_CACHE_ALIAS;
use crate::core::error::{AppError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Namespace prepended to every cache key written by this crate.
pub const CACHE_KEY_PREFIX: &str = "truelist:validation:";

/// Derives the cache key for an address.
///
/// The address is trimmed and lower-cased before hashing, so
/// `" User@Example.com "` and `"user@example.com"` share a key.
pub fn cache_key(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{}{}", CACHE_KEY_PREFIX, hex::encode(digest))
}

/// A key/value store with per-entry expiry.
pub trait CacheBackend: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: String, ttl: Duration);

    /// Removes a key, returning whether it was present.
    fn delete(&self, key: &str) -> bool;

    fn clear(&self);
}

/// Named cache backends, looked up by alias.
#[derive(Debug, Clone, Default)]
pub struct CacheRegistry {
    backends: HashMap<String, Arc<dyn CacheBackend>>,
}

impl CacheRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding a single in-memory backend under `"default"`.
    pub fn with_default() -> Self {
        let mut registry = Self::new();
        registry.insert(DEFAULT_CACHE_ALIAS, Arc::new(MemoryCache::new()));
        registry
    }

    pub fn insert(&mut self, alias: impl Into<String>, backend: Arc<dyn CacheBackend>) {
        self.backends.insert(alias.into(), backend);
    }

    /// Returns the backend registered under `alias`.
    ///
    /// # Errors
    /// [`AppError::Config`] when no backend uses that alias.
    pub fn get(&self, alias: &str) -> Result<Arc<dyn CacheBackend>> {
        self.backends
            .get(alias)
            .cloned()
            .ok_or_else(|| AppError::Config(format!("Cache backend '{}' is not configured", alias)))
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.backends.contains_key(alias)
    }
}
