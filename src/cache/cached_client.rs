//! Validation client wrapper that memoizes results in a [`CacheBackend`].

use super::{cache_key, CacheBackend, CacheRegistry};
use crate::client::{Connector, ValidationClient};
use crate::core::config::Config;
use crate::core::context::Context;
use crate::core::error::{AppError, Result};
use crate::core::models::ValidationResult;
use std::sync::Arc;
use std::time::Duration;

/// Caching front for a [`ValidationClient`].
///
/// The underlying client is created on first use and kept until [`close`]
/// is called. Results in the `unknown` state are never cached: they describe
/// a transient condition on the remote side.
///
/// [`close`]: CachedClient::close
pub struct CachedClient {
    config: Arc<Config>,
    caches: Arc<CacheRegistry>,
    connector: Arc<dyn Connector>,
    cache_enabled: bool,
    cache_ttl: Duration,
    cache_alias: String,
    client: Option<Box<dyn ValidationClient>>,
}

impl CachedClient {
    /// Creates a wrapper using the cache settings from the context's config.
    pub fn new(ctx: &Context) -> Self {
        let config = ctx.config_arc();
        Self {
            cache_enabled: config.cache_enabled,
            cache_ttl: config.cache_ttl,
            cache_alias: config.cache_alias.clone(),
            config,
            caches: ctx.caches_arc(),
            connector: ctx.connector_arc(),
            client: None,
        }
    }

    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cache_alias(mut self, alias: impl Into<String>) -> Self {
        self.cache_alias = alias.into();
        self
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache_enabled
    }

    /// Whether an underlying client is currently held.
    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    /// Validates an address, answering from the cache when possible.
    ///
    /// Client errors are returned untouched.
    pub async fn validate(&mut self, email: &str) -> Result<ValidationResult> {
        let cache = if self.cache_enabled {
            Some(self.caches.get(&self.cache_alias)?)
        } else {
            None
        };
        let key = cache_key(email);

        if let Some(backend) = &cache {
            if let Some(hit) = lookup(backend.as_ref(), &key) {
                tracing::debug!(target: "truelist::cache", "Cache hit for {}", key);
                return Ok(hit);
            }
            tracing::debug!(target: "truelist::cache", "Cache miss for {}", key);
        }

        let result = self.client()?.validate(email).await?;

        if let Some(backend) = &cache {
            if result.is_unknown() {
                tracing::debug!(
                    target: "truelist::cache",
                    "Not caching inconclusive result for {}",
                    key
                );
            } else {
                let value = serde_json::to_string(&result)?;
                backend.set(&key, value, self.cache_ttl);
            }
        }

        Ok(result)
    }

    /// Releases the underlying client. A no-op when none was created.
    pub async fn close(&mut self) {
        if let Some(mut client) = self.client.take() {
            client.close().await;
        }
    }

    fn client(&mut self) -> Result<&dyn ValidationClient> {
        if self.client.is_none() {
            tracing::debug!(target: "truelist::client", "Connecting to {}", self.config.base_url);
            self.client = Some(self.connector.connect(&self.config)?);
        }
        self.client
            .as_deref()
            .ok_or_else(|| AppError::Initialization("validation client unavailable".to_string()))
    }
}

fn lookup(backend: &dyn CacheBackend, key: &str) -> Option<ValidationResult> {
    let raw = backend.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(result) => Some(result),
        Err(e) => {
            tracing::warn!(
                target: "truelist::cache",
                "Discarding unreadable cache entry {}: {}",
                key,
                e
            );
            backend.delete(key);
            None
        }
    }
}
