//! Shared handles built once at startup and passed to validators.

use crate::cache::{CacheRegistry, CachedClient};
use crate::client::{Connector, HttpConnector};
use crate::core::config::Config;
use std::fmt;
use std::sync::Arc;

/// Configuration, cache backends and client factory used by every
/// validation. Cheap to clone.
#[derive(Clone)]
pub struct Context {
    config: Arc<Config>,
    caches: Arc<CacheRegistry>,
    connector: Arc<dyn Connector>,
}

impl Context {
    /// A context talking to the HTTP API, with an in-memory `default` cache.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            caches: Arc::new(CacheRegistry::with_default()),
            connector: Arc::new(HttpConnector),
        }
    }

    pub fn with_caches(mut self, caches: CacheRegistry) -> Self {
        self.caches = Arc::new(caches);
        self
    }

    pub fn with_connector(mut self, connector: Arc<dyn Connector>) -> Self {
        self.connector = connector;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn caches(&self) -> &CacheRegistry {
        &self.caches
    }

    /// A fresh caching client; the caller must `close` it when done.
    pub fn cached_client(&self) -> CachedClient {
        CachedClient::new(self)
    }

    pub(crate) fn config_arc(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    pub(crate) fn caches_arc(&self) -> Arc<CacheRegistry> {
        Arc::clone(&self.caches)
    }

    pub(crate) fn connector_arc(&self) -> Arc<dyn Connector> {
        Arc::clone(&self.connector)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("caches", &self.caches)
            .finish_non_exhaustive()
    }
}
