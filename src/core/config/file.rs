//! Defines the structure mirroring the TOML configuration file format.
//!
//! ```toml
//! [api]
//! api_key = "..."
//! base_url = "https://api.truelist.io"
//! timeout = 10
//!
//! [validation]
//! allow_risky = true
//!
//! [cache]
//! enabled = true
//! ttl = 3600
//! alias = "default"
//! ```

use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub(crate) api: ApiConfig,
    #[serde(default)]
    pub(crate) validation: ValidationConfig,
    #[serde(default)]
    pub(crate) cache: CacheConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ApiConfig {
    pub(crate) api_key: Option<String>,
    pub(crate) base_url: Option<String>,
    pub(crate) timeout: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ValidationConfig {
    pub(crate) allow_risky: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct CacheConfig {
    pub(crate) enabled: Option<bool>,
    pub(crate) ttl: Option<u64>,
    pub(crate) alias: Option<String>,
}
