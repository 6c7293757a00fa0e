//! Defines the core runtime `Config` struct, its defaults, and named setting lookup.
//! Submodules handle loading, building, and validation.

pub(crate) mod builder;
pub(crate) mod file;
pub(crate) mod loading;
pub(crate) mod validation;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::core::error::{AppError, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.truelist.io";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_CACHE_ALIAS: &str = "default";
/// Upper bound for `TRUELIST_TIMEOUT`.
pub const MAX_TIMEOUT_SECS: u64 = 300;
/// Upper bound for `TRUELIST_CACHE_TTL` (30 days).
pub const MAX_CACHE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Runtime configuration settings used by the truelist-guard core logic.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,

    pub allow_risky: bool,

    pub cache_enabled: bool,
    pub cache_ttl: Duration,
    pub cache_alias: String,

    pub loaded_config_path: Option<String>,
}

impl Config {
    fn build_default() -> Self {
        Config {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            allow_risky: true,
            cache_enabled: false,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            cache_alias: DEFAULT_CACHE_ALIAS.to_string(),
            loaded_config_path: None,
        }
    }

    /// Reads a setting by its name, e.g. `"TRUELIST_BASE_URL"`.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] when `name` is not a Truelist setting.
    pub fn get_setting(&self, name: &str) -> Result<SettingValue> {
        let setting = name.parse::<Setting>()?;
        Ok(self.setting(setting))
    }

    /// Reads a typed setting.
    pub fn setting(&self, setting: Setting) -> SettingValue {
        match setting {
            Setting::ApiKey => SettingValue::OptionalText(self.api_key.clone()),
            Setting::BaseUrl => SettingValue::Text(self.base_url.clone()),
            Setting::Timeout => SettingValue::Seconds(self.timeout.as_secs()),
            Setting::AllowRisky => SettingValue::Flag(self.allow_risky),
            Setting::CacheEnabled => SettingValue::Flag(self.cache_enabled),
            Setting::CacheTtl => SettingValue::Seconds(self.cache_ttl.as_secs()),
            Setting::CacheAlias => SettingValue::Text(self.cache_alias.clone()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::build_default()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("allow_risky", &self.allow_risky)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_ttl", &self.cache_ttl)
            .field("cache_alias", &self.cache_alias)
            .field("loaded_config_path", &self.loaded_config_path)
            .finish()
    }
}

/// The recognised Truelist settings, named as they appear in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    ApiKey,
    BaseUrl,
    Timeout,
    AllowRisky,
    CacheEnabled,
    CacheTtl,
    CacheAlias,
}

impl Setting {
    pub const ALL: [Setting; 7] = [
        Setting::ApiKey,
        Setting::BaseUrl,
        Setting::Timeout,
        Setting::AllowRisky,
        Setting::CacheEnabled,
        Setting::CacheTtl,
        Setting::CacheAlias,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Setting::ApiKey => "TRUELIST_API_KEY",
            Setting::BaseUrl => "TRUELIST_BASE_URL",
            Setting::Timeout => "TRUELIST_TIMEOUT",
            Setting::AllowRisky => "TRUELIST_ALLOW_RISKY",
            Setting::CacheEnabled => "TRUELIST_CACHE_ENABLED",
            Setting::CacheTtl => "TRUELIST_CACHE_TTL",
            Setting::CacheAlias => "TRUELIST_CACHE_ALIAS",
        }
    }
}

impl FromStr for Setting {
    type Err = AppError;

    fn from_str(name: &str) -> Result<Self> {
        Setting::ALL
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| AppError::Config(format!("Invalid Truelist setting: '{}'", name)))
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value of a setting as returned by [`Config::get_setting`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Text(String),
    OptionalText(Option<String>),
    Seconds(u64),
    Flag(bool),
}
