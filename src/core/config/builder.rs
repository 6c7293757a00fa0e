//! Builder that layers configuration sources over the defaults.
//!
//! Precedence, lowest to highest: defaults, config file, environment, explicit
//! setter calls.

use super::file::ConfigFile;
use super::validation::validate_config;
use super::{Config, Setting};
use crate::core::error::{AppError, Result};
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration instead of the defaults.
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Applies every value present in a parsed config file.
    pub fn apply_file(mut self, file: &ConfigFile, path: Option<String>) -> Self {
        let c = &mut self.config;
        if let Some(key) = &file.api.api_key {
            c.api_key = Some(key.clone());
        }
        if let Some(url) = &file.api.base_url {
            c.base_url = url.clone();
        }
        if let Some(secs) = file.api.timeout {
            c.timeout = Duration::from_secs(secs);
        }
        if let Some(allow) = file.validation.allow_risky {
            c.allow_risky = allow;
        }
        if let Some(enabled) = file.cache.enabled {
            c.cache_enabled = enabled;
        }
        if let Some(secs) = file.cache.ttl {
            c.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(alias) = &file.cache.alias {
            c.cache_alias = alias.clone();
        }
        if path.is_some() {
            c.loaded_config_path = path;
        }
        self
    }

    /// Applies `TRUELIST_*` variables from the given iterator.
    ///
    /// Variables that are not Truelist settings are skipped; an unparsable
    /// value for a known setting is an error.
    pub fn apply_env<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in vars {
            let name = name.as_ref();
            if !name.starts_with("TRUELIST_") {
                continue;
            }
            match name.parse::<Setting>() {
                Ok(setting) => self.set_from_str(setting, value.as_ref())?,
                Err(_) => {
                    tracing::debug!(target: "truelist::config", "Ignoring unknown variable {}", name);
                }
            }
        }
        Ok(self)
    }

    fn set_from_str(&mut self, setting: Setting, raw: &str) -> Result<()> {
        let raw = raw.trim();
        let c = &mut self.config;
        match setting {
            Setting::ApiKey => c.api_key = (!raw.is_empty()).then(|| raw.to_string()),
            Setting::BaseUrl => c.base_url = raw.to_string(),
            Setting::Timeout => c.timeout = Duration::from_secs(parse_secs(setting, raw)?),
            Setting::AllowRisky => c.allow_risky = parse_flag(setting, raw)?,
            Setting::CacheEnabled => c.cache_enabled = parse_flag(setting, raw)?,
            Setting::CacheTtl => c.cache_ttl = Duration::from_secs(parse_secs(setting, raw)?),
            Setting::CacheAlias => c.cache_alias = raw.to_string(),
        }
        Ok(())
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn allow_risky(mut self, allow: bool) -> Self {
        self.config.allow_risky = allow;
        self
    }

    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.config.cache_enabled = enabled;
        self
    }

    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.config.cache_ttl = ttl;
        self
    }

    pub fn cache_alias(mut self, alias: impl Into<String>) -> Self {
        self.config.cache_alias = alias.into();
        self
    }

    /// Validates and returns the final configuration.
    pub fn build(self) -> Result<Config> {
        validate_config(&self.config)?;
        Ok(self.config)
    }
}

fn parse_flag(setting: Setting, raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} expects a boolean, got '{}'",
            setting, raw
        ))),
    }
}

fn parse_secs(setting: Setting, raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| {
        AppError::Config(format!(
            "{} expects a whole number of seconds, got '{}'",
            setting, raw
        ))
    })
}
