//! Sanity checks applied to a fully-resolved [`Config`].

use super::{Config, MAX_CACHE_TTL_SECS, MAX_TIMEOUT_SECS};
use crate::core::error::{AppError, Result};
use std::time::Duration;
use url::Url;

pub(crate) fn validate_config(config: &Config) -> Result<()> {
    let url = Url::parse(&config.base_url)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "TRUELIST_BASE_URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.timeout.is_zero() {
        return Err(AppError::Config(
            "TRUELIST_TIMEOUT must be greater than zero".to_string(),
        ));
    }
    if config.timeout > Duration::from_secs(MAX_TIMEOUT_SECS) {
        return Err(AppError::Config(format!(
            "TRUELIST_TIMEOUT must be at most {} seconds, got {}",
            MAX_TIMEOUT_SECS,
            config.timeout.as_secs()
        )));
    }
    if config.cache_ttl.is_zero() {
        return Err(AppError::Config(
            "TRUELIST_CACHE_TTL must be greater than zero".to_string(),
        ));
    }
    if config.cache_ttl > Duration::from_secs(MAX_CACHE_TTL_SECS) {
        return Err(AppError::Config(format!(
            "TRUELIST_CACHE_TTL must be at most {} seconds, got {}",
            MAX_CACHE_TTL_SECS,
            config.cache_ttl.as_secs()
        )));
    }
    if config.cache_alias.trim().is_empty() {
        return Err(AppError::Config(
            "TRUELIST_CACHE_ALIAS must not be empty".to_string(),
        ));
    }
    Ok(())
}
