//! Loading of the runtime configuration from a TOML file and the environment.

use super::{Config, ConfigBuilder, ConfigFile};
use crate::core::error::Result;
use std::fs;
use std::path::Path;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "truelist.toml";

impl Config {
    /// Loads the configuration from `path` (or `./truelist.toml` when present)
    /// and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        Config::load_with_env(path, std::env::vars())
    }

    /// Same as [`Config::load`], reading variables from `vars` instead of the
    /// process environment.
    pub fn load_with_env<I>(path: Option<&Path>, vars: I) -> Result<Config>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut builder = ConfigBuilder::new();

        let candidate = match path {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                default.is_file().then(|| default.to_path_buf())
            }
        };

        if let Some(file_path) = candidate {
            let file = load_file(&file_path)?;
            tracing::debug!(
                target: "truelist::config",
                "Loaded configuration file {}",
                file_path.display()
            );
            builder = builder.apply_file(&file, Some(file_path.display().to_string()));
        }

        builder.apply_env(vars)?.build()
    }
}

/// Reads and parses a configuration file.
pub fn load_file(path: &Path) -> Result<ConfigFile> {
    let raw = fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&raw)?;
    Ok(file)
}
