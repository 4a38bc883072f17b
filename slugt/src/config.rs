//! Configuration module for the slugt CLI.
//!
//! Settings live in `slugt.toml`, looked up in the user's configuration
//! directory unless an explicit path is given.

use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "slugt.toml";

/// Application configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Default dictionary metadata file used by `slugt suggest` when no
    /// `--dictionaries` flag is given.
    #[serde(default)]
    pub dictionaries: Option<PathBuf>,

    /// Emit JSON by default instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionaries: None,
            json: false,
        }
    }
}

impl Config {
    /// Loads the configuration from the default location, falling back
    /// to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads the configuration from an explicit path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Returns the default configuration file path, if a configuration
/// directory is known for this platform.
fn default_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("slugt").join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.dictionaries.is_none());
        assert!(!config.json);
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            dictionaries = "/tmp/dictionaries.json"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.dictionaries,
            Some(PathBuf::from("/tmp/dictionaries.json"))
        );
        assert!(config.json);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
