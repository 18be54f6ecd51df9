//! Global configuration for kiln
//!
//! User-wide settings live in `~/.kiln/config.toml`; the `KILN_CONFIG`
//! environment variable overrides the file location (useful for tests and
//! non-standard layouts). The file is optional; a missing config means
//! defaults everywhere.
//!
//! ```toml
//! # ~/.kiln/config.toml
//! repository = "/data/artifacts"
//! ```
//!
//! Today the only setting is the local artifact repository root, which
//! defaults to `~/.kiln/repository`.

use std::path::PathBuf;

use serde::Deserialize;

use crate::core::{KilnError, Result};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "KILN_CONFIG";

/// User-wide kiln settings.
#[derive(Debug, Default, Deserialize)]
pub struct GlobalConfig {
    /// Local artifact repository root. Defaults to `~/.kiln/repository`.
    #[serde(default)]
    pub repository: Option<PathBuf>,
}

impl GlobalConfig {
    /// Load the configuration from the default location (`KILN_CONFIG`
    /// env var, else `~/.kiln/config.toml`). A missing file yields the
    /// default configuration.
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => kiln_home()?.join("config.toml"),
        };
        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path. A missing file
    /// yields the default configuration.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| KilnError::Config {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// The effective repository root: the configured path, or
    /// `~/.kiln/repository`.
    pub fn repository_path(&self) -> Result<PathBuf> {
        match &self.repository {
            Some(path) => Ok(path.clone()),
            None => Ok(kiln_home()?.join("repository")),
        }
    }
}

/// The `~/.kiln` directory.
fn kiln_home() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".kiln"))
        .ok_or_else(|| KilnError::Config {
            message: "cannot determine home directory".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = GlobalConfig::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert!(config.repository.is_none());
    }

    #[test]
    fn repository_setting_is_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "repository = \"/data/artifacts\"\n").unwrap();

        let config = GlobalConfig::load_from(&path).unwrap();
        assert_eq!(config.repository_path().unwrap(), PathBuf::from("/data/artifacts"));
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "repository = [broken").unwrap();

        let err = GlobalConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, KilnError::Config { .. }));
    }
}
