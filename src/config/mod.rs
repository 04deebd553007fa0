//! Configuration parsing and management.
//!
//! Metafix keeps a small TOML configuration file (default:
//! `~/.config/metafix/config`, overridable via `METAFIX_CONFIG_PATH`).
//! A default file is written on first use.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Traversal behavior.
    #[serde(default)]
    pub tracking: TrackingConfig,

    /// Output behavior.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Traversal behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Follow symlinks during tree walks. Off by default: a followed
    /// link reports the target's inode, which can alias another entry.
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Restore the manifest timestamp as the file's mtime on update.
    /// Equivalent to passing `--times` on every apply.
    #[serde(default)]
    pub preserve_mtime: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            preserve_mtime: false,
        }
    }
}

/// Output behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Colorize terminal output.
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

/// Default for [`OutputConfig::color`].
const fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from a file, creating a default one if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot read or parse the configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Cannot create parent directories
    /// - Cannot write to the file
    /// - TOML serialization fails
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(toml_str.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");

        let config = Config::load(&path).unwrap();

        assert!(path.exists());
        assert!(!config.tracking.follow_symlinks);
        assert!(!config.tracking.preserve_mtime);
        assert!(config.output.color);
    }

    #[test]
    fn test_save_and_reload_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");

        let mut config = Config::default();
        config.tracking.preserve_mtime = true;
        config.output.color = false;
        config.save(&path).unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert!(reloaded.tracking.preserve_mtime);
        assert!(!reloaded.output.color);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        std::fs::write(&path, "[tracking]\nfollow_symlinks = true\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.tracking.follow_symlinks);
        assert!(config.output.color);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        std::fs::write(&path, "this is not toml [").unwrap();

        assert!(Config::load(&path).is_err());
    }
}
