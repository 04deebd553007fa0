#![warn(missing_docs)]
#![allow(clippy::arithmetic_side_effects)] // Simple counters cannot overflow

//! # Metafix - Inode-Keyed Metadata Restoration
//!
//! Metafix restores per-file metadata (permission bits, owner, group and
//! optionally mtime) onto an existing directory tree using a manifest that
//! identifies files by filesystem inode number rather than by path.
//!
//! This is useful after operations that preserve inode numbers but disturb
//! metadata (certain restores, clones or filesystem copies) where paths may
//! no longer be reliable but inode identity still is.
//!
//! ## Architecture
//!
//! The codebase is organized into several key modules:
//!
//! - [`manifest`]: manifest command types and the line parser
//! - [`scanner`]: filesystem traversal producing per-file snapshots
//! - [`engine`]: the apply pass joining manifest commands to observed files
//! - [`fsops`]: the filesystem mutation capability (chmod, chown, delete)
//! - [`config`]: configuration parsing and defaults
//! - [`output`]: output formatting and verbosity control
//!
//! ## Example Usage
//!
//! ```no_run
//! use metafix::{engine, fsops::SystemFs, manifest, scanner};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lines = ["abc123 100644 user group 2014-04-30T10:11:12+01:00 /tmp/example.txt"];
//! let commands = manifest::parser::parse(lines.iter().copied())?;
//!
//! let list = scanner::walker::walk(std::path::Path::new("/tmp"), false)?;
//! let dirs = scanner::Directories::new(vec![list]);
//!
//! let report = engine::apply(&dirs, &commands, &SystemFs, &engine::ApplyOptions::default());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Commands module containing all CLI command implementations.
pub mod commands;

/// Configuration parsing and management.
pub mod config;

/// The apply engine: inode matching and once-only command dispatch.
pub mod engine;

/// Filesystem mutation capability (chmod, chown, delete, mtime).
pub mod fsops;

/// Manifest command types and the line parser.
pub mod manifest;

/// Output formatting and verbosity control.
pub mod output;

/// Filesystem scanning and directory traversal.
pub mod scanner;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Current version of the metafix binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file path relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/metafix/config";

/// Central context for metafix operations.
///
/// Holds the loaded configuration and its on-disk location. Constructed
/// once in `main` and passed to command implementations.
#[derive(Debug, Clone)]
pub struct MetafixContext {
    /// Path to the configuration file.
    pub config_path: PathBuf,

    /// Loaded configuration settings.
    pub config: config::Config,
}

impl MetafixContext {
    /// Creates a new `MetafixContext` by loading the configuration from the
    /// default path, honouring the `METAFIX_CONFIG_PATH` override.
    ///
    /// # Errors
    /// Returns an error if the home directory cannot be determined or if the
    /// configuration file cannot be read or created.
    pub fn new() -> Result<Self> {
        let config_path = if let Ok(path) = std::env::var("METAFIX_CONFIG_PATH") {
            PathBuf::from(path)
        } else {
            let home = dirs::home_dir().context("Could not find home directory")?;
            home.join(DEFAULT_CONFIG_PATH)
        };

        let config = config::Config::load(&config_path)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Creates a new `MetafixContext` with an explicit config path, for
    /// testing without environment variable manipulation.
    ///
    /// # Errors
    /// Returns an error if the configuration cannot be loaded or created.
    pub fn new_explicit(config_path: PathBuf) -> Result<Self> {
        let config = config::Config::load(&config_path)?;
        Ok(Self {
            config_path,
            config,
        })
    }
}
