//! Command-line interface definitions for metafix.
//!
//! All CLI argument parsing structures using clap's derive macros.
//!
//! Note: Field-level documentation is provided via clap attributes, so we
//! allow missing_docs for this module to avoid redundant documentation.

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for metafix.
#[derive(Parser)]
#[command(
    name = "metafix",
    version = crate::VERSION,
    about = "Restore file permissions and ownership from an inode-keyed manifest",
    long_about = "Restores per-file metadata (mode, owner, group) onto an existing tree \
                  using a manifest keyed by inode number, for situations where inode \
                  identity survived an operation but paths or metadata did not"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Show a line for every file acted on
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// All available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Apply a manifest to one or more directory trees
    Apply {
        /// Manifest file to apply
        manifest: PathBuf,

        /// Roots to walk and match against the manifest
        #[arg(required = true)]
        roots: Vec<PathBuf>,

        /// Show what would change without touching anything
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Also restore manifest timestamps as file mtimes
        #[arg(short, long)]
        times: bool,
    },

    /// Parse a manifest and report its contents without applying it
    Check {
        /// Manifest file to check
        manifest: PathBuf,
    },

    /// Walk directory trees and print manifest lines for their current state
    Scan {
        /// Roots to walk
        #[arg(required = true)]
        roots: Vec<PathBuf>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
