//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - [`formatters`]: mode string and timestamp parsing/formatting
//! - [`inode`]: canonical inode key derivation

/// Mode string and timestamp parsing/formatting.
pub mod formatters;
/// Canonical inode key derivation.
pub mod inode;
