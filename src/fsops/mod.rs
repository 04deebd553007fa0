//! Filesystem mutation capability.
//!
//! The apply engine never touches the filesystem directly; it goes
//! through the [`FsMutator`] trait. [`SystemFs`] performs the real
//! chmod/chown/delete calls, [`DryRunFs`] only reports what would
//! happen, and tests substitute recording implementations.

use crate::output;
use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, FixedOffset};
use filetime::FileTime;
use nix::unistd::{Gid, Group, Uid, User, chown};
use std::fs;
use std::path::Path;

/// The filesystem operations the apply engine needs.
///
/// Each call is synchronous and treated as a single atomic action; a
/// failure is surfaced to the caller, never retried here.
pub trait FsMutator {
    /// Sets the permission bits of `path`.
    ///
    /// # Errors
    /// Returns an error if the permissions cannot be changed.
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()>;

    /// Sets the owner and group of `path`, both given by name.
    ///
    /// # Errors
    /// Returns an error if either name is unknown or the ownership
    /// cannot be changed.
    fn set_owner_group(&self, path: &Path, user: &str, group: &str) -> Result<()>;

    /// Sets the modification time of `path`.
    ///
    /// # Errors
    /// Returns an error if the timestamp cannot be applied.
    fn set_mtime(&self, path: &Path, mtime: DateTime<FixedOffset>) -> Result<()>;

    /// Removes the regular file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be removed.
    fn delete(&self, path: &Path) -> Result<()>;
}

/// Real filesystem mutator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFs;

impl FsMutator for SystemFs {
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode))
            .with_context(|| format!("Failed to set permissions for: {}", path.display()))
    }

    fn set_owner_group(&self, path: &Path, user: &str, group: &str) -> Result<()> {
        let uid = resolve_user(user)?;
        let gid = resolve_group(group)?;
        chown(path, Some(uid), Some(gid))
            .with_context(|| format!("Failed to change ownership of: {}", path.display()))
    }

    fn set_mtime(&self, path: &Path, mtime: DateTime<FixedOffset>) -> Result<()> {
        let mtime = FileTime::from_unix_time(mtime.timestamp(), mtime.timestamp_subsec_nanos());
        filetime::set_file_mtime(path, mtime)
            .with_context(|| format!("Failed to set mtime for: {}", path.display()))
    }

    fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).with_context(|| format!("Failed to delete: {}", path.display()))
    }
}

/// Mutator that reports intended operations without performing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunFs;

impl FsMutator for DryRunFs {
    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        output::info(&format!("would set mode {:o} on {}", mode, path.display()));
        Ok(())
    }

    fn set_owner_group(&self, path: &Path, user: &str, group: &str) -> Result<()> {
        output::info(&format!(
            "would set owner {user}:{group} on {}",
            path.display()
        ));
        Ok(())
    }

    fn set_mtime(&self, path: &Path, mtime: DateTime<FixedOffset>) -> Result<()> {
        output::info(&format!(
            "would set mtime {} on {}",
            mtime.to_rfc3339(),
            path.display()
        ));
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<()> {
        output::info(&format!("would delete {}", path.display()));
        Ok(())
    }
}

/// Resolves a user name to a uid.
fn resolve_user(name: &str) -> Result<Uid> {
    User::from_name(name)
        .with_context(|| format!("Failed to look up user: {name}"))?
        .map(|user| user.uid)
        .ok_or_else(|| anyhow!("Unknown user: {name}"))
}

/// Resolves a group name to a gid.
fn resolve_group(name: &str) -> Result<Gid> {
    Group::from_name(name)
        .with_context(|| format!("Failed to look up group: {name}"))?
        .map(|group| group.gid)
        .ok_or_else(|| anyhow!("Unknown group: {name}"))
}
