//! The apply pass.
//!
//! Joins a parsed [`CommandSet`] to a [`Directories`] snapshot by inode
//! key and dispatches each matched command's action through an injected
//! [`FsMutator`]. A file with no manifest entry is left untouched; a
//! manifest entry with no matching file is silently never applied.
//!
//! Each matched inode triggers its action at most once per pass, even
//! when several observed files report the same inode (hardlinks): the
//! first-encountered file receives the action and later observations are
//! treated as already satisfied. Mutation failures do not abort the
//! pass; they are collected into the returned [`ApplyReport`].

use crate::fsops::FsMutator;
use crate::manifest::{Command, CommandSet, UpdateInfo};
use crate::output;
use crate::scanner::{Directories, FileInfo};
use crate::utils::formatters::{parse_mode_string, parse_timestamp};
use crate::utils::inode::inode_key;
use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

/// Per-pass behavior switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// Print a line for every action taken.
    pub verbose: bool,
    /// Also restore the manifest timestamp as the file's mtime.
    pub preserve_mtime: bool,
}

/// One command that matched a file but whose action failed.
#[derive(Debug)]
pub struct ApplyFailure {
    /// Path of the file the action was attempted on.
    pub path: PathBuf,
    /// Inode the command was keyed on.
    pub inode: u64,
    /// What went wrong.
    pub error: anyhow::Error,
}

/// Outcome of one apply pass.
#[derive(Debug, Default)]
pub struct ApplyReport {
    /// Files whose metadata was restored.
    pub updated: usize,
    /// Files that were deleted.
    pub deleted: usize,
    /// Actions that matched but failed; the pass continued past them.
    pub failures: Vec<ApplyFailure>,
}

impl ApplyReport {
    /// Whether every matched command applied cleanly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of commands dispatched (successfully or not).
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.updated + self.deleted + self.failures.len()
    }
}

/// Runs one apply pass over the snapshot.
///
/// The commands map is read-only here; the only mutable state is the
/// per-pass set of already-dispatched inode keys, discarded on return.
pub fn apply(
    dirs: &Directories,
    commands: &CommandSet,
    fs: &dyn FsMutator,
    options: &ApplyOptions,
) -> ApplyReport {
    let mut dispatched: HashSet<String> = HashSet::new();
    let mut report = ApplyReport::default();

    for file in dirs.files() {
        let key = inode_key(file.inode);
        let Some(command) = commands.get(&key) else {
            continue;
        };

        // First match wins; hardlinks must not be double-applied.
        if !dispatched.insert(key) {
            debug!(inode = file.inode, path = %file.path.display(), "inode already handled this pass");
            continue;
        }

        match dispatch(command, file, fs, options) {
            Ok(()) => match command {
                Command::Delete { .. } => report.deleted += 1,
                Command::Update { .. } => report.updated += 1,
            },
            Err(error) => report.failures.push(ApplyFailure {
                path: file.path.clone(),
                inode: file.inode,
                error,
            }),
        }
    }

    debug!(
        updated = report.updated,
        deleted = report.deleted,
        failed = report.failures.len(),
        "apply pass finished"
    );

    report
}

/// Dispatches one matched command against the file carrying its inode.
fn dispatch(
    command: &Command,
    file: &FileInfo,
    fs: &dyn FsMutator,
    options: &ApplyOptions,
) -> Result<()> {
    match command {
        Command::Delete { .. } => {
            if options.verbose {
                output::info(&format!("deleting {}", file.path.display()));
            }
            fs.delete(&file.path)
        }
        Command::Update { info, .. } => apply_update(info, file, fs, options),
    }
}

/// Restores the recorded metadata onto `file`. The file's path and name
/// are never touched; the manifest filename may be stale.
fn apply_update(
    info: &UpdateInfo,
    file: &FileInfo,
    fs: &dyn FsMutator,
    options: &ApplyOptions,
) -> Result<()> {
    if options.verbose {
        output::info(&format!(
            "restoring {} {}:{} onto {}",
            info.mode_string,
            info.user,
            info.group,
            file.path.display()
        ));
    }

    let mode = parse_mode_string(&info.mode_string)?;
    fs.set_mode(&file.path, mode)?;
    fs.set_owner_group(&file.path, &info.user, &info.group)?;

    if options.preserve_mtime {
        let mtime = parse_timestamp(&info.timestamp)?;
        fs.set_mtime(&file.path, mtime)?;
    }

    Ok(())
}
