//! Manifest command types.
//!
//! A manifest is a line-oriented text file enumerating inode-keyed
//! commands. Each line is either a bare hexadecimal inode number, meaning
//! the file currently holding that inode should be removed, or a full
//! record (inode, mode, user, group, timestamp, path) meaning that
//! metadata should be restored onto the file currently holding that inode.
//!
//! Commands are data-only; the apply behavior lives in [`crate::engine`]
//! and dispatches on the variant with a `match`.

/// Manifest line parser.
pub mod parser;

use crate::utils::inode::inode_key;
use std::collections::HashMap;

/// Target metadata carried by an update command.
///
/// All fields are kept exactly as parsed from the manifest line. In
/// particular `mode_string` preserves the literal octal text (leading
/// zeros included) for display and exact reproduction; it is only
/// reinterpreted numerically at apply time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateInfo {
    /// Permission bits as octal text, e.g. `"100644"`.
    pub mode_string: String,
    /// Target owner user name.
    pub user: String,
    /// Target group name.
    pub group: String,
    /// ISO-8601 datetime with UTC offset, informational unless mtime
    /// restoration is enabled.
    pub timestamp: String,
    /// Path recorded in the manifest. The match key is the inode, not
    /// this path, which may be stale.
    pub filename: String,
}

/// One parsed manifest entry, keyed by inode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remove the file currently holding this inode.
    Delete {
        /// Filesystem inode number.
        inode: u64,
    },
    /// Restore the recorded metadata onto the file currently holding
    /// this inode.
    Update {
        /// Filesystem inode number.
        inode: u64,
        /// Metadata to restore.
        info: UpdateInfo,
    },
}

impl Command {
    /// The inode this command targets.
    #[must_use]
    pub const fn inode(&self) -> u64 {
        match self {
            Self::Delete { inode } | Self::Update { inode, .. } => *inode,
        }
    }

    /// The canonical map key for this command.
    ///
    /// Invariant: equals the key the apply engine derives from an observed
    /// file with the same inode, because both sides go through
    /// [`inode_key`].
    #[must_use]
    pub fn key(&self) -> String {
        inode_key(self.inode())
    }
}

/// Parsed manifest: mapping from canonical inode key to command.
///
/// Keys are unique; when a manifest contains two lines for the same inode
/// the later line wins (manifests may be concatenated).
pub type CommandSet = HashMap<String, Command>;
