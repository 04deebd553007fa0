//! Filesystem scanning and directory traversal.
//!
//! The scanner produces an ordered snapshot of the regular files under one
//! or more roots. Each file is recorded once with the identity and
//! metadata the apply engine needs: inode, permission bits, owner, group
//! and the path it was observed at. Snapshots are plain data; nothing
//! here touches the filesystem beyond reading metadata.

/// Walkdir-based tree walker producing [`FileList`] snapshots.
pub mod walker;

use std::path::{Path, PathBuf};

/// One observed regular file's identity and metadata.
///
/// Constructed once per file during a tree walk and immutable
/// thereafter. Inode uniqueness is assumed only at a single point in
/// traversal time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Filesystem inode number.
    pub inode: u64,
    /// Permission bits as observed (full `st_mode`, e.g. `0o100644`).
    pub mode: u32,
    /// Owner user name, or the numeric uid when unresolvable.
    pub owner: String,
    /// Group name, or the numeric gid when unresolvable.
    pub group: String,
    /// Path at observation time.
    pub path: PathBuf,
}

/// Ordered collection of [`FileInfo`] records for one traversal root.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    /// Root the files were walked from.
    root: PathBuf,
    /// Observed files, in traversal order.
    files: Vec<FileInfo>,
}

impl FileList {
    /// Creates a file list for `root` from already-observed files.
    #[must_use]
    pub fn new(root: PathBuf, files: Vec<FileInfo>) -> Self {
        Self { root, files }
    }

    /// The root this list was walked from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Iterates the observed files in traversal order.
    pub fn iter(&self) -> impl Iterator<Item = &FileInfo> {
        self.files.iter()
    }

    /// Number of observed files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the walk observed no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Ordered collection of [`FileList`]s, one per independently-walked
/// root, so a single apply pass can cover multiple trees.
#[derive(Debug, Clone, Default)]
pub struct Directories {
    /// File lists, in the order the roots were given.
    lists: Vec<FileList>,
}

impl Directories {
    /// Creates a snapshot over the given file lists.
    #[must_use]
    pub fn new(lists: Vec<FileList>) -> Self {
        Self { lists }
    }

    /// Iterates every observed file across all lists, in order.
    pub fn files(&self) -> impl Iterator<Item = &FileInfo> {
        self.lists.iter().flat_map(FileList::iter)
    }

    /// Total number of observed files across all lists.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.lists.iter().map(FileList::len).sum()
    }
}
