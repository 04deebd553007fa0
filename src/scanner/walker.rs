//! Walkdir-based tree walker.

use super::{FileInfo, FileList};
use anyhow::{Context, Result};
use nix::unistd::{Gid, Group, Uid, User};
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Walks `root` and returns a snapshot of every regular file under it.
///
/// Directories themselves are not recorded; only regular files carry
/// restorable metadata here. Symlinks are not followed unless
/// `follow_symlinks` is set.
///
/// # Errors
///
/// Returns an error if directory traversal fails or a file's metadata
/// cannot be read.
pub fn walk(root: &Path, follow_symlinks: bool) -> Result<FileList> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(follow_symlinks) {
        let entry =
            entry.with_context(|| format!("Failed to traverse directory: {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to read metadata for: {}", entry.path().display()))?;

        files.push(FileInfo {
            inode: metadata.ino(),
            mode: metadata.mode(),
            owner: owner_name(metadata.uid()),
            group: group_name(metadata.gid()),
            path: entry.into_path(),
        });
    }

    debug!(
        root = %root.display(),
        files = files.len(),
        "walked directory tree"
    );

    Ok(FileList::new(root.to_path_buf(), files))
}

/// Resolves a uid to a user name, falling back to the numeric form.
fn owner_name(uid: u32) -> String {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => user.name,
        _ => uid.to_string(),
    }
}

/// Resolves a gid to a group name, falling back to the numeric form.
fn group_name(gid: u32) -> String {
    match Group::from_gid(Gid::from_raw(gid)) {
        Ok(Some(group)) => group.name,
        _ => gid.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_records_regular_files_only() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(sub.join("b.txt"), "b").unwrap();

        let list = walk(temp.path(), false).unwrap();

        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|f| f.path.is_file()));
    }

    #[test]
    fn test_walk_reports_real_inode_and_mode() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        let expected = fs::metadata(&file).unwrap();
        let list = walk(temp.path(), false).unwrap();
        let info = list.iter().find(|f| f.path == file).unwrap();

        assert_eq!(info.inode, expected.ino());
        assert_eq!(info.mode, expected.mode());
    }

    #[test]
    fn test_walk_resolves_owner_of_own_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        let list = walk(temp.path(), false).unwrap();
        let info = list.iter().next().unwrap();

        // Files we just created belong to us; the name must resolve to
        // something non-empty (a name or the numeric fallback).
        assert!(!info.owner.is_empty());
        assert!(!info.group.is_empty());
    }

    #[test]
    fn test_walk_empty_tree() {
        let temp = TempDir::new().unwrap();
        let list = walk(temp.path(), false).unwrap();
        assert!(list.is_empty());
    }
}
