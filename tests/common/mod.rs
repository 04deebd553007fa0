use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test tree fixture: a temp directory with its own config file so tests
/// never touch the real home directory.
pub struct TestTree {
    pub temp_dir: TempDir,
}

impl TestTree {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates a file under the tree and returns its path.
    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Writes a manifest file and returns its path.
    pub fn write_manifest(&self, lines: &[String]) -> Result<PathBuf> {
        let path = self.path().join("manifest.txt");
        fs::write(&path, lines.join("\n"))?;
        Ok(path)
    }

    /// A metafix command with config redirected into the temp dir.
    pub fn metafix(&self) -> Command {
        let mut cmd = Command::cargo_bin("metafix").expect("metafix binary");
        cmd.env("METAFIX_CONFIG_PATH", self.path().join("metafix-config"));
        cmd
    }
}

/// One manifest update line for `path` as it exists right now, but with
/// the given mode string substituted.
pub fn update_line_for(path: &Path, mode_string: &str) -> String {
    let metadata = fs::metadata(path).expect("metadata");
    let (owner, group) = owner_group_of(path);
    format!(
        "{:x} {} {} {} 2014-04-30T10:11:12+01:00 {}",
        metadata.ino(),
        mode_string,
        owner,
        group,
        path.display()
    )
}

/// The inode of `path` as a manifest token.
pub fn inode_token(path: &Path) -> String {
    format!("{:x}", fs::metadata(path).expect("metadata").ino())
}

/// Permission bits of `path`.
pub fn mode_bits(path: &Path) -> u32 {
    fs::metadata(path).expect("metadata").mode() & 0o7777
}

/// Resolves the current owner and group names of `path` the same way the
/// scanner does, so chown in tests is a self-assignment that needs no
/// privileges.
pub fn owner_group_of(path: &Path) -> (String, String) {
    let list = metafix::scanner::walker::walk(path.parent().unwrap(), false).expect("walk");
    let info = list
        .iter()
        .find(|f| f.path == path)
        .expect("file in walk result");
    (info.owner.clone(), info.group.clone())
}
