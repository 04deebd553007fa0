//! Emit manifest lines describing the current state of a tree.
//!
//! The output round-trips with `apply`: feeding it back restores the
//! tree to the state it had when scanned.

use crate::MetafixContext;
use crate::output;
use crate::scanner::walker;
use crate::utils::formatters::format_mode;
use crate::utils::inode::inode_key;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat};
use std::io::Write;
use std::path::PathBuf;

/// Walks the given roots and prints one manifest line per regular file.
///
/// Paths containing whitespace cannot be represented in the line format
/// (there is no escaping mechanism); such files are skipped with a
/// warning rather than emitting a line `apply` would reject.
///
/// # Errors
///
/// Returns an error if a root cannot be traversed or stdout cannot be
/// written to.
pub fn execute(ctx: &MetafixContext, roots: &[PathBuf]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut skipped = 0usize;

    for root in roots {
        let list = walker::walk(root, ctx.config.tracking.follow_symlinks)?;

        for file in list.iter() {
            let path = file.path.to_string_lossy();
            if path.chars().any(char::is_whitespace) {
                output::warning(&format!(
                    "Skipping path with whitespace (not representable): {path}"
                ));
                skipped += 1;
                continue;
            }

            let metadata = std::fs::metadata(&file.path)
                .with_context(|| format!("Failed to read metadata for: {path}"))?;
            let mtime: DateTime<Local> = metadata
                .modified()
                .with_context(|| format!("Failed to read mtime for: {path}"))?
                .into();

            writeln!(
                out,
                "{} {} {} {} {} {}",
                inode_key(file.inode),
                format_mode(file.mode),
                file.owner,
                file.group,
                mtime.to_rfc3339_opts(SecondsFormat::Secs, false),
                path,
            )?;
        }
    }

    if skipped > 0 {
        output::warning(&format!("{skipped} file(s) skipped"));
    }

    Ok(())
}
