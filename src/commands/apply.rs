//! Apply a manifest to one or more directory trees.

use crate::MetafixContext;
use crate::engine::{self, ApplyOptions};
use crate::fsops::{DryRunFs, SystemFs};
use crate::manifest::parser;
use crate::output;
use crate::scanner::{Directories, walker};
use crate::utils::inode::inode_key;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

/// Parses the manifest, walks the given roots and runs one apply pass.
///
/// Matched commands that fail (permission denied, file vanished mid-run)
/// do not stop the pass; they are reported afterwards and turn the
/// overall command into a failure.
///
/// # Errors
///
/// Returns an error if:
/// - The manifest cannot be read or parsed
/// - A root cannot be traversed
/// - Any matched command failed to apply
pub fn execute(
    ctx: &MetafixContext,
    manifest: &Path,
    roots: &[PathBuf],
    dry_run: bool,
    times: bool,
    verbose: bool,
) -> Result<()> {
    let content = std::fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read manifest: {}", manifest.display()))?;
    let commands = parser::parse(content.lines())
        .with_context(|| format!("Failed to parse manifest: {}", manifest.display()))?;

    if commands.is_empty() {
        output::warning("Manifest contains no commands, nothing to do");
        return Ok(());
    }

    let mut lists = Vec::new();
    for root in roots {
        lists.push(walker::walk(root, ctx.config.tracking.follow_symlinks)?);
    }
    let dirs = Directories::new(lists);

    let options = ApplyOptions {
        verbose,
        preserve_mtime: times || ctx.config.tracking.preserve_mtime,
    };

    let report = if dry_run {
        output::info("Dry run, no changes will be made");
        engine::apply(&dirs, &commands, &DryRunFs, &options)
    } else {
        engine::apply(&dirs, &commands, &SystemFs, &options)
    };

    let matched = report.dispatched();
    output::success(&format!(
        "Applied {} update{} and {} delete{} ({} of {} commands matched, {} files seen)",
        report.updated,
        if report.updated == 1 { "" } else { "s" },
        report.deleted,
        if report.deleted == 1 { "" } else { "s" },
        matched,
        commands.len(),
        dirs.file_count(),
    ));

    // Unmatched entries are not an error; the files may have been
    // legitimately removed already.
    let unmatched = commands.len() - matched;
    if unmatched > 0 {
        output::info(&format!(
            "{unmatched} manifest entr{} matched no inode on disk",
            if unmatched == 1 { "y" } else { "ies" }
        ));
    }

    if !report.is_clean() {
        for failure in &report.failures {
            output::error(&format!(
                "  {} (inode {}): {:#}",
                failure.path.display(),
                inode_key(failure.inode),
                failure.error
            ));
        }
        bail!(
            "{} of {} matched commands failed to apply",
            report.failures.len(),
            matched
        );
    }

    Ok(())
}
