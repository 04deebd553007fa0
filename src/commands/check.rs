//! Parse and summarize a manifest without applying it.

use crate::manifest::{Command, parser};
use crate::output;
use anyhow::{Context, Result};
use std::path::Path;

/// Parses the manifest and reports what it contains.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or any line is
/// malformed.
pub fn execute(manifest: &Path) -> Result<()> {
    let content = std::fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read manifest: {}", manifest.display()))?;
    let commands = parser::parse(content.lines())
        .with_context(|| format!("Failed to parse manifest: {}", manifest.display()))?;

    let updates = commands
        .values()
        .filter(|c| matches!(c, Command::Update { .. }))
        .count();
    let deletes = commands.len() - updates;

    output::success(&format!(
        "Manifest OK: {} command{} ({updates} update{}, {deletes} delete{})",
        commands.len(),
        if commands.len() == 1 { "" } else { "s" },
        if updates == 1 { "" } else { "s" },
        if deletes == 1 { "" } else { "s" },
    ));

    Ok(())
}
