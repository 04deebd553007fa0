//! CLI command implementations.

/// Apply a manifest to one or more directory trees.
pub mod apply;
/// Parse and summarize a manifest without applying it.
pub mod check;
/// Emit manifest lines describing the current state of a tree.
pub mod scan;
