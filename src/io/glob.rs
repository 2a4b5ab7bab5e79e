//! Glob expansion for log file collections.
//!
//! A simulation campaign usually leaves a family of logs behind
//! (`log.lammps`, `log.restart1`, `run_*/log.lammps.gz`, ...). The parser
//! takes a single pattern and works on every file it matches, so pattern
//! expansion lives here, with a sorted result for a deterministic processing
//! order.
//!
//! # Examples
//!
//! ```no_run
//! use thermolog::io::glob::expand_glob;
//!
//! // Every log of a chunked run, in lexicographic order
//! let files = expand_glob("runs/equil_*/log.lammps")?;
//! # use anyhow::Error; Ok::<(), Error>(())
//! ```

use anyhow::{Context, Result, bail};
use glob::glob;
use std::path::PathBuf;

/// Expand a glob pattern into a sorted vector of matching file paths.
///
/// Directories are skipped; only regular files are returned. The result is
/// sorted lexicographically, which is what makes multi-file parses
/// reproducible and is also the order restart chains are usually named in
/// (`log.1`, `log.2`, ...).
///
/// # Pattern Syntax
///
/// Supports standard glob patterns:
/// - `*` matches any sequence of characters within a path component
/// - `?` matches any single character
/// - `**` matches zero or more directories
/// - `[abc]` matches any character in the set
/// - `[!abc]` matches any character not in the set
///
/// A plain file path with no metacharacters is a valid pattern matching just
/// that file.
///
/// # Errors
///
/// Returns an error if:
/// - The pattern is invalid
/// - There are I/O errors accessing the filesystem
/// - No files match the pattern (returns empty vector, not an error)
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let paths = glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;

    let mut result = Vec::new();
    for entry in paths {
        let path =
            entry.with_context(|| format!("error reading glob entry for pattern: {pattern}"))?;
        // Only include actual files, not directories
        if path.is_file() {
            result.push(path);
        }
    }

    // Sort for deterministic order
    result.sort();

    Ok(result)
}

/// Expand a glob pattern, returning an error if no files are found.
///
/// This is a stricter variant of [`expand_glob`] that treats zero matches as
/// an error. The parse entry points use it: asking for thermo data from a
/// pattern that matches nothing is always a caller mistake (typo, wrong
/// working directory) and silently returning an empty dataset would hide it.
///
/// # Errors
///
/// Returns an error if:
/// - The pattern is invalid
/// - There are I/O errors accessing the filesystem
/// - No files match the pattern (returns an error, unlike [`expand_glob`])
pub fn expand_glob_required(pattern: &str) -> Result<Vec<PathBuf>> {
    let files = expand_glob(pattern)?;
    if files.is_empty() {
        bail!("no files found matching pattern: {pattern}");
    }
    Ok(files)
}
