//! Line source for a single log file.
//!
//! Reads a whole log into memory as raw lines, decompressing on the fly when
//! the file is a compressed archive. Thermo extraction is a multi-pass
//! affair over a line window (header plus rows), so the in-memory form is
//! the right trade: even a long production log is small next to the
//! trajectory files that accompany it.

use crate::io::compression::auto_detect_reader;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every line of a log file, transparently decompressing it.
///
/// Lines are returned verbatim, including blank ones; the segment extractor
/// decides what matters. Line numbers in error messages are 1-based.
///
/// # Errors
///
/// Returns an error if the file cannot be opened, the compression wrapper
/// cannot be constructed, or a line is not valid UTF-8.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let reader = auto_detect_reader(file, path)
        .with_context(|| format!("set up decompression for {}", path.display()))?;
    let buf_reader = BufReader::new(reader);

    let mut lines = Vec::new();
    for (idx, line) in buf_reader.lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", idx + 1, path.display()))?;
        lines.push(line);
    }
    Ok(lines)
}
