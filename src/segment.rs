//! Run segmentation.
//!
//! A LAMMPS log interleaves commands, setup chatter, and one thermo table
//! per `run`-style command. Each table sits between a memory-report line
//! (the start marker) and a `Loop time` footer (the end marker). This
//! module walks a file's lines with a two-state machine and cuts out those
//! tables, keeping nothing but the header and data rows in between.
//!
//! Two behaviors matter for real logs:
//!
//! - A start marker seen while already collecting throws away the partial
//!   buffer and starts fresh. A crashed run followed by a restart in the
//!   same file therefore contributes only the restarted table.
//! - A file that ends mid-run keeps the partial table, flagged as
//!   unfinished, so a still-running or killed simulation can be inspected.

use crate::report::ParseWarning;
use anyhow::{Result, bail};

/// Line prefixes that open a thermo table.
///
/// Serial runs print `Memory usage per processor ...`, MPI runs print
/// `Per MPI rank memory allocation ...`. The thermo header is the next
/// line in both cases.
pub const RUN_START_MARKERS: [&str; 2] = ["Memory usage", "Per MPI rank"];

/// Line prefix that closes a thermo table.
pub const RUN_END_MARKER: &str = "Loop time";

/// One extracted thermo table, still in raw line form.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermoSegment {
    /// Header line followed by data rows. Marker lines are not included.
    pub lines: Vec<String>,
    /// Whether the run reached its `Loop time` footer.
    pub terminated: bool,
    /// Atom count from the footer; `None` for unfinished runs and
    /// footers that do not follow the `... with <N> atoms` shape.
    pub atoms: Option<u64>,
}

/// Segmentation result for one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSegments {
    pub segments: Vec<ThermoSegment>,
    pub warnings: Vec<ParseWarning>,
}

impl FileSegments {
    /// Atom count of the last run that finished, 0 when none did or the
    /// footer was unreadable.
    pub fn last_completed_atoms(&self) -> u64 {
        self.segments
            .iter()
            .rev()
            .find(|s| s.terminated)
            .and_then(|s| s.atoms)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Between runs, skipping over script commands and setup output.
    Scanning,
    /// Inside a thermo table, buffering lines until the end marker.
    Collecting,
}

fn is_run_start(line: &str) -> bool {
    RUN_START_MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// Pull the atom count out of a `Loop time` footer.
///
/// The footer reads `Loop time of <t> on <P> procs for <S> steps with
/// <N> atoms`; only the trailing `<N> atoms` pair is relied on.
fn footer_atom_count(line: &str) -> Option<u64> {
    let mut tokens = line.split_whitespace().rev();
    let unit = tokens.next()?;
    let count = tokens.next()?;
    if unit != "atoms" {
        return None;
    }
    count.parse().ok()
}

/// Cut a file's lines into thermo segments.
///
/// # Errors
///
/// Fails when the file contains no thermo table at all. Everything else
/// that can go wrong here is recoverable and lands in
/// [`FileSegments::warnings`].
pub fn split_segments(lines: &[String]) -> Result<FileSegments> {
    let mut segments = Vec::new();
    let mut warnings = Vec::new();
    let mut state = ScanState::Scanning;
    let mut buffer: Vec<String> = Vec::new();

    for line in lines {
        if is_run_start(line) {
            // Fresh buffer either way: a start marker mid-collection means
            // the previous run never finished and its rows are stale.
            buffer = Vec::new();
            state = ScanState::Collecting;
        } else if line.starts_with(RUN_END_MARKER) {
            if state == ScanState::Collecting {
                let atoms = footer_atom_count(line);
                if atoms.is_none() {
                    warnings.push(ParseWarning::atom_count_unreadable(line));
                }
                segments.push(ThermoSegment {
                    lines: std::mem::take(&mut buffer),
                    terminated: true,
                    atoms,
                });
                state = ScanState::Scanning;
            }
            // A stray footer while scanning closes nothing.
        } else if state == ScanState::Collecting {
            buffer.push(line.clone());
        }
    }

    if state == ScanState::Collecting {
        warnings.push(ParseWarning::unfinished_run());
        segments.push(ThermoSegment { lines: buffer, terminated: false, atoms: None });
    }

    if segments.is_empty() {
        bail!("no thermo data found");
    }
    Ok(FileSegments { segments, warnings })
}
