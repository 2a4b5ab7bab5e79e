//! Structured diagnostics for a parse.
//!
//! Anything recoverable ends up here instead of in an `Err`: unfinished
//! trailing runs, extension fields that could not be carried across a
//! restart, footers with an unreadable atom count. Warnings are logged as
//! they are recorded and kept in the [`ParseReport`] so callers can act on
//! them programmatically.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// What went wrong, without the file context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// The log ended while a run was still printing thermo rows.
    UnfinishedRun,
    /// A requested extension column was skipped for the whole file.
    ///
    /// `run` is the zero-based index of the first run missing the column,
    /// or `None` when there were no runs to carry it across.
    ExtendSkipped { column: String, run: Option<usize> },
    /// A run footer did not end in `... with <N> atoms`.
    AtomCountUnreadable { line: String },
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnfinishedRun => {
                write!(f, "last run did not finish (no end marker before end of file)")
            }
            WarningKind::ExtendSkipped { column, run: Some(run) } => {
                write!(f, "column '{}' not extended: missing from run {}", column, run + 1)
            }
            WarningKind::ExtendSkipped { column, run: None } => {
                write!(f, "column '{column}' not extended: no runs to carry it across")
            }
            WarningKind::AtomCountUnreadable { line } => {
                write!(f, "could not read the atom count from the run footer: '{line}'")
            }
        }
    }
}

/// A recoverable problem found during parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// File the warning belongs to. Filled in by the driver.
    pub path: Option<PathBuf>,
    pub kind: WarningKind,
}

impl ParseWarning {
    pub fn unfinished_run() -> Self {
        Self { path: None, kind: WarningKind::UnfinishedRun }
    }

    pub fn extend_skipped(column: impl Into<String>, run: Option<usize>) -> Self {
        Self { path: None, kind: WarningKind::ExtendSkipped { column: column.into(), run } }
    }

    pub fn atom_count_unreadable(line: impl Into<String>) -> Self {
        Self { path: None, kind: WarningKind::AtomCountUnreadable { line: line.into() } }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {}", path.display(), self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Per-file run accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// Number of thermo segments found, including an unfinished trailer.
    pub runs: usize,
    /// Runs that reached their end marker.
    pub completed_runs: usize,
    /// Atom count per run; `None` for unfinished runs and unreadable footers.
    pub atoms: Vec<Option<u64>>,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, runs: usize, completed_runs: usize, atoms: Vec<Option<u64>>) -> Self {
        Self { path: path.into(), runs, completed_runs, atoms }
    }

    pub fn is_complete(&self) -> bool {
        self.completed_runs == self.runs
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} runs complete",
            self.path.display(),
            self.completed_runs,
            self.runs
        )
    }
}

/// Everything a parse found out about its inputs, besides the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseReport {
    pub files: Vec<FileReport>,
    pub warnings: Vec<ParseWarning>,
    /// Rows removed by duplicate-step dropping, zero when disabled.
    pub duplicate_rows_dropped: usize,
}

impl ParseReport {
    /// Record a warning, logging it as it lands.
    pub fn push_warning(&mut self, warning: ParseWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    pub fn add_file(&mut self, path: &Path, runs: usize, completed_runs: usize, atoms: Vec<Option<u64>>) {
        self.files.push(FileReport::new(path, runs, completed_runs, atoms));
    }

    pub fn total_runs(&self) -> usize {
        self.files.iter().map(|f| f.runs).sum()
    }

    pub fn completed_runs(&self) -> usize {
        self.files.iter().map(|f| f.completed_runs).sum()
    }

    pub fn all_complete(&self) -> bool {
        self.files.iter().all(FileReport::is_complete)
    }

    /// Log one line per file plus a totals line.
    pub fn log_completeness(&self) {
        for file in &self.files {
            info!("{file}");
        }
        let total = self.total_runs();
        let completed = self.completed_runs();
        if completed == total {
            info!("{} runs across {} files, all complete", total, self.files.len());
        } else {
            warn!("{} of {} runs did not finish", total - completed, total);
        }
    }
}
