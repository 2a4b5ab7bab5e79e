//! The driver: a file pattern in, one dataset out.
//!
//! Processing order is fixed: files expand in sorted order, runs stay in
//! log order within each file, and extension runs before frames from
//! different files are stacked. That ordering is what makes duplicate
//! dropping deterministic (first occurrence wins) and extension offsets
//! meaningful.

use crate::config::ParseOptions;
use crate::extend::extend_across_restarts;
use crate::frame::{STEP_COLUMN, ThermoFrame};
use crate::io::glob::expand_glob_required;
use crate::io::lines::read_lines;
use crate::record::segment_to_frame;
use crate::report::ParseReport;
use crate::segment::split_segments;
use anyhow::{Context, Result};
use log::debug;

/// Parsed thermo data, in the shape the options asked for.
#[derive(Debug, Clone)]
pub enum ThermoData {
    /// All runs stacked into one table.
    Concatenated(ThermoFrame),
    /// One table per run, in file-then-run order.
    PerRun(Vec<ThermoFrame>),
}

impl ThermoData {
    /// Collapse to a single table regardless of shape.
    ///
    /// Per-run data is stacked without duplicate dropping; data that was
    /// already concatenated is returned as-is.
    pub fn concatenate(self) -> ThermoFrame {
        match self {
            ThermoData::Concatenated(frame) => frame,
            ThermoData::PerRun(frames) => ThermoFrame::concat(&frames),
        }
    }
}

/// Everything a parse produces.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub data: ThermoData,
    /// Atom count of the last completed run in the last file, 0 when the
    /// last file has no completed run.
    pub atoms: u64,
    pub report: ParseReport,
}

/// Parse every log matching `pattern` with default options.
///
/// Returns one concatenated table with duplicate steps dropped. Use
/// [`parse_logs_with`] for the run report, the atom count, or any
/// non-default behavior.
///
/// # Examples
///
/// ```no_run
/// # fn main() -> anyhow::Result<()> {
/// let data = thermolog::parse_logs("runs/*/log.lammps")?;
/// println!("{} thermo rows", data.rows());
/// # Ok(())
/// # }
/// ```
pub fn parse_logs(pattern: &str) -> Result<ThermoFrame> {
    let output = parse_logs_with(pattern, &ParseOptions::default())?;
    Ok(output.data.concatenate())
}

/// Parse every log matching `pattern`.
///
/// # Errors
///
/// Fails when the pattern matches no files, a file cannot be read, a file
/// contains no thermo data at all, a thermo row is malformed, or duplicate
/// dropping is enabled on data without a `Step` column. Unfinished runs and
/// skipped extension columns are not errors; they land in the report's
/// warnings.
pub fn parse_logs_with(pattern: &str, options: &ParseOptions) -> Result<ParseOutput> {
    let paths = expand_glob_required(pattern)?;
    debug!("pattern {} matched {} files", pattern, paths.len());

    let mut report = ParseReport::default();
    let mut frames: Vec<ThermoFrame> = Vec::new();
    let mut atoms: u64 = 0;

    for path in &paths {
        let lines = read_lines(path)?;
        let extracted =
            split_segments(&lines).with_context(|| format!("parse {}", path.display()))?;

        // The collection-level atom count is the last file's; each pass
        // through the loop overwrites the previous file's value.
        atoms = extracted.last_completed_atoms();
        for warning in extracted.warnings {
            report.push_warning(warning.with_path(path));
        }

        let segments = extracted.segments;
        debug!("{}: {} runs", path.display(), segments.len());
        report.add_file(
            path,
            segments.len(),
            segments.iter().filter(|s| s.terminated).count(),
            segments.iter().map(|s| s.atoms).collect(),
        );

        let mut file_frames = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let frame = segment_to_frame(segment)
                .with_context(|| format!("parse thermo run {} in {}", index + 1, path.display()))?;
            file_frames.push(frame);
        }

        // Extension is scoped to one file's restart chain.
        if !options.extend_columns.is_empty() {
            for warning in extend_across_restarts(&mut file_frames, &options.extend_columns) {
                report.push_warning(warning.with_path(path));
            }
        }
        frames.append(&mut file_frames);
    }

    if options.check_completeness {
        report.log_completeness();
    }

    let data = if options.concat {
        let mut frame = ThermoFrame::concat(&frames);
        if options.dedup_steps {
            report.duplicate_rows_dropped = frame.dedup_by(STEP_COLUMN)?;
            if report.duplicate_rows_dropped > 0 {
                debug!("dropped {} duplicate step rows", report.duplicate_rows_dropped);
            }
        }
        ThermoData::Concatenated(frame)
    } else {
        ThermoData::PerRun(frames)
    };

    if options.print_table {
        match &data {
            ThermoData::Concatenated(frame) => println!("{frame}"),
            ThermoData::PerRun(per_run) => {
                for (index, frame) in per_run.iter().enumerate() {
                    println!("# run {}", index + 1);
                    println!("{frame}");
                }
            }
        }
    }

    Ok(ParseOutput { data, atoms, report })
}
