//! # Thermolog
//!
//! A parser that turns **LAMMPS log files** into columnar thermodynamic
//! datasets. Point it at a file or a glob pattern and it collects every
//! thermo table the logs contain into one dataset, ready for plotting or
//! further analysis.
//!
//! ## Key Features
//!
//! - **Multi-file input** - glob patterns, processed in sorted order
//! - **Multi-run logs** - every `run` command's thermo table is found,
//!   including an unfinished one at the end of a killed simulation
//! - **Restart stitching** - duplicate steps at restart boundaries are
//!   dropped, and selected columns can be extended so counters continue
//!   across restarts instead of resetting to zero
//! - **Exact steps** - the `Step` column keeps integer storage whenever
//!   the values allow it
//! - **Compressed logs** - gzip out of the box, zstd/bzip2/xz via
//!   feature flags
//! - **Structured reporting** - run counts, atom counts, and recoverable
//!   problems come back as data, not just log lines
//!
//! ## Quick Start
//!
//! ```no_run
//! use thermolog::{ParseOptions, ThermoData};
//!
//! # fn main() -> anyhow::Result<()> {
//! // One concatenated table, restart duplicates dropped
//! let data = thermolog::parse_logs("runs/*/log.lammps")?;
//! println!("{data}");
//!
//! // Full control plus the parse report
//! let options = ParseOptions::default()
//!     .extend_columns(["Step"])
//!     .check_completeness(true);
//! let output = thermolog::parse_logs_with("log.lammps", &options)?;
//! if let ThermoData::Concatenated(frame) = &output.data {
//!     println!("{} rows, last run had {} atoms", frame.rows(), output.atoms);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## What Gets Parsed
//!
//! A thermo table sits between two marker lines in the log:
//!
//! ```text
//! Per MPI rank memory allocation (min/avg/max) = 2.694 | 2.694 | 2.694 Mbytes
//!    Step          Temp          E_pair        ...
//!          0   1.44          -6.7733681       ...
//!        100   0.75953175    -5.7614613       ...
//! Loop time of 2.30216 on 4 procs for 100 steps with 4000 atoms
//! ```
//!
//! Serial logs open with `Memory usage per processor` instead; both
//! variants are recognized. Everything outside the markers is ignored, so
//! script commands, warnings, and timing breakdowns never reach the
//! parser. The `Loop time` footer also supplies the per-run atom count.
//!
//! ## Restart Handling
//!
//! Two things go wrong with restarted simulations, and each has its own
//! remedy:
//!
//! - A restart re-prints the step it resumed from, so the concatenated
//!   table would carry duplicate rows. Duplicate dropping (on by default)
//!   keeps the first occurrence of every `Step`.
//! - With `reset_timestep`, counters start over at zero in the new run.
//!   [`ParseOptions::extend_columns`] shifts selected columns run by run
//!   so they continue monotonically, exact integer arithmetic included.
//!
//! ## Feature Flags
//!
//! - `export-csv` *(default)* - CSV export via the `csv` crate
//! - `compression-gzip` *(default)* - read/write `.gz` files
//! - `compression-zstd`, `compression-bzip2`, `compression-xz` - further
//!   codecs
//!
//! ## Module Overview
//!
//! - [`frame`] - the columnar [`ThermoFrame`] data model
//! - [`segment`] - marker-driven run segmentation
//! - [`record`] - raw segment lines to typed columns
//! - [`extend`] - cross-restart column extension
//! - [`parse`] - the driver tying everything together
//! - [`report`] - warnings and per-file run accounting
//! - [`export`] - CSV and JSON output
//! - [`io`] - glob expansion, decompression, line source
//! - [`testing`] - log fixtures for tests

pub mod config;
pub mod export;
pub mod extend;
pub mod frame;
pub mod io;
pub mod parse;
pub mod record;
pub mod report;
pub mod segment;
pub mod testing;

// General re-exports
pub use config::ParseOptions;
pub use export::{to_json, write_json};
pub use extend::extend_across_restarts;
pub use frame::{Column, ColumnValues, STEP_COLUMN, ThermoFrame};
pub use parse::{ParseOutput, ThermoData, parse_logs, parse_logs_with};
pub use record::segment_to_frame;
pub use report::{FileReport, ParseReport, ParseWarning, WarningKind};
pub use segment::{
    FileSegments, RUN_END_MARKER, RUN_START_MARKERS, ThermoSegment, split_segments,
};

// Gated re-exports
#[cfg(feature = "export-csv")]
pub use export::write_csv;
