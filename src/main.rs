//! # Thermolog CLI
//!
//! Command-line front end for the LAMMPS thermo-log parser.
//!
//! ## Usage
//!
//! ```bash
//! # One concatenated table from a whole campaign
//! thermolog "runs/*/log.lammps"
//!
//! # Stitch restarts back together and export for plotting
//! thermolog log.lammps --extend Step --csv thermo.csv.gz --quiet
//!
//! # Just the interesting columns, with per-file completeness info
//! thermolog "log.*" -c Step -c Temp -c Press --check -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use thermolog::{ParseOptions, ThermoData, parse_logs_with};

/// Extract thermodynamic time series from LAMMPS log files.
#[derive(Parser)]
#[command(name = "thermolog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log file or glob pattern (quote patterns so the shell leaves them alone)
    #[arg(value_name = "PATTERN")]
    pattern: String,

    /// Print one table per run instead of a single concatenated table
    #[arg(long)]
    per_run: bool,

    /// Keep duplicate Step rows at restart boundaries
    #[arg(long)]
    keep_duplicates: bool,

    /// Report per-file run counts and completeness
    #[arg(long)]
    check: bool,

    /// Make a column cumulative across restarts (repeatable)
    #[arg(long = "extend", value_name = "COLUMN")]
    extend: Vec<String>,

    /// Show only these columns (repeatable, order preserved)
    #[arg(short = 'c', long = "column", value_name = "NAME")]
    columns: Vec<String>,

    /// Write the dataset as CSV, compressing when the extension asks for it
    #[cfg(feature = "export-csv")]
    #[arg(long, value_name = "PATH", conflicts_with = "per_run")]
    csv: Option<PathBuf>,

    /// Write the dataset as JSON
    #[arg(long, value_name = "PATH", conflicts_with = "per_run")]
    json: Option<PathBuf>,

    /// Print the atom count of the last completed run
    #[arg(long)]
    atoms: bool,

    /// Suppress the table printout (useful with --csv, --json, --atoms)
    #[arg(short, long)]
    quiet: bool,

    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let options = ParseOptions::default()
        .concat(!cli.per_run)
        .dedup_steps(!cli.keep_duplicates)
        .check_completeness(cli.check)
        .extend_columns(cli.extend.clone());

    let output = parse_logs_with(&cli.pattern, &options)?;

    match output.data {
        ThermoData::Concatenated(frame) => {
            let frame = if cli.columns.is_empty() {
                frame
            } else {
                frame.select(&cli.columns)?
            };
            #[cfg(feature = "export-csv")]
            if let Some(path) = &cli.csv {
                let rows = thermolog::write_csv(&frame, path)?;
                info!("wrote {} rows to {}", rows, path.display());
            }
            if let Some(path) = &cli.json {
                thermolog::write_json(&frame, path)?;
                info!("wrote {}", path.display());
            }
            if !cli.quiet {
                println!("{frame}");
            }
        }
        ThermoData::PerRun(frames) => {
            if !cli.quiet {
                for (index, frame) in frames.into_iter().enumerate() {
                    let frame = if cli.columns.is_empty() {
                        frame
                    } else {
                        frame.select(&cli.columns)?
                    };
                    println!("# run {}", index + 1);
                    println!("{frame}");
                }
            }
        }
    }

    if cli.atoms {
        println!("{}", output.atoms);
    }
    Ok(())
}
