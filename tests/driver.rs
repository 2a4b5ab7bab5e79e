//! End-to-end parses over real files on disk.

use anyhow::Result;
use tempfile::TempDir;
use thermolog::testing::{
    restarted_log, single_run_log, thermo_block, unfinished_log, write_log,
};
use thermolog::{
    ParseOptions, ThermoData, ThermoFrame, WarningKind, parse_logs, parse_logs_with,
};

fn as_frame(data: ThermoData) -> ThermoFrame {
    match data {
        ThermoData::Concatenated(frame) => frame,
        ThermoData::PerRun(_) => panic!("expected one concatenated table"),
    }
}

#[test]
fn test_single_file_with_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.lammps", &single_run_log())?;

    let frame = parse_logs(&format!("{}/log.lammps", dir.path().display()))?;

    assert_eq!(frame.rows(), 6);
    assert_eq!(
        frame.column_names().collect::<Vec<_>>(),
        vec!["Step", "Temp", "E_pair", "E_mol", "TotEng", "Press"]
    );
    assert_eq!(
        frame.column("Step").unwrap().values().as_ints(),
        Some(&[0, 100, 200, 300, 400, 500][..])
    );
    assert_eq!(frame.column("Temp").unwrap().get(0), Some(1.44));
    Ok(())
}

#[test]
fn test_report_and_atom_count() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(
        dir.path(),
        "log.lammps",
        &thermo_block("Step Temp", &["0 1.0", "1 2.0"], Some(100)),
    )?;

    let output = parse_logs_with(
        &format!("{}/log.lammps", dir.path().display()),
        &ParseOptions::default(),
    )?;

    assert_eq!(output.atoms, 100);
    assert_eq!(output.report.files.len(), 1);
    assert_eq!(output.report.files[0].runs, 1);
    assert_eq!(output.report.files[0].completed_runs, 1);
    assert_eq!(output.report.files[0].atoms, vec![Some(100)]);
    assert!(output.report.warnings.is_empty());
    assert_eq!(output.report.duplicate_rows_dropped, 0);

    let frame = as_frame(output.data);
    assert_eq!(frame.rows(), 2);
    assert_eq!(frame.column("Step").unwrap().values().as_ints(), Some(&[0, 1][..]));
    assert_eq!(frame.column("Temp").unwrap().values().as_floats(), Some(&[1.0, 2.0][..]));
    Ok(())
}

#[test]
fn test_restarted_log_drops_repeated_steps() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.lammps", &restarted_log())?;

    let output = parse_logs_with(
        &format!("{}/log.lammps", dir.path().display()),
        &ParseOptions::default(),
    )?;

    // Runs of 4 and 3 rows; the second run repeats steps 0, 100, 200.
    assert_eq!(output.report.duplicate_rows_dropped, 3);
    let frame = as_frame(output.data);
    assert_eq!(frame.rows(), 4);
    assert_eq!(frame.column("Step").unwrap().values().as_ints(), Some(&[0, 100, 200, 300][..]));
    // First occurrence wins: step 0 keeps the first run's temperature.
    assert_eq!(frame.column("Temp").unwrap().get(0), Some(1.44));
    Ok(())
}

#[test]
fn test_restarted_log_with_step_extension() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.lammps", &restarted_log())?;

    let options = ParseOptions::default().extend_columns(["Step"]);
    let output = parse_logs_with(&format!("{}/log.lammps", dir.path().display()), &options)?;

    // After extension the second run covers 300..500, so only the seam
    // row at step 300 is a duplicate.
    assert_eq!(output.report.duplicate_rows_dropped, 1);
    let frame = as_frame(output.data);
    assert_eq!(
        frame.column("Step").unwrap().values().as_ints(),
        Some(&[0, 100, 200, 300, 400, 500][..])
    );
    Ok(())
}

#[test]
fn test_unfinished_trailing_run_warns_but_parses() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_log(dir.path(), "log.lammps", &unfinished_log())?;

    let options = ParseOptions::default()
        .dedup_steps(false)
        .check_completeness(true);
    let output = parse_logs_with(&format!("{}/log.lammps", dir.path().display()), &options)?;

    let frame = as_frame(output.data);
    assert_eq!(frame.rows(), 5);

    assert_eq!(output.report.files[0].runs, 2);
    assert_eq!(output.report.files[0].completed_runs, 1);
    assert!(!output.report.files[0].is_complete());
    // The completed first run still supplies the atom count.
    assert_eq!(output.atoms, 4000);

    let unfinished: Vec<_> = output
        .report
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::UnfinishedRun)
        .collect();
    assert_eq!(unfinished.len(), 1);
    assert_eq!(unfinished[0].path.as_deref(), Some(path.as_path()));
    Ok(())
}

#[test]
fn test_files_are_processed_in_sorted_order() -> Result<()> {
    let dir = TempDir::new()?;
    // Create in reverse name order; the parse must not care.
    write_log(dir.path(), "log.b", &thermo_block("Step Temp", &["1 222.0"], Some(10)))?;
    write_log(dir.path(), "log.a", &thermo_block("Step Temp", &["0 111.0"], Some(10)))?;

    let frame = parse_logs(&format!("{}/log.*", dir.path().display()))?;

    assert_eq!(frame.column("Temp").unwrap().values().as_floats(), Some(&[111.0, 222.0][..]));
    Ok(())
}

#[test]
fn test_duplicate_steps_across_files_keep_the_first_file() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(
        dir.path(),
        "log.a",
        &thermo_block("Step Temp", &["0 1.0", "100 2.0"], Some(10)),
    )?;
    write_log(
        dir.path(),
        "log.b",
        &thermo_block("Step Temp", &["100 9.9", "200 3.0"], Some(10)),
    )?;

    let output = parse_logs_with(
        &format!("{}/log.*", dir.path().display()),
        &ParseOptions::default(),
    )?;

    assert_eq!(output.report.duplicate_rows_dropped, 1);
    let frame = as_frame(output.data);
    assert_eq!(frame.column("Step").unwrap().values().as_ints(), Some(&[0, 100, 200][..]));
    assert_eq!(frame.column("Temp").unwrap().values().as_floats(), Some(&[1.0, 2.0, 3.0][..]));
    Ok(())
}

#[test]
fn test_atom_count_comes_from_the_last_file() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.a", &thermo_block("Step Temp", &["0 1.0"], Some(100)))?;
    write_log(dir.path(), "log.b", &thermo_block("Step Temp", &["1 2.0"], Some(250)))?;

    let output = parse_logs_with(
        &format!("{}/log.*", dir.path().display()),
        &ParseOptions::default(),
    )?;
    assert_eq!(output.atoms, 250);
    Ok(())
}

#[test]
fn test_atom_count_zero_when_last_file_never_finished() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.a", &thermo_block("Step Temp", &["0 1.0"], Some(100)))?;
    write_log(dir.path(), "log.b", &thermo_block("Step Temp", &["1 2.0"], None))?;

    let output = parse_logs_with(
        &format!("{}/log.*", dir.path().display()),
        &ParseOptions::default(),
    )?;
    assert_eq!(output.atoms, 0);
    Ok(())
}

#[test]
fn test_no_matching_files_is_an_error() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.log", dir.path().display());

    let result = parse_logs(&pattern);

    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("no files found"));
}

#[test]
fn test_file_without_thermo_data_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "quiet.log", "LAMMPS (2 Aug 2023)\nunits lj\nprint done\n")?;

    let result = parse_logs(&format!("{}/quiet.log", dir.path().display()));

    assert!(result.is_err());
    let message = format!("{:#}", result.err().unwrap());
    assert!(message.contains("no thermo data"));
    assert!(message.contains("quiet.log"));
    Ok(())
}

#[test]
fn test_per_run_mode_keeps_runs_apart() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.lammps", &restarted_log())?;

    let options = ParseOptions::default().concat(false);
    let output = parse_logs_with(&format!("{}/log.lammps", dir.path().display()), &options)?;

    match output.data {
        ThermoData::PerRun(frames) => {
            assert_eq!(frames.len(), 2);
            assert_eq!(frames[0].rows(), 4);
            assert_eq!(frames[1].rows(), 3);
        }
        ThermoData::Concatenated(_) => panic!("expected per-run tables"),
    }
    Ok(())
}

#[test]
fn test_keeping_duplicates_is_possible() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(dir.path(), "log.lammps", &restarted_log())?;

    let options = ParseOptions::default().dedup_steps(false);
    let output = parse_logs_with(&format!("{}/log.lammps", dir.path().display()), &options)?;

    assert_eq!(output.report.duplicate_rows_dropped, 0);
    assert_eq!(as_frame(output.data).rows(), 7);
    Ok(())
}

#[test]
fn test_dedup_needs_a_step_column() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(
        dir.path(),
        "log.lammps",
        &thermo_block("Time Temp", &["0.1 1.0", "0.2 2.0"], Some(100)),
    )?;

    let result = parse_logs(&format!("{}/log.lammps", dir.path().display()));

    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("no 'Step' column"));
    Ok(())
}

#[test]
fn test_extension_is_scoped_to_each_file() -> Result<()> {
    let dir = TempDir::new()?;
    let body = thermo_block("Step Temp", &["0 1.0", "100 2.0"], Some(10));
    write_log(dir.path(), "log.a", &body)?;
    write_log(dir.path(), "log.b", &body)?;

    let options = ParseOptions::default()
        .dedup_steps(false)
        .extend_columns(["Step"]);
    let output = parse_logs_with(&format!("{}/log.*", dir.path().display()), &options)?;

    // Each file is its own restart chain: the second file does not
    // continue from the first one's steps.
    let frame = as_frame(output.data);
    assert_eq!(frame.column("Step").unwrap().values().as_ints(), Some(&[0, 100, 0, 100][..]));
    Ok(())
}

#[test]
fn test_extending_a_missing_column_warns_instead_of_failing() -> Result<()> {
    let dir = TempDir::new()?;
    write_log(
        dir.path(),
        "log.lammps",
        &thermo_block("Step Temp", &["0 1.0", "1 2.0"], Some(100)),
    )?;

    let options = ParseOptions::default().extend_columns(["Flux"]);
    let output = parse_logs_with(&format!("{}/log.lammps", dir.path().display()), &options)?;

    assert!(output.report.warnings.iter().any(|w| matches!(
        &w.kind,
        WarningKind::ExtendSkipped { column, .. } if column == "Flux"
    )));
    assert_eq!(as_frame(output.data).rows(), 2);
    Ok(())
}

#[cfg(feature = "compression-gzip")]
#[test]
fn test_gzipped_log_parses_like_the_plain_one() -> Result<()> {
    use thermolog::testing::write_gzipped_log;

    let dir = TempDir::new()?;
    let contents = restarted_log();
    write_log(dir.path(), "plain.log", &contents)?;
    write_gzipped_log(dir.path(), "packed.log.gz", &contents)?;

    let plain = parse_logs(&format!("{}/plain.log", dir.path().display()))?;
    let packed = parse_logs(&format!("{}/packed.log.gz", dir.path().display()))?;

    assert_eq!(plain, packed);
    Ok(())
}

// Unit tests from src/io/glob.rs
mod glob_unit_tests {
    use anyhow::Result;
    use std::fs::{File, create_dir_all};
    use tempfile::TempDir;
    use thermolog::io::glob::{expand_glob, expand_glob_required};

    #[test]
    fn test_expand_glob_sorted_files_only() -> Result<()> {
        let dir = TempDir::new()?;
        let base = dir.path();

        File::create(base.join("log.3"))?;
        File::create(base.join("log.1"))?;
        File::create(base.join("log.2"))?;
        // A directory matching the pattern must be skipped.
        create_dir_all(base.join("log.4"))?;

        let files = expand_glob(&format!("{}/log.*", base.display()))?;

        assert_eq!(files.len(), 3);
        for pair in files.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        Ok(())
    }

    #[test]
    fn test_expand_glob_empty_is_ok() -> Result<()> {
        let dir = TempDir::new()?;
        let files = expand_glob(&format!("{}/*.log", dir.path().display()))?;
        assert!(files.is_empty());
        Ok(())
    }

    #[test]
    fn test_expand_glob_required_fails_on_empty() {
        let dir = TempDir::new().unwrap();
        let result = expand_glob_required(&format!("{}/*.log", dir.path().display()));

        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().contains("no files found"));
    }

    #[test]
    fn test_plain_path_works_as_a_pattern() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("log.lammps");
        File::create(&path)?;

        let files = expand_glob_required(&path.display().to_string())?;
        assert_eq!(files, vec![path]);
        Ok(())
    }
}
