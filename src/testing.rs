//! Pre-built log content and file helpers for tests.
//!
//! The fixtures reproduce the shape of real LAMMPS output, setup chatter
//! and timing breakdowns included, so tests exercise the same noise the
//! parser sees in production logs.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Build one thermo block: start marker, header, rows, optional footer.
///
/// `atoms` controls the `Loop time` footer; pass `None` to fake a run that
/// never finished. Rows are emitted verbatim, one line each.
///
/// # Example
///
/// ```
/// use thermolog::testing::thermo_block;
///
/// let block = thermo_block("Step Temp", &["0 1.0", "1 2.0"], Some(100));
/// assert!(block.contains("Loop time"));
/// ```
#[must_use]
pub fn thermo_block(header: &str, rows: &[&str], atoms: Option<u64>) -> String {
    let mut block = String::from(
        "Per MPI rank memory allocation (min/avg/max) = 2.694 | 2.694 | 2.694 Mbytes\n",
    );
    block.push_str(header);
    block.push('\n');
    for row in rows {
        block.push_str(row);
        block.push('\n');
    }
    if let Some(atoms) = atoms {
        block.push_str(&format!(
            "Loop time of 2.30216 on 4 procs for {} steps with {} atoms\n",
            rows.len() * 100,
            atoms
        ));
    }
    block
}

/// A complete single-run log from a small Lennard-Jones melt.
///
/// # Example
///
/// ```
/// use thermolog::testing::single_run_log;
///
/// assert!(single_run_log().contains("Loop time"));
/// ```
#[must_use]
pub fn single_run_log() -> String {
    r#"LAMMPS (2 Aug 2023 - Update 3)
  using 1 OpenMP thread(s) per MPI task
units           lj
atom_style      atomic
lattice         fcc 0.8442
Lattice spacing in x,y,z = 1.6795962 1.6795962 1.6795962
region          box block 0 10 0 10 0 10
create_box      1 box
Created orthogonal box = (0 0 0) to (16.795962 16.795962 16.795962)
create_atoms    1 box
Created 4000 atoms
pair_style      lj/cut 2.5
pair_coeff      1 1 1.0 1.0 2.5
velocity        all create 1.44 87287
fix             1 all nve
thermo          100
run             500
Per MPI rank memory allocation (min/avg/max) = 2.694 | 2.694 | 2.694 Mbytes
   Step          Temp          E_pair         E_mol          TotEng         Press
         0   1.44          -6.7733681      0             -4.6139081     -5.0199732
       100   0.75953175    -5.7614613      0             -4.6228655      0.20910575
       200   0.75351476    -5.7523541      0             -4.6227838      0.36307399
       300   0.74571604    -5.7405892      0             -4.6227148      0.49865439
       400   0.74919908    -5.7453699      0             -4.6222718      0.49517098
       500   0.73854124    -5.7298518      0             -4.6227372      0.5759126
Loop time of 2.30216 on 4 procs for 500 steps with 4000 atoms

Performance: 93825.020 tau/day, 217.188 timesteps/s
97.0% CPU use with 4 MPI tasks x 1 OpenMP threads

MPI task timing breakdown:
Section |  min time  |  avg time  |  max time  |%varavg| %total
---------------------------------------------------------------
Pair    | 1.7620     | 1.8041     | 1.8648     |   3.0 | 78.37
Neigh   | 0.21832    | 0.22294    | 0.22780    |   0.8 |  9.68
Comm    | 0.14542    | 0.20918    | 0.25756    |   9.7 |  9.09
Output  | 0.0013774  | 0.0014968  | 0.0017100  |   0.4 |  0.07
Modify  | 0.041990   | 0.042525   | 0.043071   |   0.2 |  1.85
Other   |            | 0.021924   |            |       |  0.95

Total wall time: 0:00:02
"#
    .to_string()
}

/// A log with two complete runs where the step counter restarts at zero.
///
/// The second run resumes from a restart file, so its `Step` column starts
/// over and its first thermo row repeats the state the first run ended on.
#[must_use]
pub fn restarted_log() -> String {
    r#"LAMMPS (2 Aug 2023 - Update 3)
  using 1 OpenMP thread(s) per MPI task
units           lj
read_data       system.data
Reading data file ...
  orthogonal box = (0 0 0) to (16.795962 16.795962 16.795962)
  4000 atoms
pair_style      lj/cut 2.5
pair_coeff      1 1 1.0 1.0 2.5
fix             1 all nve
thermo          100
run             300
Per MPI rank memory allocation (min/avg/max) = 2.694 | 2.694 | 2.694 Mbytes
   Step          Temp          Press
         0   1.44          -5.0199732
       100   0.75953175     0.20910575
       200   0.75351476     0.36307399
       300   0.74571604     0.49865439
Loop time of 1.38216 on 4 procs for 300 steps with 4000 atoms

Performance: 93825.020 tau/day, 217.188 timesteps/s

write_restart  restart.equil
System init for write_restart ...
read_restart   restart.equil
Reading restart file ...
  restoring atom style atomic from restart
  4000 atoms
reset_timestep  0
run             200
Per MPI rank memory allocation (min/avg/max) = 2.701 | 2.701 | 2.701 Mbytes
   Step          Temp          Press
         0   0.74571604     0.49865439
       100   0.74919908     0.49517098
       200   0.73854124     0.57591260
Loop time of 0.92144 on 4 procs for 200 steps with 4000 atoms

Total wall time: 0:00:03
"#
    .to_string()
}

/// A log whose last run never reached its `Loop time` footer.
#[must_use]
pub fn unfinished_log() -> String {
    r#"LAMMPS (2 Aug 2023 - Update 3)
  using 1 OpenMP thread(s) per MPI task
units           lj
read_data       system.data
Reading data file ...
  4000 atoms
thermo          100
run             200
Per MPI rank memory allocation (min/avg/max) = 2.694 | 2.694 | 2.694 Mbytes
   Step          Temp          Press
         0   1.44          -5.0199732
       100   0.75953175     0.20910575
       200   0.75351476     0.36307399
Loop time of 0.92144 on 4 procs for 200 steps with 4000 atoms

run             1000000
Per MPI rank memory allocation (min/avg/max) = 2.694 | 2.694 | 2.694 Mbytes
   Step          Temp          Press
         0   0.75351476     0.36307399
       100   0.74571604     0.49865439
"#
    .to_string()
}

/// Write log contents under `dir` and return the file's path.
pub fn write_log(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
    Ok(path)
}

/// Write gzip-compressed log contents under `dir` and return the file's path.
#[cfg(feature = "compression-gzip")]
pub fn write_gzipped_log(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    use flate2::{Compression, write::GzEncoder};
    use std::io::Write;

    let path = dir.join(name);
    let file =
        std::fs::File::create(&path).with_context(|| format!("create {}", path.display()))?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(contents.as_bytes())?;
    encoder
        .finish()
        .with_context(|| format!("finish gzip stream for {}", path.display()))?;
    Ok(path)
}
