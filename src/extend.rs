//! Cross-restart column extension.
//!
//! When a simulation is resumed from a restart file, counters like `Step`
//! or accumulated quantities like `Time` often start over at zero in the
//! new run. Extension stitches them back together: for each selected
//! column, every run is shifted by the last already-shifted value of the
//! run before it, folding left to right through one file's runs. The
//! result is a monotone series as if the simulation had never stopped.
//!
//! Extension happens per file, before frames from different files meet.
//! Overlap between files (a restart re-printing the step it resumed from)
//! is the duplicate dropper's problem, not this module's.

use crate::frame::ThermoFrame;
use crate::report::ParseWarning;

/// Shift the named columns so they continue across run boundaries.
///
/// `frames` must be one file's runs in log order. Columns with exact
/// integer storage everywhere are shifted in `i64`; a column that is float
/// in any run is promoted to float in all of them first.
///
/// Failure is soft and per column: a column missing from any run, or
/// requested when there are no runs at all, is left untouched everywhere
/// and reported in the returned warnings. Runs with zero rows pass the
/// running offset through unchanged.
pub fn extend_across_restarts(frames: &mut [ThermoFrame], columns: &[String]) -> Vec<ParseWarning> {
    let mut warnings = Vec::new();
    for name in columns {
        if frames.is_empty() {
            warnings.push(ParseWarning::extend_skipped(name, None));
            continue;
        }
        // All-or-nothing per column: shifting only some runs would splice
        // unrelated scales together.
        if let Some(missing) = frames.iter().position(|f| f.column(name).is_none()) {
            warnings.push(ParseWarning::extend_skipped(name, Some(missing)));
            continue;
        }
        let all_int = frames
            .iter()
            .all(|f| f.column(name).is_some_and(|c| c.values().is_int()));
        if all_int {
            extend_int(frames, name);
        } else {
            extend_float(frames, name);
        }
    }
    warnings
}

fn extend_int(frames: &mut [ThermoFrame], name: &str) {
    let mut carry: Option<i64> = None;
    for frame in frames.iter_mut() {
        let Some(column) = frame.column_mut(name) else { continue };
        let Some(values) = column.values_mut().as_ints_mut() else { continue };
        if let Some(offset) = carry {
            for value in values.iter_mut() {
                *value += offset;
            }
        }
        if let Some(last) = values.last() {
            carry = Some(*last);
        }
    }
}

fn extend_float(frames: &mut [ThermoFrame], name: &str) {
    let mut carry: Option<f64> = None;
    for frame in frames.iter_mut() {
        let Some(column) = frame.column_mut(name) else { continue };
        column.values_mut().promote_to_float();
        let Some(values) = column.values_mut().as_floats_mut() else { continue };
        if let Some(offset) = carry {
            for value in values.iter_mut() {
                *value += offset;
            }
        }
        if let Some(last) = values.last() {
            carry = Some(*last);
        }
    }
}
