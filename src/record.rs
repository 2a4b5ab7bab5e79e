//! Turning a raw segment into columns.
//!
//! Within a segment the first non-blank line is the thermo header and
//! every following line is one row of values, whitespace-delimited in
//! both cases. Everything parses as `f64` first; the `Step` column then
//! narrows to exact integers when it can, so step arithmetic across
//! restarts stays lossless.

use crate::frame::{Column, STEP_COLUMN, ThermoFrame};
use crate::segment::ThermoSegment;
use anyhow::{Context, Result, bail};

/// Parse one segment into a [`ThermoFrame`].
///
/// Blank lines are ignored. A header with no rows yields a frame with the
/// right columns and zero rows, which is what an unfinished run that was
/// killed before its first thermo print looks like.
///
/// # Errors
///
/// Fails when the segment has no header line, a row's value count does not
/// match the header, a value does not parse as a number, or two header
/// fields share a name. Row numbers in errors are 1-based and count data
/// rows.
pub fn segment_to_frame(segment: &ThermoSegment) -> Result<ThermoFrame> {
    let mut content = segment.lines.iter().filter(|line| !line.trim().is_empty());
    let Some(header) = content.next() else {
        bail!("thermo run has no header line");
    };
    let names: Vec<&str> = header.split_whitespace().collect();

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (row_index, row) in content.enumerate() {
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if tokens.len() != names.len() {
            bail!(
                "thermo row {} has {} values, expected {}",
                row_index + 1,
                tokens.len(),
                names.len()
            );
        }
        for (i, token) in tokens.iter().enumerate() {
            let value: f64 = token.parse().with_context(|| {
                format!("parse '{}' in thermo row {}, column {}", token, row_index + 1, names[i])
            })?;
            values[i].push(value);
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, column)| Column::float(name, column))
        .collect();
    let mut frame = ThermoFrame::new(columns)?;

    // Best-effort narrowing; a fractional or overflowing step leaves floats.
    if let Some(step) = frame.column_mut(STEP_COLUMN) {
        step.values_mut().try_narrow_to_int();
    }
    Ok(frame)
}
