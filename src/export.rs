//! Dataset export.
//!
//! Parsed thermo data usually heads into plotting or analysis scripts, so
//! the export formats are the plain ones those consume: CSV (feature
//! `export-csv`, on by default) and JSON. Both go through the same
//! compression auto-detection as the readers, so writing `thermo.csv.gz`
//! compresses on the fly.

use crate::frame::{ColumnValues, ThermoFrame};
use anyhow::{Context, Result};
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write a frame as CSV, one header row plus one line per thermo row.
///
/// Parent directories are created as needed, and a compressing writer is
/// used when the path carries a known compressed extension. Missing values
/// are written as `NaN`, which is what spreadsheet tools and dataframe
/// libraries read back as not-a-number.
///
/// Returns the number of data rows written.
///
/// # Errors
///
/// Returns an error if the file or its directories cannot be created or a
/// row fails to write.
#[cfg(feature = "export-csv")]
pub fn write_csv(frame: &ThermoFrame, path: impl AsRef<Path>) -> Result<usize> {
    use crate::io::compression::auto_detect_writer;
    use std::fs::create_dir_all;

    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let w = auto_detect_writer(f, path)
        .with_context(|| format!("setup compression for {}", path.display()))?;
    let mut wtr = csv::WriterBuilder::new().from_writer(w);

    wtr.write_record(frame.column_names())
        .context("write CSV header")?;
    for row in 0..frame.rows() {
        let record = frame.columns().iter().map(|c| c.values().cell(row));
        wtr.write_record(record)
            .with_context(|| format!("write CSV row #{}", row + 1))?;
    }
    wtr.flush()?;
    Ok(frame.rows())
}

/// Render a frame as a JSON value.
///
/// The layout is column-oriented: a `columns` array preserving column
/// order, and a `data` object mapping each name to its value array.
/// Integer columns serialize as JSON integers; non-finite floats (the
/// `NaN` missing marker included) become `null`.
pub fn to_json(frame: &ThermoFrame) -> Value {
    let mut data = serde_json::Map::new();
    for column in frame.columns() {
        let values: Vec<Value> = match column.values() {
            ColumnValues::Int(ints) => ints.iter().map(|v| json!(v)).collect(),
            ColumnValues::Float(floats) => floats.iter().map(|v| json!(v)).collect(),
        };
        data.insert(column.name().to_string(), Value::Array(values));
    }
    json!({
        "rows": frame.rows(),
        "columns": frame.column_names().collect::<Vec<_>>(),
        "data": data,
    })
}

/// Write a frame as pretty-printed JSON. See [`to_json`] for the layout.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_json(frame: &ThermoFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let formatted = serde_json::to_string_pretty(&to_json(frame))?;
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    file.write_all(formatted.as_bytes())?;
    Ok(())
}
