//! Columnar thermo data.
//!
//! A [`ThermoFrame`] holds one table of thermodynamic output: named columns
//! of equal length, one row per thermo print. Values are `f64` throughout,
//! except columns that survive integer narrowing (notably `Step`), which
//! keep exact `i64` storage so restart bookkeeping never loses precision.
//!
//! Missing values use `NaN` as the marker, which only arises when frames
//! with different column sets are concatenated.

use anyhow::{Context, Result, bail};
use ordered_float::OrderedFloat;
use std::collections::HashSet;
use std::fmt;

/// Name of the timestep column, the default key for duplicate dropping.
pub const STEP_COLUMN: &str = "Step";

const DISPLAY_HEAD: usize = 10;
const DISPLAY_TAIL: usize = 10;

/// Storage for one column.
///
/// Thermo output is numeric, so there are exactly two representations:
/// `Float` for general quantities and `Int` for counters that narrowed to
/// exact integers.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Float(Vec<f64>),
    Int(Vec<i64>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Float(values) => values.len(),
            ColumnValues::Int(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the column kept exact integer storage.
    pub fn is_int(&self) -> bool {
        matches!(self, ColumnValues::Int(_))
    }

    /// Value at `row`, widened to `f64`.
    pub fn get(&self, row: usize) -> Option<f64> {
        match self {
            ColumnValues::Float(values) => values.get(row).copied(),
            ColumnValues::Int(values) => values.get(row).map(|v| *v as f64),
        }
    }

    /// Last value, widened to `f64`.
    pub fn last(&self) -> Option<f64> {
        match self {
            ColumnValues::Float(values) => values.last().copied(),
            ColumnValues::Int(values) => values.last().map(|v| *v as f64),
        }
    }

    /// Iterate all values widened to `f64`.
    pub fn iter_f64(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| match self {
            ColumnValues::Float(values) => values[i],
            ColumnValues::Int(values) => values[i] as f64,
        })
    }

    /// Borrow the exact integer storage, if this is an `Int` column.
    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            ColumnValues::Int(values) => Some(values),
            ColumnValues::Float(_) => None,
        }
    }

    /// Borrow the float storage, if this is a `Float` column.
    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            ColumnValues::Float(values) => Some(values),
            ColumnValues::Int(_) => None,
        }
    }

    pub(crate) fn as_floats_mut(&mut self) -> Option<&mut Vec<f64>> {
        match self {
            ColumnValues::Float(values) => Some(values),
            ColumnValues::Int(_) => None,
        }
    }

    pub(crate) fn as_ints_mut(&mut self) -> Option<&mut Vec<i64>> {
        match self {
            ColumnValues::Int(values) => Some(values),
            ColumnValues::Float(_) => None,
        }
    }

    /// Switch an `Int` column to float storage. No-op on `Float` columns.
    pub(crate) fn promote_to_float(&mut self) {
        if let ColumnValues::Int(values) = self {
            let widened = values.iter().map(|v| *v as f64).collect();
            *self = ColumnValues::Float(widened);
        }
    }

    /// Narrow float storage to `i64` when every value is exactly integral.
    ///
    /// The narrowing is all-or-nothing: a single fractional, non-finite, or
    /// out-of-range value keeps the whole column as floats. Returns whether
    /// the column holds integers afterwards.
    pub(crate) fn try_narrow_to_int(&mut self) -> bool {
        let ColumnValues::Float(values) = self else {
            return true;
        };
        let exact = values
            .iter()
            .all(|v| v.fract() == 0.0 && (*v as i64) as f64 == *v);
        if exact {
            let narrowed = values.iter().map(|v| *v as i64).collect();
            *self = ColumnValues::Int(narrowed);
        }
        exact
    }

    /// Render one value the way the table printer and CSV export show it.
    pub(crate) fn cell(&self, row: usize) -> String {
        match self {
            ColumnValues::Float(values) => values.get(row).map(|v| v.to_string()),
            ColumnValues::Int(values) => values.get(row).map(|v| v.to_string()),
        }
        .unwrap_or_default()
    }
}

/// A named column of thermo values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values: ColumnValues::Float(values) }
    }

    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self { name: name.into(), values: ColumnValues::Int(values) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut ColumnValues {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `row`, widened to `f64`.
    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row)
    }

    /// The whole column widened to `f64`.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values.iter_f64().collect()
    }
}

/// One table of thermodynamic output.
///
/// All columns have the same length and unique names; the constructors
/// enforce both. Row identity is purely positional, so any row removal
/// reindexes the remaining rows implicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermoFrame {
    columns: Vec<Column>,
    rows: usize,
}

impl ThermoFrame {
    /// Build a frame from columns, validating the shape.
    ///
    /// # Errors
    ///
    /// Fails when two columns share a name or the columns have unequal
    /// lengths.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                bail!("duplicate column '{}'", column.name());
            }
            if column.len() != rows {
                bail!(
                    "column '{}' has {} rows, expected {}",
                    column.name(),
                    column.len(),
                    rows
                );
            }
        }
        Ok(Self { columns, rows })
    }

    /// A frame with no columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name() == name)
    }

    /// A new frame holding only the named columns, in the given order.
    ///
    /// # Errors
    ///
    /// Fails when any requested column does not exist.
    pub fn select(&self, names: &[impl AsRef<str>]) -> Result<Self> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let column = self
                .column(name)
                .with_context(|| format!("no '{name}' column in the dataset"))?;
            columns.push(column.clone());
        }
        let rows = if columns.is_empty() { 0 } else { self.rows };
        Ok(Self { columns, rows })
    }

    /// Stack frames vertically into one table.
    ///
    /// The output column set is the union of all input columns, ordered by
    /// first appearance. A column missing from some input contributes `NaN`
    /// for that input's rows instead of failing the merge. Integer storage
    /// survives only when the column is present, and integral, in every
    /// input; otherwise the merged column is float.
    pub fn concat(frames: &[ThermoFrame]) -> ThermoFrame {
        let mut names: Vec<&str> = Vec::new();
        for frame in frames {
            for column in frame.columns() {
                if !names.contains(&column.name()) {
                    names.push(column.name());
                }
            }
        }
        let total: usize = frames.iter().map(ThermoFrame::rows).sum();

        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let all_int = frames
                .iter()
                .all(|f| f.column(name).is_some_and(|c| c.values().is_int()));
            if all_int {
                let mut merged: Vec<i64> = Vec::with_capacity(total);
                for frame in frames {
                    if let Some(column) = frame.column(name)
                        && let Some(ints) = column.values().as_ints()
                    {
                        merged.extend_from_slice(ints);
                    }
                }
                columns.push(Column::int(name, merged));
            } else {
                let mut merged: Vec<f64> = Vec::with_capacity(total);
                for frame in frames {
                    match frame.column(name) {
                        Some(column) => merged.extend(column.values().iter_f64()),
                        None => merged.extend(std::iter::repeat_n(f64::NAN, frame.rows())),
                    }
                }
                columns.push(Column::float(name, merged));
            }
        }
        ThermoFrame { columns, rows: total }
    }

    /// Drop rows whose `key` value was already seen, keeping first
    /// occurrences. Returns the number of rows removed.
    ///
    /// Equal float values collapse even when `NaN` (two `NaN` keys count as
    /// duplicates). Remaining rows keep their relative order and are
    /// renumbered positionally.
    ///
    /// # Errors
    ///
    /// Fails when the frame has no `key` column.
    pub fn dedup_by(&mut self, key: &str) -> Result<usize> {
        let column = self
            .column(key)
            .with_context(|| format!("cannot drop duplicate rows: no '{key}' column in the dataset"))?;

        let keep: Vec<bool> = match column.values() {
            ColumnValues::Int(values) => {
                let mut seen = HashSet::with_capacity(values.len());
                values.iter().map(|v| seen.insert(*v)).collect()
            }
            ColumnValues::Float(values) => {
                let mut seen = HashSet::with_capacity(values.len());
                values.iter().map(|v| seen.insert(OrderedFloat(*v))).collect()
            }
        };

        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            self.retain_rows(&keep);
        }
        Ok(dropped)
    }

    /// Keep only rows flagged `true`, preserving order.
    fn retain_rows(&mut self, keep: &[bool]) {
        for column in &mut self.columns {
            match column.values_mut() {
                ColumnValues::Float(values) => {
                    let mut flags = keep.iter();
                    values.retain(|_| *flags.next().unwrap_or(&false));
                }
                ColumnValues::Int(values) => {
                    let mut flags = keep.iter();
                    values.retain(|_| *flags.next().unwrap_or(&false));
                }
            }
        }
        self.rows = keep.iter().filter(|k| **k).count();
    }
}

/// Fixed-width table rendering, truncated in the middle for long frames.
impl fmt::Display for ThermoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "(empty dataset)");
        }

        let truncated = self.rows > DISPLAY_HEAD + DISPLAY_TAIL;
        let shown: Vec<usize> = if truncated {
            (0..DISPLAY_HEAD)
                .chain(self.rows - DISPLAY_TAIL..self.rows)
                .collect()
        } else {
            (0..self.rows).collect()
        };

        // Pre-render the visible cells to size each column.
        let rendered: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| shown.iter().map(|&r| c.values().cell(r)).collect())
            .collect();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&rendered)
            .map(|(c, cells)| {
                cells
                    .iter()
                    .map(String::len)
                    .max()
                    .unwrap_or(0)
                    .max(c.name().len())
            })
            .collect();
        let index_width = {
            let max_index = self.rows.saturating_sub(1).to_string().len();
            if truncated { max_index.max(3) } else { max_index }
        };

        write!(f, "{:>width$}", "", width = index_width)?;
        for (column, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.name(), width = w)?;
        }
        writeln!(f)?;

        for (k, &row) in shown.iter().enumerate() {
            if truncated && k == DISPLAY_HEAD {
                write!(f, "{:>width$}", "...", width = index_width)?;
                for w in &widths {
                    write!(f, "  {:>width$}", "...", width = w)?;
                }
                writeln!(f)?;
            }
            write!(f, "{:>width$}", row, width = index_width)?;
            for (cells, w) in rendered.iter().zip(&widths) {
                write!(f, "  {:>width$}", cells[k], width = w)?;
            }
            writeln!(f)?;
        }

        if truncated {
            writeln!(f)?;
            write!(f, "[{} rows x {} columns]", self.rows, self.columns.len())?;
        }
        Ok(())
    }
}
