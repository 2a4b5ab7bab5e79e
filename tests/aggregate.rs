//! Concatenation, duplicate dropping, selection, and table display.

use anyhow::Result;
use thermolog::{Column, ThermoFrame};

fn frame(columns: Vec<Column>) -> ThermoFrame {
    ThermoFrame::new(columns).unwrap()
}

#[test]
fn test_concat_stacks_rows_in_input_order() {
    let first = frame(vec![
        Column::int("Step", vec![0, 100]),
        Column::float("Temp", vec![1.0, 2.0]),
    ]);
    let second = frame(vec![
        Column::int("Step", vec![200, 300]),
        Column::float("Temp", vec![3.0, 4.0]),
    ]);

    let merged = ThermoFrame::concat(&[first, second]);

    assert_eq!(merged.rows(), 4);
    assert_eq!(merged.column("Step").unwrap().values().as_ints(), Some(&[0, 100, 200, 300][..]));
    assert_eq!(
        merged.column("Temp").unwrap().values().as_floats(),
        Some(&[1.0, 2.0, 3.0, 4.0][..])
    );
}

#[test]
fn test_concat_unions_columns_and_fills_missing_with_nan() {
    let first = frame(vec![
        Column::int("Step", vec![0, 100]),
        Column::float("Temp", vec![1.0, 2.0]),
    ]);
    let second = frame(vec![
        Column::int("Step", vec![200, 300]),
        Column::float("Press", vec![5.0, 6.0]),
    ]);

    let merged = ThermoFrame::concat(&[first, second]);

    // Union in first-appearance order.
    assert_eq!(merged.column_names().collect::<Vec<_>>(), vec!["Step", "Temp", "Press"]);
    // Step appears as Int everywhere and stays Int.
    assert_eq!(merged.column("Step").unwrap().values().as_ints(), Some(&[0, 100, 200, 300][..]));

    let temp = merged.column("Temp").unwrap();
    assert_eq!(temp.get(1), Some(2.0));
    assert!(temp.get(2).unwrap().is_nan());
    let press = merged.column("Press").unwrap();
    assert!(press.get(0).unwrap().is_nan());
    assert_eq!(press.get(3), Some(6.0));
}

#[test]
fn test_concat_demotes_int_when_any_input_is_float() {
    let first = frame(vec![Column::int("Step", vec![0, 1])]);
    let second = frame(vec![Column::float("Step", vec![2.5, 3.5])]);

    let merged = ThermoFrame::concat(&[first, second]);

    assert!(merged.column("Step").unwrap().values().as_ints().is_none());
    assert_eq!(
        merged.column("Step").unwrap().values().as_floats(),
        Some(&[0.0, 1.0, 2.5, 3.5][..])
    );
}

#[test]
fn test_concat_of_nothing_is_empty() {
    let merged = ThermoFrame::concat(&[]);
    assert!(merged.is_empty());
    assert!(merged.columns().is_empty());
}

#[test]
fn test_dedup_keeps_the_first_occurrence() -> Result<()> {
    let mut merged = frame(vec![
        Column::int("Step", vec![0, 100, 100, 200]),
        Column::float("Temp", vec![10.0, 11.0, 99.0, 12.0]),
    ]);

    let dropped = merged.dedup_by("Step")?;

    assert_eq!(dropped, 1);
    assert_eq!(merged.rows(), 3);
    assert_eq!(merged.column("Step").unwrap().values().as_ints(), Some(&[0, 100, 200][..]));
    // The 99.0 row came second and is the one that goes.
    assert_eq!(
        merged.column("Temp").unwrap().values().as_floats(),
        Some(&[10.0, 11.0, 12.0][..])
    );
    Ok(())
}

#[test]
fn test_dedup_is_idempotent() -> Result<()> {
    let mut merged = frame(vec![Column::int("Step", vec![0, 0, 1, 1, 2])]);

    assert_eq!(merged.dedup_by("Step")?, 2);
    assert_eq!(merged.dedup_by("Step")?, 0);
    assert_eq!(merged.column("Step").unwrap().values().as_ints(), Some(&[0, 1, 2][..]));
    Ok(())
}

#[test]
fn test_dedup_works_on_float_keys() -> Result<()> {
    let mut merged = frame(vec![Column::float("Step", vec![0.0, 0.0, 0.5])]);

    assert_eq!(merged.dedup_by("Step")?, 1);
    assert_eq!(merged.rows(), 2);
    Ok(())
}

#[test]
fn test_dedup_without_the_key_column_is_an_error() {
    let mut merged = frame(vec![Column::float("Temp", vec![1.0, 2.0])]);

    let result = merged.dedup_by("Step");
    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("no 'Step' column"));
}

#[test]
fn test_dedup_keeps_columns_aligned() -> Result<()> {
    let mut merged = frame(vec![
        Column::int("Step", vec![0, 0, 1]),
        Column::float("Temp", vec![1.0, 2.0, 3.0]),
        Column::float("Press", vec![7.0, 8.0, 9.0]),
    ]);

    merged.dedup_by("Step")?;

    for column in merged.columns() {
        assert_eq!(column.len(), merged.rows());
    }
    assert_eq!(merged.column("Press").unwrap().values().as_floats(), Some(&[7.0, 9.0][..]));
    Ok(())
}

#[test]
fn test_select_returns_columns_in_requested_order() -> Result<()> {
    let merged = frame(vec![
        Column::int("Step", vec![0, 1]),
        Column::float("Temp", vec![1.0, 2.0]),
        Column::float("Press", vec![5.0, 6.0]),
    ]);

    let picked = merged.select(&["Press", "Step"])?;

    assert_eq!(picked.column_names().collect::<Vec<_>>(), vec!["Press", "Step"]);
    assert_eq!(picked.rows(), 2);
    Ok(())
}

#[test]
fn test_select_unknown_column_is_an_error() {
    let merged = frame(vec![Column::int("Step", vec![0, 1])]);

    let result = merged.select(&["Volume"]);
    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("no 'Volume' column"));
}

#[test]
fn test_display_prints_small_frames_in_full() {
    let merged = frame(vec![
        Column::int("Step", vec![0, 100, 200]),
        Column::float("Temp", vec![1.44, 0.75953175, 0.75351476]),
    ]);

    let rendered = format!("{merged}");

    assert!(rendered.contains("Step"));
    assert!(rendered.contains("Temp"));
    assert!(rendered.contains("0.75953175"));
    assert!(!rendered.contains("..."));
}

#[test]
fn test_display_truncates_long_frames() {
    let steps: Vec<i64> = (0..50).collect();
    let temps: Vec<f64> = (0..50).map(|i| i as f64 / 10.0).collect();
    let merged = frame(vec![Column::int("Step", steps), Column::float("Temp", temps)]);

    let rendered = format!("{merged}");

    assert!(rendered.contains("..."));
    assert!(rendered.contains("[50 rows x 2 columns]"));
    // Head and tail survive the cut; the middle does not.
    assert!(rendered.contains("0.9"));
    assert!(rendered.contains("4.9"));
    assert!(!rendered.contains("2.5"));
}

#[test]
fn test_frames_reject_ragged_columns() {
    let result = ThermoFrame::new(vec![
        Column::int("Step", vec![0, 1]),
        Column::float("Temp", vec![1.0]),
    ]);

    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("Temp"));
}

#[test]
fn test_frames_reject_duplicate_names() {
    let result = ThermoFrame::new(vec![
        Column::int("Step", vec![0]),
        Column::float("Step", vec![1.0]),
    ]);

    assert!(result.is_err());
    assert!(result.err().unwrap().to_string().contains("duplicate"));
}
