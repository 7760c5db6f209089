//! CSV export round-trip through the filesystem

use ptlx::csv_output::{CsvOutput, CSV_COLUMNS};
use ptlx::{PtlxError, Simulation, SimulationConfig};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_reference_run_round_trips_through_file() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("simulation.csv");

    let batch = Simulation::new(SimulationConfig::default())
        .unwrap()
        .compute()
        .unwrap();
    CsvOutput::new(&batch).write_to_path(&path).unwrap();

    let parsed = CsvOutput::read_from_path(&path).unwrap();
    assert_eq!(parsed, batch);
}

#[test]
fn test_file_has_header_and_one_row_per_sample() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("simulation.csv");

    let batch = Simulation::new(SimulationConfig::default())
        .unwrap()
        .compute()
        .unwrap();
    CsvOutput::new(&batch).write_to_path(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], CSV_COLUMNS.join(","));
    assert_eq!(lines.len(), batch.len() + 1);
    assert!(lines[1].starts_with("Acute Flashback,"));
    assert!(lines[lines.len() - 1].starts_with("High-Functioning,"));
}

#[test]
fn test_write_to_missing_directory_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("no_such_dir").join("simulation.csv");

    let batch = Simulation::new(SimulationConfig::default())
        .unwrap()
        .compute()
        .unwrap();
    let err = CsvOutput::new(&batch).write_to_path(&path).unwrap_err();
    assert!(matches!(err, PtlxError::Io(_)));
}

#[test]
fn test_read_missing_file_fails() {
    let tmp_dir = TempDir::new().unwrap();
    let err = CsvOutput::read_from_path(tmp_dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, PtlxError::Io(_)));
}
