//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

use sufilter::pipeline::Dataset;

/// Two features and a binary label:
/// - `f0`: identical to the label (SU = 1 on the full data)
/// - `f1`: balanced against the label (SU = 0 on the full data)
pub fn create_copy_and_noise_dataset() -> Dataset {
    let labels = vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0];
    let copy = labels.clone();
    let noise = vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
    Dataset::from_columns(&[copy, noise], labels).unwrap()
}

/// Label plus a noisy copy of it, a duplicate of that copy, and unrelated noise.
///
/// - `f0`: label with every fifth row flipped
/// - `f1`: identical to `f0`
/// - `f2`: pseudo-random noise
pub fn create_duplicate_column_dataset(rows: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels: Vec<f64> = (0..rows).map(|i| (i % 2) as f64).collect();
    let noisy: Vec<f64> = labels
        .iter()
        .enumerate()
        .map(|(i, &y)| if i % 5 == 0 { 1.0 - y } else { y })
        .collect();
    let noise: Vec<f64> = (0..rows).map(|_| rng.gen_range(0..3) as f64).collect();
    Dataset::from_columns(&[noisy.clone(), noisy, noise], labels).unwrap()
}

/// Random discrete dataset with `cols` features taking up to `levels` values.
pub fn create_random_dataset(rows: usize, cols: usize, levels: u32, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let labels: Vec<f64> = (0..rows).map(|_| rng.gen_range(0..2) as f64).collect();
    let columns: Vec<Vec<f64>> = (0..cols)
        .map(|_| (0..rows).map(|_| rng.gen_range(0..levels) as f64).collect())
        .collect();
    Dataset::from_columns(&columns, labels).unwrap()
}

/// Random discrete vector for property checks.
pub fn random_categories(rng: &mut StdRng, len: usize, levels: u32) -> Vec<f64> {
    (0..len).map(|_| rng.gen_range(0..levels) as f64).collect()
}

/// DataFrame with a string feature, a numeric feature, a duplicate and a label
///
/// `duplicate` repeats `signal` exactly, `signal` tracks the label, `colour`
/// is balanced against it.
pub fn create_selection_dataframe() -> DataFrame {
    let rows = 40;
    let label: Vec<i32> = (0..rows).map(|i| (i % 2) as i32).collect();
    let signal: Vec<i32> = label
        .iter()
        .enumerate()
        .map(|(i, &y)| if i % 5 == 0 { 1 - y } else { y })
        .collect();
    let colour: Vec<&str> = (0..rows)
        .map(|i| match (i / 2) % 3 {
            0 => "red",
            1 => "green",
            _ => "blue",
        })
        .collect();

    df! {
        "colour" => colour,
        "signal" => signal.clone(),
        "duplicate" => signal,
        "label" => label,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
