//! Dataset loader for CSV and Parquet files
//!
//! Turns a file into a [`Dataset`]: one column becomes the label, every other
//! column becomes a discrete feature. Numeric and boolean columns keep their
//! values as category codes; everything else is encoded to integer codes in
//! order of first appearance. Nulls map to NaN, which is its own category.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use faer::Mat;
use polars::prelude::*;

use super::dataset::Dataset;
use super::error::SelectionError;
use crate::utils::{create_spinner, finish_with_success};

/// Where the label lives in the input table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelLocation {
    /// Zero-based column index; `-1` means the last column
    Index(i64),
    /// Column name
    Name(String),
}

impl Default for LabelLocation {
    fn default() -> Self {
        LabelLocation::Index(-1)
    }
}

/// Open a dataset lazily (CSV or Parquet based on extension)
pub fn scan_dataset(path: &Path, infer_schema_length: usize) -> Result<LazyFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(schema_length)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    Ok(lf)
}

/// Column names of a dataset without loading its rows
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let mut lf = scan_dataset(path, 100)?;
    let schema = lf
        .collect_schema()
        .with_context(|| format!("Failed to read schema: {}", path.display()))?;
    Ok(schema.iter_names().map(|s| s.to_string()).collect())
}

/// Load a dataset into memory behind a spinner.
///
/// Returns the DataFrame with its row count, column count and estimated
/// size in megabytes.
pub fn load_dataset_with_progress(
    path: &Path,
    infer_schema_length: usize,
) -> Result<(DataFrame, usize, usize, f64)> {
    let spinner = create_spinner("Loading dataset...");
    let df = scan_dataset(path, infer_schema_length)?
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    finish_with_success(&spinner, &format!("Loaded {} rows x {} columns", rows, cols));
    Ok((df, rows, cols, memory_mb))
}

/// Resolve the label column name.
pub fn resolve_label_column(
    df: &DataFrame,
    location: &LabelLocation,
) -> Result<String, SelectionError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    match location {
        LabelLocation::Name(name) => {
            if names.contains(name) {
                Ok(name.clone())
            } else {
                Err(SelectionError::TargetNotFound(name.clone()))
            }
        }
        LabelLocation::Index(-1) if !names.is_empty() => Ok(names[names.len() - 1].clone()),
        LabelLocation::Index(idx) if *idx >= 0 && (*idx as usize) < names.len() => {
            Ok(names[*idx as usize].clone())
        }
        LabelLocation::Index(idx) => Err(SelectionError::ClassLocationOutOfRange {
            class_loc: *idx,
            columns: names.len(),
        }),
    }
}

/// Convert one column to category codes.
fn column_codes(col: &Column) -> Result<Vec<f64>> {
    let name = col.name().to_string();
    let dtype = col.dtype();

    if dtype.is_primitive_numeric() || matches!(dtype, DataType::Boolean) {
        let float_col = col
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' cannot be cast to Float64", name))?;
        let ca = float_col.f64()?;
        return Ok(ca.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect());
    }

    let string_col = col
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as categories", name))?;
    let ca = string_col.str()?;

    let mut codes: HashMap<&str, f64> = HashMap::new();
    let values = ca
        .into_iter()
        .map(|v| match v {
            Some(s) => {
                let next = codes.len() as f64;
                *codes.entry(s).or_insert(next)
            }
            None => f64::NAN,
        })
        .collect();
    Ok(values)
}

/// Split a DataFrame into features and label.
pub fn dataframe_to_dataset(df: &DataFrame, label_column: &str) -> Result<Dataset> {
    let label_col = df
        .column(label_column)
        .map_err(|_| SelectionError::TargetNotFound(label_column.to_string()))?;
    let labels = column_codes(label_col)?;

    let feature_cols: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|col| col.name().as_str() != label_column)
        .collect();

    let feature_names: Vec<String> = feature_cols.iter().map(|c| c.name().to_string()).collect();
    let columns: Vec<Vec<f64>> = feature_cols
        .iter()
        .map(|col| column_codes(col))
        .collect::<Result<_>>()?;

    let features = Mat::from_fn(df.height(), columns.len(), |i, j| columns[j][i]);
    let dataset = Dataset::new(features, labels, feature_names, label_column)?;
    Ok(dataset)
}
