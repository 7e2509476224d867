//! Error types for feature selection.
//!
//! Structural and configuration problems are surfaced to the caller with the
//! offending value and the valid range. Degenerate statistics (constant
//! columns) are not errors and never reach this type.

use thiserror::Error;

/// Errors that stop a selection run before or during ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The relevance threshold is larger than every observed relevance score.
    ///
    /// Nothing could ever pass the cutoff, so the run is treated as
    /// misconfigured rather than silently producing an empty selection.
    #[error(
        "Relevance threshold {threshold} exceeds the maximum observed score {max_score:.6}. \
         Use a value in [0, {max_score:.6}] or a negative value to keep every feature"
    )]
    ThresholdAboveMaximum {
        /// Configured threshold
        threshold: f64,
        /// Largest averaged relevance score across all features
        max_score: f64,
    },

    /// The threshold is NaN or infinite.
    #[error("Relevance threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    /// Sample ratio outside (0, 1].
    #[error("Sample ratio must be in (0, 1], got {0}")]
    InvalidSampleRatio(f64),

    /// Zero sampling repetitions requested.
    #[error("Sample times must be at least 1, got {0}")]
    InvalidSampleTimes(usize),

    /// The sample ratio rounds to an empty bootstrap sample.
    #[error(
        "Sample ratio {ratio} draws no rows from a dataset of {n_rows} row(s); \
         increase the ratio to at least {min_ratio:.6}"
    )]
    EmptySample {
        n_rows: usize,
        ratio: f64,
        /// Smallest ratio that yields one row
        min_ratio: f64,
    },

    /// Feature matrix and label vector disagree on row count.
    #[error("Feature matrix has {rows} row(s) but the label vector has {labels} value(s)")]
    LabelLengthMismatch { rows: usize, labels: usize },

    /// Feature columns passed separately have different lengths.
    #[error("Feature column {column} has {found} value(s), expected {expected}")]
    ColumnLengthMismatch {
        column: usize,
        expected: usize,
        found: usize,
    },

    /// One name per feature column is required.
    #[error("Got {names} feature name(s) for {columns} feature column(s)")]
    FeatureNameMismatch { names: usize, columns: usize },

    /// The feature matrix has no columns.
    #[error("Feature matrix has no feature columns")]
    NoFeatures,

    /// The feature matrix has no rows.
    #[error("Dataset contains zero rows")]
    NoRows,

    /// The label column index does not exist.
    #[error(
        "Class location {class_loc} is out of range for {columns} column(s); \
         use 0..{columns} or -1 for the last column"
    )]
    ClassLocationOutOfRange { class_loc: i64, columns: usize },

    /// The named label column does not exist.
    #[error("Target column '{0}' not found in dataset")]
    TargetNotFound(String),
}
