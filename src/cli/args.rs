//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

use crate::pipeline::{
    LabelLocation, SelectionConfig, DEFAULT_SAMPLE_RATIO, DEFAULT_SAMPLE_TIMES, DEFAULT_THRESHOLD,
};

/// sufilter - Select relevant, non-redundant features by symmetrical uncertainty
#[derive(Parser, Debug)]
#[command(name = "sufilter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Zero-based column index of the label. -1 means the last column.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub class_loc: i64,

    /// Label column name. Takes precedence over --class-loc.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Output file path for the reduced dataset (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_selected' suffix (e.g., data.csv -> data_selected.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Relevance threshold - keep features whose SU with the label is above this value.
    /// A negative value keeps every feature before redundancy pruning.
    #[arg(long, default_value_t = DEFAULT_THRESHOLD, allow_negative_numbers = true)]
    pub threshold: f64,

    /// Fraction of rows drawn (with replacement) per sampling repetition, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATIO, value_parser = validate_sample_ratio)]
    pub sample_ratio: f64,

    /// Number of sampling repetitions averaged per estimate
    #[arg(long, default_value_t = DEFAULT_SAMPLE_TIMES, value_parser = validate_sample_times)]
    pub sample_times: usize,

    /// Seed for the sampler. Runs with the same seed select the same features.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path of the JSON selection report.
    /// Defaults to input directory with '_selection.json' suffix.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Also write a per-feature CSV report next to the JSON report
    #[arg(long, default_value = "false")]
    pub csv_report: bool,

    /// Columns to drop before processing (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub drop_columns: Vec<String>,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Hide progress bars
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Where the label lives: a name if given, otherwise the column index.
    pub fn label_location(&self) -> LabelLocation {
        match &self.target {
            Some(name) => LabelLocation::Name(name.clone()),
            None => LabelLocation::Index(self.class_loc),
        }
    }

    /// Selection settings from the parsed arguments.
    pub fn selection_config(&self) -> SelectionConfig {
        SelectionConfig {
            threshold: self.threshold,
            sample_ratio: self.sample_ratio,
            sample_times: self.sample_times,
            seed: self.seed,
            show_progress: !self.quiet,
        }
    }

    /// Get the output path, deriving from input if not explicitly provided.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let extension = self
                .input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("parquet");
            self.sibling_path(&format!("_selected.{}", extension))
        })
    }

    /// Get the JSON report path, deriving from input if not explicitly provided.
    pub fn report_path(&self) -> PathBuf {
        self.report
            .clone()
            .unwrap_or_else(|| self.sibling_path("_selection.json"))
    }

    /// CSV report path: the JSON report path with a `.csv` extension.
    pub fn csv_report_path(&self) -> PathBuf {
        self.report_path().with_extension("csv")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
        let stem = self
            .input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        parent.join(format!("{}{}", stem, suffix))
    }
}

/// Validator for sample_ratio parameter
fn validate_sample_ratio(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value > 0.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(format!(
            "sample_ratio must be greater than 0.0 and at most 1.0, got {}",
            value
        ))
    }
}

/// Validator for sample_times parameter
fn validate_sample_times(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid positive integer", s))?;

    if value == 0 {
        Err("sample_times must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
