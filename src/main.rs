//! sufilter: Feature Selection CLI Tool
//!
//! A command-line tool that keeps the features most relevant to a label and
//! drops the ones made redundant by a stronger feature.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use log::LevelFilter;
use polars::prelude::*;

use sufilter::cli::{confirm_overwrite, Cli};
use sufilter::pipeline::{
    dataframe_to_dataset, load_dataset_with_progress, resolve_label_column, FeatureSelector,
};
use sufilter::report::{
    export_selection_report, export_selection_report_csv, ReportParams, SelectionReport,
    SelectionSummary, TimingInfo,
};
use sufilter::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("SUFILTER_LOG", "warn"))
        .init();

    let cli = Cli::parse();
    let output_path = cli.output_path();
    let report_path = cli.report_path();
    let config = cli.selection_config();

    print_banner(env!("CARGO_PKG_VERSION"));

    if !cli.no_confirm {
        let csv_report_path = cli.csv_report_path();
        let mut targets: Vec<&Path> = vec![output_path.as_path(), report_path.as_path()];
        if cli.csv_report {
            targets.push(csv_report_path.as_path());
        }
        if !confirm_overwrite(&targets)? {
            println!("Cancelled by user.");
            return Ok(());
        }
    }

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let (mut df, rows, cols, memory_mb) =
        load_dataset_with_progress(&cli.input, cli.infer_schema_length)?;

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    if !cli.drop_columns.is_empty() {
        let missing: Vec<&String> = cli
            .drop_columns
            .iter()
            .filter(|c| df.column(c.as_str()).is_err())
            .collect();
        if !missing.is_empty() {
            anyhow::bail!("Columns to drop not found in dataset: {:?}", missing);
        }
        df = df.drop_many(&cli.drop_columns);
        print_info(&format!("Dropped {} column(s) before analysis", cli.drop_columns.len()));
    }

    let label = resolve_label_column(&df, &cli.label_location())?;
    let dataset = dataframe_to_dataset(&df, &label)
        .with_context(|| format!("Failed to prepare features with label '{}'", label))?;

    let mut summary = SelectionSummary::new(dataset.n_features());
    let load_elapsed = step_start.elapsed();
    summary.set_load_time(load_elapsed);
    print_success(&format!(
        "{} feature(s), label '{}'",
        dataset.n_features(),
        label
    ));
    print_step_time(load_elapsed);

    print_config(&cli.input, &label, &output_path, &config);

    // Step 2: Relevance ranking
    print_step_header(2, "Relevance Ranking");
    let step_start = Instant::now();
    let mut selector = FeatureSelector::new(dataset, config.clone())?;
    let max_relevance = selector
        .relevance()
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    print_info(&format!("Highest relevance (SU with label): {:.4}", max_relevance));
    print_step_time(step_start.elapsed());

    // Step 3: Redundancy pruning
    print_step_header(3, "Redundancy Pruning");
    let step_start = Instant::now();
    let selection = selector.select()?;

    if selection.below_threshold.is_empty() {
        print_info("All features cleared the relevance threshold");
    } else {
        print_count(
            "feature(s) below relevance threshold",
            selection.below_threshold.len(),
            Some(&format!("(<={:.4})", selection.resolved_threshold)),
        );
    }
    if selection.redundant.is_empty() {
        print_info("No redundant features found");
    } else {
        print_count(
            "redundant feature(s)",
            selection.redundant.len(),
            Some(&format!("({} pairwise comparisons)", selection.comparisons)),
        );
    }
    summary.record_selection(selector.dataset(), &selection);
    print_step_time(step_start.elapsed());

    // Step 4: Save output
    print_step_header(4, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");

    let mut keep: Vec<&str> = selection.selected.iter().map(|f| f.name.as_str()).collect();
    keep.push(label.as_str());
    let mut reduced = df
        .select(keep)
        .context("Failed to select output columns")?;
    save_dataset(&mut reduced, &output_path)?;

    if selection.selected.is_empty() {
        finish_with_warning(
            &spinner,
            &format!(
                "No features selected; saved label only to {}",
                output_path.display()
            ),
        );
    } else {
        finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    }
    summary.set_save_time(step_start.elapsed());

    let report = SelectionReport::build(
        ReportParams {
            input_file: cli.input.display().to_string(),
            output_file: output_path.display().to_string(),
            config,
        },
        selector.dataset(),
        &selection,
        TimingInfo::from(&summary),
    );
    export_selection_report(&report, &report_path)?;
    print_success(&format!("Report written to {}", report_path.display()));
    if cli.csv_report {
        let csv_path = cli.csv_report_path();
        export_selection_report_csv(&report, &csv_path)?;
        print_success(&format!("CSV report written to {}", csv_path.display()));
    }
    print_step_time(step_start.elapsed());

    summary.display();
    print_completion();

    Ok(())
}

/// Save dataset to file (CSV or Parquet based on extension)
fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}
