//! Feature selection report generation
//!
//! Generates a JSON report documenting every feature, its relevance score and
//! whether it was selected, cut by the threshold, or removed as redundant.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CacheStats, Dataset, Redundancy, Selection, SelectionConfig};
use crate::report::SelectionSummary;

/// Final status of a feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Selected,
    BelowThreshold,
    Redundant,
}

impl FeatureStatus {
    fn as_str(&self) -> &'static str {
        match self {
            FeatureStatus::Selected => "selected",
            FeatureStatus::BelowThreshold => "below_threshold",
            FeatureStatus::Redundant => "redundant",
        }
    }
}

/// Single feature entry in the report
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReportEntry {
    pub name: String,
    /// Column position among the features
    pub index: usize,
    pub relevance: f64,
    pub status: FeatureStatus,
    /// Rank among selected features (1-based)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pair_su: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub sufilter_version: String,
    pub input_file: String,
    pub output_file: String,
    pub label_column: String,
    pub rows: usize,
    pub config: SelectionConfig,
}

/// Timing information in milliseconds
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimingInfo {
    pub load_ms: u64,
    pub ranking_ms: u64,
    pub pruning_ms: u64,
    pub save_ms: u64,
    pub total_ms: u64,
}

impl From<&SelectionSummary> for TimingInfo {
    fn from(summary: &SelectionSummary) -> Self {
        Self {
            load_ms: summary.load_time.as_millis() as u64,
            ranking_ms: summary.ranking_time.as_millis() as u64,
            pruning_ms: summary.pruning_time.as_millis() as u64,
            save_ms: summary.save_time.as_millis() as u64,
            total_ms: summary.total_time().as_millis() as u64,
        }
    }
}

/// Report summary
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub initial_features: usize,
    pub selected_features: usize,
    pub below_threshold: usize,
    pub redundant: usize,
    pub resolved_threshold: f64,
    pub pairwise_comparisons: usize,
    pub cache: CacheStats,
    pub timing: TimingInfo,
}

/// Complete selection report
#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub features: Vec<FeatureReportEntry>,
}

/// Parameters for building a report
pub struct ReportParams {
    pub input_file: String,
    pub output_file: String,
    pub config: SelectionConfig,
}

impl SelectionReport {
    /// Build the report from a finished selection.
    pub fn build(
        params: ReportParams,
        dataset: &Dataset,
        selection: &Selection,
        timing: TimingInfo,
    ) -> Self {
        let ranks: HashMap<usize, usize> = selection
            .selected
            .iter()
            .enumerate()
            .map(|(rank, f)| (f.feature, rank + 1))
            .collect();
        let redundancy: HashMap<usize, &Redundancy> =
            selection.redundant.iter().map(|r| (r.removed, r)).collect();

        let mut features: Vec<FeatureReportEntry> = (0..dataset.n_features())
            .map(|index| {
                let relevance = selection.relevance.get(index).copied().unwrap_or(0.0);
                let name = dataset.feature_name(index).to_string();

                if let Some(&rank) = ranks.get(&index) {
                    FeatureReportEntry {
                        name,
                        index,
                        relevance,
                        status: FeatureStatus::Selected,
                        rank: Some(rank),
                        dominated_by: None,
                        pair_su: None,
                        reason: None,
                    }
                } else if let Some(r) = redundancy.get(&index) {
                    let other = dataset.feature_name(r.dominated_by).to_string();
                    FeatureReportEntry {
                        name,
                        index,
                        relevance,
                        status: FeatureStatus::Redundant,
                        rank: None,
                        reason: Some(format!(
                            "SU with '{}' ({:.4}) >= relevance ({:.4})",
                            other, r.pair_su, relevance
                        )),
                        dominated_by: Some(other),
                        pair_su: Some(r.pair_su),
                    }
                } else {
                    FeatureReportEntry {
                        name,
                        index,
                        relevance,
                        status: FeatureStatus::BelowThreshold,
                        rank: None,
                        dominated_by: None,
                        pair_su: None,
                        reason: Some(format!(
                            "Relevance {:.4} not above threshold {:.4}",
                            relevance, selection.resolved_threshold
                        )),
                    }
                }
            })
            .collect();

        // Selected first by rank, then everything else by relevance descending
        features.sort_by(|a, b| match (a.rank, b.rank) {
            (Some(ra), Some(rb)) => ra.cmp(&rb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => b
                .relevance
                .partial_cmp(&a.relevance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index.cmp(&b.index)),
        });

        SelectionReport {
            metadata: ReportMetadata {
                timestamp: Utc::now().to_rfc3339(),
                sufilter_version: env!("CARGO_PKG_VERSION").to_string(),
                input_file: params.input_file,
                output_file: params.output_file,
                label_column: dataset.label_name().to_string(),
                rows: dataset.n_rows(),
                config: params.config,
            },
            summary: ReportSummary {
                initial_features: dataset.n_features(),
                selected_features: selection.selected.len(),
                below_threshold: selection.below_threshold.len(),
                redundant: selection.redundant.len(),
                resolved_threshold: selection.resolved_threshold,
                pairwise_comparisons: selection.comparisons,
                cache: selection.cache_stats,
                timing,
            },
            features,
        }
    }
}

/// Export the selection report to a JSON file
pub fn export_selection_report(report: &SelectionReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize selection report to JSON")?;

    std::fs::write(output_path, json).with_context(|| {
        format!(
            "Failed to write selection report to {}",
            output_path.display()
        )
    })?;

    Ok(())
}

/// Export a CSV summary of the selection report, one row per feature
pub fn export_selection_report_csv(report: &SelectionReport, output_path: &Path) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(output_path)
        .with_context(|| format!("Failed to create CSV file: {}", output_path.display()))?;

    writeln!(file, "feature,index,relevance,status,rank,dominated_by,pair_su")?;

    for feature in &report.features {
        writeln!(
            file,
            "{},{},{:.6},{},{},{},{}",
            escape_csv_field(&feature.name),
            feature.index,
            feature.relevance,
            feature.status.as_str(),
            feature.rank.map(|r| r.to_string()).unwrap_or_default(),
            feature
                .dominated_by
                .as_deref()
                .map(escape_csv_field)
                .unwrap_or_default(),
            feature
                .pair_su
                .map(|s| format!("{:.6}", s))
                .unwrap_or_default(),
        )?;
    }

    Ok(())
}

fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
