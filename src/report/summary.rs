//! Selection summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{Dataset, Selection};

/// A feature removed as redundant, by name
#[derive(Debug, Clone, PartialEq)]
pub struct RedundantDrop {
    pub feature: String,
    pub dominated_by: String,
    pub pair_su: f64,
}

/// Summary of the feature selection process
#[derive(Debug, Default)]
pub struct SelectionSummary {
    pub initial_features: usize,
    pub final_features: usize,
    pub dropped_relevance: Vec<String>,
    pub dropped_redundant: Vec<RedundantDrop>,
    /// Selected features with their relevance, descending
    pub selected: Vec<(String, f64)>,
    pub load_time: Duration,
    pub ranking_time: Duration,
    pub pruning_time: Duration,
    pub save_time: Duration,
}

impl SelectionSummary {
    pub fn new(initial_features: usize) -> Self {
        Self {
            initial_features,
            final_features: initial_features,
            ..Default::default()
        }
    }

    /// Record the outcome of a selection run over `dataset`.
    pub fn record_selection(&mut self, dataset: &Dataset, selection: &Selection) {
        self.dropped_relevance = selection
            .below_threshold
            .iter()
            .map(|&f| dataset.feature_name(f).to_string())
            .collect();
        self.dropped_redundant = selection
            .redundant
            .iter()
            .map(|r| RedundantDrop {
                feature: dataset.feature_name(r.removed).to_string(),
                dominated_by: dataset.feature_name(r.dominated_by).to_string(),
                pair_su: r.pair_su,
            })
            .collect();
        self.selected = selection
            .selected
            .iter()
            .map(|f| (f.name.clone(), f.score))
            .collect();
        self.final_features = selection.selected.len();
        self.ranking_time = selection.timing.ranking;
        self.pruning_time = selection.timing.pruning;
    }

    pub fn set_load_time(&mut self, elapsed: Duration) {
        self.load_time = elapsed;
    }

    pub fn set_save_time(&mut self, elapsed: Duration) {
        self.save_time = elapsed;
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.ranking_time + self.pruning_time + self.save_time
    }

    /// Percentage of features removed
    pub fn reduction_pct(&self) -> f64 {
        if self.initial_features > 0 {
            (self.initial_features.saturating_sub(self.final_features)) as f64
                / self.initial_features as f64
                * 100.0
        } else {
            0.0
        }
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SELECTION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Initial Features"),
            Cell::new(self.initial_features),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Dropped (Relevance)"),
            Cell::new(self.dropped_relevance.len()).fg(if self.dropped_relevance.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("🔗 Dropped (Redundant)"),
            Cell::new(self.dropped_redundant.len()).fg(if self.dropped_redundant.is_empty() {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("✅ Selected Features"),
            Cell::new(self.final_features)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        let reduction_pct = self.reduction_pct();
        let color = if reduction_pct > 30.0 {
            Color::Green
        } else if reduction_pct > 10.0 {
            Color::Yellow
        } else {
            Color::Cyan
        };
        table.add_row(vec![
            Cell::new("📉 Reduction"),
            Cell::new(format!("{:.1}%", reduction_pct))
                .fg(color)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("⏱  Total Time"),
            Cell::new(format!("{:.2}s", self.total_time().as_secs_f64())),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.selected.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("🏆").cyan(),
                style("SELECTED FEATURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            let mut ranked = Table::new();
            ranked.load_preset(UTF8_FULL_CONDENSED);
            ranked.set_header(vec![
                Cell::new("Rank").add_attribute(Attribute::Bold),
                Cell::new("Feature").add_attribute(Attribute::Bold),
                Cell::new("Relevance (SU)").add_attribute(Attribute::Bold),
            ]);
            for (rank, (name, score)) in self.selected.iter().enumerate() {
                ranked.add_row(vec![
                    Cell::new(rank + 1).set_alignment(CellAlignment::Right),
                    Cell::new(name),
                    Cell::new(format!("{:.4}", score)).set_alignment(CellAlignment::Right),
                ]);
            }
            for line in ranked.to_string().lines() {
                println!("    {}", line);
            }
        }

        if !self.dropped_relevance.is_empty() || !self.dropped_redundant.is_empty() {
            println!();
            println!(
                "    {} {}",
                style("📝").cyan(),
                style("DROPPED FEATURES").white().bold()
            );
            println!("    {}", style("─".repeat(50)).dim());

            if !self.dropped_relevance.is_empty() {
                println!();
                println!(
                    "      {} {}:",
                    style("Below Relevance Threshold").yellow(),
                    style(format!("({})", self.dropped_relevance.len())).dim()
                );
                for feature in &self.dropped_relevance {
                    println!("        {} {}", style("•").dim(), feature);
                }
            }

            if !self.dropped_redundant.is_empty() {
                println!();
                println!(
                    "      {} {}:",
                    style("Redundant").yellow(),
                    style(format!("({})", self.dropped_redundant.len())).dim()
                );
                for drop in &self.dropped_redundant {
                    println!(
                        "        {} {} {}",
                        style("•").dim(),
                        drop.feature,
                        style(format!(
                            "(dominated by {}, SU={:.4})",
                            drop.dominated_by, drop.pair_su
                        ))
                        .dim()
                    );
                }
            }
        }
    }
}
