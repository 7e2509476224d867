//! End-to-end selection: validate, rank by relevance, prune redundancy

use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use serde::Serialize;

use super::cache::{CacheStats, PairwiseCache};
use super::dataset::Dataset;
use super::error::SelectionError;
use super::pruner::{prune, Redundancy, SampledPairEstimator};
use super::relevance::{rank_features, relevance_scores, Threshold};
use super::sampler::{sample_size, Sampler};
use crate::utils::selection_progress;

/// Default relevance threshold (negative: keep every feature before pruning)
pub const DEFAULT_THRESHOLD: f64 = -1.0;

/// Default fraction of rows per bootstrap draw
pub const DEFAULT_SAMPLE_RATIO: f64 = 1.0;

/// Default number of draws averaged per estimate
pub const DEFAULT_SAMPLE_TIMES: usize = 10;

/// Settings for one selection run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionConfig {
    /// Relevance cutoff; negative keeps every feature
    pub threshold: f64,
    /// Fraction of rows per bootstrap draw, in (0, 1]
    pub sample_ratio: f64,
    /// Draws averaged per estimate
    pub sample_times: usize,
    /// Seed for the sampler; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Draw progress bars
    #[serde(skip)]
    pub show_progress: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            sample_ratio: DEFAULT_SAMPLE_RATIO,
            sample_times: DEFAULT_SAMPLE_TIMES,
            seed: None,
            show_progress: false,
        }
    }
}

impl SelectionConfig {
    /// Check ranges that do not depend on the data.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if !(self.sample_ratio > 0.0 && self.sample_ratio <= 1.0) {
            return Err(SelectionError::InvalidSampleRatio(self.sample_ratio));
        }
        if self.sample_times == 0 {
            return Err(SelectionError::InvalidSampleTimes(self.sample_times));
        }
        Threshold::from_value(self.threshold)?;
        Ok(())
    }
}

/// A feature that survived selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedFeature {
    /// Column index in the original feature matrix
    pub feature: usize,
    pub name: String,
    /// Averaged SU with the label
    pub score: f64,
}

/// Wall-clock time per phase.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionTiming {
    /// Relevance sampling plus thresholding
    pub ranking: Duration,
    pub pruning: Duration,
}

/// Full result of a selection run.
#[derive(Debug, Clone)]
pub struct Selection {
    /// Surviving features, descending by score
    pub selected: Vec<SelectedFeature>,
    /// Averaged relevance of every feature, indexed by feature
    pub relevance: Vec<f64>,
    /// Threshold after resolving the negative sentinel
    pub resolved_threshold: f64,
    /// Features cut by the relevance threshold
    pub below_threshold: Vec<usize>,
    /// Features removed by the dominance sweep
    pub redundant: Vec<Redundancy>,
    /// Pairwise estimates requested by the sweep
    pub comparisons: usize,
    /// Pairwise cache counters after this run
    pub cache_stats: CacheStats,
    pub timing: SelectionTiming,
}

impl Selection {
    /// `(score, feature)` pairs of the selected set.
    pub fn pairs(&self) -> Vec<(f64, usize)> {
        self.selected.iter().map(|f| (f.score, f.feature)).collect()
    }

    /// Original column indices of the selected set.
    pub fn feature_indices(&self) -> Vec<usize> {
        self.selected.iter().map(|f| f.feature).collect()
    }
}

/// Runs relevance ranking and redundancy pruning over one dataset.
///
/// The pairwise cache lives as long as the selector, so repeated runs (for
/// example at several thresholds) reuse pairwise estimates.
pub struct FeatureSelector {
    dataset: Dataset,
    config: SelectionConfig,
    sampler: Sampler,
    cache: PairwiseCache,
    relevance: Option<Vec<f64>>,
    relevance_time: Duration,
}

impl FeatureSelector {
    /// Validate configuration and shape before any sampling happens.
    pub fn new(dataset: Dataset, config: SelectionConfig) -> Result<Self, SelectionError> {
        config.validate()?;

        let n_rows = dataset.n_rows();
        if sample_size(n_rows, config.sample_ratio) == 0 {
            return Err(SelectionError::EmptySample {
                n_rows,
                ratio: config.sample_ratio,
                min_ratio: 0.5 / n_rows as f64,
            });
        }

        let sampler = Sampler::new(config.sample_ratio, config.seed);
        Ok(Self {
            dataset,
            config,
            sampler,
            cache: PairwiseCache::new(),
            relevance: None,
            relevance_time: Duration::ZERO,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    pub fn cache(&self) -> &PairwiseCache {
        &self.cache
    }

    /// Time spent sampling relevance scores; zero until they are computed.
    pub fn relevance_time(&self) -> Duration {
        self.relevance_time
    }

    /// Averaged relevance of every feature, computed on first use.
    pub fn relevance(&mut self) -> &[f64] {
        let scores = match self.relevance.take() {
            Some(scores) => scores,
            None => {
                let start = Instant::now();
                let pb = self.progress_bar(Some(self.config.sample_times as u64), "Scoring relevance");
                let scores = relevance_scores(
                    &self.dataset,
                    &mut self.sampler,
                    self.config.sample_times,
                    &pb,
                );
                pb.finish_and_clear();
                self.relevance_time = start.elapsed();
                scores
            }
        };
        self.relevance.insert(scores)
    }

    /// Select with the configured threshold.
    pub fn select(&mut self) -> Result<Selection, SelectionError> {
        self.select_with_threshold(self.config.threshold)
    }

    /// Select with an explicit threshold, reusing relevance scores and
    /// pairwise estimates from earlier runs on this selector.
    pub fn select_with_threshold(&mut self, threshold: f64) -> Result<Selection, SelectionError> {
        let threshold = Threshold::from_value(threshold)?;

        let relevance = self.relevance().to_vec();
        let rank_start = Instant::now();
        let mut ranked = rank_features(&relevance, threshold)?;
        // Sampling counts toward ranking even when scores were computed earlier
        let ranking = self.relevance_time + rank_start.elapsed();

        let prune_start = Instant::now();
        let pb = self.progress_bar(None, "Pruning redundant features...");
        let outcome = {
            let mut estimator = SampledPairEstimator::new(
                &self.dataset,
                &mut self.sampler,
                self.config.sample_times,
                &mut self.cache,
            );
            prune(&mut ranked.candidates, &mut estimator)
        };
        pb.finish_and_clear();
        let pruning = prune_start.elapsed();

        log::debug!(
            "pruning made {} comparisons, cache hits={} misses={}",
            outcome.comparisons,
            self.cache.stats().hits,
            self.cache.stats().misses
        );

        let selected = ranked
            .candidates
            .survivors()
            .into_iter()
            .map(|(score, feature)| SelectedFeature {
                feature,
                name: self.dataset.feature_name(feature).to_string(),
                score,
            })
            .collect();

        Ok(Selection {
            selected,
            relevance,
            resolved_threshold: ranked.resolved_threshold,
            below_threshold: ranked.below_threshold,
            redundant: outcome.redundant,
            comparisons: outcome.comparisons,
            cache_stats: self.cache.stats(),
            timing: SelectionTiming { ranking, pruning },
        })
    }

    fn progress_bar(&self, draws: Option<u64>, message: &str) -> ProgressBar {
        selection_progress(self.config.show_progress, draws, message)
    }
}

/// Convenience wrapper: build a selector and run it once.
pub fn select_features(
    dataset: Dataset,
    config: SelectionConfig,
) -> Result<Selection, SelectionError> {
    FeatureSelector::new(dataset, config)?.select()
}
