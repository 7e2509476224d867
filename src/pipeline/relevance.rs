//! Feature relevance: symmetrical uncertainty with the label
//!
//! Scores are averaged over `sample_times` bootstrap draws, sorted into a
//! [`CandidateList`] and cut at the relevance threshold.

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;

use super::candidates::{Candidate, CandidateList};
use super::dataset::Dataset;
use super::entropy::symmetrical_uncertainty;
use super::error::SelectionError;
use super::sampler::{Sample, Sampler};

/// Relevance cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Threshold {
    /// Use the minimum observed score; every feature passes
    Minimum,
    /// Keep features scoring strictly above this value
    Value(f64),
}

impl Threshold {
    /// Interpret a configured value: any negative number selects [`Threshold::Minimum`].
    pub fn from_value(value: f64) -> Result<Self, SelectionError> {
        if !value.is_finite() {
            return Err(SelectionError::InvalidThreshold(value));
        }
        if value < 0.0 {
            Ok(Threshold::Minimum)
        } else {
            Ok(Threshold::Value(value))
        }
    }
}

/// Outcome of ranking: the candidate list plus what was cut.
#[derive(Debug, Clone)]
pub struct RankedFeatures {
    pub candidates: CandidateList,
    /// Threshold after resolving [`Threshold::Minimum`]
    pub resolved_threshold: f64,
    /// Features that did not clear the threshold, in descending score order
    pub below_threshold: Vec<usize>,
}

/// SU of every feature column with the label, on one sample.
///
/// Columns are scored in parallel; the result is indexed by feature.
pub fn class_symmetrical_uncertainty(sample: &Sample) -> Vec<f64> {
    let labels = sample.labels();
    (0..sample.n_features())
        .into_par_iter()
        .map(|j| symmetrical_uncertainty(&sample.column(j), labels))
        .collect()
}

/// Average per-feature relevance over `sample_times` independent draws.
///
/// Draws happen sequentially on the sampler so a seeded run is reproducible;
/// only the per-column scoring inside a draw runs in parallel.
pub fn relevance_scores(
    dataset: &Dataset,
    sampler: &mut Sampler,
    sample_times: usize,
    pb: &ProgressBar,
) -> Vec<f64> {
    let mut totals = vec![0.0_f64; dataset.n_features()];
    if sample_times == 0 {
        return totals;
    }

    for _ in 0..sample_times {
        let sample = sampler.draw(dataset);
        let scores = class_symmetrical_uncertainty(&sample);
        for (total, score) in totals.iter_mut().zip(scores) {
            *total += score;
        }
        pb.inc(1);
    }

    let n = sample_times as f64;
    totals.iter_mut().for_each(|t| *t /= n);
    totals
}

/// Sort features by relevance and apply the threshold.
///
/// A threshold above the best score is a configuration error: no feature
/// could pass, which almost always means the value was mistyped.
pub fn rank_features(
    scores: &[f64],
    threshold: Threshold,
) -> Result<RankedFeatures, SelectionError> {
    if scores.is_empty() {
        return Err(SelectionError::NoFeatures);
    }

    let max_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_score = scores.iter().copied().fold(f64::INFINITY, f64::min);

    let all = CandidateList::from_scores(
        scores
            .iter()
            .enumerate()
            .map(|(feature, &score)| (score, feature))
            .collect(),
    );

    let (resolved_threshold, keep_all) = match threshold {
        Threshold::Minimum => (min_score, true),
        Threshold::Value(t) if t > max_score => {
            return Err(SelectionError::ThresholdAboveMaximum {
                threshold: t,
                max_score,
            });
        }
        Threshold::Value(t) => (t, false),
    };

    log::info!(
        "relevance threshold resolved to {:.6} (scores range {:.6}..={:.6})",
        resolved_threshold,
        min_score,
        max_score
    );

    let (passed, below): (Vec<Candidate>, Vec<Candidate>) = all
        .entries()
        .iter()
        .copied()
        .partition(|c| keep_all || c.score > resolved_threshold);

    // Already in descending order, so the stable sort inside is a no-op
    let candidates = CandidateList::from_scores(passed.iter().map(|c| (c.score, c.feature)).collect());

    Ok(RankedFeatures {
        candidates,
        resolved_threshold,
        below_threshold: below.iter().map(|c| c.feature).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_threshold_is_minimum() {
        assert_eq!(Threshold::from_value(-1.0).unwrap(), Threshold::Minimum);
        assert_eq!(Threshold::from_value(0.0).unwrap(), Threshold::Value(0.0));
        assert!(Threshold::from_value(f64::NAN).is_err());
    }

    #[test]
    fn test_rank_minimum_keeps_everything() {
        let ranked = rank_features(&[0.1, 0.7, 0.3], Threshold::Minimum).unwrap();
        assert_eq!(ranked.candidates.len(), 3);
        assert!(ranked.below_threshold.is_empty());
        assert_eq!(ranked.resolved_threshold, 0.1);
    }

    #[test]
    fn test_rank_strictly_above_threshold() {
        let ranked = rank_features(&[0.1, 0.7, 0.3], Threshold::Value(0.3)).unwrap();
        let kept: Vec<usize> = ranked.candidates.entries().iter().map(|c| c.feature).collect();
        assert_eq!(kept, vec![1]);
        assert_eq!(ranked.below_threshold, vec![2, 0]);
    }

    #[test]
    fn test_rank_threshold_equal_to_max_is_empty_not_error() {
        let ranked = rank_features(&[0.1, 0.7], Threshold::Value(0.7)).unwrap();
        assert!(ranked.candidates.is_empty());
    }

    #[test]
    fn test_rank_threshold_above_max_errors() {
        let err = rank_features(&[0.1, 0.7], Threshold::Value(0.8)).unwrap_err();
        assert!(matches!(err, SelectionError::ThresholdAboveMaximum { .. }));
    }
}
