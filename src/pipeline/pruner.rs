//! Redundancy pruning (Fast Correlation-Based Filter)
//!
//! Walks the ranked candidate list best-first. For each surviving feature `p`,
//! every surviving lower-ranked feature `q` is removed when `p` explains `q` at
//! least as well as the label does: `SU(p, q) >= SU(q, label)`.
//!
//! Both cursors only move forward over fixed positions, and removal only
//! clears an alive flag, so the sweep always terminates.

use serde::Serialize;

use super::cache::PairwiseCache;
use super::candidates::CandidateList;
use super::dataset::Dataset;
use super::entropy::symmetrical_uncertainty;
use super::sampler::Sampler;

/// Source of pairwise symmetrical uncertainty between two features.
pub trait PairEstimator {
    /// SU between original feature columns `p` and `q`.
    fn estimate(&mut self, p: usize, q: usize) -> f64;
}

/// Averages SU over bootstrap draws, memoizing each pair.
pub struct SampledPairEstimator<'a> {
    dataset: &'a Dataset,
    sampler: &'a mut Sampler,
    sample_times: usize,
    cache: &'a mut PairwiseCache,
}

impl<'a> SampledPairEstimator<'a> {
    pub fn new(
        dataset: &'a Dataset,
        sampler: &'a mut Sampler,
        sample_times: usize,
        cache: &'a mut PairwiseCache,
    ) -> Self {
        Self {
            dataset,
            sampler,
            sample_times,
            cache,
        }
    }
}

/// Mean SU of columns `p` and `q` over `sample_times` fresh draws.
pub fn sampled_pair_su(
    dataset: &Dataset,
    sampler: &mut Sampler,
    sample_times: usize,
    p: usize,
    q: usize,
) -> f64 {
    if sample_times == 0 {
        return 0.0;
    }
    let mut total = 0.0;
    for _ in 0..sample_times {
        let rows = sampler.draw_indices(dataset.n_rows());
        let x: Vec<f64> = rows.iter().map(|&r| dataset.value(r, p)).collect();
        let y: Vec<f64> = rows.iter().map(|&r| dataset.value(r, q)).collect();
        total += symmetrical_uncertainty(&x, &y);
    }
    total / sample_times as f64
}

impl PairEstimator for SampledPairEstimator<'_> {
    fn estimate(&mut self, p: usize, q: usize) -> f64 {
        let Self {
            dataset,
            sampler,
            sample_times,
            cache,
        } = self;
        cache.get_or_insert_with(p, q, || {
            sampled_pair_su(dataset, sampler, *sample_times, p, q)
        })
    }
}

/// A feature removed because a higher-ranked feature dominates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Redundancy {
    /// Removed feature (original column index)
    pub removed: usize,
    /// Relevance score of the removed feature
    pub removed_score: f64,
    /// Dominating feature (original column index)
    pub dominated_by: usize,
    /// Estimated SU between the two features
    pub pair_su: f64,
}

/// What one pruning sweep did.
#[derive(Debug, Clone, Default)]
pub struct PruneOutcome {
    /// Removals in the order they happened
    pub redundant: Vec<Redundancy>,
    /// Number of pairwise estimates requested
    pub comparisons: usize,
}

/// Run the dominance sweep, clearing `alive` on redundant entries in place.
pub fn prune<E: PairEstimator + ?Sized>(list: &mut CandidateList, estimator: &mut E) -> PruneOutcome {
    let mut outcome = PruneOutcome::default();

    let mut p_cursor = list.first_alive();
    while let Some(p_pos) = p_cursor {
        let dominant = list.entries()[p_pos];

        let mut q_cursor = list.next_alive(p_pos);
        while let Some(q_pos) = q_cursor {
            let candidate = list.entries()[q_pos];
            let pair_su = estimator.estimate(dominant.feature, candidate.feature);
            outcome.comparisons += 1;

            if pair_su >= candidate.score {
                log::debug!(
                    "feature {} removed: SU with feature {} = {:.6} >= relevance {:.6}",
                    candidate.feature,
                    dominant.feature,
                    pair_su,
                    candidate.score
                );
                list.remove(q_pos);
                outcome.redundant.push(Redundancy {
                    removed: candidate.feature,
                    removed_score: candidate.score,
                    dominated_by: dominant.feature,
                    pair_su,
                });
            }

            q_cursor = list.next_alive(q_pos);
        }

        p_cursor = list.next_alive(p_pos);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Fixed pairwise table; unknown pairs are independent.
    struct TableEstimator(HashMap<(usize, usize), f64>);

    impl PairEstimator for TableEstimator {
        fn estimate(&mut self, p: usize, q: usize) -> f64 {
            let key = if p < q { (p, q) } else { (q, p) };
            self.0.get(&key).copied().unwrap_or(0.0)
        }
    }

    #[test]
    fn test_removed_feature_cannot_dominate() {
        // 0 dominates 1; 1 would dominate 2 but is already gone
        let mut list = CandidateList::from_scores(vec![(0.9, 0), (0.8, 1), (0.7, 2)]);
        let mut est = TableEstimator(HashMap::from([((0, 1), 0.85), ((1, 2), 0.99)]));

        let outcome = prune(&mut list, &mut est);

        assert_eq!(list.survivors(), vec![(0.9, 0), (0.7, 2)]);
        assert_eq!(outcome.redundant.len(), 1);
        assert_eq!(outcome.redundant[0].dominated_by, 0);
    }

    #[test]
    fn test_equal_su_counts_as_dominated() {
        let mut list = CandidateList::from_scores(vec![(0.9, 0), (0.5, 1)]);
        let mut est = TableEstimator(HashMap::from([((0, 1), 0.5)]));
        prune(&mut list, &mut est);
        assert_eq!(list.survivors(), vec![(0.9, 0)]);
    }

    #[test]
    fn test_comparison_count_shrinks_with_removals() {
        let mut list = CandidateList::from_scores(vec![(0.9, 0), (0.8, 1), (0.7, 2), (0.6, 3)]);
        let mut est = TableEstimator(HashMap::new());
        let outcome = prune(&mut list, &mut est);
        // Nothing removed: 3 + 2 + 1 comparisons
        assert_eq!(outcome.comparisons, 6);
        assert_eq!(list.alive_count(), 4);
    }
}
