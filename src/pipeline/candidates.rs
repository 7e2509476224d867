//! Ranked candidate list with lazy deletion
//!
//! Entries are sorted once by relevance and then stay at fixed positions for
//! the rest of the run. Removing a feature only clears its `alive` flag, so
//! positions held by the pruning cursors remain valid mid-sweep.

use serde::Serialize;

/// One ranked feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    /// Averaged symmetrical uncertainty with the label
    pub score: f64,
    /// Column index in the original feature matrix
    pub feature: usize,
    /// False once the feature has been removed as redundant
    pub alive: bool,
}

/// Fixed-position arena of candidates in descending score order.
#[derive(Debug, Clone, Default)]
pub struct CandidateList {
    entries: Vec<Candidate>,
}

impl CandidateList {
    /// Sort `(score, feature)` pairs by score descending and wrap them.
    ///
    /// The sort is stable: equal scores keep their input order.
    pub fn from_scores(mut scored: Vec<(f64, usize)>) -> Self {
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        let entries = scored
            .into_iter()
            .map(|(score, feature)| Candidate {
                score,
                feature,
                alive: true,
            })
            .collect();
        Self { entries }
    }

    /// Total number of positions, removed entries included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.entries.iter().filter(|c| c.alive).count()
    }

    pub fn get(&self, position: usize) -> Option<&Candidate> {
        self.entries.get(position)
    }

    pub fn entries(&self) -> &[Candidate] {
        &self.entries
    }

    /// Position of the first alive entry.
    pub fn first_alive(&self) -> Option<usize> {
        self.next_alive_from(0)
    }

    /// Position of the first alive entry strictly after `position`.
    pub fn next_alive(&self, position: usize) -> Option<usize> {
        self.next_alive_from(position + 1)
    }

    fn next_alive_from(&self, start: usize) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, c)| c.alive)
            .map(|(pos, _)| pos)
    }

    /// Clear the alive flag at `position`. Removal is irreversible.
    pub fn remove(&mut self, position: usize) {
        if let Some(entry) = self.entries.get_mut(position) {
            entry.alive = false;
        }
    }

    /// Alive entries as `(score, feature)` pairs, in list order.
    pub fn survivors(&self) -> Vec<(f64, usize)> {
        self.entries
            .iter()
            .filter(|c| c.alive)
            .map(|c| (c.score, c.feature))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> CandidateList {
        CandidateList::from_scores(vec![(0.2, 0), (0.9, 1), (0.5, 2), (0.5, 3)])
    }

    #[test]
    fn test_sorted_descending_stable() {
        let l = list();
        let order: Vec<usize> = l.entries().iter().map(|c| c.feature).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_cursors_skip_removed() {
        let mut l = list();
        assert_eq!(l.first_alive(), Some(0));
        l.remove(1);
        assert_eq!(l.next_alive(0), Some(2));
        l.remove(0);
        assert_eq!(l.first_alive(), Some(2));
        l.remove(3);
        assert_eq!(l.next_alive(2), None);
    }

    #[test]
    fn test_remove_keeps_positions() {
        let mut l = list();
        l.remove(2);
        assert_eq!(l.len(), 4);
        assert_eq!(l.alive_count(), 3);
        assert_eq!(l.get(2).map(|c| c.feature), Some(3));
        assert_eq!(l.survivors(), vec![(0.9, 1), (0.5, 2), (0.2, 0)]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut l = list();
        l.remove(99);
        assert_eq!(l.alive_count(), 4);
    }
}
