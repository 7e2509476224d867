//! Memoized pairwise symmetrical uncertainty

use std::collections::HashMap;

use serde::Serialize;

/// Hit/miss counters for a [`PairwiseCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Pairwise estimates keyed by an unordered feature pair.
///
/// Symmetrical uncertainty is symmetric, so `(p, q)` and `(q, p)` share one
/// entry. Entries are never invalidated.
#[derive(Debug, Clone, Default)]
pub struct PairwiseCache {
    entries: HashMap<(usize, usize), f64>,
    stats: CacheStats,
}

#[inline]
fn pair_key(p: usize, q: usize) -> (usize, usize) {
    if p <= q {
        (p, q)
    } else {
        (q, p)
    }
}

impl PairwiseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached estimate for the pair, if any. Does not touch the counters.
    pub fn get(&self, p: usize, q: usize) -> Option<f64> {
        self.entries.get(&pair_key(p, q)).copied()
    }

    pub fn insert(&mut self, p: usize, q: usize, value: f64) {
        self.entries.insert(pair_key(p, q), value);
    }

    /// Return the cached estimate, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, p: usize, q: usize, compute: F) -> f64
    where
        F: FnOnce() -> f64,
    {
        let key = pair_key(p, q);
        if let Some(&value) = self.entries.get(&key) {
            self.stats.hits += 1;
            return value;
        }
        self.stats.misses += 1;
        let value = compute();
        self.entries.insert(key, value);
        value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_unordered() {
        let mut cache = PairwiseCache::new();
        cache.insert(3, 1, 0.4);
        assert_eq!(cache.get(1, 3), Some(0.4));
        assert_eq!(cache.get(3, 1), Some(0.4));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_compute_runs_once() {
        let mut cache = PairwiseCache::new();
        let mut calls = 0;
        let a = cache.get_or_insert_with(0, 5, || {
            calls += 1;
            0.25
        });
        let b = cache.get_or_insert_with(5, 0, || {
            calls += 1;
            0.75
        });
        assert_eq!(a, 0.25);
        assert_eq!(b, 0.25);
        assert_eq!(calls, 1);
        assert_eq!(cache.stats(), CacheStats { hits: 1, misses: 1 });
    }
}
