//! Information measures over discrete-valued columns
//!
//! Every `f64` is treated as a category label, not a quantity. Two values are
//! the same category when their bit patterns match after folding `-0.0` into
//! `0.0` and every NaN into a single "missing" category.
//!
//! All entropies are in bits. Frequency tables are ordered maps so terms are
//! always summed in the same order and seeded runs reproduce bit-for-bit.

use std::collections::BTreeMap;

/// Canonical bit pattern used for all NaN (missing) values
const MISSING_CATEGORY: u64 = 0x7ff8_0000_0000_0000;

/// Map a value to its category key.
#[inline]
pub fn category_key(value: f64) -> u64 {
    if value.is_nan() {
        MISSING_CATEGORY
    } else if value == 0.0 {
        // -0.0 and 0.0 are one category
        0
    } else {
        value.to_bits()
    }
}

/// Count occurrences of each distinct category.
fn count_categories(values: &[f64]) -> BTreeMap<u64, usize> {
    let mut counts: BTreeMap<u64, usize> = BTreeMap::new();
    for &v in values {
        *counts.entry(category_key(v)).or_insert(0) += 1;
    }
    counts
}

/// Entropy of a frequency table with `total` observations.
fn entropy_from_counts<'a, I>(counts: I, total: usize) -> f64
where
    I: IntoIterator<Item = &'a usize>,
{
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    let mut h = 0.0_f64;
    for &c in counts {
        if c == 0 {
            continue;
        }
        let p = c as f64 / n;
        h -= p * p.log2();
    }
    h.max(0.0)
}

/// Shannon entropy H(X) of the empirical distribution of `x`.
///
/// Returns 0.0 when `x` holds a single distinct value. Empty input also
/// yields 0.0; the selector never samples zero rows.
pub fn entropy(x: &[f64]) -> f64 {
    let counts = count_categories(x);
    entropy_from_counts(counts.values(), x.len())
}

/// Conditional entropy H(X|Y).
///
/// `x` is partitioned by the distinct values of `y` (paired by index) and the
/// partition entropies are summed, weighted by `p(Y = v)`.
pub fn conditional_entropy(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len(), "conditional_entropy needs paired columns");

    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }

    // y category -> (x category -> count)
    let mut partitions: BTreeMap<u64, BTreeMap<u64, usize>> = BTreeMap::new();
    for (&xv, &yv) in x.iter().zip(y.iter()) {
        *partitions
            .entry(category_key(yv))
            .or_default()
            .entry(category_key(xv))
            .or_insert(0) += 1;
    }

    let total = n as f64;
    partitions
        .values()
        .map(|x_counts| {
            let size: usize = x_counts.values().sum();
            (size as f64 / total) * entropy_from_counts(x_counts.values(), size)
        })
        .sum()
}

/// Mutual information I(X;Y) = H(X) - H(X|Y), never negative.
pub fn mutual_information(x: &[f64], y: &[f64]) -> f64 {
    (entropy(x) - conditional_entropy(x, y)).max(0.0)
}

/// Symmetrical uncertainty SU(X,Y) = 2·I(X;Y) / (H(X) + H(Y)), in [0, 1].
///
/// Two constant inputs share no information and need none, so a zero
/// denominator yields 0.0.
pub fn symmetrical_uncertainty(x: &[f64], y: &[f64]) -> f64 {
    let h_x = entropy(x);
    let h_y = entropy(y);
    let denominator = h_x + h_y;
    if denominator <= 0.0 {
        return 0.0;
    }

    let mi = (h_x - conditional_entropy(x, y)).max(0.0);
    (2.0 * mi / denominator).clamp(0.0, 1.0)
}
