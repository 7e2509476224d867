//! Tests for entropy, mutual information and symmetrical uncertainty

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sufilter::pipeline::{
    conditional_entropy, entropy, mutual_information, symmetrical_uncertainty,
};

#[path = "common/mod.rs"]
mod common;

use common::random_categories;

const EPS: f64 = 1e-12;

fn distinct(values: &[f64]) -> usize {
    values
        .iter()
        .map(|v| v.to_bits())
        .collect::<BTreeSet<_>>()
        .len()
}

#[test]
fn test_entropy_uniform_values() {
    assert_eq!(entropy(&[1.0, 1.0]), 0.0);
    assert_eq!(entropy(&[0.0, 1.0]), 1.0);
    assert_eq!(entropy(&[0.0, 1.0, 2.0, 3.0]), 2.0);
}

#[test]
fn test_entropy_ignores_category_labels() {
    // Only the frequencies matter, not the numeric values
    let a = entropy(&[0.0, 0.0, 1.0, 2.0]);
    let b = entropy(&[-7.5, -7.5, 1e9, 3.25]);
    assert!((a - b).abs() < EPS);
    assert!((a - 1.5).abs() < EPS);
}

#[test]
fn test_signed_zero_and_nan_categories() {
    assert_eq!(entropy(&[0.0, -0.0, 0.0, -0.0]), 0.0);
    assert_eq!(entropy(&[f64::NAN, f64::NAN, -f64::NAN]), 0.0);
    // NaN is a category of its own
    assert_eq!(entropy(&[f64::NAN, 1.0]), 1.0);
}

#[test]
fn test_conditional_entropy_independent_equals_entropy() {
    let x = [0.0, 1.0, 0.0, 1.0];
    let y = [0.0, 0.0, 1.0, 1.0];
    assert!((conditional_entropy(&x, &y) - entropy(&x)).abs() < EPS);
    assert!(mutual_information(&x, &y).abs() < EPS);
    assert_eq!(symmetrical_uncertainty(&x, &y), 0.0);
}

#[test]
fn test_su_of_copy_is_one() {
    let x = [3.0, 1.0, 2.0, 1.0, 3.0, 2.0];
    assert_eq!(symmetrical_uncertainty(&x, &x), 1.0);
}

#[test]
fn test_su_relabelled_copy_is_one() {
    let x = [0.0, 1.0, 2.0, 0.0, 1.0, 2.0];
    let y = [10.0, 20.0, 30.0, 10.0, 20.0, 30.0];
    assert!((symmetrical_uncertainty(&x, &y) - 1.0).abs() < EPS);
}

#[test]
fn test_su_one_constant_side_is_zero() {
    let x = [0.0, 1.0, 0.0, 1.0];
    let y = [5.0; 4];
    assert_eq!(symmetrical_uncertainty(&x, &y), 0.0);
    assert_eq!(symmetrical_uncertainty(&y, &x), 0.0);
}

#[test]
fn test_information_measure_properties_random() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..200 {
        let len = 1 + round % 37;
        let x = random_categories(&mut rng, len, 4);
        let y = random_categories(&mut rng, len, 3);

        let h_x = entropy(&x);
        let h_y = entropy(&y);
        let h_x_given_y = conditional_entropy(&x, &y);
        let mi = mutual_information(&x, &y);
        let su_xy = symmetrical_uncertainty(&x, &y);
        let su_yx = symmetrical_uncertainty(&y, &x);

        assert!(h_x >= 0.0 && h_x <= (len as f64).log2() + EPS);
        assert_eq!(
            h_x == 0.0,
            distinct(&x) == 1,
            "entropy {} for {} distinct value(s)",
            h_x,
            distinct(&x)
        );
        assert!(h_x_given_y >= -EPS && h_x_given_y <= h_x + EPS);
        assert!(mi >= 0.0 && mi <= h_x.min(h_y) + 1e-9);
        assert!((0.0..=1.0).contains(&su_xy), "SU out of range: {}", su_xy);
        assert!(
            (su_xy - su_yx).abs() < 1e-9,
            "SU not symmetric: {} vs {}",
            su_xy,
            su_yx
        );
    }
}

#[test]
fn test_measures_repeatable() {
    let mut rng = StdRng::seed_from_u64(11);
    let x = random_categories(&mut rng, 500, 9);
    let y = random_categories(&mut rng, 500, 5);

    let first = symmetrical_uncertainty(&x, &y);
    for _ in 0..5 {
        assert_eq!(symmetrical_uncertainty(&x, &y).to_bits(), first.to_bits());
    }
}
