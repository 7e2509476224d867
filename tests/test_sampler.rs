//! Tests for bootstrap sampling

use sufilter::pipeline::{sample_size, Sample, Sampler};

#[path = "common/mod.rs"]
mod common;

use common::{create_copy_and_noise_dataset, create_random_dataset};

#[test]
fn test_sample_size_rounds() {
    assert_eq!(sample_size(10, 1.0), 10);
    assert_eq!(sample_size(10, 0.25), 3);
    assert_eq!(sample_size(10, 0.05), 1);
    assert_eq!(sample_size(10, 0.04), 0);
    assert_eq!(sample_size(3, 0.5), 2);
}

#[test]
fn test_draw_has_expected_shape() {
    let dataset = create_random_dataset(50, 4, 3, 1);
    let mut sampler = Sampler::new(0.4, Some(9));
    assert_eq!(sampler.ratio(), 0.4);

    let sample = sampler.draw(&dataset);
    assert_eq!(sample.n_rows(), 20);
    assert_eq!(sample.n_features(), 4);
    assert_eq!(sample.labels().len(), 20);
    assert_eq!(sample.row_indices().len(), 20);
    assert!(sample.row_indices().iter().all(|&r| r < 50));
}

#[test]
fn test_sampled_rows_come_from_dataset() {
    let dataset = create_random_dataset(30, 3, 4, 2);
    let mut sampler = Sampler::new(1.0, Some(3));

    for _ in 0..10 {
        let sample = sampler.draw(&dataset);
        for (i, &row) in sample.row_indices().iter().enumerate() {
            assert_eq!(sample.labels()[i], dataset.labels()[row]);
            for j in 0..dataset.n_features() {
                assert_eq!(sample.value(i, j), dataset.value(row, j));
            }
        }
    }
}

#[test]
fn test_sample_never_invents_row_combinations() {
    let dataset = create_copy_and_noise_dataset();
    let original_rows: Vec<Vec<u64>> = (0..dataset.n_rows())
        .map(|r| {
            let mut row: Vec<u64> = (0..dataset.n_features())
                .map(|j| dataset.value(r, j).to_bits())
                .collect();
            row.push(dataset.labels()[r].to_bits());
            row
        })
        .collect();

    let mut sampler = Sampler::new(1.0, Some(4));
    let sample = sampler.draw(&dataset);
    for i in 0..sample.n_rows() {
        let mut row: Vec<u64> = (0..sample.n_features())
            .map(|j| sample.value(i, j).to_bits())
            .collect();
        row.push(sample.labels()[i].to_bits());
        assert!(original_rows.contains(&row), "row {:?} not in dataset", row);
    }
}

#[test]
fn test_same_seed_same_draws() {
    let mut a = Sampler::new(0.5, Some(42));
    let mut b = Sampler::new(0.5, Some(42));
    for _ in 0..5 {
        assert_eq!(a.draw_indices(100), b.draw_indices(100));
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = Sampler::new(1.0, Some(1));
    let mut b = Sampler::new(1.0, Some(2));
    assert_ne!(a.draw_indices(200), b.draw_indices(200));
}

#[test]
fn test_sample_from_explicit_rows() {
    let dataset = create_copy_and_noise_dataset();
    let sample = Sample::from_rows(&dataset, vec![2, 2, 5]);
    assert_eq!(sample.n_rows(), 3);
    assert_eq!(sample.column(0), vec![1.0, 1.0, 0.0]);
    assert_eq!(sample.column(1), vec![1.0, 1.0, 0.0]);
    assert_eq!(sample.labels(), &[1.0, 1.0, 0.0]);
}
