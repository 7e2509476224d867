//! Bootstrap sampling of dataset rows
//!
//! Statistics on large datasets are estimated by averaging over repeated
//! random subsamples. Rows are drawn uniformly WITH replacement, so a row may
//! appear several times or not at all; accuracy comes from more repetitions,
//! not from larger single draws.

use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dataset::Dataset;

/// Number of rows drawn for a given ratio: `round(ratio * n_rows)`.
#[inline]
pub fn sample_size(n_rows: usize, ratio: f64) -> usize {
    (ratio * n_rows as f64).round() as usize
}

/// One bootstrap draw: the selected rows of features and labels, in draw order.
#[derive(Debug, Clone)]
pub struct Sample {
    row_indices: Vec<usize>,
    features: Mat<f64>,
    labels: Vec<f64>,
}

impl Sample {
    /// Materialize the given source rows of `dataset`.
    pub fn from_rows(dataset: &Dataset, row_indices: Vec<usize>) -> Self {
        let features = Mat::from_fn(row_indices.len(), dataset.n_features(), |i, j| {
            dataset.value(row_indices[i], j)
        });
        let labels = row_indices.iter().map(|&r| dataset.labels()[r]).collect();
        Self {
            row_indices,
            features,
            labels,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Source row index of each sampled row.
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    #[inline]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[(row, feature)]
    }

    /// Copy one sampled feature column.
    pub fn column(&self, feature: usize) -> Vec<f64> {
        (0..self.n_rows())
            .map(|i| self.features[(i, feature)])
            .collect()
    }
}

/// Draws bootstrap samples from an explicit, seedable random source.
#[derive(Debug, Clone)]
pub struct Sampler {
    ratio: f64,
    rng: StdRng,
}

impl Sampler {
    /// Create a sampler. With `seed = None` the generator is seeded from the OS.
    pub fn new(ratio: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { ratio, rng }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Draw row indices for a dataset of `n_rows` rows.
    pub fn draw_indices(&mut self, n_rows: usize) -> Vec<usize> {
        if n_rows == 0 {
            return Vec::new();
        }
        let size = sample_size(n_rows, self.ratio);
        (0..size).map(|_| self.rng.gen_range(0..n_rows)).collect()
    }

    /// Draw one bootstrap sample of `dataset`.
    pub fn draw(&mut self, dataset: &Dataset) -> Sample {
        let rows = self.draw_indices(dataset.n_rows());
        Sample::from_rows(dataset, rows)
    }
}
