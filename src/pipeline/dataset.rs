//! In-memory feature matrix and label vector

use faer::Mat;

use super::error::SelectionError;

/// Discrete feature matrix with its aligned label column.
///
/// Rows are samples, columns are features. Values are category codes stored
/// as `f64`; see [`crate::pipeline::entropy::category_key`].
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Mat<f64>,
    labels: Vec<f64>,
    feature_names: Vec<String>,
    label_name: String,
}

impl Dataset {
    /// Build a dataset, checking the shape before anything else runs.
    pub fn new(
        features: Mat<f64>,
        labels: Vec<f64>,
        feature_names: Vec<String>,
        label_name: impl Into<String>,
    ) -> Result<Self, SelectionError> {
        if features.ncols() == 0 {
            return Err(SelectionError::NoFeatures);
        }
        if features.nrows() != labels.len() {
            return Err(SelectionError::LabelLengthMismatch {
                rows: features.nrows(),
                labels: labels.len(),
            });
        }
        if features.nrows() == 0 {
            return Err(SelectionError::NoRows);
        }
        if feature_names.len() != features.ncols() {
            return Err(SelectionError::FeatureNameMismatch {
                names: feature_names.len(),
                columns: features.ncols(),
            });
        }

        Ok(Self {
            features,
            labels,
            feature_names,
            label_name: label_name.into(),
        })
    }

    /// Build a dataset from feature columns, naming them `f0`, `f1`, ...
    pub fn from_columns(columns: &[Vec<f64>], labels: Vec<f64>) -> Result<Self, SelectionError> {
        let n_cols = columns.len();
        if n_cols == 0 {
            return Err(SelectionError::NoFeatures);
        }
        let n_rows = columns[0].len();
        if let Some((column, bad)) = columns.iter().enumerate().find(|(_, c)| c.len() != n_rows) {
            return Err(SelectionError::ColumnLengthMismatch {
                column,
                expected: n_rows,
                found: bad.len(),
            });
        }

        let features = Mat::from_fn(n_rows, n_cols, |i, j| columns[j][i]);
        let names = (0..n_cols).map(|j| format!("f{}", j)).collect();
        Self::new(features, labels, names, "label")
    }

    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// Value at (`row`, `feature`).
    #[inline]
    pub fn value(&self, row: usize, feature: usize) -> f64 {
        self.features[(row, feature)]
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn feature_name(&self, feature: usize) -> &str {
        &self.feature_names[feature]
    }

    pub fn label_name(&self) -> &str {
        &self.label_name
    }

    /// Copy one feature column out of the matrix.
    pub fn column(&self, feature: usize) -> Vec<f64> {
        (0..self.n_rows()).map(|i| self.features[(i, feature)]).collect()
    }
}
