//! Principal component analysis on the training covariance

use nalgebra::{DMatrix, SymmetricEigen};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Frozen reduction basis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPca {
    mean: Vec<f64>,
    /// One component per row, ordered by decreasing variance
    components: DMatrix<f64>,
    explained_variance: Vec<f64>,
}

impl FittedPca {
    /// Fit up to `n_components` components to finite data
    ///
    /// The number kept is capped by the feature count and the row count. Each
    /// component's sign is fixed so its largest-magnitude loading is positive.
    pub fn fit(x: &DMatrix<f64>, n_components: usize) -> Result<Self, PipelineError> {
        let (n, d) = x.shape();
        if n < 2 {
            return Err(PipelineError::TooFewRows { needed: 2, found: n });
        }
        let k = n_components.min(d).min(n);
        if k == 0 {
            return Err(PipelineError::InvalidConfig(
                "PCA needs at least one component".into(),
            ));
        }

        let mean: Vec<f64> = x.column_iter().map(|c| c.mean()).collect();
        let centered = DMatrix::from_fn(n, d, |row, col| x[(row, col)] - mean[col]);
        let covariance = (centered.transpose() * &centered) / (n as f64 - 1.0);

        let eigen = SymmetricEigen::new(covariance);
        let mut order: Vec<usize> = (0..d).collect();
        order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

        let mut components = DMatrix::zeros(k, d);
        let mut explained_variance = Vec::with_capacity(k);
        for (row, &index) in order.iter().take(k).enumerate() {
            let vector = eigen.eigenvectors.column(index);
            let pivot = vector.iter().copied().fold(0.0_f64, |best, v| {
                if v.abs() > best.abs() { v } else { best }
            });
            let sign = if pivot < 0.0 { -1.0 } else { 1.0 };
            for col in 0..d {
                components[(row, col)] = sign * vector[col];
            }
            explained_variance.push(eigen.eigenvalues[index].max(0.0));
        }

        Ok(Self {
            mean,
            components,
            explained_variance,
        })
    }

    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.mean.len()
    }

    pub fn components(&self) -> &DMatrix<f64> {
        &self.components
    }

    pub fn explained_variance(&self) -> &[f64] {
        &self.explained_variance
    }

    /// Project rows onto the components
    pub fn transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        if x.ncols() != self.n_features() {
            return Err(PipelineError::DimensionMismatch {
                expected: self.n_features(),
                found: x.ncols(),
            });
        }
        let centered = DMatrix::from_fn(x.nrows(), x.ncols(), |row, col| {
            x[(row, col)] - self.mean[col]
        });
        Ok(centered * self.components.transpose())
    }
}
