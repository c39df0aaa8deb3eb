//! Random forest classifier
//!
//! Bagged Gini trees with per-split feature subsampling. Tree seeds are drawn
//! sequentially from one `ChaChaRng`, then trees are grown in parallel, so the
//! fitted forest does not depend on the thread count.

pub mod tree;

use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PipelineError;
use tree::{DecisionTree, TreeParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassWeight {
    /// Every row counts once
    Uniform,
    /// Rows weighted by `n / (n_classes · class_count)` over the training labels
    #[default]
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub seed: u64,
    pub class_weight: ClassWeight,
    /// Features examined per split; `None` uses `floor(sqrt(n_features))`
    pub max_features: Option<usize>,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Worker threads; `None` or 0 uses the global pool
    pub n_jobs: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 150,
            seed: 42,
            class_weight: ClassWeight::Balanced,
            max_features: None,
            max_depth: None,
            min_samples_split: 2,
            n_jobs: None,
        }
    }
}

/// Per-class weights for `y`
pub fn class_weights(y: &[usize], n_classes: usize, mode: ClassWeight) -> Vec<f64> {
    match mode {
        ClassWeight::Uniform => vec![1.0; n_classes],
        ClassWeight::Balanced => {
            let mut counts = vec![0usize; n_classes];
            for &label in y {
                counts[label] += 1;
            }
            let present = counts.iter().filter(|&&c| c > 0).count().max(1);
            counts
                .iter()
                .map(|&c| {
                    if c == 0 {
                        0.0
                    } else {
                        y.len() as f64 / (present as f64 * c as f64)
                    }
                })
                .collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
    n_features: usize,
}

impl RandomForest {
    pub fn fit(
        x: &DMatrix<f64>,
        y: &[usize],
        n_classes: usize,
        config: &ForestConfig,
    ) -> Result<Self, PipelineError> {
        let (n, d) = x.shape();
        if n != y.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: n,
                found: y.len(),
            });
        }
        if n == 0 || d == 0 {
            return Err(PipelineError::TooFewRows { needed: 1, found: n });
        }
        if config.n_trees == 0 {
            return Err(PipelineError::InvalidConfig("forest needs at least one tree".into()));
        }
        if let Some(&label) = y.iter().find(|&&label| label >= n_classes) {
            return Err(PipelineError::UnknownLabel { label, n_classes });
        }

        let class_weight = class_weights(y, n_classes, config.class_weight);
        let params = TreeParams {
            n_classes,
            max_features: config
                .max_features
                .unwrap_or_else(|| (d as f64).sqrt() as usize)
                .clamp(1, d),
            max_depth: config.max_depth,
            min_samples_split: config.min_samples_split.max(2),
        };

        let mut master = ChaChaRng::seed_from_u64(config.seed);
        let seeds: Vec<u64> = (0..config.n_trees).map(|_| master.random()).collect();

        let grow = |seed: &u64| {
            let mut rng = ChaChaRng::seed_from_u64(*seed);
            let mut weights = vec![0.0; n];
            for _ in 0..n {
                weights[rng.random_range(0..n)] += 1.0;
            }
            for (w, &label) in weights.iter_mut().zip(y) {
                *w *= class_weight[label];
            }
            DecisionTree::fit(x, y, &weights, params, &mut rng)
        };

        let trees = match config.n_jobs {
            Some(n_jobs) if n_jobs > 0 => rayon::ThreadPoolBuilder::new()
                .num_threads(n_jobs)
                .build()
                .map_err(|e| PipelineError::ThreadPool(e.to_string()))?
                .install(|| seeds.par_iter().map(grow).collect::<Vec<_>>()),
            _ => seeds.par_iter().map(grow).collect(),
        };

        debug!(
            trees = trees.len(),
            max_features = params.max_features,
            max_depth = trees.iter().map(DecisionTree::depth).max().unwrap_or(0),
            "random forest fitted"
        );

        Ok(Self {
            trees,
            n_classes,
            n_features: d,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Mean of the trees' leaf distributions, one row per input row
    pub fn predict_proba(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        if x.ncols() != self.n_features {
            return Err(PipelineError::DimensionMismatch {
                expected: self.n_features,
                found: x.ncols(),
            });
        }

        let mut proba = DMatrix::zeros(x.nrows(), self.n_classes);
        for tree in &self.trees {
            for row in 0..x.nrows() {
                for (class, p) in tree.predict_proba_row(x, row).iter().enumerate() {
                    proba[(row, class)] += p;
                }
            }
        }
        Ok(proba / self.trees.len() as f64)
    }

    /// Most probable class per row; ties go to the lower class
    pub fn predict(&self, x: &DMatrix<f64>) -> Result<Vec<usize>, PipelineError> {
        let proba = self.predict_proba(x)?;
        Ok(proba
            .row_iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .fold((0, f64::NEG_INFINITY), |(best, best_p), (class, &p)| {
                        if p > best_p { (class, p) } else { (best, best_p) }
                    })
                    .0
            })
            .collect())
    }
}
