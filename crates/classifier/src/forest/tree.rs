//! Weighted CART decision tree with Gini impurity

use nalgebra::DMatrix;
use rand::seq::SliceRandom;
use rand_chacha::ChaChaRng;

/// Arena node; children are indices into [`DecisionTree::nodes`]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        /// Weighted class distribution, normalized to sum to 1
        proba: Vec<f64>,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Growth limits shared by every tree of a forest
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub n_classes: usize,
    /// Features to examine per split
    pub max_features: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct Candidate {
    feature: usize,
    threshold: f64,
    /// Weighted child impurity; lower is better
    impurity: f64,
    split_at: usize,
}

fn gini(class_weights: &[f64]) -> f64 {
    let total: f64 = class_weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - class_weights.iter().map(|w| (w / total).powi(2)).sum::<f64>()
}

struct Builder<'a> {
    x: &'a DMatrix<f64>,
    y: &'a [usize],
    weights: &'a [f64],
    params: TreeParams,
    nodes: Vec<Node>,
}

impl Builder<'_> {
    fn class_weights(&self, samples: &[usize]) -> Vec<f64> {
        let mut totals = vec![0.0; self.params.n_classes];
        for &s in samples {
            totals[self.y[s]] += self.weights[s];
        }
        totals
    }

    fn leaf(&mut self, totals: Vec<f64>) -> usize {
        let sum: f64 = totals.iter().sum();
        let proba = if sum > 0.0 {
            totals.iter().map(|w| w / sum).collect()
        } else {
            totals
        };
        self.nodes.push(Node::Leaf { proba });
        self.nodes.len() - 1
    }

    /// Best threshold on one feature, if the feature varies within the node
    fn best_on_feature(&self, samples: &mut [usize], feature: usize) -> Option<Candidate> {
        let x = self.x;
        samples.sort_by(|&a, &b| x[(a, feature)].total_cmp(&x[(b, feature)]));

        let first = x[(samples[0], feature)];
        let last = x[(samples[samples.len() - 1], feature)];
        if first >= last {
            return None;
        }

        let mut right = self.class_weights(samples);
        let mut left = vec![0.0; self.params.n_classes];
        let mut best: Option<Candidate> = None;

        for i in 1..samples.len() {
            let moved = samples[i - 1];
            left[self.y[moved]] += self.weights[moved];
            right[self.y[moved]] -= self.weights[moved];

            let a = x[(moved, feature)];
            let b = x[(samples[i], feature)];
            if a >= b {
                continue;
            }

            let w_left: f64 = left.iter().sum();
            let w_right: f64 = right.iter().sum();
            let impurity = w_left * gini(&left) + w_right * gini(&right);

            if best.as_ref().is_none_or(|c| impurity < c.impurity) {
                let mid = a + (b - a) / 2.0;
                let threshold = if mid >= b { a } else { mid };
                best = Some(Candidate {
                    feature,
                    threshold,
                    impurity,
                    split_at: i,
                });
            }
        }

        best
    }

    fn grow(&mut self, samples: &mut [usize], depth: usize, rng: &mut ChaChaRng) -> usize {
        let totals = self.class_weights(samples);
        let node_impurity = gini(&totals);

        let depth_exhausted = self.params.max_depth.is_some_and(|max| depth >= max);
        if depth_exhausted || samples.len() < self.params.min_samples_split || node_impurity <= 0.0
        {
            return self.leaf(totals);
        }

        let mut features: Vec<usize> = (0..self.x.ncols()).collect();
        features.shuffle(rng);

        // constant features don't count towards max_features
        let mut best: Option<Candidate> = None;
        let mut informative = 0;
        for feature in features {
            if informative >= self.params.max_features {
                break;
            }
            let Some(candidate) = self.best_on_feature(samples, feature) else {
                continue;
            };
            informative += 1;
            if best.as_ref().is_none_or(|b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }

        let Some(best) = best else {
            return self.leaf(totals);
        };

        samples.sort_by(|&a, &b| {
            self.x[(a, best.feature)].total_cmp(&self.x[(b, best.feature)])
        });
        let index = self.nodes.len();
        self.nodes.push(Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: 0,
            right: 0,
        });

        let (left_samples, right_samples) = samples.split_at_mut(best.split_at);
        let left = self.grow(left_samples, depth + 1, rng);
        let right = self.grow(right_samples, depth + 1, rng);
        if let Node::Split {
            left: l, right: r, ..
        } = &mut self.nodes[index]
        {
            *l = left;
            *r = right;
        }
        index
    }
}

impl DecisionTree {
    /// Grow a tree on the rows with positive weight
    ///
    /// `weights` combine bootstrap multiplicity and class weight per row.
    pub fn fit(
        x: &DMatrix<f64>,
        y: &[usize],
        weights: &[f64],
        params: TreeParams,
        rng: &mut ChaChaRng,
    ) -> Self {
        let mut samples: Vec<usize> = (0..x.nrows()).filter(|&i| weights[i] > 0.0).collect();
        let mut builder = Builder {
            x,
            y,
            weights,
            params,
            nodes: Vec::new(),
        };
        if samples.is_empty() {
            builder.leaf(vec![0.0; params.n_classes]);
        } else {
            builder.grow(&mut samples, 0, rng);
        }
        Self {
            nodes: builder.nodes,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn depth(&self) -> usize {
        fn walk(nodes: &[Node], index: usize) -> usize {
            match &nodes[index] {
                Node::Leaf { .. } => 0,
                Node::Split { left, right, .. } => 1 + walk(nodes, *left).max(walk(nodes, *right)),
            }
        }
        walk(&self.nodes, 0)
    }

    /// Class distribution of the leaf `row` falls into
    pub fn predict_proba_row(&self, x: &DMatrix<f64>, row: usize) -> &[f64] {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { proba } => return proba,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if x[(row, *feature)] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}
