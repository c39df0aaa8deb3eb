use approx::assert_relative_eq;
use nalgebra::DMatrix;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::error::PipelineError;
use crate::forest::tree::{DecisionTree, Node, TreeParams};
use crate::forest::{ClassWeight, ForestConfig, RandomForest, class_weights};

/// Class 0 below zero, class 1 above, plus a noise feature
fn separable() -> (DMatrix<f64>, Vec<usize>) {
    let values: Vec<f64> = (1..=10_i32)
        .map(|v| -f64::from(v))
        .chain((1..=10_i32).map(f64::from))
        .collect();
    let x = DMatrix::from_fn(values.len(), 2, |row, col| {
        if col == 0 {
            values[row]
        } else {
            (row % 3) as f64
        }
    });
    let y = values.iter().map(|&v| usize::from(v > 0.0)).collect();
    (x, y)
}

fn small_forest() -> ForestConfig {
    ForestConfig {
        n_trees: 25,
        ..ForestConfig::default()
    }
}

fn params(max_depth: Option<usize>) -> TreeParams {
    TreeParams {
        n_classes: 2,
        max_features: 2,
        max_depth,
        min_samples_split: 2,
    }
}

#[test]
fn balanced_weights_invert_class_frequency() {
    let weights = class_weights(&[0, 0, 0, 1], 2, ClassWeight::Balanced);

    assert_relative_eq!(weights[0], 4.0 / 6.0);
    assert_relative_eq!(weights[1], 2.0);
    assert_eq!(class_weights(&[0, 1], 2, ClassWeight::Uniform), vec![1.0, 1.0]);
}

#[test]
fn default_config() {
    let config = ForestConfig::default();

    assert_eq!(config.n_trees, 150);
    assert_eq!(config.seed, 42);
    assert_eq!(config.class_weight, ClassWeight::Balanced);
}

#[test]
fn pure_node_is_a_single_leaf() {
    let (x, _) = separable();
    let y = vec![1; x.nrows()];
    let weights = vec![1.0; x.nrows()];
    let mut rng = ChaChaRng::seed_from_u64(0);

    let tree = DecisionTree::fit(&x, &y, &weights, params(None), &mut rng);

    assert_eq!(tree.nodes(), &[Node::Leaf { proba: vec![0.0, 1.0] }]);
}

#[test]
fn tree_splits_between_classes() {
    let (x, y) = separable();
    let weights = vec![1.0; x.nrows()];
    let mut rng = ChaChaRng::seed_from_u64(0);

    let tree = DecisionTree::fit(&x, &y, &weights, params(Some(1)), &mut rng);

    assert_eq!(tree.depth(), 1);
    let Node::Split {
        feature, threshold, ..
    } = tree.nodes()[0]
    else {
        panic!("expected a split at the root");
    };
    assert_eq!(feature, 0);
    assert_relative_eq!(threshold, 0.0);
    for row in 0..x.nrows() {
        assert_eq!(tree.predict_proba_row(&x, row)[y[row]], 1.0);
    }
}

#[test]
fn zero_weight_rows_are_ignored() {
    let (x, y) = separable();
    let weights: Vec<f64> = y.iter().map(|&label| if label == 0 { 1.0 } else { 0.0 }).collect();
    let mut rng = ChaChaRng::seed_from_u64(0);

    let tree = DecisionTree::fit(&x, &y, &weights, params(None), &mut rng);

    assert_eq!(tree.nodes().len(), 1);
}

#[test]
fn forest_learns_separable_classes() {
    let (x, y) = separable();
    let config = ForestConfig {
        max_features: Some(2),
        ..small_forest()
    };
    let forest = RandomForest::fit(&x, &y, 2, &config).unwrap();

    assert_eq!(forest.n_trees(), 25);
    assert_eq!(forest.predict(&x).unwrap(), y);

    let unseen = DMatrix::from_row_slice(2, 2, &[-50.0, 1.0, 50.0, 0.0]);
    assert_eq!(forest.predict(&unseen).unwrap(), vec![0, 1]);
}

#[test]
fn probabilities_sum_to_one() {
    let (x, y) = separable();
    let forest = RandomForest::fit(&x, &y, 2, &small_forest()).unwrap();
    let proba = forest.predict_proba(&x).unwrap();

    for row in proba.row_iter() {
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn thread_count_does_not_change_the_forest() {
    let (x, y) = separable();
    let single = ForestConfig {
        n_jobs: Some(1),
        ..small_forest()
    };
    let several = ForestConfig {
        n_jobs: Some(3),
        ..small_forest()
    };

    let a = RandomForest::fit(&x, &y, 2, &single).unwrap();
    let b = RandomForest::fit(&x, &y, 2, &several).unwrap();
    let c = RandomForest::fit(&x, &y, 2, &small_forest()).unwrap();

    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn fit_rejects_bad_input() {
    let (x, y) = separable();

    let no_trees = ForestConfig {
        n_trees: 0,
        ..ForestConfig::default()
    };
    assert!(matches!(
        RandomForest::fit(&x, &y, 2, &no_trees),
        Err(PipelineError::InvalidConfig(_))
    ));
    assert!(matches!(
        RandomForest::fit(&x, &y[1..], 2, &small_forest()),
        Err(PipelineError::DimensionMismatch { .. })
    ));

    let mut three_classes = y.clone();
    three_classes[0] = 2;
    assert!(matches!(
        RandomForest::fit(&x, &three_classes, 2, &small_forest()),
        Err(PipelineError::UnknownLabel { label: 2, .. })
    ));
}

#[test]
fn predict_checks_feature_count() {
    let (x, y) = separable();
    let forest = RandomForest::fit(&x, &y, 2, &small_forest()).unwrap();

    assert!(matches!(
        forest.predict(&DMatrix::zeros(1, 5)),
        Err(PipelineError::DimensionMismatch {
            expected: 2,
            found: 5
        })
    ));
}
