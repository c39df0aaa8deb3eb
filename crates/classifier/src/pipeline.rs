//! Split, scale, reduce, classify, report
//!
//! Every statistic is fitted on the training partition. The test partition only
//! ever passes through the frozen [`FittedPipelineState`].

use dataset::LabeledDataset;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::diagnostics::{NanDiagnostics, Partition, Stage, count_nan};
use crate::error::PipelineError;
use crate::forest::{ForestConfig, RandomForest};
use crate::metrics::{ClassificationReport, ConfusionMatrix, TARGET_NAMES};
use crate::pca::FittedPca;
use crate::scaler::{FittedScaler, ScalerKind};
use crate::split::TrainTestSplit;

/// Binary problem: non-biosignature (0) and biosignature (1)
pub const N_CLASSES: usize = TARGET_NAMES.len();

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub test_fraction: f64,
    pub split_seed: u64,
    pub scaler: ScalerKind,
    pub n_components: usize,
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            split_seed: 42,
            scaler: ScalerKind::Standard,
            n_components: 30,
            forest: ForestConfig::default(),
        }
    }
}

/// Features after each transform stage
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub scaled: DMatrix<f64>,
    /// PCA scores; scaled NaNs are read as 0 before projection
    pub reduced: DMatrix<f64>,
}

/// Scaler statistics and reduction basis, read-only once fitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPipelineState {
    scaler: FittedScaler,
    pca: FittedPca,
}

fn fill_nan(x: &DMatrix<f64>) -> DMatrix<f64> {
    x.map(|v| if v.is_nan() { 0.0 } else { v })
}

impl FittedPipelineState {
    /// Fit the scaler and PCA basis on training features
    pub fn fit(
        x_train: &DMatrix<f64>,
        scaler: ScalerKind,
        n_components: usize,
    ) -> Result<Self, PipelineError> {
        let scaler = FittedScaler::fit(scaler, x_train);
        let scaled = scaler.transform(x_train)?;

        let missing = count_nan(&scaled);
        if missing > 0 {
            warn!(nans = missing, "scaled NaN values read as 0 for PCA");
        }
        let pca = FittedPca::fit(&fill_nan(&scaled), n_components)?;

        Ok(Self { scaler, pca })
    }

    pub fn scaler(&self) -> &FittedScaler {
        &self.scaler
    }

    pub fn pca(&self) -> &FittedPca {
        &self.pca
    }

    pub fn transform(&self, x: &DMatrix<f64>) -> Result<Transformed, PipelineError> {
        let scaled = self.scaler.transform(x)?;
        let reduced = self.pca.transform(&fill_nan(&scaled))?;
        Ok(Transformed { scaled, reduced })
    }
}

/// Everything one evaluation run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub split: TrainTestSplit,
    pub state: FittedPipelineState,
    pub forest: RandomForest,
    pub train: Transformed,
    pub y_test: Vec<usize>,
    pub y_pred: Vec<usize>,
    pub confusion: ConfusionMatrix,
    pub report: ClassificationReport,
    pub diagnostics: NanDiagnostics,
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationPipeline {
    config: PipelineConfig,
}

impl ClassificationPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, dataset: &LabeledDataset) -> Result<PipelineOutcome, PipelineError> {
        let x = dataset.feature_matrix()?;
        info!(
            rows = x.nrows(),
            features = x.ncols(),
            "feature matrix assembled"
        );
        self.run_matrix(&x, dataset.labels())
    }

    /// Run on an explicit feature matrix and 0/1 labels
    pub fn run_matrix(
        &self,
        x: &DMatrix<f64>,
        y: &[usize],
    ) -> Result<PipelineOutcome, PipelineError> {
        if x.nrows() != y.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: x.nrows(),
                found: y.len(),
            });
        }
        if let Some(&label) = y.iter().find(|&&label| label >= N_CLASSES) {
            return Err(PipelineError::UnknownLabel {
                label,
                n_classes: N_CLASSES,
            });
        }

        let config = &self.config;
        let split = TrainTestSplit::stratified(y, config.test_fraction, config.split_seed)?;
        info!(
            train = split.train.len(),
            test = split.test.len(),
            seed = config.split_seed,
            "stratified split"
        );

        let x_train = x.select_rows(split.train.iter());
        let x_test = x.select_rows(split.test.iter());
        let y_train: Vec<usize> = split.train.iter().map(|&i| y[i]).collect();
        let y_test: Vec<usize> = split.test.iter().map(|&i| y[i]).collect();

        let mut diagnostics = NanDiagnostics::default();
        diagnostics.record(Partition::Train, Stage::Raw, &x_train);
        diagnostics.record(Partition::Test, Stage::Raw, &x_test);

        let state = FittedPipelineState::fit(&x_train, config.scaler, config.n_components)?;
        info!(
            scaler = %config.scaler,
            components = state.pca().n_components(),
            "scaler and PCA fitted on training partition"
        );

        let train = state.transform(&x_train)?;
        diagnostics.record(Partition::Train, Stage::Scaled, &train.scaled);
        diagnostics.record(Partition::Train, Stage::Reduced, &train.reduced);

        let forest = RandomForest::fit(&train.reduced, &y_train, N_CLASSES, &config.forest)?;
        info!(trees = forest.n_trees(), "random forest trained");

        let test = state.transform(&x_test)?;
        diagnostics.record(Partition::Test, Stage::Scaled, &test.scaled);
        diagnostics.record(Partition::Test, Stage::Reduced, &test.reduced);

        let y_pred = forest.predict(&test.reduced)?;
        let confusion = ConfusionMatrix::from_labels(&y_test, &y_pred, N_CLASSES)?;
        let report = ClassificationReport::from_confusion(&confusion, &TARGET_NAMES)?;
        info!(accuracy = report.accuracy, "test partition evaluated");

        Ok(PipelineOutcome {
            split,
            state,
            forest,
            train,
            y_test,
            y_pred,
            confusion,
            report,
            diagnostics,
        })
    }
}
