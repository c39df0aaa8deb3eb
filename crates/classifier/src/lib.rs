//! Spectral classification pipeline
//!
//! Stratified split, per-feature scaling, PCA and a balanced random forest,
//! each fitted on the training partition only, followed by a text report, an
//! SVG confusion matrix and a JSON metrics summary.

pub mod artifacts;
pub mod diagnostics;
pub mod error;
pub mod forest;
pub mod metrics;
pub mod pca;
pub mod pipeline;
pub mod render;
pub mod scaler;
pub mod split;

pub use artifacts::{EvaluationArtifacts, MetricsSummary, write_artifacts};
pub use diagnostics::{NanCount, NanDiagnostics, Partition, Stage};
pub use error::{PipelineError, SplitError};
pub use forest::{ClassWeight, ForestConfig, RandomForest};
pub use metrics::{ClassMetrics, ClassificationReport, ConfusionMatrix, TARGET_NAMES};
pub use pca::FittedPca;
pub use pipeline::{
    ClassificationPipeline, FittedPipelineState, N_CLASSES, PipelineConfig, PipelineOutcome,
    Transformed,
};
pub use scaler::{FittedScaler, ScalerKind};
pub use split::TrainTestSplit;

#[cfg(test)]
mod forest_test;
#[cfg(test)]
mod render_test;
#[cfg(test)]
mod scaler_test;
