//! Evaluation outputs on disk

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::diagnostics::NanDiagnostics;
use crate::error::PipelineError;
use crate::metrics::{ClassificationReport, ConfusionMatrix};
use crate::pipeline::{PipelineConfig, PipelineOutcome};
use crate::render::confusion_matrix_svg;
use crate::scaler::ScalerKind;

/// Machine-readable twin of the text report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub fill_gas: String,
    pub scaler: ScalerKind,
    pub n_train: usize,
    pub n_test: usize,
    pub n_components: usize,
    pub report: ClassificationReport,
    pub confusion_matrix: ConfusionMatrix,
    pub nan_diagnostics: NanDiagnostics,
}

impl MetricsSummary {
    pub fn new(fill_gas: &str, config: &PipelineConfig, outcome: &PipelineOutcome) -> Self {
        Self {
            fill_gas: fill_gas.to_string(),
            scaler: config.scaler,
            n_train: outcome.split.train.len(),
            n_test: outcome.split.test.len(),
            n_components: outcome.state.pca().n_components(),
            report: outcome.report.clone(),
            confusion_matrix: outcome.confusion.clone(),
            nan_diagnostics: outcome.diagnostics.clone(),
        }
    }
}

/// Paths of the written files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationArtifacts {
    pub report: PathBuf,
    pub confusion_matrix: PathBuf,
    pub metrics: PathBuf,
}

impl EvaluationArtifacts {
    /// `<GAS>_classification_report.txt`, `<GAS>_confusion_matrix.svg` and
    /// `<GAS>_metrics.json` inside `dir`
    pub fn in_dir(dir: &Path, fill_gas: &str) -> Self {
        Self {
            report: dir.join(format!("{fill_gas}_classification_report.txt")),
            confusion_matrix: dir.join(format!("{fill_gas}_confusion_matrix.svg")),
            metrics: dir.join(format!("{fill_gas}_metrics.json")),
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), PipelineError> {
    fs::write(path, contents).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the report, confusion-matrix image and metrics summary
///
/// Creates `dir` if it does not exist.
pub fn write_artifacts(
    dir: &Path,
    fill_gas: &str,
    config: &PipelineConfig,
    outcome: &PipelineOutcome,
) -> Result<EvaluationArtifacts, PipelineError> {
    fs::create_dir_all(dir).map_err(|source| PipelineError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let paths = EvaluationArtifacts::in_dir(dir, fill_gas);

    write_file(&paths.report, &outcome.report.render())?;

    let title = format!("Confusion Matrix on {fill_gas} Dataset");
    write_file(
        &paths.confusion_matrix,
        &confusion_matrix_svg(&outcome.confusion, &title),
    )?;

    let summary = MetricsSummary::new(fill_gas, config, outcome);
    write_file(&paths.metrics, &serde_json::to_string_pretty(&summary)?)?;

    info!(dir = %dir.display(), "evaluation artifacts written");
    Ok(paths)
}
