use std::path::PathBuf;

use dataset::DatasetError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("test fraction must lie strictly between 0 and 1, got {0}")]
    InvalidFraction(f64),

    #[error("a {test_rows}-row test split of {rows} rows leaves one side empty")]
    EmptyPartition { rows: usize, test_rows: usize },

    #[error("class {class} has {count} member(s); stratification needs at least 2")]
    ClassTooSmall { class: usize, count: usize },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("expected {expected} features, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("need at least {needed} training rows, got {found}")]
    TooFewRows { needed: usize, found: usize },

    #[error("label {label} is outside the {n_classes} known classes")]
    UnknownLabel { label: usize, n_classes: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("thread pool: {0}")]
    ThreadPool(String),

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
