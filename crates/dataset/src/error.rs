use std::path::PathBuf;

use composition::CompositionError;
use multiverse::SimulationError;
use thiserror::Error;

/// Problems with the feature/label layout of a loaded dataset
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("invalid feature column pattern: {0}")]
    InvalidPattern(String),

    #[error("no column names look like a wavelength (expected e.g. `1.250000`)")]
    NoFeatureColumns,

    #[error("feature column `{0}` is not numeric")]
    NonNumericFeature(String),

    #[error("feature columns `{first}` and `{second}` name the same wavelength")]
    DuplicateWavelength { first: String, second: String },

    #[error("label column `{0}` is missing")]
    MissingLabel(String),

    #[error("label column `{0}` is not a text column")]
    NonTextLabel(String),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error(transparent)]
    Composition(#[from] CompositionError),

    #[error("simulation failed: {0}")]
    Simulation(#[from] SimulationError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("column `{0}` not found")]
    MissingColumn(String),

    #[error("column `{0}` appears more than once")]
    DuplicateColumn(String),

    #[error("column `{name}` has {found} rows, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("column `{name}` is not a {expected} column")]
    ColumnType { name: String, expected: &'static str },

    #[error("cannot concatenate frames with different columns")]
    ColumnsDiffer,

    #[error("simulator returned {found} rows for profile {profile}, expected {expected}")]
    RowCount {
        profile: String,
        expected: usize,
        found: usize,
    },

    #[error("spectrum has {found} bins but the grid has {expected}")]
    SpectrumLength { expected: usize, found: usize },

    #[error("column `{name}` has unsupported type {data_type}")]
    UnsupportedType { name: String, data_type: String },

    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
