//! Synthetic spectra datasets
//!
//! [`DatasetAssembler`] drives a [`multiverse::Simulator`] through a
//! [`GenerationPlan`], one batch per composition class, and labels the
//! concatenated rows from their realized CH₄ and O₃ abundances. Datasets are
//! stored as parquet and loaded back as a [`LabeledDataset`] whose feature
//! columns are found by a [`FeatureSchema`].

pub mod assembler;
pub mod config;
pub mod error;
pub mod frame;
pub mod io;
pub mod labeled;
pub mod labeling;
pub mod plan;
pub mod rows;
pub mod schema;

pub use assembler::{AssembledDataset, DatasetAssembler};
pub use config::GenerationConfig;
pub use error::{DatasetError, SchemaError};
pub use frame::{Column, ColumnData, DatasetFrame};
pub use io::{dataset_file_name, dataset_path, read_parquet, write_parquet};
pub use labeled::LabeledDataset;
pub use labeling::{LABEL_COLUMN, LabelSummary, label_frame};
pub use plan::{GenerationPlan, PlanEntry};
pub use rows::{PROFILE_COLUMN, universes_to_frame};
pub use schema::{FEATURE_COLUMN_PATTERN, FeatureColumn, FeatureSchema};

#[cfg(test)]
mod labeling_test;
