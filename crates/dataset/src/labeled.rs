//! A loaded dataset ready for classification

use composition::BiosignatureLabel;
use nalgebra::DMatrix;
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::frame::DatasetFrame;
use crate::schema::FeatureSchema;

/// Rows with a validated feature schema and integer labels
///
/// Labels come from the `biosignature` column: `yes` is 1 and every other
/// value is 0.
#[derive(Debug, Clone)]
pub struct LabeledDataset {
    frame: DatasetFrame,
    schema: FeatureSchema,
    labels: Vec<usize>,
    unrecognized_labels: usize,
}

impl LabeledDataset {
    pub fn from_frame(frame: DatasetFrame) -> Result<Self, DatasetError> {
        let schema = FeatureSchema::discover(&frame)?;
        Self::with_schema(frame, schema)
    }

    pub fn with_schema(frame: DatasetFrame, schema: FeatureSchema) -> Result<Self, DatasetError> {
        let values = frame.text_column(schema.label())?;
        let unrecognized_labels = values
            .iter()
            .filter(|v| v.as_str() != "yes" && v.as_str() != "no")
            .count();
        let labels = values
            .iter()
            .map(|v| BiosignatureLabel::from_column_value(v).class_index())
            .collect();

        for (value, count) in frame.value_counts(schema.label())? {
            info!(label = %value, count, "label value count");
        }
        if unrecognized_labels > 0 {
            warn!(
                rows = unrecognized_labels,
                "label values other than yes/no treated as class 0"
            );
        }

        Ok(Self {
            frame,
            schema,
            labels,
            unrecognized_labels,
        })
    }

    pub fn frame(&self) -> &DatasetFrame {
        &self.frame
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn n_rows(&self) -> usize {
        self.labels.len()
    }

    pub fn unrecognized_labels(&self) -> usize {
        self.unrecognized_labels
    }

    /// Rows per class, indexed by class
    pub fn label_counts(&self) -> [usize; 2] {
        let mut counts = [0; 2];
        for &label in &self.labels {
            counts[label] += 1;
        }
        counts
    }

    /// Rows × features in schema order
    pub fn feature_matrix(&self) -> Result<DMatrix<f64>, DatasetError> {
        let columns = self
            .schema
            .features()
            .iter()
            .map(|f| self.frame.float_column(&f.name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DMatrix::from_fn(self.n_rows(), columns.len(), |row, col| {
            columns[col][row]
        }))
    }
}
