//! Which columns are spectral features
//!
//! Feature columns are recognised once, at load time, by their names looking
//! like a decimal wavelength. Everything else is metadata.

use regex::Regex;

use crate::error::SchemaError;
use crate::frame::{ColumnData, DatasetFrame};
use crate::labeling::LABEL_COLUMN;

/// Column names matching this are spectral features
pub const FEATURE_COLUMN_PATTERN: &str = r"^-?\d+\.\d+$";

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    /// Wavelength in µm parsed from the name
    pub wavelength: f64,
}

/// Ordered, validated feature columns plus the label column name
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    features: Vec<FeatureColumn>,
    label: String,
}

impl FeatureSchema {
    /// Discover features with [`FEATURE_COLUMN_PATTERN`] and the `biosignature` label
    pub fn discover(frame: &DatasetFrame) -> Result<Self, SchemaError> {
        let pattern = Regex::new(FEATURE_COLUMN_PATTERN)
            .map_err(|e| SchemaError::InvalidPattern(e.to_string()))?;
        Self::discover_with(frame, &pattern, LABEL_COLUMN)
    }

    /// Discover features whose names match `pattern`, in frame order
    ///
    /// Fails if no column matches, if a matching column is not numeric, if two
    /// names parse to the same wavelength, or if the label column is absent or
    /// not text.
    pub fn discover_with(
        frame: &DatasetFrame,
        pattern: &Regex,
        label: &str,
    ) -> Result<Self, SchemaError> {
        match frame.column(label).map(|c| &c.data) {
            None => return Err(SchemaError::MissingLabel(label.to_string())),
            Some(ColumnData::Float(_)) => return Err(SchemaError::NonTextLabel(label.to_string())),
            Some(ColumnData::Text(_)) => {}
        }

        let mut features = Vec::new();
        for column in frame.columns() {
            if column.name == label || !pattern.is_match(&column.name) {
                continue;
            }
            let Ok(wavelength) = column.name.parse::<f64>() else {
                continue;
            };
            if !matches!(column.data, ColumnData::Float(_)) {
                return Err(SchemaError::NonNumericFeature(column.name.clone()));
            }
            if let Some(first) = features
                .iter()
                .find(|f: &&FeatureColumn| f.wavelength == wavelength)
            {
                return Err(SchemaError::DuplicateWavelength {
                    first: first.name.clone(),
                    second: column.name.clone(),
                });
            }
            features.push(FeatureColumn {
                name: column.name.clone(),
                wavelength,
            });
        }

        if features.is_empty() {
            return Err(SchemaError::NoFeatureColumns);
        }

        Ok(Self {
            features,
            label: label.to_string(),
        })
    }

    pub fn features(&self) -> &[FeatureColumn] {
        &self.features
    }

    pub fn wavelengths(&self) -> Vec<f64> {
        self.features.iter().map(|f| f.wavelength).collect()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
