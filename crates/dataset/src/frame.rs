//! Column-oriented in-memory table
//!
//! Holds exactly what the dataset needs: named float and text columns of equal
//! length, in a fixed order.

use std::collections::BTreeMap;

use crate::error::DatasetError;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            Self::Float(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    fn same_kind(&self, other: &ColumnData) -> bool {
        self.kind() == other.kind()
    }

    fn extend(&mut self, other: ColumnData) {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => a.extend(b),
            (Self::Text(a), Self::Text(b)) => a.extend(b),
            // concat checks kinds before extending
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Float(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Ordered, equal-length named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetFrame {
    columns: Vec<Column>,
    n_rows: usize,
}

impl DatasetFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_columns(columns: Vec<Column>) -> Result<Self, DatasetError> {
        let mut frame = Self::new();
        for column in columns {
            frame.push_column(column)?;
        }
        Ok(frame)
    }

    /// Append a column; the first column fixes the row count
    pub fn push_column(&mut self, column: Column) -> Result<(), DatasetError> {
        if self.column(&column.name).is_some() {
            return Err(DatasetError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.n_rows = column.len();
        } else if column.len() != self.n_rows {
            return Err(DatasetError::LengthMismatch {
                expected: self.n_rows,
                found: column.len(),
                name: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Replace a column in place, or append it if absent
    pub fn set_column(&mut self, column: Column) -> Result<(), DatasetError> {
        match self.columns.iter().position(|c| c.name == column.name) {
            Some(index) => {
                if column.len() != self.n_rows {
                    return Err(DatasetError::LengthMismatch {
                        expected: self.n_rows,
                        found: column.len(),
                        name: column.name,
                    });
                }
                self.columns[index] = column;
                Ok(())
            }
            None => self.push_column(column),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn float_column(&self, name: &str) -> Result<&[f64], DatasetError> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Float(values)) => Ok(values),
            Some(ColumnData::Text(_)) => Err(DatasetError::ColumnType {
                name: name.to_string(),
                expected: "float",
            }),
            None => Err(DatasetError::MissingColumn(name.to_string())),
        }
    }

    pub fn text_column(&self, name: &str) -> Result<&[String], DatasetError> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Text(values)) => Ok(values),
            Some(ColumnData::Float(_)) => Err(DatasetError::ColumnType {
                name: name.to_string(),
                expected: "text",
            }),
            None => Err(DatasetError::MissingColumn(name.to_string())),
        }
    }

    /// Stack frames vertically, preserving their order
    ///
    /// Every frame must carry the same column names and kinds in the same order.
    pub fn concat(frames: Vec<DatasetFrame>) -> Result<Self, DatasetError> {
        let mut frames = frames.into_iter();
        let Some(mut combined) = frames.next() else {
            return Ok(Self::new());
        };

        for frame in frames {
            let compatible = combined.columns.len() == frame.columns.len()
                && combined
                    .columns
                    .iter()
                    .zip(&frame.columns)
                    .all(|(a, b)| a.name == b.name && a.data.same_kind(&b.data));
            if !compatible {
                return Err(DatasetError::ColumnsDiffer);
            }

            combined.n_rows += frame.n_rows;
            for (target, column) in combined.columns.iter_mut().zip(frame.columns) {
                target.data.extend(column.data);
            }
        }

        Ok(combined)
    }

    /// Occurrences of each distinct value of a text column
    pub fn value_counts(&self, name: &str) -> Result<BTreeMap<String, usize>, DatasetError> {
        let mut counts = BTreeMap::new();
        for value in self.text_column(name)? {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
