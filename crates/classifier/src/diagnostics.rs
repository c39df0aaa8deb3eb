//! NaN bookkeeping through the pipeline stages

use std::fmt;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Train,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Features as loaded
    Raw,
    Scaled,
    /// After PCA projection
    Reduced,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Train => write!(f, "train"),
            Self::Test => write!(f, "test"),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Scaled => write!(f, "scaled"),
            Self::Reduced => write!(f, "reduced"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanCount {
    pub partition: Partition,
    pub stage: Stage,
    pub count: usize,
}

pub fn count_nan(x: &DMatrix<f64>) -> usize {
    x.iter().filter(|v| v.is_nan()).count()
}

/// NaN counts in recording order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NanDiagnostics {
    counts: Vec<NanCount>,
}

impl NanDiagnostics {
    /// Count NaNs in `x` and log them; never fails
    pub fn record(&mut self, partition: Partition, stage: Stage, x: &DMatrix<f64>) -> usize {
        let count = count_nan(x);
        if count > 0 {
            warn!(%partition, %stage, nans = count, "NaN values in features");
        } else {
            info!(%partition, %stage, nans = count, "NaN check");
        }
        self.counts.push(NanCount {
            partition,
            stage,
            count,
        });
        count
    }

    pub fn counts(&self) -> &[NanCount] {
        &self.counts
    }

    /// Latest count recorded for a partition and stage
    pub fn get(&self, partition: Partition, stage: Stage) -> Option<usize> {
        self.counts
            .iter()
            .rev()
            .find(|c| c.partition == partition && c.stage == stage)
            .map(|c| c.count)
    }
}
