//! Per-feature centering and scaling
//!
//! Statistics are fitted on the training partition only and ignore NaN cells.
//! `transform` leaves NaN cells as NaN.

use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalerKind {
    /// Mean and population standard deviation
    #[default]
    Standard,
    /// Median and interquartile range
    Robust,
}

impl FromStr for ScalerKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "robust" => Ok(Self::Robust),
            other => Err(PipelineError::InvalidConfig(format!(
                "unknown scaler `{other}` (expected standard or robust)"
            ))),
        }
    }
}

impl fmt::Display for ScalerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Robust => write!(f, "robust"),
        }
    }
}

/// Frozen per-feature location and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedScaler {
    kind: ScalerKind,
    center: Vec<f64>,
    scale: Vec<f64>,
}

impl FittedScaler {
    pub fn fit(kind: ScalerKind, x: &DMatrix<f64>) -> Self {
        let (center, scale) = x
            .column_iter()
            .map(|column| {
                let mut values: Vec<f64> =
                    column.iter().copied().filter(|v| !v.is_nan()).collect();
                let (center, spread) = match kind {
                    ScalerKind::Standard => mean_std(&values),
                    ScalerKind::Robust => median_iqr(&mut values),
                };
                (center, guard_zero_scale(spread, center))
            })
            .unzip();

        Self {
            kind,
            center,
            scale,
        }
    }

    pub fn kind(&self) -> ScalerKind {
        self.kind
    }

    pub fn center(&self) -> &[f64] {
        &self.center
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn n_features(&self) -> usize {
        self.center.len()
    }

    pub fn transform(&self, x: &DMatrix<f64>) -> Result<DMatrix<f64>, PipelineError> {
        if x.ncols() != self.n_features() {
            return Err(PipelineError::DimensionMismatch {
                expected: self.n_features(),
                found: x.ncols(),
            });
        }
        Ok(DMatrix::from_fn(x.nrows(), x.ncols(), |row, col| {
            (x[(row, col)] - self.center[col]) / self.scale[col]
        }))
    }
}

/// A column without finite values is left untouched
fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

fn median_iqr(values: &mut [f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 1.0);
    }
    values.sort_by(f64::total_cmp);
    let median = quantile(values, 0.5);
    let iqr = quantile(values, 0.75) - quantile(values, 0.25);
    (median, iqr)
}

/// Linear-interpolation quantile of sorted values
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Constant features keep their values centered but unscaled
fn guard_zero_scale(spread: f64, center: f64) -> f64 {
    if spread <= 10.0 * f64::EPSILON * center.abs().max(1.0) {
        1.0
    } else {
        spread
    }
}
