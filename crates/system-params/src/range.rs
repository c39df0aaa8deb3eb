//! Closed parameter ranges with uniform sampling

use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("range bounds must be finite, got ({low}, {high})")]
    NonFinite { low: f64, high: f64 },

    #[error("range low {low} exceeds high {high}")]
    Inverted { low: f64, high: f64 },
}

/// Closed interval `[low, high]` a simulator draws one value from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub low: f64,
    pub high: f64,
}

impl ParamRange {
    /// Create a validated range
    ///
    /// # Examples
    /// ```
    /// use system_params::ParamRange;
    ///
    /// let radius = ParamRange::new(1.0, 15.0).unwrap();
    /// assert!(radius.contains(7.5));
    /// assert!(ParamRange::new(2.0, 1.0).is_err());
    /// ```
    pub fn new(low: f64, high: f64) -> Result<Self, RangeError> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    /// Degenerate range that always yields `value`
    pub const fn fixed(value: f64) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    pub(crate) const fn known(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn validate(&self) -> Result<(), RangeError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(RangeError::NonFinite {
                low: self.low,
                high: self.high,
            });
        }
        if self.low > self.high {
            return Err(RangeError::Inverted {
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.low..=self.high).contains(&value)
    }

    /// Draw uniformly within the range
    pub fn sample(&self, rng: &mut ChaChaRng) -> f64 {
        self.low + rng.random::<f64>() * self.width()
    }
}

impl From<(f64, f64)> for ParamRange {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}
