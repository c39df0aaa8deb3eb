//! Ground-truth biosignature labeling
//!
//! The label is a function of the realized CH₄ and O₃ log-abundances only. The
//! composition class that targeted a draw never enters this rule, so a draw that
//! lands on the wrong side of a threshold is labeled by what it actually is.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CompositionError;
use crate::species::GasSpecies;

/// Log-abundance substituted for a species that is absent from a record
///
/// Far below any threshold, so an absent species never counts as present.
pub const MISSING_ABUNDANCE_SENTINEL: f64 = -99.0;

/// Binary ground-truth label
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiosignatureLabel {
    No,
    Yes,
}

impl BiosignatureLabel {
    /// Value stored in the `biosignature` dataset column
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
        }
    }

    /// Integer class used by the classifier (`no` → 0, `yes` → 1)
    pub fn class_index(&self) -> usize {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }

    /// Parse a stored column value. Only the exact string `yes` is positive.
    pub fn from_column_value(value: &str) -> Self {
        if value == "yes" { Self::Yes } else { Self::No }
    }
}

impl fmt::Display for BiosignatureLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to do when a record lacks a realized CH₄ or O₃ abundance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAbundancePolicy {
    /// Substitute [`MISSING_ABUNDANCE_SENTINEL`], which resolves to `no`
    #[default]
    Sentinel,
    /// Refuse to label the record
    Reject,
}

/// Detectability thresholds in log10 partial-pressure fraction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiosignatureThresholds {
    pub ch4: f64,
    pub o3: f64,
}

impl Default for BiosignatureThresholds {
    fn default() -> Self {
        Self { ch4: -6.0, o3: -7.0 }
    }
}

impl BiosignatureThresholds {
    pub fn new(ch4: f64, o3: f64) -> Self {
        Self { ch4, o3 }
    }

    /// Label from concrete realized abundances
    ///
    /// # Examples
    /// ```
    /// use composition::{BiosignatureLabel, BiosignatureThresholds};
    ///
    /// let thresholds = BiosignatureThresholds::default();
    /// assert_eq!(thresholds.classify(-4.0, -3.0), BiosignatureLabel::Yes);
    /// assert_eq!(thresholds.classify(-4.0, -8.0), BiosignatureLabel::No);
    /// ```
    pub fn classify(&self, ch4: f64, o3: f64) -> BiosignatureLabel {
        if ch4 >= self.ch4 && o3 >= self.o3 {
            BiosignatureLabel::Yes
        } else {
            BiosignatureLabel::No
        }
    }

    /// Label from possibly-missing realized abundances
    ///
    /// `None` and NaN both count as missing. Under [`MissingAbundancePolicy::Sentinel`]
    /// they become [`MISSING_ABUNDANCE_SENTINEL`] and the record is labeled `no`.
    pub fn classify_realized(
        &self,
        ch4: Option<f64>,
        o3: Option<f64>,
        policy: MissingAbundancePolicy,
    ) -> Result<BiosignatureLabel, CompositionError> {
        let ch4 = resolve_missing(GasSpecies::CH4, ch4, policy)?;
        let o3 = resolve_missing(GasSpecies::O3, o3, policy)?;
        Ok(self.classify(ch4, o3))
    }
}

fn resolve_missing(
    species: GasSpecies,
    value: Option<f64>,
    policy: MissingAbundancePolicy,
) -> Result<f64, CompositionError> {
    match (value.filter(|v| !v.is_nan()), policy) {
        (Some(v), _) => Ok(v),
        (None, MissingAbundancePolicy::Sentinel) => Ok(MISSING_ABUNDANCE_SENTINEL),
        (None, MissingAbundancePolicy::Reject) => Err(CompositionError::MissingAbundance(species)),
    }
}
