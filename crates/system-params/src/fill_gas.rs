//! Bulk atmosphere gas identity

use std::fmt;

use serde::{Deserialize, Serialize};

/// The background gas that fills whatever the trace species leave over
///
/// Parsing never fails: identities other than H₂ and N₂ are kept verbatim
/// (upper-cased) as [`FillGas::Unsupported`] so exploratory runs can proceed
/// with default envelopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FillGas {
    /// Molecular hydrogen (with primordial helium)
    H2,
    /// Molecular nitrogen
    N2,
    Unsupported(String),
}

impl FillGas {
    /// Case-insensitive parse, normalized to upper case
    ///
    /// # Examples
    /// ```
    /// use system_params::FillGas;
    ///
    /// assert_eq!(FillGas::parse("h2"), FillGas::H2);
    /// assert_eq!(FillGas::parse("co2"), FillGas::Unsupported("CO2".to_string()));
    /// ```
    pub fn parse(identity: &str) -> Self {
        let normalized = identity.trim().to_uppercase();
        match normalized.as_str() {
            "H2" => Self::H2,
            "N2" => Self::N2,
            _ => Self::Unsupported(normalized),
        }
    }

    /// Upper-case identity used in file names and the `atm fill_gas` column
    pub fn identity(&self) -> &str {
        match self {
            Self::H2 => "H2",
            Self::N2 => "N2",
            Self::Unsupported(name) => name,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Mean molecular weight of the bulk atmosphere in atomic mass units
    ///
    /// H₂ uses the solar H₂/He mixture value. Unsupported gases fall back to N₂.
    pub fn mean_molecular_weight(&self) -> f64 {
        match self {
            Self::H2 => 2.3,
            Self::N2 | Self::Unsupported(_) => 28.0,
        }
    }

    /// Rayleigh scattering strength relative to H₂ per unit column
    pub fn rayleigh_strength(&self) -> f64 {
        match self {
            Self::H2 => 1.0,
            Self::N2 | Self::Unsupported(_) => 2.4,
        }
    }
}

impl From<String> for FillGas {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<FillGas> for String {
    fn from(value: FillGas) -> Self {
        value.identity().to_string()
    }
}

impl fmt::Display for FillGas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identity())
    }
}
