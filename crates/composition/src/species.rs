//! Trace gas species tracked in synthetic atmospheres

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompositionError;

/// Trace species whose log-abundance is sampled per atmosphere
///
/// The bulk (fill) gas is not listed here; it makes up whatever the trace
/// species leave over and is handled by `system-params`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GasSpecies {
    /// Water vapor
    H2O,
    /// Carbon monoxide
    CO,
    /// Carbon dioxide
    CO2,
    /// Ammonia
    NH3,
    /// Methane, one half of the biosignature pair
    CH4,
    /// Ozone, the other half of the biosignature pair
    O3,
}

impl GasSpecies {
    /// Every tracked species, in dataset column order
    pub const ALL: [GasSpecies; 6] = [
        GasSpecies::H2O,
        GasSpecies::CO,
        GasSpecies::CO2,
        GasSpecies::NH3,
        GasSpecies::CH4,
        GasSpecies::O3,
    ];

    /// Chemical formula as written in dataset headers
    pub fn formula(&self) -> &'static str {
        match self {
            Self::H2O => "H2O",
            Self::CO => "CO",
            Self::CO2 => "CO2",
            Self::NH3 => "NH3",
            Self::CH4 => "CH4",
            Self::O3 => "O3",
        }
    }

    /// Name of the realized-abundance column for this species, e.g. `atm CH4`
    pub fn column_name(&self) -> String {
        format!("atm {}", self.formula())
    }

    /// Whether the species takes part in the biosignature rule
    pub fn is_biosignature_gas(&self) -> bool {
        matches!(self, Self::CH4 | Self::O3)
    }
}

impl FromStr for GasSpecies {
    type Err = CompositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let formula = s.trim();
        Self::ALL
            .into_iter()
            .find(|species| species.formula().eq_ignore_ascii_case(formula))
            .ok_or_else(|| CompositionError::UnknownSpecies(formula.to_string()))
    }
}

impl fmt::Display for GasSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formula())
    }
}
