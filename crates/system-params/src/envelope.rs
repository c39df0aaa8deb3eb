//! Planet size envelopes per fill gas
//!
//! H₂-dominated envelopes are only plausible for puffy super-Earths and
//! mini-Neptunes, so their radius/mass floor is much higher than for N₂ worlds.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fill_gas::FillGas;
use crate::range::ParamRange;

/// Planet radius (R⊕) and mass (M⊕) ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetEnvelope {
    pub radius: ParamRange,
    pub mass: ParamRange,
}

impl PlanetEnvelope {
    /// Super-Earths and mini-Neptunes able to hold an H₂ envelope
    pub const HYDROGEN: PlanetEnvelope = PlanetEnvelope {
        radius: ParamRange::known(5.0, 15.0),
        mass: ParamRange::known(20.0, 300.0),
    };

    /// Rocky planets through sub-giants with secondary N₂ atmospheres
    pub const NITROGEN: PlanetEnvelope = PlanetEnvelope {
        radius: ParamRange::known(1.0, 15.0),
        mass: ParamRange::known(1.0, 500.0),
    };

    /// Envelope used for fill gases without a dedicated range
    pub const DEFAULT: PlanetEnvelope = Self::NITROGEN;
}

/// Radius/mass envelope for a fill gas
///
/// Unsupported gases get [`PlanetEnvelope::DEFAULT`] and a warning rather than
/// an error.
pub fn planet_envelope(fill_gas: &FillGas) -> PlanetEnvelope {
    match fill_gas {
        FillGas::H2 => PlanetEnvelope::HYDROGEN,
        FillGas::N2 => PlanetEnvelope::NITROGEN,
        FillGas::Unsupported(name) => {
            warn!(
                fill_gas = %name,
                "unsupported fill gas, using default N2 planet parameters"
            );
            PlanetEnvelope::DEFAULT
        }
    }
}
