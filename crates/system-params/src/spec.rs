//! Full parameter-range specification handed to a simulator

use composition::CompositionProfile;
use serde::{Deserialize, Serialize};

use crate::envelope::{PlanetEnvelope, planet_envelope};
use crate::fill_gas::FillGas;
use crate::range::{ParamRange, RangeError};

/// Host star ranges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarSpec {
    /// Effective temperature in Kelvin
    pub temperature: ParamRange,
    /// Radius in solar radii
    pub radius: ParamRange,
    /// Mass in solar masses
    pub mass: ParamRange,
}

impl Default for StarSpec {
    /// Late M dwarfs through early F stars
    fn default() -> Self {
        Self {
            temperature: ParamRange::known(2500.0, 7500.0),
            radius: ParamRange::known(0.1, 1.7),
            mass: ParamRange::known(0.1, 1.7),
        }
    }
}

/// Atmosphere ranges and trace-gas composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereSpec {
    /// Isothermal temperature in Kelvin
    pub temperature: ParamRange,
    /// Pressure at the base of the modeled column in Pa
    pub base_pressure: ParamRange,
    /// Pressure at the top of the modeled column in Pa
    pub top_pressure: ParamRange,
    pub fill_gas: FillGas,
    pub composition: CompositionProfile,
}

impl AtmosphereSpec {
    /// Default thermal and pressure ranges around a composition profile
    pub fn new(fill_gas: FillGas, composition: CompositionProfile) -> Self {
        Self {
            temperature: ParamRange::known(500.0, 2500.0),
            base_pressure: ParamRange::known(1e5, 1e6),
            top_pressure: ParamRange::known(1.0, 10.0),
            fill_gas,
            composition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetSpec {
    /// Radius in Earth radii
    pub radius: ParamRange,
    /// Mass in Earth masses
    pub mass: ParamRange,
    pub atmosphere: AtmosphereSpec,
}

/// Everything a simulator needs to draw one universe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSpec {
    pub star: StarSpec,
    pub planet: PlanetSpec,
    /// Semi-major axis in AU
    pub sma: ParamRange,
}

impl SystemSpec {
    /// Spec for one composition profile with the fill gas's planet envelope
    ///
    /// Looks the envelope up on every call, so an unsupported fill gas warns
    /// each time. Callers building several specs should resolve the envelope
    /// once and use [`SystemSpec::with_envelope`].
    pub fn for_profile(fill_gas: FillGas, composition: CompositionProfile) -> Self {
        let envelope = planet_envelope(&fill_gas);
        Self::with_envelope(fill_gas, envelope, composition)
    }

    pub fn with_envelope(
        fill_gas: FillGas,
        envelope: PlanetEnvelope,
        composition: CompositionProfile,
    ) -> Self {
        Self {
            star: StarSpec::default(),
            planet: PlanetSpec {
                radius: envelope.radius,
                mass: envelope.mass,
                atmosphere: AtmosphereSpec::new(fill_gas, composition),
            },
            sma: ParamRange::known(0.01, 0.5),
        }
    }

    pub fn fill_gas(&self) -> &FillGas {
        &self.planet.atmosphere.fill_gas
    }

    pub fn composition(&self) -> &CompositionProfile {
        &self.planet.atmosphere.composition
    }

    /// Check every bulk range
    pub fn validate(&self) -> Result<(), RangeError> {
        let atmosphere = &self.planet.atmosphere;
        [
            self.star.temperature,
            self.star.radius,
            self.star.mass,
            self.planet.radius,
            self.planet.mass,
            atmosphere.temperature,
            atmosphere.base_pressure,
            atmosphere.top_pressure,
            self.sma,
        ]
        .iter()
        .try_for_each(ParamRange::validate)
    }
}
