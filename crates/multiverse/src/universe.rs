//! Realized draws and simulated universes

use std::collections::BTreeMap;

use composition::GasSpecies;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use system_params::{FillGas, SystemSpec};
use uuid::Uuid;

use crate::sampling::sample_log_abundance;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarDraw {
    /// K
    pub temperature: f64,
    /// R☉
    pub radius: f64,
    /// M☉
    pub mass: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetDraw {
    /// R⊕
    pub radius: f64,
    /// M⊕
    pub mass: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereDraw {
    /// K
    pub temperature: f64,
    /// Pa
    pub base_pressure: f64,
    /// Pa
    pub top_pressure: f64,
    pub fill_gas: FillGas,
    /// Realized log10 abundance per trace species
    pub abundances: BTreeMap<GasSpecies, f64>,
}

/// Concrete values for every range of a [`SystemSpec`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDraw {
    pub star: StarDraw,
    pub planet: PlanetDraw,
    pub atmosphere: AtmosphereDraw,
    /// AU
    pub sma: f64,
}

impl SystemDraw {
    /// Draw every parameter independently and uniformly within its range
    ///
    /// Log-abundances are uniform in log space between their bounds.
    pub fn sample(spec: &SystemSpec, rng: &mut ChaChaRng) -> Self {
        let star = StarDraw {
            temperature: spec.star.temperature.sample(rng),
            radius: spec.star.radius.sample(rng),
            mass: spec.star.mass.sample(rng),
        };
        let planet = PlanetDraw {
            radius: spec.planet.radius.sample(rng),
            mass: spec.planet.mass.sample(rng),
        };

        let atm = &spec.planet.atmosphere;
        let temperature = atm.temperature.sample(rng);
        let base_pressure = atm.base_pressure.sample(rng);
        let top_pressure = atm.top_pressure.sample(rng);
        let abundances = atm
            .composition
            .iter()
            .map(|(species, bounds)| (species, sample_log_abundance(rng, &bounds)))
            .collect();

        let sma = spec.sma.sample(rng);

        Self {
            star,
            planet,
            atmosphere: AtmosphereDraw {
                temperature,
                base_pressure,
                top_pressure,
                fill_gas: atm.fill_gas.clone(),
                abundances,
            },
            sma,
        }
    }
}

/// One row of the assembled dataset: a draw observed once through the noise model
///
/// Immutable once produced by a simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedUniverse {
    /// Identifier of the draw; shared by all observations of the same draw
    pub id: Uuid,
    /// Observation index within the draw
    pub observation: usize,
    pub draw: SystemDraw,
    /// Noisy transit depth per grid bin
    pub spectrum: Vec<f64>,
    pub snr: f64,
    /// Standard deviation of the added noise
    pub noise: f64,
}

impl SimulatedUniverse {
    /// Realized log10 abundance of a species, if the simulator drew it
    pub fn abundance(&self, species: GasSpecies) -> Option<f64> {
        self.draw.atmosphere.abundances.get(&species).copied()
    }
}
