//! Isothermal transmission model
//!
//! The transit depth in each bin is `((Rp + z·H) / Rs)²`, where `H` is the
//! atmospheric scale height and `z` the number of scale heights at which the
//! slant column becomes optically thick. `z` grows logarithmically with the
//! summed opacity of the trace species and is capped by the height of the
//! modeled column, `ln(P_base / P_top)`.

use serde::{Deserialize, Serialize};

use crate::opacity::OpacityTable;
use crate::universe::SystemDraw;

/// Boltzmann constant in J/K
const BOLTZMANN: f64 = 1.380649e-23;

/// Atomic mass unit in kg
const ATOMIC_MASS_UNIT: f64 = 1.660_539_066_6e-27;

const EARTH_RADIUS_M: f64 = 6.371e6;
const SOLAR_RADIUS_M: f64 = 6.957e8;

/// Surface gravity of a 1 M⊕, 1 R⊕ body in m/s²
const EARTH_SURFACE_GRAVITY: f64 = 9.80665;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransmissionModel {
    /// Pressure (Pa) at which `opacity_scale` applies
    pub reference_pressure: f64,
    /// Converts abundance × relative cross section into optical depth
    pub opacity_scale: f64,
    /// Optical depth of the fill-gas Rayleigh slope at 0.5 µm
    pub rayleigh_scale: f64,
}

impl Default for TransmissionModel {
    fn default() -> Self {
        Self {
            reference_pressure: 1.0e5,
            opacity_scale: 1.0e8,
            rayleigh_scale: 5.0,
        }
    }
}

impl TransmissionModel {
    /// Scale height in metres
    pub fn scale_height(&self, draw: &SystemDraw) -> f64 {
        let gravity = EARTH_SURFACE_GRAVITY * draw.planet.mass / draw.planet.radius.powi(2);
        let mu = draw.atmosphere.fill_gas.mean_molecular_weight();
        BOLTZMANN * draw.atmosphere.temperature / (mu * ATOMIC_MASS_UNIT * gravity)
    }

    /// Height of the modeled column in scale heights
    pub fn column_scale_heights(&self, draw: &SystemDraw) -> f64 {
        (draw.atmosphere.base_pressure / draw.atmosphere.top_pressure)
            .ln()
            .max(0.0)
    }

    /// Noise-free transit depth per bin of `table`
    pub fn spectrum(&self, draw: &SystemDraw, table: &OpacityTable) -> Vec<f64> {
        let atm = &draw.atmosphere;
        let pressure_factor = atm.base_pressure / self.reference_pressure;
        let column = self.opacity_scale * pressure_factor;
        let rayleigh = self.rayleigh_scale * atm.fill_gas.rayleigh_strength() * pressure_factor;

        let mut tau: Vec<f64> = table.rayleigh().iter().map(|r| rayleigh * r).collect();
        for (species, sigma) in table.species() {
            let Some(log_abundance) = atm.abundances.get(&species) else {
                continue;
            };
            let weight = 10f64.powf(*log_abundance) * column;
            for (t, s) in tau.iter_mut().zip(sigma) {
                *t += weight * s;
            }
        }

        let h = self.scale_height(draw);
        let z_max = self.column_scale_heights(draw);
        let rp = draw.planet.radius * EARTH_RADIUS_M;
        let rs = draw.star.radius * SOLAR_RADIUS_M;

        tau.into_iter()
            .map(|t| {
                let z = t.ln_1p().min(z_max);
                ((rp + z * h) / rs).powi(2)
            })
            .collect()
    }
}
