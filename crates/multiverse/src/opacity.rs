//! Band-model absorption cross sections
//!
//! Each species is described by a handful of Gaussian bands at the positions
//! of its strongest vibrational (or, for O₃, electronic) features between
//! 0.5 and 8 µm. Strengths are relative and dimensionless; only their ratios
//! and positions matter to the spectra this crate produces.

use composition::GasSpecies;

use crate::grid::WavenumberGrid;

/// One Gaussian absorption band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AbsorptionBand {
    /// Band centre in µm
    pub center: f64,
    /// Gaussian width (σ) in µm
    pub width: f64,
    /// Peak relative cross section
    pub strength: f64,
}

const fn band(center: f64, width: f64, strength: f64) -> AbsorptionBand {
    AbsorptionBand {
        center,
        width,
        strength,
    }
}

const H2O_BANDS: [AbsorptionBand; 5] = [
    band(0.94, 0.03, 0.3),
    band(1.38, 0.06, 1.0),
    band(1.87, 0.08, 1.3),
    band(2.70, 0.15, 3.0),
    band(6.30, 0.50, 2.5),
];

const CO_BANDS: [AbsorptionBand; 2] = [band(2.35, 0.05, 0.6), band(4.67, 0.12, 2.0)];

const CO2_BANDS: [AbsorptionBand; 4] = [
    band(1.60, 0.04, 0.3),
    band(2.00, 0.05, 0.5),
    band(2.70, 0.08, 1.0),
    band(4.30, 0.12, 4.0),
];

const NH3_BANDS: [AbsorptionBand; 4] = [
    band(1.50, 0.08, 0.5),
    band(2.00, 0.10, 0.6),
    band(3.00, 0.12, 1.5),
    band(6.10, 0.30, 1.5),
];

const CH4_BANDS: [AbsorptionBand; 5] = [
    band(1.15, 0.04, 0.3),
    band(1.70, 0.07, 0.8),
    band(2.30, 0.10, 1.5),
    band(3.30, 0.15, 3.5),
    band(7.70, 0.40, 3.0),
];

// Chappuis continuum, the 4.7 µm band, and the wing of the 9.6 µm band
const O3_BANDS: [AbsorptionBand; 3] = [
    band(0.60, 0.08, 0.4),
    band(4.75, 0.10, 1.5),
    band(9.60, 0.60, 4.0),
];

/// Absorption bands for a species
pub fn bands(species: GasSpecies) -> &'static [AbsorptionBand] {
    match species {
        GasSpecies::H2O => &H2O_BANDS,
        GasSpecies::CO => &CO_BANDS,
        GasSpecies::CO2 => &CO2_BANDS,
        GasSpecies::NH3 => &NH3_BANDS,
        GasSpecies::CH4 => &CH4_BANDS,
        GasSpecies::O3 => &O3_BANDS,
    }
}

/// Relative cross section of a species at one wavelength (µm)
pub fn cross_section(species: GasSpecies, wavelength: f64) -> f64 {
    bands(species)
        .iter()
        .map(|b| {
            let x = (wavelength - b.center) / b.width;
            b.strength * (-0.5 * x * x).exp()
        })
        .sum()
}

/// Rayleigh scattering shape normalized to 1 at 0.5 µm
pub fn rayleigh_shape(wavelength: f64) -> f64 {
    (0.5 / wavelength).powi(4)
}

/// Cross sections evaluated once per grid and shared across draws
#[derive(Debug, Clone)]
pub struct OpacityTable {
    species: Vec<(GasSpecies, Vec<f64>)>,
    rayleigh: Vec<f64>,
}

impl OpacityTable {
    pub fn for_grid(grid: &WavenumberGrid) -> Self {
        let wavelengths = grid.wavelengths();
        let species = GasSpecies::ALL
            .into_iter()
            .map(|s| {
                let sigma = wavelengths.iter().map(|&wl| cross_section(s, wl)).collect();
                (s, sigma)
            })
            .collect();
        let rayleigh = wavelengths.iter().map(|&wl| rayleigh_shape(wl)).collect();

        Self { species, rayleigh }
    }

    pub fn len(&self) -> usize {
        self.rayleigh.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rayleigh.is_empty()
    }

    /// Per-bin cross sections for each species
    pub fn species(&self) -> impl Iterator<Item = (GasSpecies, &[f64])> {
        self.species.iter().map(|(s, sigma)| (*s, sigma.as_slice()))
    }

    pub fn rayleigh(&self) -> &[f64] {
        &self.rayleigh
    }
}
