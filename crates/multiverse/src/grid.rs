//! Spectral grids at constant resolving power

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Micrometres per inverse centimetre conversion factor (λ[µm] = 10⁴ / ν[cm⁻¹])
const MICRON_PER_WAVENUMBER: f64 = 1.0e4;

/// Wavelength range and resolving power a grid is built from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Shortest wavelength in µm
    pub wl_min: f64,
    /// Longest wavelength in µm
    pub wl_max: f64,
    /// Resolving power λ/Δλ
    pub resolution: f64,
}

impl Default for GridSettings {
    /// Visible through mid-infrared at R = 200
    fn default() -> Self {
        Self {
            wl_min: 0.5,
            wl_max: 7.8,
            resolution: 200.0,
        }
    }
}

impl GridSettings {
    pub fn build(&self) -> Result<WavenumberGrid, SimulationError> {
        WavenumberGrid::from_wavelength_range(self.wl_min, self.wl_max, self.resolution)
    }
}

/// Ordered spectral bins, stored by wavelength ascending
///
/// Each bin becomes one feature column named by its wavelength.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WavenumberGrid {
    wavelengths: Vec<f64>,
}

impl WavenumberGrid {
    /// Geometric grid with λᵢ₊₁ = λᵢ (1 + 1/R) between `wl_min` and `wl_max`
    ///
    /// # Examples
    /// ```
    /// use multiverse::WavenumberGrid;
    ///
    /// let grid = WavenumberGrid::from_wavelength_range(1.0, 2.0, 10.0).unwrap();
    /// assert_eq!(grid.wavelengths()[0], 1.0);
    /// assert!(grid.wavelengths().last().copied().unwrap() <= 2.0);
    /// ```
    pub fn from_wavelength_range(
        wl_min: f64,
        wl_max: f64,
        resolution: f64,
    ) -> Result<Self, SimulationError> {
        if !(wl_min.is_finite() && wl_max.is_finite() && wl_min > 0.0 && wl_max > wl_min) {
            return Err(SimulationError::InvalidGrid(format!(
                "wavelength range ({}, {}) must be positive and increasing",
                wl_min, wl_max
            )));
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(SimulationError::InvalidGrid(format!(
                "resolution must be positive, got {}",
                resolution
            )));
        }

        let step = 1.0 + 1.0 / resolution;
        // slack keeps a bin sitting exactly on `wl_max`; the filter drops overshoot
        let n_bins = ((wl_max / wl_min).ln() / step.ln() + 1e-9).floor() as usize + 1;
        let wavelengths = (0..n_bins)
            .map(|i| wl_min * step.powi(i as i32))
            .filter(|&wl| wl <= wl_max)
            .collect();

        Self::from_wavelengths(wavelengths)
    }

    /// Grid from explicit bin wavelengths in µm
    ///
    /// Wavelengths must be positive, strictly increasing, and distinct once
    /// rendered as column names.
    pub fn from_wavelengths(wavelengths: Vec<f64>) -> Result<Self, SimulationError> {
        if wavelengths.is_empty() {
            return Err(SimulationError::InvalidGrid("grid has no bins".into()));
        }
        if wavelengths.iter().any(|wl| !wl.is_finite() || *wl <= 0.0) {
            return Err(SimulationError::InvalidGrid(
                "wavelengths must be finite and positive".into(),
            ));
        }
        if wavelengths.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(SimulationError::InvalidGrid(
                "wavelengths must be strictly increasing".into(),
            ));
        }

        let grid = Self { wavelengths };
        let mut seen = HashSet::new();
        if let Some(duplicate) = grid.column_names().into_iter().find(|name| !seen.insert(name.clone())) {
            return Err(SimulationError::InvalidGrid(format!(
                "resolution too fine for column naming: duplicate bin '{}'",
                duplicate
            )));
        }

        Ok(grid)
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Bin wavelengths in µm
    pub fn wavelengths(&self) -> &[f64] {
        &self.wavelengths
    }

    /// Bin wavenumbers in cm⁻¹, in the same order as [`Self::wavelengths`]
    pub fn wavenumbers(&self) -> Vec<f64> {
        self.wavelengths
            .iter()
            .map(|wl| MICRON_PER_WAVENUMBER / wl)
            .collect()
    }

    /// Feature column name for a wavelength, six decimals
    pub fn column_name(wavelength: f64) -> String {
        format!("{:.6}", wavelength)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.wavelengths.iter().copied().map(Self::column_name).collect()
    }
}
