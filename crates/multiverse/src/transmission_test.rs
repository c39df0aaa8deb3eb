use std::collections::BTreeMap;

use approx::assert_relative_eq;
use composition::GasSpecies;
use system_params::FillGas;

use crate::grid::WavenumberGrid;
use crate::opacity::{OpacityTable, cross_section};
use crate::transmission::TransmissionModel;
use crate::universe::{AtmosphereDraw, PlanetDraw, StarDraw, SystemDraw};

fn draw_with(fill_gas: FillGas, ch4: f64) -> SystemDraw {
    let abundances = BTreeMap::from([
        (GasSpecies::H2O, -10.0),
        (GasSpecies::CO, -9.0),
        (GasSpecies::CO2, -9.0),
        (GasSpecies::NH3, -9.0),
        (GasSpecies::CH4, ch4),
        (GasSpecies::O3, -10.0),
    ]);

    SystemDraw {
        star: StarDraw {
            temperature: 5700.0,
            radius: 1.0,
            mass: 1.0,
        },
        planet: PlanetDraw {
            radius: 8.0,
            mass: 50.0,
        },
        atmosphere: AtmosphereDraw {
            temperature: 1200.0,
            base_pressure: 1e5,
            top_pressure: 1.0,
            fill_gas,
            abundances,
        },
        sma: 0.05,
    }
}

fn bin_nearest(grid: &WavenumberGrid, wavelength: f64) -> usize {
    grid.wavelengths()
        .iter()
        .enumerate()
        .min_by(|a, b| {
            (a.1 - wavelength)
                .abs()
                .partial_cmp(&(b.1 - wavelength).abs())
                .unwrap()
        })
        .map(|(i, _)| i)
        .unwrap()
}

#[test]
fn hydrogen_atmospheres_are_puffier() {
    let model = TransmissionModel::default();
    let h2 = model.scale_height(&draw_with(FillGas::H2, -6.0));
    let n2 = model.scale_height(&draw_with(FillGas::N2, -6.0));

    assert_relative_eq!(h2 / n2, 28.0 / 2.3, epsilon = 1e-9);
}

#[test]
fn spectrum_has_one_positive_depth_per_bin() {
    let grid = WavenumberGrid::from_wavelength_range(0.5, 7.8, 50.0).unwrap();
    let table = OpacityTable::for_grid(&grid);
    let spectrum = TransmissionModel::default().spectrum(&draw_with(FillGas::N2, -5.0), &table);

    assert_eq!(spectrum.len(), grid.len());
    assert!(spectrum.iter().all(|d| d.is_finite() && *d > 0.0));
}

#[test]
fn methane_deepens_its_band() {
    let grid = WavenumberGrid::from_wavelength_range(0.5, 7.8, 100.0).unwrap();
    let table = OpacityTable::for_grid(&grid);
    let model = TransmissionModel::default();
    let band = bin_nearest(&grid, 3.3);

    let rich = model.spectrum(&draw_with(FillGas::H2, -3.0), &table);
    let poor = model.spectrum(&draw_with(FillGas::H2, -9.0), &table);

    assert!(
        rich[band] > poor[band],
        "CH4 band depth {} should exceed {}",
        rich[band],
        poor[band]
    );
}

#[test]
fn opacity_saturates_at_column_top() {
    let grid = WavenumberGrid::from_wavelengths(vec![3.3]).unwrap();
    let table = OpacityTable::for_grid(&grid);
    let model = TransmissionModel {
        opacity_scale: 1e30,
        ..TransmissionModel::default()
    };
    let draw = draw_with(FillGas::N2, -1.0);

    let depth = model.spectrum(&draw, &table)[0];
    let h = model.scale_height(&draw);
    let z_max = model.column_scale_heights(&draw);
    let expected = ((8.0 * 6.371e6 + z_max * h) / 6.957e8).powi(2);

    assert_relative_eq!(depth, expected, max_relative = 1e-12);
}

#[test]
fn cross_sections_peak_at_band_centres() {
    assert!(cross_section(GasSpecies::CH4, 3.3) > cross_section(GasSpecies::CH4, 3.0));
    assert!(cross_section(GasSpecies::CO2, 4.3) > cross_section(GasSpecies::CO2, 5.0));
    assert!(cross_section(GasSpecies::O3, 4.75) > cross_section(GasSpecies::O3, 4.0));
}
