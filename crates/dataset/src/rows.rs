//! Flattening simulated universes into dataset rows
//!
//! Metadata columns come first, in the order of the simulator header, followed
//! by one column per grid bin named by its wavelength.

use composition::GasSpecies;
use multiverse::{SimulatedUniverse, WavenumberGrid};

use crate::error::DatasetError;
use crate::frame::{Column, DatasetFrame};

/// Targeted composition class of each row
pub const PROFILE_COLUMN: &str = "profile";

fn floats(universes: &[SimulatedUniverse], f: impl Fn(&SimulatedUniverse) -> f64) -> Vec<f64> {
    universes.iter().map(f).collect()
}

/// Build the rows for one batch of universes targeted at `profile`
///
/// A species the simulator did not draw is stored as NaN, which labeling treats
/// as missing.
pub fn universes_to_frame(
    profile: &str,
    universes: &[SimulatedUniverse],
    grid: &WavenumberGrid,
) -> Result<DatasetFrame, DatasetError> {
    if let Some(bad) = universes.iter().find(|u| u.spectrum.len() != grid.len()) {
        return Err(DatasetError::SpectrumLength {
            expected: grid.len(),
            found: bad.spectrum.len(),
        });
    }

    let mut columns = vec![
        Column::text(PROFILE_COLUMN, vec![profile.to_string(); universes.len()]),
        Column::text("id", universes.iter().map(|u| u.id.to_string()).collect()),
        Column::float("observation", floats(universes, |u| u.observation as f64)),
        Column::float("s temperature", floats(universes, |u| u.draw.star.temperature)),
        Column::float("s radius", floats(universes, |u| u.draw.star.radius)),
        Column::float("s mass", floats(universes, |u| u.draw.star.mass)),
        Column::float("p radius", floats(universes, |u| u.draw.planet.radius)),
        Column::float("p mass", floats(universes, |u| u.draw.planet.mass)),
        Column::float("sma", floats(universes, |u| u.draw.sma)),
        Column::float(
            "atm temperature",
            floats(universes, |u| u.draw.atmosphere.temperature),
        ),
        Column::float(
            "atm base_pressure",
            floats(universes, |u| u.draw.atmosphere.base_pressure),
        ),
        Column::float(
            "atm top_pressure",
            floats(universes, |u| u.draw.atmosphere.top_pressure),
        ),
        Column::text(
            "atm fill_gas",
            universes
                .iter()
                .map(|u| u.draw.atmosphere.fill_gas.identity().to_string())
                .collect(),
        ),
    ];

    for species in GasSpecies::ALL {
        columns.push(Column::float(
            species.column_name(),
            floats(universes, |u| u.abundance(species).unwrap_or(f64::NAN)),
        ));
    }

    columns.push(Column::float("snr", floats(universes, |u| u.snr)));
    columns.push(Column::float("noise", floats(universes, |u| u.noise)));

    for (bin, name) in grid.column_names().into_iter().enumerate() {
        columns.push(Column::float(name, floats(universes, |u| u.spectrum[bin])));
    }

    DatasetFrame::from_columns(columns)
}
