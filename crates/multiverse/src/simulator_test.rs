use composition::{CompositionClass, GasSpecies, ProfileSet, ProfileSettings};
use system_params::{FillGas, SystemSpec};

use crate::error::SimulationError;
use crate::grid::WavenumberGrid;
use crate::simulator::{SimulationRequest, Simulator, TransmissionSimulator};

fn spec_for(class: CompositionClass) -> SystemSpec {
    let profiles = ProfileSet::build(ProfileSettings::default()).unwrap();
    SystemSpec::for_profile(FillGas::N2, profiles.get(class).clone())
}

fn coarse_grid() -> WavenumberGrid {
    WavenumberGrid::from_wavelength_range(0.5, 7.8, 20.0).unwrap()
}

#[test]
fn one_row_per_draw_and_observation() {
    let spec = spec_for(CompositionClass::Biosignature);
    let grid = coarse_grid();
    let request = SimulationRequest::new(7, 15.0, 1).with_observations(3);

    let universes = TransmissionSimulator::default()
        .simulate(&spec, &grid, &request)
        .unwrap();

    assert_eq!(universes.len(), request.expected_rows());
    assert!(universes.iter().all(|u| u.spectrum.len() == grid.len()));
}

#[test]
fn observations_of_a_draw_share_id_and_parameters() {
    let spec = spec_for(CompositionClass::NonbioO3);
    let request = SimulationRequest::new(4, 10.0, 9).with_observations(2);

    let universes = TransmissionSimulator::default()
        .simulate(&spec, &coarse_grid(), &request)
        .unwrap();

    for (index, pair) in universes.chunks(2).enumerate() {
        assert_eq!(pair[0].id, request.draw_id(index));
        assert_eq!(pair[0].id, pair[1].id);
        assert_eq!(pair[0].draw, pair[1].draw);
        assert_eq!((pair[0].observation, pair[1].observation), (0, 1));
        assert_ne!(pair[0].spectrum, pair[1].spectrum);
    }
}

#[test]
fn realized_abundances_stay_inside_profile_bounds() {
    for class in CompositionClass::ALL {
        let spec = spec_for(class);
        let request = SimulationRequest::new(50, 15.0, 3).with_stream(class.name());

        let universes = TransmissionSimulator::default()
            .simulate(&spec, &coarse_grid(), &request)
            .unwrap();

        for universe in &universes {
            for species in GasSpecies::ALL {
                let value = universe.abundance(species).unwrap();
                let bounds = spec.composition().get(species).unwrap();
                assert!(
                    bounds.contains(value),
                    "{} {} = {} outside {:?}",
                    class,
                    species,
                    value,
                    bounds
                );
            }
        }
    }
}

#[test]
fn results_do_not_depend_on_thread_count() {
    let spec = spec_for(CompositionClass::NonbioCh4);
    let grid = coarse_grid();
    let simulator = TransmissionSimulator::default();
    let request = SimulationRequest::new(24, 15.0, 42).with_stream("nonbio_ch4");

    let global = simulator.simulate(&spec, &grid, &request).unwrap();
    let single = simulator
        .simulate(&spec, &grid, &request.clone().with_jobs(Some(1)))
        .unwrap();
    let quad = simulator
        .simulate(&spec, &grid, &request.with_jobs(Some(4)))
        .unwrap();

    assert_eq!(global, single);
    assert_eq!(global, quad);
}

#[test]
fn streams_and_seeds_change_the_draws() {
    let spec = spec_for(CompositionClass::NonbioNone);
    let grid = coarse_grid();
    let simulator = TransmissionSimulator::default();
    let base = SimulationRequest::new(3, 15.0, 42);

    let a = simulator.simulate(&spec, &grid, &base.clone().with_stream("a")).unwrap();
    let b = simulator.simulate(&spec, &grid, &base.clone().with_stream("b")).unwrap();
    let c = simulator
        .simulate(&spec, &grid, &SimulationRequest::new(3, 15.0, 43).with_stream("a"))
        .unwrap();

    assert_ne!(a[0].draw, b[0].draw);
    assert_ne!(a[0].draw, c[0].draw);
}

#[test]
fn zero_draws_yield_no_rows() {
    let spec = spec_for(CompositionClass::Biosignature);
    let universes = TransmissionSimulator::default()
        .simulate(&spec, &coarse_grid(), &SimulationRequest::new(0, 15.0, 1))
        .unwrap();
    assert!(universes.is_empty());
}

#[test]
fn invalid_requests_are_rejected() {
    let spec = spec_for(CompositionClass::Biosignature);
    let grid = coarse_grid();
    let simulator = TransmissionSimulator::default();

    let no_obs = SimulationRequest::new(1, 15.0, 1).with_observations(0);
    assert!(matches!(
        simulator.simulate(&spec, &grid, &no_obs),
        Err(SimulationError::InvalidRequest(_))
    ));

    let bad_snr = SimulationRequest::new(1, 0.0, 1);
    assert!(matches!(
        simulator.simulate(&spec, &grid, &bad_snr),
        Err(SimulationError::InvalidRequest(_))
    ));
}
