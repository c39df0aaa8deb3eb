//! Stratified dataset generation
//!
//! Runs the simulator once per plan entry, concatenates the batches in plan
//! order and only then assigns labels, from the realized abundances of every
//! row.

use composition::ProfileSet;
use multiverse::{SimulationRequest, Simulator};
use system_params::{FillGas, SystemSpec, planet_envelope};
use tracing::info;

use crate::config::GenerationConfig;
use crate::error::DatasetError;
use crate::frame::DatasetFrame;
use crate::labeling::{LABEL_COLUMN, LabelSummary, label_frame};
use crate::rows::universes_to_frame;

/// A generated, labeled dataset
#[derive(Debug, Clone)]
pub struct AssembledDataset {
    pub frame: DatasetFrame,
    pub labels: LabelSummary,
    pub fill_gas: FillGas,
    /// Seed the run actually used
    pub seed: u64,
}

pub struct DatasetAssembler<S: Simulator> {
    simulator: S,
    config: GenerationConfig,
}

impl<S: Simulator> DatasetAssembler<S> {
    pub fn new(simulator: S, config: GenerationConfig) -> Self {
        Self { simulator, config }
    }

    pub fn simulator(&self) -> &S {
        &self.simulator
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generate every plan entry for `fill_gas` and label the result
    ///
    /// The plan and profiles are validated before the first simulation. Any
    /// simulator error aborts the whole run; nothing partial is returned.
    pub fn assemble(&self, fill_gas: &FillGas) -> Result<AssembledDataset, DatasetError> {
        let config = &self.config;
        let profiles = ProfileSet::build(config.profiles.clone())?;
        let resolved = config.plan.resolve(&profiles)?;
        let grid = config.grid.build()?;
        let seed = config.resolve_seed();
        let envelope = planet_envelope(fill_gas);

        info!(
            fill_gas = %fill_gas,
            draws = config.plan.total_draws(),
            observations = config.n_observations,
            bins = grid.len(),
            seed,
            "assembling dataset"
        );

        let mut batches = Vec::with_capacity(resolved.len());
        for (index, (profile, count)) in resolved.into_iter().enumerate() {
            let name = profile.class.name();
            info!(
                "--- Generating {} {} planets for profile: {} ---",
                count, fill_gas, name
            );

            let spec = SystemSpec::with_envelope(fill_gas.clone(), envelope, profile.clone());
            let request = SimulationRequest::new(count, config.snr, seed)
                .with_observations(config.n_observations)
                .with_stream(format!("{index}:{name}"))
                .with_jobs(config.n_jobs);

            let universes = self.simulator.simulate(&spec, &grid, &request)?;
            if universes.len() != request.expected_rows() {
                return Err(DatasetError::RowCount {
                    profile: name.to_string(),
                    expected: request.expected_rows(),
                    found: universes.len(),
                });
            }
            batches.push(universes_to_frame(name, &universes, &grid)?);
        }

        let mut frame = DatasetFrame::concat(batches)?;
        let labels = label_frame(&mut frame, profiles.thresholds(), config.missing_abundance)?;

        for (value, count) in frame.value_counts(LABEL_COLUMN)? {
            info!(label = %value, count, "label value count");
        }

        Ok(AssembledDataset {
            frame,
            labels,
            fill_gas: fill_gas.clone(),
            seed,
        })
    }
}
