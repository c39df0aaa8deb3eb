//! Simulator boundary
//!
//! Dataset assembly only depends on the [`Simulator`] trait. Draws are
//! independent, so implementations may run them in parallel; the order of the
//! returned universes must still follow draw index.

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use system_params::SystemSpec;
use tracing::debug;
use uuid::Uuid;

use crate::error::SimulationError;
use crate::grid::WavenumberGrid;
use crate::noise::apply_noise;
use crate::opacity::OpacityTable;
use crate::transmission::TransmissionModel;
use crate::universe::{SimulatedUniverse, SystemDraw};

/// How many universes to draw and how to observe them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub n_draws: usize,
    /// Noisy observations per draw; each becomes its own row
    pub n_observations: usize,
    pub snr: f64,
    /// Run seed; per-draw seeds are derived from it
    pub seed: u64,
    /// Namespace for per-draw seeds so separate batches of one run differ
    pub stream: String,
    /// Worker threads; `None` or 0 uses the global pool
    pub n_jobs: Option<usize>,
}

impl SimulationRequest {
    pub fn new(n_draws: usize, snr: f64, seed: u64) -> Self {
        Self {
            n_draws,
            n_observations: 1,
            snr,
            seed,
            stream: String::new(),
            n_jobs: None,
        }
    }

    pub fn with_observations(mut self, n_observations: usize) -> Self {
        self.n_observations = n_observations;
        self
    }

    pub fn with_stream(mut self, stream: impl Into<String>) -> Self {
        self.stream = stream.into();
        self
    }

    pub fn with_jobs(mut self, n_jobs: Option<usize>) -> Self {
        self.n_jobs = n_jobs;
        self
    }

    /// Rows this request produces
    pub fn expected_rows(&self) -> usize {
        self.n_draws * self.n_observations
    }

    /// Deterministic identifier of one draw
    ///
    /// The first 64 bits seed that draw's RNG, so a draw's content depends only
    /// on (stream, seed, index) and never on thread scheduling.
    pub fn draw_id(&self, index: usize) -> Uuid {
        let name = format!("{}:{}:{}", self.stream, self.seed, index);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes())
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_observations == 0 {
            return Err(SimulationError::InvalidRequest(
                "n_observations must be at least 1".into(),
            ));
        }
        if !(self.snr.is_finite() && self.snr > 0.0) {
            return Err(SimulationError::InvalidRequest(format!(
                "snr must be positive, got {}",
                self.snr
            )));
        }
        Ok(())
    }
}

/// Turns a parameter-range spec into simulated universes
///
/// Implementations must draw every parameter independently and uniformly within
/// its range, return the realized abundances with each universe, and apply
/// noise after the spectrum is synthesized.
pub trait Simulator: Send + Sync {
    fn simulate(
        &self,
        spec: &SystemSpec,
        grid: &WavenumberGrid,
        request: &SimulationRequest,
    ) -> Result<Vec<SimulatedUniverse>, SimulationError>;
}

/// Built-in simulator backed by [`TransmissionModel`]
#[derive(Debug, Clone, Default)]
pub struct TransmissionSimulator {
    model: TransmissionModel,
}

impl TransmissionSimulator {
    pub fn new(model: TransmissionModel) -> Self {
        Self { model }
    }

    fn simulate_draw(
        &self,
        index: usize,
        spec: &SystemSpec,
        table: &OpacityTable,
        request: &SimulationRequest,
    ) -> Result<Vec<SimulatedUniverse>, SimulationError> {
        let id = request.draw_id(index);
        let mut rng = ChaChaRng::seed_from_u64(id.as_u64_pair().0);

        let draw = SystemDraw::sample(spec, &mut rng);
        let clean = self.model.spectrum(&draw, table);
        if clean.iter().any(|v| !v.is_finite()) {
            return Err(SimulationError::NonFiniteSpectrum { draw: index });
        }

        let universes = (0..request.n_observations)
            .map(|observation| {
                let (spectrum, noise) = apply_noise(&clean, request.snr, &mut rng);
                SimulatedUniverse {
                    id,
                    observation,
                    draw: draw.clone(),
                    spectrum,
                    snr: request.snr,
                    noise,
                }
            })
            .collect();

        Ok(universes)
    }
}

impl Simulator for TransmissionSimulator {
    fn simulate(
        &self,
        spec: &SystemSpec,
        grid: &WavenumberGrid,
        request: &SimulationRequest,
    ) -> Result<Vec<SimulatedUniverse>, SimulationError> {
        spec.validate()?;
        request.validate()?;

        let table = OpacityTable::for_grid(grid);
        debug!(
            draws = request.n_draws,
            bins = table.len(),
            stream = %request.stream,
            "simulating transmission spectra"
        );

        let run = || {
            (0..request.n_draws)
                .into_par_iter()
                .map(|index| self.simulate_draw(index, spec, &table, request))
                .collect::<Result<Vec<_>, _>>()
        };

        let per_draw = match request.n_jobs {
            Some(n_jobs) if n_jobs > 0 => rayon::ThreadPoolBuilder::new()
                .num_threads(n_jobs)
                .build()
                .map_err(|e| SimulationError::ThreadPool(e.to_string()))?
                .install(run)?,
            _ => run()?,
        };

        Ok(per_draw.into_iter().flatten().collect())
    }
}
