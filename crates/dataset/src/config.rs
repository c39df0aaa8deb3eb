use composition::{MissingAbundancePolicy, ProfileSettings};
use multiverse::GridSettings;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::plan::GenerationPlan;

/// Everything one dataset generation run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub grid: GridSettings,
    /// Noisy observations per draw
    pub n_observations: usize,
    pub snr: f64,
    /// Run seed; `None` picks a fresh one and logs it
    pub seed: Option<u64>,
    /// Worker threads for the simulator; `None` or 0 uses all cores
    pub n_jobs: Option<usize>,
    pub profiles: ProfileSettings,
    pub plan: GenerationPlan,
    pub missing_abundance: MissingAbundancePolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings::default(),
            n_observations: 1,
            snr: 15.0,
            seed: None,
            n_jobs: None,
            profiles: ProfileSettings::default(),
            plan: GenerationPlan::default(),
            missing_abundance: MissingAbundancePolicy::default(),
        }
    }
}

impl GenerationConfig {
    /// The configured seed, or a random one taken from a v4 UUID
    pub fn resolve_seed(&self) -> u64 {
        match self.seed {
            Some(seed) => seed,
            None => {
                let seed = Uuid::new_v4().as_u64_pair().0;
                info!(seed, "no seed configured, generated one");
                seed
            }
        }
    }
}
