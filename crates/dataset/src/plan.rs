//! How many draws to make per composition class

use composition::{CompositionError, CompositionProfile, ProfileSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Composition class name, e.g. `nonbio_ch4`
    pub profile: String,
    pub count: usize,
}

impl PlanEntry {
    pub fn new(profile: impl Into<String>, count: usize) -> Self {
        Self {
            profile: profile.into(),
            count,
        }
    }
}

/// Ordered draw counts per class; rows are generated in this order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationPlan {
    entries: Vec<PlanEntry>,
}

impl Default for GenerationPlan {
    /// Half the draws target the biosignature class
    fn default() -> Self {
        Self::new(vec![
            PlanEntry::new("biosignature", 1500),
            PlanEntry::new("nonbio_ch4", 500),
            PlanEntry::new("nonbio_o3", 500),
            PlanEntry::new("nonbio_none", 500),
        ])
    }
}

impl GenerationPlan {
    pub fn new(entries: Vec<PlanEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    pub fn total_draws(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Look up every entry's profile
    ///
    /// Resolves the whole plan before anything is simulated, so an unknown
    /// class name fails the run without doing any work.
    pub fn resolve<'a>(
        &self,
        profiles: &'a ProfileSet,
    ) -> Result<Vec<(&'a CompositionProfile, usize)>, CompositionError> {
        self.entries
            .iter()
            .map(|entry| Ok((profiles.lookup(&entry.profile)?, entry.count)))
            .collect()
    }
}
