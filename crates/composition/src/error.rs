use thiserror::Error;

use crate::species::GasSpecies;

/// Configuration errors raised while building or resolving composition profiles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompositionError {
    /// A generation plan named a class that is not one of the four profiles
    #[error("unknown composition class '{0}' (expected biosignature, nonbio_ch4, nonbio_o3 or nonbio_none)")]
    UnknownClass(String),

    /// A species formula could not be recognised
    #[error("unknown gas species '{0}'")]
    UnknownSpecies(String),

    /// Threshold margin must be non-negative
    #[error("threshold margin must be non-negative, got {0}")]
    NegativeMargin(f64),

    /// A bound pair ended up inverted (usually because the margin is too wide)
    #[error("invalid {species} bounds for {class}: lower {lower} exceeds upper {upper}")]
    InvertedBounds {
        class: String,
        species: GasSpecies,
        lower: f64,
        upper: f64,
    },

    /// A bound was NaN or infinite
    #[error("non-finite {species} bound for {class}")]
    NonFiniteBound { class: String, species: GasSpecies },

    /// A species required for labeling was absent and the policy rejects that
    #[error("realized abundance for {0} is missing")]
    MissingAbundance(GasSpecies),
}
