//! Trace-gas composition profiles and biosignature labeling
//!
//! Defines the four stratification classes used to build synthetic atmospheres,
//! the log-abundance bounds each class samples from, and the rule that turns
//! realized CH₄/O₃ abundances into a ground-truth biosignature label.

pub mod error;
pub mod label;
pub mod profile;
pub mod species;

pub use error::CompositionError;
pub use label::{
    BiosignatureLabel, BiosignatureThresholds, MISSING_ABUNDANCE_SENTINEL, MissingAbundancePolicy,
};
pub use profile::{AbundanceBounds, CompositionClass, CompositionProfile, ProfileSet, ProfileSettings};
pub use species::GasSpecies;

#[cfg(test)]
mod profile_test;
