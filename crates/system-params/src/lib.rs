//! Parameter ranges for synthetic star-planet-atmosphere systems
//!
//! A [`SystemSpec`] holds a range for every bulk parameter a simulator draws
//! from. Composition bounds come from the `composition` crate; the planet size
//! envelope depends on the atmosphere's fill gas.

pub mod envelope;
pub mod fill_gas;
pub mod range;
pub mod spec;

pub use envelope::{PlanetEnvelope, planet_envelope};
pub use fill_gas::FillGas;
pub use range::{ParamRange, RangeError};
pub use spec::{AtmosphereSpec, PlanetSpec, StarSpec, SystemSpec};

#[cfg(test)]
mod envelope_test;
#[cfg(test)]
mod fill_gas_test;
#[cfg(test)]
mod range_test;
#[cfg(test)]
mod spec_test;
