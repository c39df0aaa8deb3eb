//! Synthetic universe simulation
//!
//! The [`Simulator`] trait is the boundary between dataset assembly and the
//! physics that turns sampled parameters into a noisy transmission spectrum.
//! [`TransmissionSimulator`] is the built-in implementation: an isothermal
//! scale-height model with Gaussian absorption bands per trace species. It is
//! meant for exercising the labeling and classification pipeline, not for
//! physically calibrated retrievals.

pub mod error;
pub mod grid;
pub mod noise;
pub mod opacity;
pub mod sampling;
pub mod simulator;
pub mod transmission;
pub mod universe;

pub use error::SimulationError;
pub use grid::{GridSettings, WavenumberGrid};
pub use simulator::{SimulationRequest, Simulator, TransmissionSimulator};
pub use transmission::TransmissionModel;
pub use universe::{AtmosphereDraw, PlanetDraw, SimulatedUniverse, StarDraw, SystemDraw};

#[cfg(test)]
mod noise_test;
#[cfg(test)]
mod simulator_test;
#[cfg(test)]
mod transmission_test;
