use system_params::RangeError;
use thiserror::Error;

/// Failures inside the simulator boundary. All of them abort dataset generation.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid wavenumber grid: {0}")]
    InvalidGrid(String),

    #[error("invalid simulation request: {0}")]
    InvalidRequest(String),

    #[error("invalid system spec: {0}")]
    InvalidSpec(#[from] RangeError),

    #[error("failed to build simulation thread pool: {0}")]
    ThreadPool(String),

    #[error("draw {draw} produced a non-finite spectrum")]
    NonFiniteSpectrum { draw: usize },
}
