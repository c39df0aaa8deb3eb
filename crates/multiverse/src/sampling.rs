use std::f64::consts::PI;

use composition::AbundanceBounds;
use rand::Rng;
use rand_chacha::ChaChaRng;

/// Sample from a Gaussian (normal) distribution using Box-Muller transform
pub fn sample_gaussian(rng: &mut ChaChaRng, mean: f64, std_dev: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.random::<f64>();
    let u2: f64 = rng.random();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
    mean + std_dev * z
}

/// Draw a log10 abundance uniformly between the bounds
pub fn sample_log_abundance(rng: &mut ChaChaRng, bounds: &AbundanceBounds) -> f64 {
    bounds.lower + rng.random::<f64>() * bounds.width()
}
