//! Instrument noise applied after spectrum synthesis

use rand_chacha::ChaChaRng;

use crate::sampling::sample_gaussian;

/// Relative floor for the noise level of a featureless spectrum
const FLAT_SPECTRUM_FLOOR: f64 = 1.0e-6;

/// Noise standard deviation for a spectrum at a given SNR
///
/// The signal is the peak-to-trough amplitude of the spectral features, so the
/// SNR measures how well features stand out rather than the transit itself.
pub fn noise_level(spectrum: &[f64], snr: f64) -> f64 {
    let (min, max) = spectrum
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let amplitude = max - min;

    if amplitude > 0.0 {
        amplitude / snr
    } else {
        let mean = spectrum.iter().sum::<f64>() / spectrum.len().max(1) as f64;
        mean.abs() * FLAT_SPECTRUM_FLOOR / snr
    }
}

/// Add independent Gaussian noise to every bin
///
/// Returns the noisy spectrum and the noise standard deviation used.
pub fn apply_noise(spectrum: &[f64], snr: f64, rng: &mut ChaChaRng) -> (Vec<f64>, f64) {
    let sigma = noise_level(spectrum, snr);
    let noisy = spectrum
        .iter()
        .map(|&depth| depth + sample_gaussian(rng, 0.0, sigma))
        .collect();
    (noisy, sigma)
}
