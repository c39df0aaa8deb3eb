use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::noise::{apply_noise, noise_level};

#[test]
fn noise_level_scales_with_feature_amplitude() {
    let spectrum = [0.010, 0.012, 0.011, 0.015];
    assert_relative_eq!(noise_level(&spectrum, 15.0), 0.005 / 15.0, epsilon = 1e-15);
    assert_relative_eq!(noise_level(&spectrum, 5.0), 0.001, epsilon = 1e-15);
}

#[test]
fn flat_spectrum_gets_a_floor() {
    let spectrum = [0.02; 8];
    let sigma = noise_level(&spectrum, 10.0);
    assert!(sigma > 0.0);
    assert!(sigma < 1e-8);
}

#[test]
fn applied_noise_matches_requested_level() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let mut spectrum = vec![0.01; 4000];
    spectrum[0] = 0.02;

    let (noisy, sigma) = apply_noise(&spectrum, 20.0, &mut rng);
    assert_relative_eq!(sigma, 0.01 / 20.0, epsilon = 1e-15);

    let residuals: Vec<f64> = noisy.iter().zip(&spectrum).map(|(n, c)| n - c).collect();
    let mean = residuals.iter().sum::<f64>() / residuals.len() as f64;
    let std = (residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>()
        / residuals.len() as f64)
        .sqrt();

    assert!(mean.abs() < 3.0 * sigma / (residuals.len() as f64).sqrt() * 2.0);
    assert!((std / sigma - 1.0).abs() < 0.05, "std {} vs sigma {}", std, sigma);
}
