use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::range::{ParamRange, RangeError};

#[test]
fn samples_stay_within_bounds() {
    let mut rng = ChaChaRng::seed_from_u64(42);
    let range = ParamRange::new(0.01, 0.5).unwrap();

    for _ in 0..1000 {
        let value = range.sample(&mut rng);
        assert!(range.contains(value), "{} escaped {:?}", value, range);
    }
}

#[test]
fn samples_cover_the_range_uniformly() {
    let mut rng = ChaChaRng::seed_from_u64(7);
    let range = ParamRange::new(2500.0, 7500.0).unwrap();

    let samples: Vec<f64> = (0..4000).map(|_| range.sample(&mut rng)).collect();
    let mean = samples.iter().sum::<f64>() / samples.len() as f64;
    let below_mid = samples.iter().filter(|&&s| s < 5000.0).count();

    assert!((mean - 5000.0).abs() < 100.0, "mean {} should be near 5000", mean);
    assert!(
        (1800..2200).contains(&below_mid),
        "{} of 4000 below midpoint",
        below_mid
    );
}

#[test]
fn fixed_range_always_returns_value() {
    let mut rng = ChaChaRng::seed_from_u64(1);
    let range = ParamRange::fixed(3.5);
    assert_eq!(range.sample(&mut rng), 3.5);
}

#[test]
fn invalid_ranges_are_rejected() {
    assert_eq!(
        ParamRange::new(5.0, 1.0).unwrap_err(),
        RangeError::Inverted { low: 5.0, high: 1.0 }
    );
    assert!(matches!(
        ParamRange::new(f64::NAN, 1.0),
        Err(RangeError::NonFinite { .. })
    ));
}
