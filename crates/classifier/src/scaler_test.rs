use approx::assert_relative_eq;
use nalgebra::DMatrix;

use crate::error::PipelineError;
use crate::scaler::{FittedScaler, ScalerKind};

#[test]
fn standard_uses_population_std() {
    let x = DMatrix::from_column_slice(4, 1, &[1.0, 2.0, 3.0, 4.0]);
    let scaler = FittedScaler::fit(ScalerKind::Standard, &x);

    assert_relative_eq!(scaler.center()[0], 2.5);
    assert_relative_eq!(scaler.scale()[0], 1.25_f64.sqrt());

    let scaled = scaler.transform(&x).unwrap();
    assert_relative_eq!(scaled.column(0).mean(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(scaled[(3, 0)], 1.5 / 1.25_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn robust_uses_median_and_iqr() {
    let x = DMatrix::from_column_slice(5, 1, &[1.0, 2.0, 3.0, 4.0, 100.0]);
    let scaler = FittedScaler::fit(ScalerKind::Robust, &x);

    assert_relative_eq!(scaler.center()[0], 3.0);
    // q75 = 4, q25 = 2
    assert_relative_eq!(scaler.scale()[0], 2.0);
}

#[test]
fn constant_feature_keeps_unit_scale() {
    let x = DMatrix::from_column_slice(3, 2, &[5.0, 5.0, 5.0, 1.0, 2.0, 3.0]);

    for kind in [ScalerKind::Standard, ScalerKind::Robust] {
        let scaler = FittedScaler::fit(kind, &x);
        assert_eq!(scaler.scale()[0], 1.0);

        let scaled = scaler.transform(&x).unwrap();
        assert!(scaled.column(0).iter().all(|&v| v == 0.0));
    }
}

#[test]
fn nan_is_ignored_when_fitting_and_kept_when_transforming() {
    let x = DMatrix::from_column_slice(4, 1, &[1.0, f64::NAN, 3.0, 5.0]);
    let scaler = FittedScaler::fit(ScalerKind::Standard, &x);

    assert_relative_eq!(scaler.center()[0], 3.0);
    let scaled = scaler.transform(&x).unwrap();
    assert!(scaled[(1, 0)].is_nan());
    assert!(scaled[(0, 0)].is_finite());
}

#[test]
fn all_nan_column_is_left_alone() {
    let x = DMatrix::from_column_slice(2, 1, &[f64::NAN, f64::NAN]);
    let scaler = FittedScaler::fit(ScalerKind::Robust, &x);

    assert_eq!(scaler.center(), &[0.0]);
    assert_eq!(scaler.scale(), &[1.0]);
}

#[test]
fn transform_checks_feature_count() {
    let scaler = FittedScaler::fit(ScalerKind::Standard, &DMatrix::zeros(3, 2));

    assert!(matches!(
        scaler.transform(&DMatrix::zeros(3, 4)),
        Err(PipelineError::DimensionMismatch {
            expected: 2,
            found: 4
        })
    ));
}

#[test]
fn kind_parses_case_insensitively() {
    assert_eq!("Robust".parse::<ScalerKind>().unwrap(), ScalerKind::Robust);
    assert_eq!(" standard ".parse::<ScalerKind>().unwrap(), ScalerKind::Standard);
    assert!(matches!(
        "minmax".parse::<ScalerKind>(),
        Err(PipelineError::InvalidConfig(_))
    ));
    assert_eq!(ScalerKind::Robust.to_string(), "robust");
}
