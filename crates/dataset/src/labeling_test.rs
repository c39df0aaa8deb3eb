use composition::{BiosignatureThresholds, CompositionError, GasSpecies, MissingAbundancePolicy};

use crate::error::DatasetError;
use crate::frame::{Column, DatasetFrame};
use crate::labeling::{LABEL_COLUMN, label_frame};

fn abundances(ch4: Vec<f64>, o3: Vec<f64>) -> DatasetFrame {
    DatasetFrame::from_columns(vec![
        Column::float(GasSpecies::CH4.column_name(), ch4),
        Column::float(GasSpecies::O3.column_name(), o3),
    ])
    .unwrap()
}

#[test]
fn labels_follow_realized_abundances_not_profile() {
    let mut frame = abundances(vec![-5.0, -6.0, -6.5, -4.0], vec![-3.0, -7.0, -2.0, -8.0]);
    frame
        .push_column(Column::text(
            "profile",
            ["nonbio_none", "nonbio_none", "biosignature", "biosignature"]
                .map(String::from)
                .to_vec(),
        ))
        .unwrap();

    let summary = label_frame(
        &mut frame,
        &BiosignatureThresholds::default(),
        MissingAbundancePolicy::Sentinel,
    )
    .unwrap();

    assert_eq!(
        frame.text_column(LABEL_COLUMN).unwrap(),
        &["yes", "yes", "no", "no"]
    );
    assert_eq!((summary.yes, summary.no, summary.sentinel_rows), (2, 2, 0));
    assert_eq!(summary.total(), 4);
}

#[test]
fn nan_abundance_uses_sentinel() {
    let mut frame = abundances(vec![f64::NAN, -4.0], vec![-3.0, -3.0]);

    let summary = label_frame(
        &mut frame,
        &BiosignatureThresholds::default(),
        MissingAbundancePolicy::Sentinel,
    )
    .unwrap();

    assert_eq!(frame.text_column(LABEL_COLUMN).unwrap(), &["no", "yes"]);
    assert_eq!(summary.sentinel_rows, 1);
}

#[test]
fn missing_column_labels_everything_no() {
    let mut frame =
        DatasetFrame::from_columns(vec![Column::float(GasSpecies::CH4.column_name(), vec![-2.0; 3])])
            .unwrap();

    let summary = label_frame(
        &mut frame,
        &BiosignatureThresholds::default(),
        MissingAbundancePolicy::Sentinel,
    )
    .unwrap();

    assert_eq!(summary.no, 3);
    assert_eq!(summary.sentinel_rows, 3);
}

#[test]
fn reject_policy_fails_on_missing_species() {
    let mut frame =
        DatasetFrame::from_columns(vec![Column::float(GasSpecies::CH4.column_name(), vec![-2.0])])
            .unwrap();

    let err = label_frame(
        &mut frame,
        &BiosignatureThresholds::default(),
        MissingAbundancePolicy::Reject,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        DatasetError::Composition(CompositionError::MissingAbundance(GasSpecies::O3))
    ));
}

#[test]
fn relabeling_overwrites_stale_labels() {
    let mut frame = abundances(vec![-9.0], vec![-9.0]);
    frame
        .push_column(Column::text(LABEL_COLUMN, vec!["yes".into()]))
        .unwrap();

    label_frame(
        &mut frame,
        &BiosignatureThresholds::default(),
        MissingAbundancePolicy::Sentinel,
    )
    .unwrap();

    assert_eq!(frame.text_column(LABEL_COLUMN).unwrap(), &["no"]);
    assert_eq!(frame.n_columns(), 3);
}
