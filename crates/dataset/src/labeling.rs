//! Ground-truth labels recomputed from realized abundances

use std::collections::BTreeMap;

use composition::{
    BiosignatureLabel, BiosignatureThresholds, GasSpecies, MISSING_ABUNDANCE_SENTINEL,
    MissingAbundancePolicy,
};
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::frame::{Column, DatasetFrame};

/// Name of the `yes`/`no` label column
pub const LABEL_COLUMN: &str = "biosignature";

/// Outcome of a labeling pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSummary {
    pub yes: usize,
    pub no: usize,
    /// Rows where CH₄ or O₃ was missing and the sentinel was substituted
    pub sentinel_rows: usize,
}

impl LabelSummary {
    pub fn total(&self) -> usize {
        self.yes + self.no
    }

    pub fn counts(&self) -> BTreeMap<BiosignatureLabel, usize> {
        BTreeMap::from([
            (BiosignatureLabel::No, self.no),
            (BiosignatureLabel::Yes, self.yes),
        ])
    }
}

fn optional_abundances(
    frame: &DatasetFrame,
    species: GasSpecies,
) -> Result<Option<&[f64]>, DatasetError> {
    let name = species.column_name();
    if frame.column(&name).is_none() {
        warn!(
            column = %name,
            sentinel = MISSING_ABUNDANCE_SENTINEL,
            "abundance column missing from dataset"
        );
        return Ok(None);
    }
    frame.float_column(&name).map(Some)
}

/// Write the `biosignature` column from the realized CH₄ and O₃ columns
///
/// Any existing label column is overwritten. The composition class that
/// targeted a row is never consulted.
pub fn label_frame(
    frame: &mut DatasetFrame,
    thresholds: &BiosignatureThresholds,
    policy: MissingAbundancePolicy,
) -> Result<LabelSummary, DatasetError> {
    let ch4 = optional_abundances(frame, GasSpecies::CH4)?;
    let o3 = optional_abundances(frame, GasSpecies::O3)?;

    let mut summary = LabelSummary::default();
    let mut labels = Vec::with_capacity(frame.n_rows());

    for row in 0..frame.n_rows() {
        let ch4 = ch4.map(|c| c[row]);
        let o3 = o3.map(|c| c[row]);
        let missing = [ch4, o3].into_iter().any(|v| v.is_none_or(f64::is_nan));

        let label = thresholds.classify_realized(ch4, o3, policy)?;
        if missing {
            summary.sentinel_rows += 1;
        }
        match label {
            BiosignatureLabel::Yes => summary.yes += 1,
            BiosignatureLabel::No => summary.no += 1,
        }
        labels.push(label.as_str().to_string());
    }

    frame.set_column(Column::text(LABEL_COLUMN, labels))?;

    if summary.sentinel_rows > 0 {
        warn!(
            rows = summary.sentinel_rows,
            "labeled rows with a missing CH4 or O3 abundance as `no`"
        );
    }
    info!(yes = summary.yes, no = summary.no, "biosignature labels assigned");

    Ok(summary)
}
