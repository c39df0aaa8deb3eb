//! Confusion matrix and per-class precision/recall/F1

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::PipelineError;

/// Display names for class 0 and class 1
pub const TARGET_NAMES: [&str; 2] = ["Non-Bio (0)", "Bio (1)"];

/// Counts with rows = true class, columns = predicted class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_labels(
        y_true: &[usize],
        y_pred: &[usize],
        n_classes: usize,
    ) -> Result<Self, PipelineError> {
        if y_true.len() != y_pred.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }
        let mut counts = vec![vec![0; n_classes]; n_classes];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t >= n_classes || p >= n_classes {
                return Err(PipelineError::UnknownLabel {
                    label: t.max(p),
                    n_classes,
                });
            }
            counts[t][p] += 1;
        }
        Ok(Self { counts })
    }

    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    pub fn get(&self, actual: usize, predicted: usize) -> usize {
        self.counts[actual][predicted]
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        (0..self.n_classes()).map(|c| self.counts[c][c]).sum()
    }

    /// Rows whose true class is `class`
    pub fn support(&self, class: usize) -> usize {
        self.counts[class].iter().sum()
    }

    /// Rows predicted as `class`
    pub fn predicted(&self, class: usize) -> usize {
        self.counts.iter().map(|row| row[class]).sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn min_count(&self) -> usize {
        self.counts.iter().flatten().copied().min().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Ratio with an undefined (0/0) result reported as 0
fn ratio(numerator: usize, denominator: usize, undefined: &mut bool) -> f64 {
    if denominator == 0 {
        *undefined = true;
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn average(
    per_class: &[ClassMetrics],
    total: usize,
    weight: impl Fn(&ClassMetrics) -> f64,
) -> ClassMetrics {
    let norm: f64 = per_class.iter().map(&weight).sum();
    let mean = |metric: fn(&ClassMetrics) -> f64| {
        if norm > 0.0 {
            per_class.iter().map(|m| weight(m) * metric(m)).sum::<f64>() / norm
        } else {
            0.0
        }
    };
    ClassMetrics {
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        support: total,
    }
}

/// Text report laid out like scikit-learn's `classification_report`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub target_names: Vec<String>,
    pub per_class: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: ClassMetrics,
    pub weighted_avg: ClassMetrics,
    pub digits: usize,
}

impl ClassificationReport {
    pub fn from_confusion(
        confusion: &ConfusionMatrix,
        target_names: &[&str],
    ) -> Result<Self, PipelineError> {
        let n_classes = confusion.n_classes();
        if target_names.len() != n_classes {
            return Err(PipelineError::InvalidConfig(format!(
                "{} target names for {} classes",
                target_names.len(),
                n_classes
            )));
        }

        let mut undefined = false;
        let per_class: Vec<ClassMetrics> = (0..n_classes)
            .map(|class| {
                let tp = confusion.get(class, class);
                let support = confusion.support(class);
                let precision = ratio(tp, confusion.predicted(class), &mut undefined);
                let recall = ratio(tp, support, &mut undefined);
                let f1 = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        if undefined {
            warn!("precision or recall is ill-defined for a class with no samples; reported as 0.0");
        }

        let total = confusion.total();
        let accuracy = ratio(confusion.correct(), total, &mut false);

        let macro_avg = average(&per_class, total, |_| 1.0);
        let weighted_avg = average(&per_class, total, |m| m.support as f64);

        Ok(Self {
            target_names: target_names.iter().map(|s| s.to_string()).collect(),
            per_class,
            accuracy,
            macro_avg,
            weighted_avg,
            digits: 2,
        })
    }

    /// Render the report text
    pub fn render(&self) -> String {
        const HEADERS: [&str; 4] = ["precision", "recall", "f1-score", "support"];
        const LAST_HEADING: &str = "weighted avg";

        let digits = self.digits;
        let width = self
            .target_names
            .iter()
            .map(String::len)
            .chain([LAST_HEADING.len(), digits])
            .max()
            .unwrap_or(LAST_HEADING.len());

        let mut out = String::new();
        let _ = write!(out, "{:>width$} ", "");
        for header in HEADERS {
            let _ = write!(out, " {header:>9}");
        }
        out.push_str("\n\n");

        let row = |out: &mut String, name: &str, m: &ClassMetrics| {
            let _ = writeln!(
                out,
                "{name:>width$}  {:>9.digits$} {:>9.digits$} {:>9.digits$} {:>9}",
                m.precision, m.recall, m.f1, m.support
            );
        };

        for (name, metrics) in self.target_names.iter().zip(&self.per_class) {
            row(&mut out, name, metrics);
        }
        out.push('\n');

        let _ = writeln!(
            out,
            "{:>width$}  {:>9} {:>9} {:>9.digits$} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        );
        row(&mut out, "macro avg", &self.macro_avg);
        row(&mut out, LAST_HEADING, &self.weighted_avg);

        out
    }
}
