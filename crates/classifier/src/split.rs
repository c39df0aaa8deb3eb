//! Stratified train/test partitioning

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use crate::error::SplitError;

/// Disjoint, sorted row indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

impl TrainTestSplit {
    /// Split `labels` so each class keeps its share in both partitions
    ///
    /// The test partition holds `ceil(test_fraction · n)` rows. That total is
    /// shared out across classes in proportion to their size, rounding down and
    /// handing the leftover rows to the classes with the largest remainders.
    /// Each class is shuffled with a `ChaChaRng` seeded from `seed` before its
    /// test rows are taken, so the split is reproducible.
    pub fn stratified(
        labels: &[usize],
        test_fraction: f64,
        seed: u64,
    ) -> Result<Self, SplitError> {
        if !(test_fraction > 0.0 && test_fraction < 1.0) {
            return Err(SplitError::InvalidFraction(test_fraction));
        }

        let n = labels.len();
        let test_rows = (test_fraction * n as f64).ceil() as usize;
        if test_rows == 0 || test_rows >= n {
            return Err(SplitError::EmptyPartition { rows: n, test_rows });
        }

        let n_classes = labels.iter().max().map_or(0, |&m| m + 1);
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (row, &label) in labels.iter().enumerate() {
            members[label].push(row);
        }
        if let Some((class, rows)) = members
            .iter()
            .enumerate()
            .find(|(_, rows)| rows.len() == 1)
        {
            return Err(SplitError::ClassTooSmall {
                class,
                count: rows.len(),
            });
        }

        let allocation = allocate(&members, test_rows, n);
        let mut rng = ChaChaRng::seed_from_u64(seed);
        let mut train = Vec::with_capacity(n - test_rows);
        let mut test = Vec::with_capacity(test_rows);

        for (mut rows, take) in members.into_iter().zip(allocation) {
            rows.shuffle(&mut rng);
            test.extend_from_slice(&rows[..take]);
            train.extend_from_slice(&rows[take..]);
        }

        train.sort_unstable();
        test.sort_unstable();
        Ok(Self { train, test })
    }
}

/// Test rows per class, summing to `test_rows`
fn allocate(members: &[Vec<usize>], test_rows: usize, n: usize) -> Vec<usize> {
    let exact: Vec<f64> = members
        .iter()
        .map(|rows| test_rows as f64 * rows.len() as f64 / n as f64)
        .collect();
    let mut allocation: Vec<usize> = exact.iter().map(|e| e.floor() as usize).collect();

    let mut by_remainder: Vec<usize> = (0..members.len()).collect();
    // stable sort keeps lower classes first among equal remainders
    by_remainder.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });

    let mut leftover = test_rows - allocation.iter().sum::<usize>();
    for class in by_remainder.into_iter().cycle() {
        if leftover == 0 {
            break;
        }
        if allocation[class] < members[class].len() {
            allocation[class] += 1;
            leftover -= 1;
        }
    }

    allocation
}
