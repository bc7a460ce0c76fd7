// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2};
use rand::Rng;
use tracing::debug;

use crate::estimators::approaches::transfer_operator::transitions::TransitionInfo;

/// Sparse right-stochastic approximation of the transfer operator over visited bins.
///
/// Row `i` holds the transition probabilities out of visited bin `i`, stored as
/// `(column, probability)` pairs in ascending column order. Rows of dangling bins
/// (no observed outgoing transition) are replaced by a random distribution over all
/// visited bins drawn from the caller's generator, in ascending row order.
///
/// Restart rows are stored dense (`n` entries each), so memory is
/// O(transitions + dangling · n). A trajectory that breaks at many out-of-range points
/// leaves many dangling bins and pays for each of them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransferMatrix {
    rows: Vec<Vec<(usize, f64)>>,
    dangling: Vec<usize>,
}

impl TransferMatrix {
    /// Normalise the counts of `info` row by row, resolving dangling rows with `rng`.
    pub fn from_transitions<R: Rng + ?Sized>(info: &TransitionInfo, rng: &mut R) -> Self {
        let n = info.n_visited();
        let mut rows = Vec::with_capacity(n);
        let mut dangling = Vec::new();
        for i in 0..n {
            let row = info.row(i);
            let total: usize = row.values().sum();
            if total == 0 {
                dangling.push(i);
                rows.push(random_row(n, rng));
            } else {
                let t = total as f64;
                rows.push(row.iter().map(|(&j, &c)| (j, c as f64 / t)).collect());
            }
        }
        if !dangling.is_empty() {
            debug!(
                n_dangling = dangling.len(),
                n_visited = n,
                "resolved dangling rows with random restarts"
            );
        }
        Self { rows, dangling }
    }

    /// Number of visited bins (rows and columns).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, i: usize) -> &[(usize, f64)] {
        &self.rows[i]
    }

    /// Indices of the rows that were resolved randomly.
    pub fn dangling(&self) -> &[usize] {
        &self.dangling
    }

    pub fn row_sums(&self) -> Array1<f64> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|&(_, p)| p).sum())
            .collect()
    }

    /// `out = p · P` (left multiplication by a row vector).
    pub fn left_multiply_into(&self, p: &Array1<f64>, out: &mut Array1<f64>) {
        out.fill(0.0);
        for (i, row) in self.rows.iter().enumerate() {
            let pi = p[i];
            if pi == 0.0 {
                continue;
            }
            for &(j, pij) in row {
                out[j] += pi * pij;
            }
        }
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let n = self.len();
        let mut m = Array2::zeros((n, n));
        for (i, row) in self.rows.iter().enumerate() {
            for &(j, p) in row {
                m[(i, j)] = p;
            }
        }
        m
    }
}

/// Random distribution over `n` columns: i.i.d. Uniform(0, 1) weights, normalised.
fn random_row<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<(usize, f64)> {
    let weights: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..1.0)).collect();
    let total: f64 = weights.iter().sum();
    if total > 0.0 {
        weights.into_iter().map(|w| w / total).enumerate().collect()
    } else {
        (0..n).map(|j| (j, 1.0 / n as f64)).collect()
    }
}
