// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, HashMap};

use ndarray::{Array1, Array2};
use tracing::{debug, warn};

use crate::error::{BinningError, Result};
use crate::estimators::approaches::binning::encoder::RectangularBinEncoder;
use crate::estimators::approaches::common_nd::dataset::{PointData, ensure_dimension};

/// Observed consecutive-bin transitions of one trajectory (Ulam–Galerkin counts).
///
/// Rows and columns are indexed over the visited bins only, in order of first visit, so
/// memory grows with the number of visited bins rather than with the full partition.
/// Points outside the partition break the chain: transitions into and out of them are
/// dropped rather than counted as self-loops.
#[derive(Debug, Clone)]
pub struct TransitionInfo {
    bin_ids: Array1<i64>,
    visited: Vec<i64>,
    index: HashMap<i64, usize>,
    counts: Vec<BTreeMap<usize, usize>>,
    n_transitions: usize,
    skipped: usize,
}

impl TransitionInfo {
    /// Encode `trajectory` (rows are consecutive points) and count its transitions.
    pub fn from_trajectory<'a>(
        encoder: &RectangularBinEncoder,
        trajectory: impl Into<PointData<'a>>,
    ) -> Result<Self> {
        let data: PointData<'a> = trajectory.into();
        let view = data.view();
        ensure_dimension(&view, encoder.dimension())?;
        if view.nrows() < 2 {
            return Err(BinningError::InsufficientData {
                n: view.nrows(),
                min: 2,
            });
        }
        Self::from_bin_ids(encoder.encode_all(&view))
    }

    /// Count transitions of an already encoded trajectory; ids below 1 mark skipped points.
    pub fn from_bin_ids(bin_ids: Array1<i64>) -> Result<Self> {
        let n = bin_ids.len();
        if n < 2 {
            return Err(BinningError::InsufficientData { n, min: 2 });
        }

        let mut visited: Vec<i64> = Vec::new();
        let mut index: HashMap<i64, usize> = HashMap::new();
        let mut counts: Vec<BTreeMap<usize, usize>> = Vec::new();
        let mut n_transitions = 0usize;
        let mut skipped = 0usize;
        let mut prev: Option<usize> = None;

        for &id in bin_ids.iter() {
            if id < 1 {
                skipped += 1;
                prev = None;
                continue;
            }
            let j = *index.entry(id).or_insert_with(|| {
                visited.push(id);
                counts.push(BTreeMap::new());
                visited.len() - 1
            });
            if let Some(i) = prev {
                *counts[i].entry(j).or_insert(0) += 1;
                n_transitions += 1;
            }
            prev = Some(j);
        }

        if skipped > 0 {
            warn!(
                skipped,
                n_points = n,
                "points outside the partition were excluded from transition counting"
            );
        }
        if visited.is_empty() {
            return Err(BinningError::NoVisitedBins { n });
        }
        debug!(
            n_points = n,
            n_visited = visited.len(),
            n_transitions,
            "counted bin transitions"
        );

        Ok(Self {
            bin_ids,
            visited,
            index,
            counts,
            n_transitions,
            skipped,
        })
    }

    /// Per-step bin ids, including out-of-range sentinels.
    pub fn bin_ids(&self) -> &Array1<i64> {
        &self.bin_ids
    }

    /// Visited bin ids in order of first visit.
    pub fn visited_bins(&self) -> &[i64] {
        &self.visited
    }

    pub fn n_visited(&self) -> usize {
        self.visited.len()
    }

    /// Row/column index of a visited bin id.
    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Outgoing counts of visited bin `i`, keyed by target index in ascending order.
    pub fn row(&self, i: usize) -> &BTreeMap<usize, usize> {
        &self.counts[i]
    }

    /// Number of observed transitions between two bin ids.
    pub fn count(&self, from: i64, to: i64) -> usize {
        match (self.index_of(from), self.index_of(to)) {
            (Some(i), Some(j)) => self.counts[i].get(&j).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Whether visited bin `i` has no outgoing transition.
    pub fn is_dangling(&self, i: usize) -> bool {
        self.counts[i].is_empty()
    }

    pub fn n_transitions(&self) -> usize {
        self.n_transitions
    }

    /// Number of points that fell outside the partition.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Dense count matrix over the visited bins.
    pub fn count_matrix(&self) -> Array2<usize> {
        let n = self.n_visited();
        let mut m = Array2::zeros((n, n));
        for (i, row) in self.counts.iter().enumerate() {
            for (&j, &c) in row {
                m[(i, j)] = c;
            }
        }
        m
    }
}
