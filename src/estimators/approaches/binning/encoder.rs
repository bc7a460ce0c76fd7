// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView1, ArrayView2, Axis};
use tracing::warn;

use crate::error::{BinningError, Result};
use crate::estimators::approaches::binning::binning::{BinGrid, BinSpecification, Provenance};
use crate::estimators::approaches::binning::binning_utils::row_major_strides;
use crate::estimators::approaches::common_nd::dataset::{PointData, minmaxima};
use crate::estimators::traits::Encoding;

/// Identifier returned for points outside every bin.
pub const OUT_OF_RANGE: i64 = -1;

/// Encoder between D-dimensional points and 1-based linear bin identifiers.
///
/// Per-axis bin indices are found by binary search over the cached edges and combined
/// row-major (last axis fastest). Decoding returns the lower corner of a bin, which
/// always encodes back to the same identifier.
#[derive(Debug, Clone)]
pub struct RectangularBinEncoder {
    grid: BinGrid,
    counts: Vec<usize>,
    strides: Vec<usize>,
    total: usize,
    maximum_out_of_range: bool,
}

impl RectangularBinEncoder {
    /// Build an encoder over an already resolved grid.
    pub fn new(grid: BinGrid) -> Result<Self> {
        let counts = grid.counts();
        let (strides, total) = row_major_strides(&counts)?;
        Ok(Self {
            grid,
            counts,
            strides,
            total,
            maximum_out_of_range: false,
        })
    }

    /// Resolve `spec` against `data` and build the encoder.
    ///
    /// For a data-derived specification in fast mode, the per-axis maximum of `data` is
    /// encoded once; if it falls outside the partition a single warning is emitted and
    /// [`maximum_out_of_range`](Self::maximum_out_of_range) reports it.
    pub fn from_data<'a>(spec: &BinSpecification, data: impl Into<PointData<'a>>) -> Result<Self> {
        let data: PointData<'a> = data.into();
        let view = data.view();
        let mut encoder = Self::new(spec.resolve(&view)?)?;
        if spec.provenance() == Provenance::Derived && !spec.precise() {
            let (_, maxs) = minmaxima(&view)?;
            let maxima = Array1::from(maxs);
            if encoder.encode(maxima.view()) == OUT_OF_RANGE {
                warn!(
                    maxima = ?maxima,
                    "maximum data point is not mapped to the last bin; \
                     points at the maximum are skipped (use precise binning to include them)"
                );
                encoder.maximum_out_of_range = true;
            }
        }
        Ok(encoder)
    }

    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    pub fn dimension(&self) -> usize {
        self.counts.len()
    }

    /// Number of bins along each axis.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn precise(&self) -> bool {
        self.grid.precise()
    }

    /// Whether construction found the reference maximum outside the partition.
    pub fn maximum_out_of_range(&self) -> bool {
        self.maximum_out_of_range
    }

    /// 0-based bin index of `x` along `axis` (greatest edge <= x), or `None` outside.
    pub fn axis_index(&self, axis: usize, x: f64) -> Option<usize> {
        let edges = self.grid.axis_edges(axis);
        let k = edges.partition_point(|&e| e <= x);
        if k == 0 || k > self.counts[axis] {
            None
        } else {
            Some(k - 1)
        }
    }

    /// Per-axis 0-based indices of bin `id`.
    pub fn bin_indices(&self, id: i64) -> Result<Vec<usize>> {
        if id < 1 || id as u64 > self.total as u64 {
            return Err(BinningError::InvalidBinId {
                id,
                total: self.total,
            });
        }
        let mut rem = (id - 1) as usize;
        let mut indices = Vec::with_capacity(self.strides.len());
        for &stride in &self.strides {
            indices.push(rem / stride);
            rem %= stride;
        }
        Ok(indices)
    }

    /// Encode every row of `data`.
    pub fn encode_all(&self, data: &ArrayView2<'_, f64>) -> Array1<i64> {
        data.axis_iter(Axis(0)).map(|p| self.encode(p)).collect()
    }

    /// Lower corners of all bins, in identifier order.
    pub fn outcome_space(&self) -> Vec<Array1<f64>> {
        (1..=self.total as i64)
            .filter_map(|id| self.decode(id).ok())
            .collect()
    }
}

impl Encoding for RectangularBinEncoder {
    fn encode(&self, point: ArrayView1<'_, f64>) -> i64 {
        if point.len() != self.dimension() {
            return OUT_OF_RANGE;
        }
        let mut linear = 0usize;
        for (axis, &x) in point.iter().enumerate() {
            match self.axis_index(axis, x) {
                Some(i) => linear += i * self.strides[axis],
                None => return OUT_OF_RANGE,
            }
        }
        linear as i64 + 1
    }

    fn decode(&self, id: i64) -> Result<Array1<f64>> {
        let indices = self.bin_indices(id)?;
        Ok(indices
            .iter()
            .enumerate()
            .map(|(axis, &i)| self.grid.axis_edges(axis)[i])
            .collect())
    }

    fn total_outcomes(&self) -> usize {
        self.total
    }
}
