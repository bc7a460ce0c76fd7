// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView2};
use tracing::warn;

use crate::error::{BinningError, Result};
use crate::estimators::approaches::binning::binning::BinSpecification;
use crate::estimators::approaches::binning::binning_utils::count_bin_frequencies;
use crate::estimators::approaches::binning::encoder::RectangularBinEncoder;
use crate::estimators::approaches::common_nd::dataset::{PointData, ensure_dimension};
use crate::estimators::probabilities::Probabilities;
use crate::estimators::traits::{Encoding, ProbabilitiesEstimator};

/// Histogram probabilities over a rectangular partition.
///
/// Each point is encoded to its bin and the probability of a bin is its relative frequency
/// p_i = n_i / N among the points that fall inside the partition. Outcomes are the lower
/// corners of the visited bins, ordered by ascending bin identifier.
///
/// Points outside a fixed partition (or at the maximum in fast mode) are skipped and
/// reported once per call.
#[derive(Debug, Clone)]
pub struct ValueBinning {
    binning: BinSpecification,
}

impl ValueBinning {
    pub fn new(binning: impl Into<BinSpecification>) -> Self {
        Self {
            binning: binning.into(),
        }
    }

    pub fn binning(&self) -> &BinSpecification {
        &self.binning
    }

    /// The encoder this estimator uses for `data`.
    pub fn encoder<'a>(&self, data: impl Into<PointData<'a>>) -> Result<RectangularBinEncoder> {
        let data: PointData<'a> = data.into();
        self.checked_encoder(&data.view())
    }

    fn checked_encoder(&self, view: &ArrayView2<'_, f64>) -> Result<RectangularBinEncoder> {
        if let Some(d) = self.binning.dimension() {
            ensure_dimension(view, d)?;
        }
        if view.nrows() == 0 {
            return Err(BinningError::EmptyData);
        }
        RectangularBinEncoder::from_data(&self.binning, view.clone())
    }

    /// Visited bin ids (ascending) and their counts.
    fn bin_counts(
        &self,
        encoder: &RectangularBinEncoder,
        view: &ArrayView2<'_, f64>,
    ) -> Result<(Vec<i64>, Vec<usize>)> {
        let codes = encoder.encode_all(view);
        let freqs = match codes.as_slice() {
            Some(slice) => count_bin_frequencies(slice),
            None => count_bin_frequencies(&codes.to_vec()),
        };
        let mut ids: Vec<i64> = freqs.keys().copied().collect();
        ids.sort_unstable();
        let counts: Vec<usize> = ids.iter().map(|id| freqs[id]).collect();

        let inside: usize = counts.iter().sum();
        let skipped = view.nrows() - inside;
        if skipped > 0 {
            warn!(
                skipped,
                n_points = view.nrows(),
                "points outside the partition were skipped"
            );
        }
        if ids.is_empty() {
            return Err(BinningError::NoVisitedBins { n: view.nrows() });
        }
        Ok((ids, counts))
    }

    /// Probabilities over the full outcome space, indexed by `bin id - 1`.
    ///
    /// Unvisited bins get probability zero, so the length is the total number of bins.
    pub fn all_probabilities<'a>(&self, data: impl Into<PointData<'a>>) -> Result<Probabilities> {
        let data: PointData<'a> = data.into();
        let view = data.view();
        let encoder = self.checked_encoder(&view)?;
        let (ids, counts) = self.bin_counts(&encoder, &view)?;
        let mut dense = Array1::<f64>::zeros(encoder.total_outcomes());
        for (id, c) in ids.iter().zip(counts.iter()) {
            dense[(*id - 1) as usize] = *c as f64;
        }
        Probabilities::new(dense)
    }

    /// Number of bins of the partition that no point visits.
    pub fn missing_outcomes<'a>(&self, data: impl Into<PointData<'a>>) -> Result<usize> {
        let data: PointData<'a> = data.into();
        let view = data.view();
        let encoder = self.checked_encoder(&view)?;
        let (ids, _) = self.bin_counts(&encoder, &view)?;
        Ok(encoder.total_outcomes() - ids.len())
    }

    /// Number of bins of the partition resolved for `data`.
    pub fn total_outcomes<'a>(&self, data: impl Into<PointData<'a>>) -> Result<usize> {
        Ok(self.encoder(data)?.total_outcomes())
    }

    /// Lower corners of every bin of the partition resolved for `data`.
    pub fn outcome_space<'a>(&self, data: impl Into<PointData<'a>>) -> Result<Vec<Array1<f64>>> {
        Ok(self.encoder(data)?.outcome_space())
    }
}

impl ProbabilitiesEstimator for ValueBinning {
    fn probabilities_and_outcomes<'a>(
        &self,
        data: impl Into<PointData<'a>>,
    ) -> Result<(Probabilities, Vec<Array1<f64>>)> {
        let data: PointData<'a> = data.into();
        let view = data.view();
        let encoder = self.checked_encoder(&view)?;
        let (ids, counts) = self.bin_counts(&encoder, &view)?;
        let outcomes = ids
            .iter()
            .map(|&id| encoder.decode(id))
            .collect::<Result<Vec<_>>>()?;
        Ok((Probabilities::from_counts(&counts)?, outcomes))
    }
}
