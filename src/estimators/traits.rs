// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, ArrayView1};

use crate::error::Result;
use crate::estimators::approaches::common_nd::dataset::PointData;
use crate::estimators::probabilities::Probabilities;

/// Bijection between points and integer outcome identifiers.
pub trait Encoding {
    /// Identifier of the bin containing `point`, or the out-of-range sentinel.
    fn encode(&self, point: ArrayView1<'_, f64>) -> i64;

    /// Representative point of outcome `id`.
    fn decode(&self, id: i64) -> Result<Array1<f64>>;

    /// Number of outcomes the encoding can produce.
    fn total_outcomes(&self) -> usize;
}

/// Interface for estimators that turn a point set into a probability vector over outcomes.
///
/// The probabilities and outcomes are aligned by position. External entropy layers consume
/// the [`Probabilities`] alone.
pub trait ProbabilitiesEstimator {
    /// Compute the probabilities and the matching outcome coordinates.
    fn probabilities_and_outcomes<'a>(
        &self,
        data: impl Into<PointData<'a>>,
    ) -> Result<(Probabilities, Vec<Array1<f64>>)>;

    /// Compute the probabilities only.
    fn probabilities<'a>(&self, data: impl Into<PointData<'a>>) -> Result<Probabilities> {
        self.probabilities_and_outcomes(data).map(|(p, _)| p)
    }
}
