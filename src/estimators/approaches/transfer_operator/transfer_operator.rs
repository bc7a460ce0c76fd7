// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Transfer Operator Estimation of Invariant Measures
//!
//! The transfer (Perron–Frobenius) operator describes how a density evolves under a
//! dynamical map. Its Ulam–Galerkin approximation over a rectangular partition is the
//! finite stochastic matrix
//!
//! P_ij = #{t : x_t ∈ B_i, x_{t+1} ∈ B_j} / #{t : x_t ∈ B_i}
//!
//! estimated from consecutive points of an observed trajectory. Its invariant measure
//! (left eigenvector for eigenvalue one) is the discretised stationary distribution.
//!
//! ## Pipeline
//!
//! ```text
//!  trajectory ──▶ encoder ──▶ bin ids ──▶ transitions ──▶ TransferMatrix ──▶ power iteration
//!                    ▲                                                          │
//!                    └──────────────────── decode outcomes ◀────────────────────┘
//! ```
//!
//! Only visited bins enter the matrix. Dangling rows draw from the generator passed to each
//! call, so two calls with identically seeded generators give bit-identical results, while a
//! shared generator advances between calls.

use ndarray::Array1;
use rand::Rng;
use tracing::debug_span;

use crate::error::{BinningError, Result};
use crate::estimators::approaches::binning::binning::BinSpecification;
use crate::estimators::approaches::binning::encoder::RectangularBinEncoder;
use crate::estimators::approaches::common_nd::dataset::{PointData, ensure_dimension};
use crate::estimators::approaches::transfer_operator::operator::TransferMatrix;
use crate::estimators::approaches::transfer_operator::solver::{
    InvariantMeasure, SolverConfig, invariant_measure,
};
use crate::estimators::approaches::transfer_operator::transitions::TransitionInfo;
use crate::estimators::probabilities::Probabilities;
use crate::estimators::traits::Encoding;

/// Transfer-operator estimator of invariant measures over a rectangular partition.
///
/// # Example
///
/// ```
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use ulam_measure::estimators::approaches::binning::RectangularBinning;
/// use ulam_measure::estimators::approaches::transfer_operator::TransferOperator;
///
/// let x = array![[0.1, 0.2], [0.8, 0.3], [0.4, 0.9], [0.2, 0.1], [0.7, 0.6]];
/// let est = TransferOperator::new(RectangularBinning::with_count(2));
/// let mut rng = StdRng::seed_from_u64(1234);
/// let result = est.estimate(&x, &mut rng).unwrap();
/// assert_eq!(result.probabilities().len(), result.outcomes().len());
/// ```
#[derive(Debug, Clone)]
pub struct TransferOperator {
    binning: BinSpecification,
    solver: SolverConfig,
}

impl TransferOperator {
    pub fn new(binning: impl Into<BinSpecification>) -> Self {
        Self {
            binning: binning.into(),
            solver: SolverConfig::new(),
        }
    }

    /// Sets the power-iteration configuration.
    pub fn with_solver_config(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn binning(&self) -> &BinSpecification {
        &self.binning
    }

    pub fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    /// Build the transfer matrix of `trajectory` (rows are consecutive points).
    ///
    /// A data-derived partition is resolved against the trajectory itself.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the trajectory disagrees with the partition (checked before
    /// any encoding), `InsufficientData` for fewer than two points, `NoVisitedBins` if every
    /// point falls outside a fixed partition, and configuration errors of the binning or
    /// solver.
    pub fn approximate<'a, R: Rng + ?Sized>(
        &self,
        trajectory: impl Into<PointData<'a>>,
        rng: &mut R,
    ) -> Result<TransferOperatorApproximation> {
        self.solver.validate()?;
        self.binning.validate()?;
        let data: PointData<'a> = trajectory.into();
        let view = data.view();
        let _span = debug_span!(
            "transfer_operator",
            n_points = view.nrows(),
            dimension = view.ncols()
        )
        .entered();

        if let Some(d) = self.binning.dimension() {
            ensure_dimension(&view, d)?;
        }
        if view.nrows() < 2 {
            return Err(BinningError::InsufficientData {
                n: view.nrows(),
                min: 2,
            });
        }

        let encoder = RectangularBinEncoder::from_data(&self.binning, view.clone())?;
        let transitions = TransitionInfo::from_trajectory(&encoder, view)?;
        let matrix = TransferMatrix::from_transitions(&transitions, rng);
        Ok(TransferOperatorApproximation {
            encoder,
            transitions,
            matrix,
        })
    }

    /// Invariant measure of `trajectory` and the lower corners of its visited bins.
    pub fn estimate<'a, R: Rng + ?Sized>(
        &self,
        trajectory: impl Into<PointData<'a>>,
        rng: &mut R,
    ) -> Result<InvariantMeasureEstimate> {
        self.approximate(trajectory, rng)?
            .invariant_measure(&self.solver)
    }
}

/// A transfer matrix together with the encoder and transitions it was built from.
///
/// Keeping the approximation allows recomputing invariant measures with other solver
/// settings without re-encoding the trajectory.
#[derive(Debug, Clone)]
pub struct TransferOperatorApproximation {
    encoder: RectangularBinEncoder,
    transitions: TransitionInfo,
    matrix: TransferMatrix,
}

impl TransferOperatorApproximation {
    pub fn encoder(&self) -> &RectangularBinEncoder {
        &self.encoder
    }

    pub fn transitions(&self) -> &TransitionInfo {
        &self.transitions
    }

    pub fn matrix(&self) -> &TransferMatrix {
        &self.matrix
    }

    /// Solve for the invariant measure and decode the visited bins.
    pub fn invariant_measure(&self, config: &SolverConfig) -> Result<InvariantMeasureEstimate> {
        let measure = invariant_measure(&self.matrix, config)?;
        let bins = self.transitions.visited_bins().to_vec();
        let outcomes = bins
            .iter()
            .map(|&id| self.encoder.decode(id))
            .collect::<Result<Vec<_>>>()?;
        let probabilities = Probabilities::new(measure.probabilities().clone())?;
        Ok(InvariantMeasureEstimate {
            probabilities,
            outcomes,
            bins,
            measure,
        })
    }
}

/// Invariant measure over the visited bins, aligned with their decoded lower corners.
///
/// All vectors follow the order in which the trajectory first visited each bin.
#[derive(Debug, Clone)]
pub struct InvariantMeasureEstimate {
    probabilities: Probabilities,
    outcomes: Vec<Array1<f64>>,
    bins: Vec<i64>,
    measure: InvariantMeasure,
}

impl InvariantMeasureEstimate {
    pub fn probabilities(&self) -> &Probabilities {
        &self.probabilities
    }

    pub fn outcomes(&self) -> &[Array1<f64>] {
        &self.outcomes
    }

    /// Visited bin ids.
    pub fn bins(&self) -> &[i64] {
        &self.bins
    }

    pub fn converged(&self) -> bool {
        self.measure.converged()
    }

    pub fn iterations(&self) -> usize {
        self.measure.iterations()
    }

    pub fn measure(&self) -> &InvariantMeasure {
        &self.measure
    }

    pub fn into_parts(self) -> (Probabilities, Vec<Array1<f64>>) {
        (self.probabilities, self.outcomes)
    }
}
