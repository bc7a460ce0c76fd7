// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invariant measure of a transfer matrix by power iteration.
//!
//! Starting from the uniform distribution over visited bins, the iterate is repeatedly
//! left-multiplied by the row-stochastic matrix P:
//!
//! p_{k+1} = (1 - α) p_k P + α p_k
//!
//! until ‖p_{k+1} - p_k‖₁ < tolerance or the iteration cap is reached. The laziness α
//! (default 0) leaves the fixed point unchanged but damps the oscillation of periodic
//! chains. The final iterate is renormalised to sum to one.

use ndarray::Array1;
use tracing::{debug, warn};

use crate::error::{BinningError, Result};
use crate::estimators::approaches::transfer_operator::operator::TransferMatrix;

/// Configuration for the power iteration.
///
/// # Example
///
/// ```
/// use ulam_measure::estimators::approaches::transfer_operator::SolverConfig;
///
/// let config = SolverConfig::new()
///     .with_tolerance(1e-10)
///     .with_max_iterations(5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    tolerance: f64,
    max_iterations: usize,
    laziness: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverConfig {
    /// Defaults: `tolerance = 1e-8`, `max_iterations = 2000`, `laziness = 0.0`.
    pub fn new() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 2000,
            laziness: 0.0,
        }
    }

    /// Sets the L1 convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the laziness α in `[0, 1)`.
    pub fn with_laziness(mut self, laziness: f64) -> Self {
        self.laziness = laziness;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn laziness(&self) -> f64 {
        self.laziness
    }

    /// Checks the tolerance is finite and positive, the cap is at least one and the
    /// laziness lies in `[0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(BinningError::InvalidSolverConfig {
                reason: format!("tolerance must be finite and positive, got {}", self.tolerance),
            });
        }
        if self.max_iterations == 0 {
            return Err(BinningError::InvalidSolverConfig {
                reason: "max_iterations must be at least 1".to_string(),
            });
        }
        if !(0.0..1.0).contains(&self.laziness) {
            return Err(BinningError::InvalidSolverConfig {
                reason: format!("laziness must lie in [0, 1), got {}", self.laziness),
            });
        }
        Ok(())
    }
}

/// Fixed point of the power iteration over visited bins.
#[derive(Debug, Clone, PartialEq)]
pub struct InvariantMeasure {
    probabilities: Array1<f64>,
    converged: bool,
    iterations: usize,
    residual: f64,
}

impl InvariantMeasure {
    /// Probability per visited bin, in the matrix's row order.
    pub fn probabilities(&self) -> &Array1<f64> {
        &self.probabilities
    }

    pub fn into_probabilities(self) -> Array1<f64> {
        self.probabilities
    }

    /// Whether the L1 change fell below the tolerance before the cap.
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// L1 change of the last iteration.
    pub fn residual(&self) -> f64 {
        self.residual
    }
}

/// Power iteration for the invariant measure of `matrix`.
///
/// Non-convergence is not an error: the last iterate is returned with `converged() == false`.
/// A matrix without rows fails with `NoVisitedBins`.
pub fn invariant_measure(matrix: &TransferMatrix, config: &SolverConfig) -> Result<InvariantMeasure> {
    config.validate()?;
    let n = matrix.len();
    if n == 0 {
        return Err(BinningError::NoVisitedBins { n: 0 });
    }

    let alpha = config.laziness();
    let mut p = Array1::from_elem(n, 1.0 / n as f64);
    let mut next = Array1::<f64>::zeros(n);
    let mut residual = f64::INFINITY;
    let mut iterations = 0;
    let mut converged = false;

    for k in 1..=config.max_iterations() {
        matrix.left_multiply_into(&p, &mut next);
        if alpha > 0.0 {
            next.zip_mut_with(&p, |x, &y| *x = (1.0 - alpha) * *x + alpha * y);
        }
        residual = next
            .iter()
            .zip(p.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        std::mem::swap(&mut p, &mut next);
        iterations = k;
        if residual < config.tolerance() {
            converged = true;
            break;
        }
    }

    let total = p.sum();
    p.mapv_inplace(|v| v / total);

    if converged {
        debug!(iterations, residual, n_bins = n, "invariant measure converged");
    } else {
        warn!(
            iterations,
            residual,
            tolerance = config.tolerance(),
            "invariant measure did not converge; returning the last iterate"
        );
    }

    Ok(InvariantMeasure {
        probabilities: p,
        converged,
        iterations,
        residual,
    })
}
