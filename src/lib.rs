// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # ulam-measure
//!
//! Rectangular space partitioning, histogram probabilities and transfer-operator
//! (Ulam–Galerkin) invariant measures for finite samples of continuous state spaces.
//!
//! ## Quick Start
//!
//! ```rust
//! use ulam_measure::estimators::partition::Partition;
//! use ulam_measure::estimators::ProbabilitiesEstimator;
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let x = array![[0.1, 0.2], [0.8, 0.3], [0.4, 0.9], [0.2, 0.1], [0.7, 0.6], [0.3, 0.4]];
//!
//! // Histogram probabilities over a 3x3 grid derived from the data range
//! let (probs, outcomes) = Partition::value_binning(Partition::rectangular(3, true))
//!     .probabilities_and_outcomes(&x)
//!     .unwrap();
//! assert_eq!(probs.len(), outcomes.len());
//!
//! // Invariant measure of the transfer operator over the same grid
//! let mut rng = StdRng::seed_from_u64(42);
//! let measure = Partition::transfer_operator(Partition::rectangular(3, true))
//!     .estimate(&x, &mut rng)
//!     .unwrap();
//! assert_eq!(measure.probabilities().len(), measure.bins().len());
//! ```
//!
//! ## Estimation Approaches
//!
//! ### Rectangular Binning
//! Axis-aligned bins either derived from the data range (bin count or width per axis) or
//! fixed a priori by explicit edges. Points map to 1-based linear bin ids (row-major) and
//! ids map back to the lower corner of their bin. In precise mode the data maximum always
//! falls into the last bin; fast mode skips that margin and warns when the maximum is lost.
//!
//! ### Value Binning
//! Relative frequencies of the visited bins, optionally over the full outcome space.
//!
//! ### Transfer Operator
//! Transition counts between consecutive trajectory points, restricted to visited bins,
//! normalised to a row-stochastic matrix. Dangling rows are resolved with random restarts
//! drawn from a caller-supplied generator; the invariant measure follows by power iteration.
//!
//! ## Architecture
//!
//! 1. **Public API Layer**: Factory type (`Partition`) and the `ProbabilitiesEstimator` trait
//! 2. **Estimation Approaches**: `binning` and `transfer_operator`
//! 3. **Core Infrastructure**: Shared traits, point handling, errors
//!
//! ## Diagnostics
//!
//! The crate logs through `tracing` and never installs a subscriber. Skipped points and
//! imprecise maxima are reported at `WARN`, operator and convergence details at `DEBUG`.

pub mod error;
pub mod estimators;

pub use error::{BinningError, Result};
