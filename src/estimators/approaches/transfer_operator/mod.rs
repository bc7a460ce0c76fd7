// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Transfer operator (Ulam–Galerkin) module: transition counting over visited bins,
// the row-stochastic operator and its invariant measure.

pub mod operator;
pub mod solver;
pub mod transfer_operator;
pub mod transitions;

pub use operator::TransferMatrix;
pub use solver::{InvariantMeasure, SolverConfig, invariant_measure};
pub use transfer_operator::{InvariantMeasureEstimate, TransferOperator, TransferOperatorApproximation};
pub use transitions::TransitionInfo;
