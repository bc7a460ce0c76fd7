// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use ndarray::array;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ulam_measure::BinningError;
use ulam_measure::estimators::approaches::binning::RectangularBinning;
use ulam_measure::estimators::approaches::transfer_operator::{
    SolverConfig, TransferMatrix, TransferOperator, TransitionInfo, invariant_measure,
};

fn matrix_of(ids: ndarray::Array1<i64>) -> TransferMatrix {
    let info = TransitionInfo::from_bin_ids(ids).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    TransferMatrix::from_transitions(&info, &mut rng)
}

#[test]
fn periodic_chain_needs_laziness() {
    // 1 -> 2 -> 3 -> 2 -> 1 ...: period two, stationary distribution [1/4, 1/2, 1/4]
    let m = matrix_of(array![1, 2, 3, 2, 1, 2, 3, 2, 1]);

    let plain = invariant_measure(&m, &SolverConfig::new()).unwrap();
    assert!(!plain.converged());
    assert_eq!(plain.iterations(), SolverConfig::new().max_iterations());

    let lazy = invariant_measure(&m, &SolverConfig::new().with_laziness(0.5)).unwrap();
    assert!(lazy.converged());
    let p = lazy.probabilities();
    assert_abs_diff_eq!(p[0], 0.25, epsilon = 1e-7);
    assert_abs_diff_eq!(p[1], 0.5, epsilon = 1e-7);
    assert_abs_diff_eq!(p[2], 0.25, epsilon = 1e-7);
}

#[test]
fn iteration_cap_reports_non_convergence() {
    let m = matrix_of(array![1, 1, 2, 1, 1, 2, 1]);
    let config = SolverConfig::new().with_max_iterations(1);
    let result = invariant_measure(&m, &config).unwrap();
    assert!(!result.converged());
    assert_eq!(result.iterations(), 1);
    assert!(result.residual() > config.tolerance());
    // The last iterate is still a probability vector.
    assert_abs_diff_eq!(result.probabilities().sum(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.probabilities()[0], 0.75, epsilon = 1e-12);
}

#[test]
fn converged_result_is_a_fixed_point() {
    let m = matrix_of(array![1, 2, 2, 3, 1, 3, 3, 2, 1, 1, 3, 2, 3, 1]);
    let result = invariant_measure(&m, &SolverConfig::new().with_tolerance(1e-12)).unwrap();
    assert!(result.converged());
    assert!(result.residual() < 1e-12);

    let p = result.probabilities();
    let mut next = ndarray::Array1::zeros(p.len());
    m.left_multiply_into(p, &mut next);
    for (a, b) in next.iter().zip(p.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-10);
    }
}

#[test]
fn invalid_solver_settings_are_rejected_up_front() {
    for config in [
        SolverConfig::new().with_tolerance(-1.0),
        SolverConfig::new().with_tolerance(f64::NAN),
        SolverConfig::new().with_max_iterations(0),
        SolverConfig::new().with_laziness(-0.1),
        SolverConfig::new().with_laziness(1.0),
    ] {
        assert!(matches!(
            config.validate(),
            Err(BinningError::InvalidSolverConfig { .. })
        ));
        let est = TransferOperator::new(RectangularBinning::with_count(2))
            .with_solver_config(config);
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            est.estimate(&array![[0.1], [0.9], [0.4]], &mut rng),
            Err(BinningError::InvalidSolverConfig { .. })
        ));
    }
}

#[test]
fn solver_settings_can_be_swapped_without_re_encoding() {
    let x = array![[0.1], [0.6], [0.1], [0.6], [0.1], [0.6]];
    let mut rng = StdRng::seed_from_u64(8);
    let approx = TransferOperator::new(RectangularBinning::with_count(2))
        .approximate(&x, &mut rng)
        .unwrap();
    let stuck = approx.invariant_measure(&SolverConfig::new()).unwrap();
    // Uniform start is already stationary for the swap chain.
    assert!(stuck.converged());
    let lazy = approx
        .invariant_measure(&SolverConfig::new().with_laziness(0.3))
        .unwrap();
    assert!(lazy.converged());
    assert_abs_diff_eq!(lazy.probabilities()[0], 0.5, epsilon = 1e-9);
}
