// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

use ulam_measure::estimators::ProbabilitiesEstimator;
use ulam_measure::estimators::approaches::binning::{FixedRectangularBinning, RectangularBinning};
use ulam_measure::estimators::approaches::transfer_operator::TransferOperator;
use ulam_measure::estimators::partition::Partition;

use crate::test_helpers::{generate_uniform_nd_data, logistic_orbit};

#[test]
fn logistic_map_measure_piles_up_at_the_edges() {
    // Invariant density of the fully chaotic logistic map is 1 / (pi sqrt(x (1 - x))).
    let x = logistic_orbit(20_000, 4.0, 0.1234);
    let mut rng = StdRng::seed_from_u64(42);
    let result = TransferOperator::new(RectangularBinning::with_count(10))
        .estimate(&x, &mut rng)
        .unwrap();
    assert!(result.converged());
    assert_eq!(result.bins().len(), 10);

    let prob_of = |id: i64| {
        let k = result.bins().iter().position(|&b| b == id).unwrap();
        result.probabilities()[k]
    };
    assert!(prob_of(1) > 2.0 * prob_of(5));
    assert!(prob_of(10) > 2.0 * prob_of(6));
    // Symmetric about 1/2.
    assert_abs_diff_eq!(prob_of(1), prob_of(10), epsilon = 0.02);
}

#[test]
fn measure_agrees_with_visit_frequencies() {
    let x = logistic_orbit(20_000, 4.0, 0.1234);
    let binning = RectangularBinning::with_count(10);

    let (freqs, _) = Partition::value_binning(binning.clone())
        .probabilities_and_outcomes(&x)
        .unwrap();
    let hist = Partition::value_binning(binning.clone());
    let encoder = hist.encoder(&x).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let result = TransferOperator::new(binning)
        .estimate(&x, &mut rng)
        .unwrap();

    // Value-binning outcomes are in ascending id order, operator bins in first-visit order.
    let mut visited = result.bins().to_vec();
    visited.sort_unstable();
    assert_eq!(visited.len(), freqs.len());
    for (k, &id) in result.bins().iter().enumerate() {
        let rank = visited.iter().position(|&b| b == id).unwrap();
        assert_abs_diff_eq!(result.probabilities()[k], freqs[rank], epsilon = 1e-3);
    }
    assert_eq!(encoder.counts(), &[10]);
}

#[test]
fn iid_points_give_near_uniform_measure() {
    let x = generate_uniform_nd_data(20_000, 2, 11);
    let spec = FixedRectangularBinning::from_range(0.0, 1.0, 4, 2).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let result = TransferOperator::new(spec).estimate(&x, &mut rng).unwrap();
    assert!(result.converged());
    assert_eq!(result.bins().len(), 16);
    for p in result.probabilities().iter() {
        assert_abs_diff_eq!(*p, 1.0 / 16.0, epsilon = 0.01);
    }
}

#[test]
fn outcomes_are_lower_corners_of_visited_bins() {
    let x = ndarray::array![[0.1, 0.1], [0.6, 0.1], [0.6, 0.6], [0.1, 0.1]];
    let spec = FixedRectangularBinning::from_range(0.0, 1.0, 2, 2).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let (probs, outcomes) = TransferOperator::new(spec)
        .estimate(&x, &mut rng)
        .unwrap()
        .into_parts();
    // Cycle 1 -> 3 -> 4 -> 1 visits each bin equally often.
    assert_eq!(
        outcomes,
        vec![
            ndarray::array![0.0, 0.0],
            ndarray::array![0.5, 0.0],
            ndarray::array![0.5, 0.5]
        ]
    );
    for p in probs.iter() {
        assert_abs_diff_eq!(*p, 1.0 / 3.0, epsilon = 1e-9);
    }
}

#[test]
fn constant_trajectory_concentrates_on_one_bin() {
    let x = ndarray::array![[0.6, 0.6], [0.6, 0.6], [0.6, 0.6]];
    let mut rng = StdRng::seed_from_u64(0);
    let result = Partition::transfer_operator(Partition::rectangular(10, true))
        .estimate(&x, &mut rng)
        .unwrap();
    assert!(result.converged());
    assert_eq!(result.bins(), &[1]);
    assert_abs_diff_eq!(result.probabilities()[0], 1.0, epsilon = 1e-12);
    assert_eq!(result.outcomes(), &[ndarray::array![0.6, 0.6]]);
}

#[test]
fn fixed_point_orbit_of_the_logistic_map() {
    // r = 2 keeps x = 1/2 fixed, so the derived axis has zero extent.
    let x = logistic_orbit(50, 2.0, 0.5);
    let mut rng = StdRng::seed_from_u64(0);
    let result = TransferOperator::new(RectangularBinning::with_count(5))
        .estimate(&x, &mut rng)
        .unwrap();
    assert_eq!(result.bins().len(), 1);
    assert_abs_diff_eq!(result.probabilities()[0], 1.0, epsilon = 1e-12);
}
