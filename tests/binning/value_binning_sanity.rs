// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use ndarray::{Array1, array};
use rstest::*;

use ulam_measure::BinningError;
use ulam_measure::estimators::{Encoding, ProbabilitiesEstimator};
use ulam_measure::estimators::approaches::binning::{
    FixedRectangularBinning, RectangularBinning, ValueBinning,
};
use ulam_measure::estimators::partition::Partition;

use crate::test_helpers::{generate_gaussian_data, generate_uniform_nd_data};

#[test]
fn precise_fixed_grid_keeps_the_upper_edge() {
    let x = array![0.0, 0.1, 0.2, 0.9, 1.0];
    let spec = FixedRectangularBinning::from_range(0.0, 1.0, 2, 1).unwrap();
    let (probs, outcomes) = ValueBinning::new(spec)
        .probabilities_and_outcomes(&x)
        .unwrap();
    assert_eq!(probs.len(), 2);
    assert_abs_diff_eq!(probs[0], 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(probs[1], 0.4, epsilon = 1e-12);
    assert_eq!(outcomes, vec![array![0.0], array![0.5]]);
}

#[test]
fn fast_fixed_grid_skips_the_upper_edge() {
    let x = array![0.0, 0.1, 0.2, 0.9, 1.0];
    let spec = Partition::fixed(0.0, 1.0, 2, 1, false).unwrap();
    let probs = Partition::value_binning(spec).probabilities(&x).unwrap();
    assert_abs_diff_eq!(probs[0], 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(probs[1], 0.25, epsilon = 1e-12);
}

#[test]
fn dense_probabilities_cover_every_bin() {
    let x = array![[0.1, 0.1], [0.2, 0.3], [0.9, 0.9]];
    let est = ValueBinning::new(FixedRectangularBinning::from_range(0.0, 1.0, 2, 2).unwrap());
    let dense = est.all_probabilities(&x).unwrap();
    assert_eq!(dense.len(), 4);
    let expected = array![2.0 / 3.0, 0.0, 0.0, 1.0 / 3.0];
    for (a, b) in dense.iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
    assert_eq!(est.missing_outcomes(&x).unwrap(), 2);
    assert_eq!(est.total_outcomes(&x).unwrap(), 4);
}

#[rstest]
#[case(1, 8)]
#[case(2, 4)]
#[case(3, 3)]
fn probabilities_are_normalised_and_ordered(#[case] dims: usize, #[case] count: usize) {
    let data = generate_gaussian_data(500, dims, 0.0, 1.0, 17);
    let est = Partition::value_binning(Partition::rectangular(count, true));
    let (probs, outcomes) = est.probabilities_and_outcomes(&data).unwrap();

    assert_abs_diff_eq!(probs.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert!(probs.iter().all(|&p| p > 0.0));
    assert_eq!(probs.len(), outcomes.len());

    // Outcomes follow ascending bin id.
    let enc = est.encoder(&data).unwrap();
    let ids: Vec<i64> = outcomes.iter().map(|o| enc.encode(o.view())).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    // Dense and sparse views agree.
    let dense = est.all_probabilities(&data).unwrap();
    for (p, id) in probs.iter().zip(ids.iter()) {
        assert_abs_diff_eq!(dense[(*id - 1) as usize], *p, epsilon = 1e-12);
    }
    assert_eq!(
        est.missing_outcomes(&data).unwrap(),
        enc.total_outcomes() - probs.len()
    );
}

#[test]
fn one_dimensional_input_is_a_column() {
    let x: Array1<f64> = array![0.05, 0.3, 0.35, 0.8];
    let column = x.clone().insert_axis(ndarray::Axis(1));
    let est = ValueBinning::new(RectangularBinning::with_count(4));
    assert_eq!(est.probabilities(&x).unwrap(), est.probabilities(&column).unwrap());
}

#[test]
fn outcome_space_matches_total() {
    let data = generate_uniform_nd_data(50, 2, 9);
    let est = ValueBinning::new(RectangularBinning::with_counts(vec![3, 2]));
    let space = est.outcome_space(&data).unwrap();
    assert_eq!(space.len(), 6);
    assert_eq!(space.len(), est.total_outcomes(&data).unwrap());
}

#[test]
fn everything_outside_a_fixed_grid_is_an_error() {
    let x = array![[5.0, 5.0], [6.0, -1.0]];
    let est = ValueBinning::new(FixedRectangularBinning::from_range(0.0, 1.0, 4, 2).unwrap());
    assert_eq!(
        est.probabilities(&x).unwrap_err(),
        BinningError::NoVisitedBins { n: 2 }
    );
}

#[test]
fn fixed_grid_dimension_is_enforced() {
    let x = array![[0.1, 0.2, 0.3]];
    let est = ValueBinning::new(FixedRectangularBinning::from_range(0.0, 1.0, 4, 2).unwrap());
    assert_eq!(
        est.probabilities(&x).unwrap_err(),
        BinningError::DimensionMismatch { expected: 2, got: 3 }
    );
}

#[test]
fn empty_input_is_rejected() {
    let x = ndarray::Array2::<f64>::zeros((0, 2));
    let est = ValueBinning::new(FixedRectangularBinning::from_range(0.0, 1.0, 4, 2).unwrap());
    assert_eq!(est.probabilities(&x).unwrap_err(), BinningError::EmptyData);
}
