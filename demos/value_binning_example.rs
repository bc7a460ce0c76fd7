use ndarray::array;
use tracing_subscriber::EnvFilter;

use ulam_measure::estimators::ProbabilitiesEstimator;
use ulam_measure::estimators::partition::Partition;

fn main() {
    // Points outside the partition are reported at warn level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ulam_measure=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let data = array![
        [0.0, 0.0],
        [0.2, 0.7],
        [0.4, 0.1],
        [0.9, 0.3],
        [0.5, 0.5],
        [1.0, 1.0]
    ];

    // Precise binning: the maximum (1, 1) falls into the last bin
    let precise = Partition::value_binning(Partition::rectangular(2, true));
    let (probs, outcomes) = precise
        .probabilities_and_outcomes(&data)
        .expect("data is finite and non-empty");
    println!("Precise 2x2 grid:");
    for (corner, p) in outcomes.iter().zip(probs.iter()) {
        println!("  bin at {corner} -> {p:.4}");
    }

    // Fast binning: the maximum lies on the closing edge and is skipped with a warning
    let fast = Partition::value_binning(Partition::rectangular(2, false));
    let probs = fast.probabilities(&data).expect("some points are inside");
    println!("Fast 2x2 grid: {:?}", probs.as_array());

    // Fixed partition of the unit square, dense over all bins
    let fixed = Partition::fixed(0.0, 1.0, 4, 2, true).expect("valid range");
    let est = Partition::value_binning(fixed);
    let dense = est.all_probabilities(&data).expect("some points are inside");
    println!(
        "Fixed 4x4 grid: {} bins, {} unvisited",
        dense.len(),
        est.missing_outcomes(&data).expect("some points are inside")
    );
    println!("{:?}", dense.as_array().to_shape((4, 4)).expect("16 bins"));
}
