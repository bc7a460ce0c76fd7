use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use ulam_measure::estimators::approaches::binning::RectangularBinning;
use ulam_measure::estimators::approaches::transfer_operator::{SolverConfig, TransferOperator};

fn main() {
    // Operator and convergence details at debug level unless RUST_LOG says otherwise
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ulam_measure=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Orbit of the fully chaotic logistic map x -> 4x(1 - x)
    let mut x = 0.1234;
    let orbit: Array1<f64> = (0..50_000)
        .map(|_| {
            let current = x;
            x = 4.0 * x * (1.0 - x);
            current
        })
        .collect();

    let estimator = TransferOperator::new(RectangularBinning::with_count(20))
        .with_solver_config(SolverConfig::new().with_tolerance(1e-10));
    let mut rng = StdRng::seed_from_u64(1234);

    let approx = estimator
        .approximate(&orbit, &mut rng)
        .expect("orbit is one-dimensional and non-empty");
    println!(
        "Visited bins: {} of {}, transitions: {}, dangling rows: {}",
        approx.transitions().n_visited(),
        approx.encoder().counts()[0],
        approx.transitions().n_transitions(),
        approx.matrix().dangling().len()
    );

    let result = approx
        .invariant_measure(estimator.solver_config())
        .expect("solver settings are valid");
    println!(
        "Converged: {} after {} iterations",
        result.converged(),
        result.iterations()
    );

    // Compare against the analytic density 1 / (pi sqrt(x (1 - x)))
    let width = 1.0 / 20.0;
    let mut rows: Vec<(f64, f64)> = result
        .outcomes()
        .iter()
        .zip(result.probabilities().iter())
        .map(|(corner, &p)| (corner[0], p))
        .collect();
    rows.sort_by(|a, b| a.0.total_cmp(&b.0));

    println!("{:>8} {:>12} {:>12}", "lower", "estimated", "analytic");
    for (lo, p) in rows {
        let hi = (lo + width).min(1.0);
        let lo = lo.max(0.0);
        let analytic = 2.0 / std::f64::consts::PI * (hi.sqrt().asin() - lo.sqrt().asin());
        println!("{lo:>8.3} {p:>12.5} {analytic:>12.5}");
    }
}
