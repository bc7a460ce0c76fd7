pub mod approaches;
pub mod partition;
pub mod probabilities;
pub mod traits;

pub use probabilities::Probabilities;
pub use traits::{Encoding, ProbabilitiesEstimator};
