pub mod binning;
pub mod common_nd;
pub mod transfer_operator;

// Unified re-exports for the estimators so tests and users can import
// ulam_measure::estimators::approaches::* ergonomically.
pub use binning::{FixedRectangularBinning, RectangularBinning, ValueBinning};
pub use common_nd::dataset::PointData;
pub use transfer_operator::{SolverConfig, TransferOperator};
