use crate::error::Result;
use crate::estimators::approaches::binning::{
    BinSpecification, FixedRectangularBinning, RectangularBinEncoder, RectangularBinning,
    ValueBinning,
};
use crate::estimators::approaches::common_nd::dataset::PointData;
use crate::estimators::approaches::transfer_operator::TransferOperator;

/// Partition-based estimation methods
///
/// This struct provides static methods for creating rectangular partitions and the
/// estimators built on them.
pub struct Partition;

impl Partition {
    /// Creates a data-derived partition with `count` bins along every axis
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bins per axis
    /// * `precise` - Whether the data maximum is guaranteed to fall inside the last bin
    pub fn rectangular(count: usize, precise: bool) -> RectangularBinning {
        RectangularBinning::with_count(count).with_precise(precise)
    }

    /// Creates a fixed partition of `[min, max]^dimension` into `n_bins` bins per axis
    ///
    /// # Errors
    ///
    /// Fails if `n_bins` is zero or `min >= max`.
    pub fn fixed(
        min: f64,
        max: f64,
        n_bins: usize,
        dimension: usize,
        precise: bool,
    ) -> Result<FixedRectangularBinning> {
        Ok(FixedRectangularBinning::from_range(min, max, n_bins, dimension)?.with_precise(precise))
    }

    /// Creates the encoder a specification resolves to for `data`
    pub fn encoder<'a>(
        binning: impl Into<BinSpecification>,
        data: impl Into<PointData<'a>>,
    ) -> Result<RectangularBinEncoder> {
        RectangularBinEncoder::from_data(&binning.into(), data)
    }

    /// Creates a histogram (value binning) probabilities estimator
    pub fn value_binning(binning: impl Into<BinSpecification>) -> ValueBinning {
        ValueBinning::new(binning)
    }

    /// Creates a transfer-operator invariant-measure estimator with default solver settings
    pub fn transfer_operator(binning: impl Into<BinSpecification>) -> TransferOperator {
        TransferOperator::new(binning)
    }
}
