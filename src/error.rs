// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for partition construction, encoding and invariant-measure estimation.

/// Error type for all fallible operations in the crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinningError {
    /// Returned when a bin count is zero.
    #[error("invalid bin count on axis {axis}: {count} (must be >= 1)")]
    InvalidBinCount {
        /// Axis the count applies to.
        axis: usize,
        /// The invalid count.
        count: usize,
    },

    /// Returned when a bin width is non-finite or non-positive.
    #[error("invalid bin width on axis {axis}: {width} (must be finite and > 0)")]
    InvalidBinWidth {
        /// Axis the width applies to.
        axis: usize,
        /// The invalid width.
        width: f64,
    },

    /// Returned when per-axis edges are malformed.
    #[error("invalid edges on axis {axis}: {reason}")]
    InvalidEdges {
        /// Axis the edges belong to.
        axis: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the data dimensionality disagrees with the partition.
    #[error("dimension mismatch: partition has {expected} axes, data has {got}")]
    DimensionMismatch {
        /// Dimension of the partition.
        expected: usize,
        /// Dimension of the data.
        got: usize,
    },

    /// Returned when there are too few points.
    #[error("insufficient data: got {n} points, need at least {min}")]
    InsufficientData {
        /// Number of points provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when a data-derived partition sees NaN or infinity.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when decoding an identifier outside the partition.
    #[error("invalid bin id {id} (must be in 1..={total})")]
    InvalidBinId {
        /// The invalid identifier.
        id: i64,
        /// Number of bins in the partition.
        total: usize,
    },

    /// Returned when the number of bins does not fit the identifier type.
    #[error("partition has too many bins to index")]
    TooManyBins,

    /// Returned when solver parameters are out of range.
    #[error("invalid solver configuration: {reason}")]
    InvalidSolverConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no point of a trajectory lies inside the partition.
    #[error("no point of the {n} given points falls inside the partition")]
    NoVisitedBins {
        /// Number of points provided.
        n: usize,
    },

    /// Returned when a probability vector is malformed.
    #[error("invalid probabilities: {reason}")]
    InvalidProbabilities {
        /// Description of the problem.
        reason: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BinningError>;
