// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Rectangular binning module: bin specifications, the point <-> bin-id encoder
// and the histogram (value binning) estimator built on it.

pub mod binning;
pub mod binning_utils;
pub mod encoder;
pub mod value_binning;

pub use binning::{BinGrid, BinRule, BinSpecification, FixedRectangularBinning, Provenance, RectangularBinning};
pub use encoder::{OUT_OF_RANGE, RectangularBinEncoder};
pub use value_binning::ValueBinning;
