// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

// Common N-D point handling shared by the partition-based estimators (binning, transfer operator)

pub mod dataset;
