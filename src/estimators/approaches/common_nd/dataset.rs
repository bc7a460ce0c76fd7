// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{BinningError, Result};

/// Borrowed point data accepted by the partition-based estimators.
///
/// Rows are points and columns are axes. A one-dimensional array is treated as a scalar
/// series, i.e. `n` points in one dimension.
#[derive(Debug, Clone)]
pub enum PointData<'a> {
    /// One-dimensional data: each element is a point on the real line
    OneDimensional(ArrayView1<'a, f64>),

    /// Two-dimensional data: rows are points, columns are dimensions
    TwoDimensional(ArrayView2<'a, f64>),
}

impl<'a> From<&'a Array1<f64>> for PointData<'a> {
    fn from(array: &'a Array1<f64>) -> Self {
        PointData::OneDimensional(array.view())
    }
}

impl<'a> From<ArrayView1<'a, f64>> for PointData<'a> {
    fn from(view: ArrayView1<'a, f64>) -> Self {
        PointData::OneDimensional(view)
    }
}

impl<'a> From<&'a Array2<f64>> for PointData<'a> {
    fn from(array: &'a Array2<f64>) -> Self {
        PointData::TwoDimensional(array.view())
    }
}

impl<'a> From<ArrayView2<'a, f64>> for PointData<'a> {
    fn from(view: ArrayView2<'a, f64>) -> Self {
        PointData::TwoDimensional(view)
    }
}

impl<'a> PointData<'a> {
    /// View of the data as a 2D array (points x dimensions).
    pub fn view(&self) -> ArrayView2<'a, f64> {
        match self {
            PointData::OneDimensional(a) => a.clone().insert_axis(Axis(1)),
            PointData::TwoDimensional(a) => a.clone(),
        }
    }

    /// Number of points.
    pub fn n_points(&self) -> usize {
        match self {
            PointData::OneDimensional(a) => a.len(),
            PointData::TwoDimensional(a) => a.nrows(),
        }
    }

    /// Number of axes of every point.
    pub fn dimension(&self) -> usize {
        match self {
            PointData::OneDimensional(_) => 1,
            PointData::TwoDimensional(a) => a.ncols(),
        }
    }
}

/// Fail with `DimensionMismatch` unless the data has `expected` columns.
pub fn ensure_dimension(data: &ArrayView2<'_, f64>, expected: usize) -> Result<()> {
    if data.ncols() != expected {
        return Err(BinningError::DimensionMismatch {
            expected,
            got: data.ncols(),
        });
    }
    Ok(())
}

/// Per-axis minima and maxima of a point set.
///
/// Data-derived partitions need a finite range, so NaN or infinite entries are rejected.
pub fn minmaxima(data: &ArrayView2<'_, f64>) -> Result<(Vec<f64>, Vec<f64>)> {
    if data.nrows() == 0 {
        return Err(BinningError::EmptyData);
    }
    let dim = data.ncols();
    let mut mins = vec![f64::INFINITY; dim];
    let mut maxs = vec![f64::NEG_INFINITY; dim];
    for row in data.axis_iter(Axis(0)) {
        for (j, &v) in row.iter().enumerate() {
            if !v.is_finite() {
                return Err(BinningError::NonFiniteData);
            }
            if v < mins[j] {
                mins[j] = v;
            }
            if v > maxs[j] {
                maxs[j] = v;
            }
        }
    }
    Ok((mins, maxs))
}
