// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Rectangular bin specifications
//!
//! A D-dimensional space is partitioned into axis-aligned rectangular bins either
//! from the range of a reference dataset ([`RectangularBinning`]) or from explicit,
//! data-independent edges ([`FixedRectangularBinning`]). Both resolve to a [`BinGrid`],
//! the per-axis edge vectors used by the encoder.
//!
//! ## Precision
//!
//! With `precise = true` (the default) the upper edge of every axis is moved two
//! representable floats past the nominal maximum, so that the maximum itself always falls
//! into the last bin. With `precise = false` the edges are taken as computed; a point at the
//! nominal maximum then usually lies on the closing edge and falls outside the partition.

use ndarray::ArrayView2;

use crate::error::{BinningError, Result};
use crate::estimators::approaches::binning::binning_utils::{next_float, row_major_strides};
use crate::estimators::approaches::common_nd::dataset::{ensure_dimension, minmaxima};

/// Number of representable floats the upper edge is moved past the maximum in precise mode.
const N_EPS: usize = 2;

/// How a data-derived partition divides each axis.
#[derive(Debug, Clone, PartialEq)]
pub enum BinRule {
    /// The same number of bins on every axis.
    Count(usize),
    /// The same bin width on every axis.
    Width(f64),
    /// One bin count per axis.
    Counts(Vec<usize>),
    /// One bin width per axis.
    Widths(Vec<f64>),
}

/// Whether a grid was derived from data or given a priori.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Derived,
    Fixed,
}

/// Resolved per-axis bin edges.
///
/// Two grids are equal iff their edge sequences are identical, regardless of the rule
/// (count, width or explicit edges) that produced them.
#[derive(Debug, Clone)]
pub struct BinGrid {
    edges: Vec<Vec<f64>>,
    precise: bool,
    provenance: Provenance,
}

impl PartialEq for BinGrid {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl BinGrid {
    pub(crate) fn new(edges: Vec<Vec<f64>>, precise: bool, provenance: Provenance) -> Result<Self> {
        if edges.is_empty() {
            return Err(BinningError::InvalidEdges {
                axis: 0,
                reason: "partition needs at least one axis".to_string(),
            });
        }
        for (axis, e) in edges.iter().enumerate() {
            validate_edges(axis, e)?;
        }
        Ok(Self {
            edges,
            precise,
            provenance,
        })
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.edges.len()
    }

    /// Edges of all axes; axis `i` has `counts()[i] + 1` strictly increasing entries.
    pub fn edges(&self) -> &[Vec<f64>] {
        &self.edges
    }

    pub fn axis_edges(&self, axis: usize) -> &[f64] {
        &self.edges[axis]
    }

    /// Number of bins along each axis.
    pub fn counts(&self) -> Vec<usize> {
        self.edges.iter().map(|e| e.len() - 1).collect()
    }

    pub fn precise(&self) -> bool {
        self.precise
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}

fn validate_edges(axis: usize, edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(BinningError::InvalidEdges {
            axis,
            reason: format!("need at least 2 edges, got {}", edges.len()),
        });
    }
    if let Some(v) = edges.iter().find(|v| !v.is_finite()) {
        return Err(BinningError::InvalidEdges {
            axis,
            reason: format!("edge {v} is not finite"),
        });
    }
    for (k, w) in edges.windows(2).enumerate() {
        if w[1] <= w[0] {
            return Err(BinningError::InvalidEdges {
                axis,
                reason: format!(
                    "edges must be strictly increasing, but edge {} ({}) <= edge {} ({})",
                    k + 1,
                    w[1],
                    k,
                    w[0]
                ),
            });
        }
    }
    Ok(())
}

fn validate_count(axis: usize, count: usize) -> Result<()> {
    if count == 0 {
        return Err(BinningError::InvalidBinCount { axis, count });
    }
    Ok(())
}

fn validate_width(axis: usize, width: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(BinningError::InvalidBinWidth { axis, width });
    }
    Ok(())
}

/// Regularly spaced edges `origin + k * width` for `k = 0..=count`.
///
/// Fails with `TooManyBins` instead of aborting when the edge vector cannot be allocated.
fn regular_edges(origin: f64, width: f64, count: usize) -> Result<Vec<f64>> {
    let len = count.checked_add(1).ok_or(BinningError::TooManyBins)?;
    let mut edges = Vec::new();
    edges
        .try_reserve_exact(len)
        .map_err(|_| BinningError::TooManyBins)?;
    edges.extend((0..=count).map(|k| origin + (k as f64) * width));
    Ok(edges)
}

fn strictly_increasing(edges: &[f64]) -> bool {
    edges.windows(2).all(|w| w[0] < w[1])
}

/// Bin width for an axis whose range is too narrow to hold distinct edges: four units of
/// float resolution at the magnitude of the data, and never below machine epsilon.
fn degenerate_width(lo: f64, max: f64) -> f64 {
    4.0 * f64::EPSILON.max(lo.abs().max(max.abs()) * f64::EPSILON)
}

/// Rectangular partition whose per-axis range is taken from a reference dataset.
///
/// # Example
///
/// ```
/// use ulam_measure::estimators::approaches::binning::RectangularBinning;
///
/// let binning = RectangularBinning::with_count(10).with_precise(false);
/// assert!(binning.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RectangularBinning {
    rule: BinRule,
    precise: bool,
}

impl RectangularBinning {
    pub fn new(rule: BinRule) -> Self {
        Self {
            rule,
            precise: true,
        }
    }

    /// `count` bins along every axis.
    pub fn with_count(count: usize) -> Self {
        Self::new(BinRule::Count(count))
    }

    /// Bins of side `width` along every axis.
    pub fn with_width(width: f64) -> Self {
        Self::new(BinRule::Width(width))
    }

    pub fn with_counts(counts: Vec<usize>) -> Self {
        Self::new(BinRule::Counts(counts))
    }

    pub fn with_widths(widths: Vec<f64>) -> Self {
        Self::new(BinRule::Widths(widths))
    }

    /// Sets the precision mode (see the module documentation).
    pub fn with_precise(mut self, precise: bool) -> Self {
        self.precise = precise;
        self
    }

    pub fn rule(&self) -> &BinRule {
        &self.rule
    }

    pub fn precise(&self) -> bool {
        self.precise
    }

    /// Number of axes fixed by a per-axis rule, `None` for scalar rules.
    pub fn dimension(&self) -> Option<usize> {
        match &self.rule {
            BinRule::Count(_) | BinRule::Width(_) => None,
            BinRule::Counts(c) => Some(c.len()),
            BinRule::Widths(w) => Some(w.len()),
        }
    }

    /// Checks counts are >= 1 and widths are finite and positive.
    pub fn validate(&self) -> Result<()> {
        match &self.rule {
            BinRule::Count(c) => validate_count(0, *c),
            BinRule::Width(w) => validate_width(0, *w),
            BinRule::Counts(c) => {
                if c.is_empty() {
                    return Err(BinningError::InvalidEdges {
                        axis: 0,
                        reason: "per-axis counts are empty".to_string(),
                    });
                }
                c.iter()
                    .enumerate()
                    .try_for_each(|(axis, &count)| validate_count(axis, count))
            }
            BinRule::Widths(w) => {
                if w.is_empty() {
                    return Err(BinningError::InvalidEdges {
                        axis: 0,
                        reason: "per-axis widths are empty".to_string(),
                    });
                }
                w.iter()
                    .enumerate()
                    .try_for_each(|(axis, &width)| validate_width(axis, width))
            }
        }
    }

    /// Resolve the partition against a reference dataset (rows are points).
    ///
    /// In precise mode, an axis under a count rule whose range is too narrow for distinct
    /// edges (a constant coordinate, say) is widened to a few units of float resolution
    /// per bin, so the data still falls into the first bins.
    pub fn resolve(&self, data: &ArrayView2<'_, f64>) -> Result<BinGrid> {
        self.validate()?;
        if let Some(d) = self.dimension() {
            ensure_dimension(data, d)?;
        }
        let (mins, maxs) = minmaxima(data)?;

        // Counts first, so oversized partitions fail before any edge is allocated.
        let mut axes = Vec::with_capacity(mins.len());
        for (axis, (&lo, &max)) in mins.iter().zip(maxs.iter()).enumerate() {
            let hi = if self.precise { next_float(max, N_EPS) } else { max };
            let (width, count, by_count) = match &self.rule {
                BinRule::Count(c) => ((hi - lo) / *c as f64, *c, true),
                BinRule::Counts(c) => ((hi - lo) / c[axis] as f64, c[axis], true),
                BinRule::Width(w) => (*w, count_for_width(hi - lo, *w)?, false),
                BinRule::Widths(w) => (w[axis], count_for_width(hi - lo, w[axis])?, false),
            };
            axes.push((lo, max, width, count, by_count));
        }
        let counts: Vec<usize> = axes.iter().map(|a| a.3).collect();
        row_major_strides(&counts)?;

        let mut edges = Vec::with_capacity(axes.len());
        for (axis, (lo, max, width, count, by_count)) in axes.into_iter().enumerate() {
            let mut axis_edges = regular_edges(lo, width, count)?;
            if self.precise && by_count && !strictly_increasing(&axis_edges) {
                axis_edges = regular_edges(lo, degenerate_width(lo, max), count)?;
            }
            if self.precise && axis_edges[count] <= max {
                axis_edges[count] = next_float(max, N_EPS);
            }
            validate_edges(axis, &axis_edges).map_err(|_| BinningError::InvalidEdges {
                axis,
                reason: format!(
                    "range [{lo}, {max}] cannot be split into {count} bins of width {width}"
                ),
            })?;
            edges.push(axis_edges);
        }
        BinGrid::new(edges, self.precise, Provenance::Derived)
    }
}

fn count_for_width(range: f64, width: f64) -> Result<usize> {
    let ratio = (range / width).ceil();
    if !ratio.is_finite() || ratio >= i64::MAX as f64 {
        return Err(BinningError::TooManyBins);
    }
    Ok((ratio as usize).max(1))
}

/// Rectangular partition with explicit, data-independent edges.
///
/// Points outside the edges encode to the out-of-range sentinel in both precision modes.
/// Equality compares the edge sequences only.
#[derive(Debug, Clone)]
pub struct FixedRectangularBinning {
    edges: Vec<Vec<f64>>,
    precise: bool,
}

impl PartialEq for FixedRectangularBinning {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl FixedRectangularBinning {
    /// Build from explicit per-axis edges.
    pub fn new(edges: Vec<Vec<f64>>) -> Result<Self> {
        // Validate eagerly so malformed edges fail at construction.
        BinGrid::new(edges.clone(), true, Provenance::Fixed)?;
        Ok(Self {
            edges,
            precise: true,
        })
    }

    /// `n_bins` equally sized bins spanning `[min, max]` on each of `dimension` axes.
    pub fn from_range(min: f64, max: f64, n_bins: usize, dimension: usize) -> Result<Self> {
        validate_count(0, n_bins)?;
        let step = (max - min) / n_bins as f64;
        let mut axis = regular_edges(min, step, n_bins)?;
        axis[n_bins] = max;
        Self::new(vec![axis; dimension])
    }

    /// Per-axis `count` bins of side `width` starting at `origin`.
    pub fn from_origin_width(origins: &[f64], widths: &[f64], counts: &[usize]) -> Result<Self> {
        if widths.len() != origins.len() {
            return Err(BinningError::DimensionMismatch {
                expected: origins.len(),
                got: widths.len(),
            });
        }
        if counts.len() != origins.len() {
            return Err(BinningError::DimensionMismatch {
                expected: origins.len(),
                got: counts.len(),
            });
        }
        let mut edges = Vec::with_capacity(origins.len());
        for axis in 0..origins.len() {
            validate_width(axis, widths[axis])?;
            validate_count(axis, counts[axis])?;
        }
        row_major_strides(counts)?;
        for axis in 0..origins.len() {
            edges.push(regular_edges(origins[axis], widths[axis], counts[axis])?);
        }
        Self::new(edges)
    }

    pub fn with_precise(mut self, precise: bool) -> Self {
        self.precise = precise;
        self
    }

    pub fn dimension(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Vec<f64>] {
        &self.edges
    }

    pub fn precise(&self) -> bool {
        self.precise
    }

    /// The grid this specification describes; precise mode closes the last bin of each axis.
    pub fn grid(&self) -> Result<BinGrid> {
        let mut edges = self.edges.clone();
        if self.precise {
            for axis in edges.iter_mut() {
                if let Some(last) = axis.last_mut() {
                    *last = next_float(*last, N_EPS);
                }
            }
        }
        BinGrid::new(edges, self.precise, Provenance::Fixed)
    }
}

/// A bin specification of either provenance.
#[derive(Debug, Clone, PartialEq)]
pub enum BinSpecification {
    Derived(RectangularBinning),
    Fixed(FixedRectangularBinning),
}

impl From<RectangularBinning> for BinSpecification {
    fn from(b: RectangularBinning) -> Self {
        BinSpecification::Derived(b)
    }
}

impl From<FixedRectangularBinning> for BinSpecification {
    fn from(b: FixedRectangularBinning) -> Self {
        BinSpecification::Fixed(b)
    }
}

impl BinSpecification {
    pub fn precise(&self) -> bool {
        match self {
            BinSpecification::Derived(b) => b.precise(),
            BinSpecification::Fixed(b) => b.precise(),
        }
    }

    pub fn provenance(&self) -> Provenance {
        match self {
            BinSpecification::Derived(_) => Provenance::Derived,
            BinSpecification::Fixed(_) => Provenance::Fixed,
        }
    }

    /// Dimension the specification imposes on data, if any.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            BinSpecification::Derived(b) => b.dimension(),
            BinSpecification::Fixed(b) => Some(b.dimension()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            BinSpecification::Derived(b) => b.validate(),
            BinSpecification::Fixed(_) => Ok(()),
        }
    }

    /// Resolve to a grid; fixed specifications only check the data dimension.
    pub fn resolve(&self, data: &ArrayView2<'_, f64>) -> Result<BinGrid> {
        match self {
            BinSpecification::Derived(b) => b.resolve(data),
            BinSpecification::Fixed(b) => {
                ensure_dimension(data, b.dimension())?;
                b.grid()
            }
        }
    }
}
