// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::ops::Index;

use ndarray::Array1;

use crate::error::{BinningError, Result};

/// A probability vector: non-negative, finite entries summing to one.
///
/// This is the hand-off type to entropy layers; entries are aligned with the outcome list
/// returned next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Probabilities {
    p: Array1<f64>,
}

impl Probabilities {
    /// Validate and normalise `values` to sum to one.
    pub fn new(values: Array1<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(BinningError::InvalidProbabilities {
                reason: "probability vector is empty".to_string(),
            });
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(BinningError::InvalidProbabilities {
                reason: format!("entry {v} is negative or not finite"),
            });
        }
        let total = values.sum();
        if total <= 0.0 {
            return Err(BinningError::InvalidProbabilities {
                reason: "entries sum to zero".to_string(),
            });
        }
        Ok(Self { p: values / total })
    }

    /// Relative frequencies `n_i / N` from raw counts.
    pub fn from_counts(counts: &[usize]) -> Result<Self> {
        Self::new(counts.iter().map(|&c| c as f64).collect())
    }

    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.p
    }

    pub fn into_inner(self) -> Array1<f64> {
        self.p
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.p.iter()
    }
}

impl Index<usize> for Probabilities {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.p[i]
    }
}
