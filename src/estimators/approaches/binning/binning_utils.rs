// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use crate::error::{BinningError, Result};

/// Advance `x` by `n` representable floats towards positive infinity.
///
/// Used to move an upper edge strictly past the largest observed value.
pub fn next_float(x: f64, n: usize) -> f64 {
    let mut v = x;
    for _ in 0..n {
        if v.is_nan() || v == f64::INFINITY {
            return v;
        }
        v = if v == 0.0 {
            f64::from_bits(1)
        } else if v > 0.0 {
            f64::from_bits(v.to_bits() + 1)
        } else {
            f64::from_bits(v.to_bits() - 1)
        };
    }
    v
}

/// Row-major strides for a mixed-radix index over `counts` (last axis fastest).
///
/// Returns the strides and the total number of bins, or `TooManyBins` if the product
/// does not fit the identifier range.
pub fn row_major_strides(counts: &[usize]) -> Result<(Vec<usize>, usize)> {
    let mut strides = vec![1usize; counts.len()];
    let mut total: usize = 1;
    for (axis, &c) in counts.iter().enumerate().rev() {
        strides[axis] = total;
        total = total.checked_mul(c).ok_or(BinningError::TooManyBins)?;
    }
    if total > i64::MAX as usize {
        return Err(BinningError::TooManyBins);
    }
    Ok((strides, total))
}

/// Count the occurrences of each bin id in a slice, ignoring ids below 1 (out-of-range points).
/// Uses a dense vector for small id ranges, otherwise falls back to HashMap.
pub fn count_bin_frequencies(ids: &[i64]) -> HashMap<i64, usize> {
    let mut min_v = i64::MAX;
    let mut max_v = i64::MIN;
    for &v in ids.iter().filter(|&&v| v >= 1) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v > max_v {
        return HashMap::new();
    }

    // Range limit chosen to balance memory and speed.
    const MAX_DENSE_RANGE: i64 = 4096;
    let range = max_v - min_v;
    if range <= MAX_DENSE_RANGE {
        let len = (range as usize) + 1;
        let mut dense = vec![0usize; len];
        for &v in ids.iter().filter(|&&v| v >= 1) {
            dense[(v - min_v) as usize] += 1;
        }
        let mut map = HashMap::with_capacity(len);
        for (i, &cnt) in dense.iter().enumerate() {
            if cnt != 0 {
                map.insert(min_v + i as i64, cnt);
            }
        }
        return map;
    }

    let mut frequency_map = HashMap::new();
    for &value in ids.iter().filter(|&&v| v >= 1) {
        *frequency_map.entry(value).or_insert(0) += 1;
    }
    frequency_map
}
