// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Round-trip correctness checks.

use wavebench_core::Coefficients;

/// Largest absolute per-sample difference accepted as equal.
pub const TOLERANCE: f64 = 1e-6;

/// Largest absolute per-sample difference, or `None` if the lengths differ.
pub fn max_abs_difference(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() {
        return None;
    }
    Some(
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max),
    )
}

/// `true` if both sequences have the same length and every pair of samples
/// is within [`TOLERANCE`].
pub fn approximately_equal(a: &[f64], b: &[f64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).all(|(x, y)| (x - y).abs() <= TOLERANCE)
}

/// Largest absolute difference across all bands, or `None` if the band
/// layouts differ.
pub fn coefficients_difference(a: &Coefficients, b: &Coefficients) -> Option<f64> {
    if a.level() != b.level() {
        return None;
    }
    a.bands()
        .zip(b.bands())
        .try_fold(0.0, |max, (x, y)| max_abs_difference(x, y).map(|d| f64::max(max, d)))
}

/// [`approximately_equal`] applied band by band.
pub fn coefficients_equal(a: &Coefficients, b: &Coefficients) -> bool {
    a.level() == b.level() && a.bands().zip(b.bands()).all(|(x, y)| approximately_equal(x, y))
}
