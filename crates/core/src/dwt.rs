// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Discrete wavelet transforms with half-sample symmetric extension.
//!
//! A single level of length `n` produces `floor((n + L - 1) / 2)` approximation
//! and detail coefficients for a filter of length `L`. Reconstruction of `m`
//! coefficient pairs yields `2m - L + 2` samples, which is either the original
//! length or one more; multilevel reconstruction trims the extra sample.

use crate::error::{Error, Result};
use crate::wavelet::Wavelet;

/// Output of a multilevel decomposition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coefficients {
    /// Approximation band at the coarsest level.
    pub approx: Vec<f64>,
    /// Detail bands, coarsest level first.
    pub details: Vec<Vec<f64>>,
}

impl Coefficients {
    /// Number of decomposition levels.
    pub fn level(&self) -> usize {
        self.details.len()
    }

    /// All bands in `[cA_n, cD_n, ..., cD_1]` order.
    pub fn bands(&self) -> impl Iterator<Item = &[f64]> {
        std::iter::once(self.approx.as_slice()).chain(self.details.iter().map(Vec::as_slice))
    }

    /// Total number of coefficients across all bands.
    pub fn total_len(&self) -> usize {
        self.bands().map(<[f64]>::len).sum()
    }
}

/// Deepest useful decomposition level for a signal of `len` samples.
pub fn max_level(len: usize, filter_len: usize) -> usize {
    if filter_len < 2 {
        return 0;
    }
    match len / (filter_len - 1) {
        0 => 0,
        q => q.ilog2() as usize,
    }
}

/// Map an index of the infinitely extended signal back into `0..len`.
#[inline]
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period) as usize;
    if m < len {
        m
    } else {
        2 * len - 1 - m
    }
}

/// Single-level decomposition into `(approx, detail)`.
pub fn dwt(signal: &[f64], wavelet: &Wavelet) -> Result<(Vec<f64>, Vec<f64>)> {
    if signal.is_empty() {
        return Err(Error::EmptySignal);
    }

    let n = signal.len();
    let lo = wavelet.dec_lo();
    let hi = wavelet.dec_hi();
    let taps = lo.len();
    let out_len = (n + taps - 1) / 2;

    let mut approx = Vec::with_capacity(out_len);
    let mut detail = Vec::with_capacity(out_len);

    for o in 0..out_len {
        let centre = 2 * o + 1;
        let (mut a, mut d) = (0.0, 0.0);
        if centre >= taps - 1 && centre < n {
            let window = &signal[centre + 1 - taps..=centre];
            for (j, x) in window.iter().rev().enumerate() {
                a += lo[j] * x;
                d += hi[j] * x;
            }
        } else {
            for j in 0..taps {
                let x = signal[reflect(centre as isize - j as isize, n)];
                a += lo[j] * x;
                d += hi[j] * x;
            }
        }
        approx.push(a);
        detail.push(d);
    }

    Ok((approx, detail))
}

/// Single-level reconstruction from matching approximation and detail bands.
pub fn idwt(approx: &[f64], detail: &[f64], wavelet: &Wavelet) -> Result<Vec<f64>> {
    if approx.len() != detail.len() {
        return Err(Error::LengthMismatch {
            expected: approx.len(),
            actual: detail.len(),
        });
    }

    let lo = wavelet.rec_lo();
    let hi = wavelet.rec_hi();
    let taps = lo.len();
    let m = approx.len();
    if 2 * m + 2 < taps {
        return Err(Error::LengthMismatch {
            expected: taps / 2,
            actual: m,
        });
    }
    let out_len = 2 * m + 2 - taps;

    let mut out = Vec::with_capacity(out_len);
    for t in 0..out_len {
        let pos = t + taps - 2;
        let k_min = if pos + 1 >= taps { (pos + 2 - taps) / 2 } else { 0 };
        let k_max = (pos / 2).min(m - 1);
        let mut y = 0.0;
        for k in k_min..=k_max {
            let tap = pos - 2 * k;
            y += approx[k] * lo[tap] + detail[k] * hi[tap];
        }
        out.push(y);
    }

    Ok(out)
}

/// Multilevel decomposition. `level = None` uses [`max_level`].
pub fn wavedec(data: &[f64], wavelet: &Wavelet, level: Option<usize>) -> Result<Coefficients> {
    if data.is_empty() {
        return Err(Error::EmptySignal);
    }

    let max = max_level(data.len(), wavelet.filter_len());
    let level = level.unwrap_or(max);
    if level > max {
        return Err(Error::InvalidLevel {
            requested: level,
            max,
        });
    }

    let mut approx = data.to_vec();
    let mut details = Vec::with_capacity(level);
    for _ in 0..level {
        let (a, d) = dwt(&approx, wavelet)?;
        approx = a;
        details.push(d);
    }
    details.reverse();

    Ok(Coefficients { approx, details })
}

/// Multilevel reconstruction truncated to `original_len` samples.
pub fn waverec(coeffs: &Coefficients, wavelet: &Wavelet, original_len: usize) -> Result<Vec<f64>> {
    let mut approx = coeffs.approx.clone();
    for detail in &coeffs.details {
        if approx.len() == detail.len() + 1 {
            approx.truncate(detail.len());
        }
        approx = idwt(&approx, detail, wavelet)?;
    }

    if approx.len() < original_len {
        return Err(Error::LengthMismatch {
            expected: original_len,
            actual: approx.len(),
        });
    }
    approx.truncate(original_len);
    Ok(approx)
}
