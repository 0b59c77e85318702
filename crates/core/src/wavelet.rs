// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Orthogonal Daubechies filter banks.
//!
//! Filters follow the usual layout: `rec_lo` holds the scaling coefficients,
//! `dec_lo` is its reverse, and the high-pass pair is derived by the
//! quadrature-mirror relation. `db2` and `db3` are computed from their
//! closed forms; `db4` has none and is tabulated.

use crate::error::{Error, Result};
use std::f64::consts::SQRT_2;

/// Wavelet ids accepted by [`Wavelet::from_name`].
pub const SUPPORTED: &[&str] = &["haar", "db1", "db2", "db3", "db4"];

/// Scaling coefficients of `db4`.
const DB4_SCALING: [f64; 8] = [
    0.230_377_813_308_855_23,
    0.714_846_570_552_541_5,
    0.630_880_767_929_590_4,
    -0.027_983_769_416_983_85,
    -0.187_034_811_718_881_14,
    0.030_841_381_835_986_965,
    0.032_883_011_666_982_945,
    -0.010_597_401_784_997_278,
];

/// A two-channel orthogonal filter bank.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavelet {
    name: String,
    dec_lo: Vec<f64>,
    dec_hi: Vec<f64>,
    rec_lo: Vec<f64>,
    rec_hi: Vec<f64>,
}

impl Wavelet {
    /// Look up a filter bank by id (`haar`, `db1` .. `db4`).
    pub fn from_name(name: &str) -> Result<Self> {
        let scaling = match name {
            "haar" | "db1" => vec![1.0 / SQRT_2, 1.0 / SQRT_2],
            "db2" => db2_scaling().to_vec(),
            "db3" => db3_scaling().to_vec(),
            "db4" => DB4_SCALING.to_vec(),
            other => return Err(Error::UnknownWavelet(other.to_string())),
        };
        Ok(Self::from_scaling(name, scaling))
    }

    /// Build the four filters from scaling coefficients.
    fn from_scaling(name: &str, rec_lo: Vec<f64>) -> Self {
        let len = rec_lo.len();
        let dec_lo: Vec<f64> = rec_lo.iter().rev().copied().collect();
        let dec_hi: Vec<f64> = (0..len)
            .map(|j| {
                let sign = if j % 2 == 0 { -1.0 } else { 1.0 };
                sign * dec_lo[len - 1 - j]
            })
            .collect();
        let rec_hi: Vec<f64> = dec_hi.iter().rev().copied().collect();

        Self {
            name: name.to_string(),
            dec_lo,
            dec_hi,
            rec_lo,
            rec_hi,
        }
    }

    /// Wavelet id this bank was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of taps in every filter.
    pub fn filter_len(&self) -> usize {
        self.dec_lo.len()
    }

    /// Decomposition low-pass filter.
    pub fn dec_lo(&self) -> &[f64] {
        &self.dec_lo
    }

    /// Decomposition high-pass filter.
    pub fn dec_hi(&self) -> &[f64] {
        &self.dec_hi
    }

    /// Reconstruction low-pass filter.
    pub fn rec_lo(&self) -> &[f64] {
        &self.rec_lo
    }

    /// Reconstruction high-pass filter.
    pub fn rec_hi(&self) -> &[f64] {
        &self.rec_hi
    }
}

fn db2_scaling() -> [f64; 4] {
    let s3 = 3.0_f64.sqrt();
    let norm = 4.0 * SQRT_2;
    [
        (1.0 + s3) / norm,
        (3.0 + s3) / norm,
        (3.0 - s3) / norm,
        (1.0 - s3) / norm,
    ]
}

fn db3_scaling() -> [f64; 6] {
    let s10 = 10.0_f64.sqrt();
    let r = (5.0 + 2.0 * s10).sqrt();
    let norm = 16.0 * SQRT_2;
    [
        (1.0 + s10 + r) / norm,
        (5.0 + s10 + 3.0 * r) / norm,
        (10.0 - 2.0 * s10 + 2.0 * r) / norm,
        (10.0 - 2.0 * s10 - 2.0 * r) / norm,
        (5.0 + s10 - 3.0 * r) / norm,
        (1.0 + s10 - r) / norm,
    ]
}
