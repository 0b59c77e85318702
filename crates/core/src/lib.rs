// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Numerical core for Wavebench.
//!
//! This crate holds everything the benchmark backends compute with:
//!
//! - [`wavelet`] - Daubechies filter banks addressed by wavelet id
//! - [`dwt`] - single-level and multilevel discrete wavelet transforms
//! - [`codec`] - bit-exact binary marshalling of signals and coefficients
//! - [`signal`] - synthetic test signal generation
//!
//! # Example
//!
//! ```
//! use wavebench_core::{dwt, Wavelet};
//!
//! let wavelet = Wavelet::from_name("db2").unwrap();
//! let data: Vec<f64> = (0..64).map(|i| (i as f64 / 10.0).sin()).collect();
//!
//! let coeffs = dwt::wavedec(&data, &wavelet, None).unwrap();
//! let restored = dwt::waverec(&coeffs, &wavelet, data.len()).unwrap();
//! assert!(data.iter().zip(&restored).all(|(a, b)| (a - b).abs() < 1e-9));
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod codec;
pub mod dwt;
pub mod error;
pub mod signal;
pub mod wavelet;

pub use codec::Value;
pub use dwt::Coefficients;
pub use error::{Error, Result};
pub use wavelet::Wavelet;
