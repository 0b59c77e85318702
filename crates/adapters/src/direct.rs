// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time-domain decomposition by explicit extension, convolution and
//! downsampling.
//!
//! This is a second, independent route to the same coefficients as the core
//! engine. Each level materializes the symmetrically extended signal, runs a
//! full linear convolution with both analysis filters and keeps every other
//! output sample. Reconstruction is not provided.

use crate::{WaveletCache, DIRECT};
use async_trait::async_trait;
use wavebench_benchmarks::{Backend, BackendError, BackendResult, Operation};
use wavebench_core::dwt::max_level;
use wavebench_core::{Coefficients, Error, Wavelet};

/// Half-sample symmetric extension by `pad` samples on each side.
///
/// `[1, 2, 3]` padded by 2 becomes `[2, 1, 1, 2, 3, 3, 2]`.
pub fn symmetric_extension(signal: &[f64], pad: usize) -> Vec<f64> {
    let n = signal.len();
    let period = 2 * n;
    let mut out = Vec::with_capacity(n + 2 * pad);
    for i in 0..n + 2 * pad {
        let m = (i as isize - pad as isize).rem_euclid(period as isize) as usize;
        let index = if m < n { m } else { period - 1 - m };
        out.push(signal[index]);
    }
    out
}

/// Full linear convolution, `signal.len() + filter.len() - 1` samples long.
pub fn convolve_full(signal: &[f64], filter: &[f64]) -> Vec<f64> {
    if signal.is_empty() || filter.is_empty() {
        return Vec::new();
    }
    let len = signal.len() + filter.len() - 1;
    let mut out = Vec::with_capacity(len);
    for k in 0..len {
        let j_min = k.saturating_sub(signal.len() - 1);
        let j_max = k.min(filter.len() - 1);
        let mut acc = 0.0;
        for j in j_min..=j_max {
            acc += filter[j] * signal[k - j];
        }
        out.push(acc);
    }
    out
}

/// One decomposition level: `(approx, detail)`.
pub fn analysis_step(signal: &[f64], wavelet: &Wavelet) -> (Vec<f64>, Vec<f64>) {
    let taps = wavelet.filter_len();
    let out_len = (signal.len() + taps - 1) / 2;
    let extended = symmetric_extension(signal, taps - 1);

    let downsample = |full: Vec<f64>| -> Vec<f64> {
        full.into_iter().skip(taps).step_by(2).take(out_len).collect()
    };
    (
        downsample(convolve_full(&extended, wavelet.dec_lo())),
        downsample(convolve_full(&extended, wavelet.dec_hi())),
    )
}

/// Decompose `data` down to the deepest useful level.
pub fn decompose(data: &[f64], wavelet: &Wavelet) -> wavebench_core::Result<Coefficients> {
    if data.is_empty() {
        return Err(Error::EmptySignal);
    }
    let level = max_level(data.len(), wavelet.filter_len());

    let mut approx = data.to_vec();
    let mut details = Vec::with_capacity(level);
    for _ in 0..level {
        let (a, d) = analysis_step(&approx, wavelet);
        approx = a;
        details.push(d);
    }
    details.reverse();
    Ok(Coefficients { approx, details })
}

/// Forward-only backend over [`decompose`].
#[derive(Debug, Default)]
pub struct DirectBackend {
    wavelets: WaveletCache,
}

impl DirectBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for DirectBackend {
    fn name(&self) -> &str {
        DIRECT
    }

    fn supports(&self, operation: Operation) -> bool {
        operation == Operation::Forward
    }

    async fn forward(&mut self, data: &[f64], wavelet: &str) -> BackendResult<Coefficients> {
        let wavelet = self.wavelets.get(wavelet)?;
        Ok(decompose(data, wavelet)?)
    }

    async fn inverse(
        &mut self,
        _coeffs: &Coefficients,
        _wavelet: &str,
        _original_len: usize,
    ) -> BackendResult<Vec<f64>> {
        Err(BackendError::Unsupported(Operation::Inverse))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use wavebench_core::dwt::wavedec;
    use wavebench_core::wavelet::SUPPORTED;

    #[test]
    fn test_symmetric_extension() {
        assert_eq!(
            symmetric_extension(&[1.0, 2.0, 3.0], 2),
            vec![2.0, 1.0, 1.0, 2.0, 3.0, 3.0, 2.0]
        );
        assert_eq!(
            symmetric_extension(&[1.0, 2.0], 3),
            vec![2.0, 2.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_convolve_full() {
        assert_eq!(convolve_full(&[1.0, 2.0], &[1.0, 1.0]), vec![1.0, 3.0, 2.0]);
        assert_eq!(convolve_full(&[1.0, 2.0, 3.0], &[2.0]), vec![2.0, 4.0, 6.0]);
        assert!(convolve_full(&[], &[1.0]).is_empty());
    }

    #[test]
    fn test_inverse_is_not_supported() {
        let backend = DirectBackend::new();
        assert!(backend.supports(Operation::Forward));
        assert!(!backend.supports(Operation::Inverse));
    }

    proptest! {
        #[test]
        fn prop_matches_core_engine(
            data in proptest::collection::vec(-100.0f64..100.0, 1..300),
            index in 0..SUPPORTED.len(),
        ) {
            let wavelet = Wavelet::from_name(SUPPORTED[index]).unwrap();
            let expected = wavedec(&data, &wavelet, None).unwrap();
            let actual = decompose(&data, &wavelet).unwrap();

            prop_assert_eq!(actual.level(), expected.level());
            for (a, e) in actual.bands().zip(expected.bands()) {
                prop_assert_eq!(a.len(), e.len());
                for (x, y) in a.iter().zip(e) {
                    prop_assert!((x - y).abs() <= 1e-9, "{} vs {}", x, y);
                }
            }
        }
    }
}
