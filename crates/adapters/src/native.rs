// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! In-process backend over the core filter-bank engine.

use crate::{WaveletCache, NATIVE};
use async_trait::async_trait;
use wavebench_benchmarks::{Backend, BackendResult};
use wavebench_core::{dwt, Coefficients};

/// Calls [`dwt::wavedec`] and [`dwt::waverec`] directly.
#[derive(Debug, Default)]
pub struct NativeBackend {
    wavelets: WaveletCache,
}

impl NativeBackend {
    /// Create the backend.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Backend for NativeBackend {
    fn name(&self) -> &str {
        NATIVE
    }

    fn version(&self) -> Option<String> {
        Some(env!("CARGO_PKG_VERSION").to_string())
    }

    async fn forward(&mut self, data: &[f64], wavelet: &str) -> BackendResult<Coefficients> {
        let wavelet = self.wavelets.get(wavelet)?;
        Ok(dwt::wavedec(data, wavelet, None)?)
    }

    async fn inverse(
        &mut self,
        coeffs: &Coefficients,
        wavelet: &str,
        original_len: usize,
    ) -> BackendResult<Vec<f64>> {
        let wavelet = self.wavelets.get(wavelet)?;
        Ok(dwt::waverec(coeffs, wavelet, original_len)?)
    }
}
