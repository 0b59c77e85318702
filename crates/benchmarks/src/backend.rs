// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend adapter interface.
//!
//! Every implementation under test is driven through [`Backend`], whether it
//! runs in-process or behind an RPC boundary. The orchestrator only sees
//! sample slices going in and coefficients or samples coming out.

use crate::timer::{Measured, TrialTimer};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wavebench_core::Coefficients;

/// The two timed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Multilevel decomposition.
    Forward,
    /// Multilevel reconstruction.
    Inverse,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Forward => write!(f, "forward"),
            Operation::Inverse => write!(f, "inverse"),
        }
    }
}

/// Errors raised by a backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The transform itself failed (bad wavelet id, inconsistent bands).
    #[error(transparent)]
    Transform(#[from] wavebench_core::Error),

    /// The isolated context reported a failure or went away.
    #[error("sandbox error: {0}")]
    Sandbox(String),

    /// The backend could not be brought up.
    #[error("startup failed: {0}")]
    Startup(String),

    /// The operation is excluded for this backend.
    #[error("{0} operation is not supported")]
    Unsupported(Operation),
}

/// Result type for backend calls.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// An implementation of the forward/inverse transform pair.
///
/// `measure_forward` and `measure_inverse` time the plain calls on the host
/// by default. Backends whose work happens elsewhere may override them to
/// run the trial loop where the data lives.
#[async_trait]
pub trait Backend: Send {
    /// Unique name, used as the key in result records.
    fn name(&self) -> &str;

    /// Version string recorded in the report's system info.
    fn version(&self) -> Option<String> {
        None
    }

    /// Whether `operation` may be invoked. Unsupported operations are never
    /// called and are reported as skipped.
    fn supports(&self, operation: Operation) -> bool {
        let _ = operation;
        true
    }

    /// One-time setup before any measurement.
    async fn initialize(&mut self) -> BackendResult<()> {
        Ok(())
    }

    /// Release resources after the run, successful or not.
    async fn shutdown(&mut self) {}

    /// Decompose `data` with the given wavelet.
    async fn forward(&mut self, data: &[f64], wavelet: &str) -> BackendResult<Coefficients>;

    /// Reconstruct `original_len` samples from `coeffs`.
    async fn inverse(
        &mut self,
        coeffs: &Coefficients,
        wavelet: &str,
        original_len: usize,
    ) -> BackendResult<Vec<f64>>;

    /// Time [`Backend::forward`] until the timer's target is reached.
    async fn measure_forward(
        &mut self,
        data: &[f64],
        wavelet: &str,
        timer: &TrialTimer,
    ) -> BackendResult<Measured<Coefficients>> {
        let mut run = timer.start();
        loop {
            let output = self.forward(data, wavelet).await?;
            if run.record() {
                return Ok(Measured {
                    sample: run.finish(),
                    output,
                });
            }
        }
    }

    /// Time [`Backend::inverse`] until the timer's target is reached.
    async fn measure_inverse(
        &mut self,
        coeffs: &Coefficients,
        wavelet: &str,
        original_len: usize,
        timer: &TrialTimer,
    ) -> BackendResult<Measured<Vec<f64>>> {
        let mut run = timer.start();
        loop {
            let output = self.inverse(coeffs, wavelet, original_len).await?;
            if run.record() {
                return Ok(Measured {
                    sample: run.finish(),
                    output,
                });
            }
        }
    }
}
