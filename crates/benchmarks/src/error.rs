// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run-level errors.
//!
//! Any of these aborts the whole run; no partial report is produced.
//! Unsupported operations are not errors and never reach this type.

use crate::backend::{BackendError, Operation};
use thiserror::Error;

/// Why a benchmark run failed.
#[derive(Debug, Error)]
pub enum RunError {
    /// Options or backend set are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A backend failed to become ready.
    #[error("failed to initialize {backend}: {source}")]
    Initialization {
        /// Backend name
        backend: String,
        /// Underlying failure
        #[source]
        source: BackendError,
    },

    /// A forward or inverse call raised during timing.
    #[error("{backend} {operation} failed for wavelet {wavelet} with size {size}: {source}")]
    Operation {
        /// Backend name
        backend: String,
        /// Failing operation
        operation: Operation,
        /// Wavelet id
        wavelet: String,
        /// Data size
        size: usize,
        /// Underlying failure
        #[source]
        source: BackendError,
    },

    /// A reconstruction did not match its reference.
    #[error(
        "Round trip failed for {backend} with wavelet {wavelet} and size {size} (max difference {})",
        max_difference.map_or_else(|| "n/a".to_string(), |d| format!("{d:e}"))
    )]
    Correctness {
        /// Backend name
        backend: String,
        /// Wavelet id
        wavelet: String,
        /// Data size
        size: usize,
        /// Largest per-sample deviation, absent when lengths differ
        max_difference: Option<f64>,
    },
}

impl RunError {
    /// Short machine-readable category.
    pub fn kind(&self) -> &'static str {
        match self {
            RunError::InvalidConfiguration(_) => "invalid_configuration",
            RunError::Initialization { .. } => "initialization",
            RunError::Operation { .. } => "operation",
            RunError::Correctness { .. } => "correctness",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correctness_message() {
        let err = RunError::Correctness {
            backend: "native".to_string(),
            wavelet: "db2".to_string(),
            size: 16,
            max_difference: None,
        };
        assert_eq!(
            err.to_string(),
            "Round trip failed for native with wavelet db2 and size 16 (max difference n/a)"
        );
        assert_eq!(err.kind(), "correctness");
    }

    #[test]
    fn test_operation_message_includes_source() {
        let err = RunError::Operation {
            backend: "sandbox".to_string(),
            operation: Operation::Forward,
            wavelet: "db9".to_string(),
            size: 8,
            source: BackendError::Transform(wavebench_core::Error::UnknownWavelet(
                "db9".to_string(),
            )),
        };
        assert_eq!(
            err.to_string(),
            "sandbox forward failed for wavelet db9 with size 8: unknown wavelet: db9"
        );
    }
}
