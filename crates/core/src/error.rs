// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the numerical core.

use thiserror::Error;

/// Errors raised by transforms and the marshalling codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The wavelet id does not name a supported filter bank.
    #[error("unknown wavelet: {0}")]
    UnknownWavelet(String),

    /// Transforms need at least one sample.
    #[error("cannot transform an empty signal")]
    EmptySignal,

    /// Requested decomposition depth exceeds what the signal supports.
    #[error("decomposition level {requested} exceeds maximum {max} for this signal")]
    InvalidLevel {
        /// Requested level
        requested: usize,
        /// Largest usable level
        max: usize,
    },

    /// Coefficient bands (or a requested output) have inconsistent lengths.
    #[error("length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// A marshalled payload could not be decoded.
    #[error("codec error: {0}")]
    Codec(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
