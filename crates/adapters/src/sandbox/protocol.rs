// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Messages exchanged with the sandbox context.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::oneshot;
use wavebench_benchmarks::{Operation, TimingSample};

/// Binding holding the signal to decompose.
pub const INPUT_DATA: &str = "input_data";
/// Binding receiving the decomposition.
pub const COEFFS: &str = "coeffs";
/// Binding holding the coefficients to reconstruct.
pub const INPUT_COEFFS: &str = "input_coeffs";
/// Binding receiving the reconstruction.
pub const RECONSTRUCTION: &str = "reconstruction";

#[derive(Debug)]
pub(crate) enum Request {
    /// Load filter banks; must precede any evaluation.
    Prime,
    /// Decode `payload` and store it under `name`.
    Bind { name: String, payload: Bytes },
    /// Decompose binding `input` into binding `output`.
    Forward {
        input: String,
        wavelet: String,
        output: String,
    },
    /// Reconstruct `length` samples from binding `input` into `output`.
    Inverse {
        input: String,
        wavelet: String,
        length: usize,
        output: String,
    },
    /// Repeat an evaluation inside the context until `target` elapses.
    Measure {
        operation: Operation,
        input: String,
        wavelet: String,
        length: usize,
        output: String,
        target: Duration,
    },
    /// Encode and return binding `name`.
    Fetch { name: String },
    /// Drop every binding.
    Clear,
    /// Report counters.
    Stats,
}

#[derive(Debug)]
pub(crate) enum Response {
    Done,
    Value(Bytes),
    Sample(TimingSample),
    Stats(ContextStats),
    Error(String),
}

#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) request: Request,
    pub(crate) reply: oneshot::Sender<Response>,
}

/// Counters kept by the context since it started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextStats {
    /// Payloads decoded into bindings.
    pub transfers_in: u64,
    /// Bindings encoded and sent back.
    pub transfers_out: u64,
    /// Forward or inverse evaluations, including every measured trial.
    pub evaluations: u64,
}
