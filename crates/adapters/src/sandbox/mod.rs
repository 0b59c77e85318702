// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backends driven through a message-passing boundary.
//!
//! A [`Sandbox`] owns a dedicated thread running the evaluation context.
//! Callers never touch the context's memory: every value is encoded, sent as
//! a request and decoded on the other side, and each call awaits its reply.
//!
//! Two strategies share the same context:
//!
//! - [`ResidentSandbox`] transfers the input once per combination and runs
//!   the whole trial loop inside the context, timed by the context's clock.
//!   Only the final result crosses back, outside the timed region.
//! - [`MarshalledSandbox`] performs a full transfer in, evaluation and
//!   transfer out on every trial, all timed on the host.

mod context;
pub mod protocol;

use self::context::Context;
use self::protocol::{Envelope, Request, Response};
pub use self::protocol::{ContextStats, COEFFS, INPUT_COEFFS, INPUT_DATA, RECONSTRUCTION};
use crate::{SANDBOX, SANDBOX_MARSHALLED};
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, OnceCell};
use tracing::debug;
use wavebench_benchmarks::{
    Backend, BackendError, BackendResult, Clock, Measured, Operation, SystemClock, TimingSample,
    TrialTimer,
};
use wavebench_core::codec::{encode_coefficients, encode_signal};
use wavebench_core::{Coefficients, Value};

/// Name given to the context thread.
pub const CONTEXT_THREAD_NAME: &str = "wavebench-sandbox";

/// Version string of the context's evaluation engine.
pub const CONTEXT_VERSION: &str = concat!("wavebench-sandbox/", env!("CARGO_PKG_VERSION"));

/// Handle to a running sandbox context.
///
/// The context thread stops once the handle is dropped.
#[derive(Debug)]
pub struct Sandbox {
    tx: mpsc::Sender<Envelope>,
}

impl Sandbox {
    /// Start a context that times measurements with the system clock.
    pub fn start() -> BackendResult<Self> {
        Self::start_with_clock(Arc::new(SystemClock::new()))
    }

    /// Start a context that times measurements with `clock`.
    pub fn start_with_clock(clock: Arc<dyn Clock>) -> BackendResult<Self> {
        let (tx, rx) = mpsc::channel();
        let context = Context::new(clock);
        std::thread::Builder::new()
            .name(CONTEXT_THREAD_NAME.to_string())
            .spawn(move || context.serve(rx))
            .map_err(|e| BackendError::Startup(e.to_string()))?;
        Ok(Self { tx })
    }

    async fn call(&self, request: Request) -> BackendResult<Response> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Envelope { request, reply })
            .map_err(|_| BackendError::Sandbox("context has stopped".to_string()))?;
        match response.await {
            Ok(Response::Error(message)) => Err(BackendError::Sandbox(message)),
            Ok(response) => Ok(response),
            Err(_) => Err(BackendError::Sandbox(
                "context dropped the request".to_string(),
            )),
        }
    }

    async fn expect_done(&self, request: Request) -> BackendResult<()> {
        match self.call(request).await? {
            Response::Done => Ok(()),
            other => Err(unexpected(&other)),
        }
    }

    /// Load the context's filter banks.
    pub async fn prime(&self) -> BackendResult<()> {
        self.expect_done(Request::Prime).await
    }

    /// Transfer an encoded value into binding `name`.
    pub async fn bind(&self, name: &str, payload: Bytes) -> BackendResult<()> {
        self.expect_done(Request::Bind {
            name: name.to_string(),
            payload,
        })
        .await
    }

    /// Decompose binding `input` into binding `output`.
    pub async fn forward(&self, input: &str, wavelet: &str, output: &str) -> BackendResult<()> {
        self.expect_done(Request::Forward {
            input: input.to_string(),
            wavelet: wavelet.to_string(),
            output: output.to_string(),
        })
        .await
    }

    /// Reconstruct `length` samples from binding `input` into `output`.
    pub async fn inverse(
        &self,
        input: &str,
        wavelet: &str,
        length: usize,
        output: &str,
    ) -> BackendResult<()> {
        self.expect_done(Request::Inverse {
            input: input.to_string(),
            wavelet: wavelet.to_string(),
            length,
            output: output.to_string(),
        })
        .await
    }

    /// Time `operation` inside the context until `target` elapses.
    pub async fn measure(
        &self,
        operation: Operation,
        input: &str,
        wavelet: &str,
        length: usize,
        output: &str,
        target: Duration,
    ) -> BackendResult<TimingSample> {
        let request = Request::Measure {
            operation,
            input: input.to_string(),
            wavelet: wavelet.to_string(),
            length,
            output: output.to_string(),
            target,
        };
        match self.call(request).await? {
            Response::Sample(sample) => Ok(sample),
            other => Err(unexpected(&other)),
        }
    }

    /// Transfer binding `name` back out and decode it.
    pub async fn fetch(&self, name: &str) -> BackendResult<Value> {
        let request = Request::Fetch {
            name: name.to_string(),
        };
        match self.call(request).await? {
            Response::Value(payload) => Ok(Value::decode(payload)?),
            other => Err(unexpected(&other)),
        }
    }

    /// Drop every binding.
    pub async fn clear(&self) -> BackendResult<()> {
        self.expect_done(Request::Clear).await
    }

    /// Transfer and evaluation counters.
    pub async fn stats(&self) -> BackendResult<ContextStats> {
        match self.call(Request::Stats).await? {
            Response::Stats(stats) => Ok(stats),
            other => Err(unexpected(&other)),
        }
    }

    async fn fetch_coefficients(&self, name: &str) -> BackendResult<Coefficients> {
        match self.fetch(name).await? {
            Value::Coefficients(coeffs) => Ok(coeffs),
            other => Err(BackendError::Sandbox(format!(
                "binding '{name}' holds {}, expected coefficients",
                other.kind()
            ))),
        }
    }

    async fn fetch_signal(&self, name: &str) -> BackendResult<Vec<f64>> {
        match self.fetch(name).await? {
            Value::Signal(samples) => Ok(samples),
            other => Err(BackendError::Sandbox(format!(
                "binding '{name}' holds {}, expected a signal",
                other.kind()
            ))),
        }
    }
}

fn unexpected(response: &Response) -> BackendError {
    BackendError::Sandbox(format!("unexpected response: {response:?}"))
}

/// One sandbox context shared by several backends, started on first use.
#[derive(Clone)]
pub struct SharedSandbox {
    cell: Arc<OnceCell<Sandbox>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SharedSandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSandbox")
            .field("started", &self.cell.initialized())
            .finish_non_exhaustive()
    }
}

impl Default for SharedSandbox {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedSandbox {
    /// Context timed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::new()))
    }

    /// Context timed by `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            cell: Arc::new(OnceCell::new()),
            clock,
        }
    }

    /// The running context, starting and priming it on the first call.
    pub async fn get(&self) -> BackendResult<&Sandbox> {
        self.cell
            .get_or_try_init(|| async {
                debug!("starting sandbox context");
                let sandbox = Sandbox::start_with_clock(Arc::clone(&self.clock))?;
                sandbox.prime().await?;
                Ok(sandbox)
            })
            .await
    }

    fn started(&self) -> BackendResult<&Sandbox> {
        self.cell
            .get()
            .ok_or_else(|| BackendError::Sandbox("sandbox is not initialized".to_string()))
    }
}

/// Sandbox backend that keeps data resident in the context.
#[derive(Debug, Clone)]
pub struct ResidentSandbox {
    shared: SharedSandbox,
}

impl ResidentSandbox {
    /// Backend over `shared`.
    pub fn new(shared: SharedSandbox) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl Backend for ResidentSandbox {
    fn name(&self) -> &str {
        SANDBOX
    }

    fn version(&self) -> Option<String> {
        Some(CONTEXT_VERSION.to_string())
    }

    async fn initialize(&mut self) -> BackendResult<()> {
        self.shared.get().await.map(|_| ())
    }

    async fn shutdown(&mut self) {
        if let Ok(sandbox) = self.shared.started() {
            let _ = sandbox.clear().await;
        }
    }

    async fn forward(&mut self, data: &[f64], wavelet: &str) -> BackendResult<Coefficients> {
        let sandbox = self.shared.started()?;
        sandbox.clear().await?;
        sandbox.bind(INPUT_DATA, encode_signal(data)).await?;
        sandbox.forward(INPUT_DATA, wavelet, COEFFS).await?;
        sandbox.fetch_coefficients(COEFFS).await
    }

    async fn inverse(
        &mut self,
        coeffs: &Coefficients,
        wavelet: &str,
        original_len: usize,
    ) -> BackendResult<Vec<f64>> {
        let sandbox = self.shared.started()?;
        sandbox.clear().await?;
        sandbox.bind(INPUT_COEFFS, encode_coefficients(coeffs)).await?;
        sandbox
            .inverse(INPUT_COEFFS, wavelet, original_len, RECONSTRUCTION)
            .await?;
        sandbox.fetch_signal(RECONSTRUCTION).await
    }

    async fn measure_forward(
        &mut self,
        data: &[f64],
        wavelet: &str,
        timer: &TrialTimer,
    ) -> BackendResult<Measured<Coefficients>> {
        let sandbox = self.shared.started()?;
        sandbox.clear().await?;
        sandbox.bind(INPUT_DATA, encode_signal(data)).await?;
        let sample = sandbox
            .measure(Operation::Forward, INPUT_DATA, wavelet, 0, COEFFS, timer.target())
            .await?;
        let output = sandbox.fetch_coefficients(COEFFS).await?;
        Ok(Measured { sample, output })
    }

    async fn measure_inverse(
        &mut self,
        coeffs: &Coefficients,
        wavelet: &str,
        original_len: usize,
        timer: &TrialTimer,
    ) -> BackendResult<Measured<Vec<f64>>> {
        let sandbox = self.shared.started()?;
        sandbox.clear().await?;
        sandbox.bind(INPUT_COEFFS, encode_coefficients(coeffs)).await?;
        let sample = sandbox
            .measure(
                Operation::Inverse,
                INPUT_COEFFS,
                wavelet,
                original_len,
                RECONSTRUCTION,
                timer.target(),
            )
            .await?;
        let output = sandbox.fetch_signal(RECONSTRUCTION).await?;
        Ok(Measured { sample, output })
    }
}

/// Sandbox backend that marshals data across the boundary on every call.
#[derive(Debug, Clone)]
pub struct MarshalledSandbox {
    shared: SharedSandbox,
}

impl MarshalledSandbox {
    /// Backend over `shared`.
    pub fn new(shared: SharedSandbox) -> Self {
        Self { shared }
    }
}

#[async_trait]
impl Backend for MarshalledSandbox {
    fn name(&self) -> &str {
        SANDBOX_MARSHALLED
    }

    fn version(&self) -> Option<String> {
        Some(CONTEXT_VERSION.to_string())
    }

    async fn initialize(&mut self) -> BackendResult<()> {
        self.shared.get().await.map(|_| ())
    }

    async fn shutdown(&mut self) {
        if let Ok(sandbox) = self.shared.started() {
            let _ = sandbox.clear().await;
        }
    }

    async fn forward(&mut self, data: &[f64], wavelet: &str) -> BackendResult<Coefficients> {
        let sandbox = self.shared.started()?;
        sandbox.bind(INPUT_DATA, encode_signal(data)).await?;
        sandbox.forward(INPUT_DATA, wavelet, COEFFS).await?;
        sandbox.fetch_coefficients(COEFFS).await
    }

    async fn inverse(
        &mut self,
        coeffs: &Coefficients,
        wavelet: &str,
        original_len: usize,
    ) -> BackendResult<Vec<f64>> {
        let sandbox = self.shared.started()?;
        sandbox.bind(INPUT_COEFFS, encode_coefficients(coeffs)).await?;
        sandbox
            .inverse(INPUT_COEFFS, wavelet, original_len, RECONSTRUCTION)
            .await?;
        sandbox.fetch_signal(RECONSTRUCTION).await
    }
}
