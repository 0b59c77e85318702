// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! The isolated evaluation context.
//!
//! The context owns its bindings and filter banks and is only reachable
//! through [`Request`] messages. Values enter and leave as encoded payloads.

use super::protocol::{ContextStats, Envelope, Request, Response};
use crate::WaveletCache;
use std::collections::HashMap;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};
use wavebench_benchmarks::{Clock, Operation, TrialTimer};
use wavebench_core::wavelet::SUPPORTED;
use wavebench_core::{dwt, Value, Wavelet};

pub(crate) struct Context {
    bindings: HashMap<String, Value>,
    wavelets: WaveletCache,
    stats: ContextStats,
    clock: Arc<dyn Clock>,
    primed: bool,
}

impl Context {
    pub(crate) fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            bindings: HashMap::new(),
            wavelets: WaveletCache::default(),
            stats: ContextStats::default(),
            clock,
            primed: false,
        }
    }

    /// Serve requests until every sender is gone.
    pub(crate) fn serve(mut self, rx: Receiver<Envelope>) {
        debug!("sandbox context started");
        while let Ok(Envelope { request, reply }) = rx.recv() {
            let response = self.handle(request);
            let _ = reply.send(response);
        }
        debug!(stats = ?self.stats, "sandbox context stopped");
    }

    pub(crate) fn handle(&mut self, request: Request) -> Response {
        trace!(?request, "sandbox request");
        match self.dispatch(request) {
            Ok(response) => response,
            Err(message) => Response::Error(message),
        }
    }

    fn dispatch(&mut self, request: Request) -> Result<Response, String> {
        match request {
            Request::Prime => {
                for name in SUPPORTED {
                    self.wavelets.get(name).map_err(|e| e.to_string())?;
                }
                self.primed = true;
                Ok(Response::Done)
            }
            Request::Bind { name, payload } => {
                let value = Value::decode(payload).map_err(|e| e.to_string())?;
                self.stats.transfers_in += 1;
                self.bindings.insert(name, value);
                Ok(Response::Done)
            }
            Request::Forward {
                input,
                wavelet,
                output,
            } => {
                self.evaluate_once(Operation::Forward, &input, &wavelet, 0, output)?;
                Ok(Response::Done)
            }
            Request::Inverse {
                input,
                wavelet,
                length,
                output,
            } => {
                self.evaluate_once(Operation::Inverse, &input, &wavelet, length, output)?;
                Ok(Response::Done)
            }
            Request::Measure {
                operation,
                input,
                wavelet,
                length,
                output,
                target,
            } => self.measure(operation, &input, &wavelet, length, output, target),
            Request::Fetch { name } => {
                let value = self
                    .bindings
                    .get(&name)
                    .ok_or_else(|| format!("no binding named '{name}'"))?;
                let payload = value.encode();
                self.stats.transfers_out += 1;
                Ok(Response::Value(payload))
            }
            Request::Clear => {
                self.bindings.clear();
                Ok(Response::Done)
            }
            Request::Stats => Ok(Response::Stats(self.stats)),
        }
    }

    fn resolve(&mut self, wavelet: &str) -> Result<Wavelet, String> {
        if !self.primed {
            return Err("context has not been primed".to_string());
        }
        self.wavelets
            .get(wavelet)
            .cloned()
            .map_err(|e| e.to_string())
    }

    fn evaluate_once(
        &mut self,
        operation: Operation,
        input: &str,
        wavelet: &str,
        length: usize,
        output: String,
    ) -> Result<(), String> {
        let wavelet = self.resolve(wavelet)?;
        let value = self.binding(input)?;
        let result = evaluate(operation, value, &wavelet, length)?;
        self.stats.evaluations += 1;
        self.bindings.insert(output, result);
        Ok(())
    }

    fn measure(
        &mut self,
        operation: Operation,
        input: &str,
        wavelet: &str,
        length: usize,
        output: String,
        target: Duration,
    ) -> Result<Response, String> {
        let wavelet = self.resolve(wavelet)?;
        let timer = TrialTimer::with_clock(target, Arc::clone(&self.clock));
        let value = self.binding(input)?;

        let mut evaluations = 0;
        let measured = timer.measure(|| {
            evaluations += 1;
            evaluate(operation, value, &wavelet, length)
        });
        self.stats.evaluations += evaluations;

        let measured = measured?;
        self.bindings.insert(output, measured.output);
        Ok(Response::Sample(measured.sample))
    }

    fn binding(&self, name: &str) -> Result<&Value, String> {
        self.bindings
            .get(name)
            .ok_or_else(|| format!("no binding named '{name}'"))
    }
}

fn evaluate(
    operation: Operation,
    input: &Value,
    wavelet: &Wavelet,
    length: usize,
) -> Result<Value, String> {
    match (operation, input) {
        (Operation::Forward, Value::Signal(samples)) => dwt::wavedec(samples, wavelet, None)
            .map(Value::Coefficients)
            .map_err(|e| e.to_string()),
        (Operation::Inverse, Value::Coefficients(coeffs)) => dwt::waverec(coeffs, wavelet, length)
            .map(Value::Signal)
            .map_err(|e| e.to_string()),
        (operation, value) => Err(format!(
            "{operation} cannot evaluate a {} binding",
            value.kind()
        )),
    }
}
