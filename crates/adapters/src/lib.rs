// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Wavelet transform backends and the backend registry.
//!
//! Four implementations are available:
//!
//! - **native**: the filter-bank engine from `wavebench-core`, called in-process
//! - **sandbox**: the same engine behind a message-passing boundary, with the
//!   input kept resident in the context and the trial loop run inside it
//! - **sandbox-marshalled**: the same context, but every trial transfers the
//!   input in and the result out
//! - **direct**: an independent time-domain implementation that extends,
//!   convolves and downsamples explicitly; forward only
//!
//! # Example
//!
//! ```no_run
//! use wavebench_adapters::run_benchmarks;
//! use wavebench_benchmarks::{host_environment, NoopReporter, RunOptions};
//!
//! # async fn demo() -> Result<(), wavebench_benchmarks::RunError> {
//! let report = run_benchmarks(RunOptions::default(), host_environment(), &NoopReporter).await?;
//! println!("{} combinations measured", report.benchmarks.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod direct;
pub mod native;
pub mod sandbox;

pub use direct::DirectBackend;
pub use native::NativeBackend;
pub use sandbox::{MarshalledSandbox, ResidentSandbox, SharedSandbox};

use std::collections::HashMap;
use thiserror::Error;
use wavebench_benchmarks::{
    Backend, Environment, ProgressReporter, RunError, RunOptions, RunReport,
};
use wavebench_core::Wavelet;

/// In-process filter-bank engine.
pub const NATIVE: &str = "native";
/// Sandboxed engine with resident data.
pub const SANDBOX: &str = "sandbox";
/// Sandboxed engine with per-call marshalling.
pub const SANDBOX_MARSHALLED: &str = "sandbox-marshalled";
/// Direct convolution, forward only.
pub const DIRECT: &str = "direct";

/// Every registered backend name, in measurement order.
pub const BACKEND_NAMES: &[&str] = &[NATIVE, SANDBOX, SANDBOX_MARSHALLED, DIRECT];

/// Errors raised while assembling a backend set.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The requested backend is not registered.
    #[error("unknown backend '{name}' (available: {})", BACKEND_NAMES.join(", "))]
    UnknownBackend {
        /// Requested name
        name: String,
    },
}

/// Registry of all available backends.
///
/// The two sandbox backends share one context.
pub fn all_backends() -> Vec<Box<dyn Backend>> {
    let shared = SharedSandbox::new();
    vec![
        Box::new(NativeBackend::new()),
        Box::new(ResidentSandbox::new(shared.clone())),
        Box::new(MarshalledSandbox::new(shared)),
        Box::new(DirectBackend::new()),
    ]
}

/// Backends named in `names`, in registry order. An empty list selects all.
pub fn select_backends(names: &[String]) -> Result<Vec<Box<dyn Backend>>, AdapterError> {
    if let Some(unknown) = names.iter().find(|n| !BACKEND_NAMES.contains(&n.as_str())) {
        return Err(AdapterError::UnknownBackend {
            name: unknown.clone(),
        });
    }
    Ok(all_backends()
        .into_iter()
        .filter(|b| names.is_empty() || names.iter().any(|n| n == b.name()))
        .collect())
}

/// Run every registered backend over `options`.
///
/// Missing option fields take their defaults.
pub async fn run_benchmarks(
    options: RunOptions,
    environment: Environment,
    reporter: &dyn ProgressReporter,
) -> Result<RunReport, RunError> {
    wavebench_benchmarks::run(all_backends(), options, environment, reporter).await
}

/// Filter banks built on first use.
#[derive(Debug, Default)]
pub(crate) struct WaveletCache {
    banks: HashMap<String, Wavelet>,
}

impl WaveletCache {
    pub(crate) fn get(&mut self, name: &str) -> wavebench_core::Result<&Wavelet> {
        if !self.banks.contains_key(name) {
            let wavelet = Wavelet::from_name(name)?;
            self.banks.insert(name.to_string(), wavelet);
        }
        Ok(&self.banks[name])
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.banks.len()
    }
}
