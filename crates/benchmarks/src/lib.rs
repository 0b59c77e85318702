// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Adaptive benchmark orchestration for wavelet transform backends.
//!
//! A run takes a set of [`Backend`]s and a [`RunConfiguration`], times every
//! backend's forward and inverse transform for each (wavelet, size)
//! combination, checks that every backend reconstructs the same signal and
//! returns a [`RunReport`].
//!
//! # Quick Start
//!
//! ```no_run
//! use wavebench_benchmarks::{host_environment, NoopReporter, Orchestrator, RunOptions};
//! # async fn demo(backends: Vec<Box<dyn wavebench_benchmarks::Backend>>) -> Result<(), wavebench_benchmarks::RunError> {
//! let config = RunOptions {
//!     sizes: vec![1024],
//!     ..RunOptions::default()
//! }
//! .validate()?;
//!
//! let mut orchestrator = Orchestrator::new(backends)?;
//! let report = orchestrator.run(&config, host_environment(), &NoopReporter).await?;
//! println!("{}", wavebench_benchmarks::markdown::generate_table(&report));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`timer`] - adaptive trial timer and injectable clock
//! - [`backend`] - the backend interface
//! - [`oracle`] - round-trip correctness check
//! - [`orchestrator`] - the benchmark loop
//! - [`worker`] - running the loop on an isolated thread
//! - [`io`], [`markdown`], [`csv`] - persisted and derived outputs

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod csv;
pub mod error;
pub mod io;
pub mod markdown;
pub mod oracle;
pub mod orchestrator;
pub mod progress;
pub mod result;
pub mod timer;
pub mod worker;

pub use backend::{Backend, BackendError, BackendResult, Operation};
pub use config::{RunConfiguration, RunOptions};
pub use error::RunError;
pub use orchestrator::Orchestrator;
pub use progress::{NoopReporter, ProgressCallbacks, ProgressReporter};
pub use result::{
    host_environment, Environment, ImplementationResult, ResultRecord, RunReport, Timings,
    TrialCounts, BACKEND_VERSIONS_KEY,
};
pub use timer::{Clock, Measured, SystemClock, TimingSample, TrialTimer};
pub use worker::{WorkerError, WorkerHandle, WorkerMessage, WorkerRequest};

/// Run `backends` over `options` on the current task.
///
/// # Errors
///
/// Returns a [`RunError`] if the options are invalid, the backend set is
/// unusable, or any backend fails during the run.
pub async fn run(
    backends: Vec<Box<dyn Backend>>,
    options: RunOptions,
    environment: Environment,
    reporter: &dyn ProgressReporter,
) -> Result<RunReport, RunError> {
    let config = options.validate()?;
    let mut orchestrator = Orchestrator::new(backends)?;
    orchestrator.run(&config, environment, reporter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::tests::Identity;

    #[tokio::test]
    async fn test_run_with_defaults_for_missing_fields() {
        let options = RunOptions {
            sizes: vec![32],
            wavelets: vec!["db2".into()],
            target_duration_ms: 1,
            seed: None,
        };
        let report = run(
            vec![Box::new(Identity::named("identity"))],
            options,
            Environment::new(),
            &NoopReporter,
        )
        .await
        .unwrap();
        assert_eq!(report.benchmarks.len(), 1);
        assert!(report.info.contains("over 1ms"));
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_options_before_running() {
        let err = run(
            vec![Box::new(Identity::named("identity"))],
            RunOptions {
                wavelets: Vec::new(),
                ..RunOptions::default()
            },
            Environment::new(),
            &NoopReporter,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RunError::InvalidConfiguration(_)));
    }
}
