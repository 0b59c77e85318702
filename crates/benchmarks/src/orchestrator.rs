// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark orchestrator.
//!
//! Walks every (wavelet, size) combination, times each backend's forward and
//! inverse transform, checks the reconstruction and collects one
//! [`ResultRecord`] per combination into a [`RunReport`].

use crate::backend::{Backend, BackendError, Operation};
use crate::config::RunConfiguration;
use crate::error::RunError;
use crate::oracle;
use crate::progress::{percent, ProgressReporter};
use crate::result::{
    Environment, ImplementationResult, ReportConfiguration, ResultRecord, RunReport,
    BACKEND_VERSIONS_KEY,
};
use crate::timer::{Clock, Measured, SystemClock, TimingSample, TrialTimer};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};
use wavebench_core::signal::test_signal;
use wavebench_core::Coefficients;

/// Record keys that cannot double as backend names.
pub const RESERVED_NAMES: &[&str] = &["size", "wavelet"];

/// Drives a fixed set of backends through a benchmark run.
pub struct Orchestrator {
    backends: Vec<Box<dyn Backend>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("backends", &self.backend_names())
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator over `backends`, in measurement order.
    ///
    /// Fails if the list is empty or a name is blank, duplicated or
    /// collides with a record key.
    pub fn new(backends: Vec<Box<dyn Backend>>) -> Result<Self, RunError> {
        if backends.is_empty() {
            return Err(RunError::InvalidConfiguration(
                "at least one backend is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for backend in &backends {
            let name = backend.name();
            if name.trim().is_empty() {
                return Err(RunError::InvalidConfiguration(
                    "backend names must not be blank".to_string(),
                ));
            }
            if RESERVED_NAMES.contains(&name) {
                return Err(RunError::InvalidConfiguration(format!(
                    "backend name '{name}' is reserved"
                )));
            }
            if !seen.insert(name.to_string()) {
                return Err(RunError::InvalidConfiguration(format!(
                    "duplicate backend name '{name}'"
                )));
            }
        }
        Ok(Self {
            backends,
            clock: Arc::new(SystemClock::new()),
        })
    }

    /// Read time from `clock` instead of the system clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Backend names in measurement order.
    pub fn backend_names(&self) -> Vec<&str> {
        self.backends.iter().map(|b| b.name()).collect()
    }

    /// Run every combination in `config` and assemble the report.
    ///
    /// Backends are shut down afterwards whether or not the run succeeded.
    pub async fn run(
        &mut self,
        config: &RunConfiguration,
        environment: Environment,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunReport, RunError> {
        let result = self.execute(config, environment, reporter).await;
        self.shutdown().await;
        if let Err(err) = &result {
            warn!(error = %err, kind = err.kind(), "benchmark run failed");
        }
        result
    }

    async fn execute(
        &mut self,
        config: &RunConfiguration,
        mut environment: Environment,
        reporter: &dyn ProgressReporter,
    ) -> Result<RunReport, RunError> {
        info!(
            backends = ?self.backend_names(),
            sizes = ?config.sizes(),
            wavelets = ?config.wavelets(),
            target_ms = config.target_duration_ms(),
            "starting benchmark run"
        );

        let initialization_timings = self.initialize(reporter).await?;
        let versions: serde_json::Map<String, serde_json::Value> = self
            .backends
            .iter()
            .filter_map(|b| b.version().map(|v| (b.name().to_string(), v.into())))
            .collect();
        if !versions.is_empty() {
            environment.insert(BACKEND_VERSIONS_KEY.to_string(), versions.into());
        }

        reporter.progress("Running benchmarks...");

        let timer = TrialTimer::with_clock(config.target_duration(), Arc::clone(&self.clock));
        let mut rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let total = config.combinations();
        let mut benchmarks = Vec::with_capacity(total);

        for wavelet in config.wavelets() {
            for &size in config.sizes() {
                reporter.current_test(&format!("Testing wavelet {wavelet} with size {size}"));
                reporter.percent_complete(percent(benchmarks.len(), total));

                let data = test_signal(size, &mut rng);
                let record = self
                    .measure_combination(&data, wavelet, &timer)
                    .instrument(tracing::info_span!("combination", %wavelet, size))
                    .await?;
                benchmarks.push(record);

                reporter.percent_complete(percent(benchmarks.len(), total));
            }
        }

        info!(records = benchmarks.len(), "benchmark run complete");

        Ok(RunReport {
            timestamp: Utc::now(),
            system_info: environment,
            configuration: ReportConfiguration::from(config),
            initialization_timings,
            info: format!(
                "Timings are in milliseconds. 'forward' and 'inverse' are the average times \
                 taken to run the respective operations over {}ms.",
                config.target_duration_ms()
            ),
            benchmarks,
        })
    }

    async fn initialize(
        &mut self,
        reporter: &dyn ProgressReporter,
    ) -> Result<BTreeMap<String, f64>, RunError> {
        let mut timings = BTreeMap::new();
        for backend in self.backends.iter_mut() {
            let name = backend.name().to_string();
            reporter.progress(&format!("Initializing {name}..."));

            let start = self.clock.now();
            backend
                .initialize()
                .await
                .map_err(|source| RunError::Initialization {
                    backend: name.clone(),
                    source,
                })?;
            let elapsed = self.clock.now().saturating_sub(start);
            let elapsed_ms = elapsed.as_nanos() as f64 / 1e6;

            debug!(backend = %name, elapsed_ms, "backend initialized");
            timings.insert(name, elapsed_ms);
        }
        Ok(timings)
    }

    async fn measure_combination(
        &mut self,
        data: &[f64],
        wavelet: &str,
        timer: &TrialTimer,
    ) -> Result<ResultRecord, RunError> {
        let mut record = ResultRecord::new(data.len(), wavelet);
        let mut reference = Reference::default();

        for backend in self.backends.iter_mut() {
            let name = backend.name().to_string();
            let result = measure_backend(backend.as_mut(), data, wavelet, timer, &mut reference)
                .instrument(tracing::debug_span!("backend", backend = %name))
                .await?;
            debug!(
                backend = %name,
                forward_ms = ?result.timings.forward,
                inverse_ms = ?result.timings.inverse,
                "measured"
            );
            record.implementations.insert(name, result);

            // Give a pending cancellation the chance to land between backends.
            tokio::task::yield_now().await;
        }

        Ok(record)
    }

    async fn shutdown(&mut self) {
        futures::future::join_all(self.backends.iter_mut().map(|b| b.shutdown())).await;
    }
}

/// Verified outputs of the first backend that completed a round trip.
#[derive(Debug, Default)]
struct Reference {
    coefficients: Option<Coefficients>,
    reconstruction: Option<Vec<f64>>,
}

/// Time one backend on one combination and verify its output.
///
/// Every reconstruction must match `data` and, once a reference exists, the
/// reference reconstruction. A backend that cannot run the inverse has its
/// forward coefficients compared to the reference coefficients instead; if
/// no reference exists yet its output is not checked.
async fn measure_backend(
    backend: &mut dyn Backend,
    data: &[f64],
    wavelet: &str,
    timer: &TrialTimer,
    reference: &mut Reference,
) -> Result<ImplementationResult, RunError> {
    let skipped = TimingSample::skipped();
    if !backend.supports(Operation::Forward) {
        return Ok(ImplementationResult::from_samples(skipped, skipped));
    }

    let forward = match backend.measure_forward(data, wavelet, timer).await {
        Ok(measured) => measured,
        Err(BackendError::Unsupported(_)) => {
            return Ok(ImplementationResult::from_samples(skipped, skipped))
        }
        Err(source) => {
            return Err(operation_error(backend, Operation::Forward, wavelet, data.len(), source))
        }
    };

    if !backend.supports(Operation::Inverse) {
        check_coefficients(backend, wavelet, data.len(), &forward.output, reference)?;
        return Ok(ImplementationResult::from_samples(forward.sample, skipped));
    }

    let inverse: Measured<Vec<f64>> = match backend
        .measure_inverse(&forward.output, wavelet, data.len(), timer)
        .await
    {
        Ok(measured) => measured,
        Err(BackendError::Unsupported(_)) => {
            check_coefficients(backend, wavelet, data.len(), &forward.output, reference)?;
            return Ok(ImplementationResult::from_samples(forward.sample, skipped));
        }
        Err(source) => {
            return Err(operation_error(backend, Operation::Inverse, wavelet, data.len(), source))
        }
    };

    check_samples(backend, wavelet, &inverse.output, data)?;
    match &reference.reconstruction {
        Some(expected) => check_samples(backend, wavelet, &inverse.output, expected)?,
        None => {
            reference.reconstruction = Some(inverse.output);
            reference.coefficients = Some(forward.output);
        }
    }

    Ok(ImplementationResult::from_samples(forward.sample, inverse.sample))
}

fn check_samples(
    backend: &dyn Backend,
    wavelet: &str,
    actual: &[f64],
    expected: &[f64],
) -> Result<(), RunError> {
    if oracle::approximately_equal(actual, expected) {
        return Ok(());
    }
    Err(RunError::Correctness {
        backend: backend.name().to_string(),
        wavelet: wavelet.to_string(),
        size: expected.len(),
        max_difference: oracle::max_abs_difference(actual, expected),
    })
}

fn check_coefficients(
    backend: &dyn Backend,
    wavelet: &str,
    size: usize,
    actual: &Coefficients,
    reference: &Reference,
) -> Result<(), RunError> {
    let Some(expected) = &reference.coefficients else {
        return Ok(());
    };
    if oracle::coefficients_equal(actual, expected) {
        return Ok(());
    }
    warn!(backend = backend.name(), %wavelet, size, "forward coefficients differ from reference");
    Err(RunError::Correctness {
        backend: backend.name().to_string(),
        wavelet: wavelet.to_string(),
        size,
        max_difference: oracle::coefficients_difference(actual, expected),
    })
}

fn operation_error(
    backend: &dyn Backend,
    operation: Operation,
    wavelet: &str,
    size: usize,
    source: BackendError,
) -> RunError {
    RunError::Operation {
        backend: backend.name().to_string(),
        operation,
        wavelet: wavelet.to_string(),
        size,
        source,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::backend::BackendResult;
    use crate::config::RunOptions;
    use crate::progress::{MockProgressReporter, NoopReporter};
    use crate::timer::StepClock;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Backend whose forward keeps the samples as the approximation band.
    #[derive(Clone, Default)]
    pub(crate) struct Identity {
        pub(crate) name: &'static str,
        pub(crate) inverse_supported: bool,
        pub(crate) offset: f64,
        pub(crate) forward_offset: f64,
        pub(crate) fail_forward: bool,
        pub(crate) fail_initialize: bool,
        pub(crate) version: Option<&'static str>,
        pub(crate) shutdowns: Arc<AtomicUsize>,
    }

    impl Identity {
        pub(crate) fn named(name: &'static str) -> Self {
            Self {
                name,
                inverse_supported: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl Backend for Identity {
        fn name(&self) -> &str {
            self.name
        }

        fn version(&self) -> Option<String> {
            self.version.map(str::to_string)
        }

        fn supports(&self, operation: Operation) -> bool {
            operation == Operation::Forward || self.inverse_supported
        }

        async fn initialize(&mut self) -> BackendResult<()> {
            if self.fail_initialize {
                return Err(BackendError::Startup("no runtime".to_string()));
            }
            Ok(())
        }

        async fn shutdown(&mut self) {
            self.shutdowns.fetch_add(1, Ordering::SeqCst);
        }

        async fn forward(&mut self, data: &[f64], _wavelet: &str) -> BackendResult<Coefficients> {
            if self.fail_forward {
                return Err(BackendError::Sandbox("evaluation failed".to_string()));
            }
            Ok(Coefficients {
                approx: data.iter().map(|x| x + self.forward_offset).collect(),
                details: Vec::new(),
            })
        }

        async fn inverse(
            &mut self,
            coeffs: &Coefficients,
            _wavelet: &str,
            original_len: usize,
        ) -> BackendResult<Vec<f64>> {
            Ok(coeffs
                .approx
                .iter()
                .take(original_len)
                .map(|x| x - self.forward_offset + self.offset)
                .collect())
        }
    }

    fn config(sizes: Vec<usize>, wavelets: &[&str], target_ms: u64) -> RunConfiguration {
        RunOptions {
            sizes,
            wavelets: wavelets.iter().map(|w| w.to_string()).collect(),
            target_duration_ms: target_ms,
            seed: Some(7),
        }
        .validate()
        .unwrap()
    }

    fn orchestrator(backends: Vec<Box<dyn Backend>>) -> Orchestrator {
        Orchestrator::new(backends)
            .unwrap()
            .with_clock(Arc::new(StepClock::new(Duration::from_millis(10))))
    }

    #[tokio::test]
    async fn test_single_combination_progress_is_monotone() {
        let percents = Arc::new(Mutex::new(Vec::new()));
        let seen = percents.clone();
        let mut reporter = MockProgressReporter::new();
        reporter.expect_progress().times(2).returning(|_| ());
        reporter.expect_current_test().times(1).returning(|_| ());
        reporter
            .expect_percent_complete()
            .returning(move |p| seen.lock().unwrap().push(p));

        let mut orchestrator = orchestrator(vec![Box::new(Identity::named("identity"))]);
        let report = orchestrator
            .run(&config(vec![4], &["p"], 50), Environment::new(), &reporter)
            .await
            .unwrap();

        assert_eq!(report.benchmarks.len(), 1);
        let record = &report.benchmarks[0];
        assert_eq!((record.size, record.wavelet.as_str()), (4, "p"));
        let identity = record.get("identity").unwrap();
        assert_eq!(identity.trials.forward, 5);
        assert_eq!(identity.timings.forward, Some(10.0));
        assert_eq!(identity.timings.inverse, Some(10.0));

        let percents = percents.lock().unwrap();
        assert_eq!(percents.first(), Some(&0));
        assert_eq!(percents.last(), Some(&100));
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_records_cover_every_combination_in_order() {
        let mut orchestrator = orchestrator(vec![
            Box::new(Identity::named("a")),
            Box::new(Identity::named("b")),
        ]);
        let report = orchestrator
            .run(&config(vec![8, 16, 32], &["x", "y"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap();

        let keys: Vec<(usize, &str)> = report
            .benchmarks
            .iter()
            .map(|r| (r.size, r.wavelet.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![(8, "x"), (16, "x"), (32, "x"), (8, "y"), (16, "y"), (32, "y")]
        );
        let unique: HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), 6);
        for record in &report.benchmarks {
            let names: Vec<_> = record.implementations.keys().cloned().collect();
            assert_eq!(names, vec!["a", "b"]);
        }
        assert_eq!(report.configuration.sizes, vec![8, 16, 32]);
        assert!(report.info.contains("over 20ms"));
    }

    #[tokio::test]
    async fn test_unsupported_inverse_is_skipped() {
        let forward_only = Identity {
            inverse_supported: false,
            ..Identity::named("forward-only")
        };
        let mut orchestrator = orchestrator(vec![
            Box::new(Identity::named("full")),
            Box::new(forward_only),
        ]);
        let report = orchestrator
            .run(&config(vec![16], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap();

        let result = report.benchmarks[0].get("forward-only").unwrap();
        assert!(result.timings.forward.is_some());
        assert_eq!(result.timings.inverse, None);
        assert_eq!(result.trials.inverse, 0);

        let json = serde_json::to_value(&report.benchmarks[0]).unwrap();
        assert!(json["forward-only"]["timings"]["inverse"].is_null());
    }

    #[tokio::test]
    async fn test_bad_reconstruction_is_fatal() {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let broken = Identity {
            offset: 1e-3,
            shutdowns: shutdowns.clone(),
            ..Identity::named("broken")
        };
        let reference = Identity {
            shutdowns: shutdowns.clone(),
            ..Identity::named("reference")
        };
        let mut orchestrator = orchestrator(vec![Box::new(reference), Box::new(broken)]);
        let err = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap_err();

        match err {
            RunError::Correctness {
                backend,
                wavelet,
                size,
                max_difference,
            } => {
                assert_eq!(backend, "broken");
                assert_eq!(wavelet, "db2");
                assert_eq!(size, 8);
                let difference = max_difference.unwrap();
                assert!((difference - 1e-3).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(shutdowns.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_small_drift_is_accepted() {
        let drifting = Identity {
            offset: 5e-7,
            ..Identity::named("drifting")
        };
        let mut orchestrator = orchestrator(vec![Box::new(drifting)]);
        let report = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap();
        assert_eq!(report.benchmarks.len(), 1);
    }

    #[tokio::test]
    async fn test_drift_is_measured_against_the_input() {
        let first = Identity {
            offset: 9e-7,
            ..Identity::named("first")
        };
        let second = Identity {
            offset: 1.8e-6,
            ..Identity::named("second")
        };
        let mut orchestrator = orchestrator(vec![Box::new(first), Box::new(second)]);
        let err = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap_err();

        match err {
            RunError::Correctness {
                backend,
                max_difference,
                ..
            } => {
                assert_eq!(backend, "second");
                let difference = max_difference.unwrap();
                assert!((difference - 1.8e-6).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_backends_must_agree_with_reference() {
        let high = Identity {
            offset: 8e-7,
            ..Identity::named("high")
        };
        let low = Identity {
            offset: -8e-7,
            ..Identity::named("low")
        };
        let mut orchestrator = orchestrator(vec![Box::new(high), Box::new(low)]);
        let err = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::Correctness { ref backend, .. } if backend == "low"));
    }

    #[tokio::test]
    async fn test_forward_only_output_is_checked_against_reference() {
        let skewed = Identity {
            inverse_supported: false,
            forward_offset: 1e-3,
            ..Identity::named("skewed")
        };
        let mut orchestrator =
            orchestrator(vec![Box::new(Identity::named("full")), Box::new(skewed)]);
        let err = orchestrator
            .run(&config(vec![16], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap_err();

        match err {
            RunError::Correctness {
                backend,
                size,
                max_difference,
                ..
            } => {
                assert_eq!(backend, "skewed");
                assert_eq!(size, 16);
                let difference = max_difference.unwrap();
                assert!((difference - 1e-3).abs() < 1e-9);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_forward_only_backend_first_is_unchecked() {
        let skewed = Identity {
            inverse_supported: false,
            forward_offset: 1e-3,
            ..Identity::named("skewed")
        };
        let mut orchestrator =
            orchestrator(vec![Box::new(skewed), Box::new(Identity::named("full"))]);
        let report = orchestrator
            .run(&config(vec![16], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap();
        assert_eq!(report.benchmarks[0].get("skewed").unwrap().timings.inverse, None);
    }

    #[tokio::test]
    async fn test_operation_failure_aborts_and_shuts_down() {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let failing = Identity {
            fail_forward: true,
            shutdowns: shutdowns.clone(),
            ..Identity::named("failing")
        };
        let mut orchestrator = orchestrator(vec![Box::new(failing)]);
        let err = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunError::Operation {
                operation: Operation::Forward,
                ..
            }
        ));
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_initialization_failure() {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let failing = Identity {
            fail_initialize: true,
            shutdowns: shutdowns.clone(),
            ..Identity::named("cold")
        };
        let mut orchestrator = orchestrator(vec![Box::new(failing)]);
        let err = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap_err();
        assert!(matches!(err, RunError::Initialization { ref backend, .. } if backend == "cold"));
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_initialization_timings_and_versions() {
        let versioned = Identity {
            version: Some("1.2.3"),
            ..Identity::named("versioned")
        };
        let mut environment = Environment::new();
        environment.insert("os".into(), "linux".into());
        let mut orchestrator = orchestrator(vec![Box::new(versioned)]);
        let report = orchestrator
            .run(&config(vec![8], &["db2"], 20), environment, &NoopReporter)
            .await
            .unwrap();

        assert_eq!(report.initialization_timings["versioned"], 10.0);
        assert_eq!(report.system_info[BACKEND_VERSIONS_KEY]["versioned"], "1.2.3");
        assert_eq!(report.system_info["os"], "linux");
    }

    #[tokio::test]
    async fn test_versions_do_not_overwrite_host_metadata() {
        let named_like_host_key = Identity {
            version: Some("9.9"),
            ..Identity::named("os")
        };
        let unversioned = Identity::named("plain");
        let mut environment = Environment::new();
        environment.insert("os".into(), "linux".into());
        let mut orchestrator =
            orchestrator(vec![Box::new(named_like_host_key), Box::new(unversioned)]);
        let report = orchestrator
            .run(&config(vec![8], &["db2"], 20), environment, &NoopReporter)
            .await
            .unwrap();

        assert_eq!(report.system_info["os"], "linux");
        assert_eq!(
            report.system_info[BACKEND_VERSIONS_KEY],
            serde_json::json!({"os": "9.9"})
        );
    }

    #[tokio::test]
    async fn test_no_version_key_without_versions() {
        let mut orchestrator = orchestrator(vec![Box::new(Identity::named("plain"))]);
        let report = orchestrator
            .run(&config(vec![8], &["db2"], 20), Environment::new(), &NoopReporter)
            .await
            .unwrap();
        assert!(!report.system_info.contains_key(BACKEND_VERSIONS_KEY));
    }

    #[test]
    fn test_rejects_bad_backend_sets() {
        assert!(Orchestrator::new(Vec::new()).is_err());
        assert!(Orchestrator::new(vec![
            Box::new(Identity::named("same")),
            Box::new(Identity::named("same")),
        ])
        .is_err());
        assert!(Orchestrator::new(vec![Box::new(Identity::named("size"))]).is_err());
        assert!(Orchestrator::new(vec![Box::new(Identity::named(" "))]).is_err());
    }
}
