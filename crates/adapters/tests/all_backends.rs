// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::{Arc, Mutex};
use wavebench_adapters::{run_benchmarks, select_backends, BACKEND_NAMES, DIRECT};
use wavebench_benchmarks::{
    host_environment, NoopReporter, ProgressCallbacks, RunError, RunOptions, WorkerHandle,
    WorkerMessage, WorkerRequest, BACKEND_VERSIONS_KEY,
};

fn small_options() -> RunOptions {
    RunOptions {
        sizes: vec![64, 257],
        wavelets: vec!["haar".to_string(), "db4".to_string()],
        target_duration_ms: 2,
        seed: Some(42),
    }
}

#[tokio::test]
async fn every_backend_round_trips_every_combination() {
    let report = run_benchmarks(small_options(), host_environment(), &NoopReporter)
        .await
        .unwrap();

    assert_eq!(report.benchmarks.len(), 4);
    let order: Vec<(usize, &str)> = report
        .benchmarks
        .iter()
        .map(|r| (r.size, r.wavelet.as_str()))
        .collect();
    assert_eq!(order, vec![(64, "haar"), (257, "haar"), (64, "db4"), (257, "db4")]);

    for record in &report.benchmarks {
        assert_eq!(record.implementations.len(), BACKEND_NAMES.len());
        for (name, result) in &record.implementations {
            assert!(result.timings.forward.unwrap() >= 0.0, "{name} forward");
            assert!(result.trials.forward >= 1, "{name} forward trials");
            if name == DIRECT {
                assert_eq!(result.timings.inverse, None);
                assert_eq!(result.trials.inverse, 0);
            } else {
                assert!(result.timings.inverse.is_some(), "{name} inverse");
            }
        }
    }

    for name in BACKEND_NAMES {
        assert!(report.initialization_timings.contains_key(*name));
    }
    let versions = &report.system_info[BACKEND_VERSIONS_KEY];
    assert!(versions.get("native").is_some());
    assert!(versions.get("sandbox").is_some());
    assert!(report.system_info.contains_key("os"));
}

#[tokio::test]
async fn progress_reaches_one_hundred_percent() {
    let percents = Arc::new(Mutex::new(Vec::new()));
    let labels = Arc::new(Mutex::new(Vec::new()));
    let seen_percents = percents.clone();
    let seen_labels = labels.clone();
    let reporter = ProgressCallbacks::new()
        .on_percent_complete(move |p| seen_percents.lock().unwrap().push(p))
        .on_current_test(move |t| seen_labels.lock().unwrap().push(t.to_string()));

    run_benchmarks(small_options(), host_environment(), &reporter)
        .await
        .unwrap();

    let percents = percents.lock().unwrap();
    assert_eq!(percents.first(), Some(&0));
    assert_eq!(percents.last(), Some(&100));
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        labels.lock().unwrap().first().map(String::as_str),
        Some("Testing wavelet haar with size 64")
    );
}

#[tokio::test]
async fn unknown_wavelet_aborts_the_run() {
    let options = RunOptions {
        wavelets: vec!["sym8".to_string()],
        ..small_options()
    };
    let err = run_benchmarks(options, host_environment(), &NoopReporter)
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::Operation { ref backend, .. } if backend == "native"));
}

#[tokio::test]
async fn worker_runs_selected_backends() {
    let backends = select_backends(&["native".to_string(), "sandbox".to_string()]).unwrap();
    let request = WorkerRequest {
        system_info: host_environment(),
        options: small_options(),
    };
    let mut handle = WorkerHandle::spawn(request, backends).unwrap();

    let mut last = None;
    while let Some(message) = handle.recv().await {
        last = Some(message);
    }
    match last {
        Some(WorkerMessage::Complete(report)) => {
            let names: Vec<&str> = report.implementation_names().into_iter().collect();
            assert_eq!(names, vec!["native", "sandbox"]);
        }
        other => panic!("unexpected final message: {other:?}"),
    }
}
