// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Adaptive trial timer.
//!
//! A unit of work is repeated until the elapsed time reaches a target
//! duration, and the mean time per trial is reported. The operation always
//! runs at least once, so a single call that overshoots the target still
//! produces one trial and a finite mean.
//!
//! Time is read through the [`Clock`] trait so the loop can be driven by a
//! deterministic clock in tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Monotonic time source.
pub trait Clock: Send + Sync {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Deterministic clock that advances by a fixed step on every reading.
#[derive(Debug)]
pub struct StepClock {
    step_nanos: u64,
    current_nanos: AtomicU64,
}

impl StepClock {
    /// Create a clock starting at zero.
    pub fn new(step: Duration) -> Self {
        Self {
            step_nanos: step.as_nanos() as u64,
            current_nanos: AtomicU64::new(0),
        }
    }

    /// Number of readings taken so far.
    pub fn readings(&self) -> u64 {
        match self.step_nanos {
            0 => 0,
            step => self.current_nanos.load(Ordering::SeqCst) / step,
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(
            self.current_nanos
                .fetch_add(self.step_nanos, Ordering::SeqCst),
        )
    }
}

/// Mean time per trial for one operation.
///
/// `mean_ms` is absent when the operation was skipped and `trials` is then 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSample {
    /// Mean milliseconds per trial.
    pub mean_ms: Option<f64>,
    /// Number of completed trials.
    pub trials: u64,
}

impl TimingSample {
    /// Sample for an operation that was not run.
    pub const fn skipped() -> Self {
        Self {
            mean_ms: None,
            trials: 0,
        }
    }

    /// Whether the operation was skipped.
    pub fn is_skipped(&self) -> bool {
        self.mean_ms.is_none()
    }
}

/// A timing sample together with the result of the last trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Measured<T> {
    /// Timing over all trials.
    pub sample: TimingSample,
    /// Output of the final trial.
    pub output: T,
}

/// Repeats work until a target duration has elapsed.
#[derive(Clone)]
pub struct TrialTimer {
    target: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TrialTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrialTimer")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl TrialTimer {
    /// Timer reading the system clock.
    pub fn new(target: Duration) -> Self {
        Self::with_clock(target, Arc::new(SystemClock::new()))
    }

    /// Timer reading the given clock.
    pub fn with_clock(target: Duration, clock: Arc<dyn Clock>) -> Self {
        Self { target, clock }
    }

    /// Target duration per measurement.
    pub fn target(&self) -> Duration {
        self.target
    }

    /// The clock this timer reads.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Begin a step-wise measurement.
    ///
    /// Use this when each trial has to be awaited; otherwise prefer
    /// [`TrialTimer::measure`].
    pub fn start(&self) -> TrialRun {
        TrialRun {
            clock: Arc::clone(&self.clock),
            target: self.target,
            start: self.clock.now(),
            elapsed: Duration::ZERO,
            trials: 0,
        }
    }

    /// Run `operation` until the target duration has elapsed.
    ///
    /// The first error aborts the measurement and is returned as-is.
    pub fn measure<T, E, F>(&self, mut operation: F) -> Result<Measured<T>, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut run = self.start();
        loop {
            let output = operation()?;
            if run.record() {
                return Ok(Measured {
                    sample: run.finish(),
                    output,
                });
            }
        }
    }
}

/// An in-progress measurement started by [`TrialTimer::start`].
pub struct TrialRun {
    clock: Arc<dyn Clock>,
    target: Duration,
    start: Duration,
    elapsed: Duration,
    trials: u64,
}

impl TrialRun {
    /// Count one completed trial. Returns `true` once the target is reached.
    pub fn record(&mut self) -> bool {
        self.trials += 1;
        self.elapsed = self.clock.now().saturating_sub(self.start);
        self.elapsed >= self.target
    }

    /// Trials recorded so far.
    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Close the measurement.
    pub fn finish(self) -> TimingSample {
        if self.trials == 0 {
            return TimingSample::skipped();
        }
        TimingSample {
            mean_ms: Some(self.elapsed.as_nanos() as f64 / 1e6 / self.trials as f64),
            trials: self.trials,
        }
    }
}
