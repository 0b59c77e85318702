// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Progress events emitted while a run is in flight.

/// Receives discrete progress events from the orchestrator.
///
/// Implementations must be cheap; they are called from inside the
/// measurement loop between combinations.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressReporter: Send + Sync {
    /// Free-form status text such as `"Initializing native..."`.
    fn progress(&self, text: &str);

    /// Label of the combination about to be measured.
    fn current_test(&self, text: &str);

    /// Integer percentage of combinations completed, 0 to 100.
    fn percent_complete(&self, percent: u8);
}

/// Discards every event. Used for unattended runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn progress(&self, _text: &str) {}
    fn current_test(&self, _text: &str) {}
    fn percent_complete(&self, _percent: u8) {}
}

type TextCallback = Box<dyn Fn(&str) + Send + Sync>;
type PercentCallback = Box<dyn Fn(u8) + Send + Sync>;

/// Reporter built from optional closures; missing callbacks are ignored.
#[derive(Default)]
pub struct ProgressCallbacks {
    on_progress: Option<TextCallback>,
    on_current_test: Option<TextCallback>,
    on_percent_complete: Option<PercentCallback>,
}

impl ProgressCallbacks {
    /// Reporter with no callbacks set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the status text callback.
    pub fn on_progress(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Set the current test callback.
    pub fn on_current_test(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_current_test = Some(Box::new(f));
        self
    }

    /// Set the percent callback.
    pub fn on_percent_complete(mut self, f: impl Fn(u8) + Send + Sync + 'static) -> Self {
        self.on_percent_complete = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for ProgressCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressCallbacks")
            .field("on_progress", &self.on_progress.is_some())
            .field("on_current_test", &self.on_current_test.is_some())
            .field("on_percent_complete", &self.on_percent_complete.is_some())
            .finish()
    }
}

impl ProgressReporter for ProgressCallbacks {
    fn progress(&self, text: &str) {
        if let Some(f) = &self.on_progress {
            f(text);
        }
    }

    fn current_test(&self, text: &str) {
        if let Some(f) = &self.on_current_test {
            f(text);
        }
    }

    fn percent_complete(&self, percent: u8) {
        if let Some(f) = &self.on_percent_complete {
            f(percent);
        }
    }
}

/// Percentage of `completed` out of `total`, rounded to the nearest integer.
pub fn percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let value = (completed as f64 / total as f64 * 100.0).round();
    value.clamp(0.0, 100.0) as u8
}
