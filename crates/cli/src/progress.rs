// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Terminal progress display for a running benchmark.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use wavebench_benchmarks::ProgressReporter;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>3}% {msg}";

/// Percent bar fed by worker progress messages.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    /// A bar drawn on stderr.
    pub fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        Self::with_bar(bar)
    }

    /// Report into an existing bar.
    pub fn with_bar(bar: ProgressBar) -> Self {
        Self { bar }
    }

    /// Stop the bar, leaving `message` on screen.
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Remove the bar from the terminal.
    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }

    /// Current position in percent.
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Current message.
    pub fn message(&self) -> String {
        self.bar.message()
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarReporter {
    fn progress(&self, text: &str) {
        self.bar.set_message(text.to_string());
    }

    fn current_test(&self, text: &str) {
        self.bar.set_message(text.to_string());
    }

    fn percent_complete(&self, percent: u8) {
        self.bar.set_position(u64::from(percent.min(100)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_follows_messages() {
        let reporter = BarReporter::with_bar(ProgressBar::hidden());
        reporter.progress("Initializing native...");
        assert_eq!(reporter.message(), "Initializing native...");

        reporter.current_test("Testing wavelet haar with size 1024");
        reporter.percent_complete(40);
        assert_eq!(reporter.message(), "Testing wavelet haar with size 1024");
        assert_eq!(reporter.position(), 40);

        reporter.percent_complete(100);
        assert_eq!(reporter.position(), 100);
    }
}
