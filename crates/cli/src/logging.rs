// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tracing subscriber setup.

use crate::settings::LogSettings;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count, if it raises the configured level.
pub fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays clean for
/// rendered reports and `--events` output.
///
/// `RUST_LOG` wins over `settings.level`; `-v` wins over both.
pub fn init(settings: &LogSettings, verbose: u8) {
    let filter = match verbosity_directive(verbose) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&settings.level)),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // A subscriber may already be installed by an embedding test harness.
    let _ = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
