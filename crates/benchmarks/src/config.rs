// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Run options and their validated form.

use crate::error::RunError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default data sizes.
pub const DEFAULT_SIZES: &[usize] = &[100_000, 1_000_000];

/// Default wavelet ids.
pub const DEFAULT_WAVELETS: &[&str] = &["db2", "db4"];

/// Default target duration per measurement, in milliseconds.
pub const DEFAULT_TARGET_DURATION_MS: u64 = 1000;

fn default_sizes() -> Vec<usize> {
    DEFAULT_SIZES.to_vec()
}

fn default_wavelets() -> Vec<String> {
    DEFAULT_WAVELETS.iter().map(|w| w.to_string()).collect()
}

fn default_target_duration_ms() -> u64 {
    DEFAULT_TARGET_DURATION_MS
}

/// Caller-facing options; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Number of samples in each generated test signal.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Wavelet ids to benchmark.
    #[serde(default = "default_wavelets", alias = "parameterIds")]
    pub wavelets: Vec<String>,
    /// Minimum wall time spent measuring each operation.
    #[serde(default = "default_target_duration_ms")]
    pub target_duration_ms: u64,
    /// Seed for test data; random when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            wavelets: default_wavelets(),
            target_duration_ms: default_target_duration_ms(),
            seed: None,
        }
    }
}

impl RunOptions {
    /// Validate into an immutable [`RunConfiguration`].
    pub fn validate(self) -> Result<RunConfiguration, RunError> {
        RunConfiguration::try_from(self)
    }
}

/// Validated run configuration. Never changes once a run starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfiguration {
    sizes: Vec<usize>,
    wavelets: Vec<String>,
    target_duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

impl RunConfiguration {
    /// Data sizes in iteration order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Wavelet ids in iteration order.
    pub fn wavelets(&self) -> &[String] {
        &self.wavelets
    }

    /// Target duration per measurement.
    pub fn target_duration(&self) -> Duration {
        Duration::from_millis(self.target_duration_ms)
    }

    /// Target duration in milliseconds.
    pub fn target_duration_ms(&self) -> u64 {
        self.target_duration_ms
    }

    /// Test data seed, if fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of (size, wavelet) combinations.
    pub fn combinations(&self) -> usize {
        self.sizes.len() * self.wavelets.len()
    }
}

impl TryFrom<RunOptions> for RunConfiguration {
    type Error = RunError;

    fn try_from(options: RunOptions) -> Result<Self, Self::Error> {
        if options.sizes.is_empty() {
            return Err(RunError::InvalidConfiguration(
                "at least one data size is required".to_string(),
            ));
        }
        if options.sizes.contains(&0) {
            return Err(RunError::InvalidConfiguration(
                "data sizes must be positive".to_string(),
            ));
        }
        if options.wavelets.is_empty() {
            return Err(RunError::InvalidConfiguration(
                "at least one wavelet is required".to_string(),
            ));
        }
        let wavelets: Vec<String> = options
            .wavelets
            .into_iter()
            .map(|w| w.trim().to_string())
            .collect();
        if wavelets.iter().any(String::is_empty) {
            return Err(RunError::InvalidConfiguration(
                "wavelet ids must not be blank".to_string(),
            ));
        }
        if options.target_duration_ms == 0 {
            return Err(RunError::InvalidConfiguration(
                "target duration must be positive".to_string(),
            ));
        }

        Ok(Self {
            sizes: options.sizes,
            wavelets,
            target_duration_ms: options.target_duration_ms,
            seed: options.seed,
        })
    }
}

/// Split a comma separated list, dropping empty entries.
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse comma separated sizes such as `"100000, 1e6"`.
pub fn parse_sizes(input: &str) -> Result<Vec<usize>, RunError> {
    parse_list(input)
        .iter()
        .map(|item| parse_size(item))
        .collect()
}

fn parse_size(item: &str) -> Result<usize, RunError> {
    if let Ok(size) = item.replace('_', "").parse::<usize>() {
        return Ok(size);
    }
    match item.parse::<f64>() {
        Ok(value) if value >= 1.0 && value.fract() == 0.0 && value <= usize::MAX as f64 => {
            Ok(value as usize)
        }
        _ => Err(RunError::InvalidConfiguration(format!(
            "invalid data size: {item}"
        ))),
    }
}
