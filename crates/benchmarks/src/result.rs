// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Benchmark report types.
//!
//! The serialized form is the persisted `benchmark.json` document. Field
//! names are camelCase and each implementation's results sit next to the
//! `size` and `wavelet` keys of its record.

use crate::config::RunConfiguration;
use crate::timer::TimingSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Opaque host metadata attached to a report.
pub type Environment = BTreeMap<String, serde_json::Value>;

/// Environment key holding `{backend name: version}` for backends that report one.
pub const BACKEND_VERSIONS_KEY: &str = "backends";

/// Metadata describing the current host and build.
pub fn host_environment() -> Environment {
    let mut environment = Environment::new();
    environment.insert("os".into(), std::env::consts::OS.into());
    environment.insert("arch".into(), std::env::consts::ARCH.into());
    environment.insert("family".into(), std::env::consts::FAMILY.into());
    environment.insert("wavebench".into(), env!("CARGO_PKG_VERSION").into());
    environment
}

/// Mean milliseconds per operation; `None` when skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    /// Forward transform mean.
    pub forward: Option<f64>,
    /// Inverse transform mean.
    pub inverse: Option<f64>,
}

/// Trial counts behind each mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialCounts {
    /// Forward trials.
    pub forward: u64,
    /// Inverse trials.
    pub inverse: u64,
}

/// One implementation's results for one (size, wavelet) combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationResult {
    /// Mean times.
    pub timings: Timings,
    /// Trials per mean.
    #[serde(default)]
    pub trials: TrialCounts,
}

impl ImplementationResult {
    /// Combine the forward and inverse samples.
    pub fn from_samples(forward: TimingSample, inverse: TimingSample) -> Self {
        Self {
            timings: Timings {
                forward: forward.mean_ms,
                inverse: inverse.mean_ms,
            },
            trials: TrialCounts {
                forward: forward.trials,
                inverse: inverse.trials,
            },
        }
    }

    /// The forward sample.
    pub fn forward(&self) -> TimingSample {
        TimingSample {
            mean_ms: self.timings.forward,
            trials: self.trials.forward,
        }
    }

    /// The inverse sample.
    pub fn inverse(&self) -> TimingSample {
        TimingSample {
            mean_ms: self.timings.inverse,
            trials: self.trials.inverse,
        }
    }
}

/// Results for one (size, wavelet) combination across all implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Number of samples in the test signal.
    pub size: usize,
    /// Wavelet id.
    pub wavelet: String,
    /// Results keyed by implementation name.
    #[serde(flatten)]
    pub implementations: BTreeMap<String, ImplementationResult>,
}

impl ResultRecord {
    /// Empty record for a combination.
    pub fn new(size: usize, wavelet: impl Into<String>) -> Self {
        Self {
            size,
            wavelet: wavelet.into(),
            implementations: BTreeMap::new(),
        }
    }

    /// Results for one implementation.
    pub fn get(&self, implementation: &str) -> Option<&ImplementationResult> {
        self.implementations.get(implementation)
    }
}

/// Configuration echoed into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfiguration {
    /// Data sizes.
    pub sizes: Vec<usize>,
    /// Wavelet ids.
    pub wavelets: Vec<String>,
    /// Target duration per measurement in milliseconds.
    pub target_duration_ms: u64,
}

impl From<&RunConfiguration> for ReportConfiguration {
    fn from(config: &RunConfiguration) -> Self {
        Self {
            sizes: config.sizes().to_vec(),
            wavelets: config.wavelets().to_vec(),
            target_duration_ms: config.target_duration_ms(),
        }
    }
}

/// Complete output of one successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// When the report was assembled.
    pub timestamp: DateTime<Utc>,
    /// Host and backend metadata.
    pub system_info: Environment,
    /// Parameters of the run.
    pub configuration: ReportConfiguration,
    /// Milliseconds each backend took to initialize.
    pub initialization_timings: BTreeMap<String, f64>,
    /// Human readable note on units.
    pub info: String,
    /// One record per combination, wavelets outer and sizes inner.
    pub benchmarks: Vec<ResultRecord>,
}

impl RunReport {
    /// Every implementation name appearing in any record, sorted.
    pub fn implementation_names(&self) -> BTreeSet<&str> {
        self.benchmarks
            .iter()
            .flat_map(|record| record.implementations.keys().map(String::as_str))
            .collect()
    }

    /// Records ordered by size, then wavelet.
    pub fn sorted_records(&self) -> Vec<&ResultRecord> {
        let mut records: Vec<&ResultRecord> = self.benchmarks.iter().collect();
        records.sort_by(|a, b| a.size.cmp(&b.size).then_with(|| a.wavelet.cmp(&b.wavelet)));
        records
    }
}
