// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Layered CLI settings.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`wavebench.toml` in the working directory, or the path given with
//! `--config`), then `WAVEBENCH_*` environment variables. Command-line flags
//! are applied on top by the caller.
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `WAVEBENCH_OUTPUT__DIR=results`. List keys take comma separated values,
//! e.g. `WAVEBENCH_SIZES=1024,4096`.

use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wavebench_benchmarks::config::{
    DEFAULT_SIZES, DEFAULT_TARGET_DURATION_MS, DEFAULT_WAVELETS,
};
use wavebench_benchmarks::io::{ARCHIVE_DIR, OUTPUT_DIR};
use wavebench_benchmarks::RunOptions;

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "wavebench.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "WAVEBENCH";

/// Environment variable that turns archiving on by default.
pub const CI_MARKER: &str = "GITHUB_ACTIONS";

/// Effective settings for a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Data sizes.
    pub sizes: Vec<usize>,
    /// Wavelet ids.
    pub wavelets: Vec<String>,
    /// Target duration per measurement in milliseconds.
    pub target_duration_ms: u64,
    /// Fixed test data seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Backends to run; empty means all.
    pub backends: Vec<String>,
    /// Output locations.
    pub output: OutputSettings,
    /// Logging.
    pub log: LogSettings,
}

/// Where reports go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory for `benchmark.json` and derived files.
    pub dir: PathBuf,
    /// Whether to archive a timestamped copy. Unset follows `GITHUB_ACTIONS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive: Option<bool>,
    /// Archive directory.
    pub archive_dir: PathBuf,
}

/// Log filter and format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human readable text.
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            wavelets: DEFAULT_WAVELETS.iter().map(|w| w.to_string()).collect(),
            target_duration_ms: DEFAULT_TARGET_DURATION_MS,
            seed: None,
            backends: Vec::new(),
            output: OutputSettings::default(),
            log: LogSettings::default(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(OUTPUT_DIR),
            archive: None,
            archive_dir: PathBuf::from(ARCHIVE_DIR),
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from the file and process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(file, None)
    }

    /// Load settings, reading environment overrides from `env` instead of
    /// the process environment when given.
    pub fn load_from(
        file: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Settings::default())?;
        let file = match file {
            Some(path) => File::new(&path.to_string_lossy(), FileFormat::Toml).required(true),
            None => File::new(CONFIG_FILE, FileFormat::Toml).required(false),
        };
        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("sizes")
            .with_list_parse_key("wavelets")
            .with_list_parse_key("backends")
            .try_parsing(true)
            .source(env);

        Config::builder()
            .add_source(defaults)
            .add_source(file)
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Run options for the worker.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            sizes: self.sizes.clone(),
            wavelets: self.wavelets.clone(),
            target_duration_ms: self.target_duration_ms,
            seed: self.seed,
        }
    }

    /// Whether to archive, given the `--archive` flag.
    pub fn archive_enabled(&self, flag: bool) -> bool {
        flag || self
            .output
            .archive
            .unwrap_or_else(|| std::env::var_os(CI_MARKER).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_sources() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let settings = Settings::load_from(Some(&path), env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.output.dir, PathBuf::from("output"));
        assert_eq!(settings.log.level, "warn");
    }

    #[test]
    fn test_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.toml");
        std::fs::write(
            &path,
            r#"
sizes = [1024, 2048]
wavelets = ["haar"]
target_duration_ms = 250

[output]
dir = "results"
archive = true
"#,
        )
        .unwrap();

        let settings = Settings::load_from(
            Some(&path),
            env(&[
                ("WAVEBENCH_TARGET_DURATION_MS", "50"),
                ("WAVEBENCH_OUTPUT__DIR", "elsewhere"),
                ("WAVEBENCH_SEED", "9"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.sizes, vec![1024, 2048]);
        assert_eq!(settings.wavelets, vec!["haar"]);
        assert_eq!(settings.target_duration_ms, 50);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.output.dir, PathBuf::from("elsewhere"));
        assert_eq!(settings.output.archive, Some(true));
        assert!(settings.archive_enabled(false));
    }

    #[test]
    fn test_environment_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        let settings = Settings::load_from(
            Some(&path),
            env(&[
                ("WAVEBENCH_SIZES", "16,32"),
                ("WAVEBENCH_WAVELETS", "db2,db3"),
                ("WAVEBENCH_BACKENDS", "native"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.sizes, vec![16, 32]);
        assert_eq!(settings.wavelets, vec!["db2", "db3"]);
        assert_eq!(settings.backends, vec!["native"]);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(Settings::load_from(Some(&path), env(&[])).is_err());
    }

    #[test]
    fn test_explicit_archive_flag_wins() {
        let mut settings = Settings::default();
        settings.output.archive = Some(false);
        assert!(settings.archive_enabled(true));
        assert!(!settings.archive_enabled(false));
    }

    #[test]
    fn test_run_options_mirror_settings() {
        let settings = Settings {
            seed: Some(3),
            ..Settings::default()
        };
        let options = settings.run_options();
        assert_eq!(options.sizes, settings.sizes);
        assert_eq!(options.seed, Some(3));
    }
}
