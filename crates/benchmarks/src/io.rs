// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reading and writing benchmark reports.

use crate::result::RunReport;
use crate::{csv, markdown};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default output directory.
pub const OUTPUT_DIR: &str = "output";

/// Report file name inside the output directory.
pub const REPORT_FILE: &str = "benchmark.json";

/// Markdown summary file name inside the output directory.
pub const SUMMARY_FILE: &str = "summary.md";

/// CSV file name inside the output directory.
pub const CSV_FILE: &str = "benchmark.csv";

/// Default archive directory.
pub const ARCHIVE_DIR: &str = "benchmark-results/archive";

/// Where and what to write after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    /// Directory receiving the report and derived files.
    pub output_dir: PathBuf,
    /// Directory receiving a timestamped copy of the report, if any.
    pub archive_dir: Option<PathBuf>,
    /// Also write the Markdown summary.
    pub summary: bool,
    /// Also write the CSV export.
    pub csv: bool,
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(OUTPUT_DIR),
            archive_dir: None,
            summary: false,
            csv: false,
        }
    }
}

impl OutputLayout {
    /// Path of the JSON report.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(REPORT_FILE)
    }
}

fn to_io_error(err: serde_json::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err)
}

/// Write `report` as pretty JSON, creating parent directories.
pub fn write_report_json(report: &RunReport, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(to_io_error)?;
    fs::write(path, json)
}

/// Read a report written by [`write_report_json`].
pub fn read_report_json(path: impl AsRef<Path>) -> io::Result<RunReport> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(to_io_error)
}

/// Archive file name for a report taken at `timestamp`.
///
/// The RFC 3339 form with millisecond precision is used, with `:` and `.`
/// replaced so the name is valid on every filesystem.
pub fn archive_file_name(timestamp: &DateTime<Utc>) -> String {
    let stamp = timestamp
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("benchmark-{stamp}.json")
}

/// Copy `report` into `dir` under its archive name.
pub fn write_archive(report: &RunReport, dir: impl AsRef<Path>) -> io::Result<PathBuf> {
    let path = dir.as_ref().join(archive_file_name(&report.timestamp));
    write_report_json(report, &path)?;
    Ok(path)
}

/// Write the Markdown summary.
pub fn write_summary(report: &RunReport, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, markdown::generate_summary(report))
}

/// Write the CSV export.
pub fn write_csv(report: &RunReport, path: impl AsRef<Path>) -> io::Result<()> {
    fs::write(path, csv::render(report))
}

/// Write every output `layout` asks for. Returns the written paths.
pub fn write_all_outputs(report: &RunReport, layout: &OutputLayout) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(&layout.output_dir)?;
    let mut written = Vec::new();

    let report_path = layout.report_path();
    write_report_json(report, &report_path)?;
    written.push(report_path);

    if layout.summary {
        let path = layout.output_dir.join(SUMMARY_FILE);
        write_summary(report, &path)?;
        written.push(path);
    }

    if layout.csv {
        let path = layout.output_dir.join(CSV_FILE);
        write_csv(report, &path)?;
        written.push(path);
    }

    if let Some(dir) = &layout.archive_dir {
        written.push(write_archive(report, dir)?);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::tests::sample_report;

    #[test]
    fn test_report_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(REPORT_FILE);
        let report = sample_report();

        write_report_json(&report, &path).unwrap();
        let loaded = read_report_json(&path).unwrap();

        assert_eq!(loaded.benchmarks, report.benchmarks);
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_archive_file_name() {
        let report = sample_report();
        assert_eq!(
            archive_file_name(&report.timestamp),
            "benchmark-2025-01-02T03-04-05-678Z.json"
        );
    }

    #[test]
    fn test_write_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout {
            output_dir: dir.path().join("output"),
            archive_dir: Some(dir.path().join("archive")),
            summary: true,
            csv: true,
        };

        let written = write_all_outputs(&sample_report(), &layout).unwrap();

        assert_eq!(written.len(), 4);
        assert!(written.iter().all(|p| p.exists()));
        assert_eq!(written[0], layout.report_path());
        assert!(dir
            .path()
            .join("archive/benchmark-2025-01-02T03-04-05-678Z.json")
            .exists());
        let csv = fs::read_to_string(layout.output_dir.join(CSV_FILE)).unwrap();
        assert!(csv.starts_with("Size,Wavelet"));
    }

    #[test]
    fn test_json_only_layout() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout {
            output_dir: dir.path().to_path_buf(),
            ..OutputLayout::default()
        };
        let written = write_all_outputs(&sample_report(), &layout).unwrap();
        assert_eq!(written, vec![dir.path().join(REPORT_FILE)]);
        assert!(!dir.path().join(SUMMARY_FILE).exists());
    }

    #[test]
    fn test_read_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = read_report_json(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
