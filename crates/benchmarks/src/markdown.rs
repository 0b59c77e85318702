// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown rendering of a benchmark report.

use crate::result::RunReport;
use std::fmt::Write;

/// Placeholder for a skipped operation.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an optional millisecond value with three decimals.
pub fn format_ms(value: Option<f64>) -> String {
    match value {
        Some(ms) => format!("{ms:.3}"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Results table with one row per record, sorted by size then wavelet.
pub fn generate_table(report: &RunReport) -> String {
    let names = report.implementation_names();
    let mut output = String::new();

    write!(output, "| Size | Wavelet |").unwrap();
    for name in &names {
        write!(output, " {name} Forward (ms) | {name} Inverse (ms) |").unwrap();
    }
    writeln!(output).unwrap();

    write!(output, "|-----:|---------|").unwrap();
    for _ in &names {
        write!(output, "------:|------:|").unwrap();
    }
    writeln!(output).unwrap();

    for record in report.sorted_records() {
        write!(output, "| {} | {} |", record.size, record.wavelet).unwrap();
        for name in &names {
            let result = record.get(name);
            write!(
                output,
                " {} | {} |",
                format_ms(result.and_then(|r| r.timings.forward)),
                format_ms(result.and_then(|r| r.timings.inverse)),
            )
            .unwrap();
        }
        writeln!(output).unwrap();
    }

    output
}

/// Full summary document: configuration, environment, initialization and
/// the results table.
pub fn generate_summary(report: &RunReport) -> String {
    let mut output = String::new();

    writeln!(output, "# Wavelet Benchmark Summary").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "Generated: {}", report.timestamp.to_rfc3339()).unwrap();
    writeln!(output).unwrap();

    let config = &report.configuration;
    writeln!(output, "## Configuration").unwrap();
    writeln!(output).unwrap();
    let sizes: Vec<String> = config.sizes.iter().map(usize::to_string).collect();
    writeln!(output, "- Sizes: {}", sizes.join(", ")).unwrap();
    writeln!(output, "- Wavelets: {}", config.wavelets.join(", ")).unwrap();
    writeln!(output, "- Target duration: {} ms", config.target_duration_ms).unwrap();
    writeln!(output).unwrap();

    if !report.system_info.is_empty() {
        writeln!(output, "## System").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "| Key | Value |").unwrap();
        writeln!(output, "|-----|-------|").unwrap();
        for (key, value) in &report.system_info {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writeln!(output, "| {key} | {value} |").unwrap();
        }
        writeln!(output).unwrap();
    }

    writeln!(output, "## Initialization").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Implementation | Time (ms) |").unwrap();
    writeln!(output, "|----------------|----------:|").unwrap();
    for (name, ms) in &report.initialization_timings {
        writeln!(output, "| {name} | {ms:.3} |").unwrap();
    }
    writeln!(output).unwrap();

    writeln!(output, "## Results").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "{}", report.info).unwrap();
    writeln!(output).unwrap();
    output.push_str(&generate_table(report));

    writeln!(output).unwrap();
    writeln!(output, "---").unwrap();
    writeln!(output, "Total combinations: {}", report.benchmarks.len()).unwrap();

    output
}
