// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! CSV export of a benchmark report.

use crate::result::RunReport;
use std::fmt::Write;

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|ms| format!("{ms:.3}")).unwrap_or_default()
}

/// Render `report` as CSV.
///
/// Columns are `Size`, `Wavelet`, then a forward and inverse column per
/// implementation in name order. Rows follow the report's record order and
/// skipped operations leave the cell empty.
pub fn render(report: &RunReport) -> String {
    let names = report.implementation_names();
    let mut out = String::from("Size,Wavelet");
    for name in &names {
        write!(
            out,
            ",{},{}",
            escape(&format!("{name} Forward (ms)")),
            escape(&format!("{name} Inverse (ms)"))
        )
        .unwrap();
    }
    out.push('\n');

    for record in &report.benchmarks {
        write!(out, "{},{}", record.size, escape(&record.wavelet)).unwrap();
        for name in &names {
            let result = record.get(name);
            write!(
                out,
                ",{},{}",
                format_cell(result.and_then(|r| r.timings.forward)),
                format_cell(result.and_then(|r| r.timings.inverse)),
            )
            .unwrap();
        }
        out.push('\n');
    }
    out
}
