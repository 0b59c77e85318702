// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Wavebench CLI entry point.

use colored::Colorize;

#[tokio::main]
async fn main() {
    if let Err(e) = wavebench_cli::run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
