// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for Wavebench.
//!
//! This crate provides the `wavebench` command: running benchmarks through
//! the isolated worker, rendering stored reports and inspecting settings.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod logging;
pub mod progress;
pub mod settings;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use progress::BarReporter;
use settings::Settings;
use std::path::PathBuf;
use tracing::{debug, info};
use wavebench_adapters::{select_backends, BACKEND_NAMES};
use wavebench_benchmarks::config::{parse_list, parse_sizes};
use wavebench_benchmarks::io::{read_report_json, write_all_outputs, OutputLayout};
use wavebench_benchmarks::{
    csv, host_environment, markdown, NoopReporter, ProgressReporter, RunReport, WorkerHandle,
    WorkerRequest,
};

/// Wavebench CLI.
#[derive(Parser, Debug)]
#[command(name = "wavebench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ./wavebench.toml if present).
    #[arg(short, long, global = true, env = "WAVEBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmark and write results.
    ///
    /// The report is written to <output>/benchmark.json, together with
    /// summary.md and benchmark.csv depending on --format. Interrupting the
    /// run with Ctrl-C writes nothing.
    Run(RunArgs),

    /// Render a stored report.
    Report {
        /// Path to a benchmark.json file.
        file: PathBuf,

        /// Rendering.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Markdown)]
        format: ReportFormat,
    },

    /// List supported wavelet ids.
    Wavelets,

    /// Show version, backends and effective settings.
    Status {
        /// Print the full effective settings.
        #[arg(short, long)]
        detailed: bool,
    },
}

/// Flags of `wavebench run`. Each one overrides the loaded settings.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Comma separated data sizes, e.g. "100000,1e6".
    #[arg(long)]
    pub sizes: Option<String>,

    /// Comma separated wavelet ids.
    #[arg(long)]
    pub wavelets: Option<String>,

    /// Target duration per measurement in milliseconds.
    #[arg(long = "target-ms")]
    pub target_ms: Option<u64>,

    /// Seed for the test signals.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Comma separated backend names (default: all).
    #[arg(long)]
    pub backends: Option<String>,

    /// Output directory override.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Files to write next to benchmark.json.
    #[arg(short, long, value_enum, env = "WAVEBENCH_FORMAT", default_value_t = OutputFormat::All)]
    pub format: OutputFormat,

    /// Archive a timestamped copy of the report.
    #[arg(long)]
    pub archive: bool,

    /// Stream worker messages to stdout as JSON lines instead of a progress bar.
    #[arg(long)]
    pub events: bool,
}

/// Outputs of a run. The JSON report is always written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// benchmark.json only.
    Json,
    /// Plus summary.md.
    Markdown,
    /// Plus benchmark.csv.
    Csv,
    /// Plus summary.md and benchmark.csv.
    #[default]
    All,
}

impl OutputFormat {
    /// Whether summary.md is written.
    pub fn summary(self) -> bool {
        matches!(self, OutputFormat::Markdown | OutputFormat::All)
    }

    /// Whether benchmark.csv is written.
    pub fn csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::All)
    }
}

/// Renderings of a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Markdown summary.
    Markdown,
    /// CSV table.
    Csv,
}

impl RunArgs {
    /// Apply the flags on top of `settings`.
    pub fn apply(&self, settings: &mut Settings) -> Result<()> {
        if let Some(sizes) = &self.sizes {
            settings.sizes = parse_sizes(sizes)?;
        }
        if let Some(wavelets) = &self.wavelets {
            settings.wavelets = parse_list(wavelets);
        }
        if let Some(target_ms) = self.target_ms {
            settings.target_duration_ms = target_ms;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(backends) = &self.backends {
            settings.backends = parse_list(backends);
        }
        if let Some(output) = &self.output {
            settings.output.dir = output.clone();
        }
        Ok(())
    }

    /// Output layout for `settings` and these flags.
    pub fn layout(&self, settings: &Settings) -> OutputLayout {
        OutputLayout {
            output_dir: settings.output.dir.clone(),
            archive_dir: settings
                .archive_enabled(self.archive)
                .then(|| settings.output.archive_dir.clone()),
            summary: self.format.summary(),
            csv: self.format.csv(),
        }
    }
}

/// Parse the command line and run it.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails.
pub async fn run() -> Result<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();
    execute(Cli::parse()).await
}

/// Run a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    if let Commands::Run(args) = &cli.command {
        args.apply(&mut settings)?;
    }
    logging::init(&settings.log, cli.verbose);
    debug!(?settings, "effective settings");

    match cli.command {
        Commands::Run(args) => run_command(&settings, &args).await,
        Commands::Report { file, format } => {
            let report = read_report_json(&file)
                .with_context(|| format!("failed to read report {}", file.display()))?;
            print!("{}", render_report(&report, format));
            Ok(())
        }
        Commands::Wavelets => {
            for id in wavebench_core::wavelet::SUPPORTED {
                println!("{id}");
            }
            Ok(())
        }
        Commands::Status { detailed } => {
            println!("{}", "Wavebench".bold());
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Backends: {}", BACKEND_NAMES.join(", "));
            println!("Output: {}", settings.output.dir.display());
            println!("Archive: {}", settings.output.archive_dir.display());

            if detailed {
                let rendered = toml::to_string_pretty(&settings)
                    .context("failed to render settings")?;
                println!("\nEffective settings:\n{rendered}");
            }
            Ok(())
        }
    }
}

/// Render a stored report.
pub fn render_report(report: &RunReport, format: ReportFormat) -> String {
    match format {
        ReportFormat::Markdown => markdown::generate_summary(report),
        ReportFormat::Csv => csv::render(report),
    }
}

async fn run_command(settings: &Settings, args: &RunArgs) -> Result<()> {
    let backends = select_backends(&settings.backends)?;
    let request = WorkerRequest {
        system_info: host_environment(),
        options: settings.run_options(),
    };
    info!(
        sizes = ?request.options.sizes,
        wavelets = ?request.options.wavelets,
        backends = backends.len(),
        "starting benchmark"
    );
    let handle = WorkerHandle::spawn(request, backends).context("failed to start benchmark worker")?;

    let report = if args.events {
        drive(handle, &NoopReporter, true).await?
    } else {
        let bar = BarReporter::new();
        let outcome = drive(handle, &bar, false).await;
        match &outcome {
            Ok(_) => bar.finish("Done"),
            Err(_) => bar.clear(),
        }
        outcome?
    };

    let layout = args.layout(settings);
    let written = write_all_outputs(&report, &layout).context("failed to write results")?;

    if !args.events {
        println!(
            "{} Completed {} combinations",
            "✓".green().bold(),
            report.benchmarks.len()
        );
        for path in &written {
            println!("  - {}", path.display());
        }
    }
    Ok(())
}

/// Pump worker messages until the run ends or Ctrl-C is pressed.
async fn drive(
    mut handle: WorkerHandle,
    reporter: &dyn ProgressReporter,
    events: bool,
) -> Result<RunReport> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                handle.terminate();
                bail!("benchmark interrupted, no results were written");
            }
            message = handle.recv() => {
                let Some(message) = message else {
                    bail!("benchmark worker exited without a result");
                };
                if events {
                    println!("{}", serde_json::to_string(&message)?);
                }
                if let Some(outcome) = message.deliver(reporter) {
                    return outcome.map_err(Into::into);
                }
            }
        }
    }
}
