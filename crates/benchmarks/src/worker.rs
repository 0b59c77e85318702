// Copyright 2025 Wavebench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Isolated execution of a benchmark run.
//!
//! A run executes on its own OS thread with a private current-thread
//! runtime, so the caller stays responsive while long native loops spin.
//! Communication is one-way: the worker posts [`WorkerMessage`]s, any
//! number of progress events followed by exactly one `complete` or `error`.
//! [`WorkerHandle::terminate`] abandons the run; once it returns, no further
//! message is observed.

use crate::backend::Backend;
use crate::config::RunOptions;
use crate::error::RunError;
use crate::orchestrator::Orchestrator;
use crate::progress::ProgressReporter;
use crate::result::{Environment, RunReport};
use serde::{Deserialize, Serialize};
use std::thread::JoinHandle;
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Name given to the worker thread.
pub const WORKER_THREAD_NAME: &str = "wavebench-worker";

/// Message that starts a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRequest {
    /// Host metadata passed through to the report.
    #[serde(default)]
    pub system_info: Environment,
    /// Run parameters.
    #[serde(flatten)]
    pub options: RunOptions,
}

/// Message posted by the worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum WorkerMessage {
    /// Status text.
    Progress(String),
    /// Label of the combination being measured.
    CurrentTest(String),
    /// Percent of combinations done.
    PercentComplete(u8),
    /// The finished report. Terminal.
    Complete(Box<RunReport>),
    /// Why the run failed. Terminal.
    Error(String),
}

impl WorkerMessage {
    /// Whether this is the last message of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkerMessage::Complete(_) | WorkerMessage::Error(_))
    }

    /// Hand a progress message to `reporter`, or return the outcome carried
    /// by a terminal message.
    pub fn deliver(self, reporter: &dyn ProgressReporter) -> Option<Result<RunReport, WorkerError>> {
        match self {
            WorkerMessage::Progress(text) => reporter.progress(&text),
            WorkerMessage::CurrentTest(text) => reporter.current_test(&text),
            WorkerMessage::PercentComplete(percent) => reporter.percent_complete(percent),
            WorkerMessage::Complete(report) => return Some(Ok(*report)),
            WorkerMessage::Error(message) => return Some(Err(WorkerError::Failed(message))),
        }
        None
    }
}

/// Why a worker did not produce a report.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The run failed; carries the display text of the run error.
    #[error("{0}")]
    Failed(String),

    /// The worker was terminated before it finished.
    #[error("benchmark worker was terminated")]
    Terminated,
}

struct ChannelReporter {
    tx: UnboundedSender<WorkerMessage>,
}

impl ProgressReporter for ChannelReporter {
    fn progress(&self, text: &str) {
        let _ = self.tx.send(WorkerMessage::Progress(text.to_string()));
    }

    fn current_test(&self, text: &str) {
        let _ = self.tx.send(WorkerMessage::CurrentTest(text.to_string()));
    }

    fn percent_complete(&self, percent: u8) {
        let _ = self.tx.send(WorkerMessage::PercentComplete(percent));
    }
}

/// Caller's side of a running worker.
#[derive(Debug)]
pub struct WorkerHandle {
    rx: UnboundedReceiver<WorkerMessage>,
    cancel: CancellationToken,
    thread: JoinHandle<()>,
    terminated: bool,
}

impl WorkerHandle {
    /// Start a run of `backends` on a new thread.
    pub fn spawn(request: WorkerRequest, backends: Vec<Box<dyn Backend>>) -> std::io::Result<Self> {
        let (tx, rx) = unbounded_channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let thread = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        error!(error = %err, "failed to start worker runtime");
                        let _ = tx.send(WorkerMessage::Error(err.to_string()));
                        return;
                    }
                };
                runtime.block_on(run_worker(request, backends, tx, token));
            })?;

        Ok(Self {
            rx,
            cancel,
            thread,
            terminated: false,
        })
    }

    /// Next message, or `None` once the worker is gone or terminated.
    pub async fn recv(&mut self) -> Option<WorkerMessage> {
        if self.terminated {
            return None;
        }
        self.rx.recv().await
    }

    /// Forward progress to `reporter` until the run ends.
    pub async fn finish(mut self, reporter: &dyn ProgressReporter) -> Result<RunReport, WorkerError> {
        while let Some(message) = self.recv().await {
            if let Some(outcome) = message.deliver(reporter) {
                return outcome;
            }
        }
        if self.terminated {
            Err(WorkerError::Terminated)
        } else {
            Err(WorkerError::Failed(
                "benchmark worker exited without a result".to_string(),
            ))
        }
    }

    /// Abandon the run.
    ///
    /// Buffered messages are discarded and nothing sent afterwards is
    /// delivered. The thread exits at the next suspension point of the run.
    /// A native backend's trial loop has none, so the thread can keep
    /// spinning for up to the target duration of each remaining operation
    /// in the current backend measurement before it stops.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        debug!("terminating benchmark worker");
        self.cancel.cancel();
        self.rx.close();
        while self.rx.try_recv().is_ok() {}
        self.terminated = true;
    }

    /// Whether [`WorkerHandle::terminate`] has been called.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Whether the worker thread is still alive.
    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run_worker(
    request: WorkerRequest,
    backends: Vec<Box<dyn Backend>>,
    tx: UnboundedSender<WorkerMessage>,
    cancel: CancellationToken,
) {
    let reporter = ChannelReporter { tx: tx.clone() };
    let outcome = tokio::select! {
        _ = cancel.cancelled() => {
            debug!("benchmark worker cancelled");
            return;
        }
        outcome = execute(request, backends, &reporter) => outcome,
    };
    if cancel.is_cancelled() {
        return;
    }

    let message = match outcome {
        Ok(report) => WorkerMessage::Complete(Box::new(report)),
        Err(err) => WorkerMessage::Error(err.to_string()),
    };
    let _ = tx.send(message);
}

async fn execute(
    request: WorkerRequest,
    backends: Vec<Box<dyn Backend>>,
    reporter: &dyn ProgressReporter,
) -> Result<RunReport, RunError> {
    let config = request.options.validate()?;
    let mut orchestrator = Orchestrator::new(backends)?;
    orchestrator.run(&config, request.system_info, reporter).await
}
