//! Batch Runner
//!
//! Benchmarks every workflow of a run with bounded parallelism. Workflows
//! are independent: a failure in one is recorded in its outcome and never
//! stops the others. Outcomes are returned in manifest order.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use log::{error, info, warn};

use super::computer::{RunContext, WorkflowBenchmarkComputer, WrittenReport};
use crate::error::{BenchError, Result};
use crate::report::ReportWriter;
use crate::workflow::Workflow;

/// Result of benchmarking one workflow.
#[derive(Debug)]
pub struct WorkflowOutcome {
    pub workflow_name: String,
    pub result: Result<WrittenReport>,
}

impl WorkflowOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Report location, if it was written.
    pub fn path(&self) -> Option<&PathBuf> {
        self.result.as_ref().ok().map(|written| &written.path)
    }
}

/// Outcomes of a whole run.
#[derive(Debug)]
pub struct BatchSummary {
    pub outcomes: Vec<WorkflowOutcome>,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }
}

/// Runs the benchmark computer over many workflows.
pub struct BatchRunner {
    computer: WorkflowBenchmarkComputer,
    writer: Arc<dyn ReportWriter>,
    max_parallel: usize,
}

impl BatchRunner {
    pub fn new(computer: WorkflowBenchmarkComputer, writer: Arc<dyn ReportWriter>) -> Self {
        Self {
            computer,
            writer,
            max_parallel: num_cpus::get(),
        }
    }

    /// Sets how many workflows are computed at once (minimum 1).
    pub fn set_max_parallel(&mut self, max: usize) {
        self.max_parallel = max.max(1);
    }

    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Benchmarks all workflows and writes one report per workflow.
    pub async fn run(&self, workflows: &[Workflow], run: &RunContext) -> BatchSummary {
        let start_time = Instant::now();
        info!(
            "Benchmarking {} workflows for run '{}' (max parallel: {})",
            workflows.len(),
            run.run_id,
            self.max_parallel
        );

        let outcomes: Vec<WorkflowOutcome> = stream::iter(workflows)
            .map(|workflow| self.run_one(workflow, run))
            .buffered(self.max_parallel)
            .collect()
            .await;

        let summary = BatchSummary {
            outcomes,
            elapsed: start_time.elapsed(),
        };
        info!(
            "Run '{}' finished: {} succeeded, {} failed in {:.2?}",
            run.run_id,
            summary.succeeded(),
            summary.failed(),
            summary.elapsed
        );
        summary
    }

    /// Like [`run`](Self::run), but stops as soon as `shutdown` completes.
    ///
    /// In-flight computations are dropped; reports already written stay on
    /// disk.
    pub async fn run_until<F>(
        &self,
        workflows: &[Workflow],
        run: &RunContext,
        shutdown: F,
    ) -> Result<BatchSummary>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = shutdown => {
                warn!("Run '{}' cancelled", run.run_id);
                Err(BenchError::Cancelled)
            }
            summary = self.run(workflows, run) => Ok(summary),
        }
    }

    async fn run_one(&self, workflow: &Workflow, run: &RunContext) -> WorkflowOutcome {
        let result = self
            .computer
            .compute_and_write(workflow, run, self.writer.as_ref())
            .await;

        if let Err(e) = &result {
            error!("Workflow '{}' failed: {}", workflow.name, e);
        }

        WorkflowOutcome {
            workflow_name: workflow.name.clone(),
            result,
        }
    }
}
