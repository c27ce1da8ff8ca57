//! Benchmark Results
//!
//! Per-tool outcomes, per-workflow aggregates and the full report of one
//! workflow.

use serde_json::Value;

use super::catalog::BenchmarkDefinition;

/// Outcome of one benchmark for one workflow step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub tool_id: String,
    pub label: String,
    pub desirability: f64,
    /// Display name of the step, from the workflow's step label
    pub description: Option<String>,
}

impl StepResult {
    /// Desirability is clamped to `[0, 1]`.
    pub fn new(tool_id: impl Into<String>, label: impl Into<String>, desirability: f64) -> Self {
        Self {
            tool_id: tool_id.into(),
            label: label.into(),
            desirability: clamp_desirability(desirability),
            description: None,
        }
    }

    /// The step label if one was given, else the tool ID.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.tool_id)
    }

    /// A step that passes a pass/fail rule.
    pub fn passed(tool_id: &str, label: &str) -> Self {
        Self::new(tool_id, label, 1.0)
    }

    /// A step that fails a pass/fail rule.
    pub fn failed(tool_id: &str, label: &str) -> Self {
        Self::new(tool_id, label, 0.0)
    }

    pub fn is_pass(&self) -> bool {
        self.desirability >= 1.0
    }
}

/// One benchmark aggregated over all steps of a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowBenchmark {
    pub definition: BenchmarkDefinition,
    pub display_value: String,
    pub desirability: f64,
    /// One entry per workflow step, in step order
    pub steps: Vec<StepResult>,
}

impl WorkflowBenchmark {
    pub fn new(
        definition: BenchmarkDefinition,
        display_value: impl Into<String>,
        desirability: f64,
        steps: Vec<StepResult>,
    ) -> Self {
        Self {
            definition,
            display_value: display_value.into(),
            desirability: clamp_desirability(desirability),
            steps,
        }
    }
}

/// All benchmarks of one workflow in one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    pub workflow_name: String,
    pub run_id: String,
    pub domain_id: String,
    /// Catalog benchmarks, in catalog order
    pub benchmarks: Vec<WorkflowBenchmark>,
    /// Benchmarks returned verbatim by the external scoring service
    pub external_benchmarks: Vec<Value>,
}

impl BenchmarkReport {
    /// Looks up a catalog benchmark by title.
    pub fn benchmark(&self, title: &str) -> Option<&WorkflowBenchmark> {
        self.benchmarks.iter().find(|b| b.definition.title == title)
    }
}

fn clamp_desirability(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
