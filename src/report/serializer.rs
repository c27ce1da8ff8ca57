//! Report Serialization
//!
//! Renders a [`BenchmarkReport`] in the canonical JSON schema:
//!
//! ```json
//! {
//!   "workflowName": "candidate_1",
//!   "runID": "run_0042",
//!   "domainID": "proteomics",
//!   "benchmarks": [
//!     {
//!       "benchmark_title": "bio.tools",
//!       "benchmark_long_title": "Tools annotated in bio.tools",
//!       "benchmark_description": "...",
//!       "value": "3/4",
//!       "desirability_value": 0.075,
//!       "steps": [{"description": "Comet", "value": "available", "desirability_value": 1.0}]
//!     }
//!   ]
//! }
//! ```
//!
//! Catalog benchmarks come first, in catalog order, followed by any
//! benchmarks returned by the external scoring service, unchanged.

use serde::Serialize;
use serde_json::Value;

use crate::benchmark::{BenchmarkReport, StepResult, WorkflowBenchmark};
use crate::error::Result;

#[derive(Serialize)]
struct ReportDocument<'a> {
    #[serde(rename = "workflowName")]
    workflow_name: &'a str,
    #[serde(rename = "runID")]
    run_id: &'a str,
    #[serde(rename = "domainID")]
    domain_id: &'a str,
    benchmarks: Vec<BenchmarkEntry<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum BenchmarkEntry<'a> {
    Catalog(BenchmarkDocument<'a>),
    External(&'a Value),
}

#[derive(Serialize)]
struct BenchmarkDocument<'a> {
    benchmark_title: &'a str,
    benchmark_long_title: &'a str,
    benchmark_description: &'a str,
    value: &'a str,
    desirability_value: f64,
    steps: Vec<StepDocument<'a>>,
}

#[derive(Serialize)]
struct StepDocument<'a> {
    description: &'a str,
    value: &'a str,
    desirability_value: f64,
}

impl<'a> From<&'a StepResult> for StepDocument<'a> {
    fn from(step: &'a StepResult) -> Self {
        Self {
            description: step.description(),
            value: &step.label,
            desirability_value: step.desirability,
        }
    }
}

impl<'a> From<&'a WorkflowBenchmark> for BenchmarkDocument<'a> {
    fn from(benchmark: &'a WorkflowBenchmark) -> Self {
        Self {
            benchmark_title: benchmark.definition.title,
            benchmark_long_title: benchmark.definition.long_title,
            benchmark_description: benchmark.definition.description,
            value: &benchmark.display_value,
            desirability_value: benchmark.desirability,
            steps: benchmark.steps.iter().map(StepDocument::from).collect(),
        }
    }
}

fn document(report: &BenchmarkReport) -> ReportDocument<'_> {
    let catalog = report
        .benchmarks
        .iter()
        .map(|b| BenchmarkEntry::Catalog(BenchmarkDocument::from(b)));
    let external = report.external_benchmarks.iter().map(BenchmarkEntry::External);

    ReportDocument {
        workflow_name: &report.workflow_name,
        run_id: &report.run_id,
        domain_id: &report.domain_id,
        benchmarks: catalog.chain(external).collect(),
    }
}

/// Renders the report as a JSON value.
pub fn to_json(report: &BenchmarkReport) -> Result<Value> {
    Ok(serde_json::to_value(document(report))?)
}

/// Renders the report as pretty-printed JSON text, keys in schema order.
pub fn to_pretty_string(report: &BenchmarkReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&document(report))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::CATALOG;
    use serde_json::json;

    fn report() -> BenchmarkReport {
        BenchmarkReport {
            workflow_name: "candidate_1".to_string(),
            run_id: "run_1".to_string(),
            domain_id: "proteomics".to_string(),
            benchmarks: vec![WorkflowBenchmark::new(
                CATALOG[0],
                "1/2",
                0.05,
                vec![
                    StepResult::passed("Comet", "available"),
                    StepResult::failed("Mystery", "unavailable"),
                ],
            )],
            external_benchmarks: vec![json!({"benchmark_title": "Runtime", "value": "fast"})],
        }
    }

    #[test]
    fn test_schema() {
        let value = to_json(&report()).unwrap();

        assert_eq!(value["workflowName"], "candidate_1");
        assert_eq!(value["runID"], "run_1");
        assert_eq!(value["domainID"], "proteomics");

        let first = &value["benchmarks"][0];
        assert_eq!(first["benchmark_title"], "bio.tools");
        assert_eq!(first["benchmark_long_title"], "Tools annotated in bio.tools");
        assert_eq!(first["value"], "1/2");
        assert_eq!(first["desirability_value"], 0.05);
        assert_eq!(
            first["steps"][1],
            json!({"description": "Mystery", "value": "unavailable", "desirability_value": 0.0})
        );
    }

    #[test]
    fn test_step_label_is_description() {
        let mut report = report();
        report.benchmarks[0].steps[0].description = Some("database search".to_string());

        let value = to_json(&report).unwrap();
        let steps = &value["benchmarks"][0]["steps"];
        assert_eq!(steps[0]["description"], "database search");
        assert_eq!(steps[1]["description"], "Mystery");
    }

    #[test]
    fn test_external_benchmarks_appended_verbatim() {
        let value = to_json(&report()).unwrap();
        let benchmarks = value["benchmarks"].as_array().unwrap();
        assert_eq!(benchmarks.len(), 2);
        assert_eq!(benchmarks[1], json!({"benchmark_title": "Runtime", "value": "fast"}));
    }

    #[test]
    fn test_pretty_string_keeps_key_order() {
        let text = to_pretty_string(&report()).unwrap();
        let workflow = text.find("workflowName").unwrap();
        let run = text.find("runID").unwrap();
        let benchmarks = text.find("\"benchmarks\"").unwrap();
        assert!(workflow < run && run < benchmarks);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            to_pretty_string(&report()).unwrap(),
            to_pretty_string(&report()).unwrap()
        );
    }
}
