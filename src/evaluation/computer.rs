//! Workflow Benchmark Computer
//!
//! Computes the report of a single workflow:
//!
//! `Start -> FetchAnnotations -> Evaluate -> Aggregate -> Serialize -> Done`
//!
//! Fetches for all tools of the workflow run concurrently and are joined
//! before evaluation. No stage aborts the computation because of a single
//! tool; the only errors are an empty workflow and a failed report write.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use log::{debug, info};

use super::timeline::{Stage, StageTimeline};
use crate::benchmark::{evaluate, BenchmarkReport, CATALOG};
use crate::error::{BenchError, Result};
use crate::registry::{MetadataSource, ToolMetadata};
use crate::report::{ReportWriter, ScoringService};
use crate::workflow::Workflow;

/// Identifies the synthesis run a workflow belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub run_id: String,
    pub domain_id: String,
}

impl RunContext {
    pub fn new(run_id: impl Into<String>, domain_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            domain_id: domain_id.into(),
        }
    }

    /// A context with a run ID derived from the current UTC time.
    pub fn generated(domain_id: impl Into<String>) -> Self {
        Self::new(
            Utc::now().format("run_%Y%m%d_%H%M%S").to_string(),
            domain_id,
        )
    }
}

/// A report that has been written.
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub report: BenchmarkReport,
}

/// Computes benchmark reports for workflows.
#[derive(Clone)]
pub struct WorkflowBenchmarkComputer {
    source: Arc<dyn MetadataSource>,
    scoring: Option<ScoringService>,
}

impl WorkflowBenchmarkComputer {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self {
            source,
            scoring: None,
        }
    }

    /// Adds the external scoring service.
    pub fn with_scoring_service(mut self, scoring: ScoringService) -> Self {
        self.scoring = Some(scoring);
        self
    }

    /// Fetches both annotations for every step, in step order.
    pub async fn fetch_metadata(&self, workflow: &Workflow) -> Vec<ToolMetadata> {
        let source = self.source.as_ref();
        join_all(
            workflow
                .steps
                .iter()
                .map(|step| ToolMetadata::fetch(source, &step.tool_id)),
        )
        .await
    }

    /// Computes the report of one workflow.
    ///
    /// # Errors
    ///
    /// [`BenchError::EmptyWorkflow`] if the workflow has no steps.
    pub async fn compute(&self, workflow: &Workflow, run: &RunContext) -> Result<BenchmarkReport> {
        let mut timeline = StageTimeline::new();
        let report = self.compute_report(workflow, run, &mut timeline).await?;
        timeline.enter(Stage::Done);
        debug!("Workflow '{}' stages: {}", workflow.name, timeline.summary());
        Ok(report)
    }

    /// Computes the report of one workflow and hands it to `writer`.
    pub async fn compute_and_write(
        &self,
        workflow: &Workflow,
        run: &RunContext,
        writer: &dyn ReportWriter,
    ) -> Result<WrittenReport> {
        let mut timeline = StageTimeline::new();
        let report = self.compute_report(workflow, run, &mut timeline).await?;

        timeline.enter(Stage::Serialize);
        let path = writer.write(&report).await?;

        timeline.enter(Stage::Done);
        info!(
            "Workflow '{}' benchmarked in {:.2?}",
            workflow.name,
            timeline.elapsed()
        );
        debug!("Workflow '{}' stages: {}", workflow.name, timeline.summary());

        Ok(WrittenReport { path, report })
    }

    async fn compute_report(
        &self,
        workflow: &Workflow,
        run: &RunContext,
        timeline: &mut StageTimeline,
    ) -> Result<BenchmarkReport> {
        if workflow.is_empty() {
            return Err(BenchError::EmptyWorkflow(workflow.name.clone()));
        }

        timeline.enter(Stage::FetchAnnotations);
        let external = async {
            match &self.scoring {
                Some(scoring) => scoring.score(workflow).await,
                None => Vec::new(),
            }
        };
        let (metadata, external_benchmarks) = tokio::join!(self.fetch_metadata(workflow), external);
        debug!(
            "Workflow '{}': fetched metadata for {} steps",
            workflow.name,
            metadata.len()
        );

        timeline.enter(Stage::Evaluate);
        let benchmarks = CATALOG
            .iter()
            .map(|definition| {
                let mut benchmark = evaluate(definition, &metadata);
                for (step, reference) in benchmark.steps.iter_mut().zip(&workflow.steps) {
                    step.description = reference.label.clone();
                }
                benchmark
            })
            .collect();

        timeline.enter(Stage::Aggregate);
        Ok(BenchmarkReport {
            workflow_name: workflow.name.clone(),
            run_id: run.run_id.clone(),
            domain_id: run.domain_id.clone(),
            benchmarks,
            external_benchmarks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::test_support::{cited, tool_entry, StubSource};
    use crate::report::FsReportWriter;
    use crate::workflow::ToolReference;
    use tempfile::tempdir;

    fn run() -> RunContext {
        RunContext::new("run_1", "proteomics")
    }

    #[tokio::test]
    async fn test_failed_tool_keeps_its_step() {
        let source = StubSource::default()
            .with_tool("comet", tool_entry("comet"))
            .with_tool("peptideprophet", tool_entry("peptideprophet"))
            .with_tool("proteinprophet", tool_entry("proteinprophet"));
        let computer = WorkflowBenchmarkComputer::new(Arc::new(source));
        let workflow = Workflow::from_tools(
            "candidate_1",
            ["Comet", "PeptideProphet", "Unlisted", "ProteinProphet"],
        );

        let report = computer.compute(&workflow, &run()).await.unwrap();
        let availability = report.benchmark("bio.tools").unwrap();

        assert_eq!(availability.steps.len(), 4);
        let failed: Vec<_> = availability
            .steps
            .iter()
            .filter(|s| s.desirability == 0.0)
            .collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].tool_id, "Unlisted");
        assert_eq!(failed[0].label, "unavailable");
        assert_eq!(availability.display_value, "3/4");
        assert!((availability.desirability - 0.075).abs() < 1e-12);
    }

    #[tokio::test]
    async fn test_report_follows_catalog_and_step_order() {
        let source = StubSource::default().with_tool("comet", tool_entry("comet"));
        let computer = WorkflowBenchmarkComputer::new(Arc::new(source));
        let workflow = Workflow::from_tools("wf", ["XTandem", "Comet"]);

        let report = computer.compute(&workflow, &run()).await.unwrap();

        assert_eq!(report.benchmarks.len(), CATALOG.len());
        for (benchmark, definition) in report.benchmarks.iter().zip(CATALOG.iter()) {
            assert_eq!(benchmark.definition.title, definition.title);
            let ids: Vec<_> = benchmark.steps.iter().map(|s| s.tool_id.as_str()).collect();
            assert_eq!(ids, vec!["XTandem", "Comet"]);
            assert!((0.0..=1.0).contains(&benchmark.desirability));
        }
        assert_eq!(report.run_id, "run_1");
        assert_eq!(report.domain_id, "proteomics");
    }

    #[tokio::test]
    async fn test_step_labels_become_descriptions() {
        let source = StubSource::default().with_tool("comet", tool_entry("comet"));
        let computer = WorkflowBenchmarkComputer::new(Arc::new(source));
        let mut workflow = Workflow::new("wf");
        workflow.add_step(ToolReference::new("Comet").with_label("database search"));
        workflow.add_step(ToolReference::new("XTandem"));

        let report = computer.compute(&workflow, &run()).await.unwrap();
        for benchmark in &report.benchmarks {
            assert_eq!(benchmark.steps[0].description(), "database search");
            assert_eq!(benchmark.steps[0].tool_id, "Comet");
            assert_eq!(benchmark.steps[1].description(), "XTandem");
        }

        let json = crate::report::to_json(&report).unwrap();
        assert_eq!(
            json["benchmarks"][0]["steps"][0]["description"],
            "database search"
        );
    }

    #[tokio::test]
    async fn test_total_outage_still_reports() {
        let computer = WorkflowBenchmarkComputer::new(Arc::new(StubSource::default()));
        let workflow = Workflow::from_tools("wf", ["a", "b"]);

        let report = computer.compute(&workflow, &run()).await.unwrap();
        for benchmark in &report.benchmarks {
            assert_eq!(benchmark.desirability, 0.0);
            assert_eq!(benchmark.steps.len(), 2);
        }
        assert_eq!(report.benchmark("Citations").unwrap().display_value, "0");
        assert_eq!(report.benchmark("License").unwrap().display_value, "0/2");
    }

    #[tokio::test]
    async fn test_citation_median() {
        let source = StubSource::default()
            .with_metrics("a", cited(0))
            .with_metrics("b", cited(5))
            .with_metrics("c", cited(150));
        let computer = WorkflowBenchmarkComputer::new(Arc::new(source));

        let report = computer
            .compute(&Workflow::from_tools("wf", ["a", "b", "c"]), &run())
            .await
            .unwrap();
        let citations = report.benchmark("Citations").unwrap();
        assert_eq!(citations.display_value, "5");
        assert_eq!(citations.desirability, 0.25);
    }

    #[tokio::test]
    async fn test_repeated_tool_is_fetched_per_step() {
        let source = Arc::new(StubSource::default().with_tool("comet", tool_entry("comet")));
        let computer = WorkflowBenchmarkComputer::new(source.clone());

        let metadata = computer
            .fetch_metadata(&Workflow::from_tools("wf", ["comet", "Comet"]))
            .await;
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata[1].tool.tool_id(), "Comet");
        assert_eq!(source.request_count(), 4);
    }

    #[tokio::test]
    async fn test_empty_workflow_is_rejected() {
        let computer = WorkflowBenchmarkComputer::new(Arc::new(StubSource::default()));
        let result = computer.compute(&Workflow::new("empty"), &run()).await;
        assert!(matches!(result, Err(BenchError::EmptyWorkflow(name)) if name == "empty"));
    }

    #[tokio::test]
    async fn test_compute_and_write() {
        let temp_dir = tempdir().unwrap();
        let writer = FsReportWriter::new(temp_dir.path());
        let source = StubSource::default().with_tool("comet", tool_entry("comet"));
        let computer = WorkflowBenchmarkComputer::new(Arc::new(source));

        let written = computer
            .compute_and_write(&Workflow::from_tools("wf_7", ["comet"]), &run(), &writer)
            .await
            .unwrap();

        assert_eq!(written.path, temp_dir.path().join("run_1").join("wf_7.json"));
        assert!(written.path.exists());
        assert_eq!(written.report.benchmark("Linux").unwrap().display_value, "1/1");
    }

    #[test]
    fn test_generated_run_id() {
        let context = RunContext::generated("genomics");
        assert!(context.run_id.starts_with("run_"));
        assert_eq!(context.domain_id, "genomics");
    }
}
