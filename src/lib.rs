//! wfbench - Design-Time Workflow Quality Benchmarks
//!
//! Scores candidate bioinformatics workflows before they are ever run. For
//! every tool of a workflow, metadata is fetched from the bio.tools registry
//! and the OpenEBench metrics registry; a fixed catalog of criteria is then
//! scored per tool and aggregated into one desirability value per criterion.
//!
//! # Architecture
//!
//! - [`workflow`]: Candidate workflows and run manifests
//! - [`registry`]: Tool and metrics registry lookups
//! - [`benchmark`]: Criteria catalog, scoring rules and distributions
//! - [`evaluation`]: Per-workflow computation and batch runs
//! - [`report`]: JSON reports and the optional external scoring service
//! - [`config`]: Run configuration
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use wfbench::evaluation::{BatchRunner, RunContext, WorkflowBenchmarkComputer};
//! use wfbench::registry::{HttpSettings, RegistryClient, RegistryEndpoints};
//! use wfbench::report::FsReportWriter;
//! use wfbench::load_manifest;
//!
//! #[tokio::main]
//! async fn main() -> wfbench::Result<()> {
//!     let manifest = load_manifest("candidates.yaml")?;
//!
//!     let client = RegistryClient::new(&HttpSettings::default(), &RegistryEndpoints::default())?;
//!     let computer = WorkflowBenchmarkComputer::new(Arc::new(client));
//!
//!     let mut runner = BatchRunner::new(computer, Arc::new(FsReportWriter::new("benchmarks")));
//!     runner.set_max_parallel(4);
//!
//!     let run = RunContext::generated(manifest.domain_id.clone());
//!     let summary = runner.run(&manifest.workflows, &run).await;
//!     println!("{} reports written", summary.succeeded());
//!     Ok(())
//! }
//! ```

pub mod benchmark;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod registry;
pub mod report;
pub mod workflow;

// Re-export commonly used types
pub use benchmark::{BenchmarkReport, CATALOG};
pub use config::BenchConfig;
pub use error::{BenchError, Result};
pub use evaluation::{BatchRunner, RunContext, WorkflowBenchmarkComputer};
pub use workflow::model::{RunManifest, Workflow};
pub use workflow::parser::load_manifest;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "wfbench";
