//! Report Writing
//!
//! Reports are stored as `{root}/{run_id}/{workflow_name}.json`. Each workflow
//! of a run writes its own file, so concurrent writers never contend. Run IDs
//! and workflow names must each be a single safe path component.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::info;

use super::serializer::to_pretty_string;
use crate::benchmark::BenchmarkReport;
use crate::error::{BenchError, Result};
use crate::workflow::is_safe_file_stem;

/// Destination for finished reports.
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Stores the report and returns where it went.
    async fn write(&self, report: &BenchmarkReport) -> Result<PathBuf>;
}

/// Location of a report file.
pub fn report_path(root: &Path, run_id: &str, workflow_name: &str) -> PathBuf {
    root.join(run_id).join(format!("{}.json", workflow_name))
}

/// Writes reports as pretty-printed JSON files.
#[derive(Debug, Clone)]
pub struct FsReportWriter {
    root: PathBuf,
}

impl FsReportWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ReportWriter for FsReportWriter {
    async fn write(&self, report: &BenchmarkReport) -> Result<PathBuf> {
        for component in [&report.run_id, &report.workflow_name] {
            if !is_safe_file_stem(component) {
                return Err(BenchError::UnsafeReportPath(component.clone()));
            }
        }

        let path = report_path(&self.root, &report.run_id, &report.workflow_name);
        let json = to_pretty_string(report)?;

        let write_error = |source| BenchError::WriteReport {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        tokio::fs::write(&path, json).await.map_err(write_error)?;

        info!("Saved benchmark report to {}", path.display());
        Ok(path)
    }
}
