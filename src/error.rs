//! Error Types
//!
//! Errors that cross the public API. Registry fetch failures are not part of
//! this enum: they are collapsed into empty annotations inside [`crate::registry`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by wfbench operations.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid workflow: {0}")]
    InvalidWorkflow(String),

    /// A workflow without tools reached the benchmark computer.
    #[error("Workflow '{0}' has no tools; it must be rejected before benchmarking")]
    EmptyWorkflow(String),

    /// A run ID or workflow name that would place a report outside its run
    /// directory.
    #[error("Refusing to write report: '{0}' is not a safe file name")]
    UnsafeReportPath(String),

        #[error("Failed to write report to {path}: {source}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Benchmark run was cancelled")]
    Cancelled,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_workflow_message() {
        let err = BenchError::EmptyWorkflow("wf_1".to_string());
        assert!(err.to_string().contains("'wf_1'"));
    }

    #[test]
    fn test_write_report_keeps_source() {
        use std::error::Error;

        let err = BenchError::WriteReport {
            path: PathBuf::from("/tmp/run/wf.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/run/wf.json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BenchError = io.into();
        assert!(matches!(err, BenchError::Io(_)));
    }
}
