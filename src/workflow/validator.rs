//! Workflow Validation
//!
//! Checks run on a manifest before any benchmark is computed:
//! - Every workflow has at least one tool
//! - Tool IDs are non-empty
//! - Workflow names are non-empty, file-name safe and unique within the run,
//!   ignoring case
//! - A run ID, when given, is file-name safe
//!
//! A workflow that fails here never reaches the benchmark computer.

use std::collections::HashSet;

use log::{debug, info};

use super::model::{RunManifest, Workflow};

/// Validation error types for user-friendly error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    EmptyRun,
    EmptyWorkflow(String),
    EmptyWorkflowName,
    UnsafeWorkflowName(String),
    DuplicateWorkflowName(String),
    EmptyToolId { workflow: String, position: usize },
    UnsafeRunId(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRun => write!(f, "Run contains no workflows"),
            Self::EmptyWorkflow(name) => write!(f, "Workflow '{}' has no steps", name),
            Self::EmptyWorkflowName => write!(f, "Workflow has empty or whitespace-only name"),
            Self::UnsafeWorkflowName(name) => {
                write!(f, "Workflow name '{}' cannot be used as a file name", name)
            }
            Self::DuplicateWorkflowName(name) => write!(f, "Duplicate workflow name: '{}'", name),
            Self::EmptyToolId { workflow, position } => {
                write!(f, "Workflow '{}': step {} has no tool ID", workflow, position + 1)
            }
            Self::UnsafeRunId(run_id) => {
                write!(f, "Run ID '{}' cannot be used as a directory name", run_id)
            }
        }
    }
}

/// Whether `name` can be used as a single path component under the report
/// root: non-blank, no separators, not `.` or `..`.
pub fn is_safe_file_stem(name: &str) -> bool {
    let name = name.trim();
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

/// Checks that a run ID names exactly one directory under the report root.
pub fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if is_safe_file_stem(run_id) {
        Ok(())
    } else {
        Err(ValidationError::UnsafeRunId(run_id.to_string()))
    }
}

/// Validates a single workflow's fields.
pub fn validate_workflow(workflow: &Workflow) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let name = workflow.name.trim();
    if name.is_empty() {
        errors.push(ValidationError::EmptyWorkflowName);
    } else if !is_safe_file_stem(name) {
        errors.push(ValidationError::UnsafeWorkflowName(workflow.name.clone()));
    }

    if workflow.is_empty() {
        errors.push(ValidationError::EmptyWorkflow(workflow.name.clone()));
        return errors;
    }

    for (position, step) in workflow.steps.iter().enumerate() {
        if step.tool_id.trim().is_empty() {
            errors.push(ValidationError::EmptyToolId {
                workflow: workflow.name.clone(),
                position,
            });
        }
    }

    debug!(
        "Workflow '{}': {} steps, {} unique tools",
        workflow.name,
        workflow.len(),
        workflow.unique_tools().len()
    );

    errors
}

/// Validates every workflow of a run.
///
/// All problems are collected and reported together, one per line.
pub fn validate_manifest(manifest: &RunManifest) -> Result<(), String> {
    info!("Validating run with {} workflows", manifest.workflows.len());

    if manifest.workflows.is_empty() {
        return Err(ValidationError::EmptyRun.to_string());
    }

    let mut all_errors = Vec::new();
    if let Some(run_id) = &manifest.run_id {
        if let Err(e) = validate_run_id(run_id) {
            all_errors.push(e);
        }
    }

    // Report files of names differing only in case collide on
    // case-insensitive filesystems
    let mut seen_names: HashSet<String> = HashSet::new();

    for workflow in &manifest.workflows {
        if !seen_names.insert(workflow.name.to_lowercase()) {
            all_errors.push(ValidationError::DuplicateWorkflowName(workflow.name.clone()));
        }
        all_errors.extend(validate_workflow(workflow));
    }

    if !all_errors.is_empty() {
        let error_messages: Vec<String> = all_errors.iter().map(|e| e.to_string()).collect();
        return Err(error_messages.join("\n"));
    }

    Ok(())
}
