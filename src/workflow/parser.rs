//! Workflow Parser
//!
//! Loads candidate workflows from YAML (or JSON, which is valid YAML) files.
//! A file may hold either a full [`RunManifest`] or a single [`Workflow`].

use std::fs;
use std::path::Path;

use log::{debug, info};

use super::model::{RunManifest, Workflow};
use super::validator::validate_manifest;
use crate::error::{BenchError, Result};

/// Loads and validates a run manifest.
///
/// A file containing a single workflow (top-level `name` and `steps`) is
/// accepted too and wrapped in a manifest with no run ID and an empty domain.
///
/// # Example
///
/// ```rust,no_run
/// use wfbench::workflow::load_manifest;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let manifest = load_manifest("run.yaml")?;
///     println!("Loaded {} workflows", manifest.workflows.len());
///     Ok(())
/// }
/// ```
pub fn load_manifest(path: impl AsRef<Path>) -> Result<RunManifest> {
    let path = path.as_ref();
    info!("Loading workflows from: {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| {
        BenchError::InvalidWorkflow(format!(
            "Failed to read workflow file '{}': {}. Check that the file exists and is readable.",
            path.display(),
            e
        ))
    })?;

    debug!("Workflow file loaded ({} bytes)", content.len());

    let manifest = parse_manifest(&content)?;

    info!(
        "Parsed {} workflows (domain: '{}')",
        manifest.workflows.len(),
        manifest.domain_id
    );

    validate_manifest(&manifest).map_err(BenchError::InvalidWorkflow)?;
    Ok(manifest)
}

/// Parses manifest text without touching the filesystem or validating.
pub fn parse_manifest(content: &str) -> Result<RunManifest> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;

    let is_manifest = value
        .as_mapping()
        .map(|m| m.contains_key("workflows"))
        .unwrap_or(false);

    if is_manifest {
        Ok(serde_yaml::from_value(value)?)
    } else {
        let workflow: Workflow = serde_yaml::from_value(value)?;
        Ok(RunManifest {
            run_id: None,
            domain_id: String::new(),
            workflows: vec![workflow],
        })
    }
}
