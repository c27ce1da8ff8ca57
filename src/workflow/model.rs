//! Workflow Data Model
//!
//! Candidate workflows as produced by the external planner. A workflow is an
//! ordered list of tool invocations; the order is kept all the way into the
//! benchmark report.
//!
//! # Example YAML Format
//!
//! ```yaml
//! run_id: run_0042
//! domain_id: proteomics
//! workflows:
//!   - name: candidate_1
//!     steps:
//!       - tool: Comet
//!       - tool: PeptideProphet
//!       - tool: ProteinProphet
//!         label: protein inference
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

fn trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

/// One step of a workflow, identified by its tool registry ID.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ToolReference {
    /// Tool registry identifier, in the spelling the planner produced, trimmed
    #[serde(rename = "tool", deserialize_with = "trimmed")]
    pub tool_id: String,

    /// Optional human-readable label for visualization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ToolReference {
    /// Creates a new reference to a tool.
    ///
    /// # Example
    ///
    /// ```
    /// use wfbench::workflow::ToolReference;
    ///
    /// let tool = ToolReference::new("Comet").with_label("database search");
    /// assert_eq!(tool.lookup_id(), "comet");
    /// ```
    pub fn new(tool_id: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into().trim().to_string(),
            label: None,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the ID used for registry lookups (lower case).
    pub fn lookup_id(&self) -> String {
        self.tool_id.to_lowercase()
    }
}

/// A candidate workflow: an ordered sequence of tool invocations.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Workflow {
    /// Workflow name, also used as the report file stem
    pub name: String,

    /// Ordered list of tool invocations
    pub steps: Vec<ToolReference>,

    /// CWL rendition of the workflow, sent to the external scoring service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwl: Option<String>,
}

impl Workflow {
    /// Creates a new empty workflow.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            cwl: None,
        }
    }

    /// Creates a workflow from a list of tool IDs, in order.
    pub fn from_tools<I, S>(name: impl Into<String>, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            steps: tools.into_iter().map(ToolReference::new).collect(),
            cwl: None,
        }
    }

    /// Appends a step.
    pub fn add_step(&mut self, step: ToolReference) {
        self.steps.push(step);
    }

    /// Attaches the CWL document describing this workflow.
    pub fn with_cwl(mut self, cwl: impl Into<String>) -> Self {
        self.cwl = Some(cwl.into());
        self
    }

    /// Returns the unique lookup IDs of the tools used, in first-use order.
    pub fn unique_tools(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.steps
            .iter()
            .map(ToolReference::lookup_id)
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Returns the number of steps in the workflow.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns true if the workflow has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// All candidate workflows of one synthesis run.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunManifest {
    /// Run identifier; generated by the caller when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,

    /// Domain the workflows were synthesized in
    #[serde(default)]
    pub domain_id: String,

    pub workflows: Vec<Workflow>,
}
