//! Tool Annotations
//!
//! The semi-structured document a registry returns for one tool. An empty
//! annotation stands for "not found" or "fetch failed" and still carries the
//! tool ID, so every workflow step can be labelled in the report.

use serde_json::{Map, Value};

/// Key under which the tool ID is exported by [`ToolAnnotation::to_value`].
pub const TOOL_ID_KEY: &str = "toolID";

/// Registry document for a single tool.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolAnnotation {
    tool_id: String,
    body: Map<String, Value>,
}

impl ToolAnnotation {
    /// Creates an annotation from a fetched JSON value.
    ///
    /// Non-object documents carry no usable fields and become empty.
    pub fn new(tool_id: impl Into<String>, document: Value) -> Self {
        let body = match document {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            tool_id: tool_id.into(),
            body,
        }
    }

    /// Creates the empty sentinel annotation for a tool.
    pub fn empty(tool_id: impl Into<String>) -> Self {
        Self {
            tool_id: tool_id.into(),
            body: Map::new(),
        }
    }

    /// The tool ID as spelled in the workflow.
    pub fn tool_id(&self) -> &str {
        &self.tool_id
    }

    /// Returns true if the registry returned nothing usable.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Looks up a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    /// Looks up a nested field by key path, e.g. `["project", "license"]`.
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.body.get(*first)?, |value, key| value.get(*key))
    }

    /// Returns a copy labelled with another spelling of the same tool ID.
    pub fn relabeled(&self, tool_id: &str) -> Self {
        Self {
            tool_id: tool_id.to_string(),
            body: self.body.clone(),
        }
    }

    /// Exports the document with the tool ID under [`TOOL_ID_KEY`].
    pub fn to_value(&self) -> Value {
        let mut map = self.body.clone();
        map.insert(TOOL_ID_KEY.to_string(), Value::String(self.tool_id.clone()));
        Value::Object(map)
    }
}
