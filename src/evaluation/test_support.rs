//! In-memory metadata source for evaluation tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::registry::{MetadataSource, ToolAnnotation};

/// Serves fixed documents keyed by lower-case tool ID; unknown tools are
/// "not found".
#[derive(Default)]
pub(crate) struct StubSource {
    tools: HashMap<String, Value>,
    metrics: HashMap<String, Value>,
    requests: AtomicUsize,
}

impl StubSource {
    pub(crate) fn with_tool(mut self, id: &str, document: Value) -> Self {
        self.tools.insert(id.to_lowercase(), document);
        self
    }

    pub(crate) fn with_metrics(mut self, id: &str, document: Value) -> Self {
        self.metrics.insert(id.to_lowercase(), document);
        self
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn lookup(&self, documents: &HashMap<String, Value>, tool_id: &str) -> ToolAnnotation {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match documents.get(&tool_id.to_lowercase()) {
            Some(doc) => ToolAnnotation::new(tool_id, doc.clone()),
            None => ToolAnnotation::empty(tool_id),
        }
    }
}

#[async_trait]
impl MetadataSource for StubSource {
    async fn tool_annotation(&self, tool_id: &str) -> ToolAnnotation {
        self.lookup(&self.tools, tool_id)
    }

    async fn metrics_annotation(&self, tool_id: &str) -> ToolAnnotation {
        self.lookup(&self.metrics, tool_id)
    }
}

/// A tool registry entry supported on Linux and Mac, with documentation.
pub(crate) fn tool_entry(id: &str) -> Value {
    json!({
        "biotoolsID": id,
        "operatingSystem": ["Linux", "Mac"],
        "documentation": [{"url": "https://example.org/docs"}]
    })
}

/// A metrics entry with a single publication cited `count` times.
pub(crate) fn cited(count: u64) -> Value {
    json!({"project": {"publications": [{"entries": [{"cit_count": count}]}]}})
}
