//! Metadata Sources
//!
//! [`MetadataSource`] is the seam between the benchmark computer and the
//! outside world. [`RegistryClient`] is the production implementation backed
//! by the two HTTP registries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::annotation::ToolAnnotation;
use super::http::{HttpSettings, RegistryHttp};
use super::metrics_registry::{MetricsRegistry, DEFAULT_METRICS_REGISTRY_URL};
use super::tool_registry::{ToolRegistry, DEFAULT_TOOL_REGISTRY_URL};
use crate::error::Result;

/// Provider of per-tool annotations.
///
/// Implementations never fail: a missing or unreachable document is returned
/// as [`ToolAnnotation::empty`] tagged with the requested `tool_id`.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Canonical tool metadata (OS support, documentation, identity).
    async fn tool_annotation(&self, tool_id: &str) -> ToolAnnotation;

    /// Usage and impact metrics (license, citations).
    async fn metrics_annotation(&self, tool_id: &str) -> ToolAnnotation;
}

/// Both annotations fetched for one workflow step.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolMetadata {
    pub tool: ToolAnnotation,
    pub metrics: ToolAnnotation,
}

impl ToolMetadata {
    /// Fetches both annotations for a tool concurrently.
    pub async fn fetch<S>(source: &S, tool_id: &str) -> Self
    where
        S: MetadataSource + ?Sized,
    {
        let (tool, metrics) = tokio::join!(
            source.tool_annotation(tool_id),
            source.metrics_annotation(tool_id)
        );
        Self { tool, metrics }
    }

    /// Metadata for a tool whose lookups all failed.
    pub fn empty(tool_id: &str) -> Self {
        Self {
            tool: ToolAnnotation::empty(tool_id),
            metrics: ToolAnnotation::empty(tool_id),
        }
    }
}

/// Registry endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RegistryEndpoints {
    pub tool_registry_url: String,
    pub metrics_registry_url: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            tool_registry_url: DEFAULT_TOOL_REGISTRY_URL.to_string(),
            metrics_registry_url: DEFAULT_METRICS_REGISTRY_URL.to_string(),
        }
    }
}

/// Fetches annotations from the tool registry and the metrics registry.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    tools: ToolRegistry,
    metrics: MetricsRegistry,
}

impl RegistryClient {
    /// Builds a client with its own HTTP layer.
    pub fn new(settings: &HttpSettings, endpoints: &RegistryEndpoints) -> Result<Self> {
        Self::with_http(RegistryHttp::new(settings)?, endpoints)
    }

    /// Builds a client over an existing HTTP layer.
    pub fn with_http(http: RegistryHttp, endpoints: &RegistryEndpoints) -> Result<Self> {
        Ok(Self {
            tools: ToolRegistry::new(http.clone(), &endpoints.tool_registry_url)?,
            metrics: MetricsRegistry::new(http, &endpoints.metrics_registry_url)?,
        })
    }
}

#[async_trait]
impl MetadataSource for RegistryClient {
    async fn tool_annotation(&self, tool_id: &str) -> ToolAnnotation {
        self.tools.fetch(tool_id).await
    }

    async fn metrics_annotation(&self, tool_id: &str) -> ToolAnnotation {
        self.metrics.fetch(tool_id).await
    }
}
