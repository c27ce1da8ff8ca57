//! Tool Registry Fetcher
//!
//! Single GET per tool against a bio.tools-style API:
//! `GET {base}/{tool_id}?format=json`, with the lower-cased ID percent-encoded
//! as one path segment.

use log::{debug, warn};
use reqwest::{StatusCode, Url};

use super::annotation::ToolAnnotation;
use super::http::{join_segments, parse_base_url, FetchError, RegistryHttp};
use crate::error::Result;

/// Default tool registry API base.
pub const DEFAULT_TOOL_REGISTRY_URL: &str = "https://bio.tools/api";

/// Fetches canonical tool metadata.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    http: RegistryHttp,
    base_url: Url,
}

impl ToolRegistry {
    pub fn new(http: RegistryHttp, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url.as_ref())?,
        })
    }

    /// URL of the document for a tool.
    pub fn tool_url(&self, tool_id: &str) -> Url {
        let mut url = join_segments(&self.base_url, &[&tool_id.to_lowercase()]);
        url.query_pairs_mut().append_pair("format", "json");
        url
    }

    /// Fetches the annotation for a tool.
    ///
    /// Any failure yields an empty annotation tagged with `tool_id`.
    pub async fn fetch(&self, tool_id: &str) -> ToolAnnotation {
        match self.http.get_json(self.tool_url(tool_id)).await {
            Ok(document) => {
                debug!("Tool registry returned a document for '{}'", tool_id);
                ToolAnnotation::new(tool_id, document)
            }
            Err(FetchError::Status(StatusCode::NOT_FOUND)) => {
                warn!("Tool '{}' not found in tool registry", tool_id);
                ToolAnnotation::empty(tool_id)
            }
            Err(e) => {
                warn!("Tool registry lookup for '{}' failed: {}", tool_id, e);
                ToolAnnotation::empty(tool_id)
            }
        }
    }
}
