//! Metrics Registry Fetcher
//!
//! Two-step lookup against an OpenEBench-style monitor API:
//!
//! 1. `GET {base}/rest/aggregate?id={tool_id}` (ID form-encoded) lists every
//!    known version of the tool as `[{"tools": [{"@id": url}, ...]}, ...]`.
//! 2. The first version whose URL carries the tool registry marker is
//!    rewritten from `/tool/` to `/metrics/` and fetched.

use log::{debug, warn};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use super::annotation::ToolAnnotation;
use super::http::{join_segments, parse_base_url, FetchError, RegistryHttp};
use crate::error::Result;

/// Default metrics registry base.
pub const DEFAULT_METRICS_REGISTRY_URL: &str = "https://openebench.bsc.es/monitor";

/// URL marker of versions that are linked to the tool registry.
pub const TOOL_REGISTRY_MARKER: &str = "biotools:";

#[derive(Deserialize, Debug)]
struct EntityGroup {
    #[serde(default)]
    tools: Vec<VersionRef>,
}

#[derive(Deserialize, Debug)]
struct VersionRef {
    #[serde(rename = "@id")]
    id: Option<String>,
}

/// Picks the first version URL linked to the tool registry from an aggregate
/// document and converts it to its metrics URL.
pub fn metrics_url_from_aggregate(aggregate: &Value) -> Option<String> {
    let groups: Vec<EntityGroup> = serde_json::from_value(aggregate.clone()).ok()?;
    groups
        .into_iter()
        .flat_map(|group| group.tools)
        .filter_map(|version| version.id)
        .find(|url| url.contains(TOOL_REGISTRY_MARKER))
        .map(|url| url.replacen("/tool/", "/metrics/", 1))
}

/// Fetches usage and impact metrics.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    http: RegistryHttp,
    base_url: Url,
}

impl MetricsRegistry {
    pub fn new(http: RegistryHttp, base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            http,
            base_url: parse_base_url(base_url.as_ref())?,
        })
    }

    /// URL of the aggregate listing for a tool.
    pub fn aggregate_url(&self, tool_id: &str) -> Url {
        let mut url = join_segments(&self.base_url, &["rest", "aggregate"]);
        url.query_pairs_mut().append_pair("id", &tool_id.to_lowercase());
        url
    }

    /// Fetches the detailed metrics annotation for a tool.
    ///
    /// Any failure, including a tool with no registry-linked version, yields
    /// an empty annotation tagged with `tool_id`.
    pub async fn fetch(&self, tool_id: &str) -> ToolAnnotation {
        match self.try_fetch(tool_id).await {
            Ok(document) => {
                debug!("Metrics registry returned a document for '{}'", tool_id);
                ToolAnnotation::new(tool_id, document)
            }
            Err(FetchError::NoMatchingVersion) => {
                debug!("No registry-linked metrics version for '{}'", tool_id);
                ToolAnnotation::empty(tool_id)
            }
            Err(e) => {
                warn!("Metrics registry lookup for '{}' failed: {}", tool_id, e);
                ToolAnnotation::empty(tool_id)
            }
        }
    }

    async fn try_fetch(&self, tool_id: &str) -> std::result::Result<Value, FetchError> {
        let aggregate = self.http.get_json(self.aggregate_url(tool_id)).await?;
        let metrics_url =
            metrics_url_from_aggregate(&aggregate).ok_or(FetchError::NoMatchingVersion)?;
        self.http.get_json(metrics_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::http::HttpSettings;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, MetricsRegistry) {
        let server = MockServer::start().await;
        let http = RegistryHttp::new(&HttpSettings::default()).unwrap();
        let registry = MetricsRegistry::new(http, server.uri()).unwrap();
        (server, registry)
    }

    #[test]
    fn test_metrics_url_picks_marked_version() {
        let aggregate = json!([
            {"tools": [
                {"@id": "https://host/monitor/tool/bioconda:comet:2019/cmd"},
                {"@id": "https://host/monitor/tool/biotools:comet:2019/cmd"}
            ]}
        ]);
        assert_eq!(
            metrics_url_from_aggregate(&aggregate).as_deref(),
            Some("https://host/monitor/metrics/biotools:comet:2019/cmd")
        );
    }

    #[test]
    fn test_aggregate_url_encodes_id() {
        let http = RegistryHttp::new(&HttpSettings::default()).unwrap();
        let registry = MetricsRegistry::new(http, DEFAULT_METRICS_REGISTRY_URL).unwrap();
        assert_eq!(
            registry.aggregate_url("Comet").as_str(),
            "https://openebench.bsc.es/monitor/rest/aggregate?id=comet"
        );
        assert_eq!(
            registry.aggregate_url("A&b=c#d").as_str(),
            "https://openebench.bsc.es/monitor/rest/aggregate?id=a%26b%3Dc%23d"
        );
    }

    #[tokio::test]
    async fn test_reserved_characters_stay_in_id() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/aggregate"))
            .and(query_param("id", "a&b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        assert!(registry.fetch("A&b").await.is_empty());
    }

    #[test]
    fn test_metrics_url_without_marker() {
        let aggregate = json!([{"tools": [{"@id": "https://host/monitor/tool/bioconda:x/cmd"}]}]);
        assert!(metrics_url_from_aggregate(&aggregate).is_none());
    }

    #[test]
    fn test_metrics_url_malformed_aggregate() {
        assert!(metrics_url_from_aggregate(&json!({"tools": []})).is_none());
        assert!(metrics_url_from_aggregate(&json!([{"other": 1}])).is_none());
        assert!(metrics_url_from_aggregate(&json!([{"tools": [{"name": "x"}]}])).is_none());
    }

    #[tokio::test]
    async fn test_two_step_fetch() {
        let (server, registry) = setup().await;
        let version = format!("{}/tool/biotools:comet:2019_01/cmd/comet", server.uri());

        Mock::given(method("GET"))
            .and(path("/rest/aggregate"))
            .and(query_param("id", "comet"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"tools": [{"@id": version}]}])),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/metrics/biotools:comet:2019_01/cmd/comet"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"project": {"license": {"osi": true, "open_source": true}}}),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let annotation = registry.fetch("Comet").await;
        assert_eq!(annotation.tool_id(), "Comet");
        assert_eq!(
            annotation.get_path(&["project", "license", "osi"]),
            Some(&json!(true))
        );
    }

    #[tokio::test]
    async fn test_no_matching_version_is_empty() {
        let (server, registry) = setup().await;

        Mock::given(method("GET"))
            .and(path("/rest/aggregate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let annotation = registry.fetch("comet").await;
        assert!(annotation.is_empty());
        assert_eq!(annotation.tool_id(), "comet");
    }

    #[tokio::test]
    async fn test_detail_failure_is_empty() {
        let (server, registry) = setup().await;
        let version = format!("{}/tool/biotools:comet/cmd", server.uri());

        Mock::given(method("GET"))
            .and(path("/rest/aggregate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"tools": [{"@id": version}]}])),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/metrics/biotools:comet/cmd"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(registry.fetch("comet").await.is_empty());
    }
}
