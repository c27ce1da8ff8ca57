//! Registry HTTP Plumbing
//!
//! A single `reqwest::Client` with explicit timeouts, shared by both registry
//! fetchers, plus a semaphore that bounds concurrent outbound requests across
//! every workflow of a run.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::{Client, IntoUrl, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::Semaphore;

use crate::error::{BenchError, Result};

/// Why a registry lookup produced no document.
///
/// Never leaves the `registry` module: callers receive an empty annotation.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("registry answered with status {0}")]
    Status(StatusCode),

    #[error("no registry version linked to the tool registry")]
    NoMatchingVersion,

    #[error("request limiter closed")]
    LimiterClosed,
}

/// HTTP client settings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HttpSettings {
    /// Total time allowed for one request, in seconds
    pub timeout_secs: u64,

    /// Time allowed to establish a connection, in seconds
    pub connect_timeout_secs: u64,

    /// Idle connections kept per registry host
    pub pool_max_idle_per_host: usize,

    /// Upper bound on in-flight registry requests
    pub max_concurrent_requests: usize,

    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            connect_timeout_secs: 5,
            pool_max_idle_per_host: 8,
            max_concurrent_requests: 16,
            user_agent: format!("wfbench/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpSettings {
    /// Builds a client honouring these settings.
    pub fn build_client(&self) -> Result<Client> {
        if self.timeout_secs == 0 {
            return Err(BenchError::Config("HTTP timeout must be at least 1 second".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs.max(1)))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .user_agent(self.user_agent.clone())
            .build()?;
        Ok(client)
    }
}

/// Parses a registry base URL. Tool IDs are appended to it as path segments.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| BenchError::Config(format!("Invalid registry URL '{}': {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(BenchError::Config(format!(
            "Registry URL '{}' cannot take a path",
            raw
        )));
    }
    Ok(url)
}

/// Copy of `base` with `segments` appended, each percent-encoded.
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Client plus request limiter, cheap to clone.
#[derive(Debug, Clone)]
pub struct RegistryHttp {
    client: Client,
    limiter: Arc<Semaphore>,
}

impl RegistryHttp {
    /// Creates the shared HTTP layer from settings.
    pub fn new(settings: &HttpSettings) -> Result<Self> {
        if settings.max_concurrent_requests == 0 {
            return Err(BenchError::Config(
                "max_concurrent_requests must be at least 1".to_string(),
            ));
        }
        Ok(Self::with_client(
            settings.build_client()?,
            settings.max_concurrent_requests,
        ))
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client, max_concurrent_requests: usize) -> Self {
        Self {
            client,
            limiter: Arc::new(Semaphore::new(max_concurrent_requests.max(1))),
        }
    }

    /// GETs a URL and decodes the body as JSON.
    ///
    /// The limiter permit is held only for the duration of the request.
    pub async fn get_json<U>(&self, url: U) -> std::result::Result<Value, FetchError>
    where
        U: IntoUrl + Display,
    {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| FetchError::LimiterClosed)?;

        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        Ok(response.json::<Value>().await?)
    }
}
