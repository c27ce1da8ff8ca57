//! External Scoring Service
//!
//! An optional service that scores the CWL rendition of a workflow. It is
//! called with `POST multipart/form-data {cwl_file}` and may answer with a
//! `benchmarks` array, which is merged into the report unchanged.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, warn};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BenchError, Result};
use crate::workflow::Workflow;

/// `host:port` of the scoring service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub host: String,
    pub port: u16,
}

impl ServiceEndpoint {
    pub fn url(&self) -> String {
        format!("http://{}:{}/", self.host, self.port)
    }
}

impl FromStr for ServiceEndpoint {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        let (host, port) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| BenchError::Config(format!("Expected host:port, got '{}'", s)))?;
        if host.is_empty() {
            return Err(BenchError::Config(format!("Missing host in '{}'", s)));
        }
        let port = port
            .parse()
            .map_err(|_| BenchError::Config(format!("Invalid port in '{}'", s)))?;
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Client for the external scoring service.
#[derive(Debug, Clone)]
pub struct ScoringService {
    client: Client,
    url: String,
}

impl ScoringService {
    pub fn new(endpoint: &ServiceEndpoint, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint.url()))
    }

    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Returns the extra benchmarks for a workflow.
    ///
    /// Workflows without CWL are skipped. Failures are logged and yield no
    /// extra benchmarks.
    pub async fn score(&self, workflow: &Workflow) -> Vec<Value> {
        let Some(cwl) = workflow.cwl.as_ref() else {
            debug!("Workflow '{}' has no CWL; skipping scoring service", workflow.name);
            return Vec::new();
        };

        match self.request(&workflow.name, cwl).await {
            Ok(response) => extract_benchmarks(&workflow.name, response),
            Err(e) => {
                warn!("Scoring service failed for '{}': {}", workflow.name, e);
                Vec::new()
            }
        }
    }

    async fn request(&self, name: &str, cwl: &str) -> Result<Value> {
        let part = Part::bytes(cwl.as_bytes().to_vec()).file_name(format!("{}.cwl", name));
        let form = Form::new().part("cwl_file", part);

        let response = self
            .client
            .post(&self.url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

fn extract_benchmarks(name: &str, mut response: Value) -> Vec<Value> {
    match response.get_mut("benchmarks").map(Value::take) {
        Some(Value::Array(benchmarks)) => {
            debug!(
                "Scoring service returned {} benchmarks for '{}'",
                benchmarks.len(),
                name
            );
            benchmarks
        }
        Some(_) => {
            warn!("Scoring service 'benchmarks' for '{}' is not an array", name);
            Vec::new()
        }
        None => Vec::new(),
    }
}
