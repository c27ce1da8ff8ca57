//! Configuration
//!
//! Settings are resolved in this order (highest priority first):
//! 1. Command line options (applied by the binary)
//! 2. `WFBENCH_*` environment variables
//! 3. The YAML file given with `--config`
//! 4. Default values
//!
//! # Example YAML
//!
//! ```yaml
//! endpoints:
//!   tool_registry_url: https://bio.tools/api
//! http:
//!   timeout_secs: 30
//!   max_concurrent_requests: 8
//! max_parallel_workflows: 4
//! dedupe_fetches: true
//! output_dir: /data/benchmarks
//! scoring_service:
//!   host: localhost
//!   port: 4444
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::registry::{HttpSettings, RegistryEndpoints};
use crate::report::ServiceEndpoint;

pub const ENV_TOOL_REGISTRY_URL: &str = "WFBENCH_TOOL_REGISTRY_URL";
pub const ENV_METRICS_REGISTRY_URL: &str = "WFBENCH_METRICS_REGISTRY_URL";
pub const ENV_TIMEOUT_SECS: &str = "WFBENCH_TIMEOUT_SECS";
pub const ENV_MAX_REQUESTS: &str = "WFBENCH_MAX_REQUESTS";
pub const ENV_SCORING_SERVICE: &str = "WFBENCH_SCORING_SERVICE";
pub const ENV_OUTPUT_DIR: &str = "WFBENCH_OUTPUT_DIR";

/// Runtime configuration of a benchmark run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
    pub endpoints: RegistryEndpoints,

    pub http: HttpSettings,

    /// Workflows benchmarked at once
    pub max_parallel_workflows: usize,

    /// Fetch each distinct tool once per run
    pub dedupe_fetches: bool,

    /// Root directory of report files
    pub output_dir: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring_service: Option<ServiceEndpoint>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            endpoints: RegistryEndpoints::default(),
            http: HttpSettings::default(),
            max_parallel_workflows: num_cpus::get(),
            dedupe_fetches: false,
            output_dir: PathBuf::from("benchmarks"),
            scoring_service: None,
        }
    }
}

impl BenchConfig {
    /// Loads defaults, the optional YAML file and environment overrides, then
    /// validates the result.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| {
            BenchError::Config(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Applies `WFBENCH_*` overrides, reading variables through `lookup`.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_TOOL_REGISTRY_URL) {
            self.endpoints.tool_registry_url = url;
        }
        if let Some(url) = lookup(ENV_METRICS_REGISTRY_URL) {
            self.endpoints.metrics_registry_url = url;
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            self.http.timeout_secs = parse_env(ENV_TIMEOUT_SECS, &value)?;
        }
        if let Some(value) = lookup(ENV_MAX_REQUESTS) {
            self.http.max_concurrent_requests = parse_env(ENV_MAX_REQUESTS, &value)?;
        }
        if let Some(value) = lookup(ENV_SCORING_SERVICE) {
            self.scoring_service = Some(value.parse()?);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Rejects settings that would stall or break a run.
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(BenchError::Config("http.timeout_secs cannot be 0".to_string()));
        }
        if self.http.max_concurrent_requests == 0 {
            return Err(BenchError::Config(
                "http.max_concurrent_requests cannot be 0".to_string(),
            ));
        }
        if self.max_parallel_workflows == 0 {
            return Err(BenchError::Config(
                "max_parallel_workflows cannot be 0".to_string(),
            ));
        }
        for (name, url) in [
            ("tool_registry_url", &self.endpoints.tool_registry_url),
            ("metrics_registry_url", &self.endpoints.metrics_registry_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(BenchError::Config(format!(
                    "endpoints.{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(BenchError::Config("output_dir cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| BenchError::Config(format!("{} has invalid value '{}'", key, value)))
}
