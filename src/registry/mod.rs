//! Tool Metadata Module
//!
//! Fetches per-tool documents from the tool registry (bio.tools) and the
//! metrics registry (OpenEBench). Every failure is isolated per tool and
//! degrades to an empty annotation.
//!
//! # Components
//!
//! - [`annotation`]: The fetched document, tagged with its tool ID
//! - [`http`]: Shared client, timeouts and request limiting
//! - [`tool_registry`]: Tool registry lookups
//! - [`metrics_registry`]: Two-step metrics registry lookups
//! - [`source`]: The [`MetadataSource`] seam and [`RegistryClient`]
//! - [`cache`]: Optional per-run fetch deduplication

pub mod annotation;
pub mod cache;
pub mod http;
pub mod metrics_registry;
pub mod source;
pub mod tool_registry;

pub use annotation::{ToolAnnotation, TOOL_ID_KEY};
pub use cache::CachedSource;
pub use http::{HttpSettings, RegistryHttp};
pub use metrics_registry::{MetricsRegistry, DEFAULT_METRICS_REGISTRY_URL};
pub use source::{MetadataSource, RegistryClient, RegistryEndpoints, ToolMetadata};
pub use tool_registry::{ToolRegistry, DEFAULT_TOOL_REGISTRY_URL};
