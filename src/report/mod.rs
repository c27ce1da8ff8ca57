//! Report Module
//!
//! Turns computed benchmarks into the canonical JSON report and stores it.
//!
//! # Components
//!
//! - [`serializer`]: Canonical JSON rendering
//! - [`writer`]: [`ReportWriter`] and the filesystem implementation
//! - [`scoring_service`]: Optional external service contributing benchmarks

pub mod scoring_service;
pub mod serializer;
pub mod writer;

pub use scoring_service::{ScoringService, ServiceEndpoint};
pub use serializer::{to_json, to_pretty_string};
pub use writer::{report_path, FsReportWriter, ReportWriter};
