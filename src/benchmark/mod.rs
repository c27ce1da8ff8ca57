//! Benchmark Module
//!
//! Quality criteria, the rules that score each tool against them, and the
//! distributions that aggregate per-tool scores into a workflow score.
//!
//! # Components
//!
//! - [`catalog`]: The fixed list of [`BenchmarkDefinition`]s
//! - [`rules`]: Per-tool scoring rules and per-benchmark aggregation
//! - [`license`]: [`LicenseClass`] and its classification
//! - [`citations`]: Citation count extraction and bucketing
//! - [`distribution`]: Strict/normal distributions and the median
//! - [`model`]: Result types

pub mod catalog;
pub mod citations;
pub mod distribution;
pub mod license;
pub mod model;
pub mod rules;

pub use catalog::{AnnotationSource, BenchmarkDefinition, BenchmarkKind, CATALOG};
pub use distribution::{median, normal, ratio_string, strict, Distribution};
pub use license::LicenseClass;
pub use model::{BenchmarkReport, StepResult, WorkflowBenchmark};
pub use rules::evaluate;
