//! Evaluation Module
//!
//! Drives benchmark computation: one workflow at a time in
//! [`WorkflowBenchmarkComputer`], a whole run in [`BatchRunner`].
//!
//! # Components
//!
//! - [`computer`]: Per-workflow fetch, evaluation and report assembly
//! - [`batch`]: Bounded-parallel runs with per-workflow failure isolation
//! - [`timeline`]: Stage timings for logging

pub mod batch;
pub mod computer;
pub mod timeline;

#[cfg(test)]
pub(crate) mod test_support;

pub use batch::{BatchRunner, BatchSummary, WorkflowOutcome};
pub use computer::{RunContext, WorkflowBenchmarkComputer, WrittenReport};
pub use timeline::{Stage, StageTimeline};
