//! Workflow Definition Module
//!
//! Candidate workflows handed over by the external planner, plus loading and
//! validation.
//!
//! # Structure
//!
//! - [`model`]: Core data structures (ToolReference, Workflow, RunManifest)
//! - [`parser`]: YAML/JSON loading
//! - [`validator`]: Validation rules

pub mod model;
pub mod parser;
pub mod validator;

pub use model::{RunManifest, ToolReference, Workflow};
pub use parser::{load_manifest, parse_manifest};
pub use validator::{
    is_safe_file_stem, validate_manifest, validate_run_id, validate_workflow, ValidationError,
};
