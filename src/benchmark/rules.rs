//! Scoring Rules
//!
//! Pure functions from fetched annotations to per-step results, and the
//! aggregation of those results into one [`WorkflowBenchmark`]. A missing or
//! malformed field never fails a rule; it scores 0.

use log::warn;
use serde_json::Value;

use super::catalog::{AnnotationSource, BenchmarkDefinition, BenchmarkKind};
use super::citations::{citation_count, citation_desirability, UNKNOWN_CITATIONS};
use super::distribution::{median, ratio_string, Distribution};
use super::license::LicenseClass;
use super::model::{StepResult, WorkflowBenchmark};
use crate::registry::{ToolAnnotation, ToolMetadata};

/// Passes when the tool has a registry record with `identity_field`.
pub fn availability(annotation: &ToolAnnotation, identity_field: &str) -> StepResult {
    let tool_id = annotation.tool_id();
    let has_identity = annotation
        .get(identity_field)
        .is_some_and(|value| !value.is_null());

    if !annotation.is_empty() && has_identity {
        StepResult::passed(tool_id, "available")
    } else {
        if !annotation.is_empty() {
            warn!("Tool '{}': record has no '{}' field", tool_id, identity_field);
        }
        StepResult::failed(tool_id, "unavailable")
    }
}

/// Passes when `field` exists and is not null.
pub fn field_presence(annotation: &ToolAnnotation, field: &str) -> StepResult {
    let tool_id = annotation.tool_id();
    match annotation.get(field) {
        Some(value) if !value.is_null() => StepResult::passed(tool_id, "available"),
        _ => {
            if !annotation.is_empty() {
                warn!("Tool '{}': field '{}' is missing", tool_id, field);
            }
            StepResult::failed(tool_id, "not available")
        }
    }
}

/// Passes when `field` is an array containing the string `expected`.
pub fn field_match(annotation: &ToolAnnotation, field: &str, expected: &str) -> StepResult {
    let tool_id = annotation.tool_id();
    let supported = match annotation.get(field) {
        Some(Value::Array(values)) => values.iter().any(|v| v.as_str() == Some(expected)),
        Some(other) => {
            warn!(
                "Tool '{}': field '{}' is not an array ({})",
                tool_id, field, other
            );
            false
        }
        None => {
            if !annotation.is_empty() {
                warn!("Tool '{}': field '{}' is missing", tool_id, field);
            }
            false
        }
    };

    if supported {
        StepResult::passed(tool_id, "supported")
    } else {
        StepResult::failed(tool_id, "not supported")
    }
}

/// Scores the license class of a tool.
pub fn license(annotation: &ToolAnnotation) -> (StepResult, LicenseClass) {
    let class = LicenseClass::classify(annotation);
    if class == LicenseClass::Unknown && !annotation.is_empty() {
        warn!("Tool '{}': no readable license information", annotation.tool_id());
    }
    let step = StepResult::new(annotation.tool_id(), class.label(), class.desirability());
    (step, class)
}

/// Scores the citation count of a tool; `None` when it cannot be read.
pub fn citations(annotation: &ToolAnnotation) -> (StepResult, Option<u64>) {
    let tool_id = annotation.tool_id();
    match citation_count(annotation) {
        Some(count) => (
            StepResult::new(tool_id, count.to_string(), citation_desirability(count)),
            Some(count),
        ),
        None => {
            if !annotation.is_empty() {
                warn!("Tool '{}': publication citations are malformed", tool_id);
            }
            (StepResult::failed(tool_id, UNKNOWN_CITATIONS), None)
        }
    }
}

/// Evaluates one benchmark over the metadata of every workflow step.
///
/// `metadata` holds one entry per step, in step order, and must not be empty.
pub fn evaluate(definition: &BenchmarkDefinition, metadata: &[ToolMetadata]) -> WorkflowBenchmark {
    let length = metadata.len();
    let annotations = metadata.iter().map(|m| match definition.source {
        AnnotationSource::ToolRegistry => &m.tool,
        AnnotationSource::MetricsRegistry => &m.metrics,
    });

    match definition.kind {
        BenchmarkKind::Availability {
            identity_field,
            distribution,
        } => {
            let steps: Vec<_> = annotations.map(|a| availability(a, identity_field)).collect();
            count_based(definition, distribution, steps)
        }
        BenchmarkKind::FieldPresence {
            field,
            distribution,
        } => {
            let steps: Vec<_> = annotations.map(|a| field_presence(a, field)).collect();
            count_based(definition, distribution, steps)
        }
        BenchmarkKind::FieldMatch {
            field,
            value,
            distribution,
        } => {
            let steps: Vec<_> = annotations.map(|a| field_match(a, field, value)).collect();
            count_based(definition, distribution, steps)
        }
        BenchmarkKind::License { distribution } => {
            let (steps, classes): (Vec<_>, Vec<_>) = annotations.map(license).unzip();
            let known = classes.iter().filter(|c| c.is_known()).count();
            WorkflowBenchmark::new(
                *definition,
                ratio_string(known, length),
                distribution.desirability(known, length),
                steps,
            )
        }
        BenchmarkKind::Citations => {
            let (steps, counts): (Vec<_>, Vec<_>) = annotations.map(citations).unzip();
            let counts: Vec<u64> = counts.into_iter().map(|c| c.unwrap_or(0)).collect();
            let median = median(&counts).unwrap_or(0);
            WorkflowBenchmark::new(
                *definition,
                median.to_string(),
                citation_desirability(median),
                steps,
            )
        }
    }
}

fn count_based(
    definition: &BenchmarkDefinition,
    distribution: Distribution,
    steps: Vec<StepResult>,
) -> WorkflowBenchmark {
    let length = steps.len();
    let count = steps.iter().filter(|s| s.is_pass()).count();
    WorkflowBenchmark::new(
        *definition,
        ratio_string(count, length),
        distribution.desirability(count, length),
        steps,
    )
}
