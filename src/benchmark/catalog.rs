//! Benchmark Catalog
//!
//! The fixed set of quality criteria evaluated for every workflow. The order
//! of [`CATALOG`] is the order of benchmarks in every report.

use super::distribution::Distribution;

/// Which fetched document a benchmark inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationSource {
    ToolRegistry,
    MetricsRegistry,
}

/// The scoring rule a benchmark applies, with the aggregation of count-based
/// rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkKind {
    /// The tool has a registry record carrying `identity_field`
    Availability {
        identity_field: &'static str,
        distribution: Distribution,
    },
    /// `field` exists and is non-null
    FieldPresence {
        field: &'static str,
        distribution: Distribution,
    },
    /// `field` is an array containing `value`
    FieldMatch {
        field: &'static str,
        value: &'static str,
        distribution: Distribution,
    },
    /// License openness; counts tools with a known license
    License { distribution: Distribution },
    /// Citation counts, aggregated by median
    Citations,
}

impl BenchmarkKind {
    /// Aggregation of a count-based kind; `None` for citations.
    pub fn distribution(&self) -> Option<Distribution> {
        match *self {
            Self::Availability { distribution, .. }
            | Self::FieldPresence { distribution, .. }
            | Self::FieldMatch { distribution, .. }
            | Self::License { distribution } => Some(distribution),
            Self::Citations => None,
        }
    }
}

/// Static description of one benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkDefinition {
    pub title: &'static str,
    pub long_title: &'static str,
    pub description: &'static str,
    pub kind: BenchmarkKind,
    pub source: AnnotationSource,
}

impl BenchmarkDefinition {
    /// Field inspected by field-based rules.
    pub fn expected_field(&self) -> Option<&'static str> {
        match self.kind {
            BenchmarkKind::FieldPresence { field, .. }
            | BenchmarkKind::FieldMatch { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Value looked for by the field-match rule.
    pub fn expected_value(&self) -> Option<&'static str> {
        match self.kind {
            BenchmarkKind::FieldMatch { value, .. } => Some(value),
            _ => None,
        }
    }
}

/// Identity field of a valid tool registry record.
pub const TOOL_REGISTRY_ID_FIELD: &str = "biotoolsID";

const OPERATING_SYSTEM_FIELD: &str = "operatingSystem";

/// All benchmarks, in report order.
pub static CATALOG: [BenchmarkDefinition; 7] = [
    BenchmarkDefinition {
        title: "bio.tools",
        long_title: "Tools annotated in bio.tools",
        description: "The number of tools in the workflow that have an entry in bio.tools.",
        kind: BenchmarkKind::Availability {
            identity_field: TOOL_REGISTRY_ID_FIELD,
            distribution: Distribution::Strict,
        },
        source: AnnotationSource::ToolRegistry,
    },
    BenchmarkDefinition {
        title: "Linux",
        long_title: "Linux (OS) supported tools",
        description: "The number of tools in the workflow that run on Linux.",
        kind: BenchmarkKind::FieldMatch {
            field: OPERATING_SYSTEM_FIELD,
            value: "Linux",
            distribution: Distribution::Normal,
        },
        source: AnnotationSource::ToolRegistry,
    },
    BenchmarkDefinition {
        title: "Mac OS",
        long_title: "Mac OS supported tools",
        description: "The number of tools in the workflow that run on Mac OS.",
        kind: BenchmarkKind::FieldMatch {
            field: OPERATING_SYSTEM_FIELD,
            value: "Mac",
            distribution: Distribution::Normal,
        },
        source: AnnotationSource::ToolRegistry,
    },
    BenchmarkDefinition {
        title: "Windows",
        long_title: "Windows (OS) supported tools",
        description: "The number of tools in the workflow that run on Windows.",
        kind: BenchmarkKind::FieldMatch {
            field: OPERATING_SYSTEM_FIELD,
            value: "Windows",
            distribution: Distribution::Normal,
        },
        source: AnnotationSource::ToolRegistry,
    },
    BenchmarkDefinition {
        title: "Documentation",
        long_title: "Tools with documentation",
        description: "The number of tools in the workflow that link to documentation in bio.tools.",
        kind: BenchmarkKind::FieldPresence {
            field: "documentation",
            distribution: Distribution::Normal,
        },
        source: AnnotationSource::ToolRegistry,
    },
    BenchmarkDefinition {
        title: "License",
        long_title: "Tools with a known license",
        description: "The number of tools with license information in OpenEBench. \
                      Per tool, OSI-approved licenses score highest, then open, then closed.",
        kind: BenchmarkKind::License {
            distribution: Distribution::Strict,
        },
        source: AnnotationSource::MetricsRegistry,
    },
    BenchmarkDefinition {
        title: "Citations",
        long_title: "Median citations per tool",
        description: "The median number of citations of the publications describing \
                      each tool, as counted by OpenEBench.",
        kind: BenchmarkKind::Citations,
        source: AnnotationSource::MetricsRegistry,
    },
];
