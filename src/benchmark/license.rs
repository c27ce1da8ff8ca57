//! License Classification
//!
//! Reads `project.license.{osi, open_source}` from a metrics annotation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::ToolAnnotation;

/// License openness of a tool, ordered from least to most desirable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LicenseClass {
    Unknown,
    Closed,
    Open,
    #[serde(rename = "OSIApproved")]
    OsiApproved,
}

impl LicenseClass {
    /// Per-tool desirability of this class.
    pub fn desirability(self) -> f64 {
        match self {
            Self::Unknown => 0.0,
            Self::Closed => 0.1,
            Self::Open => 0.8,
            Self::OsiApproved => 1.0,
        }
    }

    /// Step label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Closed => "Closed",
            Self::Open => "Open",
            Self::OsiApproved => "OSI approved",
        }
    }

    /// True when the registry knows anything about the license.
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }

    /// Classifies a metrics annotation.
    ///
    /// `osi: true` wins; otherwise `open_source` decides between open and
    /// closed. A missing `license` object or a non-boolean flag is unknown.
    pub fn classify(annotation: &ToolAnnotation) -> Self {
        let Some(license) = annotation.get_path(&["project", "license"]) else {
            return Self::Unknown;
        };

        match license.get("osi").and_then(Value::as_bool) {
            Some(true) => Self::OsiApproved,
            Some(false) => match license.get("open_source").and_then(Value::as_bool) {
                Some(true) => Self::Open,
                Some(false) => Self::Closed,
                None => Self::Unknown,
            },
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for LicenseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
