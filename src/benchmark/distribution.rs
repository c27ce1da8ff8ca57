//! Desirability Distributions
//!
//! Turn a per-tool pass count into a workflow-level score in `[0, 1]`.
//! All functions expect at least one tool; an empty workflow is rejected by
//! the computer before any of them runs.

use serde::{Deserialize, Serialize};

/// How a pass count is turned into a workflow desirability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    /// Full marks only for full compliance; partial compliance is divided by 10
    Strict,
    /// Linear in the pass ratio
    Normal,
}

impl Distribution {
    pub fn desirability(self, count: usize, length: usize) -> f64 {
        match self {
            Self::Strict => strict(count, length),
            Self::Normal => normal(count, length),
        }
    }
}

/// `1` when every tool passes, otherwise `count / length / 10`.
pub fn strict(count: usize, length: usize) -> f64 {
    debug_assert!(length > 0, "distribution over an empty workflow");
    if length == 0 {
        return 0.0;
    }
    if count == length {
        1.0
    } else {
        count as f64 / length as f64 / 10.0
    }
}

/// `count / length`.
pub fn normal(count: usize, length: usize) -> f64 {
    debug_assert!(length > 0, "distribution over an empty workflow");
    if length == 0 {
        return 0.0;
    }
    count as f64 / length as f64
}

/// Display value of a count-based benchmark.
pub fn ratio_string(count: usize, length: usize) -> String {
    format!("{}/{}", count, length)
}

/// Median of the values; `None` for an empty slice.
///
/// For an even number of values the two middle values are added and the sum
/// is halved with integer truncation, so `[1, 2, 3, 4]` yields `2`.
pub fn median(values: &[u64]) -> Option<u64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        let (lower, upper) = (sorted[mid - 1], sorted[mid]);
        // floor((lower + upper) / 2) without overflowing
        Some(lower / 2 + upper / 2 + (lower % 2 + upper % 2) / 2)
    }
}
