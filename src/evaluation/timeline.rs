//! Stage Timeline
//!
//! Records when a workflow's computation enters each stage, for debug
//! logging and run summaries.

use std::fmt;
use std::time::{Duration, Instant};

/// Stages of one workflow's benchmark computation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    FetchAnnotations,
    Evaluate,
    Aggregate,
    Serialize,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::FetchAnnotations => "fetch",
            Self::Evaluate => "evaluate",
            Self::Aggregate => "aggregate",
            Self::Serialize => "serialize",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
struct StageEvent {
    stage: Stage,
    timestamp: Instant,
}

/// Stage transitions of one workflow.
#[derive(Debug, Clone)]
pub struct StageTimeline {
    events: Vec<StageEvent>,
}

impl StageTimeline {
    /// Creates a timeline already in [`Stage::Start`].
    pub fn new() -> Self {
        Self {
            events: vec![StageEvent {
                stage: Stage::Start,
                timestamp: Instant::now(),
            }],
        }
    }

    /// Records entering a stage.
    pub fn enter(&mut self, stage: Stage) {
        debug_assert!(
            self.current() <= stage,
            "stage went backwards: {} -> {}",
            self.current(),
            stage
        );
        self.events.push(StageEvent {
            stage,
            timestamp: Instant::now(),
        });
    }

    /// The most recently entered stage.
    pub fn current(&self) -> Stage {
        self.events.last().map(|e| e.stage).unwrap_or(Stage::Start)
    }

    /// Time spent in each stage that has been left.
    pub fn durations(&self) -> Vec<(Stage, Duration)> {
        self.events
            .windows(2)
            .map(|pair| (pair[0].stage, pair[1].timestamp.duration_since(pair[0].timestamp)))
            .collect()
    }

    /// Total time since [`Stage::Start`].
    pub fn elapsed(&self) -> Duration {
        self.events
            .first()
            .map(|e| e.timestamp.elapsed())
            .unwrap_or_default()
    }

    /// One-line summary, e.g. `fetch 120ms, evaluate 0ms, ...`.
    pub fn summary(&self) -> String {
        self.durations()
            .iter()
            .map(|(stage, d)| format!("{} {}ms", stage, d.as_millis()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for StageTimeline {
    fn default() -> Self {
        Self::new()
    }
}
