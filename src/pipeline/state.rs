//! Per-phase pipeline state.

use crate::error::ErrorKind;
use serde::Serialize;
use std::fmt;

/// The three phases a document goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Raw document text is obtained from a source
    Acquire,
    /// Paragraphs are sorted
    Transform,
    /// The sorted document is handed to a sink
    Export,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Acquire => "acquire",
            Phase::Transform => "transform",
            Phase::Export => "export",
        };
        f.write_str(name)
    }
}

/// Outcome of one phase.
///
/// A phase is never loading and failed at once, and only a successful phase
/// carries a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    /// Not started
    Idle,
    /// Started, no result yet
    Loading,
    /// Finished with a value
    Success(T),
    /// Finished with an error
    Failed(ErrorKind),
}

impl<T> Default for StepOutcome<T> {
    fn default() -> Self {
        StepOutcome::Idle
    }
}

impl<T> StepOutcome<T> {
    /// Whether the phase is in progress.
    pub fn is_loading(&self) -> bool {
        matches!(self, StepOutcome::Loading)
    }

    /// Whether the phase failed.
    pub fn is_error(&self) -> bool {
        matches!(self, StepOutcome::Failed(_))
    }

    /// Whether the phase succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, StepOutcome::Success(_))
    }

    /// Value of a successful phase.
    pub fn value(&self) -> Option<&T> {
        match self {
            StepOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Error kind of a failed phase.
    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            StepOutcome::Failed(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The outcome without its value.
    pub fn status(&self) -> PhaseStatus {
        match self {
            StepOutcome::Idle => PhaseStatus::Idle,
            StepOutcome::Loading => PhaseStatus::Loading,
            StepOutcome::Success(_) => PhaseStatus::Success,
            StepOutcome::Failed(kind) => PhaseStatus::Failed(*kind),
        }
    }
}

/// Value-free view of a [`StepOutcome`], for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "error")]
pub enum PhaseStatus {
    /// Not started
    Idle,
    /// In progress
    Loading,
    /// Succeeded
    Success,
    /// Failed with this kind of error
    Failed(ErrorKind),
}

/// State of all three phases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineState {
    /// Raw document text once acquired
    pub acquire: StepOutcome<String>,
    /// Sorted document text once transformed
    pub transform: StepOutcome<String>,
    /// Bytes handed to the sink once exported
    pub export: StepOutcome<usize>,
}

impl PipelineState {
    /// Fresh state, every phase idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a document is available to transform.
    pub fn can_transform(&self) -> bool {
        self.acquire.is_success()
    }

    /// Whether a sorted document is available to export.
    pub fn can_export(&self) -> bool {
        self.acquire.is_success() && self.transform.is_success()
    }

    /// Status of one phase.
    pub fn status(&self, phase: Phase) -> PhaseStatus {
        match phase {
            Phase::Acquire => self.acquire.status(),
            Phase::Transform => self.transform.status(),
            Phase::Export => self.export.status(),
        }
    }

    /// Value-free summary of every phase.
    pub fn summary(&self) -> StateSummary {
        StateSummary {
            acquire: self.acquire.status(),
            transform: self.transform.status(),
            export: self.export.status(),
        }
    }
}

/// Serializable summary of a [`PipelineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateSummary {
    /// Acquire phase status
    pub acquire: PhaseStatus,
    /// Transform phase status
    pub transform: PhaseStatus,
    /// Export phase status
    pub export: PhaseStatus,
}
