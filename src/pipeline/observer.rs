//! Pipeline observers.
//!
//! The driver calls [`PipelineObserver::on_transition`] after every state
//! change. Front ends use it to refresh their status display; nothing is
//! triggered implicitly by assigning state.

use super::state::{Phase, PhaseStatus, PipelineState};

/// Receives a notification after each phase transition.
pub trait PipelineObserver {
    /// Called with the phase that changed and the full state after the change.
    fn on_transition(&mut self, phase: Phase, state: &PipelineState);
}

impl<F> PipelineObserver for F
where
    F: FnMut(Phase, &PipelineState),
{
    fn on_transition(&mut self, phase: Phase, state: &PipelineState) {
        self(phase, state)
    }
}

/// Ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_transition(&mut self, _phase: Phase, _state: &PipelineState) {}
}

/// Logs every transition through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl PipelineObserver for LoggingObserver {
    fn on_transition(&mut self, phase: Phase, state: &PipelineState) {
        match state.status(phase) {
            PhaseStatus::Idle => log::trace!("{}: idle", phase),
            PhaseStatus::Loading => log::debug!("{}: started", phase),
            PhaseStatus::Success => log::info!("{}: done", phase),
            PhaseStatus::Failed(kind) => log::error!("{}: failed ({:?})", phase, kind),
        }
    }
}

/// Records every transition, for tests and front ends that replay history.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Transitions in the order they happened
    pub transitions: Vec<(Phase, PhaseStatus)>,
}

impl PipelineObserver for RecordingObserver {
    fn on_transition(&mut self, phase: Phase, state: &PipelineState) {
        self.transitions.push((phase, state.status(phase)));
    }
}
