//! Document sorting pipeline.
//!
//! ```text
//! DocumentSource
//!     ↓  acquire
//! raw document.xml text
//!     ↓  transform (WordDocument → Reorderer → text)
//! sorted document.xml text
//!     ↓  export
//! DocumentSink
//! ```
//!
//! Each phase moves through `Idle → Loading → Success | Failed` and the
//! [`Pipeline`] reports every transition to its [`PipelineObserver`].

mod observer;
mod state;

pub use observer::{LoggingObserver, NoopObserver, PipelineObserver, RecordingObserver};
pub use state::{Phase, PhaseStatus, PipelineState, StateSummary, StepOutcome};

use crate::config::SortConfig;
use crate::document::WordDocument;
use crate::error::{Error, Result};
use crate::io::{DocumentSink, DocumentSource};
use crate::reorder::Reorderer;

/// Sort the paragraphs of raw `document.xml` text.
///
/// # Example
///
/// ```
/// use kurdish_sorter::config::SortConfig;
/// use kurdish_sorter::pipeline::process;
///
/// let xml = "<w:document><w:body>\
///            <w:p><w:r><w:t>ئاو</w:t></w:r></w:p>\
///            <w:p><w:r><w:t>بەفر</w:t></w:r></w:p>\
///            </w:body></w:document>";
/// let sorted = process(xml, &SortConfig::default())?;
/// assert!(sorted.find("بەفر").unwrap() < sorted.find("ئاو").unwrap());
/// # Ok::<(), kurdish_sorter::error::Error>(())
/// ```
pub fn process(raw: &str, config: &SortConfig) -> Result<String> {
    let document = WordDocument::parse(raw, config)?;
    let sorted = Reorderer::new(config.clone()).reorder(document)?;
    Ok(sorted.into_string())
}

/// Stateful driver for the acquire / transform / export phases.
pub struct Pipeline<O: PipelineObserver = LoggingObserver> {
    config: SortConfig,
    state: PipelineState,
    observer: O,
}

impl Pipeline<LoggingObserver> {
    /// Pipeline that logs its transitions.
    pub fn new(config: SortConfig) -> Self {
        Self::with_observer(config, LoggingObserver)
    }
}

impl<O: PipelineObserver> Pipeline<O> {
    /// Pipeline reporting to `observer`.
    pub fn with_observer(config: SortConfig, observer: O) -> Self {
        Self {
            config,
            state: PipelineState::new(),
            observer,
        }
    }

    /// Current state.
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Consume the pipeline, returning the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Sorted document text, once transformed.
    pub fn output(&self) -> Option<&str> {
        self.state.transform.value().map(String::as_str)
    }

    /// Obtain the raw document from `source`.
    ///
    /// A new document resets the later phases. Blank input counts as no
    /// input.
    pub fn acquire<S: DocumentSource + ?Sized>(&mut self, source: &mut S) -> Result<()> {
        self.reset(Phase::Transform);
        self.reset(Phase::Export);
        self.state.acquire = StepOutcome::Loading;
        self.notify(Phase::Acquire);

        let result = source.read_document().and_then(|text| {
            if text.trim().is_empty() {
                Err(Error::Acquisition("document is empty".to_string()))
            } else {
                Ok(text)
            }
        });

        match result {
            Ok(text) => {
                log::debug!("Acquired {} bytes", text.len());
                self.state.acquire = StepOutcome::Success(text);
                self.notify(Phase::Acquire);
                Ok(())
            },
            Err(e) => {
                let e = match e {
                    Error::Acquisition(_) => e,
                    other => Error::Acquisition(other.to_string()),
                };
                self.fail(Phase::Acquire, e)
            },
        }
    }

    /// Sort the acquired document.
    ///
    /// Fails at once with [`Error::Acquisition`], without entering the
    /// loading state, when nothing has been acquired.
    pub fn transform(&mut self) -> Result<()> {
        self.reset(Phase::Export);
        if !self.state.can_transform() {
            return self.fail(
                Phase::Transform,
                Error::Acquisition("no document to transform".to_string()),
            );
        }

        self.state.transform = StepOutcome::Loading;
        self.notify(Phase::Transform);

        let result = self
            .state
            .acquire
            .value()
            .ok_or_else(|| Error::Acquisition("no document to transform".to_string()))
            .and_then(|raw| process(raw, &self.config));

        match result {
            Ok(sorted) => {
                self.state.transform = StepOutcome::Success(sorted);
                self.notify(Phase::Transform);
                Ok(())
            },
            Err(e) => self.fail(Phase::Transform, e),
        }
    }

    /// Hand the sorted document to `sink`.
    pub fn export<S: DocumentSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if !self.state.can_export() {
            return self.fail(
                Phase::Export,
                Error::Export("no sorted document to export".to_string()),
            );
        }

        self.state.export = StepOutcome::Loading;
        self.notify(Phase::Export);

        let result = match self.state.transform.value() {
            Some(sorted) => sink.write_document(sorted).map(|()| sorted.len()),
            None => Err(Error::Export("no sorted document to export".to_string())),
        };

        match result {
            Ok(written) => {
                self.state.export = StepOutcome::Success(written);
                self.notify(Phase::Export);
                Ok(())
            },
            Err(e) => {
                let e = match e {
                    Error::Export(_) => e,
                    other => Error::Export(other.to_string()),
                };
                self.fail(Phase::Export, e)
            },
        }
    }

    /// Run all three phases, stopping at the first failure.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<()>
    where
        S: DocumentSource + ?Sized,
        K: DocumentSink + ?Sized,
    {
        self.acquire(source)?;
        self.transform()?;
        self.export(sink)
    }

    fn fail(&mut self, phase: Phase, error: Error) -> Result<()> {
        let outcome = error.kind();
        match phase {
            Phase::Acquire => self.state.acquire = StepOutcome::Failed(outcome),
            Phase::Transform => self.state.transform = StepOutcome::Failed(outcome),
            Phase::Export => self.state.export = StepOutcome::Failed(outcome),
        }
        log::debug!("{} failed: {}", phase, error);
        self.notify(phase);
        Err(error)
    }

    /// Return a phase to idle, notifying only if it was not idle already.
    fn reset(&mut self, phase: Phase) {
        if self.state.status(phase) == PhaseStatus::Idle {
            return;
        }
        match phase {
            Phase::Acquire => self.state.acquire = StepOutcome::Idle,
            Phase::Transform => self.state.transform = StepOutcome::Idle,
            Phase::Export => self.state.export = StepOutcome::Idle,
        }
        self.notify(phase);
    }

    fn notify(&mut self, phase: Phase) {
        self.observer.on_transition(phase, &self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::{MemorySink, MemorySource};

    const DOC: &str = "<w:document><w:body><w:p><w:r><w:t>ئاو</w:t></w:r></w:p><w:p><w:r><w:t>بەفر</w:t></w:r></w:p></w:body></w:document>";

    fn pipeline() -> Pipeline<RecordingObserver> {
        Pipeline::with_observer(SortConfig::default(), RecordingObserver::default())
    }

    #[test]
    fn test_process_sorts() {
        let sorted = process(DOC, &SortConfig::default()).unwrap();
        assert_eq!(
            sorted,
            "<w:document><w:body><w:p><w:r><w:t>بەفر</w:t></w:r></w:p><w:p><w:r><w:t>ئاو</w:t></w:r></w:p></w:body></w:document>"
        );
    }

    #[test]
    fn test_transitions_on_success() {
        let mut pipeline = pipeline();
        let mut sink = MemorySink::new();
        pipeline
            .run(&mut MemorySource::new(DOC), &mut sink)
            .unwrap();

        assert_eq!(
            pipeline.observer().transitions,
            vec![
                (Phase::Acquire, PhaseStatus::Loading),
                (Phase::Acquire, PhaseStatus::Success),
                (Phase::Transform, PhaseStatus::Loading),
                (Phase::Transform, PhaseStatus::Success),
                (Phase::Export, PhaseStatus::Loading),
                (Phase::Export, PhaseStatus::Success),
            ]
        );
        assert_eq!(sink.document.as_deref(), pipeline.output());
        assert_eq!(pipeline.state().export.value(), Some(&DOC.len()));
    }

    #[test]
    fn test_transform_without_input_fails_without_loading() {
        let mut pipeline = pipeline();
        let err = pipeline.transform().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Acquisition);
        assert_eq!(
            pipeline.observer().transitions,
            vec![(Phase::Transform, PhaseStatus::Failed(ErrorKind::Acquisition))]
        );
    }

    #[test]
    fn test_structure_error_clears_loading() {
        let mut pipeline = pipeline();
        pipeline
            .acquire(&mut MemorySource::new("<w:document></w:document>"))
            .unwrap();
        let err = pipeline.transform().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert!(!pipeline.state().transform.is_loading());
        assert_eq!(
            pipeline.state().transform.error(),
            Some(ErrorKind::Structure)
        );
        assert!(!pipeline.state().can_export());
    }

    #[test]
    fn test_empty_source() {
        let mut pipeline = pipeline();
        let err = pipeline.acquire(&mut MemorySource::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Acquisition);
        assert!(pipeline.state().acquire.is_error());
    }

    #[test]
    fn test_blank_document_is_not_input() {
        let mut pipeline = pipeline();
        assert!(pipeline.acquire(&mut MemorySource::new("  \n")).is_err());
    }

    #[test]
    fn test_export_before_transform() {
        let mut pipeline = pipeline();
        pipeline.acquire(&mut MemorySource::new(DOC)).unwrap();
        let err = pipeline.export(&mut MemorySink::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Export);
    }

    #[test]
    fn test_new_acquire_resets_later_phases() {
        let mut pipeline = pipeline();
        pipeline
            .run(&mut MemorySource::new(DOC), &mut MemorySink::new())
            .unwrap();
        pipeline.acquire(&mut MemorySource::new(DOC)).unwrap();
        assert_eq!(pipeline.state().transform, StepOutcome::Idle);
        assert_eq!(pipeline.state().export, StepOutcome::Idle);
        assert!(pipeline.output().is_none());

        let transitions = &pipeline.observer().transitions;
        assert_eq!(
            transitions[6..9],
            [
                (Phase::Transform, PhaseStatus::Idle),
                (Phase::Export, PhaseStatus::Idle),
                (Phase::Acquire, PhaseStatus::Loading),
            ]
        );
    }

    #[test]
    fn test_repeated_transform_resets_export() {
        let mut pipeline = pipeline();
        pipeline
            .run(&mut MemorySource::new(DOC), &mut MemorySink::new())
            .unwrap();
        pipeline.transform().unwrap();
        assert_eq!(
            pipeline.observer().transitions[6..],
            [
                (Phase::Export, PhaseStatus::Idle),
                (Phase::Transform, PhaseStatus::Loading),
                (Phase::Transform, PhaseStatus::Success),
            ]
        );
    }
}
