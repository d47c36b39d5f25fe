//! Session driver: one [`WorkflowMachine`] plus the [`Enhancer`] that
//! performs the network round-trip.
//!
//! Every intent from the presentation layer maps to one method. Only
//! [`Session::submit`] suspends; it holds `&mut self` for the whole
//! round-trip, so a second submission cannot start while one is in flight.

use async_trait::async_trait;

use crate::error::{CodecError, EnhanceError};
use crate::history::HistoryLedger;
use crate::result::EnhancementResult;
use crate::workflow::{
    Command, EnhancedDownload, SelectedFile, WorkflowEvent, WorkflowMachine, WorkflowState,
};

/// Performs exactly one enhancement round-trip per call.
#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn enhance(&self, image_reference: &str) -> Result<EnhancementResult, EnhanceError>;
}

pub struct Session<E> {
    enhancer: E,
    machine: WorkflowMachine,
}

impl<E: Enhancer> Session<E> {
    pub fn new(enhancer: E) -> Self {
        Self {
            enhancer,
            machine: WorkflowMachine::new(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        self.machine.state()
    }

    pub fn history(&self) -> &HistoryLedger {
        self.machine.history()
    }

    pub fn machine(&self) -> &WorkflowMachine {
        &self.machine
    }

    pub fn select_file(&mut self, file: SelectedFile) -> &WorkflowState {
        tracing::info!(filename = %file.filename, media_type = %file.media_type, "File selected");
        self.machine.apply(WorkflowEvent::FileSelected(file));
        self.machine.state()
    }

    pub fn file_read_failed(&mut self) -> &WorkflowState {
        self.machine.apply(WorkflowEvent::FileReadFailed);
        self.machine.state()
    }

    /// Submit the previewed image and wait for the outcome.
    ///
    /// Outside `preview` this is a no-op. Failures never escape: they are
    /// normalized into the `error` state's message.
    pub async fn submit(&mut self) -> &WorkflowState {
        let Some(Command::Submit { image_reference }) =
            self.machine.apply(WorkflowEvent::SubmitRequested)
        else {
            return self.machine.state();
        };

        let event = match self.enhancer.enhance(&image_reference).await {
            Ok(result) => {
                tracing::info!(
                    score_improvement = result.improvement_analysis.score_improvement,
                    improved = result.improvement_analysis.improved,
                    "Enhancement completed",
                );
                WorkflowEvent::SubmissionSucceeded(result)
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), error = %e, "Enhancement failed");
                WorkflowEvent::SubmissionFailed(e.to_string())
            }
        };

        self.machine.apply(event);
        self.machine.state()
    }

    pub fn new_enhancement(&mut self) -> &WorkflowState {
        self.machine.apply(WorkflowEvent::NewEnhancementRequested);
        self.machine.state()
    }

    pub fn select_history(&mut self, key: Option<&str>) -> &WorkflowState {
        self.machine.apply(WorkflowEvent::HistorySelected(key.map(str::to_owned)));
        self.machine.state()
    }

    pub fn download(&self) -> Result<Option<EnhancedDownload>, CodecError> {
        self.machine.download()
    }
}
