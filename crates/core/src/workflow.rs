//! Workflow state machine for a single enhancement session.
//!
//! [`next`] is the pure transition function. [`WorkflowMachine`] owns the
//! current [`WorkflowState`] and the [`HistoryLedger`], applies transitions
//! one event at a time and records successful results.
//!
//! ```text
//! idle ──file──▶ preview ──submit──▶ loading ──ok──▶ success
//!   │                                   └──err──▶ error
//!   └──unreadable file──▶ error
//! success | error | preview ──new enhancement──▶ idle
//! any ──history hit──▶ success (no original image)
//! ```

use crate::codec::{self, EncodedImage};
use crate::error::CodecError;
use crate::history::HistoryLedger;
use crate::result::EnhancementResult;

/// Shown when a selected file cannot be turned into an image reference.
pub const READ_FAILURE_MESSAGE: &str = "Failed to read the image file.";

/// Prefix of the suggested filename for a downloaded enhanced image.
pub const DOWNLOAD_PREFIX: &str = "enhanced-";

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A file picked by the user, as handed over by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub filename: String,
    /// Declared media type, e.g. `image/jpeg`.
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// An accepted upload: the local filename plus its image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub image_reference: String,
}

impl SelectedFile {
    fn into_upload(self) -> Option<Upload> {
        if !self.media_type.starts_with("image/") || self.bytes.is_empty() {
            return None;
        }
        let image_reference = EncodedImage::new(self.media_type, self.bytes).to_reference();
        Some(Upload {
            filename: self.filename,
            image_reference,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    FileSelected(SelectedFile),
    /// The presentation layer could not read the picked file.
    FileReadFailed,
    SubmitRequested,
    SubmissionSucceeded(EnhancementResult),
    /// Carries the already-normalized error message.
    SubmissionFailed(String),
    NewEnhancementRequested,
    /// `None` means "no entry", which starts a new enhancement from `success`.
    HistorySelected(Option<String>),
}

impl WorkflowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FileSelected(_) => "file_selected",
            Self::FileReadFailed => "file_read_failed",
            Self::SubmitRequested => "submit_requested",
            Self::SubmissionSucceeded(_) => "submission_succeeded",
            Self::SubmissionFailed(_) => "submission_failed",
            Self::NewEnhancementRequested => "new_enhancement_requested",
            Self::HistorySelected(_) => "history_selected",
        }
    }
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit { image_reference: String },
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Preview {
        upload: Upload,
    },
    /// Keeps the upload so the result can be keyed by the local filename.
    Loading {
        upload: Upload,
    },
    Success {
        result: EnhancementResult,
        /// `None` for results replayed from history.
        original_image: Option<String>,
    },
    Error {
        message: String,
    },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Preview { .. } => "preview",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn current_result(&self) -> Option<&EnhancementResult> {
        match self {
            Self::Success { result, .. } => Some(result),
            _ => None,
        }
    }

    /// The pre-enhancement image reference, when the state still has it.
    pub fn original_image(&self) -> Option<&str> {
        match self {
            Self::Preview { upload } | Self::Loading { upload } => Some(&upload.image_reference),
            Self::Success { original_image, .. } => original_image.as_deref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// Outcome of a single transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: WorkflowState,
    pub command: Option<Command>,
    /// Result to record in the history ledger.
    pub record: Option<EnhancementResult>,
}

impl Transition {
    fn to(state: WorkflowState) -> Self {
        Self {
            state,
            command: None,
            record: None,
        }
    }
}

/// Compute the state that follows `state` on `event`.
///
/// Events that do not apply to the current state leave it unchanged.
pub fn next(state: WorkflowState, event: WorkflowEvent, history: &HistoryLedger) -> Transition {
    use WorkflowEvent as E;
    use WorkflowState as S;

    match (state, event) {
        (S::Idle, E::FileSelected(file)) => match file.into_upload() {
            Some(upload) => Transition::to(S::Preview { upload }),
            None => Transition::to(S::Error {
                message: READ_FAILURE_MESSAGE.to_string(),
            }),
        },
        (S::Idle, E::FileReadFailed) => Transition::to(S::Error {
            message: READ_FAILURE_MESSAGE.to_string(),
        }),
        (S::Preview { upload }, E::SubmitRequested) => Transition {
            command: Some(Command::Submit {
                image_reference: upload.image_reference.clone(),
            }),
            state: S::Loading { upload },
            record: None,
        },
        (S::Loading { upload }, E::SubmissionSucceeded(mut result)) => {
            // The service echoes a fixed name; the local filename is the key.
            result.filename = upload.filename;
            Transition {
                state: S::Success {
                    result: result.clone(),
                    original_image: Some(upload.image_reference),
                },
                command: None,
                record: Some(result),
            }
        }
        (S::Loading { .. }, E::SubmissionFailed(message)) => {
            Transition::to(S::Error { message })
        }
        (S::Success { .. } | S::Error { .. } | S::Preview { .. }, E::NewEnhancementRequested) => {
            Transition::to(S::Idle)
        }
        (state @ S::Success { .. }, E::HistorySelected(None)) => {
            next(state, E::NewEnhancementRequested, history)
        }
        (state, E::HistorySelected(Some(key))) => match history.find_by_key(&key) {
            Some(result) => Transition::to(S::Success {
                result: result.clone(),
                original_image: None,
            }),
            None => {
                tracing::debug!(key = %key, "History key not found, ignoring");
                Transition::to(state)
            }
        },
        (state, event) => {
            tracing::debug!(
                state = state.name(),
                event = event.name(),
                "Event ignored in current state"
            );
            Transition::to(state)
        }
    }
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// An enhanced image ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedDownload {
    /// Suggested filename, `enhanced-<original filename>`.
    pub filename: String,
    pub image: EncodedImage,
}

/// Owner of the workflow state and the session history.
#[derive(Debug, Default)]
pub struct WorkflowMachine {
    state: WorkflowState,
    history: HistoryLedger,
}

impl WorkflowMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn history(&self) -> &HistoryLedger {
        &self.history
    }

    /// Key of the result on screen, for highlighting it in the history.
    pub fn active_key(&self) -> Option<&str> {
        self.state.current_result().map(|r| r.filename.as_str())
    }

    /// Process one event to completion and return any follow-up command.
    pub fn apply(&mut self, event: WorkflowEvent) -> Option<Command> {
        let from = self.state.name();
        let event_name = event.name();
        let transition = next(std::mem::take(&mut self.state), event, &self.history);

        self.state = transition.state;
        if let Some(result) = transition.record {
            self.history.insert(result);
        }

        tracing::debug!(
            event = event_name,
            from,
            to = self.state.name(),
            "Workflow transition"
        );
        transition.command
    }

    /// Decode the active enhanced image for saving.
    ///
    /// Returns `Ok(None)` outside the `success` state.
    pub fn download(&self) -> Result<Option<EnhancedDownload>, CodecError> {
        let Some(result) = self.state.current_result() else {
            return Ok(None);
        };
        let image = codec::decode_image_reference(&result.enhanced_image_base64)?;
        Ok(Some(EnhancedDownload {
            filename: format!("{DOWNLOAD_PREFIX}{}", result.filename),
            image,
        }))
    }
}
