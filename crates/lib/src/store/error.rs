//! Error types for the action pipeline.

use thiserror::Error;

use crate::doc::{PathBuf, PathError};

/// Errors raised by the store and its action processor.
///
/// The action-level variants never reach `dispatch` callers: the processor
/// logs them and moves on to the next action.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// The action's type is not one the processor understands.
    #[error("Unknown action type received: {kind}")]
    UnknownActionType { kind: String },

    /// A recognised action is missing a required field.
    #[error("Malformed {kind} action: {reason}")]
    MalformedAction { kind: String, reason: String },

    /// The write could not be applied at the requested path.
    #[error("Failed to apply state change for path '{path}': {source}")]
    ApplyFailed {
        path: PathBuf,
        #[source]
        source: PathError,
    },

    /// Applying the action panicked.
    #[error("Unhandled fault while processing action: {reason}")]
    Panicked { reason: String },

    /// The operation needs a running processor.
    #[error("Action processor is not running")]
    NotRunning,

    /// The processor's progress channel closed.
    #[error("Action processor went away")]
    ProcessorGone,
}

impl StoreError {
    /// Check if this error means the action was rejected before touching the document.
    pub fn is_invalid_action(&self) -> bool {
        matches!(
            self,
            StoreError::UnknownActionType { .. } | StoreError::MalformedAction { .. }
        )
    }

    /// Check if this error is a failed write.
    pub fn is_apply_error(&self) -> bool {
        matches!(self, StoreError::ApplyFailed { .. })
    }

    /// Check if this error is an internal fault.
    pub fn is_fault(&self) -> bool {
        matches!(self, StoreError::Panicked { .. })
    }

    /// Check if this error concerns the processor lifecycle.
    pub fn is_lifecycle_error(&self) -> bool {
        matches!(self, StoreError::NotRunning | StoreError::ProcessorGone)
    }
}
