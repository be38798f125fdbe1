//! Events announced by the pipeline after each applied action.

use serde::{Deserialize, Serialize};

use crate::{
    action::Action,
    doc::{Document, Path, PathBuf},
};

/// Type tag of [`Event::StateChanged`].
pub const STATE_CHANGED: &str = "STATE_CHANGED";

/// A change notification.
///
/// Serializes as `{"type": "STATE_CHANGED", "path": ..., "old_value": ...,
/// "new_value": ..., "action_source": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// A `SET_STATE` action was applied.
    StateChanged {
        path: PathBuf,
        /// Value at `path` before the write; `None` if there was none.
        old_value: Option<Document>,
        /// Value at `path` right after the write.
        new_value: Document,
        /// The action that caused the change.
        action_source: Action,
    },
}

impl Event {
    /// The event's type tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::StateChanged { .. } => STATE_CHANGED,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Event::StateChanged { path, .. } => path,
        }
    }

    pub fn old_value(&self) -> Option<&Document> {
        match self {
            Event::StateChanged { old_value, .. } => old_value.as_ref(),
        }
    }

    pub fn new_value(&self) -> &Document {
        match self {
            Event::StateChanged { new_value, .. } => new_value,
        }
    }

    pub fn action_source(&self) -> &Action {
        match self {
            Event::StateChanged { action_source, .. } => action_source,
        }
    }
}
