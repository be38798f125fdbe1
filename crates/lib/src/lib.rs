//!
//! roz: a message-driven in-memory state container.
//!
//! ## Core Concepts
//!
//! * **Documents (`doc::Document`)**: The single state value, a JSON tree of objects, arrays and scalars.
//! * **Paths (`doc::Path`, `doc::PathBuf`)**: Dotted strings addressing nested values, with array indices as segments.
//!   `doc::PathExt` reads and writes through them, creating missing intermediate objects on write.
//! * **Actions (`action::Action`)**: Requests to change the document. `SET_STATE` writes a value at a path.
//! * **Events (`event::Event`)**: `STATE_CHANGED` notifications, one per applied action, in application order.
//! * **Store (`store::Store`)**: Owns the live document and a single processor task that applies actions one at a time.
//!   Callers `dispatch` actions, `subscribe` to events and take `snapshot`s.
//! * **Loader (`loader`)**: Reads the initial document from a JSON file, falling back to an empty document.

pub mod action;
pub mod doc;
pub mod event;
pub mod loader;
pub mod store;

pub use action::Action;
pub use doc::{Document, PathExt};
pub use event::Event;
pub use store::{EventStream, Store};

/// Result type used throughout the roz library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the roz library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured path errors from the doc module
    #[error(transparent)]
    Path(#[from] doc::PathError),

    /// Structured action parsing errors from the action module
    #[error(transparent)]
    Action(#[from] action::ActionError),

    /// Structured pipeline errors from the store module
    #[error(transparent)]
    Store(#[from] store::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
            Error::Path(_) => "doc",
            Error::Action(_) => "action",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Check if this error indicates a resource was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if this error is a failed path write.
    pub fn is_path_error(&self) -> bool {
        match self {
            Error::Path(_) => true,
            Error::Store(store_err) => store_err.is_apply_error(),
            _ => false,
        }
    }

    /// Check if this error is an action that could not be read or understood.
    pub fn is_invalid_action(&self) -> bool {
        match self {
            Error::Action(_) => true,
            Error::Store(store_err) => store_err.is_invalid_action(),
            _ => false,
        }
    }

    /// Check if this error concerns the processor lifecycle.
    pub fn is_lifecycle_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_lifecycle_error(),
            _ => false,
        }
    }
}
