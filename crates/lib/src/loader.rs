//! Loading the initial document from a JSON file.
//!
//! The store itself never sees a load failure: [`load_initial_state`]
//! resolves every failure to an empty document and logs why.

use std::{fs, path::Path};

use tracing::{error, info, warn};

use crate::{
    Error, Result,
    doc::{self, Document},
};

/// Reads and parses a JSON state file.
pub fn try_load(path: impl AsRef<Path>) -> Result<Document> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Loads a JSON state file, falling back to an empty document on any error.
pub fn load_initial_state(path: impl AsRef<Path>) -> Document {
    let path = path.as_ref();
    match try_load(path) {
        Ok(state) => {
            info!("Initial state loaded successfully from: {}", path.display());
            state
        }
        Err(e) if e.is_not_found() => {
            warn!(
                "Initial state file not found: {}. Starting with an empty state.",
                path.display()
            );
            doc::empty()
        }
        Err(Error::Serialize(e)) => {
            error!(
                "Invalid JSON in initial state file {}: {e}. Starting with an empty state.",
                path.display()
            );
            doc::empty()
        }
        Err(e) => {
            error!(
                "Unexpected error loading initial state from {}: {e}. Starting with an empty state.",
                path.display()
            );
            doc::empty()
        }
    }
}
