pub mod get;
pub mod run;

use std::path::Path;

use roz::Store;

/// Open a store from the state file, or an empty one when none was given
pub fn open_store(state_file: Option<&Path>) -> Store {
    match state_file {
        Some(path) => Store::open(path),
        None => {
            tracing::info!("No state file given, starting with an empty state");
            Store::default()
        }
    }
}
