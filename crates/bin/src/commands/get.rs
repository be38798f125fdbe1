//! Get command - prints the value at a path in the initial state.

use roz::{Document, doc::Path};

use crate::cli::GetArgs;
use crate::commands::open_store;
use crate::output::{OutputFormat, print_value};

/// Run the get command
pub async fn run(
    args: &GetArgs,
    state_file: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(state_file);
    let path = Path::new(&args.path);

    let value = store.get(path).unwrap_or_else(|| {
        tracing::debug!("Nothing at {path}");
        Document::Null
    });
    print_value(&value, format)?;

    Ok(())
}
