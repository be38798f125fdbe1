//! Output formatting helpers for human-readable and JSON output.

use clap::ValueEnum;
use roz::{Document, Event};
use serde::Serialize;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Print a JSON value: pretty for humans, one compact line for machines.
pub fn print_value<T: Serialize>(value: &T, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Human => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
    }
    Ok(())
}

/// Print one event.
///
/// Human output is a single `path: old -> new` line; JSON output is the
/// full event object.
pub fn print_event(event: &Event, format: OutputFormat) -> serde_json::Result<()> {
    match format {
        OutputFormat::Human => {
            let old = match event.old_value() {
                Some(value) => serde_json::to_string(value)?,
                None => "(unset)".to_string(),
            };
            let new = serde_json::to_string(event.new_value())?;
            println!("{}: {old} -> {new}", event.path());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(event)?),
    }
    Ok(())
}

/// Print the final document after a run.
pub fn print_state(state: &Document, format: OutputFormat) -> serde_json::Result<()> {
    if format == OutputFormat::Human {
        println!();
        println!("Final state:");
    }
    print_value(state, format)
}
