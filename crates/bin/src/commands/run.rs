//! Run command - streams JSON actions through a store.

use roz::Action;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::cli::RunArgs;
use crate::commands::open_store;
use crate::output::{OutputFormat, print_event, print_state};

/// Run the run command
pub async fn run(
    args: &RunArgs,
    state_file: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let input: Box<dyn AsyncRead + Unpin> = match &args.actions {
        Some(path) => Box::new(tokio::fs::File::open(path).await?),
        None => Box::new(tokio::io::stdin()),
    };

    let store = open_store(state_file);
    let events = store.subscribe();
    store.start();

    let mut lines = BufReader::new(input).lines();
    let mut line_no = 0usize;
    let mut dispatched = 0usize;
    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.parse::<Action>() {
            Ok(action) => {
                store.dispatch(action);
                dispatched += 1;
            }
            Err(e) => tracing::warn!(line = line_no, "Skipping input that is not an action: {e}"),
        }
    }

    store.flush().await?;
    let emitted = events.drain();
    tracing::info!(
        dispatched,
        applied = emitted.len(),
        "All actions processed"
    );

    for event in &emitted {
        print_event(event, format)?;
    }
    print_state(&store.snapshot(), format)?;

    store.stop().await;
    Ok(())
}
