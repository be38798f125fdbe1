//! CLI argument definitions for the roz binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Message-driven in-memory state container
#[derive(Parser, Debug)]
#[command(name = "roz")]
#[command(about = "roz: apply actions to a JSON state document and report what changed")]
#[command(version)]
pub struct Cli {
    /// JSON file holding the initial state. Starts empty when omitted
    #[arg(short, long, global = true, env = "ROZ_STATE_FILE")]
    pub state_file: Option<PathBuf>,

    /// Output format
    #[arg(
        short,
        long,
        global = true,
        value_enum,
        default_value = "human",
        env = "ROZ_FORMAT"
    )]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply a stream of actions and print the resulting events and state
    Run(RunArgs),
    /// Print the value at a path in the initial state
    Get(GetArgs),
}

/// Arguments for the run command
#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// File of JSON actions, one per line. Reads stdin when omitted
    #[arg(short, long)]
    pub actions: Option<PathBuf>,
}

/// Arguments for the get command
#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Dotted path, e.g. `user_settings.theme` or `inventory.0.item`
    pub path: String,
}
