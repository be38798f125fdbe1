mod cli;
mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only data
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("roz=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let state_file = cli.state_file.as_deref();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args, state_file, cli.format).await,
        Commands::Get(args) => commands::get::run(args, state_file, cli.format).await,
    }
}
