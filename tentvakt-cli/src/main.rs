//! ## tentvakt-cli
//! **Operational interface for the proctoring monitor**
//!
//! Live sessions read the signal protocol from stdin; scenario replay runs
//! deterministic scripted sessions with optional state-hash validation.

use clap::Parser;

use tentvakt_telemetry::logging::EventLogger;

mod commands;
mod stdin_source;

use commands::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    EventLogger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run_live_mode(args).await,
        Commands::Simulate(args) => commands::run_simulate_mode(args).await,
    }
}
