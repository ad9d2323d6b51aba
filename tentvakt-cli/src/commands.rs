use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tentvakt_config::TentvaktConfig;
use tentvakt_core::session::{SessionProjection, SessionState};
use tentvakt_engine::{ProctorRuntime, ScenarioReport};
use tentvakt_simulator::{RandomSignalDriver, Scenario};

use crate::stdin_source::StdinSource;

type CliError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a live session, reading the signal protocol from stdin
    Run(RunArgs),
    /// Replay a scenario file, or exercise the state machine with a
    /// seeded random signal stream
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Configuration file; defaults to the config/ hierarchy
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Scenario file to replay; omit for a random stream
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Number of random steps when no scenario is given
    #[arg(long, default_value_t = 50)]
    pub count: usize,

    /// Seed for the random stream
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Expected state hash; overrides the scenario's own value
    #[arg(long)]
    pub validate_hash: Option<String>,

    /// Configuration file; defaults to the config/ hierarchy
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn load_config(path: &Option<PathBuf>) -> Result<TentvaktConfig, CliError> {
    Ok(match path {
        Some(path) => TentvaktConfig::load_from_path(path)?,
        None => TentvaktConfig::load()?,
    })
}

pub async fn run_live_mode(args: RunArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;
    let mut runtime = ProctorRuntime::new(config);
    let mut source = StdinSource::new();

    let projection = runtime.run_live(&mut source).await?;
    print_projection(&projection);
    Ok(())
}

pub async fn run_simulate_mode(args: SimulateArgs) -> Result<(), CliError> {
    let config = load_config(&args.config)?;
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_yaml_file(path)?,
        None => RandomSignalDriver::scenario(args.seed, args.count),
    };
    if args.validate_hash.is_some() {
        scenario.expected_hash = args.validate_hash.clone();
    }

    let mut runtime = ProctorRuntime::new(config);
    let report = runtime.run_scripted(&scenario)?;
    print_report(&report);
    Ok(())
}

fn print_projection(projection: &SessionProjection) {
    match projection.state {
        SessionState::Active => println!(
            "Session active: {} violations",
            projection.violation_count
        ),
        SessionState::Locked(reason) => println!(
            "Session locked ({reason}): {} violations",
            projection.violation_count
        ),
    }
    println!("Elapsed: {}", format_clock(projection.elapsed_secs));
    if let Some(remaining) = projection.remaining_secs {
        println!("Remaining: {}", format_clock(remaining));
    }
    for event in &projection.recent_events {
        println!("  [{}] {}: {}", event.severity, event.kind, event.message);
    }
}

fn print_report(report: &ScenarioReport) {
    println!(
        "Scenario '{}': {} events, hash {}",
        report.name,
        report.events.len(),
        report.state_hash
    );
    for event in &report.events {
        println!(
            "  #{} [{}] {}: {}",
            event.id, event.severity, event.kind, event.message
        );
    }
    print_projection(&report.projection);
}

/// mm:ss display, matching the assessment surface.
fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
