//! `taxi-cli` — command-line driver for the taxi-world fleet simulator.
//!
//! Two subcommands, mirroring the original project's two entry-point
//! scripts: `run-day` (`original_source/scripts/run_day.py`) replays one
//! day against a fixed policy, `train`
//! (`original_source/scripts/run_q_training_2000.py`) runs repeated
//! Q-learning episodes.

mod requests;
mod run_day;
mod train;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "taxi-cli",
    about = "Discrete-time taxi-fleet simulator with ride-sharing dispatch and per-taxi Q-learning"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay one day's requests against a fixed fleet. No learning.
    RunDay(run_day::RunDayArgs),
    /// Run repeated Q-learning training episodes.
    Train(train::TrainArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::RunDay(args) => run_day::run(args),
        Commands::Train(args) => train::run(args),
    }
}
