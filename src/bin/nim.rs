//! Nim CLI - Teach a Q-learning agent to play Nim, then play against it
//!
//! - `train` runs self-play training and reports what was learned
//! - `play` trains an agent and starts a console game against it
//! - `evaluate` trains an agent and measures it against a baseline

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "nim")]
#[command(version, about = "Q-learning agent for misère Nim", long_about = None)]
struct Cli {
    /// Emit debug logs for the library (RUST_LOG overrides this)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the agent through self-play
    Train(nim_ai::cli::commands::train::TrainArgs),

    /// Train the agent, then play against it
    Play(nim_ai::cli::commands::play::PlayArgs),

    /// Train the agent, then evaluate it against a baseline opponent
    Evaluate(nim_ai::cli::commands::evaluate::EvaluateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    nim_ai::logging::init(cli.verbose);

    match cli.command {
        Commands::Train(args) => nim_ai::cli::commands::train::execute(args),
        Commands::Play(args) => nim_ai::cli::commands::play::execute(args),
        Commands::Evaluate(args) => nim_ai::cli::commands::evaluate::execute(args),
    }
}
