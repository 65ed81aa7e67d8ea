//! Evaluate command - Train an agent, then measure it against a baseline

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::{
    cli::{
        commands::train_agent,
        config::TrainingArgs,
        output::{print_kv, print_section, print_subsection, print_training_result},
    },
    nim::{Piles, Player},
    pipeline::{
        MatchConfig, MatchResult, MatchRunner, MetricsObserver, OptimalAgent, ProgressObserver,
        RandomAgent,
    },
    ports::Agent,
    q_learning::AgentConfig,
};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpponentKind {
    /// Uniformly random legal moves
    Random,
    /// Perfect misère play
    Optimal,
}

#[derive(Parser, Debug)]
#[command(about = "Train an agent, then evaluate it against a baseline opponent")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Opponent to evaluate against
    #[arg(long, short = 'o', value_enum, default_value_t = OpponentKind::Random)]
    pub opponent: OpponentKind,

    /// Number of evaluation games
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Seat of the trained agent: 0 or 1 (alternates if omitted)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub agent_player: Option<u8>,

    /// Export results to file
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: EvaluateArgs) -> Result<()> {
    let run = args.training.resolve()?;

    print_section("Training the AI");
    let (mut agent, training) = train_agent(&args.training, &run, Vec::new())?;
    print_training_result(&training);

    let agent_player = match args.agent_player {
        Some(id) => Some(
            Player::from_id(usize::from(id))
                .ok_or_else(|| anyhow!("Invalid value '{id}' for --agent-player"))?,
        ),
        None => None,
    };

    let mut opponent: Box<dyn Agent> = match args.opponent {
        OpponentKind::Random => Box::new(RandomAgent::new("Random".to_string())),
        OpponentKind::Optimal => Box::new(OptimalAgent::new("Optimal".to_string())),
    };

    print_subsection("Evaluation Configuration");
    print_kv("Opponent", opponent.name());
    print_kv(
        "Agent plays as",
        &agent_player.map_or_else(|| "alternating".to_string(), |p| p.to_string()),
    );
    print_kv("Games", &args.games.to_string());

    // Offset from the training seed so evaluation games differ from self-play
    let evaluation_seed = run.training.seed.map(|seed| seed.wrapping_add(1));
    let config = MatchConfig {
        games: args.games,
        initial_piles: run.training.initial_piles.clone(),
        seed: evaluation_seed,
        agent_player,
    };

    let mut runner = MatchRunner::new(config).with_observer(Box::new(MetricsObserver::new()));
    if !args.training.no_progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = runner.run(&mut agent, opponent.as_mut())?;

    print_subsection("Evaluation Results");
    print_kv("Total games", &result.games.to_string());
    print_kv(
        "Wins",
        &format!("{} ({:.1}%)", result.wins, result.win_rate * 100.0),
    );
    print_kv("Losses", &result.losses.to_string());
    print_kv("Wins as player 0", &result.wins_as_first.to_string());
    print_kv("Wins as player 1", &result.wins_as_second.to_string());

    if let Some(path) = &args.export {
        export_results(path, &result, args.opponent, run.agent, &run.training.initial_piles)?;
        println!("\n✓ Results exported to: {}", path.display());
    }

    Ok(())
}

#[derive(Serialize)]
struct EvaluationExport<'a> {
    opponent: OpponentKind,
    agent: AgentConfig,
    initial_piles: &'a Piles,
    result: &'a MatchResult,
}

/// Export evaluation results to JSON
fn export_results(
    path: &Path,
    result: &MatchResult,
    opponent: OpponentKind,
    agent: AgentConfig,
    initial_piles: &Piles,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let export = EvaluationExport {
        opponent,
        agent,
        initial_piles,
        result,
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &export).context("Failed to write evaluation results")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_against_optimal() {
        let tmp = tempfile::tempdir().unwrap();
        let export = tmp.path().join("eval").join("result.json");

        let args = EvaluateArgs::parse_from([
            "nim-evaluate",
            "--episodes",
            "20",
            "--seed",
            "3",
            "--no-progress",
            "--opponent",
            "optimal",
            "--games",
            "6",
            "--agent-player",
            "0",
            "--export",
            export.to_str().unwrap(),
        ]);
        execute(args).unwrap();

        let contents = std::fs::read_to_string(&export).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed["opponent"], "optimal");
        assert_eq!(parsed["result"]["games"], 6);
        // Player 0 cannot win [1, 3, 5, 7] against perfect play
        assert_eq!(parsed["result"]["wins"], 0);
        assert_eq!(parsed["initial_piles"], serde_json::json!([1, 3, 5, 7]));
    }

    #[test]
    fn test_rejects_unknown_seat() {
        let parsed = EvaluateArgs::try_parse_from(["nim-evaluate", "--agent-player", "2"]);
        assert!(parsed.is_err());
    }
}
