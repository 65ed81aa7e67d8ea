//! Train command - Train the Q-learning agent through self-play

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        commands::train_agent,
        config::{RunConfig, TrainingArgs},
        output::{print_action_values, print_kv, print_section, print_training_result},
    },
    nim::Piles,
    pipeline::{JsonlObserver, TrainingResult},
    ports::Observer,
    q_learning::AgentConfig,
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: TrainingResult,
    agent: AgentConfig,
    initial_piles: Piles,
    seed: Option<u64>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent through self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Optional file for JSONL observations (one line per episode)
    #[arg(long)]
    pub observations: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// How many learned opening values to print
    #[arg(long, default_value_t = 5)]
    pub show_values: usize,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let run = args.training.resolve()?;

    print_section("Self-Play Training");
    print_kv("Episodes", &run.training.episodes.to_string());
    print_kv("Initial piles", &run.training.initial_piles.to_string());
    print_kv("Alpha", &run.agent.alpha.to_string());
    print_kv("Epsilon", &run.agent.epsilon.to_string());
    if let Some(seed) = run.training.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut observers: Vec<Box<dyn Observer>> = Vec::new();
    if let Some(path) = &args.observations {
        let observer = JsonlObserver::new(path)
            .with_context(|| format!("Failed to create observations file: {}", path.display()))?;
        observers.push(Box::new(observer));
    }

    let (agent, result) = train_agent(&args.training, &run, observers)?;

    print_training_result(&result);
    if args.show_values > 0 {
        print_action_values(&agent, &run.training.initial_piles, args.show_values);
    }

    if let Some(path) = &args.observations {
        println!("\n✓ Observations written to: {}", path.display());
    }

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        write_summary(&path, result, &run)?;
        println!("✓ Summary written to: {}", path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, training: TrainingResult, run: &RunConfig) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let summary = TrainingSummaryFile {
        training,
        agent: run.agent,
        initial_piles: run.training.initial_piles.clone(),
        seed: run.training.seed,
    };
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, &summary).context("Failed to write training summary")?;
    Ok(())
}
