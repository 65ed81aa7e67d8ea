//! Shared configuration for CLI commands
//!
//! Values come from three layers: built-in defaults, an optional JSON config
//! file (`--config`) and explicit command-line flags, in increasing priority.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{nim::Piles, pipeline::TrainingConfig, q_learning::AgentConfig};

/// Contents of a `--config` JSON file
///
/// ```json
/// {
///   "agent": { "alpha": 0.5, "epsilon": 0.1 },
///   "training": { "episodes": 10000, "initial_piles": [1, 3, 5, 7], "seed": 42 }
/// }
/// ```
///
/// Missing fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub agent: AgentConfig,
    pub training: TrainingConfig,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Training options shared by `train`, `play` and `evaluate`
#[derive(Args, Debug, Clone, Default)]
pub struct TrainingArgs {
    /// Number of self-play training episodes [default: 10000]
    #[arg(long, short = 'e')]
    pub episodes: Option<usize>,

    /// Learning rate α, in (0, 1] [default: 0.5]
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Exploration rate ε, in [0, 1] [default: 0.1]
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Starting piles, comma separated [default: 1,3,5,7]
    #[arg(long)]
    pub piles: Option<Piles>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// JSON file with agent and training settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

impl TrainingArgs {
    /// Merge defaults, the config file and explicit flags
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            run.training.episodes = episodes;
        }
        if let Some(alpha) = self.alpha {
            run.agent.alpha = alpha;
        }
        if let Some(epsilon) = self.epsilon {
            run.agent.epsilon = epsilon;
        }
        if let Some(piles) = &self.piles {
            run.training.initial_piles = piles.clone();
        }
        if self.seed.is_some() {
            run.training.seed = self.seed;
        }

        run.agent.validate()?;
        run.training.validate()?;
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let run = TrainingArgs::default().resolve().unwrap();
        assert_eq!(run, RunConfig::default());
        assert_eq!(run.training.episodes, 10_000);
        assert_eq!(run.agent.alpha, 0.5);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(
            &path,
            r#"{"agent": {"epsilon": 0.3}, "training": {"episodes": 50, "seed": 4}}"#,
        )
        .unwrap();

        let args = TrainingArgs {
            episodes: Some(7),
            config: Some(path),
            ..TrainingArgs::default()
        };
        let run = args.resolve().unwrap();

        assert_eq!(run.training.episodes, 7);
        assert_eq!(run.training.seed, Some(4));
        assert_eq!(run.agent.epsilon, 0.3);
        assert_eq!(run.agent.alpha, 0.5);
        assert_eq!(run.training.initial_piles, Piles::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let args = TrainingArgs {
            alpha: Some(2.0),
            ..TrainingArgs::default()
        };
        assert!(args.resolve().is_err());

        let args = TrainingArgs {
            piles: Some(Piles::new(vec![0, 0])),
            ..TrainingArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let args = TrainingArgs {
            config: Some(PathBuf::from("/nonexistent/run.json")),
            ..TrainingArgs::default()
        };
        assert!(args.resolve().is_err());
    }
}
