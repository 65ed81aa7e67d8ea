//! Nim and a tabular Q-learning agent that learns it through self-play
//!
//! This crate provides:
//! - A Nim rules engine where whoever takes the last object loses
//! - A Q-learning agent with an exact, sparse value table
//! - A self-play training driver, evaluation matches against baselines and
//!   an interactive session for playing against the trained agent
//! - The `nim` command-line tool built on top of these

pub mod cli;
pub mod error;
pub mod logging;
pub mod nim;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};
pub use nim::{Action, Nim, Piles, Player};
pub use q_learning::{AgentConfig, QLearningAgent};

use pipeline::{TrainingConfig, TrainingPipeline};

/// Train a fresh agent with default settings over `episode_count` self-play games
///
/// # Examples
///
/// ```no_run
/// let mut agent = nim_ai::train(10_000)?;
/// let action = agent.choose_action(&[1, 3, 5, 7], false)?;
/// # Ok::<(), nim_ai::Error>(())
/// ```
pub fn train(episode_count: usize) -> Result<QLearningAgent> {
    let mut agent = QLearningAgent::default();
    let config = TrainingConfig {
        episodes: episode_count,
        ..TrainingConfig::default()
    };
    TrainingPipeline::new(config).run(&mut agent)?;
    Ok(agent)
}
