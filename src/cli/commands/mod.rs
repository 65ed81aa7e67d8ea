//! Command implementations

pub mod evaluate;
pub mod play;
pub mod train;

use anyhow::Result;

use crate::{
    cli::config::{RunConfig, TrainingArgs},
    pipeline::{ProgressObserver, TrainingPipeline, TrainingResult},
    ports::Observer,
    q_learning::QLearningAgent,
};

/// Train a fresh agent as described by the resolved configuration
pub(crate) fn train_agent(
    args: &TrainingArgs,
    run: &RunConfig,
    extra_observers: Vec<Box<dyn Observer>>,
) -> Result<(QLearningAgent, TrainingResult)> {
    let mut agent = QLearningAgent::new(run.agent)?;

    let mut pipeline = TrainingPipeline::new(run.training.clone());
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    for observer in extra_observers {
        pipeline = pipeline.with_observer(observer);
    }

    let result = pipeline.run(&mut agent)?;
    Ok((agent, result))
}
