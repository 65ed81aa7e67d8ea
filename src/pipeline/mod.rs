//! Training, evaluation and interactive play
//!
//! - Self-play training of the Q-learning agent
//! - Matches between agents for evaluation
//! - Interactive games against a human move source
//! - Observers recording what happens along the way

pub mod agents;
pub mod evaluation;
pub mod observers;
pub mod session;
pub mod training;

pub use agents::{OptimalAgent, RandomAgent};
pub use evaluation::{MatchConfig, MatchResult, MatchRunner};
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, Observation, ProgressObserver,
    StepObservation, UpdateObservation,
};
pub use session::{SessionOutcome, play};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Agent, Observer};
