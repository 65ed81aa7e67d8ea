//! Self-play training pipeline for the Q-learning agent

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    nim::{Action, Nim, Piles, Player},
    ports::Observer,
    q_learning::QLearningAgent,
};

/// Reward for the player whose move emptied the last pile
pub const LOSS_REWARD: f64 = -1.0;
/// Reward for the opponent of that player
pub const WIN_REWARD: f64 = 1.0;
/// Reward for any non-terminal transition
pub const STEP_REWARD: f64 = 0.0;

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Number of self-play episodes
    pub episodes: usize,

    /// Piles every episode starts from
    pub initial_piles: Piles,

    /// Random seed for the agent's exploration
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 10_000,
            initial_piles: Piles::default(),
            seed: None,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_piles.all_empty() {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "initial piles {} contain no objects to take",
                    self.initial_piles
                ),
            });
        }
        Ok(())
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Episodes played
    pub episodes: usize,

    /// Episodes won by player 0
    pub first_player_wins: usize,

    /// Episodes won by player 1
    pub second_player_wins: usize,

    /// Moves made across all episodes
    pub total_moves: usize,

    /// Mean moves per episode
    pub average_game_length: f64,

    /// Stored Q-values after training
    pub table_size: usize,
}

impl TrainingResult {
    /// Create a new training result
    pub fn new(
        episodes: usize,
        first_player_wins: usize,
        second_player_wins: usize,
        total_moves: usize,
        table_size: usize,
    ) -> Self {
        let average_game_length = if episodes > 0 {
            total_moves as f64 / episodes as f64
        } else {
            0.0
        };

        Self {
            episodes,
            first_player_wins,
            second_player_wins,
            total_moves,
            average_game_length,
            table_size,
        }
    }

    /// Fraction of episodes won by player 0
    pub fn first_player_win_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.first_player_wins as f64 / self.episodes as f64
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Last (state, action) taken by each player within the current episode
#[derive(Debug, Default)]
struct LastMoves([Option<(Piles, Action)>; 2]);

impl LastMoves {
    fn record(&mut self, player: Player, state: Piles, action: Action) {
        self.0[player.id()] = Some((state, action));
    }

    fn get(&self, player: Player) -> Option<&(Piles, Action)> {
        self.0[player.id()].as_ref()
    }
}

/// Self-play training driver
///
/// One agent plays both seats. Each episode starts from fresh piles, and the
/// Q-table carries over from episode to episode.
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run the configured number of self-play episodes
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        self.config.validate()?;

        if let Some(seed) = self.config.seed {
            agent.reseed(seed);
        }

        info!(
            episodes = self.config.episodes,
            piles = %self.config.initial_piles,
            alpha = agent.alpha(),
            epsilon = agent.epsilon(),
            seed = ?self.config.seed,
            "starting self-play training"
        );

        for observer in &mut self.observers {
            observer.on_run_start(self.config.episodes)?;
        }

        let mut first_player_wins = 0;
        let mut second_player_wins = 0;
        let mut total_moves = 0;

        for episode in 0..self.config.episodes {
            let (winner, moves) = self.play_episode(episode, agent)?;
            match winner {
                Player::First => first_player_wins += 1,
                Player::Second => second_player_wins += 1,
            }
            total_moves += moves;
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let result = TrainingResult::new(
            self.config.episodes,
            first_player_wins,
            second_player_wins,
            total_moves,
            agent.table_size(),
        );
        info!(
            episodes = result.episodes,
            table_size = result.table_size,
            states = agent.q_table().state_count(),
            "training finished"
        );
        Ok(result)
    }

    /// Play one episode, updating the agent after every move
    fn play_episode(
        &mut self,
        episode: usize,
        agent: &mut QLearningAgent,
    ) -> Result<(Player, usize)> {
        for observer in &mut self.observers {
            observer.on_game_start(episode)?;
        }

        let mut game = Nim::new(self.config.initial_piles.clone());
        let mut last = LastMoves::default();
        let mut step_num = 0;

        loop {
            let mover = game.player();
            let state = game.piles().clone();
            let action = agent.choose_action(state.as_slice(), true)?;

            last.record(mover, state.clone(), action);

            game.apply_move(action)?;
            let new_state = game.piles().clone();

            for observer in &mut self.observers {
                observer.on_move(episode, step_num, mover, &state, action)?;
            }
            step_num += 1;

            if let Some(winner) = game.winner() {
                // The mover emptied the piles and loses; the winner's last move
                // is credited with the win.
                self.learn(episode, agent, &state, action, &new_state, LOSS_REWARD)?;
                if let Some((winner_state, winner_action)) = last.get(winner) {
                    self.learn(
                        episode,
                        agent,
                        winner_state,
                        *winner_action,
                        &new_state,
                        WIN_REWARD,
                    )?;
                }

                for observer in &mut self.observers {
                    observer.on_game_end(episode, winner)?;
                }
                debug!(episode, %winner, moves = step_num, "episode finished");
                return Ok((winner, step_num));
            }

            if let Some((prev_state, prev_action)) = last.get(game.player()) {
                self.learn(
                    episode,
                    agent,
                    prev_state,
                    *prev_action,
                    &new_state,
                    STEP_REWARD,
                )?;
            }
        }
    }

    fn learn(
        &mut self,
        episode: usize,
        agent: &mut QLearningAgent,
        state: &Piles,
        action: Action,
        new_state: &Piles,
        reward: f64,
    ) -> Result<()> {
        agent.update(state.as_slice(), action, new_state.as_slice(), reward);
        let value = agent.get_value(state.as_slice(), action);
        for observer in &mut self.observers {
            observer.on_value_updated(episode, state, action, reward, value)?;
        }
        Ok(())
    }
}
