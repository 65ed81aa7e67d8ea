//! Observer implementations for training runs, matches and sessions

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    nim::{Action, Piles, Player},
    ports::Observer,
};

/// One applied move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepObservation {
    /// Move number within the game
    pub step_num: usize,
    /// Player 0 or 1
    pub player: usize,
    /// Piles before the move
    pub piles_before: Piles,
    /// The move
    pub action: Action,
}

/// One Q-value update made during training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateObservation {
    pub state: Piles,
    pub action: Action,
    pub reward: f64,
    /// Stored value after the update
    pub value: f64,
}

/// Complete observation of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Game number
    pub game_num: usize,
    /// Winning player (0 or 1)
    pub winner: usize,
    /// Moves in the game
    pub steps: Vec<StepObservation>,
    /// Value updates triggered by the game
    pub updates: Vec<UpdateObservation>,
    /// Total moves in game
    pub total_moves: usize,
}

/// Progress bar observer - Shows run progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    first_wins: usize,
    second_wins: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            first_wins: 0,
            second_wins: 0,
        }
    }

    fn message(&self) -> String {
        format!("P0:{} P1:{}", self.first_wins, self.second_wins)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_run_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, winner: Player) -> Result<()> {
        match winner {
            Player::First => self.first_wins += 1,
            Player::Second => self.second_wins += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks per-seat wins, game lengths and update counts
pub struct MetricsObserver {
    first_wins: usize,
    second_wins: usize,
    total_games: usize,
    total_moves: usize,
    value_updates: usize,
    rejected_moves: usize,
}

/// Summary of collected metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub first_player_wins: usize,
    pub second_player_wins: usize,
    pub first_player_win_rate: f64,
    pub avg_game_length: f64,
    pub value_updates: usize,
    pub rejected_moves: usize,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            first_wins: 0,
            second_wins: 0,
            total_games: 0,
            total_moves: 0,
            value_updates: 0,
            rejected_moves: 0,
        }
    }

    /// Get current win rate of player 0
    pub fn first_player_win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.first_wins as f64 / self.total_games as f64
        }
    }

    /// Get average length of finished games
    pub fn avg_game_length(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            self.total_moves as f64 / self.total_games as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            first_player_wins: self.first_wins,
            second_player_wins: self.second_wins,
            first_player_win_rate: self.first_player_win_rate(),
            avg_game_length: self.avg_game_length(),
            value_updates: self.value_updates,
            rejected_moves: self.rejected_moves,
        }
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _player: Player,
        _piles_before: &Piles,
        _action: Action,
    ) -> Result<()> {
        self.total_moves += 1;
        Ok(())
    }

    fn on_value_updated(
        &mut self,
        _game_num: usize,
        _state: &Piles,
        _action: Action,
        _reward: f64,
        _value: f64,
    ) -> Result<()> {
        self.value_updates += 1;
        Ok(())
    }

    fn on_rejected_move(
        &mut self,
        _player: Player,
        _action: Action,
        _error: &crate::Error,
    ) -> Result<()> {
        self.rejected_moves += 1;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, winner: Player) -> Result<()> {
        self.total_games += 1;
        match winner {
            Player::First => self.first_wins += 1,
            Player::Second => self.second_wins += 1,
        }
        Ok(())
    }
}

/// JSONL observer - Writes one JSON object per finished game
pub struct JsonlObserver {
    writer: BufWriter<File>,
    current_game_steps: Vec<StepObservation>,
    current_game_updates: Vec<UpdateObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        Ok(Self {
            writer,
            current_game_steps: Vec::new(),
            current_game_updates: Vec::new(),
        })
    }
}

impl Observer for JsonlObserver {
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        self.current_game_steps.clear();
        self.current_game_updates.clear();
        Ok(())
    }

    fn on_move(
        &mut self,
        _game_num: usize,
        step_num: usize,
        player: Player,
        piles_before: &Piles,
        action: Action,
    ) -> Result<()> {
        self.current_game_steps.push(StepObservation {
            step_num,
            player: player.id(),
            piles_before: piles_before.clone(),
            action,
        });
        Ok(())
    }

    fn on_value_updated(
        &mut self,
        _game_num: usize,
        state: &Piles,
        action: Action,
        reward: f64,
        value: f64,
    ) -> Result<()> {
        self.current_game_updates.push(UpdateObservation {
            state: state.clone(),
            action,
            reward,
            value,
        });
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, winner: Player) -> Result<()> {
        let observation = Observation {
            game_num,
            winner: winner.id(),
            total_moves: self.current_game_steps.len(),
            steps: std::mem::take(&mut self.current_game_steps),
            updates: std::mem::take(&mut self.current_game_updates),
        };

        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        self.writer.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_observer_counts() {
        let mut metrics = MetricsObserver::new();
        let piles = Piles::new(vec![1, 1]);

        metrics.on_game_start(0).unwrap();
        metrics
            .on_move(0, 0, Player::First, &piles, Action::new(0, 1))
            .unwrap();
        metrics
            .on_move(0, 1, Player::Second, &piles, Action::new(1, 1))
            .unwrap();
        metrics.on_game_end(0, Player::First).unwrap();

        metrics.on_game_start(1).unwrap();
        metrics
            .on_move(1, 0, Player::First, &piles, Action::new(0, 1))
            .unwrap();
        metrics.on_game_end(1, Player::Second).unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.first_player_wins, 1);
        assert_eq!(summary.second_player_wins, 1);
        assert_eq!(summary.first_player_win_rate, 0.5);
        assert_eq!(summary.avg_game_length, 1.5);
    }

    #[test]
    fn test_metrics_average_over_many_games() {
        let mut metrics = MetricsObserver::new();
        let piles = Piles::new(vec![3]);

        // Alternate one-move and three-move games
        for game_num in 0..1_000 {
            metrics.on_game_start(game_num).unwrap();
            let moves = if game_num % 2 == 0 { 1 } else { 3 };
            for step_num in 0..moves {
                metrics
                    .on_move(game_num, step_num, Player::First, &piles, Action::new(0, 1))
                    .unwrap();
            }
            metrics.on_game_end(game_num, Player::Second).unwrap();
        }

        let summary = metrics.summary();
        assert_eq!(summary.total_games, 1_000);
        assert_eq!(summary.avg_game_length, 2.0);
    }

    #[test]
    fn test_empty_metrics() {
        let summary = MetricsObserver::new().summary();
        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.first_player_win_rate, 0.0);
        assert_eq!(summary.avg_game_length, 0.0);
    }
}
