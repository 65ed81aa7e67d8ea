//! Head-to-head matches between two agents
//!
//! Used to measure a trained agent against the baselines. Neither side
//! learns during a match.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    nim::{Nim, Piles, Player},
    ports::{Agent, Observer},
};

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Number of games
    pub games: usize,

    /// Piles every game starts from
    pub initial_piles: Piles,

    /// Random seed; the evaluated agent gets `seed`, the opponent `seed + 1`
    pub seed: Option<u64>,

    /// Seat of the evaluated agent. `None` alternates, starting as player 0.
    pub agent_player: Option<Player>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 100,
            initial_piles: Piles::default(),
            seed: None,
            agent_player: None,
        }
    }
}

/// Result of a match, from the evaluated agent's perspective
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    /// Wins while seated as player 0
    pub wins_as_first: usize,
    /// Wins while seated as player 1
    pub wins_as_second: usize,
    pub win_rate: f64,
}

impl MatchResult {
    fn new(games: usize, wins_as_first: usize, wins_as_second: usize) -> Self {
        let wins = wins_as_first + wins_as_second;
        let win_rate = if games > 0 {
            wins as f64 / games as f64
        } else {
            0.0
        };
        Self {
            games,
            wins,
            losses: games - wins,
            wins_as_first,
            wins_as_second,
            win_rate,
        }
    }
}

/// Plays a series of games between an agent and an opponent
pub struct MatchRunner {
    config: MatchConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the runner
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    fn agent_seat(&self, game_num: usize) -> Player {
        self.config.agent_player.unwrap_or(if game_num % 2 == 0 {
            Player::First
        } else {
            Player::Second
        })
    }

    /// Run every game of the match
    ///
    /// # Errors
    ///
    /// Fails if either side produces an illegal move or no move at all.
    pub fn run(&mut self, agent: &mut dyn Agent, opponent: &mut dyn Agent) -> Result<MatchResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed)?;
            opponent.set_rng_seed(seed.wrapping_add(1))?;
        }

        info!(
            agent = agent.name(),
            opponent = opponent.name(),
            games = self.config.games,
            "starting match"
        );

        for observer in &mut self.observers {
            observer.on_run_start(self.config.games)?;
        }

        let mut wins_as_first = 0;
        let mut wins_as_second = 0;

        for game_num in 0..self.config.games {
            let seat = self.agent_seat(game_num);
            let winner = self.play_game(game_num, seat, agent, opponent)?;
            match (winner == seat, seat) {
                (true, Player::First) => wins_as_first += 1,
                (true, Player::Second) => wins_as_second += 1,
                (false, _) => {}
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        let result = MatchResult::new(self.config.games, wins_as_first, wins_as_second);
        info!(
            wins = result.wins,
            losses = result.losses,
            win_rate = result.win_rate,
            "match finished"
        );
        Ok(result)
    }

    fn play_game(
        &mut self,
        game_num: usize,
        agent_seat: Player,
        agent: &mut dyn Agent,
        opponent: &mut dyn Agent,
    ) -> Result<Player> {
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut game = Nim::new(self.config.initial_piles.clone());
        let mut step_num = 0;

        let winner = loop {
            if let Some(winner) = game.winner() {
                break winner;
            }

            let mover = game.player();
            let side: &mut dyn Agent = if mover == agent_seat {
                &mut *agent
            } else {
                &mut *opponent
            };

            let piles_before = game.piles().clone();
            let action = side.select_action(&piles_before)?;
            game.apply_move(action)?;

            for observer in &mut self.observers {
                observer.on_move(game_num, step_num, mover, &piles_before, action)?;
            }
            step_num += 1;
        };

        for observer in &mut self.observers {
            observer.on_game_end(game_num, winner)?;
        }
        debug!(game_num, %winner, agent_seat = %agent_seat, moves = step_num, "match game finished");
        Ok(winner)
    }
}
