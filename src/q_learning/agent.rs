//! Q-learning agent
//!
//! Owns the Q-table and the random source used for ε-greedy exploration.

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    Error, Result,
    nim::{Action, Nim, Piles},
    ports::Agent,
    q_learning::q_table::QTable,
};

/// Hyperparameters fixed at agent construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub alpha: f64,
    /// Exploration rate ε, in [0, 1]
    pub epsilon: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            epsilon: 0.1,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha must be in (0, 1], got {}", self.alpha),
            });
        }
        if !self.epsilon.is_finite() || !(0.0..=1.0).contains(&self.epsilon) {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon must be in [0, 1], got {}", self.epsilon),
            });
        }
        Ok(())
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent for Nim
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
}

impl QLearningAgent {
    /// Create an agent with an empty Q-table
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if α or ε is out of range.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            q_table: QTable::new(config.alpha),
            epsilon: config.epsilon,
            rng: build_rng(None),
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> AgentConfig {
        AgentConfig {
            alpha: self.q_table.learning_rate(),
            epsilon: self.epsilon,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.q_table.learning_rate()
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Number of stored (state, action) values
    pub fn table_size(&self) -> usize {
        self.q_table.size()
    }

    /// Q(state, action), zero if never updated
    pub fn get_value(&self, state: &[u32], action: Action) -> f64 {
        self.q_table.get(state, action)
    }

    /// Best stored value over the legal actions of `state`, never below zero
    pub fn estimate_best_future(&self, state: &[u32]) -> f64 {
        self.q_table.best_future(state)
    }

    /// Move Q(old_state, action) toward `reward + best future value of new_state`
    pub fn update(&mut self, old_state: &[u32], action: Action, new_state: &[u32], reward: f64) {
        let old = self.q_table.get(old_state, action);
        let new = self
            .q_table
            .q_learning_update(old_state, action, reward, new_state);
        trace!(
            state = ?old_state,
            pile = action.pile,
            count = action.count,
            reward,
            old,
            new,
            "q-value updated"
        );
    }

    /// Pick an action for `state`
    ///
    /// With `explore` set, a uniformly random legal action is taken with
    /// probability ε. Otherwise the legal action with the highest stored value
    /// wins, falling back to the first legal action when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalActions`] for a terminal (all-empty) state.
    pub fn choose_action(&mut self, state: &[u32], explore: bool) -> Result<Action> {
        let legal_actions = Nim::legal_actions(state);
        if legal_actions.is_empty() {
            return Err(Error::NoLegalActions {
                piles: Piles::from(state).to_string(),
            });
        }

        if explore && self.rng.random::<f64>() < self.epsilon {
            let index = self.rng.random_range(0..legal_actions.len());
            return Ok(legal_actions[index]);
        }

        Ok(self
            .q_table
            .best_stored(state)
            .map_or(legal_actions[0], |(action, _)| action))
    }

    /// Stored values for every legal action of `state`, in enumeration order
    pub fn action_values(&self, state: &[u32]) -> Vec<(Action, Option<f64>)> {
        Nim::legal_actions(state)
            .into_iter()
            .map(|action| (action, self.q_table.stored(state, action)))
            .collect()
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self {
            q_table: QTable::new(AgentConfig::default().alpha),
            epsilon: AgentConfig::default().epsilon,
            rng: build_rng(None),
        }
    }
}

/// Greedy play, no exploration and no learning
impl Agent for QLearningAgent {
    fn select_action(&mut self, piles: &Piles) -> Result<Action> {
        self.choose_action(piles.as_slice(), false)
    }

    fn name(&self) -> &str {
        "Q-Learning"
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.reseed(seed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let agent = QLearningAgent::default();
        assert_eq!(agent.alpha(), 0.5);
        assert_eq!(agent.epsilon(), 0.1);
        assert_eq!(agent.table_size(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        for (alpha, epsilon) in [(0.0, 0.1), (1.5, 0.1), (0.5, -0.1), (0.5, 1.1), (f64::NAN, 0.1)]
        {
            let result = QLearningAgent::new(AgentConfig { alpha, epsilon });
            assert!(
                matches!(result, Err(Error::InvalidConfiguration { .. })),
                "alpha={alpha} epsilon={epsilon} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_table_values_are_zero() {
        let agent = QLearningAgent::default();
        for action in Nim::legal_actions(&[1, 3, 5, 7]) {
            assert_eq!(agent.get_value(&[1, 3, 5, 7], action), 0.0);
        }
        assert_eq!(agent.estimate_best_future(&[1, 3, 5, 7]), 0.0);
    }

    #[test]
    fn test_update_rule() {
        let mut agent = QLearningAgent::default();
        agent.update(&[0, 2], Action::new(1, 1), &[0, 1], 0.0);
        assert_eq!(agent.get_value(&[0, 2], Action::new(1, 1)), 0.0);
        assert_eq!(agent.table_size(), 1);

        agent.update(&[0, 1], Action::new(1, 1), &[0, 0], -1.0);
        assert_eq!(agent.get_value(&[0, 1], Action::new(1, 1)), -0.5);

        // The only stored entry for [0, 1] is -0.5, floored to 0
        agent.update(&[0, 2], Action::new(1, 1), &[0, 1], 1.0);
        assert_eq!(agent.get_value(&[0, 2], Action::new(1, 1)), 0.5);
    }

    #[test]
    fn test_best_future_floors_negative_values() {
        let mut agent = QLearningAgent::default();
        agent.update(&[1], Action::new(0, 1), &[0], -1.0);
        assert_eq!(agent.get_value(&[1], Action::new(0, 1)), -0.5);
        assert_eq!(agent.estimate_best_future(&[1]), 0.0);
    }

    #[test]
    fn test_greedy_choice() {
        let mut agent = QLearningAgent::default();
        agent.update(&[2, 1], Action::new(0, 1), &[1, 1], 1.0);
        agent.update(&[2, 1], Action::new(0, 2), &[0, 1], 0.5);

        let action = agent.choose_action(&[2, 1], false).unwrap();
        assert_eq!(action, Action::new(0, 1));
    }

    #[test]
    fn test_greedy_falls_back_to_first_action() {
        let mut agent = QLearningAgent::default();
        let action = agent.choose_action(&[0, 3, 2], false).unwrap();
        assert_eq!(action, Action::new(1, 1));
    }

    #[test]
    fn test_greedy_ignores_unstored_actions() {
        let mut agent = QLearningAgent::default();
        agent.update(&[0, 3], Action::new(1, 3), &[0, 0], -1.0);

        // The only stored entry is negative but still preferred over unstored ones
        let action = agent.choose_action(&[0, 3], false).unwrap();
        assert_eq!(action, Action::new(1, 3));
    }

    #[test]
    fn test_terminal_state_has_no_action() {
        let mut agent = QLearningAgent::default();
        assert!(matches!(
            agent.choose_action(&[0, 0, 0], true),
            Err(Error::NoLegalActions { .. })
        ));
    }

    #[test]
    fn test_full_exploration_is_legal_and_seeded() {
        let config = AgentConfig {
            alpha: 0.5,
            epsilon: 1.0,
        };
        let mut a = QLearningAgent::new(config).unwrap().with_seed(9);
        let mut b = QLearningAgent::new(config).unwrap().with_seed(9);
        let legal = Nim::legal_actions(&[1, 3, 5, 7]);

        for _ in 0..50 {
            let action = a.choose_action(&[1, 3, 5, 7], true).unwrap();
            assert!(legal.contains(&action));
            assert_eq!(action, b.choose_action(&[1, 3, 5, 7], true).unwrap());
        }
    }

    #[test]
    fn test_action_values() {
        let mut agent = QLearningAgent::default();
        agent.update(&[2], Action::new(0, 2), &[0], -1.0);

        assert_eq!(
            agent.action_values(&[2]),
            vec![(Action::new(0, 1), None), (Action::new(0, 2), Some(-0.5))]
        );
    }
}
