//! Sparse Q-table for tabular Q-learning

use std::collections::HashMap;

use crate::nim::{Action, Nim, Piles};

/// Q-table mapping (pile configuration, action) pairs to Q-values
///
/// Entries are created on first update and never removed. Missing entries
/// read as `0.0`.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    /// Q-values grouped by exact pile configuration
    q_values: HashMap<Piles, HashMap<Action, f64>>,
    /// Learning rate α
    learning_rate: f64,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new(learning_rate: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Stored Q-value, if this pair has ever been updated
    pub fn stored(&self, state: &[u32], action: Action) -> Option<f64> {
        self.q_values
            .get(state)
            .and_then(|actions| actions.get(&action))
            .copied()
    }

    /// Get Q-value for a state-action pair, defaulting to zero
    pub fn get(&self, state: &[u32], action: Action) -> f64 {
        self.stored(state, action).unwrap_or(0.0)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: &[u32], action: Action, value: f64) {
        match self.q_values.get_mut(state) {
            Some(actions) => {
                actions.insert(action, value);
            }
            None => {
                self.q_values
                    .insert(Piles::from(state), HashMap::from([(action, value)]));
            }
        }
    }

    /// Highest stored value among the legal actions of `state`
    ///
    /// Only actions with a stored entry take part. Ties go to the earliest
    /// action in [`Nim::legal_actions`] order.
    pub fn best_stored(&self, state: &[u32]) -> Option<(Action, f64)> {
        let actions = self.q_values.get(state)?;
        Nim::legal_actions(state)
            .into_iter()
            .filter_map(|action| actions.get(&action).map(|&q| (action, q)))
            .fold(None, |best, (action, q)| match best {
                Some((_, best_q)) if best_q >= q => best,
                _ => Some((action, q)),
            })
    }

    /// max_a' Q(s', a') over stored entries, floored at `0.0`
    ///
    /// Unvisited actions read as zero, so a negative stored maximum never
    /// beats them.
    pub fn best_future(&self, state: &[u32]) -> f64 {
        self.best_stored(state).map_or(0.0, |(_, q)| q.max(0.0))
    }

    /// Q-learning update
    ///
    /// Q(s,a) ← Q(s,a) + α[r + max_a' Q(s',a') - Q(s,a)]
    ///
    /// Returns the new value.
    pub fn q_learning_update(
        &mut self,
        state: &[u32],
        action: Action,
        reward: f64,
        next_state: &[u32],
    ) -> f64 {
        let current_q = self.get(state, action);
        let max_next_q = self.best_future(next_state);
        let td_error = reward + max_next_q - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Total number of stored Q-values
    pub fn size(&self) -> usize {
        self.q_values.values().map(HashMap::len).sum()
    }

    /// Number of distinct pile configurations with at least one entry
    pub fn state_count(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }
}
