//! Agent port - anything that can pick a move in a Nim position

use crate::{
    Result,
    nim::{Action, Piles},
};

/// A source of moves
///
/// Implemented by the trained Q-learning agent (greedy play), the baseline
/// opponents and the human input source of an interactive session.
///
/// # Examples
///
/// ```no_run
/// use nim_ai::{
///     nim::{Action, Piles},
///     ports::Agent,
/// };
///
/// struct TakeOne;
///
/// impl Agent for TakeOne {
///     fn select_action(&mut self, piles: &Piles) -> nim_ai::Result<Action> {
///         let pile = piles.as_slice().iter().position(|&p| p > 0).unwrap_or(0);
///         Ok(Action::new(pile, 1))
///     }
///
///     fn name(&self) -> &str {
///         "take-one"
///     }
/// }
/// ```
pub trait Agent: Send {
    /// Select a move for the given piles.
    ///
    /// Automated agents only return legal actions. A human input source may
    /// return anything; the session validates it and asks again.
    ///
    /// # Errors
    ///
    /// Returns an error if no move can be produced, e.g. the position is
    /// terminal or the input stream closed.
    fn select_action(&mut self, piles: &Piles) -> Result<Action>;

    /// Get the agent's name.
    ///
    /// Used for identification in match reports and logging.
    fn name(&self) -> &str;

    /// Seed the agent's internal random number generator.
    ///
    /// Match runners call this when supplied with a deterministic seed.
    /// Deterministic agents can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) -> Result<()> {
        Ok(())
    }
}
