//! Tabular Q-learning
//!
//! The agent keeps an exact, sparse table of Q-values indexed by pile
//! configuration and action. Unvisited pairs read as zero. After each
//! transition the stored value moves toward the observed reward plus the
//! best stored value of the successor state:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! There is no discount factor: Nim episodes are short and every episode
//! terminates.
//!
//! ## Usage Example
//!
//! ```no_run
//! use nim_ai::q_learning::{AgentConfig, QLearningAgent};
//!
//! let mut agent = QLearningAgent::new(AgentConfig {
//!     alpha: 0.5,   // learning rate
//!     epsilon: 0.1, // exploration rate
//! })?
//! .with_seed(42);
//!
//! let action = agent.choose_action(&[1, 3, 5, 7], true)?;
//! # Ok::<(), nim_ai::Error>(())
//! ```

pub mod agent;
pub mod q_table;

// Public re-exports
pub use agent::{AgentConfig, QLearningAgent};
pub use q_table::QTable;
