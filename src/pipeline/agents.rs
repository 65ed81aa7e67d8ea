//! Baseline agents for evaluation matches
//!
//! - [`RandomAgent`]: uniformly random legal move
//! - [`OptimalAgent`]: perfect play where taking the last object loses

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{
    Error, Result,
    nim::{Action, Nim, Piles},
    ports::Agent,
};

/// Random policy agent
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: String) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: String, seed: u64) -> Self {
        Self {
            name,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, piles: &Piles) -> Result<Action> {
        let actions = Nim::legal_actions(piles.as_slice());
        if actions.is_empty() {
            return Err(Error::NoLegalActions {
                piles: piles.to_string(),
            });
        }
        let index = self.rng.random_range(0..actions.len());
        Ok(actions[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) -> Result<()> {
        self.rng = StdRng::seed_from_u64(seed);
        Ok(())
    }
}

/// Perfect misère-Nim play
///
/// While two or more piles hold more than one object, the agent moves to a
/// zero nim-sum. Once at most one such pile remains it leaves an odd number of
/// single-object piles, so the opponent is forced to take the last object.
/// From a losing position it takes one object from the first non-empty pile.
pub struct OptimalAgent {
    name: String,
}

impl OptimalAgent {
    pub fn new(name: String) -> Self {
        Self { name }
    }

    /// The move perfect play makes from `piles`, `None` if nothing is left
    pub fn best_action(piles: &[u32]) -> Option<Action> {
        let first_nonempty = piles.iter().position(|&size| size > 0)?;
        let fallback = Action::new(first_nonempty, 1);

        let large: Vec<usize> = (0..piles.len()).filter(|&i| piles[i] > 1).collect();
        let singles = piles.iter().filter(|&&size| size == 1).count();

        let action = match large.as_slice() {
            // Only single-object piles left: taking one flips the parity
            [] => fallback,
            [pile] => {
                let size = piles[*pile];
                if singles % 2 == 1 {
                    Action::new(*pile, size)
                } else {
                    Action::new(*pile, size - 1)
                }
            }
            _ => {
                let nim_sum = piles.iter().fold(0, |acc, &size| acc ^ size);
                if nim_sum == 0 {
                    fallback
                } else {
                    piles
                        .iter()
                        .enumerate()
                        .find(|&(_, &size)| (size ^ nim_sum) < size)
                        .map_or(fallback, |(pile, &size)| {
                            Action::new(pile, size - (size ^ nim_sum))
                        })
                }
            }
        };
        Some(action)
    }

    /// True if the player to move loses against perfect play
    pub fn is_losing(piles: &[u32]) -> bool {
        let large = piles.iter().filter(|&&size| size > 1).count();
        if large == 0 {
            piles.iter().filter(|&&size| size == 1).count() % 2 == 1
        } else {
            piles.iter().fold(0, |acc, &size| acc ^ size) == 0
        }
    }
}

impl Agent for OptimalAgent {
    fn select_action(&mut self, piles: &Piles) -> Result<Action> {
        Self::best_action(piles.as_slice()).ok_or_else(|| Error::NoLegalActions {
            piles: piles.to_string(),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(piles: &[u32], action: Action) -> Vec<u32> {
        let mut next = piles.to_vec();
        next[action.pile] -= action.count;
        next
    }

    #[test]
    fn test_random_agent_plays_legal_moves() {
        let mut agent = RandomAgent::with_seed("Random".to_string(), 5);
        let piles = Piles::new(vec![0, 2, 0, 3]);
        let legal = Nim::legal_actions(piles.as_slice());
        for _ in 0..30 {
            assert!(legal.contains(&agent.select_action(&piles).unwrap()));
        }
    }

    #[test]
    fn test_random_agent_rejects_terminal_state() {
        let mut agent = RandomAgent::with_seed("Random".to_string(), 5);
        assert!(agent.select_action(&Piles::new(vec![0, 0])).is_err());
    }

    #[test]
    fn test_optimal_endgames() {
        // Even number of singles: take one, leaving an odd count
        assert_eq!(OptimalAgent::best_action(&[1, 1, 0]), Some(Action::new(0, 1)));
        // One large pile with an odd number of singles: clear it
        assert_eq!(OptimalAgent::best_action(&[3, 1, 0]), Some(Action::new(0, 3)));
        // One large pile with an even number of singles: leave one
        assert_eq!(OptimalAgent::best_action(&[0, 5, 1, 1]), Some(Action::new(1, 4)));
        assert_eq!(OptimalAgent::best_action(&[0, 0]), None);
    }

    #[test]
    fn test_optimal_moves_to_losing_positions() {
        let positions: [&[u32]; 5] = [&[2, 3], &[1, 3, 5, 6], &[4, 4, 1], &[7], &[2, 2, 2]];
        for piles in positions {
            assert!(!OptimalAgent::is_losing(piles), "{piles:?} should be winning");
            let action = OptimalAgent::best_action(piles).unwrap();
            let next = apply(piles, action);
            assert!(
                OptimalAgent::is_losing(&next),
                "{piles:?} -> {action} leaves {next:?}, which is not losing"
            );
        }
    }

    #[test]
    fn test_standard_opening_is_lost_for_first_player() {
        assert!(OptimalAgent::is_losing(&[1, 3, 5, 7]));
        assert!(OptimalAgent::is_losing(&[1]));
        assert!(!OptimalAgent::is_losing(&[1, 1]));
    }

    #[test]
    fn test_optimal_self_play_from_standard_opening() {
        let mut agent = OptimalAgent::new("Optimal".to_string());
        let mut game = Nim::default();
        while !game.is_over() {
            let action = agent.select_action(game.piles()).unwrap();
            game.apply_move(action).unwrap();
        }
        assert_eq!(game.winner(), Some(crate::nim::Player::Second));
    }
}
