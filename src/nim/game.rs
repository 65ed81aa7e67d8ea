//! Nim rules engine

use serde::{Deserialize, Serialize};

use super::piles::{Action, Piles, Player};
use crate::{Error, Result};

/// A game of Nim in progress
///
/// The winner is recorded immediately after the move that empties the last
/// pile, and is the player *about to move*. Whoever takes the last object
/// therefore loses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nim {
    piles: Piles,
    player: Player,
    winner: Option<Player>,
}

impl Nim {
    /// Start a game from the given piles with player 0 to move
    pub fn new(initial: Piles) -> Self {
        Self {
            piles: initial,
            player: Player::First,
            winner: None,
        }
    }

    /// Every legal action for a pile configuration
    ///
    /// Ordered by ascending pile index, then ascending count. The result has
    /// exactly as many entries as there are objects on the table.
    pub fn legal_actions(piles: &[u32]) -> Vec<Action> {
        piles
            .iter()
            .enumerate()
            .flat_map(|(pile, &size)| (1..=size).map(move |count| Action::new(pile, count)))
            .collect()
    }

    pub fn piles(&self) -> &Piles {
        &self.piles
    }

    /// Player whose turn it is
    pub fn player(&self) -> Player {
        self.player
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Check an action against the current position without applying it
    pub fn validate(&self, action: Action) -> Result<()> {
        if self.winner.is_some() {
            return Err(Error::GameAlreadyOver);
        }
        let available = *self
            .piles
            .as_slice()
            .get(action.pile)
            .ok_or(Error::InvalidPile {
                pile: action.pile,
                pile_count: self.piles.len(),
            })?;
        if action.count < 1 || action.count > available {
            return Err(Error::InvalidCount {
                pile: action.pile,
                count: action.count,
                available,
            });
        }
        Ok(())
    }

    /// Apply a move for the current player
    ///
    /// # Errors
    ///
    /// [`Error::GameAlreadyOver`] once a winner is recorded,
    /// [`Error::InvalidPile`] for an out-of-range pile and
    /// [`Error::InvalidCount`] when the count is zero or exceeds the pile.
    pub fn apply_move(&mut self, action: Action) -> Result<()> {
        self.validate(action)?;

        self.piles.take(action);
        self.switch_player();

        if self.piles.all_empty() {
            self.winner = Some(self.player);
        }
        Ok(())
    }

    pub fn switch_player(&mut self) {
        self.player = self.player.other();
    }
}

impl Default for Nim {
    fn default() -> Self {
        Self::new(Piles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Nim::default();
        assert_eq!(game.piles().as_slice(), &[1, 3, 5, 7]);
        assert_eq!(game.player(), Player::First);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_legal_actions_order() {
        let actions = Nim::legal_actions(&[2, 0, 1]);
        assert_eq!(
            actions,
            vec![Action::new(0, 1), Action::new(0, 2), Action::new(2, 1)]
        );
    }

    #[test]
    fn test_legal_actions_count_matches_objects() {
        assert_eq!(Nim::legal_actions(&[1, 3, 5, 7]).len(), 16);
        assert!(Nim::legal_actions(&[0, 0, 0, 0]).is_empty());
    }

    #[test]
    fn test_take_whole_pile() {
        let mut game = Nim::default();
        game.apply_move(Action::new(3, 7)).unwrap();

        assert_eq!(game.piles().as_slice(), &[1, 3, 5, 0]);
        assert_eq!(game.player(), Player::Second);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_emptying_last_pile_loses() {
        let mut game = Nim::new(Piles::new(vec![1, 0, 0, 0]));
        game.apply_move(Action::new(0, 1)).unwrap();

        assert!(game.piles().all_empty());
        assert_eq!(game.winner(), Some(Player::Second));
        assert!(game.is_over());
    }

    #[test]
    fn test_invalid_pile() {
        let mut game = Nim::default();
        let err = game.apply_move(Action::new(4, 1)).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidPile {
                pile: 4,
                pile_count: 4
            }
        ));
    }

    #[test]
    fn test_invalid_count() {
        let mut game = Nim::default();
        assert!(matches!(
            game.apply_move(Action::new(0, 0)),
            Err(Error::InvalidCount { .. })
        ));
        assert!(matches!(
            game.apply_move(Action::new(1, 4)),
            Err(Error::InvalidCount {
                pile: 1,
                count: 4,
                available: 3
            })
        ));
        // Rejected moves leave the game untouched
        assert_eq!(game, Nim::default());
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut game = Nim::new(Piles::new(vec![1]));
        game.apply_move(Action::new(0, 1)).unwrap();
        assert!(matches!(
            game.apply_move(Action::new(0, 1)),
            Err(Error::GameAlreadyOver)
        ));
        assert_eq!(game.winner(), Some(Player::Second));
    }
}
