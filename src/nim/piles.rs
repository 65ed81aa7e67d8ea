//! Pile configurations, actions and player identifiers

use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Default starting configuration: four piles of 1, 3, 5 and 7 objects.
pub const DEFAULT_PILES: [u32; 4] = [1, 3, 5, 7];

/// One of the two players in a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    /// Player 0, always moves first
    First,
    /// Player 1
    Second,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Numeric identifier (0 or 1)
    pub fn id(self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Look up a player by numeric identifier
    pub fn from_id(id: usize) -> Option<Player> {
        match id {
            0 => Some(Player::First),
            1 => Some(Player::Second),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.id())
    }
}

/// A move: remove `count` objects from pile `pile`
///
/// Ordering is by pile index, then count. This is the enumeration order of
/// [`crate::nim::Nim::legal_actions`] and therefore the greedy tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Action {
    pub pile: usize,
    pub count: u32,
}

impl Action {
    pub fn new(pile: usize, count: u32) -> Self {
        Self { pile, count }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.count, self.pile)
    }
}

/// Ordered pile sizes
///
/// Two configurations are equal only if every pile matches in order, so
/// `[1, 3]` and `[3, 1]` are distinct value-table keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piles(Vec<u32>);

impl Piles {
    pub fn new(piles: Vec<u32>) -> Self {
        Self(piles)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Number of piles
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Objects remaining across all piles
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&pile| u64::from(pile)).sum()
    }

    /// True when every pile has been emptied
    pub fn all_empty(&self) -> bool {
        self.0.iter().all(|&pile| pile == 0)
    }

    /// Remove objects. Callers validate the action first.
    pub(crate) fn take(&mut self, action: Action) {
        self.0[action.pile] -= action.count;
    }
}

impl Default for Piles {
    fn default() -> Self {
        Self(DEFAULT_PILES.to_vec())
    }
}

impl Borrow<[u32]> for Piles {
    fn borrow(&self) -> &[u32] {
        &self.0
    }
}

impl From<&[u32]> for Piles {
    fn from(piles: &[u32]) -> Self {
        Self(piles.to_vec())
    }
}

impl fmt::Display for Piles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

impl FromStr for Piles {
    type Err = Error;

    /// Parse comma-separated pile sizes, e.g. `"1,3,5,7"` or `"[1, 3, 5, 7]"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        if trimmed.trim().is_empty() {
            return Err(Error::InvalidPiles {
                input: s.to_string(),
                reason: "at least one pile is required".to_string(),
            });
        }

        trimmed
            .split(',')
            .map(|part| {
                part.trim().parse::<u32>().map_err(|e| Error::InvalidPiles {
                    input: s.to_string(),
                    reason: format!("'{}' is not a pile size: {e}", part.trim()),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Piles)
    }
}
