//! Nim game implementation

pub mod game;
pub mod piles;

pub use game::Nim;
pub use piles::{Action, Piles, Player};
