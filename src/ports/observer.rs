//! Observer port - abstraction for observing games as they are played
//!
//! Observers collect data from training runs, evaluation matches and
//! interactive sessions without coupling the game loops to any output format.

use crate::{
    Error, Result,
    nim::{Action, Piles, Player},
};

/// Observer trait for monitoring games
///
/// # Event Sequence
///
/// 1. `on_run_start(total_games)` - Once at the beginning
/// 2. For each game:
///    - `on_game_start(game_num)`
///    - `on_move(...)` - For each applied move
///    - `on_value_updated(...)` - For each Q-value update (training only)
///    - `on_rejected_move(...)` - For each rejected human move (sessions only)
///    - `on_game_end(game_num, winner)`
/// 3. `on_run_end()` - Once at the end
///
/// Every method has a no-op default.
///
/// # Examples
///
/// ```no_run
/// use nim_ai::{nim::Player, ports::Observer};
///
/// struct FirstSeatWins {
///     count: usize,
/// }
///
/// impl Observer for FirstSeatWins {
///     fn on_game_end(&mut self, _game_num: usize, winner: Player) -> nim_ai::Result<()> {
///         if winner == Player::First {
///             self.count += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    ///
    /// * `total_games` - Number of games that will be played
    fn on_run_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied.
    ///
    /// # Parameters
    ///
    /// * `game_num` - Index of the current game
    /// * `step_num` - Move number within the game (0-based)
    /// * `player` - Player who made the move
    /// * `piles_before` - Pile configuration before the move
    /// * `action` - The move
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _player: Player,
        _piles_before: &Piles,
        _action: Action,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the training driver updates a Q-value.
    fn on_value_updated(
        &mut self,
        _game_num: usize,
        _state: &Piles,
        _action: Action,
        _reward: f64,
        _value: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a proposed move fails validation and will be requested again.
    fn on_rejected_move(&mut self, _player: Player, _action: Action, _error: &Error) -> Result<()> {
        Ok(())
    }

    /// Called when a game ends.
    ///
    /// * `winner` - The player recorded as winner (the one who did not empty
    ///   the last pile)
    fn on_game_end(&mut self, _game_num: usize, _winner: Player) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
