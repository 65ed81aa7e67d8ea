//! Interactive game between a human move source and a trained agent

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    nim::{Action, Nim, Piles, Player},
    ports::{Agent, Observer},
    q_learning::QLearningAgent,
};

/// How an interactive game ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Seat the human played
    pub human_player: Player,
    /// Recorded winner
    pub winner: Player,
    /// Every applied move in order
    pub moves: Vec<(Player, Action)>,
}

impl SessionOutcome {
    pub fn human_won(&self) -> bool {
        self.winner == self.human_player
    }
}

/// Play one game of `human` against the trained `agent`
///
/// When `human_player` is `None` the human's seat is drawn uniformly at
/// random. The agent plays greedily. Moves proposed by the human are checked
/// against the legal actions first; rejected moves are reported to the
/// observer and requested again.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] when `initial_piles` holds no
/// objects. Propagates errors from the human move source (for instance a
/// closed input stream) and from observers.
pub fn play<R: Rng>(
    agent: &mut QLearningAgent,
    human: &mut dyn Agent,
    human_player: Option<Player>,
    initial_piles: Piles,
    rng: &mut R,
    observer: &mut dyn Observer,
) -> Result<SessionOutcome> {
    if initial_piles.all_empty() {
        return Err(Error::InvalidConfiguration {
            message: format!("initial piles {initial_piles} contain no objects to take"),
        });
    }

    let human_player = human_player.unwrap_or_else(|| {
        if rng.random_bool(0.5) {
            Player::First
        } else {
            Player::Second
        }
    });
    debug!(%human_player, piles = %initial_piles, "starting interactive game");

    observer.on_run_start(1)?;
    observer.on_game_start(0)?;

    let mut game = Nim::new(initial_piles);
    let mut moves = Vec::new();

    let winner = loop {
        if let Some(winner) = game.winner() {
            break winner;
        }

        let mover = game.player();
        let piles_before = game.piles().clone();
        let action = if mover == human_player {
            human_move(&game, human, observer)?
        } else {
            agent.choose_action(piles_before.as_slice(), false)?
        };

        game.apply_move(action)?;
        observer.on_move(0, moves.len(), mover, &piles_before, action)?;
        moves.push((mover, action));
    };

    observer.on_game_end(0, winner)?;
    observer.on_run_end()?;

    Ok(SessionOutcome {
        human_player,
        winner,
        moves,
    })
}

/// Ask the human for moves until one is legal
fn human_move(game: &Nim, human: &mut dyn Agent, observer: &mut dyn Observer) -> Result<Action> {
    let legal_actions = Nim::legal_actions(game.piles().as_slice());
    loop {
        let proposed = human.select_action(game.piles())?;
        if legal_actions.contains(&proposed) {
            return Ok(proposed);
        }
        if let Err(err) = game.validate(proposed) {
            debug!(%proposed, %err, "rejected move");
            observer.on_rejected_move(game.player(), proposed, &err)?;
        }
    }
}
