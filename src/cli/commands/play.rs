//! Play command - Train an agent, then play it at the console

use std::io::{BufRead, BufReader, Write};

use anyhow::{Result, anyhow};
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Error,
    cli::{
        commands::train_agent,
        config::TrainingArgs,
        output::{print_piles, print_section, print_training_result, seat_label},
    },
    nim::{Action, Piles, Player},
    pipeline,
    ports::{Agent, Observer},
};

#[derive(Parser, Debug)]
#[command(about = "Train an agent, then play against it")]
pub struct PlayArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Your seat: 0 moves first, 1 moves second (random if omitted)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub human_player: Option<u8>,
}

/// Human move source reading "pile" and "count" answers line by line
pub struct ConsoleHuman<R> {
    input: R,
}

impl<R: BufRead> ConsoleHuman<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn ask(&mut self, prompt: &str) -> Result<u32, Error> {
        loop {
            print!("{prompt}");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(Error::InputClosed);
            }
            match line.trim().parse::<u32>() {
                Ok(value) => return Ok(value),
                Err(_) => println!("Please enter a non-negative whole number."),
            }
        }
    }
}

impl<R: BufRead + Send> Agent for ConsoleHuman<R> {
    fn select_action(&mut self, piles: &Piles) -> crate::Result<Action> {
        print_piles(piles);
        println!("Your Turn");
        let pile = self.ask("Choose Pile: ")?;
        let count = self.ask("Choose Count: ")?;
        Ok(Action::new(pile as usize, count))
    }

    fn name(&self) -> &str {
        "Human"
    }
}

/// Announces the AI's moves and rejected human moves
struct ConsoleObserver {
    human_player: Player,
}

impl Observer for ConsoleObserver {
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        player: Player,
        piles_before: &Piles,
        action: Action,
    ) -> crate::Result<()> {
        if player != self.human_player {
            print_piles(piles_before);
            println!("AI's Turn");
            println!(
                "AI chose to take {} from pile {}.",
                action.count, action.pile
            );
        }
        Ok(())
    }

    fn on_rejected_move(
        &mut self,
        _player: Player,
        _action: Action,
        error: &Error,
    ) -> crate::Result<()> {
        println!("Invalid move ({error}), try again.");
        Ok(())
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let run = args.training.resolve()?;

    print_section("Training the AI");
    let (mut agent, result) = train_agent(&args.training, &run, Vec::new())?;
    print_training_result(&result);

    let mut rng = match run.training.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let human_player = match args.human_player {
        Some(id) => Some(
            Player::from_id(usize::from(id))
                .ok_or_else(|| anyhow!("Invalid value '{id}' for --human-player"))?,
        ),
        None => None,
    };
    // Drawn here so the console observer knows which side is human
    let human_player = human_player.unwrap_or_else(|| {
        if rng.random_bool(0.5) {
            Player::First
        } else {
            Player::Second
        }
    });

    print_section(&format!(
        "You are {human_player} ({})",
        if human_player == Player::First {
            "moving first"
        } else {
            "moving second"
        }
    ));

    let mut human = ConsoleHuman::new(BufReader::new(std::io::stdin()));
    let mut observer = ConsoleObserver { human_player };
    let outcome = pipeline::play(
        &mut agent,
        &mut human,
        Some(human_player),
        run.training.initial_piles.clone(),
        &mut rng,
        &mut observer,
    )?;

    println!();
    println!("GAME OVER");
    println!(
        "Winner is {}",
        seat_label(outcome.winner, outcome.human_player)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_console_human_reads_pile_and_count() {
        let mut human = ConsoleHuman::new(Cursor::new("2\n3\n"));
        let action = human.select_action(&Piles::default()).unwrap();
        assert_eq!(action, Action::new(2, 3));
    }

    #[test]
    fn test_console_human_skips_unparseable_lines() {
        let mut human = ConsoleHuman::new(Cursor::new("two\n1\n-1\n1\n"));
        let action = human.select_action(&Piles::default()).unwrap();
        assert_eq!(action, Action::new(1, 1));
    }

    #[test]
    fn test_console_human_reports_closed_input() {
        let mut human = ConsoleHuman::new(Cursor::new("0\n"));
        assert!(matches!(
            human.select_action(&Piles::default()),
            Err(Error::InputClosed)
        ));
    }
}
