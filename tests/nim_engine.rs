//! Property tests for the Nim rules engine

use nim_ai::{Action, Error, Nim, Piles, Player};
use proptest::prelude::*;

fn piles_strategy() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(0u32..8, 1..6)
}

proptest! {
    #[test]
    fn legal_action_count_matches_objects(piles in piles_strategy()) {
        let actions = Nim::legal_actions(&piles);
        let total: u32 = piles.iter().sum();
        prop_assert_eq!(actions.len(), total as usize);
        prop_assert_eq!(Piles::new(piles).total(), u64::from(total));
    }

    #[test]
    fn legal_actions_are_sorted_and_unique(piles in piles_strategy()) {
        let actions = Nim::legal_actions(&piles);
        prop_assert!(actions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn every_legal_action_applies(piles in piles_strategy()) {
        for action in Nim::legal_actions(&piles) {
            let mut game = Nim::new(Piles::new(piles.clone()));
            game.apply_move(action).unwrap();

            prop_assert_eq!(
                game.piles().as_slice()[action.pile],
                piles[action.pile] - action.count
            );
            let before: u32 = piles.iter().sum();
            prop_assert_eq!(game.piles().total(), u64::from(before - action.count));
            if game.piles().all_empty() {
                // Player 0 took the last object and lost
                prop_assert_eq!(game.winner(), Some(Player::Second));
            } else {
                prop_assert_eq!(game.winner(), None);
                prop_assert_eq!(game.player(), Player::Second);
            }
        }
    }

    #[test]
    fn oversized_counts_are_rejected(piles in piles_strategy(), extra in 1u32..5) {
        prop_assume!(!piles.iter().all(|&p| p == 0));
        for (pile, &available) in piles.iter().enumerate() {
            let mut game = Nim::new(Piles::new(piles.clone()));
            let err = game.apply_move(Action::new(pile, available + extra)).unwrap_err();
            let is_invalid_count = matches!(err, Error::InvalidCount { .. });
            prop_assert!(is_invalid_count);
            prop_assert_eq!(game.piles().as_slice(), piles.as_slice());
        }
    }

    #[test]
    fn zero_counts_are_rejected(piles in piles_strategy()) {
        prop_assume!(!piles.iter().all(|&p| p == 0));
        let mut game = Nim::new(Piles::new(piles.clone()));
        let err = game.apply_move(Action::new(0, 0)).unwrap_err();
        let is_invalid_count = matches!(err, Error::InvalidCount { .. });
        prop_assert!(is_invalid_count);
        prop_assert_eq!(game.player(), Player::First);
    }

    #[test]
    fn out_of_range_piles_are_rejected(piles in piles_strategy(), offset in 0usize..3) {
        prop_assume!(!piles.iter().all(|&p| p == 0));
        let mut game = Nim::new(Piles::new(piles.clone()));
        let err = game.apply_move(Action::new(piles.len() + offset, 1)).unwrap_err();
        let is_invalid_pile = matches!(err, Error::InvalidPile { .. });
        prop_assert!(is_invalid_pile);
    }
}

#[test]
fn test_full_game_to_terminal() {
    let mut game = Nim::new(Piles::new(vec![2, 1]));
    game.apply_move(Action::new(0, 2)).unwrap();
    assert_eq!(game.player(), Player::Second);
    game.apply_move(Action::new(1, 1)).unwrap();

    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Player::First));
    assert!(matches!(
        game.apply_move(Action::new(0, 1)),
        Err(Error::GameAlreadyOver)
    ));
}

#[test]
fn test_parse_piles_from_cli_text() {
    let piles: Piles = "1, 3,5,7".parse().unwrap();
    assert_eq!(piles, Piles::default());
    assert!("1,x,3".parse::<Piles>().is_err());
}
