use rand::SeedableRng;
use rand::rngs::StdRng;

use unobot::bots::cpu::{recommend_color, swap_target};
use unobot::card::{Card, Kind, Suit};
use unobot::{Action, Bot, CpuBot, Game, GameBuilder, GameError, TurnPhase};

fn red(n: u8) -> Card {
    Card::numbered(Suit::Red, n)
}

fn blue(n: u8) -> Card {
    Card::numbered(Suit::Blue, n)
}

fn wild() -> Card {
    Card::colorless(Kind::Wild)
}

fn draw_four() -> Card {
    Card::colorless(Kind::DrawFour)
}

/// Table with Red 4 showing and spare Blue cards in the draw pile, enough
/// for a scoring table to deal another round.
fn table(hands: Vec<Vec<Card>>, keep_score: bool) -> Result<Game, GameError> {
    let players = hands.len();
    let mut deck = vec![blue(8); 7 * players];
    deck.extend([blue(9), red(4)]);
    GameBuilder::new(players)?
        .with_deck(deck)
        .with_hands(hands)
        .with_scoring(keep_score)
        .build()
}

fn decide(game: &Game, seed: u64) -> Result<Action, GameError> {
    let seat = game.active_player();
    let state = game.state_view(seat)?;
    let legal = game.legal_actions(seat)?;
    let mut bot = CpuBot::new(StdRng::seed_from_u64(seed));
    Ok(bot.select_action(&state, &legal))
}

#[test]
fn matching_cards_are_played_before_wilds() -> Result<(), GameError> {
    let game = table(vec![vec![wild(), blue(1), red(7), draw_four()], vec![blue(2)]], false)?;
    for seed in 0..20 {
        assert_eq!(decide(&game, seed)?, Action::Play { hand_index: 2 });
    }
    Ok(())
}

#[test]
fn random_pick_stays_among_matching_cards() -> Result<(), GameError> {
    let game = table(
        vec![vec![wild(), red(1), blue(4), red(9), blue(2)], vec![blue(2)]],
        false,
    )?;
    for seed in 0..50 {
        let action = decide(&game, seed)?;
        assert!(
            matches!(action, Action::Play { hand_index: 1 | 2 | 3 }),
            "unexpected {action:?}"
        );
    }
    Ok(())
}

#[test]
fn scoring_mode_sheds_the_lowest_value_match() -> Result<(), GameError> {
    let game = table(
        vec![
            vec![Card::action(Suit::Red, Kind::Skip), red(9), red(2), wild()],
            vec![blue(2)],
        ],
        true,
    )?;
    assert_eq!(decide(&game, 0)?, Action::Play { hand_index: 2 });
    Ok(())
}

#[test]
fn draw_four_targets_a_short_next_hand() -> Result<(), GameError> {
    let game = table(
        vec![vec![blue(1), wild(), draw_four()], vec![blue(2), blue(3)]],
        false,
    )?;
    assert_eq!(decide(&game, 0)?, Action::Play { hand_index: 2 });
    Ok(())
}

#[test]
fn plain_wild_when_next_hand_is_long() -> Result<(), GameError> {
    let long_hand = vec![blue(1); 6];
    let game = table(vec![vec![blue(1), draw_four(), wild()], long_hand], false)?;
    assert_eq!(decide(&game, 0)?, Action::Play { hand_index: 2 });
    Ok(())
}

#[test]
fn swap_steals_a_short_hand_when_it_helps() -> Result<(), GameError> {
    let swap = Card::colorless(Kind::Swap);
    let game = table(
        vec![
            vec![swap, wild(), blue(1), blue(2), blue(3), blue(5)],
            vec![blue(1); 7],
            vec![blue(6), blue(7)],
        ],
        false,
    )?;
    assert_eq!(decide(&game, 0)?, Action::Play { hand_index: 0 });
    Ok(())
}

#[test]
fn swap_is_held_when_it_would_grow_the_hand() -> Result<(), GameError> {
    let swap = Card::colorless(Kind::Swap);
    let game = table(
        vec![
            vec![swap, wild()],
            vec![blue(1); 7],
            vec![blue(5), blue(6), blue(7)],
        ],
        false,
    )?;
    assert_eq!(decide(&game, 0)?, Action::Play { hand_index: 1 });
    Ok(())
}

#[test]
fn draws_when_nothing_matches_and_passes_when_dry() -> Result<(), GameError> {
    let game = table(vec![vec![blue(1)], vec![blue(2)]], false)?;
    assert_eq!(decide(&game, 0)?, Action::Draw);

    let dry = GameBuilder::new(2)?
        .with_deck(vec![red(4)])
        .with_hands(vec![vec![blue(1)], vec![blue(2)]])
        .build()?;
    assert_eq!(decide(&dry, 0)?, Action::Pass);
    Ok(())
}

#[test]
fn names_the_color_it_holds_most() -> Result<(), GameError> {
    let mut game = table(
        vec![
            vec![wild(), Card::numbered(Suit::Green, 1), Card::numbered(Suit::Green, 2), blue(3)],
            vec![blue(2)],
        ],
        false,
    )?;
    game.apply_action(0, Action::Play { hand_index: 0 })?;
    assert_eq!(game.turn_phase(), TurnPhase::AwaitingColor { player: 0 });
    assert_eq!(decide(&game, 0)?, Action::ChooseColor(Suit::Green));
    Ok(())
}

#[test]
fn random_color_without_colored_cards() -> Result<(), GameError> {
    let mut game = table(vec![vec![wild(), wild()], vec![blue(2)]], false)?;
    game.apply_action(0, Action::Play { hand_index: 0 })?;
    for seed in 0..10 {
        match decide(&game, seed)? {
            Action::ChooseColor(color) => assert!(color.is_color()),
            other => panic!("expected a color, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn swap_target_is_smallest_hand_lowest_seat() -> Result<(), GameError> {
    let game = table(
        vec![
            vec![Card::colorless(Kind::Swap), red(1)],
            vec![blue(1), blue(2), blue(3)],
            vec![blue(4), blue(5)],
            vec![blue(6), blue(7)],
        ],
        false,
    )?;
    let state = game.state_view(0)?;
    assert_eq!(swap_target(&state), Some(2));

    let mut game = game;
    game.apply_action(0, Action::Play { hand_index: 0 })?;
    assert_eq!(decide(&game, 0)?, Action::ChooseSwapTarget(2));
    Ok(())
}

#[test]
fn recommend_color_ignores_colorless_cards() {
    let hand = vec![wild(), draw_four(), Card::numbered(Suit::Yellow, 3)];
    assert_eq!(recommend_color(&hand), Some(Suit::Yellow));
    assert_eq!(recommend_color(&[]), None);
}
