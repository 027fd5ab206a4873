use pretty_assertions::assert_eq;

use unobot::card::{self, Card, Kind, Suit};
use unobot::{Action, GameBuilder, GameError, GameEvent, GameStatus, InvalidAction, TurnPhase};

fn red(n: u8) -> Card {
    Card::numbered(Suit::Red, n)
}

fn blue(n: u8) -> Card {
    Card::numbered(Suit::Blue, n)
}

#[test]
fn initial_setup_two_players() -> Result<(), GameError> {
    let deck = card::full_deck(None);
    let deck_len = deck.len();
    let game = GameBuilder::new(2)?.with_deck(deck).build()?;
    let view0 = game.state_view(0)?;
    assert_eq!(view0.settings.num_players, 2);
    assert_eq!(view0.hand.len(), 7);
    assert_eq!(view0.players[0].name, "You");
    assert_eq!(view0.players[1].name, "Player 2");
    assert_eq!(view0.players[1].hand_size, 7);
    assert_eq!(view0.draw_pile_count, deck_len - (7 * 2) - 1);
    assert_eq!(view0.discard_pile_count, 1);
    assert_eq!(game.total_cards(), deck_len);
    Ok(())
}

#[test]
fn ten_players_fit_in_one_deck() -> Result<(), GameError> {
    let game = GameBuilder::new(10)?.with_extra_cards(true).build()?;
    assert_eq!(game.total_cards(), 109);
    assert_eq!(game.draw_pile_count(), 109 - 70 - 1);
    Ok(())
}

#[test]
fn legal_actions_follow_color_number_or_wild() -> Result<(), GameError> {
    // Opening card is the last deck card: Red 4.
    let game = GameBuilder::new(2)?
        .with_deck(vec![blue(9), red(4)])
        .with_hands(vec![
            vec![red(1), blue(2), blue(4), Card::colorless(Kind::Wild)],
            vec![blue(7)],
        ])
        .build()?;
    assert_eq!(game.current_color(), Some(Suit::Red));
    assert_eq!(game.current_number(), 4);
    assert_eq!(
        game.legal_actions(0)?,
        vec![
            Action::Play { hand_index: 0 },
            Action::Play { hand_index: 2 },
            Action::Play { hand_index: 3 },
            Action::Draw,
            Action::DrawUntilPlayable,
            Action::Pass,
        ]
    );
    Ok(())
}

#[test]
fn illegal_play_is_rejected_without_changes() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![blue(9), red(4)])
        .with_hands(vec![vec![blue(2), red(1)], vec![blue(7)]])
        .build()?;
    let err = game
        .apply_action(0, Action::Play { hand_index: 0 })
        .expect_err("blue 2 does not match red 4");
    assert!(matches!(
        err,
        GameError::InvalidAction(InvalidAction::IllegalCard)
    ));
    let err = game
        .apply_action(0, Action::Play { hand_index: 5 })
        .expect_err("no such card");
    assert!(matches!(
        err,
        GameError::InvalidAction(InvalidAction::HandIndex(5))
    ));
    assert!(matches!(
        game.apply_action(1, Action::Pass),
        Err(GameError::NotPlayersTurn)
    ));
    assert!(matches!(
        game.apply_action(0, Action::ChooseColor(Suit::Green)),
        Err(GameError::InvalidAction(InvalidAction::WrongPhase))
    ));
    assert_eq!(game.hand(0)?.len(), 2);
    assert_eq!(game.current_player(), 0);
    Ok(())
}

#[test]
fn numbered_play_moves_to_next_player() -> Result<(), GameError> {
    let mut game = GameBuilder::new(3)?
        .with_deck(vec![blue(9), red(4)])
        .with_hands(vec![vec![red(1), blue(2)], vec![blue(7)], vec![blue(8)]])
        .build()?;
    let events = game.apply_action(0, Action::Play { hand_index: 0 })?;
    assert_eq!(
        events,
        vec![
            GameEvent::Played {
                player: 0,
                card: red(1),
                remaining: 1
            },
            GameEvent::Uno { player: 0 },
        ]
    );
    assert_eq!(game.current_player(), 1);
    assert_eq!(game.current_number(), 1);
    assert_eq!(game.top_discard(), Some(red(1)));
    Ok(())
}

#[test]
fn last_card_wins_immediately() -> Result<(), GameError> {
    // A holds only Red 5, B holds Red 5 and Blue 3, the table shows Red 5.
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![blue(9), red(5)])
        .with_hands(vec![vec![red(5)], vec![red(5), Card::numbered(Suit::Blue, 3)]])
        .build()?;
    let events = game.apply_action(0, Action::Play { hand_index: 0 })?;
    assert!(events.contains(&GameEvent::RoundWon {
        winner: 0,
        points: 0
    }));
    assert!(events.contains(&GameEvent::MatchWon { winner: 0 }));
    assert_eq!(game.status(), GameStatus::Finished { winner: 0 });
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.hand(1)?.len(), 2);
    assert!(game.legal_actions(1)?.is_empty());
    assert!(matches!(
        game.apply_action(1, Action::Pass),
        Err(GameError::GameOver)
    ));
    Ok(())
}

#[test]
fn drawing_keeps_the_turn() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![blue(9), blue(1), red(4)])
        .with_hands(vec![vec![blue(2)], vec![blue(7)]])
        .build()?;
    let events = game.apply_action(0, Action::Draw)?;
    assert_eq!(events, vec![GameEvent::Drew { player: 0, count: 1 }]);
    assert_eq!(game.hand(0)?, &[blue(2), blue(1)]);
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.turn_phase(), TurnPhase::AwaitingAction);
    Ok(())
}

#[test]
fn draw_until_playable_stops_at_first_match() -> Result<(), GameError> {
    // Draw pile after the opening Red 4: [Green 9, Red 7, Blue 3], Blue 3 on top.
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![
            Card::numbered(Suit::Green, 9),
            red(7),
            Card::numbered(Suit::Blue, 3),
            red(4),
        ])
        .with_hands(vec![vec![Card::numbered(Suit::Yellow, 1)], vec![blue(7)]])
        .build()?;
    let events = game.apply_action(0, Action::DrawUntilPlayable)?;
    assert_eq!(events, vec![GameEvent::Drew { player: 0, count: 2 }]);
    assert_eq!(game.hand(0)?.len(), 3);
    assert_eq!(game.draw_pile_count(), 1);
    assert!(game.legal_actions(0)?.contains(&Action::Play { hand_index: 2 }));
    Ok(())
}

#[test]
fn draw_until_playable_drains_both_piles_when_nothing_fits() -> Result<(), GameError> {
    // Draw pile after the opening Red 4: [Yellow 1, Green 2], Green 2 on top.
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![
            Card::numbered(Suit::Yellow, 1),
            Card::numbered(Suit::Green, 2),
            red(4),
        ])
        .with_hands(vec![
            vec![Card::colorless(Kind::Wild), red(6)],
            vec![Card::numbered(Suit::Yellow, 9), Card::numbered(Suit::Green, 3)],
        ])
        .build()?;
    game.apply_action(0, Action::Play { hand_index: 0 })?;
    game.apply_action(0, Action::ChooseColor(Suit::Blue))?;
    assert_eq!(game.active_player(), 1);

    // Neither pile holds a Blue card, and Red 4 under the Wild is recycled too.
    let events = game.apply_action(1, Action::DrawUntilPlayable)?;
    assert_eq!(
        events,
        vec![
            GameEvent::Recycled { count: 1 },
            GameEvent::Drew { player: 1, count: 3 },
            GameEvent::NothingToDraw { player: 1 },
        ]
    );
    assert_eq!(game.hand(1)?.len(), 5);
    assert_eq!(game.draw_pile_count(), 0);
    assert_eq!(game.discard_pile_count(), 1);
    assert_eq!(game.top_discard(), Some(Card::colorless(Kind::Wild)));
    assert_eq!(game.card_count(), game.total_cards());
    assert_eq!(game.legal_actions(1)?, vec![Action::Pass]);
    Ok(())
}

#[test]
fn draw_recycles_discards_under_the_top_card() -> Result<(), GameError> {
    // Empty draw pile after the opening card; plays build up the discard pile.
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![red(4)])
        .with_hands(vec![vec![red(1), red(2), blue(5)], vec![red(3), blue(6)]])
        .build()?;
    game.apply_action(0, Action::Play { hand_index: 0 })?;
    game.apply_action(1, Action::Play { hand_index: 0 })?;
    assert_eq!(game.discard_pile_count(), 3);
    assert_eq!(game.draw_pile_count(), 0);

    let events = game.apply_action(0, Action::Draw)?;
    assert_eq!(
        events,
        vec![
            GameEvent::Recycled { count: 2 },
            GameEvent::Drew { player: 0, count: 1 },
        ]
    );
    assert_eq!(game.top_discard(), Some(red(3)));
    assert_eq!(game.discard_pile_count(), 1);
    assert_eq!(game.draw_pile_count(), 1);
    assert_eq!(game.card_count(), game.total_cards());
    Ok(())
}

#[test]
fn detects_stalemate_draw_when_no_draws_and_no_plays() -> Result<(), GameError> {
    // Only the opening card exists outside the hands, and nothing matches it.
    let mut game = GameBuilder::new(2)?
        .with_deck(vec![red(4)])
        .with_hands(vec![vec![blue(1)], vec![Card::numbered(Suit::Green, 2)]])
        .build()?;

    assert_eq!(game.legal_actions(0)?, vec![Action::Pass]);
    assert!(matches!(
        game.apply_action(0, Action::Draw),
        Err(GameError::InvalidAction(InvalidAction::NothingToDraw))
    ));
    game.apply_action(0, Action::Pass)?;
    assert_eq!(game.stalled_turns(), 1);
    let events = game.apply_action(1, Action::Pass)?;
    assert!(events.contains(&GameEvent::RoundStalled));
    assert!(events.contains(&GameEvent::MatchDrawn));
    assert_eq!(game.status(), GameStatus::Draw);
    assert!(game.is_finished());
    assert!(game.winner().is_none());
    Ok(())
}

#[test]
fn a_play_resets_the_stall_counter() -> Result<(), GameError> {
    let mut game = GameBuilder::new(3)?
        .with_deck(vec![red(4)])
        .with_hands(vec![vec![blue(1)], vec![red(2), red(3)], vec![blue(2)]])
        .build()?;
    game.apply_action(0, Action::Pass)?;
    assert_eq!(game.stalled_turns(), 1);
    game.apply_action(1, Action::Play { hand_index: 0 })?;
    assert_eq!(game.stalled_turns(), 0);
    assert_eq!(game.status(), GameStatus::Ongoing);
    Ok(())
}
