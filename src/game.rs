use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::action::{Action, PlayerId};
use crate::card::{Card, Kind, Suit, standard_deck};
use crate::effect::{GameEvent, plan_effect};
use crate::error::{GameError, InvalidAction};
use crate::piles::Piles;
use crate::score::{match_winner, round_points};
use crate::state::{
    FirstPlayer, GameSettings, GameStateView, GameStatus, PlayerPublicState, Role, TurnPhase,
};
use crate::turn::{Direction, TurnOrder};

const DEFAULT_SEED: u64 = 0x5EED_0B07_5EED_0B07;

/// Number on the table before the opening card is revealed.
const UNSET_NUMBER: i8 = -9;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub num_players: usize,
    pub seed: u64,
    pub include_extra_cards: bool,
    pub keep_score: bool,
    pub first_player: FirstPlayer,
    pub hand_size: Option<usize>,
}

impl GameConfig {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        GameSettings::new(num_players)?;
        Ok(Self {
            num_players,
            seed,
            include_extra_cards: false,
            keep_score: false,
            first_player: FirstPlayer::You,
            hand_size: None,
        })
    }
}

/// Builder that enables deterministic deck and hand injection for tests.
pub struct GameBuilder {
    config: GameConfig,
    deck: Option<Vec<Card>>,
    hands: Option<Vec<Vec<Card>>>,
}

impl GameBuilder {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(num_players, DEFAULT_SEED)?,
            deck: None,
            hands: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` as the draw pile, unshuffled. The last card is on top.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Skip the opening deal and hand these cards out instead, one hand per seat.
    pub fn with_hands(mut self, hands: Vec<Vec<Card>>) -> Self {
        self.hands = Some(hands);
        self
    }

    /// Add one Swap or Shuffle card to a generated deck.
    pub fn with_extra_cards(mut self, include: bool) -> Self {
        self.config.include_extra_cards = include;
        self
    }

    pub fn with_scoring(mut self, keep_score: bool) -> Self {
        self.config.keep_score = keep_score;
        self
    }

    pub fn with_first_player(mut self, first_player: FirstPlayer) -> Self {
        self.config.first_player = first_player;
        self
    }

    /// Override the opening hand size (7 by default).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = Some(hand_size);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

#[derive(Clone, Debug)]
struct PlayerState {
    name: String,
    role: Role,
    score: u32,
    hand: Vec<Card>,
}

impl PlayerState {
    fn new(seat: PlayerId) -> Self {
        if seat == 0 {
            Self {
                name: String::from("You"),
                role: Role::You,
                score: 0,
                hand: Vec::new(),
            }
        } else {
            Self {
                name: format!("Player {}", seat + 1),
                role: Role::Cpu,
                score: 0,
                hand: Vec::new(),
            }
        }
    }
}

/// Core engine: one match of one or more rounds.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    players: Vec<PlayerState>,
    piles: Piles,
    turn: TurnOrder,
    current_color: Option<Suit>,
    current_number: i8,
    stalled_turns: usize,
    round: usize,
    total_cards: usize,
    opening_events: Vec<GameEvent>,
    rng: StdRng,
}

impl Game {
    pub fn builder(num_players: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(num_players)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Seat whose turn it is.
    pub fn current_player(&self) -> PlayerId {
        self.turn.current()
    }

    /// Seat the engine is waiting on. Differs from [`Game::current_player`]
    /// while the player who played a colorless card still has to choose.
    pub fn active_player(&self) -> PlayerId {
        match self.phase {
            TurnPhase::AwaitingColor { player } | TurnPhase::AwaitingSwapTarget { player } => {
                player
            }
            TurnPhase::AwaitingAction | TurnPhase::GameOver => self.turn.current(),
        }
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.turn.direction()
    }

    pub fn current_color(&self) -> Option<Suit> {
        self.current_color
    }

    pub fn current_number(&self) -> i8 {
        self.current_number
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn stalled_turns(&self) -> usize {
        self.stalled_turns
    }

    pub fn scores(&self) -> Vec<u32> {
        self.players.iter().map(|player| player.score).collect()
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.players
            .get(player)
            .map(|state| state.hand.as_slice())
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn top_discard(&self) -> Option<Card> {
        self.piles.top_discard().copied()
    }

    pub fn draw_pile_count(&self) -> usize {
        self.piles.draw_count()
    }

    pub fn discard_pile_count(&self) -> usize {
        self.piles.discard_count()
    }

    /// Cards in play at construction; constant for the whole match.
    pub fn total_cards(&self) -> usize {
        self.total_cards
    }

    /// Cards currently held across both piles and every hand.
    pub fn card_count(&self) -> usize {
        self.piles.len() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    /// Events produced while setting up the first round (opening card, colour request).
    pub fn opening_events(&self) -> &[GameEvent] {
        &self.opening_events
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. } | GameStatus::Draw)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Whether `card` may be played on the current discard state.
    pub fn is_playable(&self, card: &Card) -> bool {
        card.matches(self.current_color, self.current_number)
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        if perspective >= self.players.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name.clone(),
                role: player.role,
                hand_size: player.hand.len(),
                score: player.score,
                is_current: idx == self.turn.current(),
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings,
            phase: self.phase,
            status: self.status,
            round: self.round,
            self_player: perspective,
            current_player: self.turn.current(),
            direction: self.turn.direction(),
            current_color: self.current_color,
            current_number: self.current_number,
            top_discard: self.top_discard(),
            draw_pile_count: self.piles.draw_count(),
            discard_pile_count: self.piles.discard_count(),
            stalled_turns: self.stalled_turns,
            players,
            hand: self.players[perspective].hand.clone(),
        })
    }

    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.active_player() {
            return Err(GameError::NotPlayersTurn);
        }
        let actions = match self.phase {
            TurnPhase::AwaitingAction => {
                let mut actions: Vec<Action> = self.players[player]
                    .hand
                    .iter()
                    .enumerate()
                    .filter(|(_, card)| self.is_playable(card))
                    .map(|(hand_index, _)| Action::Play { hand_index })
                    .collect();
                if self.piles.can_draw() {
                    actions.push(Action::Draw);
                    actions.push(Action::DrawUntilPlayable);
                }
                actions.push(Action::Pass);
                actions
            }
            TurnPhase::AwaitingColor { .. } => {
                Suit::COLORS.into_iter().map(Action::ChooseColor).collect()
            }
            TurnPhase::AwaitingSwapTarget { player } => (0..self.players.len())
                .filter(|seat| *seat != player)
                .map(Action::ChooseSwapTarget)
                .collect(),
            TurnPhase::GameOver => Vec::new(),
        };
        Ok(actions)
    }

    /// Applies one action atomically and reports what happened.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.active_player() {
            return Err(GameError::NotPlayersTurn);
        }

        let mut events = Vec::new();
        match (self.phase, action) {
            (TurnPhase::AwaitingAction, Action::Play { hand_index }) => {
                self.play_card(player, hand_index, &mut events)?
            }
            (TurnPhase::AwaitingAction, Action::Draw) => {
                if !self.piles.can_draw() {
                    return Err(InvalidAction::NothingToDraw.into());
                }
                self.draw_for(player, 1, &mut events);
            }
            (TurnPhase::AwaitingAction, Action::DrawUntilPlayable) => {
                if !self.piles.can_draw() {
                    return Err(InvalidAction::NothingToDraw.into());
                }
                self.draw_until_playable(player, &mut events);
            }
            (TurnPhase::AwaitingAction, Action::Pass) => self.void_turn(player, &mut events),
            (TurnPhase::AwaitingColor { .. }, Action::ChooseColor(color)) => {
                if !color.is_color() {
                    return Err(InvalidAction::InvalidColor(color).into());
                }
                self.current_color = Some(color);
                self.phase = TurnPhase::AwaitingAction;
                events.push(GameEvent::ColorChosen { player, color });
            }
            (TurnPhase::AwaitingSwapTarget { .. }, Action::ChooseSwapTarget(target)) => {
                if target == player || target >= self.players.len() {
                    return Err(InvalidAction::InvalidSwapTarget(target).into());
                }
                self.swap_hands(player, target);
                self.phase = TurnPhase::AwaitingColor { player };
                events.push(GameEvent::HandsSwapped { player, target });
            }
            _ => return Err(InvalidAction::WrongPhase.into()),
        }
        debug_assert_eq!(self.card_count(), self.total_cards);
        Ok(events)
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            deck,
            hands,
        } = builder;
        let mut settings = GameSettings::new(config.num_players)?;
        settings.include_extra_cards = config.include_extra_cards;
        settings.keep_score = config.keep_score;
        settings.first_player = config.first_player;
        if let Some(hand_size) = config.hand_size {
            if hand_size == 0 {
                return Err(GameError::InvalidConfiguration("hand size must be positive"));
            }
            settings.hand_size = hand_size;
        }
        if let FirstPlayer::Seat(seat) = settings.first_player {
            if seat >= settings.num_players {
                return Err(GameError::InvalidConfiguration(
                    "first player seat is out of range",
                ));
            }
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let deck = if let Some(deck) = deck {
            deck
        } else {
            let mut deck = standard_deck(settings.include_extra_cards, &mut rng);
            deck.shuffle(&mut rng);
            deck
        };

        let mut players: Vec<PlayerState> =
            (0..settings.num_players).map(PlayerState::new).collect();
        let mut piles = Piles::new(deck);
        match hands {
            Some(hands) => {
                if hands.len() != settings.num_players {
                    return Err(GameError::InvalidConfiguration(
                        "one hand per player is required",
                    ));
                }
                for (player, hand) in players.iter_mut().zip(hands) {
                    player.hand = hand;
                }
            }
            None => {
                if piles.len() <= settings.hand_size * settings.num_players {
                    return Err(GameError::InvalidConfiguration(
                        "deck does not contain enough cards to deal hands",
                    ));
                }
                let mut dealt: Vec<Vec<Card>> = vec![Vec::new(); settings.num_players];
                piles.deal_opening_hands(&mut dealt, settings.hand_size, &mut rng)?;
                for (player, hand) in players.iter_mut().zip(dealt) {
                    player.hand = hand;
                }
            }
        }
        let total_cards = piles.len() + players.iter().map(|p| p.hand.len()).sum::<usize>();

        let mut game = Game {
            settings,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingAction,
            players,
            piles,
            turn: TurnOrder::new(settings.num_players, 0),
            current_color: None,
            current_number: UNSET_NUMBER,
            stalled_turns: 0,
            round: 1,
            total_cards,
            opening_events: Vec::new(),
            rng,
        };
        if game.settings.keep_score && !game.can_redeal() {
            return Err(GameError::InvalidConfiguration(
                "deck is too small to deal another round",
            ));
        }
        let mut events = Vec::new();
        game.open_round(&mut events)?;
        game.opening_events = events;
        Ok(game)
    }

    fn pick_first_player(&mut self) -> PlayerId {
        match self.settings.first_player {
            FirstPlayer::You => 0,
            FirstPlayer::RandomCpu => self.rng.gen_range(1..self.players.len()),
            FirstPlayer::Seat(seat) => seat,
        }
    }

    /// Resets the table state and reveals the opening discard. Hands must
    /// already be dealt.
    fn open_round(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let first = self.pick_first_player();
        self.turn = TurnOrder::new(self.players.len(), first);
        self.stalled_turns = 0;
        self.current_color = None;
        self.current_number = UNSET_NUMBER;

        let opening = self.piles.reveal_first_discard(&mut self.rng)?;
        self.current_number = opening.number;
        events.push(GameEvent::OpeningCard { card: opening });
        if opening.is_colorless() {
            self.phase = TurnPhase::AwaitingColor { player: first };
        } else {
            self.current_color = Some(opening.suit);
            self.phase = TurnPhase::AwaitingAction;
        }
        debug!(round = self.round, first, card = %opening, "round opened");
        Ok(())
    }

    /// Every card gathered together deals a full round and still leaves an
    /// opening card that is not a Draw 4.
    fn can_redeal(&self) -> bool {
        let draw_fours = self
            .piles
            .draw_pile()
            .iter()
            .chain(self.piles.discard_pile())
            .chain(self.players.iter().flat_map(|player| &player.hand))
            .filter(|card| card.kind == Kind::DrawFour)
            .count();
        self.total_cards > self.settings.hand_size * self.players.len() + draw_fours
    }

    /// Gathers every card, reshuffles and deals a fresh round. Nothing is
    /// touched when the table cannot be redealt.
    fn start_next_round(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        if !self.can_redeal() {
            return Err(GameError::InvalidConfiguration(
                "not enough cards to deal another round",
            ));
        }
        self.round += 1;
        let mut hands: Vec<Vec<Card>> = self
            .players
            .iter_mut()
            .map(|player| std::mem::take(&mut player.hand))
            .collect();
        self.piles.gather(&mut hands, &mut self.rng);
        self.piles
            .deal_opening_hands(&mut hands, self.settings.hand_size, &mut self.rng)?;
        for (player, hand) in self.players.iter_mut().zip(hands) {
            player.hand = hand;
        }
        let mut opening = Vec::new();
        self.open_round(&mut opening)?;
        events.push(GameEvent::NewRound {
            round: self.round,
            first_player: self.turn.current(),
        });
        events.extend(opening);
        Ok(())
    }

    fn play_card(
        &mut self,
        player: PlayerId,
        hand_index: usize,
        events: &mut Vec<GameEvent>,
    ) -> Result<(), GameError> {
        let Some(card) = self.players[player].hand.get(hand_index).copied() else {
            return Err(InvalidAction::HandIndex(hand_index).into());
        };
        if !self.is_playable(&card) {
            return Err(InvalidAction::IllegalCard.into());
        }
        self.players[player].hand.remove(hand_index);
        self.stalled_turns = 0;
        let remaining = self.players[player].hand.len();
        events.push(GameEvent::Played {
            player,
            card,
            remaining,
        });
        if remaining == 1 {
            events.push(GameEvent::Uno { player });
        }

        self.current_number = card.number;
        if !card.is_colorless() {
            self.current_color = Some(card.suit);
        }

        let plan = plan_effect(card.kind, self.players.len(), remaining == 0);
        if plan.reverse {
            self.turn.reverse();
            events.push(GameEvent::Reversed);
        }
        if plan.ends_round {
            self.piles.discard(card);
            self.finish_round(Some(player), events);
            return Ok(());
        }

        self.turn.advance();
        if plan.forced_draw > 0 {
            let victim = self.turn.current();
            self.draw_for(victim, plan.forced_draw, events);
        }
        if plan.skip_next {
            if plan.forced_draw == 0 {
                events.push(GameEvent::Skipped {
                    player: self.turn.current(),
                });
            }
            self.turn.advance();
        }
        if plan.reshuffle_hands {
            self.reshuffle_hands(player);
            events.push(GameEvent::HandsReshuffled { dealer: player });
        }
        self.piles.discard(card);

        self.phase = if plan.swap_hands {
            TurnPhase::AwaitingSwapTarget { player }
        } else if plan.choose_color {
            TurnPhase::AwaitingColor { player }
        } else {
            TurnPhase::AwaitingAction
        };
        Ok(())
    }

    /// Draws up to `count` cards for `player`, recycling the discard pile as needed.
    fn draw_for(&mut self, player: PlayerId, count: usize, events: &mut Vec<GameEvent>) -> usize {
        let discard_before = self.piles.discard_count();
        let drawn = self
            .piles
            .draw_into(&mut self.players[player].hand, count, &mut self.rng);
        let recycled = discard_before.saturating_sub(self.piles.discard_count());
        if recycled > 0 {
            events.push(GameEvent::Recycled { count: recycled });
        }
        if drawn > 0 {
            events.push(GameEvent::Drew {
                player,
                count: drawn,
            });
        }
        if drawn < count {
            events.push(GameEvent::NothingToDraw { player });
        }
        debug!(player, requested = count, drawn, "draw");
        drawn
    }

    fn draw_until_playable(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        let mut drawn = 0;
        let mut recycled = 0;
        loop {
            let discard_before = self.piles.discard_count();
            let Some(card) = self.piles.draw_one(&mut self.rng) else {
                break;
            };
            recycled += discard_before.saturating_sub(self.piles.discard_count());
            self.players[player].hand.push(card);
            drawn += 1;
            if self.is_playable(&card) {
                break;
            }
        }
        if recycled > 0 {
            events.push(GameEvent::Recycled { count: recycled });
        }
        events.push(GameEvent::Drew {
            player,
            count: drawn,
        });
        if !self.players[player].hand.iter().any(|c| self.is_playable(c)) {
            events.push(GameEvent::NothingToDraw { player });
        }
    }

    fn void_turn(&mut self, player: PlayerId, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::TurnVoided { player });
        self.stalled_turns += 1;
        if self.stalled_turns >= self.players.len() {
            // Nobody can move and nothing is left to draw.
            self.finish_round(None, events);
            return;
        }
        self.turn.advance();
    }

    fn swap_hands(&mut self, a: PlayerId, b: PlayerId) {
        let hand_a = std::mem::take(&mut self.players[a].hand);
        let hand_b = std::mem::replace(&mut self.players[b].hand, hand_a);
        self.players[a].hand = hand_b;
    }

    /// Merges all hands and deals them back one card at a time, starting
    /// with `dealer` and following the current direction.
    fn reshuffle_hands(&mut self, dealer: PlayerId) {
        let mut pool: Vec<Card> = self
            .players
            .iter_mut()
            .flat_map(|player| std::mem::take(&mut player.hand))
            .collect();
        pool.shuffle(&mut self.rng);
        let seats = self.turn.seats_from(dealer);
        for (idx, card) in pool.into_iter().enumerate() {
            self.players[seats[idx % seats.len()]].hand.push(card);
        }
        debug!(dealer, "hands reshuffled and redealt");
    }

    /// Closes the current round. `winner` is `None` for a stalled round.
    fn finish_round(&mut self, winner: Option<PlayerId>, events: &mut Vec<GameEvent>) {
        let keep_score = self.settings.keep_score;
        match winner {
            Some(winner) => {
                let points = if keep_score {
                    let hands: Vec<&[Card]> =
                        self.players.iter().map(|p| p.hand.as_slice()).collect();
                    round_points(&hands)
                } else {
                    0
                };
                self.players[winner].score += points;
                info!(round = self.round, winner, points, "round won");
                events.push(GameEvent::RoundWon { winner, points });
                if !keep_score {
                    self.end_match(GameStatus::Finished { winner }, events);
                    return;
                }
                if let Some(champion) = match_winner(&self.scores()) {
                    self.end_match(GameStatus::Finished { winner: champion }, events);
                    return;
                }
            }
            None => {
                info!(round = self.round, "round stalled");
                events.push(GameEvent::RoundStalled);
                if !keep_score {
                    self.end_match(GameStatus::Draw, events);
                    return;
                }
            }
        }
        if let Err(err) = self.start_next_round(events) {
            warn!(%err, "cannot deal another round");
            self.end_match(GameStatus::Draw, events);
        }
    }

    fn end_match(&mut self, status: GameStatus, events: &mut Vec<GameEvent>) {
        self.status = status;
        self.phase = TurnPhase::GameOver;
        match status {
            GameStatus::Finished { winner } => {
                info!(winner, rounds = self.round, "match won");
                events.push(GameEvent::MatchWon { winner });
            }
            GameStatus::Draw => {
                info!(rounds = self.round, "match drawn");
                events.push(GameEvent::MatchDrawn);
            }
            GameStatus::Ongoing => {}
        }
    }
}
