//! Draw and discard piles.
//!
//! Both piles are stacks with the top at the end of the vector. Every card
//! that leaves a pile is moved, never copied, so the total number of cards
//! across piles and hands stays fixed for a round.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::card::{Card, Kind};
use crate::error::GameError;

/// Uniform in-place shuffle (Fisher-Yates).
pub fn shuffle<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    cards.shuffle(rng);
}

#[derive(Clone, Debug, Default)]
pub struct Piles {
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl Piles {
    /// Wraps an already ordered draw pile. The last card is drawn first.
    pub fn new(draw: Vec<Card>) -> Self {
        Self {
            draw,
            discard: Vec::new(),
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draw.len()
    }

    pub fn discard_count(&self) -> usize {
        self.discard.len()
    }

    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn top_discard(&self) -> Option<&Card> {
        self.discard.last()
    }

    pub fn draw_pile(&self) -> &[Card] {
        &self.draw
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// Whether at least one card can still be drawn, counting the cards a
    /// recycle would bring back.
    pub fn can_draw(&self) -> bool {
        !self.draw.is_empty() || self.discard.len() > 1
    }

    pub fn discard(&mut self, card: Card) {
        self.discard.push(card);
    }

    /// Moves everything under the top discard back into the draw pile and
    /// shuffles it. Returns how many cards were recycled.
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let Some(top) = self.discard.pop() else {
            return 0;
        };
        let recycled = self.discard.len();
        self.draw.append(&mut self.discard);
        shuffle(&mut self.draw, rng);
        self.discard.push(top);
        debug!(recycled, "recycled discard pile into draw pile");
        recycled
    }

    /// Pops one card, recycling the discard pile first when the draw pile is empty.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.draw.is_empty() {
            self.recycle(rng);
        }
        self.draw.pop()
    }

    /// Draws up to `count` cards into `hand`, returning how many arrived.
    /// Running out of cards is not an error; the draw simply stops short.
    pub fn draw_into<R: Rng + ?Sized>(
        &mut self,
        hand: &mut Vec<Card>,
        count: usize,
        rng: &mut R,
    ) -> usize {
        let mut drawn = 0;
        while drawn < count {
            match self.draw_one(rng) {
                Some(card) => {
                    hand.push(card);
                    drawn += 1;
                }
                None => break,
            }
        }
        drawn
    }

    /// Deals `hand_size` cards to every hand, one hand at a time.
    pub fn deal_opening_hands<R: Rng + ?Sized>(
        &mut self,
        hands: &mut [Vec<Card>],
        hand_size: usize,
        rng: &mut R,
    ) -> Result<(), GameError> {
        for hand in hands.iter_mut() {
            if self.draw_into(hand, hand_size, rng) < hand_size {
                return Err(GameError::InvalidConfiguration(
                    "deck exhausted while dealing opening hands",
                ));
            }
        }
        Ok(())
    }

    /// Turns the top of the draw pile into the opening discard. A Draw 4 may
    /// not open the game: it goes back into the draw pile, which is shuffled
    /// before the next attempt.
    pub fn reveal_first_discard<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Card, GameError> {
        if !self.draw.iter().any(|card| card.kind != Kind::DrawFour) {
            return Err(GameError::InvalidConfiguration(
                "draw pile holds no card that can open the game",
            ));
        }
        let mut card = self.pop_for_reveal()?;
        while card.kind == Kind::DrawFour {
            debug!("draw 4 revealed as opening card, reshuffling");
            self.draw.push(card);
            shuffle(&mut self.draw, rng);
            card = self.pop_for_reveal()?;
        }
        self.discard.push(card);
        Ok(card)
    }

    fn pop_for_reveal(&mut self) -> Result<Card, GameError> {
        self.draw
            .pop()
            .ok_or(GameError::InvalidConfiguration("draw pile is empty"))
    }

    /// Collects both piles and every hand into the draw pile and shuffles it.
    pub fn gather<R: Rng + ?Sized>(&mut self, hands: &mut [Vec<Card>], rng: &mut R) {
        self.draw.append(&mut self.discard);
        for hand in hands.iter_mut() {
            self.draw.append(hand);
        }
        shuffle(&mut self.draw, rng);
    }
}
