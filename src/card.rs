use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Card colour. `Wild` marks the colorless cards and is never a playable colour.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Red,
    Blue,
    Green,
    Yellow,
    Wild,
}

impl Suit {
    /// The four colours a player may name, in declaration order.
    pub const COLORS: [Suit; 4] = [Suit::Red, Suit::Blue, Suit::Green, Suit::Yellow];

    #[inline]
    pub fn is_color(&self) -> bool {
        !matches!(self, Suit::Wild)
    }

    /// Parses a colour name, case-insensitively. `Wild` is rejected.
    pub fn parse_color(input: &str) -> Option<Suit> {
        match input.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Some(Suit::Red),
            "blue" | "b" => Some(Suit::Blue),
            "green" | "g" => Some(Suit::Green),
            "yellow" | "y" => Some(Suit::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Suit::Red => "Red",
            Suit::Blue => "Blue",
            Suit::Green => "Green",
            Suit::Yellow => "Yellow",
            Suit::Wild => "Wild",
        };
        f.write_str(name)
    }
}

/// What a card does when played.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Numbered,
    Skip,
    Reverse,
    DrawTwo,
    Wild,
    DrawFour,
    /// Optional-ruleset card: exchange hands with another player.
    Swap,
    /// Optional-ruleset card: collect every hand and redeal.
    Shuffle,
}

impl Kind {
    /// Matching key for non-numbered kinds. Two cards of the same kind match
    /// on number even when their colours differ.
    pub fn sentinel(&self) -> i8 {
        match self {
            Kind::Numbered => 0,
            Kind::DrawTwo => -1,
            Kind::Reverse => -2,
            Kind::Skip => -3,
            Kind::DrawFour => -4,
            Kind::Wild => -5,
            Kind::Swap => -6,
            Kind::Shuffle => -7,
        }
    }

    pub fn is_colorless(&self) -> bool {
        matches!(self, Kind::Wild | Kind::DrawFour | Kind::Swap | Kind::Shuffle)
    }

    pub fn points(&self) -> u32 {
        match self {
            Kind::Numbered => 0,
            Kind::Skip | Kind::Reverse | Kind::DrawTwo => ACTION_POINTS,
            Kind::Swap | Kind::Shuffle => EXTRA_POINTS,
            Kind::Wild | Kind::DrawFour => WILD_POINTS,
        }
    }
}

/// An immutable card. Cards are only ever moved between piles and hands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub kind: Kind,
    pub number: i8,
    pub points: u32,
}

pub const HAND_SIZE: usize = 7;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const STANDARD_DECK_SIZE: usize = 108;
pub const WILD_COPIES: usize = 4;
pub const ACTION_COPIES: usize = 2;
pub const ACTION_POINTS: u32 = 20;
pub const EXTRA_POINTS: u32 = 40;
pub const WILD_POINTS: u32 = 50;

impl Card {
    /// Numbered card. `number` must be within 0..=9.
    pub fn numbered(suit: Suit, number: u8) -> Self {
        debug_assert!(number <= 9 && suit.is_color());
        Self {
            suit,
            kind: Kind::Numbered,
            number: number as i8,
            points: number as u32,
        }
    }

    /// Coloured action card (Skip, Reverse, DrawTwo).
    pub fn action(suit: Suit, kind: Kind) -> Self {
        debug_assert!(!kind.is_colorless() && kind != Kind::Numbered);
        Self {
            suit,
            kind,
            number: kind.sentinel(),
            points: kind.points(),
        }
    }

    /// Colorless card (Wild, DrawFour, Swap, Shuffle).
    pub fn colorless(kind: Kind) -> Self {
        debug_assert!(kind.is_colorless());
        Self {
            suit: Suit::Wild,
            kind,
            number: kind.sentinel(),
            points: kind.points(),
        }
    }

    #[inline]
    pub fn is_colorless(&self) -> bool {
        self.kind.is_colorless()
    }

    /// Legality predicate against the current colour and number.
    #[inline]
    pub fn matches(&self, color: Option<Suit>, number: i8) -> bool {
        self.is_colorless() || Some(self.suit) == color || self.number == number
    }

    /// Short human readable name, e.g. `Red 5`, `Blue Draw 2`, `Draw 4`.
    pub fn label(&self) -> String {
        match self.kind {
            Kind::Numbered => format!("{} {}", self.suit, self.number),
            Kind::Skip => format!("{} Skip", self.suit),
            Kind::Reverse => format!("{} Reverse", self.suit),
            Kind::DrawTwo => format!("{} Draw 2", self.suit),
            Kind::Wild => String::from("Wild"),
            Kind::DrawFour => String::from("Draw 4"),
            Kind::Swap => String::from("Swap"),
            Kind::Shuffle => String::from("Shuffle"),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Builds the deck in deterministic order (unshuffled).
///
/// Per colour: one 0, two runs of 1-9 and two each of Skip, Reverse and
/// Draw 2. Then four Wild and four Draw 4, plus `extra` when given
/// (expected to be `Kind::Swap` or `Kind::Shuffle`).
pub fn full_deck(extra: Option<Kind>) -> Vec<Card> {
    let mut deck = Vec::with_capacity(STANDARD_DECK_SIZE + 1);
    for suit in Suit::COLORS {
        deck.push(Card::colorless(Kind::Wild));
        deck.push(Card::colorless(Kind::DrawFour));
        for _ in 0..ACTION_COPIES {
            deck.push(Card::action(suit, Kind::Skip));
            deck.push(Card::action(suit, Kind::Reverse));
            deck.push(Card::action(suit, Kind::DrawTwo));
            for number in 1..=9 {
                deck.push(Card::numbered(suit, number));
            }
        }
        deck.push(Card::numbered(suit, 0));
    }
    if let Some(kind) = extra {
        deck.push(Card::colorless(kind));
    }
    deck
}

/// Builds the deck, flipping a coin for the extra card when `include_extra` is set.
pub fn standard_deck<R: Rng + ?Sized>(include_extra: bool, rng: &mut R) -> Vec<Card> {
    let extra = include_extra.then(|| {
        if rng.gen_bool(0.5) {
            Kind::Swap
        } else {
            Kind::Shuffle
        }
    });
    full_deck(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn standard_composition() {
        let deck = full_deck(None);
        assert_eq!(deck.len(), STANDARD_DECK_SIZE);
        let count = |pred: &dyn Fn(&Card) -> bool| deck.iter().filter(|c| pred(c)).count();
        assert_eq!(count(&|c| c.kind == Kind::Wild), WILD_COPIES);
        assert_eq!(count(&|c| c.kind == Kind::DrawFour), WILD_COPIES);
        for suit in Suit::COLORS {
            assert_eq!(count(&|c| c.suit == suit), 25);
            assert_eq!(count(&|c| c.suit == suit && c.number == 0), 1);
            assert_eq!(count(&|c| c.suit == suit && c.kind == Kind::Skip), 2);
            assert_eq!(count(&|c| c.suit == suit && c.number == 7), 2);
        }
    }

    #[test]
    fn extra_card_is_swap_or_shuffle() {
        let mut rng = StdRng::seed_from_u64(11);
        let deck = standard_deck(true, &mut rng);
        assert_eq!(deck.len(), STANDARD_DECK_SIZE + 1);
        let extras = deck
            .iter()
            .filter(|c| matches!(c.kind, Kind::Swap | Kind::Shuffle))
            .count();
        assert_eq!(extras, 1);
        assert_eq!(standard_deck(false, &mut rng).len(), STANDARD_DECK_SIZE);
    }

    #[test]
    fn points_follow_kind() {
        assert_eq!(Card::numbered(Suit::Red, 7).points, 7);
        assert_eq!(Card::action(Suit::Blue, Kind::DrawTwo).points, 20);
        assert_eq!(Card::colorless(Kind::DrawFour).points, 50);
        assert_eq!(Card::colorless(Kind::Swap).points, 40);
    }

    #[test]
    fn matching_predicate() {
        let red_skip = Card::action(Suit::Red, Kind::Skip);
        let blue_skip = Card::action(Suit::Blue, Kind::Skip);
        assert!(red_skip.matches(Some(Suit::Red), 4));
        assert!(blue_skip.matches(Some(Suit::Red), Kind::Skip.sentinel()));
        assert!(!blue_skip.matches(Some(Suit::Red), 4));
        assert!(Card::colorless(Kind::Wild).matches(Some(Suit::Green), 2));
        assert!(!Card::numbered(Suit::Green, 2).matches(None, 3));
    }

    #[test]
    fn parses_color_names() {
        assert_eq!(Suit::parse_color(" Yellow "), Some(Suit::Yellow));
        assert_eq!(Suit::parse_color("g"), Some(Suit::Green));
        assert_eq!(Suit::parse_color("wild"), None);
    }
}
