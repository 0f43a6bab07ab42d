//! Cards for the 40-card Cassino deck.
//!
//! ## Deck composition
//!
//! Cassino plays with 4 suits × 10 ranks (ace through ten, no court
//! cards), for exactly 40 unique cards. Every rank maps to a capture
//! value in 1..=10 with the ace low.
//!
//! `Card` is an immutable value type; equality is by (rank, suit).

use serde::{Deserialize, Serialize};

/// One of the four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits, in deck-construction order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Single-character symbol for display.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank: ace through ten. No court cards in a Cassino deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
}

impl Rank {
    /// All ten ranks, ascending by capture value.
    pub const ALL: [Rank; 10] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
    ];

    /// Capture value of this rank: 1 for the ace, up to 10.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
        }
    }

    /// The rank with the given capture value, if one exists.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Rank> {
        match value {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ace => write!(f, "A"),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// A single playing card.
///
/// Copyable value type; the engine moves cards between locations by
/// value and relies on (rank, suit) equality for lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Capture value of this card (the rank's value).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Build the full 40-card deck in a fixed canonical order.
    ///
    /// The caller shuffles; construction order is suit-major so the
    /// unshuffled deck is reproducible in tests.
    #[must_use]
    pub fn deck() -> Vec<Card> {
        let mut cards = Vec::with_capacity(40);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
