//! Table occupants: loose cards, builds, and staging stacks.
//!
//! Everything sitting on the table is one of exactly three things, and
//! `TableItem` is a closed sum type so every consumer handles all three
//! at compile time:
//!
//! - [`LooseCard`]: a single trailed card, capturable by value match.
//! - [`Build`]: cards pre-committed to a target value, capturable by a
//!   matching hand card; extendable while it holds a single group.
//! - [`StagingStack`]: a provisional combination pending finalize or
//!   cancel; not committed and not capturable.
//!
//! Items carry a `TableId` allocated by the game state so actions can
//! reference them across the wire. Table order is chronological
//! placement and is never re-sorted.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::core::card::Card;
use crate::core::player::PlayerId;

/// Identifier for a table occupant, unique within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableId(pub u32);

impl TableId {
    /// Create a table ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table({})", self.0)
    }
}

/// A single card trailed onto the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LooseCard {
    pub id: TableId,
    pub card: Card,
}

/// A build: table cards committed to a capture value.
///
/// Invariants maintained by the executor:
/// - `value` is 2..=10 and the constituents partition into groups each
///   summing to `value`;
/// - 1..=5 constituent cards;
/// - `extendable` is true only while the build holds a single group
///   (merged/doubled builds are locked at their value).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    pub id: TableId,
    pub owner: PlayerId,
    /// Constituents in commitment order: table cards first, the hand
    /// card played into the build last.
    pub cards: SmallVec<[Card; 5]>,
    pub value: u8,
    pub extendable: bool,
}

impl Build {
    /// Number of constituent cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// A build always holds at least one card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Where a staged card came from; cancel returns it there verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageSource {
    Hand,
    Table,
}

/// One card inside a staging stack, tagged with its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedCard {
    pub card: Card,
    pub source: StageSource,
}

/// A provisional, uncommitted combination of cards.
///
/// A player owns at most one stack at a time, and a stack never
/// survives its owner's turn: it is finalized into a build or capture,
/// or cancelled back to its origins.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingStack {
    pub id: TableId,
    pub owner: PlayerId,
    pub cards: SmallVec<[StagedCard; 5]>,
}

impl StagingStack {
    /// Number of staged cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Finalize requires at least one card from each origin.
    #[must_use]
    pub fn has_both_sources(&self) -> bool {
        let hand = self
            .cards
            .iter()
            .any(|s| s.source == StageSource::Hand);
        let table = self
            .cards
            .iter()
            .any(|s| s.source == StageSource::Table);
        hand && table
    }
}

/// One occupant of the table.
///
/// Externally tagged on the wire (`{"loose": {...}}`) so the binary
/// snapshot codec can decode it too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableItem {
    Loose(LooseCard),
    Build(Build),
    Staging(StagingStack),
}

impl TableItem {
    /// This item's table ID.
    #[must_use]
    pub fn id(&self) -> TableId {
        match self {
            TableItem::Loose(loose) => loose.id,
            TableItem::Build(build) => build.id,
            TableItem::Staging(stack) => stack.id,
        }
    }

    /// The value a hand card must match to capture this item.
    ///
    /// Staging stacks are uncommitted and have no capture value.
    #[must_use]
    pub fn capture_value(&self) -> Option<u8> {
        match self {
            TableItem::Loose(loose) => Some(loose.card.value()),
            TableItem::Build(build) => Some(build.value),
            TableItem::Staging(_) => None,
        }
    }

    /// The cards embedded in this item, in stored order.
    #[must_use]
    pub fn cards(&self) -> SmallVec<[Card; 5]> {
        match self {
            TableItem::Loose(loose) => smallvec![loose.card],
            TableItem::Build(build) => build.cards.clone(),
            TableItem::Staging(stack) => stack.cards.iter().map(|s| s.card).collect(),
        }
    }

    /// Number of cards embedded in this item.
    #[must_use]
    pub fn card_count(&self) -> usize {
        match self {
            TableItem::Loose(_) => 1,
            TableItem::Build(build) => build.cards.len(),
            TableItem::Staging(stack) => stack.cards.len(),
        }
    }

    /// The build inside, if this is one.
    #[must_use]
    pub fn as_build(&self) -> Option<&Build> {
        match self {
            TableItem::Build(build) => Some(build),
            _ => None,
        }
    }

    /// The loose card inside, if this is one.
    #[must_use]
    pub fn as_loose(&self) -> Option<&LooseCard> {
        match self {
            TableItem::Loose(loose) => Some(loose),
            _ => None,
        }
    }

    /// The staging stack inside, if this is one.
    #[must_use]
    pub fn as_staging(&self) -> Option<&StagingStack> {
        match self {
            TableItem::Staging(stack) => Some(stack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn test_loose_capture_value_is_card_value() {
        let item = TableItem::Loose(LooseCard {
            id: TableId::new(1),
            card: card(Rank::Four, Suit::Hearts),
        });

        assert_eq!(item.capture_value(), Some(4));
        assert_eq!(item.card_count(), 1);
        assert_eq!(item.id(), TableId::new(1));
    }

    #[test]
    fn test_build_capture_value_is_declared_value() {
        let build = Build {
            id: TableId::new(2),
            owner: PlayerId::ZERO,
            cards: SmallVec::from_vec(vec![
                card(Rank::Four, Suit::Hearts),
                card(Rank::Four, Suit::Spades),
            ]),
            value: 8,
            extendable: true,
        };
        let item = TableItem::Build(build);

        assert_eq!(item.capture_value(), Some(8));
        assert_eq!(item.card_count(), 2);
    }

    #[test]
    fn test_staging_has_no_capture_value() {
        let stack = StagingStack {
            id: TableId::new(3),
            owner: PlayerId::ONE,
            cards: SmallVec::from_vec(vec![StagedCard {
                card: card(Rank::Two, Suit::Clubs),
                source: StageSource::Hand,
            }]),
        };
        let item = TableItem::Staging(stack);

        assert_eq!(item.capture_value(), None);
        assert_eq!(item.card_count(), 1);
    }

    #[test]
    fn test_has_both_sources() {
        let mut stack = StagingStack {
            id: TableId::new(4),
            owner: PlayerId::ZERO,
            cards: SmallVec::from_vec(vec![StagedCard {
                card: card(Rank::Three, Suit::Clubs),
                source: StageSource::Hand,
            }]),
        };
        assert!(!stack.has_both_sources());

        stack.cards.push(StagedCard {
            card: card(Rank::Five, Suit::Diamonds),
            source: StageSource::Table,
        });
        assert!(stack.has_both_sources());
    }

    #[test]
    fn test_cards_iterates_embedded_cards_in_order() {
        let build = TableItem::Build(Build {
            id: TableId::new(5),
            owner: PlayerId::ZERO,
            cards: SmallVec::from_vec(vec![
                card(Rank::Four, Suit::Hearts),
                card(Rank::Four, Suit::Spades),
            ]),
            value: 8,
            extendable: true,
        });

        let cards = build.cards().to_vec();
        assert_eq!(
            cards,
            vec![card(Rank::Four, Suit::Hearts), card(Rank::Four, Suit::Spades)]
        );

        let staging = TableItem::Staging(StagingStack {
            id: TableId::new(6),
            owner: PlayerId::ONE,
            cards: SmallVec::from_vec(vec![
                StagedCard {
                    card: card(Rank::Two, Suit::Clubs),
                    source: StageSource::Hand,
                },
                StagedCard {
                    card: card(Rank::Six, Suit::Hearts),
                    source: StageSource::Table,
                },
            ]),
        });
        let cards = staging.cards().to_vec();
        assert_eq!(
            cards,
            vec![card(Rank::Two, Suit::Clubs), card(Rank::Six, Suit::Hearts)]
        );
    }

    #[test]
    fn test_serde_tagging() {
        let item = TableItem::Loose(LooseCard {
            id: TableId::new(9),
            card: card(Rank::Ace, Suit::Spades),
        });

        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with("{\"loose\":"), "got {json}");

        let back: TableItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}
