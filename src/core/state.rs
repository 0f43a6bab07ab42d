//! Game state: the full immutable snapshot.
//!
//! ## GameState
//!
//! One value holds everything: the undealt deck, both hands, the table
//! in chronological placement order, both capture piles, and the
//! turn/round/score bookkeeping. The engine never edits a caller's
//! snapshot: `apply` clones (cheap via `im` structural sharing),
//! transforms the clone, and returns it.
//!
//! ## Card conservation
//!
//! At every reachable state the 40 cards are exactly distributed over
//! deck + hands + table items + capture groups. `total_card_count`
//! exists so tests can assert it.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use super::player::{PlayerId, PlayerPair};
use crate::table::{Build, StagingStack, TableId, TableItem};

/// One atomic capture event, in capture order: the captured cards in
/// table order, then the capturing card.
///
/// A player's pile is an append-only sequence of these; groups are
/// never reordered or merged, so the chronology survives for scoring
/// and the terminal sweep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureGroup {
    pub cards: SmallVec<[Card; 6]>,
}

impl CaptureGroup {
    /// Create a capture group from cards already in capture order.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    /// Number of cards in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Per-player scoring breakdown, filled in at game over.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Cards captured.
    pub cards: u32,
    /// Spades among them.
    pub spades: u32,
    /// Aces among them.
    pub aces: u32,
    /// Captured the ten of diamonds.
    pub big_cassino: bool,
    /// Captured the two of spades.
    pub little_cassino: bool,
    /// Bonus awarded for strictly most cards (0 on a tie or loss).
    pub cards_bonus: u32,
    /// Bonus awarded for strictly most spades (0 on a tie or loss).
    pub spades_bonus: u32,
    /// Aggregate score.
    pub total: u32,
}

/// Full per-category scoring result for both players.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub players: PlayerPair<ScoreBreakdown>,
}

/// The complete game snapshot.
///
/// All fields are public for inspection and serialization; mutation
/// goes through the crate-internal helpers so invariants stay in one
/// place. The canonical state always contains both hands; redacting
/// the opponent's hand for transmission is the transport layer's job
/// (see [`crate::view::PlayerView`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Remaining undealt cards; dealt from the end.
    pub deck: Vector<Card>,

    /// Both hands, hidden from the opponent in any external projection.
    pub hands: PlayerPair<Vector<Card>>,

    /// Table occupants in chronological placement order.
    pub table: Vector<TableItem>,

    /// Both capture piles, in chronological capture order.
    pub captures: PlayerPair<Vector<CaptureGroup>>,

    /// Whose turn it is.
    pub current_player: PlayerId,

    /// Current deal cycle, starting at 1.
    pub round: u32,

    /// Final scores; zero until game over.
    pub scores: PlayerPair<u32>,

    pub game_over: bool,

    /// Winner at game over; `None` while running or on a draw.
    pub winner: Option<PlayerId>,

    /// Last player to complete a capture; receives the terminal sweep.
    pub last_capturer: Option<PlayerId>,

    /// Per-category breakdown; set once at game over.
    pub score_details: Option<ScoreDetails>,

    /// Next table ID to allocate.
    next_table_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// An empty round-1 state.
    ///
    /// The deal manager populates real games; fixtures building
    /// hand-crafted positions start here too.
    #[must_use]
    pub fn new() -> Self {
        Self {
            deck: Vector::new(),
            hands: PlayerPair::default(),
            table: Vector::new(),
            captures: PlayerPair::default(),
            current_player: PlayerId::ZERO,
            round: 1,
            scores: PlayerPair::with_value(0),
            game_over: false,
            winner: None,
            last_capturer: None,
            score_details: None,
            next_table_id: 0,
        }
    }

    // === Table items ===

    /// Allocate a fresh table ID.
    ///
    /// Used by the executors, and by fixtures placing items on a
    /// hand-crafted table.
    pub fn alloc_table_id(&mut self) -> TableId {
        let id = TableId::new(self.next_table_id);
        self.next_table_id += 1;
        id
    }

    /// Find a table item by ID.
    #[must_use]
    pub fn find_item(&self, id: TableId) -> Option<&TableItem> {
        self.table.iter().find(|item| item.id() == id)
    }

    /// Index of a table item by ID.
    #[must_use]
    pub(crate) fn item_index(&self, id: TableId) -> Option<usize> {
        self.table.iter().position(|item| item.id() == id)
    }

    /// Remove a table item by ID, returning it.
    pub fn remove_item(&mut self, id: TableId) -> Option<TableItem> {
        let index = self.item_index(id)?;
        Some(self.table.remove(index))
    }

    /// Append a table item (chronological placement).
    pub fn push_item(&mut self, item: TableItem) {
        self.table.push_back(item);
    }

    /// The build owned by `player`, if any. At most one exists.
    #[must_use]
    pub fn build_of(&self, player: PlayerId) -> Option<&Build> {
        self.table
            .iter()
            .filter_map(TableItem::as_build)
            .find(|build| build.owner == player)
    }

    /// The open staging stack owned by `player`, if any.
    #[must_use]
    pub fn staging_of(&self, player: PlayerId) -> Option<&StagingStack> {
        self.table
            .iter()
            .filter_map(TableItem::as_staging)
            .find(|stack| stack.owner == player)
    }

    // === Hands ===

    /// A player's hand.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Vector<Card> {
        &self.hands[player]
    }

    /// Whether a player holds a specific card.
    #[must_use]
    pub fn hand_contains(&self, player: PlayerId, card: Card) -> bool {
        self.hands[player].iter().any(|c| *c == card)
    }

    /// Whether a player holds a card of the given capture value,
    /// excluding one specific card instance.
    #[must_use]
    pub fn hand_has_value_besides(&self, player: PlayerId, value: u8, besides: Card) -> bool {
        let mut skipped = false;
        self.hands[player].iter().any(|c| {
            if *c == besides && !skipped {
                skipped = true;
                false
            } else {
                c.value() == value
            }
        })
    }

    /// Remove one instance of a card from a hand.
    ///
    /// Returns true if the card was found and removed.
    pub fn remove_from_hand(&mut self, player: PlayerId, card: Card) -> bool {
        if let Some(pos) = self.hands[player].iter().position(|c| *c == card) {
            self.hands[player].remove(pos);
            true
        } else {
            false
        }
    }

    /// Return a card to a hand.
    pub fn add_to_hand(&mut self, player: PlayerId, card: Card) {
        self.hands[player].push_back(card);
    }

    // === Captures ===

    /// Append a capture group to a player's pile.
    pub fn push_capture(&mut self, player: PlayerId, group: CaptureGroup) {
        self.captures[player].push_back(group);
    }

    /// Total cards in a player's capture pile.
    #[must_use]
    pub fn captured_card_count(&self, player: PlayerId) -> usize {
        self.captures[player].iter().map(CaptureGroup::len).sum()
    }

    // === Invariants ===

    /// Every card the state currently accounts for.
    ///
    /// Equals 40 at every reachable state of a real game.
    #[must_use]
    pub fn total_card_count(&self) -> usize {
        let in_hands: usize = PlayerId::BOTH
            .iter()
            .map(|p| self.hands[*p].len())
            .sum();
        let on_table: usize = self.table.iter().map(TableItem::card_count).sum();
        let captured: usize = PlayerId::BOTH
            .iter()
            .map(|p| self.captured_card_count(*p))
            .sum();
        self.deck.len() + in_hands + on_table + captured
    }
}
