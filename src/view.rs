//! Per-player projections and snapshot encoding.
//!
//! The canonical [`GameState`] always carries both hands; redaction is
//! the transport layer's job. `PlayerView` is the projection it ships:
//! the viewer's own hand in full, the opponent's hand reduced to a
//! count, everything public passed through untouched.
//!
//! `encode_state`/`decode_state` are compact binary helpers for
//! broadcasting canonical snapshots between trusted processes.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::card::Card;
use crate::core::player::{PlayerId, PlayerPair};
use crate::core::state::{CaptureGroup, GameState, ScoreDetails};
use crate::table::TableItem;

/// What one player is allowed to see.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    /// The viewer's own cards.
    pub hand: Vec<Card>,
    /// The opponent's hand, reduced to a count.
    pub opponent_hand_size: usize,
    pub deck_size: usize,
    pub table: Vector<TableItem>,
    /// Capture piles are public knowledge.
    pub captures: PlayerPair<Vector<CaptureGroup>>,
    pub current_player: PlayerId,
    pub round: u32,
    pub scores: PlayerPair<u32>,
    pub game_over: bool,
    pub winner: Option<PlayerId>,
    pub last_capturer: Option<PlayerId>,
    pub score_details: Option<ScoreDetails>,
}

impl PlayerView {
    /// Project a canonical state for one viewer.
    #[must_use]
    pub fn of(state: &GameState, viewer: PlayerId) -> Self {
        Self {
            viewer,
            hand: state.hand(viewer).iter().copied().collect(),
            opponent_hand_size: state.hand(viewer.opponent()).len(),
            deck_size: state.deck.len(),
            table: state.table.clone(),
            captures: state.captures.clone(),
            current_player: state.current_player,
            round: state.round,
            scores: state.scores.clone(),
            game_over: state.game_over,
            winner: state.winner,
            last_capturer: state.last_capturer,
            score_details: state.score_details.clone(),
        }
    }
}

/// Encode a canonical snapshot for broadcast.
pub fn encode_state(state: &GameState) -> Result<Vec<u8>, bincode::Error> {
    bincode::serialize(state)
}

/// Decode a canonical snapshot.
pub fn decode_state(bytes: &[u8]) -> Result<GameState, bincode::Error> {
    bincode::deserialize(bytes)
}
