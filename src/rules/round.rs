//! Turn advancement, redeal, and the terminal sweep.
//!
//! Runs after every turn-advancing action: flip the seat, then check
//! whether the incoming player can actually play. An empty incoming
//! hand triggers a redeal while the deck lasts; once the deck is dry
//! and both hands are empty the game finishes: remaining table cards
//! sweep to the last capturer and the scoring engine runs exactly
//! once.

use crate::core::card::Card;
use crate::core::config::GameConfig;
use crate::core::state::{CaptureGroup, GameState};
use crate::deal;

use super::score;

/// Flip the turn, then resolve any deal-cycle boundary it exposes.
pub(crate) fn advance(config: &GameConfig, state: &mut GameState) {
    state.current_player = state.current_player.opponent();

    let incoming = state.current_player;
    if !state.hands[incoming].is_empty() {
        return;
    }

    if !state.deck.is_empty() {
        deal::deal_hands(state, config.hand_size);
        state.round += 1;
        tracing::debug!(round = state.round, "redeal");
    } else if state.hands[incoming.opponent()].is_empty() {
        finish(config, state);
    } else {
        // Deck is dry and only the opponent still holds cards; the
        // turn passes straight back.
        state.current_player = incoming.opponent();
    }
}

/// Terminal transition: sweep, then score.
fn finish(config: &GameConfig, state: &mut GameState) {
    if let Some(capturer) = state.last_capturer {
        let swept: Vec<Card> = state
            .table
            .iter()
            .flat_map(|item| item.cards())
            .collect();
        if !swept.is_empty() {
            state.push_capture(capturer, CaptureGroup::new(swept));
            state.table.clear();
        }
    }
    // With no capturer ever, table cards stay where they are: nobody
    // scores them, and the 40-card census still balances.

    state.game_over = true;

    let (details, winner) = score::score_game(config, state);
    state.scores = details.players.map(|_, breakdown| breakdown.total);
    state.winner = winner;
    state.score_details = Some(details);

    tracing::debug!(winner = ?state.winner, "game over");
}
