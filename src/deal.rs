//! Deck construction and dealing.
//!
//! The deck is shuffled exactly once, at game start; every later deal
//! cycle just consumes more of the same permutation. Cards come off
//! the end of the deck vector (top = end, as everywhere in the crate),
//! alternating player 0 first.
//!
//! Redeal tops each hand up to the configured hand size; in the normal
//! flow both hands are empty when it fires, so each player receives a
//! fresh full hand until the deck runs dry.

use crate::core::card::Card;
use crate::core::config::GameConfig;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;

/// Build, shuffle, and deal the opening state for a game.
///
/// The same seed always produces the same deal.
#[must_use]
pub fn new_game(config: &GameConfig, seed: u64) -> GameState {
    let mut cards = Card::deck();
    let mut rng = GameRng::new(seed);
    rng.shuffle(&mut cards);

    let mut state = GameState::new();
    state.deck = cards.into_iter().collect();
    deal_hands(&mut state, config.hand_size);
    state
}

/// Deal from the deck until each hand holds `hand_size` cards or the
/// deck is empty, one card at a time, player 0 first.
pub(crate) fn deal_hands(state: &mut GameState, hand_size: usize) {
    loop {
        let mut dealt = false;
        for player in PlayerId::BOTH {
            if state.hands[player].len() < hand_size {
                if let Some(card) = state.deck.pop_back() {
                    state.hands[player].push_back(card);
                    dealt = true;
                }
            }
        }
        if !dealt {
            break;
        }
    }
}
