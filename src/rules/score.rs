//! End-of-game scoring.
//!
//! Scores are computed once, from the flattened capture piles:
//! - strictly most cards takes `cards_bonus` (nobody on a tie);
//! - strictly most spades takes `spades_bonus` (nobody on a tie);
//! - each ace scores `ace_points`;
//! - the ten of diamonds (big cassino) and two of spades (little
//!   cassino) score their configured points to whoever captured them.
//!
//! The winner is the higher aggregate; equal totals are a draw.

use crate::core::card::{Card, Rank, Suit};
use crate::core::config::GameConfig;
use crate::core::player::{PlayerId, PlayerPair};
use crate::core::state::{GameState, ScoreBreakdown, ScoreDetails};

const BIG_CASSINO: Card = Card::new(Rank::Ten, Suit::Diamonds);
const LITTLE_CASSINO: Card = Card::new(Rank::Two, Suit::Spades);

/// Score a finished game from its capture piles.
#[must_use]
pub fn score_game(config: &GameConfig, state: &GameState) -> (ScoreDetails, Option<PlayerId>) {
    let mut players: PlayerPair<ScoreBreakdown> = PlayerPair::default();

    for player in PlayerId::BOTH {
        let breakdown = players.get_mut(player);
        for group in state.captures[player].iter() {
            for card in &group.cards {
                breakdown.cards += 1;
                if card.suit == Suit::Spades {
                    breakdown.spades += 1;
                }
                if card.rank == Rank::Ace {
                    breakdown.aces += 1;
                }
                if *card == BIG_CASSINO {
                    breakdown.big_cassino = true;
                }
                if *card == LITTLE_CASSINO {
                    breakdown.little_cassino = true;
                }
            }
        }
    }

    // Majority bonuses are strict: a tie awards nobody.
    let (cards0, cards1) = (players[PlayerId::ZERO].cards, players[PlayerId::ONE].cards);
    if cards0 > cards1 {
        players.get_mut(PlayerId::ZERO).cards_bonus = config.cards_bonus;
    } else if cards1 > cards0 {
        players.get_mut(PlayerId::ONE).cards_bonus = config.cards_bonus;
    }

    let (spades0, spades1) = (players[PlayerId::ZERO].spades, players[PlayerId::ONE].spades);
    if spades0 > spades1 {
        players.get_mut(PlayerId::ZERO).spades_bonus = config.spades_bonus;
    } else if spades1 > spades0 {
        players.get_mut(PlayerId::ONE).spades_bonus = config.spades_bonus;
    }

    for player in PlayerId::BOTH {
        let breakdown = players.get_mut(player);
        breakdown.total = breakdown.cards_bonus
            + breakdown.spades_bonus
            + breakdown.aces * config.ace_points
            + u32::from(breakdown.big_cassino) * config.big_cassino_points
            + u32::from(breakdown.little_cassino) * config.little_cassino_points;
    }

    let winner = match players[PlayerId::ZERO]
        .total
        .cmp(&players[PlayerId::ONE].total)
    {
        std::cmp::Ordering::Greater => Some(PlayerId::ZERO),
        std::cmp::Ordering::Less => Some(PlayerId::ONE),
        std::cmp::Ordering::Equal => None,
    };

    (ScoreDetails { players }, winner)
}
