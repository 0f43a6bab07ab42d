//! Engine configuration.
//!
//! The rules themselves are fixed; the knobs here cover the numbers a
//! table might house-rule: hand size per deal, the staging-stack cap,
//! build limits, and the scoring bonus values. Defaults are the classic
//! Cassino values.

use serde::{Deserialize, Serialize};

/// Tunable rule parameters, with classic defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cards dealt to each player per deal cycle.
    pub hand_size: usize,

    /// Maximum cards in one staging stack.
    pub staging_cap: usize,

    /// Maximum constituent cards in one build.
    pub build_max_cards: usize,

    /// Bonus for capturing strictly the most cards (nobody on a tie).
    pub cards_bonus: u32,

    /// Bonus for capturing strictly the most spades (nobody on a tie).
    pub spades_bonus: u32,

    /// Points per captured ace.
    pub ace_points: u32,

    /// Points for the ten of diamonds ("big cassino").
    pub big_cassino_points: u32,

    /// Points for the two of spades ("little cassino").
    pub little_cassino_points: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: 10,
            staging_cap: 5,
            build_max_cards: 5,
            cards_bonus: 3,
            spades_bonus: 1,
            ace_points: 1,
            big_cassino_points: 2,
            little_cassino_points: 1,
        }
    }
}

impl GameConfig {
    /// Classic configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-deal hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        assert!(hand_size > 0, "hand size must be positive");
        assert!(hand_size <= 20, "two hands cannot exceed the deck");
        self.hand_size = hand_size;
        self
    }

    /// Set the staging-stack card cap.
    #[must_use]
    pub fn with_staging_cap(mut self, cap: usize) -> Self {
        assert!(cap >= 2, "a staging stack needs at least two cards");
        self.staging_cap = cap;
        self
    }
}
