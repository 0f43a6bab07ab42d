//! Core engine types: cards, players, state, actions, RNG, configuration.
//!
//! These are the value types everything else is written against. The
//! rules themselves live in [`crate::rules`].

pub mod action;
pub mod card;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, StagePick};
pub use card::{Card, Rank, Suit};
pub use config::GameConfig;
pub use error::{Rejection, RejectionKind, RejectionWire};
pub use player::{PlayerId, PlayerPair};
pub use rng::{GameRng, GameRngState};
pub use state::{CaptureGroup, GameState, ScoreBreakdown, ScoreDetails};
