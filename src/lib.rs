//! # cassino-engine
//!
//! A deterministic rules engine for two-player Cassino: dealing,
//! trailing, building, capturing, staging combinations, turn
//! advancement, multi-round redeal, and end-of-game scoring.
//!
//! ## Design Principles
//!
//! 1. **Pure transitions**: `Engine::apply(state, player, action)`
//!    returns a new snapshot or a structured rejection. It never
//!    mutates its input, never suspends, and never panics on caller
//!    input.
//!
//! 2. **Persistent snapshots**: `GameState` is built on `im` vectors,
//!    so the per-action clone is cheap and callers can keep any number
//!    of historical snapshots for replay or sync.
//!
//! 3. **Determinism**: the only randomness is the seeded one-time
//!    shuffle; a game is fully reproducible from `(seed, actions)`.
//!
//! 4. **Engine only**: transport, rendering, gesture handling, and
//!    session management live elsewhere. The engine consumes actions
//!    and produces snapshots and rejections, nothing more.
//!
//! ## Concurrency contract
//!
//! The engine is synchronous and lock-free; the session layer must
//! serialize `apply` calls per game so each observes the latest
//! committed state. Two actions validated against the same pre-state
//! could both pass the turn check and corrupt card conservation.
//!
//! ## Modules
//!
//! - `core`: cards, players, actions, state, RNG, config, rejections
//! - `table`: the three table occupants as a closed sum type
//! - `deal`: deck construction and dealing
//! - `rules`: validation, execution, rounds, scoring
//! - `view`: per-player projections and snapshot encoding

pub mod core;
pub mod deal;
pub mod rules;
pub mod table;
pub mod view;

// Re-export the boundary types.
pub use crate::core::{
    Action, Card, CaptureGroup, GameConfig, GameRng, GameRngState, GameState, PlayerId,
    PlayerPair, Rank, Rejection, RejectionKind, RejectionWire, ScoreBreakdown, ScoreDetails,
    StagePick, Suit,
};

pub use crate::rules::{score_game, Engine};

pub use crate::table::{
    Build, LooseCard, StagedCard, StageSource, StagingStack, TableId, TableItem,
};

pub use crate::view::{decode_state, encode_state, PlayerView};
