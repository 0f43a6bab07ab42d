//! The rules layer: validation, execution, rounds, and scoring.
//!
//! [`Engine`] is the facade; [`validate`] holds the per-action
//! decision functions, [`apply`] the executors, [`round`] the turn
//! and deal-cycle controller, [`score`] the end-of-game scoring, and
//! [`partition`] the deterministic combination rule shared by builds
//! and staging.

pub mod apply;
pub mod partition;
pub mod round;
pub mod score;
pub mod validate;

pub use apply::Engine;
pub use score::score_game;
