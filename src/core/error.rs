//! Rejection taxonomy.
//!
//! Every illegal action is answered with a `Rejection`: a stable kind
//! for the caller to branch on plus a human-readable message for the
//! UI. Rejections are returned, never panicked, and carry zero state
//! mutation; the engine validates fully before it executes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::PlayerId;

/// Stable rejection category, surfaced on the wire as `kind`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    NotYourTurn,
    TargetNotFound,
    InvalidCapture,
    InvalidBuild,
    InvalidTrail,
    StagingViolation,
    MalformedAction,
}

/// Why an action was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Acting player is not the current player.
    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: PlayerId },

    /// A referenced card, build, or stack is absent from its claimed
    /// location.
    #[error("{what} not found")]
    TargetNotFound { what: String },

    /// Value mismatch, or a capture-forcing violation.
    #[error("invalid capture: {reason}")]
    InvalidCapture { reason: String },

    /// Out-of-range value, missing capturing card, ownership or size
    /// limit violation, or a duplicate build value.
    #[error("invalid build: {reason}")]
    InvalidBuild { reason: String },

    /// A capture was available, or the active-build restriction was
    /// violated.
    #[error("invalid trail: {reason}")]
    InvalidTrail { reason: String },

    /// Staging rule violation: second simultaneous stack, bad source,
    /// size cap, or an unfinalizable combination.
    #[error("staging violation: {reason}")]
    StagingViolation { reason: String },

    /// Structurally invalid payload.
    #[error("malformed action: {reason}")]
    MalformedAction { reason: String },
}

impl Rejection {
    /// The stable category of this rejection.
    #[must_use]
    pub fn kind(&self) -> RejectionKind {
        match self {
            Rejection::NotYourTurn { .. } => RejectionKind::NotYourTurn,
            Rejection::TargetNotFound { .. } => RejectionKind::TargetNotFound,
            Rejection::InvalidCapture { .. } => RejectionKind::InvalidCapture,
            Rejection::InvalidBuild { .. } => RejectionKind::InvalidBuild,
            Rejection::InvalidTrail { .. } => RejectionKind::InvalidTrail,
            Rejection::StagingViolation { .. } => RejectionKind::StagingViolation,
            Rejection::MalformedAction { .. } => RejectionKind::MalformedAction,
        }
    }

    /// Wire form `{ kind, message }` for the transport layer.
    #[must_use]
    pub fn to_wire(&self) -> RejectionWire {
        RejectionWire {
            kind: self.kind(),
            message: self.to_string(),
        }
    }

    // Constructors used throughout validation; they keep call sites
    // down to one line.

    pub(crate) fn target_not_found(what: impl Into<String>) -> Self {
        Rejection::TargetNotFound { what: what.into() }
    }

    pub(crate) fn invalid_capture(reason: impl Into<String>) -> Self {
        Rejection::InvalidCapture {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_build(reason: impl Into<String>) -> Self {
        Rejection::InvalidBuild {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_trail(reason: impl Into<String>) -> Self {
        Rejection::InvalidTrail {
            reason: reason.into(),
        }
    }

    pub(crate) fn staging(reason: impl Into<String>) -> Self {
        Rejection::StagingViolation {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Rejection::MalformedAction {
            reason: reason.into(),
        }
    }
}

/// Serialized rejection response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionWire {
    pub kind: RejectionKind,
    pub message: String,
}
