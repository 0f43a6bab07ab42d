//! Actions: the inbound envelope, one variant per move kind.
//!
//! An action names the cards and table items it touches; the acting
//! player travels alongside the action, not inside it. The serde
//! representation is the wire format the transport layer ships:
//! `{"type": "trail", "card": {...}}` and so on, with variant names in
//! camelCase matching the envelope.
//!
//! Turn advancement is a property of the action kind: staging
//! create/add/cancel are provisional and keep the turn; everything
//! else passes it.

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::table::TableId;

/// A card chosen for staging, from hand or from the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "lowercase")]
pub enum StagePick {
    /// A card from the acting player's hand.
    Hand { card: Card },
    /// A loose card on the table.
    Table { item: TableId },
}

/// A complete game action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Place a hand card alone on the table.
    Trail { card: Card },

    /// Capture one or more table items with a matching hand card.
    Capture { card: Card, targets: Vec<TableId> },

    /// Create a build from a hand card and loose table cards, or merge
    /// into an existing build of the declared value.
    Build {
        card: Card,
        targets: Vec<TableId>,
        value: u8,
    },

    /// Extend a build the actor owns.
    AddToOwnBuild { card: Card, build: TableId },

    /// Extend the opponent's build, taking ownership of it.
    AddToOpponentBuild { card: Card, build: TableId },

    /// Open a staging stack with a first card.
    CreateStagingStack { pick: StagePick },

    /// Add a card to the actor's open staging stack.
    AddToStagingStack { stack: TableId, pick: StagePick },

    /// Commit the staging stack at a declared value: into a build, or
    /// directly into a capture when `capture_with` names a matching
    /// hand card.
    FinalizeStagingStack {
        stack: TableId,
        value: u8,
        capture_with: Option<Card>,
    },

    /// Disband the staging stack, returning every card to its origin.
    CancelStagingStack { stack: TableId },
}

impl Action {
    /// Whether this action passes the turn once applied.
    ///
    /// Staging create/add/cancel are provisional follow-ups by the
    /// same player.
    #[must_use]
    pub fn advances_turn(&self) -> bool {
        !matches!(
            self,
            Action::CreateStagingStack { .. }
                | Action::AddToStagingStack { .. }
                | Action::CancelStagingStack { .. }
        )
    }

    /// Envelope name of this action kind, as it appears on the wire.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Action::Trail { .. } => "trail",
            Action::Capture { .. } => "capture",
            Action::Build { .. } => "build",
            Action::AddToOwnBuild { .. } => "addToOwnBuild",
            Action::AddToOpponentBuild { .. } => "addToOpponentBuild",
            Action::CreateStagingStack { .. } => "createStagingStack",
            Action::AddToStagingStack { .. } => "addToStagingStack",
            Action::FinalizeStagingStack { .. } => "finalizeStagingStack",
            Action::CancelStagingStack { .. } => "cancelStagingStack",
        }
    }
}
