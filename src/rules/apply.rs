//! The engine facade and action executors.
//!
//! `Engine::apply` is the whole boundary: validate against the caller's
//! snapshot, clone it (cheap, `im` shares structure), transform the
//! clone, let the round controller advance/redeal/finish, and hand the
//! successor back. A rejection returns before the clone is touched, so
//! there is never a partially applied action.

use smallvec::SmallVec;

use crate::core::action::{Action, StagePick};
use crate::core::card::Card;
use crate::core::config::GameConfig;
use crate::core::error::Rejection;
use crate::core::player::PlayerId;
use crate::core::state::{CaptureGroup, GameState};
use crate::deal;
use crate::table::{Build, LooseCard, StagedCard, StageSource, StagingStack, TableId, TableItem};

use super::partition::partition_group_count;
use super::{round, validate};

/// The rules engine: a pure transformation function over snapshots.
///
/// ## Example
///
/// ```
/// use cassino_engine::core::{Action, GameConfig, PlayerId};
/// use cassino_engine::rules::Engine;
///
/// let engine = Engine::new(GameConfig::default());
/// let state = engine.new_game(42);
///
/// let card = state.hand(PlayerId::ZERO)[0];
/// let next = engine.apply(&state, PlayerId::ZERO, &Action::Trail { card });
///
/// // The original snapshot is untouched either way.
/// assert_eq!(state.hand(PlayerId::ZERO).len(), 10);
/// if let Ok(next) = next {
///     assert_eq!(next.hand(PlayerId::ZERO).len(), 9);
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: GameConfig,
}

impl Engine {
    /// Create an engine with the given rule configuration.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    /// The rule configuration in force.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shuffle and deal the opening state. Same seed, same game.
    #[must_use]
    pub fn new_game(&self, seed: u64) -> GameState {
        deal::new_game(&self.config, seed)
    }

    /// Check an action without applying it.
    pub fn validate(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<(), Rejection> {
        validate::validate(&self.config, state, player, action)
    }

    /// Apply an action, producing the successor snapshot.
    ///
    /// The input state is never mutated. On `Err` nothing happened;
    /// on `Ok` the returned state includes any turn advancement,
    /// redeal, or end-of-game scoring the action triggered.
    pub fn apply(
        &self,
        state: &GameState,
        player: PlayerId,
        action: &Action,
    ) -> Result<GameState, Rejection> {
        if let Err(rejection) = self.validate(state, player, action) {
            tracing::trace!(
                action = action.kind_name(),
                player = player.index(),
                kind = ?rejection.kind(),
                "action rejected"
            );
            return Err(rejection);
        }

        let mut next = state.clone();
        match action {
            Action::Trail { card } => exec_trail(&mut next, player, *card),
            Action::Capture { card, targets } => exec_capture(&mut next, player, *card, targets),
            Action::Build {
                card,
                targets,
                value,
            } => exec_build(&mut next, player, *card, targets, *value),
            Action::AddToOwnBuild { card, build }
            | Action::AddToOpponentBuild { card, build } => {
                exec_extend(&mut next, player, *card, *build);
            }
            Action::CreateStagingStack { pick } => exec_stage_create(&mut next, player, *pick),
            Action::AddToStagingStack { stack, pick } => {
                exec_stage_add(&mut next, *stack, *pick);
            }
            Action::FinalizeStagingStack {
                stack,
                value,
                capture_with,
            } => exec_stage_finalize(&mut next, player, *stack, *value, *capture_with),
            Action::CancelStagingStack { stack } => exec_stage_cancel(&mut next, *stack),
        }

        if action.advances_turn() {
            round::advance(&self.config, &mut next);
        }

        tracing::debug!(
            action = action.kind_name(),
            player = player.index(),
            round = next.round,
            game_over = next.game_over,
            "action applied"
        );

        Ok(next)
    }
}

// Executors assume validation has passed; every lookup below is
// guaranteed to succeed.

fn take_from_hand(state: &mut GameState, player: PlayerId, card: Card) {
    let removed = state.remove_from_hand(player, card);
    debug_assert!(removed, "validated card {card} missing from hand");
}

// === Trail ===

fn exec_trail(state: &mut GameState, player: PlayerId, card: Card) {
    take_from_hand(state, player, card);
    let id = state.alloc_table_id();
    state.push_item(TableItem::Loose(LooseCard { id, card }));
}

// === Capture ===

fn exec_capture(state: &mut GameState, player: PlayerId, card: Card, targets: &[TableId]) {
    take_from_hand(state, player, card);

    // Flatten captured cards in table order before removing the items.
    let mut captured: Vec<Card> = Vec::new();
    for item in state.table.iter() {
        if targets.contains(&item.id()) {
            captured.extend(item.cards());
        }
    }
    for id in targets {
        state.remove_item(*id);
    }

    captured.push(card);
    state.push_capture(player, CaptureGroup::new(captured));
    state.last_capturer = Some(player);
}

// === Build create / merge ===

fn exec_build(state: &mut GameState, player: PlayerId, card: Card, targets: &[TableId], value: u8) {
    take_from_hand(state, player, card);

    let mut loose_cards: Vec<Card> = Vec::new();
    let mut merge_id: Option<TableId> = None;
    for item in state.table.iter() {
        if !targets.contains(&item.id()) {
            continue;
        }
        match item {
            TableItem::Loose(loose) => loose_cards.push(loose.card),
            TableItem::Build(build) => merge_id = Some(build.id),
            TableItem::Staging(_) => unreachable!("validated build target"),
        }
    }

    // The new units alone decide extendability: a single summing group
    // keeps the build open, anything else locks it.
    let mut units = loose_cards.clone();
    units.push(card);
    let single_group = partition_group_count(&units, value) == Some(1);

    for id in targets {
        if Some(*id) != merge_id {
            state.remove_item(*id);
        }
    }

    match merge_id {
        Some(id) => {
            let index = state.item_index(id).expect("merge target present");
            let merged = match &state.table[index] {
                TableItem::Build(build) => {
                    let mut cards = build.cards.clone();
                    cards.extend(units.iter().copied());
                    Build {
                        id,
                        owner: player,
                        cards,
                        value,
                        extendable: false,
                    }
                }
                _ => unreachable!("validated merge target"),
            };
            state.table.set(index, TableItem::Build(merged));
        }
        None => {
            let id = state.alloc_table_id();
            state.push_item(TableItem::Build(Build {
                id,
                owner: player,
                cards: SmallVec::from_vec(units),
                value,
                extendable: single_group,
            }));
        }
    }
}

// === Build extend ===

fn exec_extend(state: &mut GameState, player: PlayerId, card: Card, build_id: TableId) {
    take_from_hand(state, player, card);

    let index = state.item_index(build_id).expect("validated build target");
    let extended = match &state.table[index] {
        TableItem::Build(build) => {
            let mut cards = build.cards.clone();
            cards.push(card);
            Build {
                id: build.id,
                owner: player,
                cards,
                value: build.value + card.value(),
                extendable: build.extendable,
            }
        }
        _ => unreachable!("validated build target"),
    };
    state.table.set(index, TableItem::Build(extended));
}

// === Staging ===

/// Pull the picked card out of its source, tagging where it came from.
fn take_pick(state: &mut GameState, player: PlayerId, pick: StagePick) -> StagedCard {
    match pick {
        StagePick::Hand { card } => {
            take_from_hand(state, player, card);
            StagedCard {
                card,
                source: StageSource::Hand,
            }
        }
        StagePick::Table { item } => {
            let removed = state.remove_item(item).expect("validated staged item");
            match removed {
                TableItem::Loose(loose) => StagedCard {
                    card: loose.card,
                    source: StageSource::Table,
                },
                _ => unreachable!("validated staged item is loose"),
            }
        }
    }
}

fn exec_stage_create(state: &mut GameState, player: PlayerId, pick: StagePick) {
    let staged = take_pick(state, player, pick);
    let id = state.alloc_table_id();
    state.push_item(TableItem::Staging(StagingStack {
        id,
        owner: player,
        cards: SmallVec::from_elem(staged, 1),
    }));
}

fn exec_stage_add(state: &mut GameState, stack_id: TableId, pick: StagePick) {
    let index = state.item_index(stack_id).expect("validated stack");
    let owner = match &state.table[index] {
        TableItem::Staging(stack) => stack.owner,
        _ => unreachable!("validated stack"),
    };
    let staged = take_pick(state, owner, pick);

    // The stack may have shifted when a table pick was removed.
    let index = state.item_index(stack_id).expect("validated stack");
    let updated = match &state.table[index] {
        TableItem::Staging(stack) => {
            let mut cards = stack.cards.clone();
            cards.push(staged);
            StagingStack {
                id: stack.id,
                owner: stack.owner,
                cards,
            }
        }
        _ => unreachable!("validated stack"),
    };
    state.table.set(index, TableItem::Staging(updated));
}

fn exec_stage_finalize(
    state: &mut GameState,
    player: PlayerId,
    stack_id: TableId,
    value: u8,
    capture_with: Option<Card>,
) {
    let index = state.item_index(stack_id).expect("validated stack");
    let stack = match state.table.remove(index) {
        TableItem::Staging(stack) => stack,
        _ => unreachable!("validated stack"),
    };
    let staged: Vec<Card> = stack.cards.iter().map(|s| s.card).collect();

    match capture_with {
        Some(card) => {
            take_from_hand(state, player, card);
            let mut captured = staged;
            captured.push(card);
            state.push_capture(player, CaptureGroup::new(captured));
            state.last_capturer = Some(player);
        }
        None => {
            // Committed combinations are locked at their value.
            state.table.insert(
                index,
                TableItem::Build(Build {
                    id: stack.id,
                    owner: player,
                    cards: staged.into_iter().collect(),
                    value,
                    extendable: false,
                }),
            );
        }
    }
}

fn exec_stage_cancel(state: &mut GameState, stack_id: TableId) {
    let index = state.item_index(stack_id).expect("validated stack");
    let stack = match state.table.remove(index) {
        TableItem::Staging(stack) => stack,
        _ => unreachable!("validated stack"),
    };

    for staged in stack.cards {
        match staged.source {
            StageSource::Hand => state.add_to_hand(stack.owner, staged.card),
            StageSource::Table => {
                let id = state.alloc_table_id();
                state.push_item(TableItem::Loose(LooseCard {
                    id,
                    card: staged.card,
                }));
            }
        }
    }
}
