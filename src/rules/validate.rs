//! Action validation: one pure decision function per action kind.
//!
//! Checks run in a fixed precedence: terminal guard, turn ownership,
//! open-stack discipline, source integrity, then rule-specific
//! legality including the capture-forcing policy. Every function is
//! side-effect-free and returns the first violated rule as a
//! [`Rejection`]; the executor runs only after full validation passes.

use crate::core::action::{Action, StagePick};
use crate::core::card::Card;
use crate::core::config::GameConfig;
use crate::core::error::Rejection;
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::table::{Build, StagingStack, TableId, TableItem};

use super::partition::partition_into_sums;

/// Decide whether `player` may apply `action` to `state`.
pub fn validate(
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    action: &Action,
) -> Result<(), Rejection> {
    if state.game_over {
        return Err(Rejection::malformed("game is over"));
    }

    if player != state.current_player {
        return Err(Rejection::NotYourTurn {
            expected: state.current_player,
        });
    }

    // A player with an open staging stack must resolve it before doing
    // anything else; this keeps stacks from outliving their turn.
    if let Some(stack) = state.staging_of(player) {
        let touches_own_stack = matches!(
            action,
            Action::AddToStagingStack { stack: id, .. }
            | Action::FinalizeStagingStack { stack: id, .. }
            | Action::CancelStagingStack { stack: id }
                if *id == stack.id
        );
        if !touches_own_stack {
            return Err(Rejection::staging(
                "resolve your open staging stack first",
            ));
        }
    }

    match action {
        Action::Trail { card } => check_trail(state, player, *card),
        Action::Capture { card, targets } => check_capture(state, player, *card, targets),
        Action::Build {
            card,
            targets,
            value,
        } => check_build(config, state, player, *card, targets, *value),
        Action::AddToOwnBuild { card, build } => {
            check_extend(config, state, player, *card, *build, true)
        }
        Action::AddToOpponentBuild { card, build } => {
            check_extend(config, state, player, *card, *build, false)
        }
        Action::CreateStagingStack { pick } => check_stage_create(state, player, *pick),
        Action::AddToStagingStack { stack, pick } => {
            check_stage_add(config, state, player, *stack, *pick)
        }
        Action::FinalizeStagingStack {
            stack,
            value,
            capture_with,
        } => check_stage_finalize(state, player, *stack, *value, *capture_with),
        Action::CancelStagingStack { stack } => check_stage_cancel(state, player, *stack),
    }
}

// === Shared checks ===

fn require_in_hand(state: &GameState, player: PlayerId, card: Card) -> Result<(), Rejection> {
    if state.hand_contains(player, card) {
        Ok(())
    } else {
        Err(Rejection::target_not_found(format!("card {card} in hand")))
    }
}

fn require_no_duplicates(targets: &[TableId]) -> Result<(), Rejection> {
    for (i, id) in targets.iter().enumerate() {
        if targets[..i].contains(id) {
            return Err(Rejection::malformed(format!("duplicate target {id}")));
        }
    }
    Ok(())
}

/// Is a capture available for a card of this value, ignoring the
/// listed items? Loose cards and builds count; staging stacks are
/// uncommitted and never force anything.
fn capture_available(state: &GameState, value: u8, ignoring: &[TableId]) -> bool {
    state.table.iter().any(|item| {
        item.capture_value() == Some(value) && !ignoring.contains(&item.id())
    })
}

// === Trail ===

fn check_trail(state: &GameState, player: PlayerId, card: Card) -> Result<(), Rejection> {
    require_in_hand(state, player, card)?;

    if state.build_of(player).is_some() {
        return Err(Rejection::invalid_trail(
            "resolve your build before trailing",
        ));
    }

    if capture_available(state, card.value(), &[]) {
        return Err(Rejection::invalid_trail(format!(
            "a capture is available for {card}"
        )));
    }

    Ok(())
}

// === Capture ===

fn check_capture(
    state: &GameState,
    player: PlayerId,
    card: Card,
    targets: &[TableId],
) -> Result<(), Rejection> {
    if targets.is_empty() {
        return Err(Rejection::malformed("capture requires at least one target"));
    }
    require_no_duplicates(targets)?;
    require_in_hand(state, player, card)?;

    for id in targets {
        let item = state
            .find_item(*id)
            .ok_or_else(|| Rejection::target_not_found(format!("table item {id}")))?;
        match item.capture_value() {
            None => {
                return Err(Rejection::invalid_capture(
                    "a staging stack cannot be captured",
                ))
            }
            Some(value) if value != card.value() => {
                return Err(Rejection::invalid_capture(format!(
                    "{card} cannot take a value of {value}"
                )))
            }
            Some(_) => {}
        }
    }

    Ok(())
}

// === Build create / merge ===

/// Targets of a build action, split by kind.
struct BuildTargets<'a> {
    loose_cards: Vec<Card>,
    merge: Option<&'a Build>,
}

fn resolve_build_targets<'a>(
    state: &'a GameState,
    targets: &[TableId],
    value: u8,
) -> Result<BuildTargets<'a>, Rejection> {
    let mut loose_cards = Vec::new();
    let mut merge = None;

    // Walk the table in placement order so constituent order is stable.
    for item in state.table.iter() {
        if !targets.contains(&item.id()) {
            continue;
        }
        match item {
            TableItem::Loose(loose) => loose_cards.push(loose.card),
            TableItem::Build(build) => {
                if build.value != value {
                    return Err(Rejection::invalid_build(
                        "can only merge into a build of the same value",
                    ));
                }
                if merge.replace(build).is_some() {
                    return Err(Rejection::invalid_build(
                        "cannot merge more than one build",
                    ));
                }
            }
            TableItem::Staging(_) => {
                return Err(Rejection::invalid_build(
                    "cannot build onto a staging stack",
                ))
            }
        }
    }

    let found = loose_cards.len() + usize::from(merge.is_some());
    if found != targets.len() {
        return Err(Rejection::target_not_found("build target on table"));
    }

    Ok(BuildTargets { loose_cards, merge })
}

fn check_build(
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    card: Card,
    targets: &[TableId],
    value: u8,
) -> Result<(), Rejection> {
    if targets.is_empty() {
        return Err(Rejection::malformed("build requires at least one target"));
    }
    require_no_duplicates(targets)?;
    require_in_hand(state, player, card)?;

    if !(2..=10).contains(&value) {
        return Err(Rejection::invalid_build(
            "build value must be between 2 and 10",
        ));
    }

    let resolved = resolve_build_targets(state, targets, value)?;

    match resolved.merge {
        None => {
            if state.build_of(player).is_some() {
                return Err(Rejection::invalid_build("you already own a build"));
            }
            if state
                .table
                .iter()
                .filter_map(TableItem::as_build)
                .any(|b| b.value == value)
            {
                return Err(Rejection::invalid_build(format!(
                    "a build of value {value} already exists"
                )));
            }
        }
        Some(merge) => {
            // Taking over the opponent's build is fine, but not while
            // already owning another.
            if merge.owner != player && state.build_of(player).is_some() {
                return Err(Rejection::invalid_build("you already own a build"));
            }
        }
    }

    // The played card and the loose constituents must form the value.
    let mut units = resolved.loose_cards.clone();
    units.push(card);
    if partition_into_sums(&units, value).is_none() {
        return Err(Rejection::invalid_build(format!(
            "those cards do not form {value}"
        )));
    }

    let merged_len = resolved.merge.map_or(0, Build::len);
    if merged_len + units.len() > config.build_max_cards {
        return Err(Rejection::invalid_build(format!(
            "a build holds at most {} cards",
            config.build_max_cards
        )));
    }

    if !state.hand_has_value_besides(player, value, card) {
        return Err(Rejection::invalid_build(format!(
            "no hand card of value {value} to capture with"
        )));
    }

    // Forced capture: a build that leaves a matching item on the table
    // is a stall, not a commitment.
    if capture_available(state, card.value(), targets) {
        return Err(Rejection::invalid_capture(format!(
            "a capture is available for {card}"
        )));
    }

    Ok(())
}

// === Build extend ===

fn check_extend(
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    card: Card,
    build_id: TableId,
    own: bool,
) -> Result<(), Rejection> {
    let item = state
        .find_item(build_id)
        .ok_or_else(|| Rejection::target_not_found(format!("table item {build_id}")))?;
    let build = item
        .as_build()
        .ok_or_else(|| Rejection::invalid_build("target is not a build"))?;

    require_in_hand(state, player, card)?;

    if own && build.owner != player {
        return Err(Rejection::invalid_build("that build is not yours"));
    }
    if !own && build.owner == player {
        return Err(Rejection::invalid_build("that build is already yours"));
    }

    if !build.extendable {
        return Err(Rejection::invalid_build("that build cannot be extended"));
    }

    let new_value = build.value + card.value();
    if new_value > 10 {
        return Err(Rejection::invalid_build(
            "extension would push the build past ten",
        ));
    }

    if build.len() + 1 > config.build_max_cards {
        return Err(Rejection::invalid_build(format!(
            "a build holds at most {} cards",
            config.build_max_cards
        )));
    }

    if !state.hand_has_value_besides(player, new_value, card) {
        return Err(Rejection::invalid_build(format!(
            "no hand card of value {new_value} to capture with"
        )));
    }

    // Taking over the opponent's build while already owning one would
    // leave this player with two.
    if !own && state.build_of(player).is_some() {
        return Err(Rejection::invalid_build("you already own a build"));
    }

    Ok(())
}

// === Staging ===

fn check_pick(state: &GameState, player: PlayerId, pick: StagePick) -> Result<(), Rejection> {
    match pick {
        StagePick::Hand { card } => require_in_hand(state, player, card),
        StagePick::Table { item } => {
            let found = state
                .find_item(item)
                .ok_or_else(|| Rejection::target_not_found(format!("table item {item}")))?;
            if found.as_loose().is_none() {
                return Err(Rejection::staging("only loose cards may be staged"));
            }
            Ok(())
        }
    }
}

fn check_stage_create(
    state: &GameState,
    player: PlayerId,
    pick: StagePick,
) -> Result<(), Rejection> {
    // The open-stack discipline in `validate` already rejects a second
    // stack; owning none is guaranteed here.
    debug_assert!(state.staging_of(player).is_none());
    check_pick(state, player, pick)
}

fn find_own_stack<'a>(
    state: &'a GameState,
    player: PlayerId,
    stack_id: TableId,
) -> Result<&'a StagingStack, Rejection> {
    let item = state
        .find_item(stack_id)
        .ok_or_else(|| Rejection::target_not_found(format!("table item {stack_id}")))?;
    let stack = item
        .as_staging()
        .ok_or_else(|| Rejection::staging("target is not a staging stack"))?;
    if stack.owner != player {
        return Err(Rejection::staging("that staging stack is not yours"));
    }
    Ok(stack)
}

fn check_stage_add(
    config: &GameConfig,
    state: &GameState,
    player: PlayerId,
    stack_id: TableId,
    pick: StagePick,
) -> Result<(), Rejection> {
    let stack = find_own_stack(state, player, stack_id)?;

    if stack.len() >= config.staging_cap {
        return Err(Rejection::staging(format!(
            "a staging stack holds at most {} cards",
            config.staging_cap
        )));
    }

    check_pick(state, player, pick)
}

fn check_stage_finalize(
    state: &GameState,
    player: PlayerId,
    stack_id: TableId,
    value: u8,
    capture_with: Option<Card>,
) -> Result<(), Rejection> {
    let stack = find_own_stack(state, player, stack_id)?;

    if let Some(card) = capture_with {
        require_in_hand(state, player, card)?;
    }

    if !stack.has_both_sources() {
        return Err(Rejection::staging(
            "a staging stack needs a hand card and a table card before finalizing",
        ));
    }

    let min_value = if capture_with.is_some() { 1 } else { 2 };
    if !(min_value..=10).contains(&value) {
        return Err(Rejection::staging(format!(
            "cannot finalize at value {value}"
        )));
    }

    let staged: Vec<Card> = stack.cards.iter().map(|s| s.card).collect();
    if partition_into_sums(&staged, value).is_none() {
        return Err(Rejection::staging(format!(
            "staged cards do not form {value}"
        )));
    }

    match capture_with {
        Some(card) => {
            if card.value() != value {
                return Err(Rejection::staging(
                    "capturing card does not match the declared value",
                ));
            }
        }
        None => {
            if !state.hands[player].iter().any(|c| c.value() == value) {
                return Err(Rejection::staging(format!(
                    "no hand card of value {value} to capture the stack"
                )));
            }
            // Finalizing into a build obeys the build invariants.
            if state.build_of(player).is_some() {
                return Err(Rejection::staging("you already own a build"));
            }
            if state
                .table
                .iter()
                .filter_map(TableItem::as_build)
                .any(|b| b.value == value)
            {
                return Err(Rejection::staging(format!(
                    "a build of value {value} already exists"
                )));
            }
        }
    }

    Ok(())
}

fn check_stage_cancel(
    state: &GameState,
    player: PlayerId,
    stack_id: TableId,
) -> Result<(), Rejection> {
    find_own_stack(state, player, stack_id).map(|_| ())
}
