// ═══════════════════════════════════════════════════════════════════════
// Command executor and turn controller
//
// Architecture:
//   The engine is a pure state machine. An external dispatcher delivers
//   each command together with the issuing player's identity; the engine
//   validates, mutates the match state, and appends log entries. Turn
//   order lives outside: `EndTurn` only reports a request, and the
//   surrounding framework drives the `on_turn_begin` / `on_turn_end`
//   hooks at every boundary.
//
// Error model:
//   Every illegal command is a silent no-op — state untouched, nothing
//   logged. The `Rejection` value names the reason for the benefit of
//   the framework layer and the tests; callers that only care about the
//   external contract can ignore it.
// ═══════════════════════════════════════════════════════════════════════

use crate::grid::{in_bounds, manhattan};
use crate::queries::unit_at;
use crate::types::{CombatClass, MatchState, PlayerId, Point, Unit};
use serde::{Deserialize, Serialize};

/// Orthogonal neighbor offsets for splash resolution. Splash centers on
/// the target tile, never the attacker's tile; diagonals are untouched.
const SPLASH_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Splash damage applied per adjacent enemy.
const SPLASH_DAMAGE: i32 = 1;

// ── Commands ───────────────────────────────────────────────────────────

/// A player command as delivered by the external dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    /// Select one of the issuer's own living units.
    Select { unit_id: String },
    /// Move the selected unit to a reachable tile.
    Move { destination: Point },
    /// Attack a tile in range. The target is the unit with `target_id`
    /// when supplied, otherwise whatever living unit occupies the tile.
    Attack {
        target_id: Option<String>,
        target_position: Point,
    },
    /// Ask the framework to advance the turn.
    EndTurn,
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Selected,
    Moved,
    Attacked,
    /// The engine never advances the turn itself; the framework sees
    /// this and runs the boundary hooks per its own turn-order policy.
    TurnEndRequested,
}

/// Why a command was refused. Externally every rejection is identical
/// ("nothing happened"); the variants exist for testability and for the
/// framework layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownUnit,
    NotOwner,
    UnitDowned,
    NoSelection,
    AlreadyMoved,
    OutOfRange,
    TileOccupied,
    NoTarget,
    TargetDowned,
    FriendlyTarget,
    AlreadyActed,
    /// Raised by the framework layer when the issuer is not the current
    /// turn-holder; the engine itself checks unit ownership instead.
    NotYourTurn,
}

/// Apply one command for the issuing player. On `Err` the state is
/// guaranteed untouched and nothing was logged.
pub fn apply_command(
    state: &mut MatchState,
    player: PlayerId,
    command: &Command,
) -> Result<Applied, Rejection> {
    match command {
        Command::Select { unit_id } => select_unit(state, player, unit_id),
        Command::Move { destination } => move_unit(state, player, *destination),
        Command::Attack {
            target_id,
            target_position,
        } => attack(state, player, target_id.as_deref(), *target_position),
        Command::EndTurn => Ok(Applied::TurnEndRequested),
    }
}

// ── Command handlers ───────────────────────────────────────────────────

fn select_unit(
    state: &mut MatchState,
    player: PlayerId,
    unit_id: &str,
) -> Result<Applied, Rejection> {
    let unit = state.unit(unit_id).ok_or(Rejection::UnknownUnit)?;
    if unit.owner != player {
        return Err(Rejection::NotOwner);
    }
    if !unit.is_alive() {
        return Err(Rejection::UnitDowned);
    }
    state.selected_unit_id = Some(unit_id.to_string());
    Ok(Applied::Selected)
}

/// The currently selected unit, validated to belong to the issuer.
fn selected_unit<'a>(state: &'a MatchState, player: PlayerId) -> Result<&'a Unit, Rejection> {
    let id = state
        .selected_unit_id
        .as_deref()
        .ok_or(Rejection::NoSelection)?;
    let unit = state.unit(id).ok_or(Rejection::UnknownUnit)?;
    if unit.owner != player {
        return Err(Rejection::NotOwner);
    }
    Ok(unit)
}

fn move_unit(
    state: &mut MatchState,
    player: PlayerId,
    destination: Point,
) -> Result<Applied, Rejection> {
    let (unit_id, label) = {
        let unit = selected_unit(state, player)?;
        if unit.has_moved {
            return Err(Rejection::AlreadyMoved);
        }
        if !unit.is_alive() {
            return Err(Rejection::UnitDowned);
        }
        // Must stay equivalent to membership in queries::reachable_tiles.
        if !in_bounds(destination) || manhattan(unit.position, destination) > unit.move_range {
            return Err(Rejection::OutOfRange);
        }
        if destination == unit.position || unit_at(state, destination).is_some() {
            return Err(Rejection::TileOccupied);
        }
        (unit.id.clone(), unit.label())
    };

    if let Some(unit) = state.unit_mut(&unit_id) {
        unit.position = destination;
        unit.has_moved = true;
    }
    state.push_log(format!(
        "{} repositions to ({}, {}).",
        label,
        destination.x + 1,
        destination.y + 1
    ));
    Ok(Applied::Moved)
}

fn attack(
    state: &mut MatchState,
    player: PlayerId,
    target_id: Option<&str>,
    target_position: Point,
) -> Result<Applied, Rejection> {
    let (attacker_id, attacker_label, attacker_class) = {
        let unit = selected_unit(state, player)?;
        if unit.has_acted {
            return Err(Rejection::AlreadyActed);
        }
        if !unit.is_alive() {
            return Err(Rejection::UnitDowned);
        }
        let dist = manhattan(unit.position, target_position);
        if !in_bounds(target_position) || dist == 0 || dist > unit.attack_range {
            return Err(Rejection::OutOfRange);
        }
        (unit.id.clone(), unit.label(), unit.class)
    };

    // Resolve the target: explicit id wins, occupancy otherwise.
    let target = match target_id {
        Some(id) => state.unit(id),
        None => unit_at(state, target_position),
    };
    let target = target.ok_or(Rejection::NoTarget)?;
    if !target.is_alive() {
        return Err(Rejection::TargetDowned);
    }
    if target.owner == player {
        return Err(Rejection::FriendlyTarget);
    }
    let target_id = target.id.clone();
    let target_label = target.label();

    let damage = attacker_class.template().damage;
    if let Some(target) = state.unit_mut(&target_id) {
        target.hp = (target.hp - damage).max(0);
    }
    if let Some(attacker) = state.unit_mut(&attacker_id) {
        attacker.has_acted = true;
    }
    state.push_log(format!(
        "{} strikes {} for {} damage.",
        attacker_label, target_label, damage
    ));

    // Stormcaller splash: 1 damage to every living enemy on the four
    // orthogonal neighbors of the target tile. Centered on the tile that
    // was aimed at, not on the target's live position.
    if attacker_class == CombatClass::Stormcaller {
        for (dx, dy) in SPLASH_OFFSETS {
            let splash_pos = Point::new(target_position.x + dx, target_position.y + dy);
            let splash = unit_at(state, splash_pos)
                .filter(|u| u.owner != player)
                .map(|u| (u.id.clone(), u.label()));
            if let Some((splash_id, splash_label)) = splash {
                if let Some(unit) = state.unit_mut(&splash_id) {
                    unit.hp = (unit.hp - SPLASH_DAMAGE).max(0);
                }
                state.push_log(format!(
                    "{}'s storm arcs to {} ({} splash damage).",
                    attacker_label, splash_label, SPLASH_DAMAGE
                ));
            }
        }
    }

    // Defeat is judged after splash: a primary target named by id can
    // stand next to the aimed tile and be finished off by its own splash.
    let defeated = state.unit(&target_id).map_or(false, |u| u.hp == 0);
    if defeated {
        state.push_log(format!("{} has fallen!", target_label));
        if state.selected_unit_id.as_deref() == Some(target_id.as_str()) {
            state.selected_unit_id = None;
        }
    }

    Ok(Applied::Attacked)
}

// ── Turn controller ────────────────────────────────────────────────────

/// Turn-begin hook, invoked by the surrounding turn-order mechanism
/// before the named player's first command of the turn.
pub fn on_turn_begin(state: &mut MatchState, player: PlayerId) {
    for unit in state.units.values_mut() {
        if unit.owner == player && unit.is_alive() {
            unit.has_moved = false;
            unit.has_acted = false;
        }
    }
    cleanup_selection(state);
    state.push_log(format!("{}'s command phase.", player));
}

/// Turn-end hook. Selection never survives a turn boundary, not even to
/// the same player's next turn.
pub fn on_turn_end(state: &mut MatchState) {
    state.selected_unit_id = None;
}

/// Re-establish the selection invariant: drop the selection if it no
/// longer references a living unit.
fn cleanup_selection(state: &mut MatchState) {
    let stale = match state.selected_unit_id.as_deref() {
        Some(id) => state.unit(id).map_or(true, |u| !u.is_alive()),
        None => false,
    };
    if stale {
        state.selected_unit_id = None;
    }
}
