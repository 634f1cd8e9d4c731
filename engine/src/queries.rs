// ═══════════════════════════════════════════════════════════════════════
// Unit registry queries — read-only views over MatchState
//
// Downed units (hp == 0) stay in the registry but never occupy a tile
// for query purposes.
// ═══════════════════════════════════════════════════════════════════════

use crate::grid::{manhattan, BOARD_SIZE};
use crate::types::{MatchState, PlayerId, Point, Unit};

/// All living units, optionally restricted to one owner.
pub fn alive_units(state: &MatchState, owner: Option<PlayerId>) -> Vec<&Unit> {
    state
        .units
        .values()
        .filter(|u| u.is_alive() && owner.map_or(true, |p| u.owner == p))
        .collect()
}

/// The (at most one) living unit occupying a tile.
pub fn unit_at(state: &MatchState, point: Point) -> Option<&Unit> {
    state
        .units
        .values()
        .find(|u| u.is_alive() && u.position == point)
}

/// Every tile the unit may move to: in bounds, within move range
/// (Manhattan), not its own tile, not occupied by any living unit.
/// Empty once the unit has moved this turn, or if it is downed.
pub fn reachable_tiles(unit: &Unit, state: &MatchState) -> Vec<Point> {
    if unit.has_moved || !unit.is_alive() {
        return Vec::new();
    }
    let mut tiles = Vec::new();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let target = Point::new(x, y);
            if manhattan(unit.position, target) > unit.move_range {
                continue;
            }
            if target == unit.position {
                continue;
            }
            if unit_at(state, target).is_some() {
                continue;
            }
            tiles.push(target);
        }
    }
    tiles
}

/// Every tile the unit may aim at: in bounds, Manhattan distance in
/// [1, attack_range]. Occupancy-independent — target legality is checked
/// at attack time. Empty once the unit has acted, or if it is downed.
pub fn attackable_tiles(unit: &Unit) -> Vec<Point> {
    if unit.has_acted || !unit.is_alive() {
        return Vec::new();
    }
    let mut tiles = Vec::new();
    for y in 0..BOARD_SIZE {
        for x in 0..BOARD_SIZE {
            let target = Point::new(x, y);
            let dist = manhattan(unit.position, target);
            if dist == 0 || dist > unit.attack_range {
                continue;
            }
            tiles.push(target);
        }
    }
    tiles
}
