// ═══════════════════════════════════════════════════════════════════════
// Grid geometry — pure coordinate math, no state
// ═══════════════════════════════════════════════════════════════════════

use crate::types::Point;

/// The board is a fixed 8×8 square.
pub const BOARD_SIZE: i32 = 8;

/// Manhattan distance. Movement and attack range both use this metric;
/// no terrain cost, no diagonal movement.
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub fn in_bounds(p: Point) -> bool {
    p.x >= 0 && p.x < BOARD_SIZE && p.y >= 0 && p.y < BOARD_SIZE
}
