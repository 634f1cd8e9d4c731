// ═══════════════════════════════════════════════════════════════════════
// Match setup — builds the initial MatchState for both players
// ═══════════════════════════════════════════════════════════════════════

use crate::types::{CombatClass, MatchState, PlayerId, Point, Unit};
use std::collections::HashMap;

/// Fixed opening formations: three (class, coordinate) pairs per side,
/// mirrored across the board.
const FORMATIONS: [(PlayerId, [(CombatClass, (i32, i32)); 3]); 2] = [
    (
        PlayerId::P0,
        [
            (CombatClass::Vanguard, (1, 5)),
            (CombatClass::Skyhunter, (0, 3)),
            (CombatClass::Stormcaller, (2, 1)),
        ],
    ),
    (
        PlayerId::P1,
        [
            (CombatClass::Vanguard, (6, 2)),
            (CombatClass::Skyhunter, (7, 4)),
            (CombatClass::Stormcaller, (5, 6)),
        ],
    ),
];

fn create_unit(id: String, owner: PlayerId, class: CombatClass, position: Point) -> Unit {
    let template = class.template();
    Unit {
        id,
        owner,
        class,
        hp: template.hp,
        max_hp: template.hp,
        move_range: template.move_range,
        attack_range: template.attack_range,
        damage: template.damage,
        position,
        has_moved: false,
        has_acted: false,
    }
}

/// Build the initial match state: both formations placed, nothing
/// selected, empty log. Unit ids come from a counter scoped to this
/// invocation, so concurrent matches never share id state.
pub fn create_initial_state() -> MatchState {
    let mut units = HashMap::new();
    let mut next_id = 0u32;

    for (owner, formation) in FORMATIONS {
        for (class, (x, y)) in formation {
            let id = format!("p{}-{}-{}", owner.number() - 1, class.key(), next_id);
            next_id += 1;
            let unit = create_unit(id.clone(), owner, class, Point::new(x, y));
            units.insert(id, unit);
        }
    }

    MatchState {
        units,
        selected_unit_id: None,
        log: Vec::new(),
        log_seq: 0,
    }
}
