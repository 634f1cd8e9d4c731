// ═══════════════════════════════════════════════════════════════════════
// Win evaluation
// ═══════════════════════════════════════════════════════════════════════

use crate::queries::alive_units;
use crate::types::{MatchOutcome, MatchState, PlayerId};

/// Evaluate the win condition. Pure function of state; the surrounding
/// framework consults it after every command and freezes dispatch once a
/// terminal result is reported.
pub fn evaluate(state: &MatchState) -> MatchOutcome {
    // A registry with no units at all means the match has not been
    // hydrated yet; that must never be misread as a simultaneous defeat.
    if state.units.is_empty() {
        return MatchOutcome::Ongoing;
    }

    let p0 = alive_units(state, Some(PlayerId::P0)).len();
    let p1 = alive_units(state, Some(PlayerId::P1)).len();

    match (p0, p1) {
        (0, 0) => MatchOutcome::Draw,
        (0, _) => MatchOutcome::Winner(PlayerId::P1),
        (_, 0) => MatchOutcome::Winner(PlayerId::P0),
        _ => MatchOutcome::Ongoing,
    }
}
