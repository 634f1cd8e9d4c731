// ═══════════════════════════════════════════════════════════════════════
// Core types — the Grid Skirmish data model
//
// Everything here is plain serializable data. MatchState crosses a
// process/transport boundary to remote clients unchanged, so no type in
// this module carries behavior beyond small accessors.
// ═══════════════════════════════════════════════════════════════════════

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Players ────────────────────────────────────────────────────────────

/// One of the exactly two player identities in a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    P0,
    P1,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::P0, PlayerId::P1];

    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::P0 => PlayerId::P1,
            PlayerId::P1 => PlayerId::P0,
        }
    }

    /// 1-based number used in display strings.
    pub fn number(self) -> u8 {
        match self {
            PlayerId::P0 => 1,
            PlayerId::P1 => 2,
        }
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

// ── Grid coordinates ───────────────────────────────────────────────────

/// A tile coordinate. Valid board positions satisfy `grid::in_bounds`;
/// signed components let splash-offset arithmetic go off-board safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }
}

// ── Combat classes ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatClass {
    Vanguard,
    Skyhunter,
    Stormcaller,
}

/// Static stat block for a combat class. Immutable process-wide.
#[derive(Debug, Clone, Copy)]
pub struct ClassTemplate {
    pub label: &'static str,
    pub hp: i32,
    pub move_range: i32,
    pub attack_range: i32,
    pub damage: i32,
    pub description: &'static str,
}

/// The three class templates, indexed by `CombatClass` discriminant.
pub const CLASS_TEMPLATES: [ClassTemplate; 3] = [
    ClassTemplate {
        label: "Vanguard",
        hp: 12,
        move_range: 3,
        attack_range: 1,
        damage: 4,
        description: "Heavy frontline fighter. Deals massive damage to adjacent enemies.",
    },
    ClassTemplate {
        label: "Skyhunter",
        hp: 9,
        move_range: 3,
        attack_range: 4,
        damage: 3,
        description: "Ranged specialist. Can strike from long distance after repositioning.",
    },
    ClassTemplate {
        label: "Stormcaller",
        hp: 8,
        move_range: 2,
        attack_range: 3,
        damage: 2,
        description: "Area denial caster. Hits a target tile and splashes adjacent foes.",
    },
];

impl CombatClass {
    pub const ALL: [CombatClass; 3] = [
        CombatClass::Vanguard,
        CombatClass::Skyhunter,
        CombatClass::Stormcaller,
    ];

    pub fn template(self) -> &'static ClassTemplate {
        &CLASS_TEMPLATES[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.template().label
    }

    /// Lowercase key used in unit ids.
    pub fn key(self) -> &'static str {
        match self {
            CombatClass::Vanguard => "vanguard",
            CombatClass::Skyhunter => "skyhunter",
            CombatClass::Stormcaller => "stormcaller",
        }
    }
}

// ── Units ──────────────────────────────────────────────────────────────

/// A combat unit. Created once at setup and never removed from the
/// registry; a unit at 0 hp is "downed" and excluded from occupancy,
/// targeting and selection, but keeps its identity for log back-references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    pub owner: PlayerId,
    pub class: CombatClass,
    pub hp: i32,
    pub max_hp: i32,
    pub move_range: i32,
    pub attack_range: i32,
    pub damage: i32,
    pub position: Point,
    pub has_moved: bool,
    pub has_acted: bool,
}

impl Unit {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Display name (the class label).
    pub fn label(&self) -> &'static str {
        self.class.label()
    }
}

// ── Command log ────────────────────────────────────────────────────────

/// Maximum retained log entries; insertion evicts the oldest.
pub const LOG_CAP: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub message: String,
}

// ── Match state ────────────────────────────────────────────────────────

/// Complete state of one match. Owned exclusively by that match; the
/// engine assumes the surrounding framework serializes all command
/// invocations against it and performs no locking of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    /// Unit registry, keyed by unit id. Iteration order is irrelevant.
    pub units: HashMap<String, Unit>,
    /// At most one selected unit; if set, it must reference a unit that
    /// exists and is not downed.
    pub selected_unit_id: Option<String>,
    /// Event log, newest first, capped at `LOG_CAP`.
    pub log: Vec<LogEntry>,
    /// Monotonic counter feeding log entry ids.
    pub log_seq: u64,
}

impl MatchState {
    pub fn unit(&self, id: &str) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn unit_mut(&mut self, id: &str) -> Option<&mut Unit> {
        self.units.get_mut(id)
    }

    /// Append an event: fresh id, inserted at the front, oldest entry
    /// evicted past `LOG_CAP`.
    pub fn push_log(&mut self, message: impl Into<String>) {
        let id = format!("log-{}", self.log_seq);
        self.log_seq += 1;
        self.log.insert(0, LogEntry { id, message: message.into() });
        self.log.truncate(LOG_CAP);
    }
}

// ── Match outcome ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Ongoing,
    Draw,
    Winner(PlayerId),
}
