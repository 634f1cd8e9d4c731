// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI harness for Grid Skirmish matches
//
// Stands in for the match framework the engine is built against: it owns
// the turn-order policy (strict two-player alternation), fires the
// turn-boundary hooks, consults the win evaluator after every command,
// and freezes dispatch once a terminal outcome is reported.
// ═══════════════════════════════════════════════════════════════════════

use clap::{Parser, Subcommand};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skirmish_engine::queries::{alive_units, attackable_tiles, reachable_tiles, unit_at};
use skirmish_engine::{
    apply_command, create_initial_state, evaluate, on_turn_begin, on_turn_end, Applied,
    CombatClass, Command, MatchOutcome, MatchState, PlayerId, Point, Rejection, Unit,
};

#[derive(Parser)]
#[command(name = "skirmish-runner", about = "Grid Skirmish match harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single match with a seeded random driver
    Play {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Stop after this many dispatched commands
        #[arg(short, long, default_value_t = 400)]
        max_commands: u32,
        /// Dump the final match state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run many matches and report the outcome distribution
    Simulate {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        /// Command budget per match
        #[arg(short, long, default_value_t = 400)]
        max_commands: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            seed,
            max_commands,
            json,
        } => cmd_play(seed, max_commands, json),
        Commands::Simulate {
            games,
            seed,
            max_commands,
        } => cmd_simulate(games, seed, max_commands),
    }
}

// ── Session: the framework side of the engine contract ─────────────────

struct Session {
    state: MatchState,
    active: PlayerId,
    outcome: MatchOutcome,
}

impl Session {
    fn new() -> Session {
        let mut state = create_initial_state();
        let active = PlayerId::P0;
        on_turn_begin(&mut state, active);
        Session {
            state,
            active,
            outcome: MatchOutcome::Ongoing,
        }
    }

    /// Dispatch one command. Turn ownership is enforced here, not in the
    /// engine; a turn-end request runs both boundary hooks and hands the
    /// turn to the opponent. The evaluator runs after every command.
    fn dispatch(&mut self, player: PlayerId, command: &Command) -> Result<Applied, Rejection> {
        if player != self.active {
            return Err(Rejection::NotYourTurn);
        }
        let applied = apply_command(&mut self.state, player, command)?;
        if applied == Applied::TurnEndRequested {
            on_turn_end(&mut self.state);
            self.active = self.active.opponent();
            on_turn_begin(&mut self.state, self.active);
        }
        self.outcome = evaluate(&self.state);
        Ok(applied)
    }
}

// ── Random command driver ──────────────────────────────────────────────

/// Pick the next command for the active player: strike an enemy in range
/// when possible, otherwise reposition, otherwise pass the turn.
fn random_command(state: &MatchState, player: PlayerId, rng: &mut ChaCha8Rng) -> Command {
    let selected = state
        .selected_unit_id
        .as_deref()
        .and_then(|id| state.unit(id));
    let unit = match selected {
        Some(u) if u.owner == player && u.is_alive() => u,
        _ => {
            // Sorted so a given seed always replays the same match
            let mut fresh: Vec<&Unit> = alive_units(state, Some(player))
                .into_iter()
                .filter(|u| !u.has_moved || !u.has_acted)
                .collect();
            fresh.sort_by(|a, b| a.id.cmp(&b.id));
            return match fresh.choose(rng) {
                Some(u) => Command::Select {
                    unit_id: u.id.clone(),
                },
                None => Command::EndTurn,
            };
        }
    };

    let strikes: Vec<Point> = attackable_tiles(unit)
        .into_iter()
        .filter(|&p| unit_at(state, p).map_or(false, |t| t.owner != player))
        .collect();
    if let Some(&p) = strikes.choose(rng) {
        return Command::Attack {
            target_id: None,
            target_position: p,
        };
    }
    if !unit.has_moved {
        if let Some(&p) = reachable_tiles(unit, state).choose(rng) {
            return Command::Move { destination: p };
        }
    }
    Command::EndTurn
}

fn drive_match(seed: u64, max_commands: u32) -> (Session, u32) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut session = Session::new();
    let mut issued = 0u32;

    while issued < max_commands && session.outcome == MatchOutcome::Ongoing {
        let player = session.active;
        let command = random_command(&session.state, player, &mut rng);
        let _ = session.dispatch(player, &command);
        issued += 1;
    }
    (session, issued)
}

// ── Subcommands ────────────────────────────────────────────────────────

fn cmd_play(seed: u64, max_commands: u32, json: bool) {
    println!("=== Grid Skirmish ===\n");
    println!("Running single match: seed={}, max_commands={}\n", seed, max_commands);

    println!("Roster per side:");
    for class in CombatClass::ALL {
        let t = class.template();
        println!(
            "  {:12} hp {:2}  move {}  range {}  damage {}",
            t.label, t.hp, t.move_range, t.attack_range, t.damage
        );
        println!("  {:12} {}", "", t.description);
    }
    println!();

    let (session, issued) = drive_match(seed, max_commands);

    println!("Match finished after {} commands.", issued);
    match session.outcome {
        MatchOutcome::Winner(player) => println!("  Winner: {}", player),
        MatchOutcome::Draw => println!("  Result: draw"),
        MatchOutcome::Ongoing => println!("  Result: unfinished (command budget reached)"),
    }
    for player in PlayerId::ALL {
        println!(
            "  {} units alive: {}",
            player,
            alive_units(&session.state, Some(player)).len()
        );
    }

    println!("\nCommand log (oldest first):");
    for entry in session.state.log.iter().rev() {
        println!("  {}", entry.message);
    }

    if json {
        match serde_json::to_string_pretty(&session.state) {
            Ok(snapshot) => println!("\n{}", snapshot),
            Err(e) => eprintln!("snapshot error: {}", e),
        }
    }
}

fn cmd_simulate(games: u32, seed: u64, max_commands: u32) {
    println!("=== Simulation: {} matches ===\n", games);

    let mut p0_wins = 0u32;
    let mut p1_wins = 0u32;
    let mut draws = 0u32;
    let mut unfinished = 0u32;
    let mut total_commands = 0u64;

    for g in 0..games {
        let match_seed = seed + g as u64 * 1000;
        let (session, issued) = drive_match(match_seed, max_commands);
        total_commands += issued as u64;
        match session.outcome {
            MatchOutcome::Winner(PlayerId::P0) => p0_wins += 1,
            MatchOutcome::Winner(PlayerId::P1) => p1_wins += 1,
            MatchOutcome::Draw => draws += 1,
            MatchOutcome::Ongoing => unfinished += 1,
        }
    }

    println!("--- Summary ---");
    println!("  Player 1 wins: {}", p0_wins);
    println!("  Player 2 wins: {}", p1_wins);
    println!("  Draws:         {}", draws);
    println!("  Unfinished:    {}", unfinished);
    if games > 0 {
        println!("  Avg commands per match: {}", total_commands / games as u64);
    }
}
