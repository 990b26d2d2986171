#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Headless command-line runner for Vanguard Defence.
//!
//! Drives the frame loop in the canonical sub-tick order (clock and status
//! reconcilers, movement, targeting, combat, wave direction) and plays a
//! simple deterministic build strategy so full campaigns can be simulated
//! and scored without a renderer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::Parser;

use vanguard_defence_core::{
    Command, EnemyKind, Event, Outcome, Position, ScoreReport, Settings, SpeedLevel,
    TargetAssignment, TowerKind, FINAL_ROUND,
};
use vanguard_defence_system_analytics::Analytics;
use vanguard_defence_system_movement::{Movement, STEP_QUANTUM};
use vanguard_defence_system_tower_combat::TowerCombat;
use vanguard_defence_system_tower_targeting::TowerTargeting;
use vanguard_defence_system_wave_director::{Config as DirectorConfig, WaveDirector};
use vanguard_defence_world::{self as world, query, World};

/// Fixed battlefield build sites, mirroring the classic map layout.
const BUILDING_SITES: [(f32, f32); 18] = [
    (21.0, 36.0),
    (11.0, 36.0),
    (66.0, 61.0),
    (60.0, 59.0),
    (63.0, 31.0),
    (63.0, 43.5),
    (85.0, 36.0),
    (2.0, 66.0),
    (25.0, 66.0),
    (30.0, 9.0),
    (50.0, 9.0),
    (41.0, 6.0),
    (41.0, 41.0),
    (41.0, 53.5),
    (35.0, 58.0),
    (42.0, 67.0),
    (80.0, 66.0),
    (80.0, 81.0),
];

/// Rotation the autoplayer buys towers in.
const BUILD_ORDER: [TowerKind; 7] = [
    TowerKind::Basic,
    TowerKind::Sniper,
    TowerKind::Slower,
    TowerKind::GasSpitter,
    TowerKind::Cannon,
    TowerKind::RapidShooter,
    TowerKind::Mortar,
];

/// Money the autoplayer keeps in reserve before buying anything.
const PURCHASE_RESERVE: u64 = 150;

/// Hard cap on simulated frames so a stalled campaign cannot hang the run.
const MAX_FRAMES: u64 = 2_000_000;

#[derive(Debug, Parser)]
#[command(name = "vanguard-defence", about = "Headless Vanguard Defence simulation")]
struct Args {
    /// Stop after this many rounds even if the campaign is still going.
    #[arg(long, default_value_t = FINAL_ROUND)]
    rounds: u32,
    /// Seed for the critical-hit stream.
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
    /// Wall-clock speed level (1, 2, or 3).
    #[arg(long, default_value_t = 1)]
    speed: u8,
    /// Optional TOML file with player settings.
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(
        (1..=3).contains(&args.speed),
        "speed must be 1, 2, or 3, got {}",
        args.speed
    );
    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };

    let mut simulation = Simulation::new(args.seed, settings);
    println!("{}", query::welcome_banner(&simulation.world));

    let mut events = Vec::new();
    world::apply(
        &mut simulation.world,
        Command::SetSpeed {
            speed: speed_level(args.speed),
        },
        &mut events,
    );
    world::apply(&mut simulation.world, Command::StartRound, &mut events);

    let mut report: Option<ScoreReport> = None;
    for _ in 0..MAX_FRAMES {
        simulation.frame(&mut events);
        simulation.autoplay(&mut events);

        for event in &events {
            match event {
                Event::RoundStarted { round } => {
                    println!(
                        "round {round} started (health {}, money {})",
                        query::health(&simulation.world),
                        query::money(&simulation.world)
                    );
                }
                Event::EnemySpawned { kind, .. }
                    if matches!(kind, EnemyKind::Boss | EnemyKind::MegaBoss) =>
                {
                    println!("  a {} entered the field", kind.label());
                }
                Event::TowerPlaced { kind, .. } => {
                    println!("  built a {} tower", kind.label());
                }
                Event::ScoreReported { report: published } => report = Some(*published),
                _ => {}
            }
        }
        if report.is_some() {
            break;
        }

        let snapshot = query::round_snapshot(&simulation.world);
        if snapshot.round > args.rounds {
            break;
        }
        // With auto-start disabled the world pauses itself after each wave;
        // the headless player resumes immediately.
        if snapshot.paused && !snapshot.auto_start_rounds {
            world::apply(
                &mut simulation.world,
                Command::SetPaused { paused: false },
                &mut events,
            );
        }
    }

    match report {
        Some(report) => {
            let outcome = match report.outcome {
                Outcome::Victory => "victory",
                Outcome::Defeat => "defeat",
            };
            println!(
                "{outcome} in round {}: score {}, {} kills, {} breaches, {} earned",
                report.round,
                report.score(),
                report.kills,
                report.breaches,
                report.rewards
            );
        }
        None => {
            let snapshot = query::round_snapshot(&simulation.world);
            println!(
                "stopped after round {} with health {} and money {}",
                snapshot.round.saturating_sub(1),
                snapshot.health,
                snapshot.money
            );
        }
    }

    Ok(())
}

fn speed_level(level: u8) -> SpeedLevel {
    match level {
        3 => SpeedLevel::Triple,
        2 => SpeedLevel::Double,
        _ => SpeedLevel::Normal,
    }
}

fn load_settings(path: &Path) -> Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading settings file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing settings file {}", path.display()))
}

struct Simulation {
    world: World,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    director: WaveDirector,
    analytics: Analytics,
    commands: Vec<Command>,
    assignments: Vec<TargetAssignment>,
    build_rotation: usize,
}

impl Simulation {
    fn new(seed: u64, settings: Settings) -> Self {
        let mut world = World::with_seed(seed);
        let mut events = Vec::new();
        world::apply(&mut world, Command::ConfigureSettings { settings }, &mut events);
        world::apply(
            &mut world,
            Command::ConfigureSites {
                sites: BUILDING_SITES
                    .iter()
                    .map(|&(x, y)| Position::new(x, y))
                    .collect(),
            },
            &mut events,
        );

        Self {
            world,
            movement: Movement::new(),
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            director: WaveDirector::new(DirectorConfig::new(settings.auto_start_rounds)),
            analytics: Analytics::new(),
            commands: Vec::new(),
            assignments: Vec::new(),
            build_rotation: 0,
        }
    }

    /// Runs one logical frame, leaving every event of the frame in `events`.
    fn frame(&mut self, events: &mut Vec<Event>) {
        events.clear();
        world::apply(&mut self.world, Command::Tick { dt: STEP_QUANTUM }, events);

        self.commands.clear();
        self.movement
            .handle(events, &query::enemy_view(&self.world), &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }

        self.targeting.handle(
            &query::tower_view(&self.world),
            &query::enemy_view(&self.world),
            &mut self.assignments,
        );
        self.combat.handle(
            &query::tower_view(&self.world),
            &self.assignments,
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }

        self.director
            .handle(events, &query::round_snapshot(&self.world), &mut self.commands);
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, events);
        }

        let mut published = Vec::new();
        self.analytics.handle(events, &mut published);
        events.append(&mut published);
    }

    /// Deterministic shopping policy: fill free sites in a fixed rotation,
    /// then sink spare money into the cheapest offered upgrades.
    fn autoplay(&mut self, events: &mut Vec<Event>) {
        let money = query::money(&self.world);
        let sites = query::sites(&self.world);
        if let Some(site) = sites.iter().find(|site| !site.occupied) {
            let kind = BUILD_ORDER[self.build_rotation % BUILD_ORDER.len()];
            if money >= kind.stats().price + PURCHASE_RESERVE {
                world::apply(
                    &mut self.world,
                    Command::PlaceTower {
                        site: site.id,
                        kind,
                    },
                    events,
                );
                self.build_rotation += 1;
                return;
            }
            return;
        }

        for tower in query::tower_view(&self.world).iter() {
            for upgrade in query::available_upgrades(&self.world, tower.id) {
                if upgrade.cost.saturating_mul(2) <= money {
                    world::apply(
                        &mut self.world,
                        Command::UpgradeTower {
                            tower: tower.id,
                            path: upgrade.path,
                        },
                        events,
                    );
                    return;
                }
            }
        }
    }
}
