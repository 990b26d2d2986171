#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Vanguard Defence.
//!
//! All mutation flows through [`apply`]: adapters and systems submit
//! [`Command`] values, the world executes them deterministically and
//! broadcasts [`Event`] values. Pause suspends the clock entirely; a tick
//! delivered while paused is ignored rather than deferred, so paused time is
//! simply never simulated.

mod combat;
mod status;

use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use vanguard_defence_core::{
    path, upgrades, waves, Command, EffectId, EnemyId, EnemyKind, Event, Outcome, PlacementError,
    Position, SaleError, Settings, SiteId, SpeedLevel, TargetingMode, TowerId, TowerKind,
    TowerStats, UpgradeError, UpgradePath, ZoneSpec, FINAL_ROUND, WELCOME_BANNER,
};

const STARTING_HEALTH: i64 = 100;
const STARTING_MONEY: u64 = 200;
const DEFAULT_SEED: u64 = 0x5d1f_37c2_a90b_46e8;
const RNG_STREAM_CRITICAL: &str = "critical-hits";

const KILL_REWARD_DIVISOR: f32 = 6.5;
const MID_GAME_REWARD_ROUND: u32 = 23;
const MID_GAME_REWARD_FACTOR: f32 = 0.325;
const LATE_GAME_REWARD_ROUND: u32 = 33;
const LATE_GAME_REWARD_FACTOR: f32 = 0.055;
const SALE_REFUND_DIVISOR: f64 = 1.5;

const DEATH_SPAWN_KIND: EnemyKind = EnemyKind::SpeedyMegaTank;
const DEATH_SPAWN_COUNT: u32 = 5;
const DEATH_SPAWN_STAGGER: Duration = Duration::from_millis(50);

const EXPLOSION_EFFECT_TTL: Duration = Duration::from_millis(250);
const DAMAGE_NUMBER_TTL: Duration = Duration::from_millis(1_000);

/// Represents the authoritative Vanguard Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    seed: u64,
    clock: Duration,
    round: u32,
    spawned_units: u32,
    wave_cleared: bool,
    health: i64,
    money: u64,
    paused: bool,
    can_pause: bool,
    speed: SpeedLevel,
    settings: Settings,
    sites: Vec<Site>,
    enemies: Vec<EnemyState>,
    towers: BTreeMap<TowerId, TowerState>,
    pending_spawns: Vec<PendingSpawn>,
    processed_kills: HashSet<EnemyId>,
    attack_effects: Vec<AttackEffectState>,
    explosions: Vec<ExplosionState>,
    zones: Vec<LingeringZoneState>,
    damage_numbers: Vec<DamageNumberState>,
    next_enemy_id: u32,
    next_tower_id: u32,
    next_effect_id: u32,
    poison_accumulator: Duration,
    lingering_accumulator: Duration,
    regen_accumulator: Duration,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a new world with the default critical-hit seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Creates a new world whose critical draws replay for the given seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            banner: WELCOME_BANNER,
            seed,
            clock: Duration::ZERO,
            round: 0,
            spawned_units: 0,
            wave_cleared: false,
            health: STARTING_HEALTH,
            money: STARTING_MONEY,
            paused: false,
            can_pause: false,
            speed: SpeedLevel::Normal,
            settings: Settings::default(),
            sites: Vec::new(),
            enemies: Vec::new(),
            towers: BTreeMap::new(),
            pending_spawns: Vec::new(),
            processed_kills: HashSet::new(),
            attack_effects: Vec::new(),
            explosions: Vec::new(),
            zones: Vec::new(),
            damage_numbers: Vec::new(),
            next_enemy_id: 0,
            next_tower_id: 0,
            next_effect_id: 0,
            poison_accumulator: Duration::ZERO,
            lingering_accumulator: Duration::ZERO,
            regen_accumulator: Duration::ZERO,
            rng: rng_for_seed(seed),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn rng_for_seed(seed: u64) -> ChaCha8Rng {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(RNG_STREAM_CRITICAL.as_bytes());
    let digest = hasher.finalize();
    let bytes: [u8; 8] = digest[0..8].try_into().expect("sha256 digest slice length");
    ChaCha8Rng::seed_from_u64(u64::from_le_bytes(bytes))
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SlowStatus {
    pub(crate) factor: f32,
    pub(crate) source: TowerId,
    pub(crate) applied_at: Duration,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct StunStatus {
    pub(crate) source: TowerId,
    pub(crate) applied_at: Duration,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PoisonStatus {
    pub(crate) source: TowerId,
    pub(crate) applied_at: Duration,
}

#[derive(Clone, Debug)]
pub(crate) struct EnemyState {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Position,
    pub(crate) hp: f32,
    pub(crate) max_hp: f32,
    pub(crate) speed: f32,
    pub(crate) base_speed: f32,
    pub(crate) damage: u32,
    pub(crate) armored: bool,
    pub(crate) can_regen: bool,
    pub(crate) regen: f32,
    pub(crate) spawns_on_death: bool,
    pub(crate) targeted: bool,
    pub(crate) slow: Option<SlowStatus>,
    pub(crate) stun: Option<StunStatus>,
    pub(crate) poison: Option<PoisonStatus>,
    pub(crate) last_hit_by: Option<TowerId>,
}

#[derive(Clone, Debug)]
pub(crate) struct AttackInFlight {
    pub(crate) until: Duration,
    pub(crate) pending_damage: f32,
    pub(crate) targets: Vec<EnemyId>,
}

#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    pub(crate) id: TowerId,
    pub(crate) kind: TowerKind,
    pub(crate) site: SiteId,
    pub(crate) position: Position,
    pub(crate) stats: TowerStats,
    pub(crate) targeting: TargetingMode,
    pub(crate) damage_done: f32,
    pub(crate) worth: u64,
    pub(crate) path1: u8,
    pub(crate) path2: u8,
    pub(crate) committed: Option<UpgradePath>,
    pub(crate) attack: Option<AttackInFlight>,
    pub(crate) facing_right: bool,
}

#[derive(Clone, Copy, Debug)]
struct Site {
    id: SiteId,
    position: Position,
}

#[derive(Clone, Copy, Debug)]
struct PendingSpawn {
    kind: EnemyKind,
    position: Position,
    due: Duration,
}

#[derive(Clone, Copy, Debug)]
struct AttackEffectState {
    id: EffectId,
    tower: TowerId,
    from: Position,
    to: Position,
    created_at: Duration,
    ttl: Duration,
}

#[derive(Clone, Copy, Debug)]
struct ExplosionState {
    id: EffectId,
    position: Position,
    radius: f32,
    created_at: Duration,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct LingeringZoneState {
    pub(crate) id: EffectId,
    pub(crate) position: Position,
    pub(crate) radius: f32,
    pub(crate) damage: f32,
    pub(crate) duration: Duration,
    pub(crate) created_at: Duration,
}

#[derive(Clone, Copy, Debug)]
struct DamageNumberState {
    id: EffectId,
    amount: f32,
    position: Position,
    created_at: Duration,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureSites { sites } => {
            world.sites = sites
                .into_iter()
                .enumerate()
                .map(|(index, position)| Site {
                    id: SiteId::new(index as u32),
                    position,
                })
                .collect();
            world.towers.clear();
        }
        Command::ConfigureSettings { settings } => {
            world.settings = settings;
        }
        Command::StartRound => {
            if world.round == 0 {
                advance_round(world, out_events);
            }
        }
        Command::AdvanceRound => {
            if world.round > 0 && world.wave_cleared {
                advance_round(world, out_events);
            }
        }
        Command::Tick { dt } => tick(world, dt, out_events),
        Command::SpawnEnemy { kind, units } => {
            if world.round == 0 || world.paused {
                return;
            }
            world.spawned_units = world.spawned_units.saturating_add(units);
            let enemy = spawn_enemy_at(world, kind, path::SPAWN_POSITION);
            out_events.push(Event::EnemySpawned {
                enemy,
                kind,
                position: path::SPAWN_POSITION,
            });
        }
        Command::MoveEnemy { enemy, to } => move_enemy(world, enemy, to, out_events),
        Command::FireTower { tower, targets } => {
            if !world.paused {
                combat::resolve(world, tower, &targets, out_events);
            }
        }
        Command::PlaceTower { site, kind } => place_tower(world, site, kind, out_events),
        Command::UpgradeTower { tower, path } => upgrade_tower(world, tower, path, out_events),
        Command::SellTower { tower } => sell_tower(world, tower, out_events),
        Command::SetTargetingMode { tower, mode } => {
            if let Some(state) = world.towers.get_mut(&tower) {
                state.targeting = mode;
                out_events.push(Event::TargetingModeChanged { tower, mode });
            }
        }
        Command::SetPaused { paused } => set_paused(world, paused, out_events),
        Command::SetSpeed { speed } => {
            if !world.paused && world.speed != speed {
                world.speed = speed;
                out_events.push(Event::SpeedChanged { speed });
            }
        }
    }
}

fn tick(world: &mut World, dt: Duration, out: &mut Vec<Event>) {
    if world.paused || dt.is_zero() {
        return;
    }

    world.clock = world.clock.saturating_add(dt);
    out.push(Event::TimeAdvanced { dt });

    release_pending_spawns(world, out);
    settle_finished_attacks(world);
    status::reconcile(world, dt, out);
    prune_effects(world);
    check_wave_cleared(world, out);
    check_defeat(world, out);
}

fn move_enemy(world: &mut World, enemy: EnemyId, to: Position, out: &mut Vec<Event>) {
    if world.paused {
        return;
    }
    let Some(index) = world.enemies.iter().position(|state| state.id == enemy) else {
        return;
    };
    if world.enemies[index].hp <= 0.0 {
        return;
    }

    world.enemies[index].position = to;
    if to.x() > path::GOAL_THRESHOLD {
        let breached = world.enemies.remove(index);
        world.health -= i64::from(breached.damage);
        out.push(Event::EnemyBreached {
            enemy: breached.id,
            damage: breached.damage,
        });
        check_defeat(world, out);
    }
}

fn place_tower(world: &mut World, site: SiteId, kind: TowerKind, out: &mut Vec<Event>) {
    let Some(position) = world
        .sites
        .iter()
        .find(|candidate| candidate.id == site)
        .map(|candidate| candidate.position)
    else {
        out.push(Event::TowerPlacementRejected {
            site,
            kind,
            reason: PlacementError::UnknownSite,
        });
        return;
    };
    if world.towers.values().any(|tower| tower.site == site) {
        out.push(Event::TowerPlacementRejected {
            site,
            kind,
            reason: PlacementError::SiteOccupied,
        });
        return;
    }
    let stats = kind.stats();
    if world.money < stats.price {
        out.push(Event::TowerPlacementRejected {
            site,
            kind,
            reason: PlacementError::InsufficientFunds,
        });
        return;
    }

    world.money -= stats.price;
    let id = TowerId::new(world.next_tower_id);
    world.next_tower_id += 1;
    let _ = world.towers.insert(
        id,
        TowerState {
            id,
            kind,
            site,
            position,
            stats,
            targeting: TargetingMode::First,
            damage_done: 0.0,
            worth: stats.price,
            path1: 0,
            path2: 0,
            committed: None,
            attack: None,
            facing_right: false,
        },
    );
    out.push(Event::TowerPlaced {
        tower: id,
        kind,
        site,
    });
}

fn upgrade_tower(world: &mut World, tower: TowerId, path: UpgradePath, out: &mut Vec<Event>) {
    let Some(state) = world.towers.get_mut(&tower) else {
        out.push(Event::TowerUpgradeRejected {
            tower,
            path,
            reason: UpgradeError::MissingTower,
        });
        return;
    };
    let offered = upgrades::available_upgrades(state.kind, state.path1, state.path2);
    let Some(upgrade) = offered.into_iter().find(|candidate| candidate.path == path) else {
        out.push(Event::TowerUpgradeRejected {
            tower,
            path,
            reason: UpgradeError::PathUnavailable,
        });
        return;
    };
    if world.money < upgrade.cost {
        out.push(Event::TowerUpgradeRejected {
            tower,
            path,
            reason: UpgradeError::InsufficientFunds,
        });
        return;
    }

    world.money -= upgrade.cost;
    upgrade.delta.apply(&mut state.stats);
    state.worth = state.worth.saturating_add(upgrade.delta.worth_add);
    let level = match path {
        UpgradePath::One => {
            state.path1 += 1;
            state.path1
        }
        UpgradePath::Two => {
            state.path2 += 1;
            state.path2
        }
    };
    if state.committed.is_none() && level >= upgrades::COMMIT_LEVEL {
        state.committed = Some(path);
    }
    out.push(Event::TowerUpgraded {
        tower,
        path,
        level,
    });
}

fn sell_tower(world: &mut World, tower: TowerId, out: &mut Vec<Event>) {
    match world.towers.remove(&tower) {
        Some(state) => {
            let refund = (state.worth as f64 / SALE_REFUND_DIVISOR).floor() as u64;
            world.money = world.money.saturating_add(refund);
            out.push(Event::TowerSold { tower, refund });
        }
        None => out.push(Event::TowerSaleRejected {
            tower,
            reason: SaleError::MissingTower,
        }),
    }
}

fn set_paused(world: &mut World, paused: bool, out: &mut Vec<Event>) {
    if paused == world.paused {
        return;
    }
    if paused && !world.can_pause {
        return;
    }

    world.paused = paused;
    out.push(Event::PauseChanged { paused });
    if world.speed != SpeedLevel::Normal {
        world.speed = SpeedLevel::Normal;
        out.push(Event::SpeedChanged {
            speed: SpeedLevel::Normal,
        });
    }
    if !paused && world.round > 0 && world.wave_cleared && !world.settings.auto_start_rounds {
        advance_round(world, out);
    }
}

fn advance_round(world: &mut World, out: &mut Vec<Event>) {
    let next = world.round + 1;
    if next > FINAL_ROUND {
        let round = world.round;
        let money = world.money;
        reset(world);
        out.push(Event::GameEnded {
            outcome: Outcome::Victory,
            round,
            money,
        });
        return;
    }

    world.round = next;
    world.spawned_units = 0;
    world.wave_cleared = false;
    world.processed_kills.clear();
    world.can_pause = !world.settings.auto_start_rounds;
    out.push(Event::RoundStarted { round: next });
}

fn reset(world: &mut World) {
    world.round = 0;
    world.spawned_units = 0;
    world.wave_cleared = false;
    world.health = STARTING_HEALTH;
    world.money = STARTING_MONEY;
    world.paused = false;
    world.can_pause = false;
    world.speed = SpeedLevel::Normal;
    world.enemies.clear();
    world.towers.clear();
    world.pending_spawns.clear();
    world.processed_kills.clear();
    world.attack_effects.clear();
    world.explosions.clear();
    world.zones.clear();
    world.damage_numbers.clear();
    world.poison_accumulator = Duration::ZERO;
    world.lingering_accumulator = Duration::ZERO;
    world.regen_accumulator = Duration::ZERO;
    world.rng = rng_for_seed(world.seed);
}

fn spawn_enemy_at(world: &mut World, kind: EnemyKind, position: Position) -> EnemyId {
    let stats = kind.stats();
    let id = EnemyId::new(world.next_enemy_id);
    world.next_enemy_id += 1;
    world.enemies.push(EnemyState {
        id,
        kind,
        position,
        hp: stats.hp,
        max_hp: stats.hp,
        speed: stats.speed,
        base_speed: stats.speed,
        damage: stats.damage,
        armored: stats.armored,
        can_regen: stats.can_regen,
        regen: stats.regen,
        spawns_on_death: stats.spawns_on_death,
        targeted: false,
        slow: None,
        stun: None,
        poison: None,
        last_hit_by: None,
    });
    id
}

fn release_pending_spawns(world: &mut World, out: &mut Vec<Event>) {
    let clock = world.clock;
    let mut index = 0;
    while index < world.pending_spawns.len() {
        if world.pending_spawns[index].due > clock {
            index += 1;
            continue;
        }
        let pending = world.pending_spawns.remove(index);
        let enemy = spawn_enemy_at(world, pending.kind, pending.position);
        out.push(Event::EnemySpawned {
            enemy,
            kind: pending.kind,
            position: pending.position,
        });
    }
}

fn settle_finished_attacks(world: &mut World) {
    let clock = world.clock;
    let finished: Vec<TowerId> = world
        .towers
        .iter()
        .filter(|(_, tower)| {
            tower
                .attack
                .as_ref()
                .is_some_and(|attack| attack.until <= clock)
        })
        .map(|(id, _)| *id)
        .collect();

    for id in finished {
        let Some(tower) = world.towers.get_mut(&id) else {
            continue;
        };
        let Some(attack) = tower.attack.take() else {
            continue;
        };
        tower.damage_done += attack.pending_damage;
        for target in attack.targets {
            if let Some(enemy) = world.enemies.iter_mut().find(|enemy| enemy.id == target) {
                enemy.targeted = false;
            }
        }
    }
}

fn prune_effects(world: &mut World) {
    let clock = world.clock;
    world
        .attack_effects
        .retain(|effect| clock < effect.created_at + effect.ttl);
    world
        .explosions
        .retain(|effect| clock < effect.created_at + EXPLOSION_EFFECT_TTL);
    world
        .damage_numbers
        .retain(|effect| clock < effect.created_at + DAMAGE_NUMBER_TTL);
}

fn check_wave_cleared(world: &mut World, out: &mut Vec<Event>) {
    if world.round == 0 || world.wave_cleared {
        return;
    }
    if world.spawned_units < waves::unit_limit(world.round) {
        return;
    }
    if !world.enemies.is_empty() || !world.pending_spawns.is_empty() {
        return;
    }

    world.wave_cleared = true;
    world.can_pause = true;
    out.push(Event::WaveCleared { round: world.round });
    if !world.settings.auto_start_rounds && !world.paused {
        world.paused = true;
        out.push(Event::PauseChanged { paused: true });
    }
}

fn check_defeat(world: &mut World, out: &mut Vec<Event>) {
    if world.round == 0 || world.health > 0 {
        return;
    }
    let round = world.round;
    let money = world.money;
    reset(world);
    out.push(Event::GameEnded {
        outcome: Outcome::Defeat,
        round,
        money,
    });
}

pub(crate) fn kill_reward(max_hp: f32, round: u32) -> u64 {
    let factor = if round >= LATE_GAME_REWARD_ROUND {
        LATE_GAME_REWARD_FACTOR
    } else if round >= MID_GAME_REWARD_ROUND {
        MID_GAME_REWARD_FACTOR
    } else {
        1.0
    };
    ((max_hp / KILL_REWARD_DIVISOR) * factor).floor() as u64
}

/// Settles every enemy whose hit points reached zero: grants the kill reward
/// at most once per enemy id, queues on-death replacements, and removes the
/// corpse from the pool.
pub(crate) fn process_kills(world: &mut World, out: &mut Vec<Event>) {
    let clock = world.clock;
    let round = world.round;
    let mut index = 0;
    while index < world.enemies.len() {
        if world.enemies[index].hp > 0.0 {
            index += 1;
            continue;
        }
        let enemy = world.enemies.remove(index);
        if !world.processed_kills.insert(enemy.id) {
            continue;
        }
        let reward = kill_reward(enemy.max_hp, round);
        world.money = world.money.saturating_add(reward);
        if enemy.spawns_on_death {
            for step in 0..DEATH_SPAWN_COUNT {
                world.pending_spawns.push(PendingSpawn {
                    kind: DEATH_SPAWN_KIND,
                    position: enemy.position,
                    due: clock + DEATH_SPAWN_STAGGER * (step + 1),
                });
            }
        }
        out.push(Event::EnemyKilled {
            enemy: enemy.id,
            kind: enemy.kind,
            reward,
            source: enemy.last_hit_by,
        });
    }
}

pub(crate) fn push_attack_effect(
    world: &mut World,
    tower: TowerId,
    from: Position,
    to: Position,
    ttl: Duration,
) {
    let id = EffectId::new(world.next_effect_id);
    world.next_effect_id += 1;
    world.attack_effects.push(AttackEffectState {
        id,
        tower,
        from,
        to,
        created_at: world.clock,
        ttl,
    });
}

pub(crate) fn push_explosion(world: &mut World, position: Position, radius: f32) {
    let id = EffectId::new(world.next_effect_id);
    world.next_effect_id += 1;
    world.explosions.push(ExplosionState {
        id,
        position,
        radius,
        created_at: world.clock,
    });
}

pub(crate) fn push_zone(world: &mut World, position: Position, spec: ZoneSpec) {
    let id = EffectId::new(world.next_effect_id);
    world.next_effect_id += 1;
    world.zones.push(LingeringZoneState {
        id,
        position,
        radius: spec.radius,
        damage: spec.damage,
        duration: spec.duration,
        created_at: world.clock,
    });
}

pub(crate) fn push_damage_number(world: &mut World, amount: f32, position: Position) {
    if !world.settings.show_damage_numbers {
        return;
    }
    let id = EffectId::new(world.next_effect_id);
    world.next_effect_id += 1;
    world.damage_numbers.push(DamageNumberState {
        id,
        amount,
        position,
        created_at: world.clock,
    });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use vanguard_defence_core::{
        upgrades, waves, AttackEffectSnapshot, DamageNumberSnapshot, EnemySnapshot, EnemyView,
        ExplosionSnapshot, LingeringZoneSnapshot, RoundSnapshot, Settings, SiteSnapshot,
        TowerId, TowerSnapshot, TowerView, UpgradeDefinition,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Captures a read-only view of the enemies on the battlefield.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.position,
                hp: enemy.hp,
                max_hp: enemy.max_hp,
                speed: enemy.speed,
                base_speed: enemy.base_speed,
                slowed: enemy.slow.is_some(),
                stunned: enemy.stun.is_some(),
                poisoned: enemy.poison.is_some(),
                armored: enemy.armored,
                targeted: enemy.targeted,
            })
            .collect();
        EnemyView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the towers on the battlefield.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        let snapshots: Vec<TowerSnapshot> = world
            .towers
            .values()
            .map(|tower| TowerSnapshot {
                id: tower.id,
                kind: tower.kind,
                site: tower.site,
                position: tower.position,
                radius: tower.stats.radius,
                attack_kind: tower.stats.attack_kind,
                can_hit_stealth: tower.stats.can_hit_stealth,
                targeting: tower.targeting,
                ready: tower.attack.is_none(),
                facing_right: tower.facing_right,
                damage_done: tower.damage_done,
                worth: tower.worth,
                path1_level: tower.path1,
                path2_level: tower.path2,
                committed: tower.committed,
            })
            .collect();
        TowerView::from_snapshots(snapshots)
    }

    /// Captures the HUD-facing round progression snapshot.
    #[must_use]
    pub fn round_snapshot(world: &World) -> RoundSnapshot {
        RoundSnapshot {
            round: world.round,
            spawned_units: world.spawned_units,
            unit_limit: waves::unit_limit(world.round),
            wave_cleared: world.wave_cleared,
            paused: world.paused,
            can_pause: world.can_pause,
            speed: world.speed,
            auto_start_rounds: world.settings.auto_start_rounds,
            health: world.health,
            money: world.money,
        }
    }

    /// Money available for purchases.
    #[must_use]
    pub fn money(world: &World) -> u64 {
        world.money
    }

    /// Remaining player health.
    #[must_use]
    pub fn health(world: &World) -> i64 {
        world.health
    }

    /// The settings value the world currently consults.
    #[must_use]
    pub fn settings(world: &World) -> Settings {
        world.settings
    }

    /// Enumerates the fixed placement sites and their occupancy.
    #[must_use]
    pub fn sites(world: &World) -> Vec<SiteSnapshot> {
        world
            .sites
            .iter()
            .map(|site| SiteSnapshot {
                id: site.id,
                position: site.position,
                occupied: world.towers.values().any(|tower| tower.site == site.id),
            })
            .collect()
    }

    /// Upgrades currently purchasable for the provided tower.
    #[must_use]
    pub fn available_upgrades(world: &World, tower: TowerId) -> Vec<UpgradeDefinition> {
        world.towers.get(&tower).map_or_else(Vec::new, |state| {
            upgrades::available_upgrades(state.kind, state.path1, state.path2)
        })
    }

    /// Transient attack beams for rendering.
    #[must_use]
    pub fn attack_effects(world: &World) -> Vec<AttackEffectSnapshot> {
        world
            .attack_effects
            .iter()
            .map(|effect| AttackEffectSnapshot {
                id: effect.id,
                tower: effect.tower,
                from: effect.from,
                to: effect.to,
                expires_in: (effect.created_at + effect.ttl).saturating_sub(world.clock),
            })
            .collect()
    }

    /// Transient explosion flashes for rendering.
    #[must_use]
    pub fn explosion_effects(world: &World) -> Vec<ExplosionSnapshot> {
        world
            .explosions
            .iter()
            .map(|effect| ExplosionSnapshot {
                id: effect.id,
                position: effect.position,
                radius: effect.radius,
                expires_in: (effect.created_at + super::EXPLOSION_EFFECT_TTL)
                    .saturating_sub(world.clock),
            })
            .collect()
    }

    /// Active damage-over-time zones.
    #[must_use]
    pub fn lingering_zones(world: &World) -> Vec<LingeringZoneSnapshot> {
        world
            .zones
            .iter()
            .map(|zone| LingeringZoneSnapshot {
                id: zone.id,
                position: zone.position,
                radius: zone.radius,
                damage_per_tick: zone.damage,
                expires_in: (zone.created_at + zone.duration).saturating_sub(world.clock),
            })
            .collect()
    }

    /// Transient floating damage numbers for rendering.
    #[must_use]
    pub fn damage_numbers(world: &World) -> Vec<DamageNumberSnapshot> {
        world
            .damage_numbers
            .iter()
            .map(|effect| DamageNumberSnapshot {
                id: effect.id,
                amount: effect.amount,
                position: effect.position,
                expires_in: (effect.created_at + super::DAMAGE_NUMBER_TTL)
                    .saturating_sub(world.clock),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{apply, process_kills, push_zone, query, World};
    use std::time::Duration;
    use vanguard_defence_core::{
        Command, EnemyId, EnemyKind, Event, Outcome, Position, SaleError, SiteId, SpeedLevel,
        TowerId, TowerKind, UpgradeError, UpgradePath, ZoneSpec,
    };

    const SITE_NEAR_SPAWN: Position = Position::new(10.0, 55.0);
    const SECOND_SITE: Position = Position::new(2.0, 66.0);

    fn started_world() -> World {
        let mut world = World::with_seed(1);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureSites {
                sites: vec![SITE_NEAR_SPAWN, SECOND_SITE],
            },
            &mut events,
        );
        apply(&mut world, Command::StartRound, &mut events);
        world
    }

    fn spawn(world: &mut World, kind: EnemyKind) -> EnemyId {
        let mut events = Vec::new();
        apply(world, Command::SpawnEnemy { kind, units: 1 }, &mut events);
        events
            .iter()
            .find_map(|event| match event {
                Event::EnemySpawned { enemy, .. } => Some(*enemy),
                _ => None,
            })
            .expect("spawn command must create an enemy")
    }

    fn place(world: &mut World, site: u32, kind: TowerKind) -> TowerId {
        let mut events = Vec::new();
        apply(
            world,
            Command::PlaceTower {
                site: SiteId::new(site),
                kind,
            },
            &mut events,
        );
        events
            .iter()
            .find_map(|event| match event {
                Event::TowerPlaced { tower, .. } => Some(*tower),
                _ => None,
            })
            .expect("placement must succeed")
    }

    fn fire(world: &mut World, tower: TowerId, targets: Vec<EnemyId>) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::FireTower { tower, targets }, &mut events);
        events
    }

    fn tick(world: &mut World, millis: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(millis),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn two_attack_cycles_kill_a_basic_enemy_and_grant_the_reward() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Basic);
        let tower = place(&mut world, 0, TowerKind::Basic);
        assert_eq!(query::money(&world), 100);

        let _ = fire(&mut world, tower, vec![enemy]);
        let hit = query::enemy_view(&world);
        assert_eq!(hit.get(enemy).map(|snapshot| snapshot.hp), Some(50.0));

        let _ = tick(&mut world, 1_000);
        let events = fire(&mut world, tower, vec![enemy]);

        assert!(query::enemy_view(&world).is_empty());
        assert_eq!(query::money(&world), 115);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::EnemyKilled { reward: 15, .. }
        )));
    }

    #[test]
    fn tower_cannot_retrigger_while_an_attack_is_in_flight() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Tank);
        let tower = place(&mut world, 0, TowerKind::Basic);

        let _ = fire(&mut world, tower, vec![enemy]);
        let _ = fire(&mut world, tower, vec![enemy]);

        let view = query::enemy_view(&world);
        assert_eq!(view.get(enemy).map(|snapshot| snapshot.hp), Some(300.0));
        assert!(!query::tower_view(&world)
            .get(tower)
            .expect("tower exists")
            .ready);

        let _ = tick(&mut world, 1_000);
        assert!(query::tower_view(&world)
            .get(tower)
            .expect("tower exists")
            .ready);
    }

    #[test]
    fn slow_applies_immediately_and_reverts_exactly_at_expiry() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Basic);
        let tower = place(&mut world, 0, TowerKind::Slower);

        let _ = fire(&mut world, tower, vec![enemy]);
        let slowed = query::enemy_view(&world);
        let snapshot = slowed.get(enemy).expect("enemy alive");
        assert!(snapshot.slowed);
        assert!((snapshot.speed - 0.16875).abs() < 1e-6);

        let _ = tick(&mut world, 1_999);
        assert!(query::enemy_view(&world)
            .get(enemy)
            .expect("enemy alive")
            .slowed);

        let _ = tick(&mut world, 1);
        let restored = query::enemy_view(&world);
        let snapshot = restored.get(enemy).expect("enemy alive");
        assert!(!snapshot.slowed);
        assert!((snapshot.speed - 0.225).abs() < 1e-6);
    }

    #[test]
    fn weaker_slow_does_not_replace_a_stronger_one() {
        let mut world = started_world();
        world.money = 10_000;
        let enemy = spawn(&mut world, EnemyKind::Tank);
        let tower = place(&mut world, 0, TowerKind::Slower);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::UpgradeTower {
                tower,
                path: UpgradePath::One,
            },
            &mut events,
        );

        let _ = fire(&mut world, tower, vec![enemy]);
        let strong = query::enemy_view(&world)
            .get(enemy)
            .expect("enemy alive")
            .speed;
        assert!((strong - 0.1875 * 0.675).abs() < 1e-6);

        // A fresh slower tower applies the weaker base factor; speed must hold.
        let other = place(&mut world, 1, TowerKind::Slower);
        let _ = tick(&mut world, 100);
        let _ = fire(&mut world, other, vec![enemy]);
        let held = query::enemy_view(&world)
            .get(enemy)
            .expect("enemy alive")
            .speed;
        assert!((held - strong).abs() < 1e-6);
    }

    #[test]
    fn explosion_deals_full_damage_to_primary_and_quarter_to_neighbors() {
        let mut world = started_world();
        world.money = 10_000;
        let primary = spawn(&mut world, EnemyKind::Tank);
        let secondary = spawn(&mut world, EnemyKind::Tank);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveEnemy {
                enemy: secondary,
                to: Position::new(9.0, 56.0),
            },
            &mut events,
        );
        let tower = place(&mut world, 0, TowerKind::Mortar);

        let _ = fire(&mut world, tower, vec![primary]);

        let view = query::enemy_view(&world);
        assert_eq!(view.get(primary).map(|snapshot| snapshot.hp), Some(175.0));
        assert_eq!(
            view.get(secondary).map(|snapshot| snapshot.hp),
            Some(350.0 - 175.0 / 4.0)
        );
        assert_eq!(query::explosion_effects(&world).len(), 1);
    }

    #[test]
    fn armored_enemies_ignore_damage_until_pierced_once() {
        let mut world = started_world();
        world.money = 10_000;
        let enemy = spawn(&mut world, EnemyKind::ArmoredTank);
        let tower = place(&mut world, 0, TowerKind::Basic);

        let _ = fire(&mut world, tower, vec![enemy]);
        let view = query::enemy_view(&world);
        let snapshot = view.get(enemy).expect("enemy alive");
        assert_eq!(snapshot.hp, 400.0);
        assert!(snapshot.armored);

        let mut events = Vec::new();
        for _ in 0..2 {
            apply(
                &mut world,
                Command::UpgradeTower {
                    tower,
                    path: UpgradePath::Two,
                },
                &mut events,
            );
        }
        let _ = tick(&mut world, 1_000);
        let _ = fire(&mut world, tower, vec![enemy]);

        let view = query::enemy_view(&world);
        let snapshot = view.get(enemy).expect("enemy alive");
        assert_eq!(snapshot.hp, 400.0 - 190.0);
        assert!(!snapshot.armored, "piercing strips armor permanently");
    }

    #[test]
    fn kill_economy_fires_at_most_once_per_enemy_id() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Basic);
        let tower = place(&mut world, 0, TowerKind::Basic);

        world.enemies[0].hp = 10.0;
        let _ = fire(&mut world, tower, vec![enemy]);
        let money_after_kill = query::money(&world);

        // Resurrect a corpse with the same id; the processed-kill set must
        // swallow it without paying again.
        let corpse = super::EnemyState {
            id: enemy,
            kind: EnemyKind::Basic,
            position: SITE_NEAR_SPAWN,
            hp: 0.0,
            max_hp: 100.0,
            speed: 0.225,
            base_speed: 0.225,
            damage: 5,
            armored: false,
            can_regen: false,
            regen: 0.0,
            spawns_on_death: false,
            targeted: false,
            slow: None,
            stun: None,
            poison: None,
            last_hit_by: None,
        };
        world.enemies.push(corpse);
        let mut events = Vec::new();
        process_kills(&mut world, &mut events);

        assert_eq!(query::money(&world), money_after_kill);
        assert!(events.is_empty());
        assert!(query::enemy_view(&world).is_empty());
    }

    #[test]
    fn poison_ticks_to_a_kill_and_credits_the_source_tower() {
        let mut world = started_world();
        world.money = 10_000;
        let enemy = spawn(&mut world, EnemyKind::Stealth);
        let tower = place(&mut world, 0, TowerKind::GasSpitter);

        let _ = fire(&mut world, tower, vec![enemy]);
        let view = query::enemy_view(&world);
        let snapshot = view.get(enemy).expect("enemy alive");
        assert!(snapshot.poisoned);
        assert_eq!(snapshot.hp, 30.0);

        let mut killed = None;
        for _ in 0..25 {
            for event in tick(&mut world, 100) {
                if let Event::EnemyKilled { enemy: id, source, .. } = event {
                    killed = Some((id, source));
                }
            }
        }

        let (id, source) = killed.expect("poison must finish the enemy");
        assert_eq!(id, enemy);
        assert_eq!(source, Some(tower));
        assert!(query::tower_view(&world)
            .get(tower)
            .expect("tower exists")
            .damage_done > 20.0);
    }

    #[test]
    fn poison_expiry_restores_regeneration() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Boss);
        let tower = place(&mut world, 0, TowerKind::GasSpitter);

        let _ = fire(&mut world, tower, vec![enemy]);
        let _ = tick(&mut world, 4_100);

        let view = query::enemy_view(&world);
        assert!(!view.get(enemy).expect("boss alive").poisoned);
    }

    #[test]
    fn lingering_zones_damage_everything_inside_and_expire() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Tank);
        push_zone(
            &mut world,
            vanguard_defence_core::path::SPAWN_POSITION,
            ZoneSpec {
                damage: 5.0,
                radius: 10.0,
                duration: Duration::from_millis(1_000),
            },
        );

        let _ = tick(&mut world, 500);
        let view = query::enemy_view(&world);
        assert_eq!(view.get(enemy).map(|snapshot| snapshot.hp), Some(300.0));

        let _ = tick(&mut world, 600);
        assert!(query::lingering_zones(&world).is_empty());
        let view = query::enemy_view(&world);
        let hp = view.get(enemy).map(|snapshot| snapshot.hp).expect("alive");
        assert!(hp >= 250.0, "zone must stop dealing damage once expired");
    }

    #[test]
    fn regeneration_is_uncapped_above_max_hp() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::RegenTank);

        let _ = tick(&mut world, 1_500);
        let view = query::enemy_view(&world);
        assert_eq!(view.get(enemy).map(|snapshot| snapshot.hp), Some(500.0));
    }

    #[test]
    fn breach_damages_the_player_exactly_once() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Basic);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveEnemy {
                enemy,
                to: Position::new(99.5, 51.0),
            },
            &mut events,
        );
        assert_eq!(query::health(&world), 95);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::EnemyBreached { damage: 5, .. })));

        apply(
            &mut world,
            Command::MoveEnemy {
                enemy,
                to: Position::new(99.5, 51.0),
            },
            &mut events,
        );
        assert_eq!(query::health(&world), 95);
    }

    #[test]
    fn exhausted_health_ends_the_campaign_and_resets_the_world() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Boss);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::MoveEnemy {
                enemy,
                to: Position::new(99.5, 51.0),
            },
            &mut events,
        );

        assert!(events.iter().any(|event| matches!(
            event,
            Event::GameEnded {
                outcome: Outcome::Defeat,
                round: 1,
                ..
            }
        )));
        let snapshot = query::round_snapshot(&world);
        assert_eq!(snapshot.round, 0);
        assert_eq!(snapshot.health, 100);
        assert_eq!(snapshot.money, 200);
        assert!(query::enemy_view(&world).is_empty());
    }

    #[test]
    fn clearing_the_final_round_reports_victory() {
        let mut world = started_world();
        world.round = 50;
        world.wave_cleared = true;

        let mut events = Vec::new();
        apply(&mut world, Command::AdvanceRound, &mut events);

        assert!(events.iter().any(|event| matches!(
            event,
            Event::GameEnded {
                outcome: Outcome::Victory,
                round: 50,
                ..
            }
        )));
        assert_eq!(query::round_snapshot(&world).round, 0);
    }

    #[test]
    fn selling_an_unupgraded_tower_refunds_two_thirds_floored() {
        let mut world = started_world();
        let tower = place(&mut world, 0, TowerKind::Basic);

        let mut events = Vec::new();
        apply(&mut world, Command::SellTower { tower }, &mut events);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::TowerSold { refund: 66, .. })));
        assert_eq!(query::money(&world), 166);
        assert!(query::tower_view(&world).get(tower).is_none());

        apply(&mut world, Command::SellTower { tower }, &mut events);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::TowerSaleRejected {
                reason: SaleError::MissingTower,
                ..
            }
        )));
    }

    #[test]
    fn committed_path_rejects_deep_progress_on_the_other_path() {
        let mut world = started_world();
        world.money = 1_000_000;
        let tower = place(&mut world, 0, TowerKind::Basic);

        let mut events = Vec::new();
        for _ in 0..3 {
            apply(
                &mut world,
                Command::UpgradeTower {
                    tower,
                    path: UpgradePath::One,
                },
                &mut events,
            );
        }
        let snapshot = *query::tower_view(&world).get(tower).expect("tower exists");
        assert_eq!(snapshot.path1_level, 3);
        assert_eq!(snapshot.committed, Some(UpgradePath::One));

        for _ in 0..2 {
            apply(
                &mut world,
                Command::UpgradeTower {
                    tower,
                    path: UpgradePath::Two,
                },
                &mut events,
            );
        }
        events.clear();
        apply(
            &mut world,
            Command::UpgradeTower {
                tower,
                path: UpgradePath::Two,
            },
            &mut events,
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::TowerUpgradeRejected {
                reason: UpgradeError::PathUnavailable,
                ..
            }
        )));
    }

    #[test]
    fn spawner_death_releases_a_staggered_batch_of_replacements() {
        let mut world = started_world();
        let enemy = spawn(&mut world, EnemyKind::Spawner);
        let tower = place(&mut world, 0, TowerKind::Basic);

        world.enemies[0].hp = 10.0;
        let events = fire(&mut world, tower, vec![enemy]);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::EnemyKilled { .. })));
        assert!(query::enemy_view(&world).is_empty());

        let _ = tick(&mut world, 50);
        assert_eq!(query::enemy_view(&world).len(), 1);
        let _ = tick(&mut world, 250);
        let view = query::enemy_view(&world);
        assert_eq!(view.len(), 5);
        assert!(view
            .iter()
            .all(|snapshot| snapshot.kind == EnemyKind::SpeedyMegaTank));
    }

    #[test]
    fn pause_is_idempotent_and_suspends_the_clock() {
        let mut world = started_world();
        world.can_pause = true;
        let enemy = spawn(&mut world, EnemyKind::RegenTank);

        let mut events = Vec::new();
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        assert_eq!(
            events
                .iter()
                .filter(|event| matches!(event, Event::PauseChanged { .. }))
                .count(),
            1
        );

        events.clear();
        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        assert!(events.is_empty(), "re-pausing must not change state");

        let ticked = tick(&mut world, 5_000);
        assert!(ticked.is_empty(), "paused time is not simulated");
        let view = query::enemy_view(&world);
        assert_eq!(view.get(enemy).map(|snapshot| snapshot.hp), Some(400.0));
    }

    #[test]
    fn pausing_resets_the_speed_level() {
        let mut world = started_world();
        world.can_pause = true;
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetSpeed {
                speed: SpeedLevel::Triple,
            },
            &mut events,
        );
        assert_eq!(query::round_snapshot(&world).speed, SpeedLevel::Triple);

        apply(&mut world, Command::SetPaused { paused: true }, &mut events);
        assert_eq!(query::round_snapshot(&world).speed, SpeedLevel::Normal);
    }

    #[test]
    fn cleared_wave_without_auto_start_pauses_and_resumes_into_the_next_round() {
        let mut world = started_world();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureSettings {
                settings: vanguard_defence_core::Settings {
                    auto_start_rounds: false,
                    ..vanguard_defence_core::Settings::default()
                },
            },
            &mut events,
        );
        let enemy = spawn(&mut world, EnemyKind::Basic);
        world.spawned_units = 10;
        let tower = place(&mut world, 0, TowerKind::Basic);
        world.enemies[0].hp = 10.0;
        let _ = fire(&mut world, tower, vec![enemy]);

        let events = tick(&mut world, 25);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::WaveCleared { round: 1 })));
        assert!(query::round_snapshot(&world).paused);

        let mut events = Vec::new();
        apply(&mut world, Command::SetPaused { paused: false }, &mut events);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::RoundStarted { round: 2 })));
    }

    #[test]
    fn chain_attacks_hop_to_the_nearest_unchained_enemy() {
        let mut world = started_world();
        world.money = 20_000;
        let first = spawn(&mut world, EnemyKind::Tank);
        let second = spawn(&mut world, EnemyKind::Tank);
        let third = spawn(&mut world, EnemyKind::Tank);
        let tower = place(&mut world, 0, TowerKind::RapidShooter);

        let mut events = Vec::new();
        for _ in 0..3 {
            apply(
                &mut world,
                Command::UpgradeTower {
                    tower,
                    path: UpgradePath::Two,
                },
                &mut events,
            );
        }

        let _ = fire(&mut world, tower, vec![first]);

        let view = query::enemy_view(&world);
        assert_eq!(view.get(first).map(|snapshot| snapshot.hp), Some(270.0));
        assert_eq!(view.get(second).map(|snapshot| snapshot.hp), Some(270.0));
        assert_eq!(
            view.get(third).map(|snapshot| snapshot.hp),
            Some(350.0),
            "a two-link chain leaves the third enemy untouched"
        );
    }

    #[test]
    fn explosion_stuns_unconditionally_and_the_stun_expires() {
        let mut world = started_world();
        world.money = 10_000;
        let enemy = spawn(&mut world, EnemyKind::Tank);
        let tower = place(&mut world, 0, TowerKind::Mortar);

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::UpgradeTower {
                tower,
                path: UpgradePath::Two,
            },
            &mut events,
        );

        let _ = fire(&mut world, tower, vec![enemy]);
        let view = query::enemy_view(&world);
        let snapshot = view.get(enemy).expect("enemy alive");
        assert!(snapshot.stunned);
        assert_eq!(snapshot.speed, 0.0);

        let _ = tick(&mut world, 100);
        let view = query::enemy_view(&world);
        let snapshot = view.get(enemy).expect("enemy alive");
        assert!(!snapshot.stunned);
        assert_eq!(snapshot.speed, 0.175);
    }

    #[test]
    fn kill_rewards_shrink_in_later_round_brackets() {
        assert_eq!(super::kill_reward(100.0, 1), 15);
        assert_eq!(super::kill_reward(100.0, 22), 15);
        assert_eq!(super::kill_reward(100.0, 23), 5);
        assert_eq!(super::kill_reward(50_000.0, 33), 423);
    }
}
