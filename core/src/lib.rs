#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Vanguard Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod path;
pub mod upgrades;
pub mod waves;

pub use catalog::{
    AttackKind, CritSpec, EnemyKind, EnemyStats, SlowSpec, StunSpec, TowerKind, TowerStats,
    ZoneSpec,
};
pub use upgrades::{StatDelta, UpgradeDefinition, UpgradePath, ZoneDamageBasis, ZoneDelta};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Vanguard Defence.";

/// Last round of the campaign; clearing it wins the game.
pub const FINAL_ROUND: u32 = 50;

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a fixed placement site where towers may be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteId(u32);

impl SiteId {
    /// Creates a new site identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the site identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of an ephemeral visual effect record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(u32);

impl EffectId {
    /// Creates a new effect identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the effect identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// A point expressed in percentage-of-battlefield coordinates.
///
/// Enemies spawn slightly off-screen at negative x and breach the defence
/// once x exceeds [`path::GOAL_THRESHOLD`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    x: f32,
    y: f32,
}

impl Position {
    /// Creates a new position from battlefield coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate in percent.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate in percent.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Euclidean distance to another position.
    #[must_use]
    pub fn distance_to(self, other: Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Wall-clock compression level applied by adapters.
///
/// Speed only compresses real time between logical ticks; simulated
/// durations are untouched, so outcomes are identical at every level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeedLevel {
    /// Real-time pacing.
    Normal,
    /// Twice as many logical ticks per wall-clock second.
    Double,
    /// Three times as many logical ticks per wall-clock second.
    Triple,
}

impl SpeedLevel {
    /// Wall-clock compression factor for the level.
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Normal => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }
}

/// Strategy a tower uses to rank eligible targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingMode {
    /// Prefer the enemy furthest along the path.
    First,
    /// Prefer the enemy with the most remaining hit points.
    HighestHp,
    /// Prefer the enemy least far along the path.
    Last,
}

impl TargetingMode {
    /// Returns the next mode in the cycle first → highest-hp → last → first.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::First => Self::HighestHp,
            Self::HighestHp => Self::Last,
            Self::Last => Self::First,
        }
    }
}

/// Terminal result of a campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The final round was cleared with health remaining.
    Victory,
    /// Player health was exhausted.
    Defeat,
}

/// Player-facing toggles provided by the settings collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether floating damage numbers are recorded for rendering.
    pub show_damage_numbers: bool,
    /// Whether range indicators should be rendered (rendering-only concern).
    pub show_range_indicators: bool,
    /// Whether enemy health bars should be rendered (rendering-only concern).
    pub show_health_bars: bool,
    /// Whether tower sales require an external confirmation step.
    pub confirm_tower_sell: bool,
    /// Whether cleared waves advance automatically after a short delay.
    pub auto_start_rounds: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_damage_numbers: true,
            show_range_indicators: true,
            show_health_bars: true,
            confirm_tower_sell: true,
            auto_start_rounds: true,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Installs the fixed placement sites where towers may be built.
    ConfigureSites {
        /// Site coordinates in battlefield percent, indexed in order.
        sites: Vec<Position>,
    },
    /// Replaces the player settings consulted by the world.
    ConfigureSettings {
        /// New settings value.
        settings: Settings,
    },
    /// Begins round one from the idle state.
    StartRound,
    /// Advances to the next round, resetting per-round counters.
    AdvanceRound,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a wave enemy enter the battlefield at the spawn point.
    SpawnEnemy {
        /// Archetype of the enemy to create.
        kind: EnemyKind,
        /// How many units the enemy counts for toward the round limit.
        units: u32,
    },
    /// Requests that an enemy be moved to the provided position.
    MoveEnemy {
        /// Identifier of the enemy to move.
        enemy: EnemyId,
        /// Position computed by the movement system.
        to: Position,
    },
    /// Requests that a tower resolve an attack against the listed targets.
    FireTower {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Targets selected by the targeting resolver, primary first.
        targets: Vec<EnemyId>,
    },
    /// Requests construction of a tower at an empty placement site.
    PlaceTower {
        /// Site chosen for the construction.
        site: SiteId,
        /// Archetype of tower to construct.
        kind: TowerKind,
    },
    /// Requests purchase of the next upgrade on one of a tower's paths.
    UpgradeTower {
        /// Identifier of the tower to upgrade.
        tower: TowerId,
        /// Upgrade path to advance.
        path: UpgradePath,
    },
    /// Requests sale of an existing tower, refunding part of its worth.
    SellTower {
        /// Identifier of the tower to sell.
        tower: TowerId,
    },
    /// Switches the targeting strategy of a tower.
    SetTargetingMode {
        /// Identifier of the tower to adjust.
        tower: TowerId,
        /// Strategy the tower should use from now on.
        mode: TargetingMode,
    },
    /// Sets the global pause flag.
    SetPaused {
        /// Desired pause state.
        paused: bool,
    },
    /// Sets the wall-clock speed level.
    SetSpeed {
        /// Desired speed level.
        speed: SpeedLevel,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a new round began spawning.
    RoundStarted {
        /// Round number that became active.
        round: u32,
    },
    /// Announces that the current round's wave was fully cleared.
    WaveCleared {
        /// Round whose wave was cleared.
        round: u32,
    },
    /// Confirms that an enemy entered the battlefield.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Archetype of the spawned enemy.
        kind: EnemyKind,
        /// Position the enemy occupies after spawning.
        position: Position,
    },
    /// Reports that an enemy died and its kill economy was settled.
    EnemyKilled {
        /// Identifier of the dead enemy.
        enemy: EnemyId,
        /// Archetype of the dead enemy.
        kind: EnemyKind,
        /// Money granted for the kill.
        reward: u64,
        /// Tower credited with the killing blow, when attributable.
        source: Option<TowerId>,
    },
    /// Reports that an enemy reached the end of the path.
    EnemyBreached {
        /// Identifier of the breaching enemy.
        enemy: EnemyId,
        /// Damage deducted from player health.
        damage: u32,
    },
    /// Confirms that a tower began an attack cycle.
    TowerFired {
        /// Identifier of the firing tower.
        tower: TowerId,
        /// Enemies struck during resolution.
        targets: Vec<EnemyId>,
    },
    /// Confirms that a tower was constructed.
    TowerPlaced {
        /// Identifier allocated to the tower.
        tower: TowerId,
        /// Archetype of the constructed tower.
        kind: TowerKind,
        /// Site the tower occupies.
        site: SiteId,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Site provided in the placement request.
        site: SiteId,
        /// Archetype requested for placement.
        kind: TowerKind,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower upgrade was purchased and applied.
    TowerUpgraded {
        /// Identifier of the upgraded tower.
        tower: TowerId,
        /// Path that was advanced.
        path: UpgradePath,
        /// Level now reached on that path.
        level: u8,
    },
    /// Reports that a tower upgrade request was rejected.
    TowerUpgradeRejected {
        /// Identifier of the tower targeted for upgrade.
        tower: TowerId,
        /// Path requested for advancement.
        path: UpgradePath,
        /// Specific reason the upgrade failed.
        reason: UpgradeError,
    },
    /// Confirms that a tower was sold and its site freed.
    TowerSold {
        /// Identifier of the sold tower.
        tower: TowerId,
        /// Money refunded to the player.
        refund: u64,
    },
    /// Reports that a tower sale request was rejected.
    TowerSaleRejected {
        /// Identifier of the tower targeted for sale.
        tower: TowerId,
        /// Specific reason the sale failed.
        reason: SaleError,
    },
    /// Confirms that a tower switched targeting strategy.
    TargetingModeChanged {
        /// Identifier of the adjusted tower.
        tower: TowerId,
        /// Strategy now in effect.
        mode: TargetingMode,
    },
    /// Announces a change of the global pause flag.
    PauseChanged {
        /// Pause state now in effect.
        paused: bool,
    },
    /// Announces a change of the wall-clock speed level.
    SpeedChanged {
        /// Speed level now in effect.
        speed: SpeedLevel,
    },
    /// Announces a terminal state; the world has been reset.
    GameEnded {
        /// Whether the campaign was won or lost.
        outcome: Outcome,
        /// Round in which the campaign ended.
        round: u32,
        /// Money held when the campaign ended.
        money: u64,
    },
    /// Carries the analytics system's final score report.
    ScoreReported {
        /// Aggregated campaign statistics.
        report: ScoreReport,
    },
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// No site with the provided identifier exists.
    UnknownSite,
    /// The site already holds a tower.
    SiteOccupied,
    /// The player cannot afford the tower's price.
    InsufficientFunds,
}

/// Reasons a tower upgrade request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeError {
    /// No tower with the provided identifier exists.
    MissingTower,
    /// The requested path offers no further upgrade at the tower's levels.
    PathUnavailable,
    /// The player cannot afford the upgrade's cost.
    InsufficientFunds,
}

/// Reasons a tower sale request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaleError {
    /// No tower with the provided identifier exists.
    MissingTower,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Archetype of the enemy.
    pub kind: EnemyKind,
    /// Battlefield position currently occupied by the enemy.
    pub position: Position,
    /// Remaining hit points.
    pub hp: f32,
    /// Hit points the enemy spawned with.
    pub max_hp: f32,
    /// Current movement speed, including slow and stun effects.
    pub speed: f32,
    /// Movement speed without status effects.
    pub base_speed: f32,
    /// Whether a slow effect is active.
    pub slowed: bool,
    /// Whether a stun effect is active.
    pub stunned: bool,
    /// Whether a poison effect is active.
    pub poisoned: bool,
    /// Whether the enemy still carries armor.
    pub armored: bool,
    /// Whether a tower currently holds the enemy in an attack cycle.
    pub targeted: bool,
}

/// Read-only snapshot describing all enemies on the battlefield.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a specific enemy.
    #[must_use]
    pub fn get(&self, enemy: EnemyId) -> Option<&EnemySnapshot> {
        self.snapshots
            .binary_search_by_key(&enemy, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of enemies captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view contains no enemies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single tower's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Archetype of the tower.
    pub kind: TowerKind,
    /// Site the tower occupies.
    pub site: SiteId,
    /// Fixed battlefield position of the tower.
    pub position: Position,
    /// Current targeting radius.
    pub radius: f32,
    /// Current attack modality.
    pub attack_kind: AttackKind,
    /// Whether the tower may target stealth archetypes.
    pub can_hit_stealth: bool,
    /// Targeting strategy in effect.
    pub targeting: TargetingMode,
    /// Whether the tower is free to begin a new attack cycle.
    pub ready: bool,
    /// Rendering hint: whether the tower last fired toward increasing x.
    pub facing_right: bool,
    /// Total damage credited to the tower so far.
    pub damage_done: f32,
    /// Accumulated resale worth.
    pub worth: u64,
    /// Level reached on upgrade path one.
    pub path1_level: u8,
    /// Level reached on upgrade path two.
    pub path2_level: u8,
    /// Path the tower is committed to, once either reaches level three.
    pub committed: Option<UpgradePath>,
}

/// Read-only snapshot describing all towers on the battlefield.
#[derive(Clone, Debug, Default)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up the snapshot of a specific tower.
    #[must_use]
    pub fn get(&self, tower: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&tower, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Target set resolved for one tower by the targeting system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetAssignment {
    /// Tower the assignment belongs to.
    pub tower: TowerId,
    /// Eligible targets ranked by the tower's targeting mode, primary first.
    pub targets: Vec<EnemyId>,
}

/// Snapshot of a fixed placement site.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteSnapshot {
    /// Identifier of the site.
    pub id: SiteId,
    /// Battlefield position of the site.
    pub position: Position,
    /// Whether a tower currently occupies the site.
    pub occupied: bool,
}

/// Ephemeral attack beam emitted for rendering; carries no simulation authority.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackEffectSnapshot {
    /// Identifier of the effect record.
    pub id: EffectId,
    /// Tower that produced the effect.
    pub tower: TowerId,
    /// Origin of the beam.
    pub from: Position,
    /// Destination of the beam.
    pub to: Position,
    /// Remaining time before the record expires.
    pub expires_in: Duration,
}

/// Ephemeral explosion flash emitted for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExplosionSnapshot {
    /// Identifier of the effect record.
    pub id: EffectId,
    /// Center of the blast.
    pub position: Position,
    /// Blast radius in battlefield percent.
    pub radius: f32,
    /// Remaining time before the record expires.
    pub expires_in: Duration,
}

/// Stationary damage-over-time zone; participates in simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LingeringZoneSnapshot {
    /// Identifier of the zone.
    pub id: EffectId,
    /// Center of the zone.
    pub position: Position,
    /// Radius within which enemies take damage.
    pub radius: f32,
    /// Damage dealt per scheduler quantum to each enemy inside.
    pub damage_per_tick: f32,
    /// Remaining time before the zone expires.
    pub expires_in: Duration,
}

/// Floating damage number emitted for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DamageNumberSnapshot {
    /// Identifier of the effect record.
    pub id: EffectId,
    /// Damage amount displayed.
    pub amount: f32,
    /// Battlefield position where the damage landed.
    pub position: Position,
    /// Remaining time before the record expires.
    pub expires_in: Duration,
}

/// HUD-facing snapshot of round progression and global flags.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundSnapshot {
    /// Active round number; zero means the campaign has not started.
    pub round: u32,
    /// Units spawned so far this round.
    pub spawned_units: u32,
    /// Unit limit for the active round.
    pub unit_limit: u32,
    /// Whether the active round's wave has been fully cleared.
    pub wave_cleared: bool,
    /// Whether the simulation is paused.
    pub paused: bool,
    /// Whether pausing is currently permitted.
    pub can_pause: bool,
    /// Wall-clock speed level in effect.
    pub speed: SpeedLevel,
    /// Whether cleared waves advance automatically.
    pub auto_start_rounds: bool,
    /// Remaining player health.
    pub health: i64,
    /// Money available for purchases.
    pub money: u64,
}

/// Aggregated campaign statistics published on terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    /// Whether the campaign was won or lost.
    pub outcome: Outcome,
    /// Round in which the campaign ended.
    pub round: u32,
    /// Enemies killed over the campaign.
    pub kills: u32,
    /// Enemies that breached the defence.
    pub breaches: u32,
    /// Total kill rewards earned.
    pub rewards: u64,
    /// Money held when the campaign ended.
    pub money: u64,
}

impl ScoreReport {
    /// Leaderboard score: rounds weigh heaviest, earnings break ties.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.round as u64 * 1_000 + self.rewards
    }
}

#[cfg(test)]
mod tests {
    use super::{
        EnemyId, EnemyKind, PlacementError, Position, SaleError, Settings, SiteId, SpeedLevel,
        TargetingMode, TowerId, TowerKind, UpgradeError,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn identifiers_round_trip_through_bincode() {
        assert_round_trip(&EnemyId::new(7));
        assert_round_trip(&TowerId::new(42));
        assert_round_trip(&SiteId::new(3));
    }

    #[test]
    fn catalog_enums_round_trip_through_bincode() {
        assert_round_trip(&EnemyKind::StealthyTank);
        assert_round_trip(&TowerKind::GasSpitter);
    }

    #[test]
    fn rejection_reasons_round_trip_through_bincode() {
        assert_round_trip(&PlacementError::SiteOccupied);
        assert_round_trip(&UpgradeError::PathUnavailable);
        assert_round_trip(&SaleError::MissingTower);
    }

    #[test]
    fn settings_round_trip_through_bincode() {
        assert_round_trip(&Settings::default());
    }

    #[test]
    fn distance_matches_euclidean_expectation() {
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 4.0);
        assert!((origin.distance_to(target) - 5.0).abs() < f32::EPSILON);
        assert!((target.distance_to(origin) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn targeting_mode_cycles_through_all_strategies() {
        let mut mode = TargetingMode::First;
        mode = mode.next();
        assert_eq!(mode, TargetingMode::HighestHp);
        mode = mode.next();
        assert_eq!(mode, TargetingMode::Last);
        mode = mode.next();
        assert_eq!(mode, TargetingMode::First);
    }

    #[test]
    fn speed_levels_expose_expected_multipliers() {
        assert_eq!(SpeedLevel::Normal.multiplier(), 1);
        assert_eq!(SpeedLevel::Double.multiplier(), 2);
        assert_eq!(SpeedLevel::Triple.multiplier(), 3);
    }
}
