//! Static archetype catalogs for enemies and towers.
//!
//! Catalogs are compiled-in data, not user input: every archetype maps to a
//! base stat template that the world copies when an entity is created.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Named category of enemy sharing a base stat template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline fodder unit.
    Basic,
    /// Invisible to towers without stealth detection.
    Stealth,
    /// Slow unit with a large health pool.
    Tank,
    /// Fragile unit that crosses the map quickly.
    Speedy,
    /// Stealthy unit with a large health pool.
    StealthyTank,
    /// Stealthy unit that crosses the map quickly.
    StealthySpeedy,
    /// Tank that regenerates health every regeneration tick.
    RegenTank,
    /// Faster regenerating tank fielded in the late midgame.
    SpeedyRegenTank,
    /// Round-32 boss counted as many units toward the wave limit.
    Boss,
    /// Heavy late-game tank.
    UltraTank,
    /// Armored fodder immune to non-piercing damage.
    ArmoredBasic,
    /// Armored tank immune to non-piercing damage.
    ArmoredTank,
    /// Armored heavy tank fielded alongside ultra tanks.
    ArmoredUltraTank,
    /// Armored fast heavy unit of the final rounds.
    ArmoredSpeedyMegaTank,
    /// Fast heavy unit of the final rounds.
    SpeedyMegaTank,
    /// Final boss with massive regeneration.
    MegaBoss,
    /// Unit that releases replacements when killed.
    Spawner,
}

impl EnemyKind {
    /// Base stat template for the archetype.
    #[must_use]
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Basic => EnemyStats::new(100.0, 5, 0.225, 0.0, false, false, false),
            Self::Stealth => EnemyStats::new(50.0, 10, 0.225, 0.0, false, false, false),
            Self::Tank => EnemyStats::new(350.0, 5, 0.1875, 0.0, false, false, false),
            Self::Speedy => EnemyStats::new(40.0, 35, 1.5, 0.0, false, false, false),
            Self::StealthyTank => EnemyStats::new(250.0, 20, 0.1875, 0.0, false, false, false),
            Self::StealthySpeedy => EnemyStats::new(50.0, 50, 1.5, 0.0, false, false, false),
            Self::RegenTank => EnemyStats::new(400.0, 50, 0.1875, 100.0, true, false, false),
            Self::SpeedyRegenTank => EnemyStats::new(600.0, 50, 0.35, 150.0, true, false, false),
            Self::Boss => EnemyStats::new(50_000.0, 1_000, 0.15, 1_200.0, true, false, false),
            Self::UltraTank => EnemyStats::new(1_750.0, 1_000, 0.15, 0.0, false, false, false),
            Self::ArmoredBasic => EnemyStats::new(125.0, 30, 0.2, 0.0, false, true, false),
            Self::ArmoredTank => EnemyStats::new(400.0, 400, 0.175, 0.0, false, true, false),
            Self::ArmoredUltraTank => EnemyStats::new(2_000.0, 1_000, 0.2, 0.0, false, true, false),
            Self::ArmoredSpeedyMegaTank => {
                EnemyStats::new(3_500.0, 1_000, 0.5, 0.0, false, true, false)
            }
            Self::SpeedyMegaTank => EnemyStats::new(3_000.0, 1_000, 0.5, 0.0, false, true, false),
            Self::MegaBoss => EnemyStats::new(125_000.0, 1_000, 0.2, 5_000.0, true, false, false),
            Self::Spawner => EnemyStats::new(2_000.0, 100, 0.2, 0.0, false, false, true),
        }
    }

    /// Whether the archetype hides from towers without stealth detection.
    #[must_use]
    pub const fn is_stealth(self) -> bool {
        matches!(self, Self::Stealth | Self::StealthyTank | Self::StealthySpeedy)
    }

    /// Short display label for HUD output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Stealth => "stealth",
            Self::Tank => "tank",
            Self::Speedy => "speedy",
            Self::StealthyTank => "stealthy tank",
            Self::StealthySpeedy => "stealthy speedy",
            Self::RegenTank => "regen tank",
            Self::SpeedyRegenTank => "speedy regen tank",
            Self::Boss => "boss",
            Self::UltraTank => "ultra tank",
            Self::ArmoredBasic => "armored basic",
            Self::ArmoredTank => "armored tank",
            Self::ArmoredUltraTank => "armored ultra tank",
            Self::ArmoredSpeedyMegaTank => "armored speedy mega tank",
            Self::SpeedyMegaTank => "speedy mega tank",
            Self::MegaBoss => "mega boss",
            Self::Spawner => "spawner",
        }
    }
}

/// Base stat template shared by all enemies of one archetype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    /// Hit points the enemy spawns with.
    pub hp: f32,
    /// Player health deducted if the enemy breaches the defence.
    pub damage: u32,
    /// Distance covered per movement quantum.
    pub speed: f32,
    /// Health restored per regeneration quantum.
    pub regen: f32,
    /// Whether regeneration is active.
    pub can_regen: bool,
    /// Whether the enemy spawns with armor.
    pub armored: bool,
    /// Whether killing the enemy releases replacement units.
    pub spawns_on_death: bool,
}

impl EnemyStats {
    const fn new(
        hp: f32,
        damage: u32,
        speed: f32,
        regen: f32,
        can_regen: bool,
        armored: bool,
        spawns_on_death: bool,
    ) -> Self {
        Self {
            hp,
            damage,
            speed,
            regen,
            can_regen,
            armored,
            spawns_on_death,
        }
    }
}

/// Named category of tower sharing a base stat template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TowerKind {
    /// Cheap single-target tower.
    Basic,
    /// Long-range tower with stealth detection.
    Sniper,
    /// Fast double-target tower.
    RapidShooter,
    /// Tower that slows everything it hits.
    Slower,
    /// Tower that poisons its targets.
    GasSpitter,
    /// Slow-firing long-range explosive tower.
    Mortar,
    /// Mid-range explosive tower.
    Cannon,
}

impl TowerKind {
    /// Base stat template for the archetype.
    #[must_use]
    pub const fn stats(self) -> TowerStats {
        match self {
            Self::Basic => TowerStats {
                attack: 50.0,
                attack_interval: Duration::from_millis(1_000),
                price: 100,
                radius: 27.0,
                attack_kind: AttackKind::Single,
                can_hit_stealth: false,
                can_hit_armored: false,
                slow: None,
                poison_damage: 0.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
            Self::Sniper => TowerStats {
                attack: 120.0,
                attack_interval: Duration::from_millis(2_000),
                price: 200,
                radius: 120.0,
                attack_kind: AttackKind::Single,
                can_hit_stealth: true,
                can_hit_armored: false,
                slow: None,
                poison_damage: 0.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
            Self::RapidShooter => TowerStats {
                attack: 20.0,
                attack_interval: Duration::from_millis(350),
                price: 500,
                radius: 27.0,
                attack_kind: AttackKind::Multi { targets: 2 },
                can_hit_stealth: false,
                can_hit_armored: false,
                slow: None,
                poison_damage: 0.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
            Self::Slower => TowerStats {
                attack: 10.0,
                attack_interval: Duration::from_millis(1_000),
                price: 300,
                radius: 27.0,
                attack_kind: AttackKind::Multi { targets: 2 },
                can_hit_stealth: false,
                can_hit_armored: false,
                slow: Some(SlowSpec {
                    factor: 0.75,
                    duration: Duration::from_millis(2_000),
                }),
                poison_damage: 0.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
            Self::GasSpitter => TowerStats {
                attack: 20.0,
                attack_interval: Duration::from_millis(1_000),
                price: 300,
                radius: 27.0,
                attack_kind: AttackKind::Multi { targets: 2 },
                can_hit_stealth: false,
                can_hit_armored: false,
                slow: None,
                poison_damage: 20.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
            Self::Mortar => TowerStats {
                attack: 175.0,
                attack_interval: Duration::from_millis(8_500),
                price: 1_200,
                radius: 60.0,
                attack_kind: AttackKind::Explosion { radius: 20.0 },
                can_hit_stealth: false,
                can_hit_armored: true,
                slow: None,
                poison_damage: 0.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
            Self::Cannon => TowerStats {
                attack: 75.0,
                attack_interval: Duration::from_millis(2_750),
                price: 500,
                radius: 27.0,
                attack_kind: AttackKind::Explosion { radius: 15.0 },
                can_hit_stealth: false,
                can_hit_armored: true,
                slow: None,
                poison_damage: 0.0,
                stops_regen: false,
                crit: None,
                stun: None,
                lingering: None,
            },
        }
    }

    /// Short display label for HUD output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Sniper => "sniper",
            Self::RapidShooter => "rapid shooter",
            Self::Slower => "slower",
            Self::GasSpitter => "gas spitter",
            Self::Mortar => "mortar",
            Self::Cannon => "cannon",
        }
    }
}

/// Attack modality of a tower, selected once per attack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackKind {
    /// One target per attack cycle.
    Single,
    /// Several independent targets per attack cycle.
    Multi {
        /// Number of targets struck at once.
        targets: u32,
    },
    /// Full damage to the primary target, quarter damage in a blast radius.
    Explosion {
        /// Blast radius around the primary target.
        radius: f32,
    },
    /// Damage hops between nearby enemies.
    Chain {
        /// Maximum enemies struck, primary included.
        count: u32,
        /// Maximum hop distance between links.
        range: f32,
    },
    /// Direct impact damage plus a stationary damage-over-time zone.
    Lingering,
}

impl AttackKind {
    /// Number of targets the targeting resolver should supply.
    #[must_use]
    pub const fn target_count(self) -> u32 {
        match self {
            Self::Multi { targets } => targets,
            Self::Single | Self::Explosion { .. } | Self::Chain { .. } | Self::Lingering => 1,
        }
    }
}

/// Slow effect configuration carried by a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlowSpec {
    /// Speed multiplier applied to slowed enemies; lower is stronger.
    pub factor: f32,
    /// How long the slow lasts after application.
    pub duration: Duration,
}

/// Stun effect configuration carried by a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StunSpec {
    /// Per-hit probability of stunning on direct attacks.
    pub chance: f32,
    /// How long the stun lasts after application.
    pub duration: Duration,
}

/// Critical-hit configuration carried by a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CritSpec {
    /// Per-attack probability of a critical hit.
    pub chance: f32,
    /// Damage multiplier applied on a critical hit.
    pub multiplier: f32,
}

/// Lingering-zone configuration carried by a tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneSpec {
    /// Damage dealt per scheduler quantum to each enemy inside the zone.
    pub damage: f32,
    /// Zone radius in battlefield percent.
    pub radius: f32,
    /// Zone lifetime.
    pub duration: Duration,
}

/// Mutable combat stats of a tower; starts from the archetype template and
/// is transformed by upgrade deltas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerStats {
    /// Damage per hit before critical multipliers.
    pub attack: f32,
    /// Cooldown between attack cycles.
    pub attack_interval: Duration,
    /// Purchase price.
    pub price: u64,
    /// Targeting radius in battlefield percent.
    pub radius: f32,
    /// Attack modality.
    pub attack_kind: AttackKind,
    /// Whether stealth archetypes are targetable.
    pub can_hit_stealth: bool,
    /// Whether armored enemies take damage (and lose their armor).
    pub can_hit_armored: bool,
    /// Slow effect applied to struck enemies, if any.
    pub slow: Option<SlowSpec>,
    /// Poison budget component; zero for non-poisoning towers.
    pub poison_damage: f32,
    /// Whether poison from this tower suppresses regeneration.
    pub stops_regen: bool,
    /// Critical-hit configuration, if any.
    pub crit: Option<CritSpec>,
    /// Stun configuration, if any.
    pub stun: Option<StunSpec>,
    /// Lingering-zone configuration, if any.
    pub lingering: Option<ZoneSpec>,
}

#[cfg(test)]
mod tests {
    use super::{AttackKind, EnemyKind, TowerKind};

    #[test]
    fn stealth_classification_covers_all_stealth_archetypes() {
        assert!(EnemyKind::Stealth.is_stealth());
        assert!(EnemyKind::StealthyTank.is_stealth());
        assert!(EnemyKind::StealthySpeedy.is_stealth());
        assert!(!EnemyKind::Basic.is_stealth());
        assert!(!EnemyKind::Boss.is_stealth());
    }

    #[test]
    fn basic_enemy_matches_template() {
        let stats = EnemyKind::Basic.stats();
        assert_eq!(stats.hp, 100.0);
        assert_eq!(stats.damage, 5);
        assert_eq!(stats.speed, 0.225);
        assert!(!stats.armored);
        assert!(!stats.spawns_on_death);
    }

    #[test]
    fn armored_archetypes_carry_armor() {
        assert!(EnemyKind::ArmoredBasic.stats().armored);
        assert!(EnemyKind::ArmoredTank.stats().armored);
        assert!(EnemyKind::ArmoredUltraTank.stats().armored);
        assert!(EnemyKind::ArmoredSpeedyMegaTank.stats().armored);
    }

    #[test]
    fn spawner_releases_units_on_death() {
        assert!(EnemyKind::Spawner.stats().spawns_on_death);
        assert!(!EnemyKind::MegaBoss.stats().spawns_on_death);
    }

    #[test]
    fn explosive_towers_pierce_armor() {
        assert!(TowerKind::Mortar.stats().can_hit_armored);
        assert!(TowerKind::Cannon.stats().can_hit_armored);
        assert!(!TowerKind::Basic.stats().can_hit_armored);
    }

    #[test]
    fn target_count_follows_attack_kind() {
        assert_eq!(AttackKind::Single.target_count(), 1);
        assert_eq!(AttackKind::Multi { targets: 4 }.target_count(), 4);
        assert_eq!(AttackKind::Explosion { radius: 20.0 }.target_count(), 1);
        assert_eq!(
            AttackKind::Chain {
                count: 3,
                range: 25.0
            }
            .target_count(),
            1
        );
        assert_eq!(AttackKind::Lingering.target_count(), 1);
    }

    #[test]
    fn slower_template_matches_documented_scenario() {
        let stats = TowerKind::Slower.stats();
        let slow = stats.slow.expect("slower tower carries a slow spec");
        assert_eq!(slow.factor, 0.75);
        assert_eq!(slow.duration.as_millis(), 2_000);
    }
}
