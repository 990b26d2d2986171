//! Tower upgrade catalog.
//!
//! Each tower archetype carries two mutually exclusive upgrade paths of five
//! tiers. Upgrades are pure data: a [`StatDelta`] of optional stat overrides
//! applied by one generic merge function, never executable callbacks. Reaching
//! tier three on either path commits the tower to it; the other path then only
//! offers its low-tier options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{AttackKind, CritSpec, SlowSpec, StunSpec, TowerKind, TowerStats, ZoneSpec};

/// Tier on either path past which the tower commits to that path.
pub const COMMIT_LEVEL: u8 = 3;

/// Highest tier on the locked-out path that remains purchasable.
const LOCKED_PATH_TIER_CAP: u8 = 2;

/// One of the two upgrade branches of a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradePath {
    /// First branch.
    One,
    /// Second branch.
    Two,
}

/// How a lingering zone's per-tick damage is derived from current stats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoneDamageBasis {
    /// Fraction of the tower's attack value at purchase time.
    AttackFraction(f32),
    /// Fraction of the tower's poison budget at purchase time.
    PoisonFraction(f32),
}

/// Lingering-zone grant carried by an upgrade.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneDelta {
    /// Damage derivation rule.
    pub basis: ZoneDamageBasis,
    /// Zone radius.
    pub radius: f32,
    /// Zone lifetime.
    pub duration: Duration,
}

/// Data-described stat transform applied when an upgrade is purchased.
///
/// Fields default to "no change"; each purchase applies the delta once, so
/// buying consecutive tiers stacks additive and multiplicative effects.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatDelta {
    /// Added to the attack value.
    pub attack_add: f32,
    /// Multiplies the attack value after the addition.
    pub attack_mul: Option<f32>,
    /// Added to the attack interval in milliseconds; negative shortens it.
    pub interval_add_ms: i64,
    /// Multiplies the attack interval after the addition.
    pub interval_mul: Option<f32>,
    /// Multiplies the targeting radius.
    pub radius_mul: Option<f32>,
    /// Replaces the attack modality.
    pub attack_kind: Option<AttackKind>,
    /// Replaces the explosion radius, when the modality is explosive.
    pub explosion_radius: Option<f32>,
    /// Multiplies the explosion radius, when the modality is explosive.
    pub explosion_radius_mul: Option<f32>,
    /// Grants stealth detection.
    pub grant_stealth_detection: bool,
    /// Grants armor piercing.
    pub grant_armor_piercing: bool,
    /// Installs or replaces the critical-hit configuration.
    pub crit: Option<CritSpec>,
    /// Installs or replaces the stun configuration.
    pub stun: Option<StunSpec>,
    /// Adjusts the stun chance of an already-installed stun.
    pub stun_chance: Option<f32>,
    /// Adjusts the stun duration of an already-installed stun.
    pub stun_duration_ms: Option<u64>,
    /// Installs or replaces the slow configuration.
    pub slow: Option<SlowSpec>,
    /// Multiplies the slow factor of an already-installed slow.
    pub slow_factor_mul: Option<f32>,
    /// Replaces the slow factor of an already-installed slow.
    pub slow_factor: Option<f32>,
    /// Replaces the slow duration of an already-installed slow.
    pub slow_duration_ms: Option<u64>,
    /// Added to the poison budget.
    pub poison_add: f32,
    /// Multiplies the poison budget after the addition.
    pub poison_mul: Option<f32>,
    /// Makes poison from this tower suppress regeneration.
    pub grant_regen_block: bool,
    /// Installs or replaces the lingering-zone configuration.
    pub zone: Option<ZoneDelta>,
    /// Added to the tower's resale worth.
    pub worth_add: u64,
}

impl StatDelta {
    /// Merges the delta into the provided stats.
    ///
    /// Zone damage is derived from the stats as they were before this delta's
    /// own attack/poison adjustments, matching purchase-time semantics.
    pub fn apply(&self, stats: &mut TowerStats) {
        let zone = self.zone.map(|delta| ZoneSpec {
            damage: match delta.basis {
                ZoneDamageBasis::AttackFraction(fraction) => stats.attack * fraction,
                ZoneDamageBasis::PoisonFraction(fraction) => stats.poison_damage * fraction,
            },
            radius: delta.radius,
            duration: delta.duration,
        });

        stats.attack += self.attack_add;
        if let Some(multiplier) = self.attack_mul {
            stats.attack *= multiplier;
        }

        let mut interval_ms = stats.attack_interval.as_millis() as i64 + self.interval_add_ms;
        if let Some(multiplier) = self.interval_mul {
            interval_ms = (interval_ms as f64 * f64::from(multiplier)).round() as i64;
        }
        stats.attack_interval = Duration::from_millis(interval_ms.max(1) as u64);

        if let Some(multiplier) = self.radius_mul {
            stats.radius *= multiplier;
        }

        if let Some(kind) = self.attack_kind {
            stats.attack_kind = kind;
        }
        if let AttackKind::Explosion { radius } = &mut stats.attack_kind {
            if let Some(replacement) = self.explosion_radius {
                *radius = replacement;
            }
            if let Some(multiplier) = self.explosion_radius_mul {
                *radius *= multiplier;
            }
        }

        if self.grant_stealth_detection {
            stats.can_hit_stealth = true;
        }
        if self.grant_armor_piercing {
            stats.can_hit_armored = true;
        }

        if let Some(crit) = self.crit {
            stats.crit = Some(crit);
        }

        if let Some(stun) = self.stun {
            stats.stun = Some(stun);
        }
        if let Some(spec) = &mut stats.stun {
            if let Some(chance) = self.stun_chance {
                spec.chance = chance;
            }
            if let Some(duration_ms) = self.stun_duration_ms {
                spec.duration = Duration::from_millis(duration_ms);
            }
        }

        if let Some(slow) = self.slow {
            stats.slow = Some(slow);
        }
        if let Some(spec) = &mut stats.slow {
            if let Some(multiplier) = self.slow_factor_mul {
                spec.factor *= multiplier;
            }
            if let Some(factor) = self.slow_factor {
                spec.factor = factor;
            }
            if let Some(duration_ms) = self.slow_duration_ms {
                spec.duration = Duration::from_millis(duration_ms);
            }
        }

        stats.poison_damage += self.poison_add;
        if let Some(multiplier) = self.poison_mul {
            stats.poison_damage *= multiplier;
        }
        if self.grant_regen_block {
            stats.stops_regen = true;
        }

        if let Some(spec) = zone {
            stats.lingering = Some(spec);
        }
    }
}

/// A purchasable upgrade tier on one of a tower's paths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeDefinition {
    /// Display name.
    pub name: &'static str,
    /// Purchase cost.
    pub cost: u64,
    /// Narrative description shown in the upgrade menu.
    pub description: &'static str,
    /// Path the upgrade belongs to.
    pub path: UpgradePath,
    /// Level required on that path before the upgrade is offered.
    pub requires: u8,
    /// Stat transform applied on purchase.
    pub delta: StatDelta,
}

/// Full upgrade table for a tower archetype, both paths in tier order.
#[must_use]
pub fn upgrades_for(kind: TowerKind) -> Vec<UpgradeDefinition> {
    match kind {
        TowerKind::Basic => basic_upgrades(),
        TowerKind::Sniper => sniper_upgrades(),
        TowerKind::RapidShooter => rapid_shooter_upgrades(),
        TowerKind::Slower => slower_upgrades(),
        TowerKind::GasSpitter => gas_spitter_upgrades(),
        TowerKind::Mortar => mortar_upgrades(),
        TowerKind::Cannon => cannon_upgrades(),
    }
}

/// Upgrades currently purchasable for a tower at the provided path levels.
///
/// Before either path reaches [`COMMIT_LEVEL`], both paths offer their next
/// tier. Afterwards the committed path keeps advancing while the other path
/// is capped at its low tiers.
#[must_use]
pub fn available_upgrades(kind: TowerKind, path1: u8, path2: u8) -> Vec<UpgradeDefinition> {
    let table = upgrades_for(kind);
    let committed_one = path1 >= COMMIT_LEVEL;
    let committed_two = path2 >= COMMIT_LEVEL;

    table
        .into_iter()
        .filter(|upgrade| {
            let level = match upgrade.path {
                UpgradePath::One => path1,
                UpgradePath::Two => path2,
            };
            if upgrade.requires != level {
                return false;
            }

            if committed_one {
                upgrade.path == UpgradePath::One || upgrade.requires < LOCKED_PATH_TIER_CAP
            } else if committed_two {
                upgrade.path == UpgradePath::Two || upgrade.requires < LOCKED_PATH_TIER_CAP
            } else {
                true
            }
        })
        .collect()
}

fn upgrade(
    name: &'static str,
    cost: u64,
    description: &'static str,
    path: UpgradePath,
    requires: u8,
    delta: StatDelta,
) -> UpgradeDefinition {
    UpgradeDefinition {
        name,
        cost,
        description,
        path,
        requires,
        delta,
    }
}

fn basic_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "Stealth Detection",
            400,
            "Can hit stealth enemies",
            UpgradePath::One,
            0,
            StatDelta {
                grant_stealth_detection: true,
                worth_add: 400,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Rapid Fire",
            800,
            "Reduces attack interval by 300ms",
            UpgradePath::One,
            1,
            StatDelta {
                interval_add_ms: -300,
                worth_add: 800,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Double Shot",
            2_000,
            "Attacks two targets at once with increased speed",
            UpgradePath::One,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 2 }),
                interval_add_ms: -200,
                worth_add: 2_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Speed Master",
            15_000,
            "Ultimate attack speed and triple shot",
            UpgradePath::One,
            3,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 3 }),
                interval_add_ms: -250,
                attack_mul: Some(1.5),
                worth_add: 15_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Hypersonic Barrage",
            25_000,
            "Quadruple shot with extreme attack speed",
            UpgradePath::One,
            4,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 4 }),
                interval_add_ms: -100,
                attack_mul: Some(1.8),
                worth_add: 25_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Enhanced Targeting",
            600,
            "Increases attack damage by 60",
            UpgradePath::Two,
            0,
            StatDelta {
                attack_add: 60.0,
                worth_add: 600,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Heavy Shells",
            2_000,
            "Further increases damage and adds armor piercing",
            UpgradePath::Two,
            1,
            StatDelta {
                attack_add: 80.0,
                grant_armor_piercing: true,
                worth_add: 2_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Critical Strike",
            5_000,
            "30% chance to deal triple damage",
            UpgradePath::Two,
            2,
            StatDelta {
                crit: Some(CritSpec {
                    chance: 0.30,
                    multiplier: 3.0,
                }),
                worth_add: 5_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Demolition Expert",
            15_000,
            "Converts to massive explosive damage",
            UpgradePath::Two,
            3,
            StatDelta {
                attack_kind: Some(AttackKind::Explosion { radius: 25.0 }),
                attack_mul: Some(3.0),
                worth_add: 15_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Nuclear Strike",
            30_000,
            "Devastating explosion",
            UpgradePath::Two,
            4,
            StatDelta {
                explosion_radius_mul: Some(1.4),
                attack_mul: Some(1.5),
                worth_add: 30_000,
                ..StatDelta::default()
            },
        ),
    ]
}

fn sniper_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "Precision Scope",
            1_000,
            "Increases damage by 100",
            UpgradePath::One,
            0,
            StatDelta {
                attack_add: 100.0,
                worth_add: 1_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Stun Rounds",
            2_500,
            "20% chance to stun enemies",
            UpgradePath::One,
            1,
            StatDelta {
                stun: Some(StunSpec {
                    chance: 0.2,
                    duration: Duration::from_millis(75),
                }),
                worth_add: 2_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Armor Piercing",
            5_000,
            "Can hit armored enemies and +150 damage",
            UpgradePath::One,
            2,
            StatDelta {
                grant_armor_piercing: true,
                attack_add: 150.0,
                worth_add: 5_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Heavy Impact",
            12_000,
            "40% stun chance and doubled damage",
            UpgradePath::One,
            3,
            StatDelta {
                attack_mul: Some(2.0),
                stun_chance: Some(0.4),
                stun_duration_ms: Some(150),
                worth_add: 12_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Ultimate Destroyer",
            25_000,
            "Massive damage and guaranteed stun",
            UpgradePath::One,
            4,
            StatDelta {
                attack_mul: Some(3.0),
                stun_chance: Some(1.0),
                stun_duration_ms: Some(250),
                worth_add: 25_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Quick Loader",
            800,
            "Reduces attack interval by 400ms",
            UpgradePath::Two,
            0,
            StatDelta {
                interval_add_ms: -400,
                worth_add: 800,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Double Shot",
            2_000,
            "Can target two enemies",
            UpgradePath::Two,
            1,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 2 }),
                interval_add_ms: -200,
                worth_add: 2_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Advanced Targeting",
            4_500,
            "Triple shot and faster firing",
            UpgradePath::Two,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 3 }),
                interval_add_ms: -300,
                worth_add: 4_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Rapid Fire Master",
            15_000,
            "Extremely fast attack speed",
            UpgradePath::Two,
            3,
            StatDelta {
                interval_add_ms: -500,
                attack_mul: Some(1.3),
                worth_add: 15_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Machine Gun Mode",
            25_000,
            "Quadruple shot with insane speed",
            UpgradePath::Two,
            4,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 4 }),
                interval_add_ms: -350,
                attack_mul: Some(1.5),
                worth_add: 25_000,
                ..StatDelta::default()
            },
        ),
    ]
}

fn rapid_shooter_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "Faster Firing",
            500,
            "Reduces attack interval by 75ms",
            UpgradePath::One,
            0,
            StatDelta {
                interval_add_ms: -75,
                worth_add: 500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Enhanced Targeting",
            1_200,
            "Increases damage by 15 and attack speed",
            UpgradePath::One,
            1,
            StatDelta {
                attack_add: 15.0,
                interval_add_ms: -50,
                worth_add: 1_200,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Triple Shot",
            3_500,
            "Can target three enemies at once",
            UpgradePath::One,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 3 }),
                interval_add_ms: -25,
                worth_add: 3_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Quad Shot",
            8_000,
            "Four targets and enhanced speed",
            UpgradePath::One,
            3,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 4 }),
                interval_add_ms: -50,
                attack_add: 10.0,
                worth_add: 8_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Bullet Storm",
            25_000,
            "Maximum attack speed and damage",
            UpgradePath::One,
            4,
            StatDelta {
                interval_add_ms: -65,
                attack_mul: Some(1.6),
                worth_add: 25_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Static Charge",
            800,
            "Adds 25 damage and slight range",
            UpgradePath::Two,
            0,
            StatDelta {
                attack_add: 25.0,
                radius_mul: Some(1.1),
                worth_add: 800,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Enhanced Range",
            1_500,
            "Further increases range, damage and stealth detection",
            UpgradePath::Two,
            1,
            StatDelta {
                radius_mul: Some(1.2),
                attack_add: 15.0,
                grant_stealth_detection: true,
                worth_add: 1_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Chain Lightning",
            4_500,
            "Attacks chain to 2 nearby enemies",
            UpgradePath::Two,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Chain {
                    count: 2,
                    range: 20.0,
                }),
                attack_add: 20.0,
                worth_add: 4_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Storm Caller",
            12_000,
            "Chain to 3 enemies with increased damage",
            UpgradePath::Two,
            3,
            StatDelta {
                attack_kind: Some(AttackKind::Chain {
                    count: 3,
                    range: 25.0,
                }),
                attack_mul: Some(1.4),
                interval_add_ms: -25,
                worth_add: 12_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Lightning Master",
            25_000,
            "Maximum chain potential and massive damage",
            UpgradePath::Two,
            4,
            StatDelta {
                attack_kind: Some(AttackKind::Chain {
                    count: 4,
                    range: 30.0,
                }),
                attack_mul: Some(2.0),
                interval_add_ms: -50,
                worth_add: 25_000,
                ..StatDelta::default()
            },
        ),
    ]
}

fn slower_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "Enhanced Slow",
            400,
            "Increases slow effect by 10%",
            UpgradePath::One,
            0,
            StatDelta {
                slow_factor_mul: Some(0.9),
                worth_add: 400,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Time Distortion",
            1_500,
            "Further increases slow effect and duration",
            UpgradePath::One,
            1,
            StatDelta {
                slow_factor_mul: Some(0.8),
                slow_duration_ms: Some(3_000),
                worth_add: 1_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Temporal Field",
            3_500,
            "Creates slowing field around targets",
            UpgradePath::One,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Explosion { radius: 15.0 }),
                slow_factor_mul: Some(0.7),
                worth_add: 3_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Chrono Break",
            8_000,
            "Massive slow effect in larger area",
            UpgradePath::One,
            3,
            StatDelta {
                explosion_radius: Some(20.0),
                slow_factor_mul: Some(0.6),
                slow_duration_ms: Some(4_000),
                worth_add: 8_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Time Lord",
            20_000,
            "Ultimate time manipulation",
            UpgradePath::One,
            4,
            StatDelta {
                explosion_radius: Some(25.0),
                slow_factor_mul: Some(0.6),
                grant_stealth_detection: true,
                worth_add: 20_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Frost Touch",
            600,
            "Adds freezing damage",
            UpgradePath::Two,
            0,
            StatDelta {
                attack_add: 15.0,
                worth_add: 600,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Frost Touch 2",
            1_200,
            "Faster freeze",
            UpgradePath::Two,
            1,
            StatDelta {
                interval_add_ms: -250,
                worth_add: 600,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Arctic Wind",
            4_500,
            "Triple target and increased range",
            UpgradePath::Two,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 3 }),
                radius_mul: Some(1.3),
                attack_add: 25.0,
                worth_add: 4_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Deep Freeze",
            12_000,
            "Quad target and chance to stun",
            UpgradePath::Two,
            3,
            StatDelta {
                attack_kind: Some(AttackKind::Multi { targets: 4 }),
                stun: Some(StunSpec {
                    chance: 0.0,
                    duration: Duration::from_millis(100),
                }),
                attack_add: 30.0,
                worth_add: 12_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Permafrost",
            20_000,
            "Maximum freeze potential",
            UpgradePath::Two,
            4,
            StatDelta {
                attack_mul: Some(2.0),
                stun_duration_ms: Some(250),
                radius_mul: Some(1.5),
                worth_add: 20_000,
                ..StatDelta::default()
            },
        ),
    ]
}

fn gas_spitter_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "Virulent Strain",
            400,
            "Increases poison damage",
            UpgradePath::One,
            0,
            StatDelta {
                poison_add: 25.0,
                worth_add: 400,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Lingering Toxin",
            1_200,
            "Longer lasting poison",
            UpgradePath::One,
            1,
            StatDelta {
                poison_add: 30.0,
                worth_add: 1_200,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Acid Pools",
            3_000,
            "Creates damaging acid pools on impact",
            UpgradePath::One,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Lingering),
                zone: Some(ZoneDelta {
                    basis: ZoneDamageBasis::PoisonFraction(0.05),
                    radius: 15.0,
                    duration: Duration::from_millis(2_000),
                }),
                worth_add: 3_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Toxic Catalyst",
            8_000,
            "Extreme poison damage, can stop regen and hit stealth",
            UpgradePath::One,
            3,
            StatDelta {
                poison_mul: Some(2.5),
                grant_stealth_detection: true,
                grant_regen_block: true,
                worth_add: 8_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Bio Weaponry",
            15_000,
            "Ultimate poison damage",
            UpgradePath::One,
            4,
            StatDelta {
                poison_mul: Some(3.0),
                attack_mul: Some(1.5),
                worth_add: 15_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Wider Spray",
            600,
            "Increases attack radius",
            UpgradePath::Two,
            0,
            StatDelta {
                radius_mul: Some(1.2),
                worth_add: 600,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Faster Attack",
            2_000,
            "Reduces attack interval",
            UpgradePath::Two,
            1,
            StatDelta {
                interval_add_ms: -200,
                radius_mul: Some(1.2),
                worth_add: 2_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Gas Cloud",
            4_500,
            "Creates poisonous explosion",
            UpgradePath::Two,
            2,
            StatDelta {
                attack_kind: Some(AttackKind::Explosion { radius: 20.0 }),
                poison_add: 20.0,
                worth_add: 4_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Dense Vapors",
            12_000,
            "Larger explosion and slowing effect",
            UpgradePath::Two,
            3,
            StatDelta {
                explosion_radius: Some(25.0),
                slow: Some(SlowSpec {
                    factor: 0.8,
                    duration: Duration::from_millis(2_000),
                }),
                poison_add: 30.0,
                worth_add: 12_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Chemical Warfare",
            20_000,
            "Maximum area control",
            UpgradePath::Two,
            4,
            StatDelta {
                explosion_radius: Some(30.0),
                slow_factor: Some(0.7),
                poison_mul: Some(1.5),
                worth_add: 20_000,
                ..StatDelta::default()
            },
        ),
    ]
}

fn mortar_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "High Explosive Shells",
            800,
            "More powerful explosions",
            UpgradePath::One,
            0,
            StatDelta {
                attack_add: 100.0,
                explosion_radius_mul: Some(1.1),
                worth_add: 800,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Heavy Ordnance",
            2_000,
            "Massively enhanced explosion damage",
            UpgradePath::One,
            1,
            StatDelta {
                explosion_radius_mul: Some(1.2),
                attack_mul: Some(1.3),
                worth_add: 2_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Concentrated Blast",
            4_500,
            "Extreme explosive power",
            UpgradePath::One,
            2,
            StatDelta {
                attack_mul: Some(1.5),
                grant_armor_piercing: true,
                worth_add: 4_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Napalm Shells",
            8_000,
            "Devastating area damage",
            UpgradePath::One,
            3,
            StatDelta {
                attack_mul: Some(1.75),
                explosion_radius_mul: Some(1.3),
                grant_stealth_detection: true,
                worth_add: 8_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Nuclear Artillery",
            30_000,
            "Ultimate destruction",
            UpgradePath::One,
            4,
            StatDelta {
                attack_mul: Some(2.5),
                explosion_radius_mul: Some(1.4),
                interval_mul: Some(1.5),
                crit: Some(CritSpec {
                    chance: 0.3,
                    multiplier: 2.0,
                }),
                worth_add: 30_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "EMP Shells",
            1_000,
            "Shells temporarily disable enemies",
            UpgradePath::Two,
            0,
            StatDelta {
                stun: Some(StunSpec {
                    chance: 0.0,
                    duration: Duration::from_millis(100),
                }),
                explosion_radius_mul: Some(1.1),
                worth_add: 1_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Cryogenic Payload",
            2_500,
            "Freezing explosions slow enemies",
            UpgradePath::Two,
            1,
            StatDelta {
                slow: Some(SlowSpec {
                    factor: 0.7,
                    duration: Duration::from_millis(2_000),
                }),
                explosion_radius_mul: Some(1.2),
                worth_add: 2_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Shockwave Artillery",
            5_000,
            "Enhanced control effects",
            UpgradePath::Two,
            2,
            StatDelta {
                explosion_radius_mul: Some(1.3),
                stun_duration_ms: Some(300),
                slow_factor: Some(0.6),
                attack_add: 50.0,
                worth_add: 5_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Shock and Awe",
            12_000,
            "Devastating crowd control",
            UpgradePath::Two,
            3,
            StatDelta {
                explosion_radius_mul: Some(1.4),
                slow_factor: Some(0.5),
                slow_duration_ms: Some(3_000),
                stun_duration_ms: Some(400),
                attack_add: 100.0,
                worth_add: 12_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Strategic Command",
            25_000,
            "Ultimate battlefield control",
            UpgradePath::Two,
            4,
            StatDelta {
                explosion_radius_mul: Some(1.5),
                attack_mul: Some(1.5),
                slow_factor: Some(0.4),
                slow_duration_ms: Some(4_000),
                grant_stealth_detection: true,
                worth_add: 20_000,
                ..StatDelta::default()
            },
        ),
    ]
}

fn cannon_upgrades() -> Vec<UpgradeDefinition> {
    vec![
        upgrade(
            "Reinforced Barrel",
            800,
            "Increased damage",
            UpgradePath::One,
            0,
            StatDelta {
                attack_add: 50.0,
                worth_add: 800,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Armor Piercing Rounds",
            2_000,
            "Specialized anti-armor ammunition",
            UpgradePath::One,
            1,
            StatDelta {
                attack_add: 75.0,
                crit: Some(CritSpec {
                    chance: 0.2,
                    multiplier: 2.0,
                }),
                worth_add: 2_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Depleted Uranium",
            4_500,
            "Extreme armor penetration",
            UpgradePath::One,
            2,
            StatDelta {
                attack_mul: Some(1.5),
                crit: Some(CritSpec {
                    chance: 0.3,
                    multiplier: 2.5,
                }),
                worth_add: 4_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Tank Hunter",
            8_000,
            "Specialized in destroying tough enemies",
            UpgradePath::One,
            3,
            StatDelta {
                attack_mul: Some(1.75),
                crit: Some(CritSpec {
                    chance: 0.4,
                    multiplier: 3.0,
                }),
                interval_add_ms: -500,
                worth_add: 8_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Siege Breaker",
            25_000,
            "Ultimate anti-armor capabilities",
            UpgradePath::One,
            4,
            StatDelta {
                attack_mul: Some(1.5),
                crit: Some(CritSpec {
                    chance: 0.5,
                    multiplier: 4.0,
                }),
                grant_stealth_detection: true,
                worth_add: 25_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Wide Shells",
            1_000,
            "Increases explosion radius",
            UpgradePath::Two,
            0,
            StatDelta {
                explosion_radius_mul: Some(1.2),
                attack_add: -15.0,
                worth_add: 1_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Cluster Bombs",
            2_500,
            "Creates multiple small explosions",
            UpgradePath::Two,
            1,
            StatDelta {
                explosion_radius_mul: Some(1.3),
                interval_add_ms: -125,
                attack_add: 15.0,
                worth_add: 2_500,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Inferno Zone",
            5_000,
            "Massive burning zones after explosions",
            UpgradePath::Two,
            2,
            StatDelta {
                zone: Some(ZoneDelta {
                    basis: ZoneDamageBasis::AttackFraction(0.05),
                    radius: 20.0,
                    duration: Duration::from_millis(4_000),
                }),
                attack_add: 75.0,
                explosion_radius_mul: Some(1.3),
                worth_add: 5_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Hellfire Cannon",
            12_000,
            "Devastating explosions with intense burning",
            UpgradePath::Two,
            3,
            StatDelta {
                zone: Some(ZoneDelta {
                    basis: ZoneDamageBasis::AttackFraction(0.15),
                    radius: 25.0,
                    duration: Duration::from_millis(5_000),
                }),
                attack_mul: Some(1.4),
                explosion_radius_mul: Some(1.4),
                worth_add: 12_000,
                ..StatDelta::default()
            },
        ),
        upgrade(
            "Solar Inferno",
            20_000,
            "Ultimate area denial with massive damage",
            UpgradePath::Two,
            4,
            StatDelta {
                zone: Some(ZoneDelta {
                    basis: ZoneDamageBasis::AttackFraction(0.2),
                    radius: 30.0,
                    duration: Duration::from_millis(6_000),
                }),
                attack_mul: Some(1.6),
                explosion_radius_mul: Some(1.5),
                grant_armor_piercing: true,
                worth_add: 20_000,
                ..StatDelta::default()
            },
        ),
    ]
}
