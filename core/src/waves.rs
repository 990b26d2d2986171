//! Round-by-round wave composition tables.
//!
//! Which enemy spawns, how often, and how many units a round holds are pure
//! functions of the round number and the running unit counter. Boss-tier
//! enemies count as many units toward the limit, which is how boss rounds
//! stay short while still ramping the limit formula.

use std::time::Duration;

use crate::catalog::EnemyKind;

/// Fallback spawn period floor once `1000 / round` dips below it.
const SPAWN_INTERVAL_FLOOR_MS: u64 = 50;

/// Fixed spawn period of the first boss round.
const BOSS_ROUND_INTERVAL_MS: u64 = 1_250;

/// An instruction to field one enemy, weighted in units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnOrder {
    /// Archetype to spawn.
    pub kind: EnemyKind,
    /// Units the spawn counts for toward the round limit.
    pub units: u32,
}

impl SpawnOrder {
    const fn one(kind: EnemyKind) -> Self {
        Self { kind, units: 1 }
    }

    const fn weighted(kind: EnemyKind, units: u32) -> Self {
        Self { kind, units }
    }
}

/// Unit limit for a round.
#[must_use]
pub fn unit_limit(round: u32) -> u32 {
    match round {
        0 => 0,
        32 => 320,
        r if r <= 26 => 10 * r,
        r if r > 30 => (15 * r).div_ceil(2),
        r => 15 * r,
    }
}

/// Logical time between spawn decisions for a round.
#[must_use]
pub fn spawn_interval(round: u32) -> Duration {
    if round == 0 {
        return Duration::ZERO;
    }
    if round == 32 {
        return Duration::from_millis(BOSS_ROUND_INTERVAL_MS);
    }
    Duration::from_millis((1_000 / u64::from(round)).max(SPAWN_INTERVAL_FLOOR_MS))
}

/// Which enemy the round fields next, given the running unit counter.
///
/// Returns `None` for the idle round and for rounds past the campaign end.
#[must_use]
pub fn spawn_order(round: u32, units: u32) -> Option<SpawnOrder> {
    let order = match round {
        0 => return None,
        1..=4 | 6..=9 => SpawnOrder::one(EnemyKind::Basic),
        5 => {
            if units % 2 == 0 {
                SpawnOrder::one(EnemyKind::Stealth)
            } else {
                SpawnOrder::one(EnemyKind::Speedy)
            }
        }
        10..=12 => match units % 3 {
            0 => SpawnOrder::one(EnemyKind::Stealth),
            1 => SpawnOrder::one(EnemyKind::Speedy),
            _ => SpawnOrder::one(EnemyKind::Basic),
        },
        13..=15 => match units % 3 {
            0 => SpawnOrder::one(EnemyKind::Stealth),
            1 => SpawnOrder::one(EnemyKind::Speedy),
            _ => SpawnOrder::one(EnemyKind::ArmoredBasic),
        },
        16..=21 => match units % 3 {
            0 => SpawnOrder::one(EnemyKind::Stealth),
            1 => SpawnOrder::one(EnemyKind::Speedy),
            _ => SpawnOrder::one(EnemyKind::Tank),
        },
        22 => SpawnOrder::one(EnemyKind::RegenTank),
        23..=25 => match units % 3 {
            0 => SpawnOrder::one(EnemyKind::StealthyTank),
            1 => SpawnOrder::one(EnemyKind::StealthySpeedy),
            _ => SpawnOrder::one(EnemyKind::ArmoredTank),
        },
        26..=31 => {
            if units % 2 == 0 {
                SpawnOrder::one(EnemyKind::StealthyTank)
            } else {
                SpawnOrder::one(EnemyKind::SpeedyRegenTank)
            }
        }
        32 => SpawnOrder::weighted(EnemyKind::Boss, 80),
        33..=39 => {
            if units % 50 == 0 {
                SpawnOrder::weighted(EnemyKind::Boss, 2)
            } else if units % 2 == 0 {
                SpawnOrder::weighted(EnemyKind::ArmoredUltraTank, 2)
            } else {
                SpawnOrder::weighted(EnemyKind::UltraTank, 2)
            }
        }
        40 => SpawnOrder::weighted(EnemyKind::Boss, 35),
        41..=44 => {
            if units % 50 == 0 {
                SpawnOrder::one(EnemyKind::Boss)
            } else if units % 2 == 0 {
                SpawnOrder::one(EnemyKind::ArmoredSpeedyMegaTank)
            } else {
                SpawnOrder::one(EnemyKind::SpeedyMegaTank)
            }
        }
        45 => SpawnOrder::weighted(EnemyKind::MegaBoss, 50),
        46..=49 => {
            if units % 100 == 0 {
                SpawnOrder::one(EnemyKind::MegaBoss)
            } else if units % 2 == 0 {
                SpawnOrder::one(EnemyKind::Spawner)
            } else {
                SpawnOrder::one(EnemyKind::SpeedyMegaTank)
            }
        }
        50 => SpawnOrder::weighted(EnemyKind::MegaBoss, 35),
        _ => return None,
    };
    Some(order)
}

#[cfg(test)]
mod tests {
    use super::{spawn_interval, spawn_order, unit_limit};
    use crate::catalog::EnemyKind;

    #[test]
    fn limit_brackets_match_the_design_table() {
        assert_eq!(unit_limit(0), 0);
        assert_eq!(unit_limit(1), 10);
        assert_eq!(unit_limit(26), 260);
        assert_eq!(unit_limit(27), 405);
        assert_eq!(unit_limit(30), 450);
        assert_eq!(unit_limit(31), 233);
        assert_eq!(unit_limit(32), 320);
        assert_eq!(unit_limit(33), 248);
        assert_eq!(unit_limit(50), 375);
    }

    #[test]
    fn spawn_interval_scales_inverse_to_round_with_a_floor() {
        assert_eq!(spawn_interval(1).as_millis(), 1_000);
        assert_eq!(spawn_interval(4).as_millis(), 250);
        assert_eq!(spawn_interval(25).as_millis(), 50);
        assert_eq!(spawn_interval(49).as_millis(), 50);
        assert_eq!(spawn_interval(32).as_millis(), 1_250);
    }

    #[test]
    fn early_rounds_field_only_basic_enemies() {
        for round in [1, 2, 3, 4, 6, 7, 8, 9] {
            for units in 0..20 {
                let order = spawn_order(round, units).expect("composition defined");
                assert_eq!(order.kind, EnemyKind::Basic);
                assert_eq!(order.units, 1);
            }
        }
    }

    #[test]
    fn round_five_alternates_stealth_and_speedy() {
        assert_eq!(spawn_order(5, 0).map(|o| o.kind), Some(EnemyKind::Stealth));
        assert_eq!(spawn_order(5, 1).map(|o| o.kind), Some(EnemyKind::Speedy));
        assert_eq!(spawn_order(5, 2).map(|o| o.kind), Some(EnemyKind::Stealth));
    }

    #[test]
    fn boss_rounds_spawn_heavyweights() {
        let boss = spawn_order(32, 0).expect("boss round defined");
        assert_eq!(boss.kind, EnemyKind::Boss);
        assert_eq!(boss.units, 80);

        let final_boss = spawn_order(50, 0).expect("final round defined");
        assert_eq!(final_boss.kind, EnemyKind::MegaBoss);
        assert_eq!(final_boss.units, 35);
    }

    #[test]
    fn late_bracket_interleaves_bosses_by_unit_counter() {
        assert_eq!(spawn_order(33, 0).map(|o| o.kind), Some(EnemyKind::Boss));
        assert_eq!(
            spawn_order(33, 2).map(|o| o.kind),
            Some(EnemyKind::ArmoredUltraTank)
        );
        assert_eq!(
            spawn_order(46, 1).map(|o| o.kind),
            Some(EnemyKind::SpeedyMegaTank)
        );
        assert_eq!(
            spawn_order(46, 2).map(|o| o.kind),
            Some(EnemyKind::Spawner)
        );
        assert_eq!(
            spawn_order(46, 100).map(|o| o.kind),
            Some(EnemyKind::MegaBoss)
        );
    }

    #[test]
    fn composition_ends_after_the_final_round() {
        assert!(spawn_order(0, 0).is_none());
        assert!(spawn_order(51, 0).is_none());
    }
}
