//! Combat resolution: direct hits, explosions, chains, and lingering impacts.
//!
//! Invoked once per `FireTower` command. A tower that is still mid-attack
//! ignores the command; targets that died between selection and resolution
//! are skipped silently. Damage is clamped to remaining hit points, armored
//! enemies shrug off non-piercing hits, and a piercing hit strips the armor
//! permanently.

use std::time::Duration;

use rand::Rng;

use vanguard_defence_core::{
    AttackKind, EnemyId, Event, Position, TowerId, TowerKind, TowerStats, ZoneSpec,
};

use crate::{
    process_kills, push_attack_effect, push_damage_number, push_explosion, push_zone,
    AttackInFlight, PoisonStatus, SlowStatus, StunStatus, World,
};

const EXPLOSION_SECONDARY_DIVISOR: f32 = 4.0;
const DIRECT_SLOW_FLOOR_EARLY: f32 = 0.15;
const DIRECT_SLOW_FLOOR_LATE: f32 = 0.4;
const SLOW_FLOOR_SWITCH_ROUND: u32 = 30;
const EXPLOSION_SLOW_FLOOR: f32 = 0.4;
const CHAIN_EFFECT_TTL_CAP: Duration = Duration::from_millis(500);
const FALLBACK_ZONE_DAMAGE_FACTOR: f32 = 0.1;
const FALLBACK_ZONE_RADIUS: f32 = 10.0;
const FALLBACK_ZONE_DURATION: Duration = Duration::from_millis(2_000);

pub(crate) fn resolve(
    world: &mut World,
    tower_id: TowerId,
    requested: &[EnemyId],
    out: &mut Vec<Event>,
) {
    let Some(tower) = world.towers.get(&tower_id) else {
        return;
    };
    if tower.attack.is_some() {
        return;
    }
    let stats = tower.stats;
    let kind = tower.kind;
    let tower_position = tower.position;

    let targets: Vec<EnemyId> = requested
        .iter()
        .copied()
        .filter(|id| enemy_index(world, *id).is_some())
        .collect();
    let Some(&primary) = targets.first() else {
        return;
    };

    let multiplier = critical_multiplier(world, &stats);
    let primary_position = enemy_index(world, primary).map(|index| world.enemies[index].position);
    let mut total_damage = 0.0_f32;
    let mut struck: Vec<EnemyId> = Vec::new();

    match stats.attack_kind {
        AttackKind::Single | AttackKind::Multi { .. } => resolve_direct(
            world,
            tower_id,
            kind,
            tower_position,
            &stats,
            &targets,
            multiplier,
            &mut total_damage,
            &mut struck,
        ),
        AttackKind::Explosion { radius } => resolve_explosion(
            world,
            tower_id,
            tower_position,
            &stats,
            primary,
            radius,
            multiplier,
            &mut total_damage,
            &mut struck,
        ),
        AttackKind::Chain { count, range } => resolve_chain(
            world,
            tower_id,
            tower_position,
            &stats,
            primary,
            count,
            range,
            multiplier,
            &mut total_damage,
            &mut struck,
        ),
        AttackKind::Lingering => resolve_lingering(
            world,
            tower_id,
            tower_position,
            &stats,
            &targets,
            multiplier,
            &mut total_damage,
            &mut struck,
        ),
    }

    process_kills(world, out);

    let until = world.clock + stats.attack_interval;
    if let Some(tower) = world.towers.get_mut(&tower_id) {
        tower.attack = Some(AttackInFlight {
            until,
            pending_damage: total_damage,
            targets: struck.clone(),
        });
        if let Some(position) = primary_position {
            tower.facing_right = position.x() > tower_position.x();
        }
    }

    out.push(Event::TowerFired {
        tower: tower_id,
        targets: struck,
    });
}

fn critical_multiplier(world: &mut World, stats: &TowerStats) -> f32 {
    match stats.crit {
        Some(crit) if world.rng.gen::<f32>() < crit.chance => crit.multiplier,
        _ => 1.0,
    }
}

fn enemy_index(world: &World, enemy: EnemyId) -> Option<usize> {
    world
        .enemies
        .iter()
        .position(|state| state.id == enemy && state.hp > 0.0)
}

/// Applies clamped damage to one enemy, honoring armor.
///
/// A piercing hit on an armored enemy strips the armor for good; a
/// non-piercing hit deals nothing.
fn strike(world: &mut World, index: usize, source: TowerId, amount: f32, pierce: bool) -> f32 {
    let enemy = &mut world.enemies[index];
    if enemy.armored {
        if !pierce {
            return 0.0;
        }
        enemy.armored = false;
    }
    let applied = amount.min(enemy.hp);
    enemy.hp -= applied;
    if applied > 0.0 {
        enemy.last_hit_by = Some(source);
    }
    applied
}

fn apply_stun(world: &mut World, index: usize, stats: &TowerStats, source: TowerId, guaranteed: bool) {
    let Some(spec) = stats.stun else {
        return;
    };
    if !guaranteed && world.rng.gen::<f32>() >= spec.chance {
        return;
    }
    let applied_at = world.clock;
    let enemy = &mut world.enemies[index];
    enemy.stun = Some(StunStatus { source, applied_at });
    enemy.speed = 0.0;
}

/// Applies a slow, replacing only a weaker one; the slowed speed never drops
/// below `floor` times the base speed, and a concurrent stun keeps speed at
/// zero.
fn apply_slow(world: &mut World, index: usize, stats: &TowerStats, source: TowerId, floor: f32) {
    let Some(spec) = stats.slow else {
        return;
    };
    let applied_at = world.clock;
    let enemy = &mut world.enemies[index];
    let stronger = match enemy.slow {
        None => true,
        Some(current) => spec.factor < current.factor,
    };
    if !stronger {
        return;
    }
    enemy.slow = Some(SlowStatus {
        factor: spec.factor,
        source,
        applied_at,
    });
    if enemy.stun.is_none() {
        enemy.speed = (enemy.base_speed * spec.factor).max(enemy.base_speed * floor);
    }
}

fn apply_poison(world: &mut World, index: usize, stats: &TowerStats, source: TowerId) {
    let applied_at = world.clock;
    let enemy = &mut world.enemies[index];
    enemy.poison = Some(PoisonStatus { source, applied_at });
    enemy.can_regen = !stats.stops_regen;
}

fn direct_slow_floor(round: u32) -> f32 {
    if round < SLOW_FLOOR_SWITCH_ROUND {
        DIRECT_SLOW_FLOOR_EARLY
    } else {
        DIRECT_SLOW_FLOOR_LATE
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_direct(
    world: &mut World,
    tower_id: TowerId,
    kind: TowerKind,
    tower_position: Position,
    stats: &TowerStats,
    targets: &[EnemyId],
    multiplier: f32,
    total_damage: &mut f32,
    struck: &mut Vec<EnemyId>,
) {
    let floor = direct_slow_floor(world.round);
    for &target in targets {
        let Some(index) = enemy_index(world, target) else {
            continue;
        };
        let position = world.enemies[index].position;
        push_attack_effect(world, tower_id, tower_position, position, stats.attack_interval);

        let applied = strike(world, index, tower_id, stats.attack * multiplier, stats.can_hit_armored);
        *total_damage += applied;
        if applied > 0.0 {
            push_damage_number(world, applied, position);
        }

        apply_stun(world, index, stats, tower_id, false);
        apply_slow(world, index, stats, tower_id, floor);
        if kind == TowerKind::GasSpitter {
            apply_poison(world, index, stats, tower_id);
        }

        world.enemies[index].targeted = true;
        struck.push(target);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_explosion(
    world: &mut World,
    tower_id: TowerId,
    tower_position: Position,
    stats: &TowerStats,
    primary: EnemyId,
    radius: f32,
    multiplier: f32,
    total_damage: &mut f32,
    struck: &mut Vec<EnemyId>,
) {
    let Some(primary_index) = enemy_index(world, primary) else {
        return;
    };
    let center = world.enemies[primary_index].position;
    push_attack_effect(world, tower_id, tower_position, center, stats.attack_interval);
    push_explosion(world, center, radius);
    if let Some(zone) = stats.lingering {
        push_zone(world, center, zone);
    }

    let mut affected: Vec<EnemyId> = vec![primary];
    for enemy in &world.enemies {
        if enemy.id == primary || enemy.hp <= 0.0 {
            continue;
        }
        if enemy.position.distance_to(center) <= radius {
            affected.push(enemy.id);
        }
    }

    for &id in &affected {
        let Some(index) = enemy_index(world, id) else {
            continue;
        };
        let base = if id == primary {
            stats.attack
        } else {
            stats.attack / EXPLOSION_SECONDARY_DIVISOR
        };
        let position = world.enemies[index].position;
        let applied = strike(world, index, tower_id, base * multiplier, stats.can_hit_armored);
        *total_damage += applied;
        if applied > 0.0 {
            push_damage_number(world, applied, position);
        }

        apply_stun(world, index, stats, tower_id, true);
        apply_slow(world, index, stats, tower_id, EXPLOSION_SLOW_FLOOR);
        struck.push(id);
    }

    world.enemies[primary_index].targeted = true;
}

#[allow(clippy::too_many_arguments)]
fn resolve_chain(
    world: &mut World,
    tower_id: TowerId,
    tower_position: Position,
    stats: &TowerStats,
    primary: EnemyId,
    count: u32,
    range: f32,
    multiplier: f32,
    total_damage: &mut f32,
    struck: &mut Vec<EnemyId>,
) {
    let Some(primary_index) = enemy_index(world, primary) else {
        return;
    };
    let effect_ttl = stats.attack_interval.min(CHAIN_EFFECT_TTL_CAP);
    let mut current_position = world.enemies[primary_index].position;
    push_attack_effect(world, tower_id, tower_position, current_position, effect_ttl);

    let mut chained: Vec<EnemyId> = vec![primary];
    while (chained.len() as u32) < count.max(1) {
        let mut nearest: Option<(f32, EnemyId, Position)> = None;
        for enemy in &world.enemies {
            if enemy.hp <= 0.0 || chained.contains(&enemy.id) {
                continue;
            }
            let distance = enemy.position.distance_to(current_position);
            if distance > range {
                continue;
            }
            let closer = match &nearest {
                None => true,
                Some((best_distance, best_id, _)) => {
                    distance < *best_distance
                        || (distance == *best_distance && enemy.id < *best_id)
                }
            };
            if closer {
                nearest = Some((distance, enemy.id, enemy.position));
            }
        }
        let Some((_, next, next_position)) = nearest else {
            break;
        };
        push_attack_effect(world, tower_id, current_position, next_position, effect_ttl);
        chained.push(next);
        current_position = next_position;
    }

    // Chain damage bypasses armor: the arc grounds through the plating.
    for &id in &chained {
        let Some(index) = enemy_index(world, id) else {
            continue;
        };
        let position = world.enemies[index].position;
        let applied = {
            let enemy = &mut world.enemies[index];
            let applied = (stats.attack * multiplier).min(enemy.hp);
            enemy.hp -= applied;
            enemy.last_hit_by = Some(tower_id);
            enemy.targeted = true;
            applied
        };
        *total_damage += applied;
        if applied > 0.0 {
            push_damage_number(world, applied, position);
        }
        struck.push(id);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_lingering(
    world: &mut World,
    tower_id: TowerId,
    tower_position: Position,
    stats: &TowerStats,
    targets: &[EnemyId],
    multiplier: f32,
    total_damage: &mut f32,
    struck: &mut Vec<EnemyId>,
) {
    let Some(&primary) = targets.first() else {
        return;
    };
    let Some(primary_index) = enemy_index(world, primary) else {
        return;
    };
    let center = world.enemies[primary_index].position;
    let zone = stats.lingering.unwrap_or(ZoneSpec {
        damage: stats.attack * FALLBACK_ZONE_DAMAGE_FACTOR,
        radius: FALLBACK_ZONE_RADIUS,
        duration: FALLBACK_ZONE_DURATION,
    });
    push_zone(world, center, zone);

    for &target in targets {
        let Some(index) = enemy_index(world, target) else {
            continue;
        };
        let position = world.enemies[index].position;
        push_attack_effect(world, tower_id, tower_position, position, stats.attack_interval);
        let applied = {
            let enemy = &mut world.enemies[index];
            let applied = (stats.attack * multiplier).min(enemy.hp);
            enemy.hp -= applied;
            enemy.last_hit_by = Some(tower_id);
            applied
        };
        *total_damage += applied;
        if applied > 0.0 {
            push_damage_number(world, applied, position);
        }
        struck.push(target);
    }
}
