//! Status-effect scheduling: slow/stun expiry, poison, lingering zones, and
//! regeneration.
//!
//! Each reconciler runs as a sub-tick of the world clock, in a fixed order,
//! so targeting always observes a pool already settled by the scheduler.
//! Durations are read from the source tower at expiry time; a tower that no
//! longer exists counts as expired.

use std::time::Duration;

use vanguard_defence_core::Event;

use crate::{process_kills, push_damage_number, World};

const POISON_QUANTUM: Duration = Duration::from_millis(10);
const POISON_DURATION: Duration = Duration::from_millis(4_000);
const POISON_BUDGET_MULTIPLIER: f32 = 4.0;
const LINGERING_QUANTUM: Duration = Duration::from_millis(50);
const REGEN_QUANTUM: Duration = Duration::from_millis(1_500);
const SLOW_FALLBACK_DURATION: Duration = Duration::from_millis(2_500);
const STUN_FALLBACK_DURATION: Duration = Duration::from_millis(150);

pub(crate) fn reconcile(world: &mut World, dt: Duration, out: &mut Vec<Event>) {
    expire_slows(world);
    expire_stuns(world);
    tick_poison(world, dt, out);
    tick_lingering(world, dt, out);
    tick_regen(world, dt);
}

fn expire_slows(world: &mut World) {
    let clock = world.clock;
    for index in 0..world.enemies.len() {
        let Some(slow) = world.enemies[index].slow else {
            continue;
        };
        let duration = world
            .towers
            .get(&slow.source)
            .map(|tower| tower.stats.slow.map_or(SLOW_FALLBACK_DURATION, |spec| spec.duration));
        let expired = match duration {
            None => true,
            Some(duration) => clock.saturating_sub(slow.applied_at) >= duration,
        };
        if !expired {
            continue;
        }
        let enemy = &mut world.enemies[index];
        enemy.slow = None;
        // A concurrent stun keeps the speed pinned at zero until it expires.
        if enemy.stun.is_none() {
            enemy.speed = enemy.base_speed;
        }
    }
}

fn expire_stuns(world: &mut World) {
    let clock = world.clock;
    for index in 0..world.enemies.len() {
        let Some(stun) = world.enemies[index].stun else {
            continue;
        };
        let duration = world
            .towers
            .get(&stun.source)
            .map(|tower| tower.stats.stun.map_or(STUN_FALLBACK_DURATION, |spec| spec.duration));
        let expired = match duration {
            None => true,
            Some(duration) => clock.saturating_sub(stun.applied_at) >= duration,
        };
        if !expired {
            continue;
        }
        let enemy = &mut world.enemies[index];
        enemy.stun = None;
        enemy.speed = match enemy.slow {
            Some(slow) => enemy.base_speed * slow.factor,
            None => enemy.base_speed,
        };
    }
}

fn tick_poison(world: &mut World, dt: Duration, out: &mut Vec<Event>) {
    world.poison_accumulator += dt;
    while world.poison_accumulator >= POISON_QUANTUM {
        world.poison_accumulator -= POISON_QUANTUM;
        poison_step(world, out);
    }
}

fn poison_step(world: &mut World, out: &mut Vec<Event>) {
    let clock = world.clock;
    let total_ticks = (POISON_DURATION.as_millis() / POISON_QUANTUM.as_millis()) as f32;
    let mut any_damage = false;

    for index in 0..world.enemies.len() {
        let Some(poison) = world.enemies[index].poison else {
            continue;
        };
        if clock.saturating_sub(poison.applied_at) >= POISON_DURATION {
            let enemy = &mut world.enemies[index];
            enemy.poison = None;
            enemy.can_regen = true;
            continue;
        }
        let Some(poison_damage) = world
            .towers
            .get(&poison.source)
            .map(|tower| tower.stats.poison_damage)
        else {
            continue;
        };
        if poison_damage <= 0.0 {
            continue;
        }

        let per_tick = POISON_BUDGET_MULTIPLIER * poison_damage / total_ticks;
        let applied = {
            let enemy = &mut world.enemies[index];
            let applied = per_tick.min(enemy.hp);
            enemy.hp -= applied;
            enemy.last_hit_by = Some(poison.source);
            applied
        };
        if let Some(tower) = world.towers.get_mut(&poison.source) {
            tower.damage_done += applied;
        }
        any_damage = true;
    }

    if any_damage {
        process_kills(world, out);
    }
}

fn tick_lingering(world: &mut World, dt: Duration, out: &mut Vec<Event>) {
    world.lingering_accumulator += dt;
    while world.lingering_accumulator >= LINGERING_QUANTUM {
        world.lingering_accumulator -= LINGERING_QUANTUM;
        lingering_step(world, out);
    }
}

fn lingering_step(world: &mut World, out: &mut Vec<Event>) {
    let clock = world.clock;
    world
        .zones
        .retain(|zone| clock.saturating_sub(zone.created_at) < zone.duration);
    if world.zones.is_empty() {
        return;
    }

    let mut any_damage = false;
    for index in 0..world.enemies.len() {
        let position = world.enemies[index].position;
        let mut total = 0.0_f32;
        for zone in &world.zones {
            if position.distance_to(zone.position) <= zone.radius {
                total += zone.damage;
            }
        }
        if total <= 0.0 {
            continue;
        }
        let applied = {
            let enemy = &mut world.enemies[index];
            let applied = total.min(enemy.hp);
            enemy.hp -= applied;
            applied
        };
        push_damage_number(world, applied, position);
        any_damage = true;
    }

    if any_damage {
        process_kills(world, out);
    }
}

fn tick_regen(world: &mut World, dt: Duration) {
    world.regen_accumulator += dt;
    while world.regen_accumulator >= REGEN_QUANTUM {
        world.regen_accumulator -= REGEN_QUANTUM;
        for enemy in &mut world.enemies {
            // Regeneration is not clamped to max hp.
            if enemy.can_regen && enemy.regen > 0.0 {
                enemy.hp += enemy.regen;
            }
        }
    }
}
