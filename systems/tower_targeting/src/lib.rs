#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use std::cmp::Ordering;

use vanguard_defence_core::{
    path, EnemyId, EnemySnapshot, EnemyView, TargetAssignment, TargetingMode, TowerKind,
    TowerSnapshot, TowerView,
};

/// Tower targeting system that reuses a scratch buffer to avoid repeated
/// allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    candidates: Vec<Candidate>,
}

impl TowerTargeting {
    /// Creates a new targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes target assignments for the provided world snapshot.
    ///
    /// The output buffer is cleared before populating it with the latest
    /// assignments. Towers without an eligible enemy are simply absent.
    pub fn handle(&mut self, towers: &TowerView, enemies: &EnemyView, out: &mut Vec<TargetAssignment>) {
        out.clear();
        if enemies.is_empty() {
            return;
        }

        for tower in towers.iter() {
            self.collect_candidates(tower, enemies);
            if self.candidates.is_empty() {
                continue;
            }

            rank(&mut self.candidates, tower.targeting);
            let wanted = tower.attack_kind.target_count() as usize;
            let targets: Vec<EnemyId> = self
                .candidates
                .iter()
                .take(wanted)
                .map(|candidate| candidate.id)
                .collect();
            out.push(TargetAssignment {
                tower: tower.id,
                targets,
            });
        }
    }

    fn collect_candidates(&mut self, tower: &TowerSnapshot, enemies: &EnemyView) {
        self.candidates.clear();
        for enemy in enemies.iter() {
            if enemy.hp <= 0.0 {
                continue;
            }
            if enemy.position.distance_to(tower.position) > tower.radius {
                continue;
            }
            if !eligible(tower, enemy) {
                continue;
            }
            self.candidates.push(Candidate {
                id: enemy.id,
                hp: enemy.hp,
                progress: path::progress(enemy.position),
            });
        }
    }
}

/// Capability filter: stealth-capable towers see everything in range; gas
/// spitters skip targets already carrying their poison, slowers skip targets
/// already slowed, and every non-stealth tower skips stealth archetypes.
fn eligible(tower: &TowerSnapshot, enemy: &EnemySnapshot) -> bool {
    if tower.can_hit_stealth {
        return true;
    }
    match tower.kind {
        TowerKind::GasSpitter => !enemy.poisoned && !enemy.kind.is_stealth(),
        TowerKind::Slower => !enemy.slowed && !enemy.kind.is_stealth(),
        _ => !enemy.kind.is_stealth(),
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    id: EnemyId,
    hp: f32,
    progress: f32,
}

fn rank(candidates: &mut [Candidate], mode: TargetingMode) {
    match mode {
        TargetingMode::First => candidates.sort_by(|a, b| {
            descending(a.progress, b.progress).then_with(|| a.id.cmp(&b.id))
        }),
        TargetingMode::Last => candidates.sort_by(|a, b| {
            descending(b.progress, a.progress).then_with(|| a.id.cmp(&b.id))
        }),
        TargetingMode::HighestHp => candidates.sort_by(|a, b| {
            descending(a.hp, b.hp)
                .then_with(|| descending(a.progress, b.progress))
                .then_with(|| a.id.cmp(&b.id))
        }),
    }
}

fn descending(a: f32, b: f32) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
