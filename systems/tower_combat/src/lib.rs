#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits fire commands for towers ready to attack.

use vanguard_defence_core::{Command, TargetAssignment, TowerView};

/// Tower combat system that queues firing commands for ready towers.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireTower` entries for towers that are out of their
    /// cooldown and received a non-empty target assignment.
    pub fn handle(
        &mut self,
        towers: &TowerView,
        assignments: &[TargetAssignment],
        out: &mut Vec<Command>,
    ) {
        if assignments.is_empty() {
            return;
        }

        self.scratch.clear();
        for assignment in assignments {
            if assignment.targets.is_empty() {
                continue;
            }
            let Some(snapshot) = towers.get(assignment.tower) else {
                continue;
            };
            if !snapshot.ready {
                continue;
            }
            self.scratch.push(Command::FireTower {
                tower: assignment.tower,
                targets: assignment.targets.clone(),
            });
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}
