#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that proposes path advancement for every enemy.
//!
//! The system accumulates simulated time from `TimeAdvanced` events and, for
//! every full movement quantum, walks each enemy one step along the fixed
//! path. It only proposes positions; the world validates and applies them,
//! handling breaches and dead enemies itself.

use std::time::Duration;

use vanguard_defence_core::{path, Command, EnemyView, Event};

/// Minimum simulated time between successive movement steps.
pub const STEP_QUANTUM: Duration = Duration::from_micros(22_500);

/// Movement system that advances enemies along the battlefield path.
#[derive(Debug, Default)]
pub struct Movement {
    accumulator: Duration,
}

impl Movement {
    /// Creates a new movement system with an empty time accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the enemy view to emit movement commands.
    pub fn handle(&mut self, events: &[Event], enemies: &EnemyView, out: &mut Vec<Command>) {
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                self.accumulator = self.accumulator.saturating_add(*dt);
            }
        }

        let steps = self.resolve_steps();
        if steps == 0 || enemies.is_empty() {
            return;
        }

        for snapshot in enemies.iter() {
            if snapshot.speed <= 0.0 {
                continue;
            }
            let mut position = snapshot.position;
            for _ in 0..steps {
                position = path::advance(position, snapshot.speed);
            }
            out.push(Command::MoveEnemy {
                enemy: snapshot.id,
                to: position,
            });
        }
    }

    fn resolve_steps(&mut self) -> u32 {
        let mut steps = 0;
        while self.accumulator >= STEP_QUANTUM {
            self.accumulator -= STEP_QUANTUM;
            steps += 1;
        }
        steps
    }
}
