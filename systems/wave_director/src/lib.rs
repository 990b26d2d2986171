#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drives spawning and round progression.
//!
//! The director observes the round snapshot, accumulates simulated time from
//! `TimeAdvanced` events, and emits `SpawnEnemy` commands according to the
//! per-round composition tables. Once the snapshot reports a cleared wave it
//! waits out the inter-round delay and requests the next round, or stays
//! silent when auto-start is disabled and the player must resume manually.

use std::time::Duration;

use vanguard_defence_core::{waves, Command, Event, RoundSnapshot};

/// Delay between a cleared wave and the automatic start of the next round.
pub const ROUND_ADVANCE_DELAY: Duration = Duration::from_millis(4_000);

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    auto_start: bool,
}

impl Config {
    /// Creates a new configuration with the provided auto-start policy.
    #[must_use]
    pub const fn new(auto_start: bool) -> Self {
        Self { auto_start }
    }
}

/// Pure system that decides which enemy spawns next and when rounds advance.
#[derive(Debug)]
pub struct WaveDirector {
    auto_start: bool,
    spawn_accumulator: Duration,
    cleared_accumulator: Duration,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            auto_start: config.auto_start,
            spawn_accumulator: Duration::ZERO,
            cleared_accumulator: Duration::ZERO,
        }
    }

    /// Consumes events and the round snapshot to emit spawn and advance
    /// commands.
    pub fn handle(&mut self, events: &[Event], round: &RoundSnapshot, out: &mut Vec<Command>) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                Event::RoundStarted { .. } | Event::GameEnded { .. } => {
                    self.spawn_accumulator = Duration::ZERO;
                    self.cleared_accumulator = Duration::ZERO;
                }
                _ => {}
            }
        }

        if round.round == 0 || round.paused {
            return;
        }

        if round.wave_cleared {
            self.spawn_accumulator = Duration::ZERO;
            if !self.auto_start {
                return;
            }
            self.cleared_accumulator = self.cleared_accumulator.saturating_add(elapsed);
            if self.cleared_accumulator >= ROUND_ADVANCE_DELAY {
                self.cleared_accumulator = Duration::ZERO;
                out.push(Command::AdvanceRound);
            }
            return;
        }

        self.cleared_accumulator = Duration::ZERO;
        self.spawn_accumulator = self.spawn_accumulator.saturating_add(elapsed);

        let interval = waves::spawn_interval(round.round);
        if interval.is_zero() {
            return;
        }

        let mut projected_units = round.spawned_units;
        while self.spawn_accumulator >= interval {
            self.spawn_accumulator -= interval;
            if projected_units >= round.unit_limit {
                break;
            }
            let Some(order) = waves::spawn_order(round.round, projected_units) else {
                break;
            };
            projected_units = projected_units.saturating_add(order.units);
            out.push(Command::SpawnEnemy {
                kind: order.kind,
                units: order.units,
            });
        }
    }
}
