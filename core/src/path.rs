//! Fixed battlefield path geometry.
//!
//! The path is a polyline described as coordinate-range segments. Movement is
//! branch-free per enemy: the segment an enemy is in follows purely from its
//! current coordinates, with axis-specific speed multipliers on diagonal
//! segments. The progress score mirrors the same segment thresholds and adds
//! a per-segment offset to the coordinate the segment is driven by, so scores
//! are total-ordered across segments and strictly increase while an enemy
//! advances.

use crate::Position;

/// Position where wave enemies enter the battlefield.
pub const SPAWN_POSITION: Position = Position::new(-6.0, 56.0);

/// Horizontal threshold past which an enemy breaches the defence.
pub const GOAL_THRESHOLD: f32 = 99.0;

/// Advances a position by one movement quantum at the provided speed.
#[must_use]
pub fn advance(position: Position, speed: f32) -> Position {
    let x = position.x();
    let y = position.y();

    if x < 28.0 {
        Position::new(x + speed, y - speed / 10.0)
    } else if x < 52.0 && y > 20.0 {
        Position::new(x + speed / 3.0, y - speed * 2.0)
    } else if y <= 20.0 && x < 53.0 {
        Position::new(x + speed, y)
    } else if (53.0..75.0).contains(&x) && y < 87.0 {
        Position::new(x, y + speed * 2.0)
    } else if y >= 87.0 && x < 76.5 {
        Position::new(x + speed, y)
    } else if x >= 76.5 && y > 51.0 {
        Position::new(x + speed / 10.0, y - speed * 2.0)
    } else {
        Position::new(x + speed, y)
    }
}

/// Path-progress score used to rank enemies for first/last targeting.
///
/// Offsets leave slack between segments; the score jumps at segment seams
/// but never regresses for an advancing enemy.
#[must_use]
pub fn progress(position: Position) -> f32 {
    let x = position.x();
    let y = position.y();

    if x < 28.0 {
        x
    } else if x < 52.0 && y > 20.0 {
        40.0 + (60.0 - y)
    } else if y <= 20.0 && x < 53.0 {
        90.0 + x
    } else if x < 75.0 && y < 87.0 {
        150.0 + y
    } else if y >= 87.0 && x < 76.5 {
        250.0 + x
    } else if x >= 76.5 && y > 51.0 {
        340.0 + (90.0 - y)
    } else {
        390.0 + x
    }
}

#[cfg(test)]
mod tests {
    use super::{advance, progress, GOAL_THRESHOLD, SPAWN_POSITION};

    #[test]
    fn first_segment_drifts_up_while_marching_east() {
        let next = advance(SPAWN_POSITION, 1.0);
        assert_eq!(next.x(), -5.0);
        assert_eq!(next.y(), 55.9);
    }

    #[test]
    fn progress_is_strictly_monotonic_along_the_walk() {
        for speed in [0.15, 0.225, 0.5, 1.5] {
            let mut position = SPAWN_POSITION;
            let mut last_progress = progress(position);
            let mut steps = 0u32;

            while position.x() <= GOAL_THRESHOLD {
                position = advance(position, speed);
                let current = progress(position);
                assert!(
                    current > last_progress,
                    "progress regressed at ({}, {}) with speed {}: {} -> {}",
                    position.x(),
                    position.y(),
                    speed,
                    last_progress,
                    current
                );
                last_progress = current;
                steps += 1;
                assert!(steps < 50_000, "walk did not terminate");
            }
        }
    }

    #[test]
    fn walker_eventually_reaches_the_goal() {
        let mut position = SPAWN_POSITION;
        let mut steps = 0u32;
        while position.x() <= GOAL_THRESHOLD {
            position = advance(position, 1.5);
            steps += 1;
            assert!(steps < 10_000, "walk did not terminate");
        }
        assert!(position.x() > GOAL_THRESHOLD);
    }

    #[test]
    fn zero_speed_is_a_fixed_point() {
        let held = advance(SPAWN_POSITION, 0.0);
        assert_eq!(held, SPAWN_POSITION);
    }
}
