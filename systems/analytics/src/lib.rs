#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure analytics system that aggregates campaign statistics.
//!
//! Counters accumulate from world events; when a campaign ends the system
//! publishes a [`ScoreReport`] event for external leaderboard consumers and
//! starts counting the next campaign from zero.

use vanguard_defence_core::{Event, ScoreReport};

/// Analytics system tracking kills, breaches, and earnings per campaign.
#[derive(Debug, Default)]
pub struct Analytics {
    kills: u32,
    breaches: u32,
    rewards: u64,
    last_report: Option<ScoreReport>,
}

impl Analytics {
    /// Creates a new analytics system with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last score report published by the system, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&ScoreReport> {
        self.last_report.as_ref()
    }

    /// Consumes world events, publishing a report on terminal states.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Event>) {
        for event in events {
            match event {
                Event::EnemyKilled { reward, .. } => {
                    self.kills = self.kills.saturating_add(1);
                    self.rewards = self.rewards.saturating_add(*reward);
                }
                Event::EnemyBreached { .. } => {
                    self.breaches = self.breaches.saturating_add(1);
                }
                Event::GameEnded {
                    outcome,
                    round,
                    money,
                } => {
                    let report = ScoreReport {
                        outcome: *outcome,
                        round: *round,
                        kills: self.kills,
                        breaches: self.breaches,
                        rewards: self.rewards,
                        money: *money,
                    };
                    self.last_report = Some(report);
                    self.kills = 0;
                    self.breaches = 0;
                    self.rewards = 0;
                    out.push(Event::ScoreReported { report });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Analytics;
    use vanguard_defence_core::{EnemyId, EnemyKind, Event, Outcome, TowerId};

    fn killed(id: u32, reward: u64) -> Event {
        Event::EnemyKilled {
            enemy: EnemyId::new(id),
            kind: EnemyKind::Basic,
            reward,
            source: Some(TowerId::new(0)),
        }
    }

    #[test]
    fn counters_accumulate_until_the_campaign_ends() {
        let mut analytics = Analytics::new();
        let mut out = Vec::new();

        analytics.handle(&[killed(1, 15), killed(2, 15)], &mut out);
        assert!(out.is_empty());
        assert!(analytics.last_report().is_none());

        analytics.handle(
            &[
                Event::EnemyBreached {
                    enemy: EnemyId::new(3),
                    damage: 5,
                },
                Event::GameEnded {
                    outcome: Outcome::Defeat,
                    round: 7,
                    money: 230,
                },
            ],
            &mut out,
        );

        let report = analytics.last_report().expect("report published");
        assert_eq!(report.outcome, Outcome::Defeat);
        assert_eq!(report.round, 7);
        assert_eq!(report.kills, 2);
        assert_eq!(report.breaches, 1);
        assert_eq!(report.rewards, 30);
        assert_eq!(report.score(), 7 * 1_000 + 30);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn a_new_campaign_counts_from_zero() {
        let mut analytics = Analytics::new();
        let mut out = Vec::new();

        analytics.handle(
            &[
                killed(1, 15),
                Event::GameEnded {
                    outcome: Outcome::Victory,
                    round: 50,
                    money: 9_000,
                },
            ],
            &mut out,
        );
        analytics.handle(
            &[
                killed(2, 7),
                Event::GameEnded {
                    outcome: Outcome::Defeat,
                    round: 3,
                    money: 100,
                },
            ],
            &mut out,
        );

        let report = analytics.last_report().expect("report published");
        assert_eq!(report.kills, 1);
        assert_eq!(report.rewards, 7);
    }
}
