//! Scoring: per-shot statistics and the end-of-session report.

use aimtrainer_core::constants::*;
use aimtrainer_core::enums::Grade;
use aimtrainer_core::state::{HitRecord, ScoreStats, SessionReport};
use aimtrainer_core::types::Target;

/// What a single shot did.
#[derive(Debug, Clone, Copy)]
pub enum ShotOutcome {
    Miss,
    Hit { target: Target, distance: f64 },
}

/// Sole owner of the session's `ScoreStats`.
#[derive(Debug, Default)]
pub struct ScoringEngine {
    stats: ScoreStats,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero everything for a new session.
    pub fn reset(&mut self) {
        self.stats = ScoreStats::default();
    }

    pub fn stats(&self) -> &ScoreStats {
        &self.stats
    }

    /// Record one shot. `now_ms` is the shot's timestamp, `elapsed_secs` the
    /// active session time. Returns the new hit record on a hit.
    pub fn on_shot(&mut self, outcome: ShotOutcome, now_ms: f64, elapsed_secs: f64) -> Option<HitRecord> {
        let stats = &mut self.stats;
        stats.shots_fired += 1;

        let record = match outcome {
            ShotOutcome::Miss => None,
            ShotOutcome::Hit { target, distance } => {
                stats.shots_hit += 1;
                stats.score += POINTS_PER_HIT;

                let record = HitRecord {
                    time: elapsed_secs,
                    reaction_time: (now_ms - target.spawn_ms).max(0.0),
                    distance,
                };
                stats.hit_history.push(record);
                stats.avg_reaction_time = mean(stats.hit_history.iter().map(|h| h.reaction_time));
                Some(record)
            }
        };

        stats.accuracy = accuracy(stats.shots_hit, stats.shots_fired);
        record
    }

    /// Build the end-of-session report from the current stats.
    pub fn report(&self, duration_secs: u32) -> SessionReport {
        let stats = &self.stats;
        SessionReport {
            score: stats.score,
            shots_fired: stats.shots_fired,
            shots_hit: stats.shots_hit,
            accuracy: stats.accuracy,
            avg_reaction_time: stats.avg_reaction_time,
            reaction_std_dev: reaction_std_dev(&stats.hit_history, stats.avg_reaction_time),
            avg_distance: mean(stats.hit_history.iter().map(|h| h.distance)),
            grade: grade_for(stats.accuracy, stats.avg_reaction_time),
            duration_secs,
            hit_history: stats.hit_history.clone(),
        }
    }
}

/// Hit percentage; 0 when nothing has been fired.
pub fn accuracy(shots_hit: u32, shots_fired: u32) -> f64 {
    if shots_fired == 0 {
        return 0.0;
    }
    shots_hit as f64 / shots_fired as f64 * 100.0
}

/// Population standard deviation of reaction times around `mean_ms`.
pub fn reaction_std_dev(history: &[HitRecord], mean_ms: f64) -> f64 {
    mean(history.iter().map(|h| (h.reaction_time - mean_ms).powi(2))).sqrt()
}

/// First matching rule wins.
pub fn grade_for(accuracy: f64, avg_reaction_ms: f64) -> Grade {
    let meets = |(min_acc, max_rt): (f64, f64)| accuracy > min_acc && avg_reaction_ms < max_rt;

    if meets(GRADE_S) {
        Grade::S
    } else if meets(GRADE_A) {
        Grade::A
    } else if meets(GRADE_B) {
        Grade::B
    } else if accuracy > GRADE_C_ACCURACY {
        Grade::C
    } else {
        Grade::D
    }
}

/// Arithmetic mean, 0 for an empty sequence.
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
