//! Session snapshot: the complete visible state handed to rendering/UI each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GameState, Grade};
use crate::events::FeedbackEvent;
use crate::settings::GameSettings;
use crate::types::{Position, SimTime, TargetId};

/// Complete session state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub state: GameState,
    pub settings: GameSettings,
    /// Whole seconds left on the countdown.
    pub time_left: u32,
    /// Live targets, ordered by id (spawn order).
    pub targets: Vec<TargetView>,
    pub stats: ScoreStats,
    /// End-of-session report, present once the session is finished.
    pub report: Option<SessionReport>,
    pub events: Vec<FeedbackEvent>,
}

/// A live target as the renderer needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub position: Position,
    /// Visual radius (meters).
    pub size: f64,
}

/// One successful hit. Appended in hit order, never edited.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitRecord {
    /// Seconds of active play since the session started.
    pub time: f64,
    /// Milliseconds between the target's spawn and the shot.
    pub reaction_time: f64,
    /// Ray origin to target center (meters).
    pub distance: f64,
}

/// Running statistics for the current session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    pub score: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// Percentage of shots that hit; 0 before the first shot.
    pub accuracy: f64,
    /// Mean reaction time over `hit_history` (ms); 0 with no hits.
    pub avg_reaction_time: f64,
    pub hit_history: Vec<HitRecord>,
}

/// Derived end-of-session figures, computed once when the countdown expires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub score: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
    pub accuracy: f64,
    pub avg_reaction_time: f64,
    /// Population standard deviation of reaction time (ms).
    pub reaction_std_dev: f64,
    /// Mean origin-to-center hit distance (meters).
    pub avg_distance: f64,
    pub grade: Grade,
    pub duration_secs: u32,
    pub hit_history: Vec<HitRecord>,
}
