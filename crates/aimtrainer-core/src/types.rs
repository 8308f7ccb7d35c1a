//! Fundamental geometric and simulation types.

use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in world space (meters). Y is up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Straight-line distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        DVec3::from(*self).distance(DVec3::from(*other))
    }
}

impl From<Position> for DVec3 {
    fn from(p: Position) -> Self {
        DVec3::new(p.x, p.y, p.z)
    }
}

impl From<DVec3> for Position {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// A firing ray produced by the input layer.
///
/// `direction` is expected to be normalized; consumers re-normalize anyway
/// and treat a zero-length direction as a ray that hits nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Ray from `origin` aimed at `point`.
    pub fn toward(origin: DVec3, point: DVec3) -> Self {
        Self::new(origin, (point - origin).normalize_or_zero())
    }
}

/// Opaque, process-unique target identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u64);

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A live target as seen by the rest of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub position: Position,
    /// Driver timestamp (ms) of the input that spawned this target.
    pub spawn_ms: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Frame ticks processed since the engine was created.
    pub frame: u64,
    /// Seconds of active (PLAYING) time in the current session.
    pub session_secs: f64,
}

impl SimTime {
    /// Count one frame; `playing` frames also accumulate session time.
    pub fn advance(&mut self, delta_secs: f64, playing: bool) {
        self.frame += 1;
        if playing && delta_secs.is_finite() && delta_secs > 0.0 {
            self.session_secs += delta_secs;
        }
    }

    /// Zero the session clock for a fresh session.
    pub fn reset_session(&mut self) {
        self.session_secs = 0.0;
    }
}
