//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::Grade;
use crate::types::TargetId;

/// Feedback for the HUD and sound system, drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackEvent {
    /// A shot destroyed a target.
    TargetHit {
        target_id: TargetId,
        distance: f64,
        reaction_ms: f64,
    },
    /// A shot struck nothing.
    ShotMissed,
    SessionStarted,
    SessionPaused,
    SessionResumed,
    /// The countdown reached zero.
    SessionFinished { grade: Grade },
    ReturnedToMenu,
}
