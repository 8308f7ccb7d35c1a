//! Snapshot system: builds a complete `SessionSnapshot` from session state.
//!
//! This system is read-only; it never modifies the session.

use aimtrainer_core::enums::GameState;
use aimtrainer_core::events::FeedbackEvent;
use aimtrainer_core::settings::GameSettings;
use aimtrainer_core::state::*;
use aimtrainer_core::types::SimTime;

use crate::systems::targets::TargetManager;

/// Build a complete snapshot of the current session.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    time: &SimTime,
    state: GameState,
    settings: &GameSettings,
    time_left: u32,
    targets: &TargetManager,
    stats: &ScoreStats,
    report: Option<&SessionReport>,
    events: Vec<FeedbackEvent>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: *time,
        state,
        settings: settings.clone(),
        time_left,
        targets: build_targets(targets, settings.target_size),
        stats: stats.clone(),
        report: report.cloned(),
        events,
    }
}

/// Build TargetView list, ordered by id.
fn build_targets(targets: &TargetManager, size: f64) -> Vec<TargetView> {
    targets
        .targets()
        .into_iter()
        .map(|t| TargetView {
            id: t.id,
            position: t.position,
            size,
        })
        .collect()
}
